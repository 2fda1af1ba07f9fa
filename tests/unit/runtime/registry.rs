use super::*;
use crate::effects::{FactoryCx, HoverEffect};

fn never(_: &mut FactoryCx<'_>) -> Option<Box<dyn HoverEffect>> {
    None
}

#[test]
fn builtin_names_and_side_channel() {
    let r = EffectRegistry::builtin();
    assert_eq!(
        r.names().collect::<Vec<_>>(),
        ["glow-matrix", "molecules", "vector-field"]
    );
    assert!(r.get("glow-matrix").unwrap().pointer_vars);
    assert!(!r.get("vector-field").unwrap().pointer_vars);
    assert!(!r.get("molecules").unwrap().pointer_vars);
}

#[test]
fn lookup_is_exact_match() {
    let r = EffectRegistry::builtin();
    assert!(r.get("Glow-Matrix").is_none());
    assert!(r.get(" glow-matrix").is_none());
    assert!(r.get("").is_none());
    assert!(!r.contains("vector"));
}

#[test]
fn custom_entries_replace_duplicates() {
    let r = EffectRegistry::from_entries([
        (
            "inert",
            EffectEntry {
                factory: never,
                pointer_vars: false,
            },
        ),
        (
            "inert",
            EffectEntry {
                factory: never,
                pointer_vars: true,
            },
        ),
    ]);
    assert_eq!(r.len(), 1);
    assert!(r.get("inert").unwrap().pointer_vars);
    assert!(EffectRegistry::default().is_empty());
}
