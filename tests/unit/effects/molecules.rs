use super::*;
use crate::theme::StyleSheet;

#[test]
fn templates_are_well_formed() {
    let names: Vec<&str> = TEMPLATES.iter().map(|t| t.name).collect();
    assert_eq!(
        names,
        ["O2", "N2", "H2", "H2O", "CO2", "CH4", "NH3", "SO2", "HCl", "C2H6"]
    );
    for t in &TEMPLATES {
        assert!(!t.bonds.is_empty(), "{}", t.name);
        for b in t.bonds {
            assert!(b.a < t.atoms.len() && b.b < t.atoms.len(), "{}", t.name);
            assert_ne!(b.a, b.b);
            assert!((1..=3).contains(&b.order));
        }
    }
}

#[test]
fn formulas_match_names() {
    let count = |name: &str, e: Element| {
        TEMPLATES
            .iter()
            .find(|t| t.name == name)
            .unwrap()
            .atoms
            .iter()
            .filter(|a| a.element == e)
            .count()
    };
    assert_eq!(count("C2H6", Element::C), 2);
    assert_eq!(count("C2H6", Element::H), 6);
    assert_eq!(count("CH4", Element::H), 4);
    assert_eq!(count("SO2", Element::O), 2);
    assert_eq!(count("HCl", Element::Cl), 1);
}

#[test]
fn hydrogen_is_smallest() {
    for e in [Element::C, Element::N, Element::O, Element::S, Element::Cl] {
        assert!(Element::H.radius() < e.radius(), "{}", e.symbol());
    }
}

#[test]
fn palette_maps_theme_colors() {
    let style = StyleSheet::default()
        .with_property("--fx-accent", "56, 189, 248")
        .with_property("--fx-accent-2", "250, 204, 21")
        .with_property("--fx-ink", "15, 23, 42")
        .with_property("--fx-muted", "148, 163, 184")
        .with_property("--fx-warm", "239, 68, 68")
        .with_property("--fx-cool", "59, 130, 246")
        .with_body_background("rgb(250, 250, 247)");
    let p = ElementPalette::from_theme(&Theme::read(&style));
    assert_eq!(p.fill(Element::H), Rgb8::new(250, 250, 247));
    assert_eq!(p.fill(Element::C), Rgb8::new(15, 23, 42));
    assert_eq!(p.fill(Element::O), Rgb8::new(239, 68, 68));
    assert_eq!(p.fill(Element::N), Rgb8::new(59, 130, 246));
    assert_eq!(p.fill(Element::S), Rgb8::new(250, 204, 21));
    assert_eq!(p.fill(Element::Cl), Rgb8::new(56, 189, 248));
    assert_eq!(p.bond, Rgb8::new(148, 163, 184));
    assert_eq!(p.outline, Rgb8::new(15, 23, 42));
    assert_eq!(p.outline, p.carbon);
}
