use super::*;

#[test]
fn keywords_match_name_or_filename() {
    assert_eq!(effect_for_card("IB Math AA", "math_aa_2021.pdf"), Some("glow-matrix"));
    assert_eq!(effect_for_card("Formulas", "PHYSICS_2023.pdf"), Some("vector-field"));
    assert_eq!(effect_for_card("Chemistry Data", "data.pdf"), Some("molecules"));
    assert_eq!(effect_for_card("Biology", "bio_2022.pdf"), None);
}

#[test]
fn first_keyword_wins() {
    assert_eq!(
        effect_for_card("Physics for math", "x.pdf"),
        Some("glow-matrix")
    );
}

#[test]
fn listing_splits_name_and_year() {
    let l = CardListing::from_filename("Physics_2023.PDF").unwrap();
    assert_eq!(l.name, "Physics");
    assert_eq!(l.year.as_deref(), Some("2023"));
    assert_eq!(l.effect, Some("vector-field"));

    let l = CardListing::from_filename("math_hl_v2.pdf").unwrap();
    assert_eq!(l.name, "math_hl_v2");
    assert_eq!(l.year, None);

    let l = CardListing::from_filename("_2020.pdf").unwrap();
    assert_eq!(l.name, "_2020");

    assert!(CardListing::from_filename("notes.txt").is_none());
    assert!(CardListing::from_filename("pdf").is_none());
}
