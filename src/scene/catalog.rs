//! Effect assignment for cards built from a booklet listing.

use crate::effects::{molecule_swarm, text_matrix, vector_field};

/// Keyword → effect name, checked in order against the lower-cased card name and filename.
pub const EFFECT_BY_KEYWORD: [(&str, &str); 3] = [
    ("math", text_matrix::NAME),
    ("physics", vector_field::NAME),
    ("chemistry", molecule_swarm::NAME),
];

/// Effect for a card, from keywords in its display name or filename. First match wins.
pub fn effect_for_card(name: &str, filename: &str) -> Option<&'static str> {
    let haystack = format!("{name} {filename}").to_lowercase();
    EFFECT_BY_KEYWORD
        .iter()
        .find(|(keyword, _)| haystack.contains(keyword))
        .map(|&(_, effect)| effect)
}

/// A card listing entry derived from a `<name>_<year>.pdf` filename.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CardListing {
    pub filename: String,
    pub name: String,
    /// Four-digit year, when the filename carries one.
    pub year: Option<String>,
    pub effect: Option<&'static str>,
}

impl CardListing {
    /// Parse a listing filename. Returns `None` for anything that is not a `.pdf`.
    pub fn from_filename(filename: &str) -> Option<Self> {
        let stem = strip_suffix_ignore_case(filename, ".pdf")?;
        let (name, year) = match stem.rsplit_once('_') {
            Some((name, year))
                if !name.is_empty()
                    && year.len() == 4
                    && year.bytes().all(|b| b.is_ascii_digit()) =>
            {
                (name.to_string(), Some(year.to_string()))
            }
            _ => (stem.to_string(), None),
        };
        let effect = effect_for_card(&name, filename);
        Some(Self {
            filename: filename.to_string(),
            name,
            year,
            effect,
        })
    }
}

fn strip_suffix_ignore_case<'a>(s: &'a str, suffix: &str) -> Option<&'a str> {
    let split = s.len().checked_sub(suffix.len())?;
    if !s.is_char_boundary(split) {
        return None;
    }
    let (head, tail) = s.split_at(split);
    tail.eq_ignore_ascii_case(suffix).then_some(head)
}

#[cfg(test)]
#[path = "../../tests/unit/scene/catalog.rs"]
mod tests;
