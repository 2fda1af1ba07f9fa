//! Fixed molecule templates and the element palette used by the molecule swarm.

use crate::foundation::core::{Point, Rgb8};
use crate::theme::Theme;

/// Chemical elements appearing in the templates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Element {
    H,
    C,
    N,
    O,
    S,
    Cl,
}

impl Element {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::H => "H",
            Self::C => "C",
            Self::N => "N",
            Self::O => "O",
            Self::S => "S",
            Self::Cl => "Cl",
        }
    }

    /// Drawn radius in logical units. Hydrogen is the smallest.
    pub fn radius(self) -> f64 {
        match self {
            Self::H => 3.0,
            Self::C => 4.6,
            Self::N => 4.4,
            Self::O => 4.6,
            Self::S => 5.4,
            Self::Cl => 5.2,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct AtomDef {
    pub(crate) element: Element,
    pub(crate) offset: Point,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct BondDef {
    pub(crate) a: usize,
    pub(crate) b: usize,
    /// 1, 2 or 3.
    pub(crate) order: u8,
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct Template {
    pub(crate) name: &'static str,
    pub(crate) atoms: &'static [AtomDef],
    pub(crate) bonds: &'static [BondDef],
}

const fn atom(element: Element, x: f64, y: f64) -> AtomDef {
    AtomDef {
        element,
        offset: Point::new(x, y),
    }
}

const fn bond(a: usize, b: usize, order: u8) -> BondDef {
    BondDef { a, b, order }
}

use Element::{C, Cl, H, N, O, S};

pub(crate) const TEMPLATES: [Template; 10] = [
    Template {
        name: "O2",
        atoms: &[atom(O, -6.0, 0.0), atom(O, 6.0, 0.0)],
        bonds: &[bond(0, 1, 2)],
    },
    Template {
        name: "N2",
        atoms: &[atom(N, -5.5, 0.0), atom(N, 5.5, 0.0)],
        bonds: &[bond(0, 1, 3)],
    },
    Template {
        name: "H2",
        atoms: &[atom(H, -4.5, 0.0), atom(H, 4.5, 0.0)],
        bonds: &[bond(0, 1, 1)],
    },
    Template {
        name: "H2O",
        atoms: &[atom(O, 0.0, -2.0), atom(H, -8.0, 5.0), atom(H, 8.0, 5.0)],
        bonds: &[bond(0, 1, 1), bond(0, 2, 1)],
    },
    Template {
        name: "CO2",
        atoms: &[atom(O, -12.0, 0.0), atom(C, 0.0, 0.0), atom(O, 12.0, 0.0)],
        bonds: &[bond(0, 1, 2), bond(1, 2, 2)],
    },
    Template {
        name: "CH4",
        atoms: &[
            atom(C, 0.0, 0.0),
            atom(H, 0.0, -11.0),
            atom(H, 10.4, 3.6),
            atom(H, -10.4, 3.6),
            atom(H, 0.0, 10.0),
        ],
        bonds: &[bond(0, 1, 1), bond(0, 2, 1), bond(0, 3, 1), bond(0, 4, 1)],
    },
    Template {
        name: "NH3",
        atoms: &[
            atom(N, 0.0, -1.0),
            atom(H, 0.0, -11.0),
            atom(H, 9.0, 5.0),
            atom(H, -9.0, 5.0),
        ],
        bonds: &[bond(0, 1, 1), bond(0, 2, 1), bond(0, 3, 1)],
    },
    Template {
        name: "SO2",
        atoms: &[atom(S, 0.0, -3.0), atom(O, -11.0, 5.0), atom(O, 11.0, 5.0)],
        bonds: &[bond(0, 1, 2), bond(0, 2, 2)],
    },
    Template {
        name: "HCl",
        atoms: &[atom(H, -6.0, 0.0), atom(Cl, 7.0, 0.0)],
        bonds: &[bond(0, 1, 1)],
    },
    Template {
        name: "C2H6",
        atoms: &[
            atom(C, -6.5, 0.0),
            atom(C, 6.5, 0.0),
            atom(H, -12.0, -9.0),
            atom(H, -16.0, 4.0),
            atom(H, -6.5, 10.5),
            atom(H, 12.0, -9.0),
            atom(H, 16.0, 4.0),
            atom(H, 6.5, 10.5),
        ],
        bonds: &[
            bond(0, 1, 1),
            bond(0, 2, 1),
            bond(0, 3, 1),
            bond(0, 4, 1),
            bond(1, 5, 1),
            bond(1, 6, 1),
            bond(1, 7, 1),
        ],
    },
];

/// Fill colors per element, plus the outline used for hydrogen and the bond color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct ElementPalette {
    pub(crate) hydrogen: Rgb8,
    pub(crate) carbon: Rgb8,
    pub(crate) nitrogen: Rgb8,
    pub(crate) oxygen: Rgb8,
    pub(crate) sulfur: Rgb8,
    pub(crate) chlorine: Rgb8,
    pub(crate) outline: Rgb8,
    pub(crate) bond: Rgb8,
}

impl ElementPalette {
    pub(crate) fn from_theme(theme: &Theme) -> Self {
        Self {
            hydrogen: theme.background,
            carbon: theme.ink,
            nitrogen: theme.cool,
            oxygen: theme.warm,
            sulfur: theme.accent_2,
            chlorine: theme.accent,
            outline: theme.ink,
            bond: theme.muted,
        }
    }

    pub(crate) fn fill(&self, element: Element) -> Rgb8 {
        match element {
            Element::H => self.hydrogen,
            Element::C => self.carbon,
            Element::N => self.nitrogen,
            Element::O => self.oxygen,
            Element::S => self.sulfur,
            Element::Cl => self.chlorine,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/molecules.rs"]
mod tests;
