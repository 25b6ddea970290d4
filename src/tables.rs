//! Static chemistry tables consulted by the resolver and the engine.
//!
//! The auto-assignment lists are ordered slices rather than maps: entries
//! earlier in a list are tried first, and a pass stops as soon as at most one
//! group is left unknown.

use crate::group::AtomGroup;

/// Elements the hydrogen heuristic treats as nonmetals.
pub const NONMETALS: &[&str] = &[
    "H", "He", "C", "N", "O", "F", "P", "S", "Cl", "Se", "Br", "I", "At", "Ts",
];

/// Elements whose oxidation number is fixed in practically every compound.
pub const FIRST_DEGREE: &[(&str, i32)] = &[
    ("F", -1),
    ("Li", 1),
    ("Na", 1),
    ("K", 1),
    ("Rb", 1),
    ("Cs", 1),
    ("Fr", 1),
    ("Be", 2),
    ("Mg", 2),
    ("Ca", 2),
    ("Sr", 2),
    ("Ba", 2),
    ("Ra", 2),
    ("Sc", 3),
    ("Y", 3),
    ("Zr", 4),
    ("Hf", 4),
    ("Ta", 5),
    ("Tc", 7),
    ("Zn", 2),
    ("Cd", 2),
    ("B", 3),
    ("Al", 3),
    ("Ga", 3),
    ("In", 3),
    ("Ge", 4),
    ("Kr", 2),
    ("Rn", 2),
    ("La", 3),
    ("Ac", 3),
    ("Th", 4),
    ("Nd", 3),
    ("Pm", 3),
    ("Gd", 3),
    ("Dy", 3),
    ("Ho", 3),
    ("Es", 3),
    ("Er", 3),
    ("Fm", 3),
    ("Md", 3),
    ("Lu", 3),
    ("Lr", 3),
];

/// Oxygen and the halogens, applied after hydrogen has been placed.
pub const SECOND_DEGREE: &[(&str, i32)] =
    &[("O", -2), ("Cl", -1), ("Br", -1), ("I", -1), ("At", -1)];

/// A polyatomic ion with fixed internal oxidation numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnownIon {
    pub name: &'static str,
    /// `(symbol, count, oxidation)` per member, in written order.
    pub members: &'static [(&'static str, u32, i32)],
    pub charge: i32,
}

impl KnownIon {
    /// A fresh subgroup for this ion with `count` copies.
    pub fn to_group(&self, count: u32) -> AtomGroup {
        let children = self
            .members
            .iter()
            .map(|&(symbol, n, oxidation)| {
                AtomGroup::leaf(symbol, n).with_oxidation(oxidation)
            })
            .collect();
        AtomGroup::composite(self.name, children, count).with_oxidation(self.charge)
    }
}

pub const KNOWN_IONS: &[KnownIon] = &[
    KnownIon {
        name: "CO3",
        members: &[("C", 1, 4), ("O", 3, -2)],
        charge: -2,
    },
    KnownIon {
        name: "SO3",
        members: &[("S", 1, 4), ("O", 3, -2)],
        charge: -2,
    },
    KnownIon {
        name: "SO4",
        members: &[("S", 1, 6), ("O", 4, -2)],
        charge: -2,
    },
    KnownIon {
        name: "NO2",
        members: &[("N", 1, 3), ("O", 2, -2)],
        charge: -1,
    },
    KnownIon {
        name: "NO3",
        members: &[("N", 1, 5), ("O", 3, -2)],
        charge: -1,
    },
    KnownIon {
        name: "PO3",
        members: &[("P", 1, 3), ("O", 3, -2)],
        charge: -3,
    },
    KnownIon {
        name: "PO4",
        members: &[("P", 1, 5), ("O", 4, -2)],
        charge: -3,
    },
    KnownIon {
        name: "CN",
        members: &[("C", 1, 2), ("N", 1, -3)],
        charge: -1,
    },
    KnownIon {
        name: "SCN",
        members: &[("S", 1, -2), ("C", 1, 4), ("N", 1, -3)],
        charge: -1,
    },
    KnownIon {
        name: "OH",
        members: &[("O", 1, -2), ("H", 1, 1)],
        charge: -1,
    },
    KnownIon {
        name: "NH4",
        members: &[("N", 1, -3), ("H", 4, 1)],
        charge: 1,
    },
];

pub fn known_ion(name: &str) -> Option<&'static KnownIon> {
    KNOWN_IONS.iter().find(|ion| ion.name == name)
}

pub fn is_nonmetal(symbol: &str) -> bool {
    NONMETALS.contains(&symbol)
}
