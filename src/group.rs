//! The atom-group tree that the parser builds and the engine solves.

/// A node of a formula: a single element or a parenthesized subgroup.
///
/// Children order is significant. The hydrogen heuristic looks at direct
/// neighbors, and the renderer places brackets around the first and last
/// child of a [`Composite`](AtomGroup::Composite).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AtomGroup {
    /// One element symbol with a multiplicity.
    Leaf {
        symbol: String,
        count: u32,
        oxidation: Option<i32>,
    },
    /// A subgroup. `oxidation` is the net charge of one instance of the
    /// subgroup, never an atom-level oxidation state.
    Composite {
        label: String,
        children: Vec<AtomGroup>,
        count: u32,
        oxidation: Option<i32>,
    },
}

impl AtomGroup {
    /// A leaf with no oxidation number assigned yet.
    pub fn leaf(symbol: impl Into<String>, count: u32) -> Self {
        AtomGroup::Leaf {
            symbol: symbol.into(),
            count,
            oxidation: None,
        }
    }

    /// A subgroup with no net charge assigned yet.
    pub fn composite(label: impl Into<String>, children: Vec<AtomGroup>, count: u32) -> Self {
        AtomGroup::Composite {
            label: label.into(),
            children,
            count,
            oxidation: None,
        }
    }

    /// Builder-style setter for the oxidation number.
    pub fn with_oxidation(mut self, value: i32) -> Self {
        self.set_oxidation(Some(value));
        self
    }

    /// Element symbol for a leaf, written label for a subgroup.
    pub fn symbol(&self) -> &str {
        match self {
            AtomGroup::Leaf { symbol, .. } => symbol,
            AtomGroup::Composite { label, .. } => label,
        }
    }

    /// Symbol of the leftmost leaf in this group.
    pub fn leading_symbol(&self) -> Option<&str> {
        match self {
            AtomGroup::Leaf { symbol, .. } => Some(symbol),
            AtomGroup::Composite { children, .. } => {
                children.first().and_then(AtomGroup::leading_symbol)
            }
        }
    }

    pub fn count(&self) -> u32 {
        match self {
            AtomGroup::Leaf { count, .. } | AtomGroup::Composite { count, .. } => *count,
        }
    }

    pub fn oxidation(&self) -> Option<i32> {
        match self {
            AtomGroup::Leaf { oxidation, .. } | AtomGroup::Composite { oxidation, .. } => {
                *oxidation
            }
        }
    }

    pub fn set_oxidation(&mut self, value: Option<i32>) {
        match self {
            AtomGroup::Leaf { oxidation, .. } | AtomGroup::Composite { oxidation, .. } => {
                *oxidation = value
            }
        }
    }

    pub fn is_known(&self) -> bool {
        self.oxidation().is_some()
    }

    pub fn is_composite(&self) -> bool {
        matches!(self, AtomGroup::Composite { .. })
    }

    /// Children of a subgroup; empty for a leaf.
    pub fn children(&self) -> &[AtomGroup] {
        match self {
            AtomGroup::Leaf { .. } => &[],
            AtomGroup::Composite { children, .. } => children,
        }
    }

    /// True when this group and every descendant carry an oxidation number.
    pub fn is_solved(&self) -> bool {
        self.is_known() && self.children().iter().all(AtomGroup::is_solved)
    }

    /// Resets this group and all of its descendants to unknown.
    pub fn clear(&mut self) {
        self.set_oxidation(None);
        if let AtomGroup::Composite { children, .. } = self {
            children.iter_mut().for_each(AtomGroup::clear);
        }
    }

    /// `count × oxidation`, or `None` while unknown.
    pub fn contribution(&self) -> Option<i64> {
        self.oxidation()
            .map(|value| i64::from(self.count()) * i64::from(value))
    }
}

/// A parsed formula: top-level groups plus the overall ionic charge.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Formula {
    pub groups: Vec<AtomGroup>,
    pub charge: i32,
}

impl Formula {
    pub fn new(groups: Vec<AtomGroup>, charge: i32) -> Self {
        Formula { groups, charge }
    }

    /// Number of top-level groups without an oxidation number.
    pub fn unknown_count(&self) -> usize {
        unknown_count(&self.groups)
    }

    /// True when every group at every level is known.
    pub fn is_solved(&self) -> bool {
        self.groups.iter().all(AtomGroup::is_solved)
    }

    /// Weighted sum of the top-level oxidation numbers, if all are known.
    pub fn net_charge(&self) -> Option<i64> {
        net_charge(&self.groups)
    }
}

pub(crate) fn unknown_count(groups: &[AtomGroup]) -> usize {
    groups.iter().filter(|g| !g.is_known()).count()
}

/// Sum of `count × oxidation` over `groups`, or `None` if any is unknown.
pub fn net_charge(groups: &[AtomGroup]) -> Option<i64> {
    groups.iter().map(AtomGroup::contribution).sum()
}
