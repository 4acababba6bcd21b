//! Relation kinds and their gendered labels

use serde::{Deserialize, Serialize};

/// Kind of family relation asserted by one of a person's relation fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationKind {
    Parent,
    Child,
    Spouse,
    Sibling,
}

impl RelationKind {
    pub const ALL: [RelationKind; 4] = [
        RelationKind::Parent,
        RelationKind::Child,
        RelationKind::Spouse,
        RelationKind::Sibling,
    ];

    /// The ungendered name, e.g. "parent"
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Parent => "parent",
            Self::Child => "child",
            Self::Spouse => "spouse",
            Self::Sibling => "sibling",
        }
    }
}

impl std::fmt::Display for RelationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Gendered label for a relation, e.g. a male parent is a "father".
///
/// Unknown gender falls back to the plain kind name.
pub fn label(kind: RelationKind, gender: crate::person::Gender) -> &'static str {
    use crate::person::Gender::*;
    use RelationKind::*;

    match (kind, gender) {
        (Parent, Male) => "father",
        (Parent, Female) => "mother",
        (Child, Male) => "son",
        (Child, Female) => "daughter",
        (Spouse, Male) => "husband",
        (Spouse, Female) => "wife",
        (Sibling, Male) => "brother",
        (Sibling, Female) => "sister",
        (kind, Unknown) => kind.as_str(),
    }
}
