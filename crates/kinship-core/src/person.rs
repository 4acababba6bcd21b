//! Person record types: the input side of the family graph

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use ulid::Ulid;

use crate::relation::RelationKind;

/// Unique identifier for a person
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PersonId(pub Ulid);

impl PersonId {
    pub fn new() -> Self {
        Self(Ulid::new())
    }

    pub fn from_string(s: &str) -> Result<Self, ulid::DecodeError> {
        Ok(Self(Ulid::from_string(s)?))
    }
}

impl Default for PersonId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PersonId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for PersonId {
    type Err = ulid::DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_string(s)
    }
}

/// Gender of a person, as far as the relationship labels care
///
/// Parsing is lenient: anything other than "male" or "female"
/// (in any case) is `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Gender {
    Male,
    Female,
    #[default]
    Unknown,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Unknown => "",
        }
    }
}

impl From<&str> for Gender {
    fn from(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "male" => Self::Male,
            "female" => Self::Female,
            _ => Self::Unknown,
        }
    }
}

impl From<String> for Gender {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<Gender> for String {
    fn from(g: Gender) -> Self {
        g.as_str().to_string()
    }
}

/// One person as stored by the record source
///
/// The four relation fields are free text written by users. They may embed
/// anchors such as `<a href="person?id=...">Dan</a>` pointing at other persons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonRecord {
    pub id: PersonId,

    /// Display name
    pub name: String,

    #[serde(default)]
    pub gender: Gender,

    #[serde(default)]
    pub siblings: String,

    #[serde(default)]
    pub parents: String,

    #[serde(default)]
    pub spouses: String,

    #[serde(default)]
    pub children: String,
}

impl PersonRecord {
    /// Create a record with empty relation fields
    pub fn new(id: PersonId, name: impl Into<String>, gender: Gender) -> Self {
        Self {
            id,
            name: name.into(),
            gender,
            siblings: String::new(),
            parents: String::new(),
            spouses: String::new(),
            children: String::new(),
        }
    }

    pub fn with_siblings(mut self, text: impl Into<String>) -> Self {
        self.siblings = text.into();
        self
    }

    pub fn with_parents(mut self, text: impl Into<String>) -> Self {
        self.parents = text.into();
        self
    }

    pub fn with_spouses(mut self, text: impl Into<String>) -> Self {
        self.spouses = text.into();
        self
    }

    pub fn with_children(mut self, text: impl Into<String>) -> Self {
        self.children = text.into();
        self
    }

    /// The relation fields paired with the kind of edge they assert, in the
    /// order edges are added to a node.
    pub fn relation_fields(&self) -> [(RelationKind, &str); 4] {
        [
            (RelationKind::Sibling, self.siblings.as_str()),
            (RelationKind::Parent, self.parents.as_str()),
            (RelationKind::Spouse, self.spouses.as_str()),
            (RelationKind::Child, self.children.as_str()),
        ]
    }
}

/// All known person records, keyed by id
#[derive(Debug, Clone, Default)]
pub struct PersonRecords {
    records: HashMap<PersonId, PersonRecord>,
    order: Vec<PersonId>,
}

impl PersonRecords {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &PersonId) -> Option<&PersonRecord> {
        self.records.get(id)
    }

    pub fn contains(&self, id: &PersonId) -> bool {
        self.records.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in the order they were supplied by the source
    pub fn iter(&self) -> impl Iterator<Item = &PersonRecord> {
        self.order.iter().filter_map(|id| self.records.get(id))
    }

    /// Insert a record, replacing any earlier record with the same id
    pub fn insert(&mut self, record: PersonRecord) {
        if !self.records.contains_key(&record.id) {
            self.order.push(record.id);
        }
        self.records.insert(record.id, record);
    }
}

impl FromIterator<PersonRecord> for PersonRecords {
    fn from_iter<I: IntoIterator<Item = PersonRecord>>(iter: I) -> Self {
        let mut records = Self::new();
        for record in iter {
            records.insert(record);
        }
        records
    }
}

impl From<Vec<PersonRecord>> for PersonRecords {
    fn from(records: Vec<PersonRecord>) -> Self {
        records.into_iter().collect()
    }
}
