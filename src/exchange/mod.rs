use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::CodecError;

pub mod code;
pub mod pairing;
pub mod reveal;
pub mod roster;

pub use pairing::{Derangement, Exchange, generate, generate_exchange};
pub use reveal::reveal;
pub use roster::Roster;

/// Two participants who give together, identified by their position after
/// the shuffle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Duo {
    pub id: usize,
    pub members: [String; 2],
}

impl Duo {
    /// The other member of this duo, if `member` belongs to it.
    pub fn partner_of(&self, member: &str) -> Option<&str> {
        match &self.members {
            [a, b] if a == member => Some(b.as_str()),
            [a, b] if b == member => Some(a.as_str()),
            _ => None,
        }
    }
}

/// What a single code holder is allowed to see.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretCodeEntry {
    pub name: String,
    pub partner: String,
    pub target_duo: Vec<String>,
}

/// Secret code to entry. This is the only artifact that gets persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LookupTable(BTreeMap<String, SecretCodeEntry>);

impl LookupTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, code: &str) -> Option<&SecretCodeEntry> {
        self.0.get(code)
    }

    pub fn contains_code(&self, code: &str) -> bool {
        self.0.contains_key(code)
    }

    pub(crate) fn insert(&mut self, code: String, entry: SecretCodeEntry) {
        self.0.insert(code, entry);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &SecretCodeEntry)> {
        self.0.iter()
    }

    /// Structural checks applied to every decoded table.
    pub fn validate(&self) -> Result<(), CodecError> {
        if self.0.is_empty() {
            return Err(CodecError::InvalidTable("table has no entries".into()));
        }
        for (code, entry) in &self.0 {
            if !code::is_well_formed(code) {
                return Err(CodecError::InvalidTable(format!(
                    "{code:?} is not a secret code"
                )));
            }
            if entry.name.trim().is_empty() || entry.partner.trim().is_empty() {
                return Err(CodecError::InvalidTable(format!(
                    "entry {code} is missing a name"
                )));
            }
            if entry.target_duo.len() != 2 {
                return Err(CodecError::InvalidTable(format!(
                    "entry {code} targets {} people",
                    entry.target_duo.len()
                )));
            }
        }
        Ok(())
    }
}
