use super::pairing::validate_count;
use crate::error::{ExchangeError, ExchangeResult};

/// Participant list being collected before setup is finalized.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    names: Vec<String>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_names<I, S>(names: I) -> ExchangeResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut roster = Self::new();
        for name in names {
            roster.add(name.as_ref())?;
        }
        Ok(roster)
    }

    /// Adds a trimmed name, rejecting blanks and case-insensitive duplicates.
    pub fn add(&mut self, name: &str) -> ExchangeResult<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ExchangeError::EmptyName);
        }
        let lowered = name.to_lowercase();
        if self.names.iter().any(|n| n.to_lowercase() == lowered) {
            return Err(ExchangeError::DuplicateParticipant(name.to_string()));
        }
        self.names.push(name.to_string());
        Ok(())
    }

    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.names.len();
        self.names.retain(|n| n != name);
        self.names.len() != before
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn is_ready(&self) -> bool {
        validate_count(self.len()).is_ok()
    }
}
