use super::{LookupTable, SecretCodeEntry};
use crate::error::{ExchangeError, ExchangeResult};

/// Looks up a participant's own entry. Codes are matched uppercased and
/// names case-insensitively, both after trimming.
pub fn reveal<'a>(name: &str, code: &str, table: &'a LookupTable) -> ExchangeResult<&'a SecretCodeEntry> {
    let name = name.trim();
    let code = code.trim().to_uppercase();

    let entry = table.get(&code).ok_or(ExchangeError::UnknownCode)?;
    if entry.name.trim().to_lowercase() != name.to_lowercase() {
        return Err(ExchangeError::NameMismatch);
    }
    Ok(entry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exchange::generate;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn table() -> LookupTable {
        let names = ["Alice", "Bob", "Cara", "Dan"].map(String::from);
        generate(&names, &mut ChaCha8Rng::seed_from_u64(9)).unwrap()
    }

    fn code_of<'a>(table: &'a LookupTable, name: &str) -> &'a str {
        table
            .iter()
            .find(|(_, entry)| entry.name == name)
            .map(|(code, _)| code.as_str())
            .unwrap()
    }

    #[test]
    fn unknown_code() {
        let table = table();
        assert!(matches!(
            reveal("Alice", "abc123", &table),
            Err(ExchangeError::UnknownCode)
        ));
    }

    #[test]
    fn name_must_match_code_owner() {
        let table = table();
        let code = code_of(&table, "Alice");
        assert!(matches!(
            reveal("Bob", code, &table),
            Err(ExchangeError::NameMismatch)
        ));
    }

    #[test]
    fn name_and_code_are_case_insensitive() {
        let table = table();
        let code = code_of(&table, "Alice").to_lowercase();
        let entry = reveal("  aLiCe ", &format!(" {code}\n"), &table).unwrap();
        assert_eq!(entry.name, "Alice");
        assert_eq!(entry.target_duo.len(), 2);
        assert!(!entry.target_duo.contains(&"Alice".to_string()));
    }
}
