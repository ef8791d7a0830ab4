//! Immutable bidirectional token <-> ID mapping.

use std::collections::HashMap;

use crate::error::{Result, TokenizationError};

/// Bidirectional mapping between token strings and integer IDs.
///
/// Built once at load time and never mutated afterwards. The forward and
/// inverse maps are exact inverses by construction: inserting a duplicate
/// ID fails the load, and JSON object keys are unique, so no two tokens
/// can share an ID and no two IDs can share a token.
pub struct VocabularyTable {
    token_to_id: HashMap<String, i32>,
    id_to_token: HashMap<i32, String>,
}

impl VocabularyTable {
    /// Build a table from (token, id) entries, enforcing the bijection.
    pub(crate) fn from_entries<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, i32)>,
    {
        let mut token_to_id = HashMap::new();
        let mut id_to_token = HashMap::new();

        for (token, id) in entries {
            if let Some(existing) = id_to_token.insert(id, token.clone()) {
                return Err(TokenizationError::ParseError(format!(
                    "duplicate token ID {} (tokens {:?} and {:?})",
                    id, existing, token
                )));
            }
            token_to_id.insert(token, id);
        }

        Ok(Self {
            token_to_id,
            id_to_token,
        })
    }

    /// Look up the ID for an exact token string.
    pub fn id_of(&self, token: &str) -> Option<i32> {
        self.token_to_id.get(token).copied()
    }

    /// Look up the token string for an ID.
    pub fn token_of(&self, id: i32) -> Option<&str> {
        self.id_to_token.get(&id).map(String::as_str)
    }

    /// Number of tokens in the vocabulary.
    pub fn size(&self) -> usize {
        self.token_to_id.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bijection() {
        let vocab = VocabularyTable::from_entries(vec![
            ("hello".to_string(), 4),
            ("world".to_string(), 5),
        ])
        .unwrap();

        assert_eq!(vocab.size(), 2);
        assert_eq!(vocab.id_of("hello"), Some(4));
        assert_eq!(vocab.token_of(4), Some("hello"));
        assert_eq!(vocab.id_of("missing"), None);
        assert_eq!(vocab.token_of(99), None);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let result = VocabularyTable::from_entries(vec![
            ("a".to_string(), 1),
            ("b".to_string(), 1),
        ]);
        assert!(matches!(result, Err(TokenizationError::ParseError(_))));
    }
}
