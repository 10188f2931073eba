//! Pronoun reflection for captured text.
//!
//! When a rule captures part of the operator's utterance ("Are you
//! (my friend)?"), the captured words are reflected before they are spoken
//! back: "my friend" becomes "your friend". Lookup is per
//! whitespace-delimited token and case-insensitive on the key.
//!
//! ```
//! use hal_logic::reflections::Reflections;
//!
//! let reflections = Reflections::default();
//! assert_eq!(reflections.reflect("I like my   ship"), "you like your ship");
//! ```

use std::collections::HashMap;

/// Default token substitutions, first-person ↔ second-person.
pub const DEFAULT_REFLECTIONS: &[(&str, &str)] = &[
    ("i", "you"),
    ("i'm", "you are"),
    ("i'd", "you would"),
    ("i've", "you have"),
    ("i'll", "you will"),
    ("me", "you"),
    ("my", "your"),
    ("mine", "yours"),
    ("myself", "yourself"),
    ("you", "me"),
    ("you're", "I am"),
    ("you've", "I have"),
    ("you'll", "I will"),
    ("your", "my"),
    ("yours", "mine"),
    ("yourself", "myself"),
];

/// Case-insensitive token → replacement table.
#[derive(Debug, Clone)]
pub struct Reflections {
    table: HashMap<String, String>,
}

impl Reflections {
    /// Build a table from `(token, replacement)` pairs. Keys are folded to
    /// lowercase; a later duplicate key wins.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        let table = pairs
            .into_iter()
            .map(|(k, v)| (k.as_ref().to_lowercase(), v.into()))
            .collect();
        Self { table }
    }

    /// Replacement for a single token, if any.
    pub fn lookup(&self, token: &str) -> Option<&str> {
        self.table.get(&token.to_lowercase()).map(String::as_str)
    }

    /// Reflect every token of `text`, rejoining with single spaces.
    pub fn reflect(&self, text: &str) -> String {
        text.split_whitespace()
            .map(|token| self.lookup(token).unwrap_or(token))
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl Default for Reflections {
    fn default() -> Self {
        Self::from_pairs(DEFAULT_REFLECTIONS.iter().copied())
    }
}
