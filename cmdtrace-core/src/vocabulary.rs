// cmdtrace-core/src/vocabulary.rs
//! The set of tokens that are safe to disclose without redaction.

use std::collections::HashSet;

use log::debug;

use crate::structure::{recursive_items, StructureMap};

/// Tokens every host dispatcher accepts even when they are absent from the
/// introspected tree.
pub const SEED_TOKENS: [&str; 2] = ["-h", "--version"];

/// A whitelist of command names and option-strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    tokens: HashSet<String>,
}

impl Vocabulary {
    /// A vocabulary holding only [`SEED_TOKENS`].
    pub fn seeded() -> Self {
        let mut vocabulary = Self::default();
        for token in SEED_TOKENS {
            vocabulary.insert(token);
        }
        vocabulary
    }

    pub fn insert(&mut self, token: impl Into<String>) -> bool {
        self.tokens.insert(token.into())
    }

    pub fn contains(&self, token: &str) -> bool {
        self.tokens.contains(token)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }
}

impl<S: Into<String>> Extend<S> for Vocabulary {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for token in iter {
            self.insert(token);
        }
    }
}

/// Collects every key and every non-null leaf value of `structure`, plus the
/// seed tokens.
///
/// Help-mode structures contribute whole help texts as tokens. They never
/// equal a literal CLI token, so they are left in.
pub fn build_vocabulary(structure: &StructureMap) -> Vocabulary {
    let mut vocabulary = Vocabulary::seeded();
    for (key, value) in recursive_items(structure) {
        vocabulary.insert(key);
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            vocabulary.insert(value);
        }
    }
    debug!("Built vocabulary of {} tokens.", vocabulary.len());
    vocabulary
}
