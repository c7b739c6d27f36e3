//! Compiled regular expressions taken from schema documents.

use std::sync::Mutex;

use ahash::AHashMap;
use regex::Regex;
use tracing::warn;

/// Cache of compiled `pattern` / `patternProperties` expressions.
///
/// Schemas carry patterns as strings; each distinct string is compiled once
/// per validator. A pattern that fails to compile is cached as `None` and
/// reported once.
#[derive(Debug, Default)]
pub struct PatternCache {
    compiled: Mutex<AHashMap<String, Option<Regex>>>,
}

impl PatternCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compiled form of `pattern`, or `None` if it is not a valid regex.
    pub fn get(&self, pattern: &str) -> Option<Regex> {
        let mut compiled = match self.compiled.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(entry) = compiled.get(pattern) {
            return entry.clone();
        }
        let entry = match Regex::new(pattern) {
            Ok(regex) => Some(regex),
            Err(e) => {
                warn!("invalid pattern {:?} in schema: {}", pattern, e);
                None
            }
        };
        compiled.insert(pattern.to_string(), entry.clone());
        entry
    }

    /// Search `text` for `pattern`. `None` if the pattern does not compile.
    pub fn is_match(&self, pattern: &str, text: &str) -> Option<bool> {
        self.get(pattern).map(|regex| regex.is_match(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_is_unanchored() {
        let cache = PatternCache::new();
        assert_eq!(cache.is_match("b+", "abbc"), Some(true));
        assert_eq!(cache.is_match("^b+$", "abbc"), Some(false));
    }

    #[test]
    fn test_invalid_pattern() {
        let cache = PatternCache::new();
        assert_eq!(cache.is_match("(unclosed", "x"), None);
        assert!(cache.get("(unclosed").is_none());
    }
}
