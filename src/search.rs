//! Search functionality for filtering option lists.
//!
//! This module encapsulates the matching logic, allowing the underlying
//! implementation to be changed without affecting the rest of the codebase.

use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

/// A matcher for fuzzy searching text.
///
/// Wraps the underlying fuzzy matching implementation behind a simple
/// interface. Matching is case-insensitive and allows non-consecutive
/// characters, so "sjc" finds "São José dos Campos".
pub struct Matcher {
    inner: SkimMatcherV2,
}

impl Default for Matcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Matcher {
    /// Create a new matcher instance.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: SkimMatcherV2::default(),
        }
    }

    /// Check if the text matches the pattern using fuzzy matching.
    #[must_use]
    pub fn matches(&self, text: &str, pattern: &str) -> bool {
        // Convert pattern to lowercase for case-insensitive matching
        let pattern_lower = pattern.to_lowercase();
        self.inner.fuzzy_match(text, &pattern_lower).is_some()
    }
}
