//! Fuzzy matching for the entry filter.

use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

/// A case-insensitive fuzzy matcher.
pub struct Matcher {
    inner: SkimMatcherV2,
}

impl Default for Matcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Matcher {
    pub fn new() -> Self {
        Self {
            inner: SkimMatcherV2::default(),
        }
    }

    /// Check if the text matches the pattern using fuzzy matching.
    ///
    /// The matching is case-insensitive and allows non-consecutive characters.
    /// An empty pattern matches everything.
    ///
    /// ```
    /// use lazysettings::search::Matcher;
    ///
    /// let matcher = Matcher::new();
    /// assert!(matcher.matches("bind = SUPER, Return, exec, kitty", "kitty"));
    /// assert!(!matcher.matches("bind = SUPER, Q, killactive", "xyz"));
    /// ```
    pub fn matches(&self, text: &str, pattern: &str) -> bool {
        if pattern.is_empty() {
            return true;
        }
        let pattern_lower = pattern.to_lowercase();
        self.inner.fuzzy_match(text, &pattern_lower).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fuzzy_match() {
        let matcher = Matcher::new();

        assert!(matcher.matches("bind = SUPER, Return, exec, kitty", "retkit"));
        assert!(matcher.matches("bindm = SUPER, mouse:272, movewindow", "movewin"));

        // Case-insensitive
        assert!(matcher.matches("bind = SUPER, Q, killactive", "super"));
        assert!(matcher.matches("exec, firefox", "FIREFOX"));

        assert!(!matcher.matches("bind = SUPER, Q, killactive", "xyz"));
    }

    #[test]
    fn test_empty_pattern_matches() {
        assert!(Matcher::new().matches("anything", ""));
    }
}
