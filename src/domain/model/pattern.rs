use regex::Regex;

use crate::domain::InvalidPatternError;

/// Pattern used when the user does not supply one: every full name is its own key.
pub const DEFAULT_PATTERN: &str = ".*";

/// Compiled merge pattern.
///
/// Matching is anchored at the start of the package name only. A name
/// qualifies when it *starts* with a match; whatever follows the match is
/// ignored.
#[derive(Debug, Clone)]
pub struct MergePattern {
    source: String,
    regex: Regex,
}

impl MergePattern {
    #[tracing::instrument]
    pub fn new(pattern: &str) -> Result<Self, InvalidPatternError> {
        let regex = Regex::new(pattern).map_err(|source| InvalidPatternError {
            pattern: pattern.to_string(),
            source,
        })?;

        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Derive the merge key for a package name.
    ///
    /// Returns the text of capture group 1 when the pattern has capture
    /// groups, otherwise the whole match. `None` when the name does not match,
    /// or when group 1 exists but did not take part in the match.
    pub fn key_for<'n>(&self, name: &'n str) -> Option<&'n str> {
        // Leftmost-first search: a match starting at 0 exists iff the
        // leftmost one starts there, and it is the one an anchored match picks.
        let captures = self.regex.captures(name)?;
        if captures.get(0)?.start() != 0 {
            return None;
        }
        let group = if self.regex.captures_len() > 1 { 1 } else { 0 };
        captures.get(group).map(|m| m.as_str())
    }
}

impl Default for MergePattern {
    fn default() -> Self {
        Self {
            source: DEFAULT_PATTERN.to_string(),
            regex: Regex::new(DEFAULT_PATTERN).expect("default pattern is valid"),
        }
    }
}
