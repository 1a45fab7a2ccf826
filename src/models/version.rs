use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One snapshot in a derived version sequence.
///
/// `version` is the position in the sequence: `0` is the current content and
/// larger numbers are older. It is never stored, only assigned on derivation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionEntry {
    pub content: String,
    pub edited_at: DateTime<Utc>,
    pub version: usize,
}

impl VersionEntry {
    pub fn is_current(&self) -> bool {
        self.version == 0
    }

    /// Number shown to the user for this entry in a sequence of `len` entries
    pub fn display_number(&self, len: usize) -> usize {
        display_number(len, self.version)
    }
}

/// Number shown to the user for `index` in a sequence of `len` entries.
/// The current version gets the highest number, the oldest gets `1`.
pub fn display_number(len: usize, index: usize) -> usize {
    len.saturating_sub(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_number() {
        assert_eq!(display_number(3, 0), 3);
        assert_eq!(display_number(3, 2), 1);
        assert_eq!(display_number(1, 0), 1);
    }
}
