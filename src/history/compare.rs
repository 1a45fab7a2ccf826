//! Side-by-side comparison of the current version with one from the history tail.
//!
//! The selector index addresses the history tail (version sequence without the
//! current entry). When the sequence shrinks under it, the index is clamped
//! rather than rejected: a stale index is a display desync, not a data error.

use serde::Serialize;

use crate::error::{HistoryError, HistoryResult};
use crate::models::VersionEntry;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComparisonSelector {
    index: usize,
}

impl ComparisonSelector {
    pub fn new(index: usize) -> Self {
        Self { index }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Clamp the index into `[0, len - 2]` for a sequence of `len` entries
    pub fn clamp(&mut self, len: usize) {
        self.index = self.index.min(len.saturating_sub(2));
    }

    pub fn select_next(&mut self, len: usize) {
        self.index = self.index.saturating_add(1);
        self.clamp(len);
    }

    pub fn select_previous(&mut self) {
        self.index = self.index.saturating_sub(1);
    }

    /// Return `(current, selected)` after clamping to the sequence.
    ///
    /// Fails with `InvalidVersion` when the sequence has no history tail.
    pub fn pair<'a>(
        &mut self,
        sequence: &'a [VersionEntry],
    ) -> HistoryResult<(&'a VersionEntry, &'a VersionEntry)> {
        if sequence.len() < 2 {
            return Err(HistoryError::InvalidVersion {
                index: self.index.saturating_add(1),
                available: sequence.len(),
            });
        }
        self.clamp(sequence.len());
        Ok((&sequence[0], &sequence[self.index + 1]))
    }
}

/// Summary of the difference between two versions
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionComparison {
    pub current: VersionEntry,
    pub selected: VersionEntry,
    /// Characters in current minus characters in selected
    pub char_delta: i64,
    /// Lines in current minus lines in selected
    pub line_delta: i64,
    pub identical: bool,
}

impl VersionComparison {
    pub fn between(current: &VersionEntry, selected: &VersionEntry) -> Self {
        let chars = |s: &str| s.chars().count() as i64;
        let lines = |s: &str| s.lines().count() as i64;

        Self {
            current: current.clone(),
            selected: selected.clone(),
            char_delta: chars(&current.content) - chars(&selected.content),
            line_delta: lines(&current.content) - lines(&selected.content),
            identical: current.content == selected.content,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn sequence(contents: &[&str]) -> Vec<VersionEntry> {
        contents
            .iter()
            .enumerate()
            .map(|(version, content)| VersionEntry {
                content: content.to_string(),
                edited_at: Utc::now(),
                version,
            })
            .collect()
    }

    #[test]
    fn test_clamps_out_of_range_index() {
        let seq = sequence(&["current", "older", "oldest"]);
        let mut selector = ComparisonSelector::new(5);

        let (current, selected) = selector.pair(&seq).unwrap();
        assert_eq!(selector.index(), 1);
        assert_eq!(current.content, "current");
        assert_eq!(selected.content, "oldest");
    }

    #[test]
    fn test_reclamps_when_sequence_shrinks() {
        let mut selector = ComparisonSelector::new(2);
        selector.pair(&sequence(&["a", "b", "c", "d"])).unwrap();
        assert_eq!(selector.index(), 2);

        let shrunk = sequence(&["a", "b"]);
        let (_, selected) = selector.pair(&shrunk).unwrap();
        assert_eq!(selector.index(), 0);
        assert_eq!(selected.content, "b");
    }

    #[test]
    fn test_no_tail_is_invalid_version() {
        let mut selector = ComparisonSelector::default();
        assert!(matches!(
            selector.pair(&sequence(&["only"])),
            Err(HistoryError::InvalidVersion { available: 1, .. })
        ));
    }

    #[test]
    fn test_max_index_without_tail_is_invalid_version() {
        let mut selector = ComparisonSelector::new(usize::MAX);
        assert_eq!(
            selector.pair(&sequence(&["only"])).unwrap_err(),
            HistoryError::InvalidVersion { index: usize::MAX, available: 1 }
        );
    }

    #[test]
    fn test_max_index_clamps_to_oldest() {
        let seq = sequence(&["current", "older"]);
        let mut selector = ComparisonSelector::new(usize::MAX);
        assert_eq!(selector.pair(&seq).unwrap().1.content, "older");
        assert_eq!(selector.index(), 0);
    }

    #[test]
    fn test_navigation_saturates() {
        let mut selector = ComparisonSelector::default();
        selector.select_previous();
        assert_eq!(selector.index(), 0);

        selector.select_next(3);
        selector.select_next(3);
        selector.select_next(3);
        assert_eq!(selector.index(), 1);
    }

    #[test]
    fn test_comparison_deltas() {
        let seq = sequence(&["Hello world\nsecond line", "Hello"]);
        let comparison = VersionComparison::between(&seq[0], &seq[1]);
        assert_eq!(comparison.char_delta, 18);
        assert_eq!(comparison.line_delta, 1);
        assert!(!comparison.identical);
    }
}
