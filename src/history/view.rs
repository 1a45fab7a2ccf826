use super::compare::ComparisonSelector;

/// How the version sequence is presented
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewMode {
    #[default]
    List,
    Comparison,
}

/// Display state owned by a front end: the mode and the comparison selection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub mode: ViewMode,
    pub selector: ComparisonSelector,
}

impl ViewState {
    /// Switch between list and comparison view, re-clamping the selection
    pub fn toggle(&mut self, len: usize) {
        self.mode = match self.mode {
            ViewMode::List => ViewMode::Comparison,
            ViewMode::Comparison => ViewMode::List,
        };
        self.selector.clamp(len);
    }

    /// Call after the underlying message changed
    pub fn sync(&mut self, len: usize) {
        self.selector.clamp(len);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_switches_mode_and_clamps() {
        let mut state = ViewState { mode: ViewMode::List, selector: ComparisonSelector::new(9) };

        state.toggle(3);
        assert_eq!(state.mode, ViewMode::Comparison);
        assert_eq!(state.selector.index(), 1);

        state.toggle(3);
        assert_eq!(state.mode, ViewMode::List);
    }

    #[test]
    fn test_sync_after_shrink() {
        let mut state = ViewState { mode: ViewMode::Comparison, selector: ComparisonSelector::new(4) };
        state.sync(2);
        assert_eq!(state.selector.index(), 0);
        assert_eq!(state.mode, ViewMode::Comparison);
    }
}
