use std::collections::VecDeque;

/// Snapshot-based undo/redo stack.
///
/// Callers `record` the state they are about to leave; `undo` and `redo`
/// exchange the current state for the neighbouring one.
#[derive(Debug, Clone)]
pub struct History<T> {
    past: VecDeque<T>,
    future: Vec<T>,
    limit: usize,
}

pub const DEFAULT_HISTORY_LIMIT: usize = 100;

impl<T> Default for History<T> {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

impl<T> History<T> {
    pub fn new(limit: usize) -> Self {
        Self {
            past: VecDeque::new(),
            future: Vec::new(),
            limit: limit.max(1),
        }
    }

    /// Push the pre-edit state. Any redo branch is discarded.
    pub fn record(&mut self, previous: T) {
        self.past.push_back(previous);
        if self.past.len() > self.limit {
            self.past.pop_front();
        }
        self.future.clear();
    }

    /// Returns the state to restore, keeping `current` for redo.
    /// `None` when there is nothing to undo.
    pub fn undo(&mut self, current: T) -> Option<T> {
        let previous = self.past.pop_back()?;
        self.future.push(current);
        Some(previous)
    }

    pub fn redo(&mut self, current: T) -> Option<T> {
        let next = self.future.pop()?;
        self.past.push_back(current);
        Some(next)
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undo_then_redo_walks_both_ways() {
        let mut history = History::default();
        let mut state = "a";

        history.record(state);
        state = "b";
        history.record(state);
        state = "c";

        state = history.undo(state).unwrap();
        assert_eq!(state, "b");
        state = history.undo(state).unwrap();
        assert_eq!(state, "a");
        assert!(history.undo(state).is_none());

        state = history.redo(state).unwrap();
        assert_eq!(state, "b");
        state = history.redo(state).unwrap();
        assert_eq!(state, "c");
        assert!(!history.can_redo());
    }

    #[test]
    fn new_edit_discards_redo_branch() {
        let mut history = History::default();
        history.record(1);
        let restored = history.undo(2).unwrap();
        assert_eq!(restored, 1);
        assert!(history.can_redo());

        history.record(restored);
        assert!(!history.can_redo());
        assert!(history.can_undo());
    }

    #[test]
    fn oldest_entries_fall_off_past_the_limit() {
        let mut history = History::new(2);
        history.record(1);
        history.record(2);
        history.record(3);

        assert_eq!(history.undo(4), Some(3));
        assert_eq!(history.undo(3), Some(2));
        assert_eq!(history.undo(2), None);
    }

    #[test]
    fn long_sessions_keep_only_the_newest_entries() {
        let mut history = History::new(3);
        for state in 0..10_000 {
            history.record(state);
        }

        let mut current = 10_000;
        let mut restored = Vec::new();
        while let Some(previous) = history.undo(current) {
            restored.push(previous);
            current = previous;
        }
        assert_eq!(restored, vec![9_999, 9_998, 9_997]);
    }
}
