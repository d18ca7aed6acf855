use std::collections::VecDeque;

/// Maximum number of undo entries kept; older ones are dropped first
pub const MAX_UNDO_ENTRIES: usize = 10;

/// Undo action for reverting a destructive edit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UndoAction {
    Delete {
        index: usize,
        name: String,
        remaining_seconds: u64,
        paused: bool,
        /// The deleted project was the current one
        was_current: bool,
    },
    Rename {
        index: usize,
        old_name: String,
        new_name: String,
    },
}

/// Bounded stack of recent undo actions
#[derive(Debug, Clone, Default)]
pub struct UndoStack {
    entries: VecDeque<UndoAction>,
}

impl UndoStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push an action, evicting the oldest one when full
    pub fn push(&mut self, action: UndoAction) {
        self.entries.push_back(action);
        while self.entries.len() > MAX_UNDO_ENTRIES {
            self.entries.pop_front();
        }
    }

    pub fn pop(&mut self) -> Option<UndoAction> {
        self.entries.pop_back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rename(i: usize) -> UndoAction {
        UndoAction::Rename {
            index: i,
            old_name: format!("old {}", i),
            new_name: format!("new {}", i),
        }
    }

    #[test]
    fn test_push_pop_order() {
        let mut stack = UndoStack::new();
        stack.push(rename(1));
        stack.push(rename(2));

        assert_eq!(stack.len(), 2);
        assert_eq!(stack.pop(), Some(rename(2)));
        assert_eq!(stack.pop(), Some(rename(1)));
        assert_eq!(stack.pop(), None);
        assert_eq!(stack.len(), 0);
    }

    #[test]
    fn test_oldest_evicted_when_full() {
        let mut stack = UndoStack::new();
        for i in 0..MAX_UNDO_ENTRIES + 3 {
            stack.push(rename(i));
        }

        assert_eq!(stack.len(), MAX_UNDO_ENTRIES);
        assert_eq!(stack.pop(), Some(rename(MAX_UNDO_ENTRIES + 2)));

        // Drain and check the oldest survivor is entry 3
        let mut last = None;
        while let Some(action) = stack.pop() {
            last = Some(action);
        }
        assert_eq!(last, Some(rename(3)));
    }
}
