//! Bounded linear undo/redo history.
//!
//! Stores whole-state snapshots: every [`UndoRedoManager::add_change`] is
//! one undo step regardless of how small the edit was.
//!
//! # State machine
//!
//! | Operation | Undo stack | Redo stack | Current |
//! |-----------|-----------|------------|---------|
//! | `add_change(s)` | push current, evict oldest past `limit` | cleared | `s` |
//! | `undo()` | pop | push current | popped |
//! | `redo()` | push current (no cap) | pop | popped |
//! | `clear()` | cleared | cleared | unchanged |
//!
//! A new change after an undo discards the redo history; branches are
//! never kept.

use std::collections::VecDeque;
use tracing::trace;

/// Undo steps retained when no limit is given.
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Linear snapshot history over an opaque state type.
///
/// Owned by one editing session.
///
/// # Example
///
/// ```
/// use staff_schedule::history::UndoRedoManager;
///
/// let mut history = UndoRedoManager::new(0);
/// history.add_change(1);
/// history.add_change(2);
/// assert_eq!(*history.undo(), 1);
/// assert_eq!(*history.redo(), 2);
/// assert!(!history.can_redo());
/// ```
#[derive(Debug, Clone)]
pub struct UndoRedoManager<S> {
    current: S,
    undo_stack: VecDeque<S>,
    redo_stack: Vec<S>,
    limit: usize,
}

impl<S> UndoRedoManager<S> {
    /// Creates a history with the default limit.
    pub fn new(initial: S) -> Self {
        Self::with_limit(initial, DEFAULT_HISTORY_LIMIT)
    }

    /// Creates a history keeping at most `limit` undo steps.
    pub fn with_limit(initial: S, limit: usize) -> Self {
        Self {
            current: initial,
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            limit,
        }
    }

    /// Records a new state. Clears the redo history.
    pub fn add_change(&mut self, new_state: S) {
        let previous = std::mem::replace(&mut self.current, new_state);
        self.undo_stack.push_back(previous);
        while self.undo_stack.len() > self.limit {
            self.undo_stack.pop_front();
        }
        self.redo_stack.clear();
        trace!(undo = self.undo_stack.len(), "history change recorded");
    }

    /// Steps back one state. No-op when there is nothing to undo.
    pub fn undo(&mut self) -> &S {
        if let Some(previous) = self.undo_stack.pop_back() {
            let current = std::mem::replace(&mut self.current, previous);
            self.redo_stack.push(current);
            trace!(
                undo = self.undo_stack.len(),
                redo = self.redo_stack.len(),
                "history undo"
            );
        }
        &self.current
    }

    /// Steps forward one state. No-op when there is nothing to redo.
    ///
    /// The undo limit is not applied on this path. Every redo step was
    /// produced by an undo that popped the undo stack, so redo only
    /// restores entries and the stack never grows past `limit`.
    pub fn redo(&mut self) -> &S {
        if let Some(next) = self.redo_stack.pop() {
            let current = std::mem::replace(&mut self.current, next);
            self.undo_stack.push_back(current);
            trace!(
                undo = self.undo_stack.len(),
                redo = self.redo_stack.len(),
                "history redo"
            );
        }
        &self.current
    }

    /// Whether an undo step exists.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Whether a redo step exists.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Drops all history, keeping the current state.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    /// The current state.
    pub fn current_state(&self) -> &S {
        &self.current
    }

    /// Number of undo steps held.
    pub fn undo_stack_size(&self) -> usize {
        self.undo_stack.len()
    }

    /// Number of redo steps held.
    pub fn redo_stack_size(&self) -> usize {
        self.redo_stack.len()
    }

    /// Maximum undo steps kept by `add_change`.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Consumes the history, returning the current state.
    pub fn into_current(self) -> S {
        self.current
    }
}

impl<S: Default> Default for UndoRedoManager<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undo_redo_round_trip() {
        let mut h = UndoRedoManager::new("s0");
        h.add_change("s1");
        assert_eq!(*h.undo(), "s0");
        assert_eq!(*h.redo(), "s1");
        assert_eq!(*h.current_state(), "s1");
    }

    #[test]
    fn test_new_change_clears_redo() {
        let mut h = UndoRedoManager::new("s0");
        h.add_change("s1");
        h.undo();
        assert!(h.can_redo());
        h.add_change("s2");
        assert!(!h.can_redo());
        assert_eq!(h.redo_stack_size(), 0);
        assert_eq!(*h.undo(), "s0");
    }

    #[test]
    fn test_limit_evicts_oldest() {
        let mut h = UndoRedoManager::with_limit(0, 3);
        for i in 1..=5 {
            h.add_change(i);
        }
        assert_eq!(h.undo_stack_size(), 3);
        assert_eq!(*h.undo(), 4);
        assert_eq!(*h.undo(), 3);
        assert_eq!(*h.undo(), 2);
        assert!(!h.can_undo());
        // Oldest states 0 and 1 are gone.
        assert_eq!(*h.undo(), 2);
    }

    #[test]
    fn test_redo_restores_popped_undo_steps() {
        let mut h = UndoRedoManager::with_limit(0, 3);
        for i in 1..=5 {
            h.add_change(i);
        }
        assert_eq!(h.undo_stack_size(), 3);

        h.undo();
        h.undo();
        assert_eq!(h.undo_stack_size(), 1);
        assert_eq!(h.redo_stack_size(), 2);

        assert_eq!(*h.redo(), 4);
        assert_eq!(*h.redo(), 5);
        assert_eq!(h.undo_stack_size(), 3);
        assert_eq!(h.redo_stack_size(), 0);
        assert_eq!(*h.redo(), 5);
    }

    #[test]
    fn test_empty_stacks_are_noops() {
        let mut h = UndoRedoManager::new(7);
        assert!(!h.can_undo());
        assert!(!h.can_redo());
        assert_eq!(*h.undo(), 7);
        assert_eq!(*h.redo(), 7);
        assert_eq!(h.undo_stack_size(), 0);
        assert_eq!(h.redo_stack_size(), 0);
    }

    #[test]
    fn test_clear_keeps_current() {
        let mut h = UndoRedoManager::new(vec![1]);
        h.add_change(vec![1, 2]);
        h.add_change(vec![1, 2, 3]);
        h.undo();
        h.clear();
        assert!(!h.can_undo());
        assert!(!h.can_redo());
        assert_eq!(*h.current_state(), vec![1, 2]);
    }

    #[test]
    fn test_identical_states_still_count() {
        let mut h = UndoRedoManager::new(1);
        h.add_change(1);
        h.add_change(1);
        assert_eq!(h.undo_stack_size(), 2);
    }

    #[test]
    fn test_zero_limit_keeps_no_undo() {
        let mut h = UndoRedoManager::with_limit("a", 0);
        h.add_change("b");
        assert!(!h.can_undo());
        assert_eq!(*h.current_state(), "b");
    }

    #[test]
    fn test_default_limit() {
        let h: UndoRedoManager<u8> = UndoRedoManager::default();
        assert_eq!(h.limit(), DEFAULT_HISTORY_LIMIT);
        assert_eq!(h.into_current(), 0);
    }
}
