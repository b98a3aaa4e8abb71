use super::task::Task;

/// Linear undo/redo log over full task-list snapshots.
///
/// Recording while undone truncates the redo branch; undo and redo only move
/// the cursor. The visible task list is always the snapshot at the cursor.
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<Vec<Task>>,
    cursor: usize,
}

impl History {
    pub fn new(initial: Vec<Task>) -> Self {
        Self {
            entries: vec![initial],
            cursor: 0,
        }
    }

    /// Append a snapshot after the cursor, discarding any redo entries.
    pub fn record(&mut self, snapshot: Vec<Task>) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(snapshot);
        self.cursor = self.entries.len() - 1;
    }

    /// Drop everything and restart from `initial`. Used for bulk replaces
    /// (open, import) that should not be undoable into the previous plan.
    pub fn reset(&mut self, initial: Vec<Task>) {
        self.entries = vec![initial];
        self.cursor = 0;
    }

    /// The snapshot at the cursor; what the application should be showing.
    pub fn current(&self) -> &[Task] {
        &self.entries[self.cursor]
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// Step back one snapshot; `None` at the start of the log.
    pub fn undo(&mut self) -> Option<&[Task]> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(&self.entries[self.cursor])
    }

    /// Step forward one snapshot; `None` at the end of the log.
    pub fn redo(&mut self) -> Option<&[Task]> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        Some(&self.entries[self.cursor])
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titled(title: &str) -> Vec<Task> {
        vec![Task::unscheduled(title)]
    }

    fn title_of(snapshot: &[Task]) -> &str {
        &snapshot[0].title
    }

    #[test]
    fn starts_with_one_entry_and_nothing_to_move_to() {
        let mut history = History::new(titled("init"));
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert!(history.undo().is_none());
        assert!(history.redo().is_none());
    }

    #[test]
    fn undo_and_redo_walk_the_cursor() {
        let mut history = History::new(titled("init"));
        history.record(titled("a"));
        history.record(titled("b"));

        assert_eq!(title_of(history.undo().unwrap()), "a");
        assert_eq!(title_of(history.undo().unwrap()), "init");
        assert!(history.undo().is_none());
        assert_eq!(title_of(history.redo().unwrap()), "a");
        assert_eq!(title_of(history.redo().unwrap()), "b");
        assert!(history.redo().is_none());
    }

    // record(A); record(B); undo(); record(C) leaves [init, A, C] and B
    // unreachable.
    #[test]
    fn recording_after_undo_discards_the_redo_branch() {
        let mut history = History::new(titled("init"));
        history.record(titled("a"));
        history.record(titled("b"));
        assert_eq!(title_of(history.undo().unwrap()), "a");
        history.record(titled("c"));

        assert_eq!(history.len(), 3);
        assert!(history.redo().is_none());
        assert_eq!(title_of(history.undo().unwrap()), "a");
        assert_eq!(title_of(history.undo().unwrap()), "init");
        assert_eq!(title_of(history.redo().unwrap()), "a");
        assert_eq!(title_of(history.redo().unwrap()), "c");
    }

    #[test]
    fn reset_forgets_all_prior_snapshots() {
        let mut history = History::new(titled("init"));
        history.record(titled("a"));
        history.reset(titled("imported"));
        assert_eq!(history.len(), 1);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }
}
