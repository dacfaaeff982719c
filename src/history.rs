/// Undo/redo counters shown on the toolbar.
///
/// Nothing records snapshots yet, so these only count down. What an
/// undoable action is (and how much state each step keeps) is still open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UndoRedoCounters {
    undo: u32,
    redo: u32,
}

impl UndoRedoCounters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn undo_count(&self) -> u32 {
        self.undo
    }

    pub fn redo_count(&self) -> u32 {
        self.redo
    }

    /// Returns true if there are steps that can be undone
    pub fn can_undo(&self) -> bool {
        self.undo > 0
    }

    /// Returns true if there are steps that can be redone
    pub fn can_redo(&self) -> bool {
        self.redo > 0
    }

    /// Decrements the undo count if positive. Returns true if it changed.
    pub fn undo(&mut self) -> bool {
        if self.undo > 0 {
            self.undo -= 1;
            true
        } else {
            false
        }
    }

    /// Decrements the redo count if positive. Returns true if it changed.
    pub fn redo(&mut self) -> bool {
        if self.redo > 0 {
            self.redo -= 1;
            true
        } else {
            false
        }
    }

    pub fn undo_label(&self) -> String {
        format!("Undo ({})", self.undo)
    }

    pub fn redo_label(&self) -> String {
        format!("Redo ({})", self.redo)
    }

    #[cfg(test)]
    pub(crate) fn with_counts(undo: u32, redo: u32) -> Self {
        Self { undo, redo }
    }
}
