//! # Undo/Redo Stack
//!
//! Snapshot history for a page.
//!
//! ## Design
//!
//! - Before a mutation lands, the document hands over a copy of the element
//!   map as it was; successful mutations record it here
//! - Undo swaps the current map with the newest snapshot and keeps the
//!   current one for redo
//! - Redo is the mirror image
//! - Recording a new snapshot clears the redo stack
//! - Selection is not part of a snapshot
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut stack = UndoStack::new();
//!
//! let before = elements.clone();
//! mutation.apply(&mut elements, &mut ctx)?;
//! stack.record(before, mutation.name());
//!
//! stack.undo(&mut elements);
//! stack.redo(&mut elements);
//! ```

use crate::element_map::ElementMap;

/// A copy of the element map taken before a mutation
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub elements: ElementMap,

    /// Name of the mutation that followed the snapshot
    pub label: &'static str,
}

/// Undo/redo stack for page editing
#[derive(Debug)]
pub struct UndoStack {
    /// Stack of states to return to (most recent last)
    undo_stack: Vec<Snapshot>,

    /// Stack of undone states (most recent last)
    redo_stack: Vec<Snapshot>,

    /// Maximum number of undo levels (0 = unlimited)
    max_levels: usize,
}

impl UndoStack {
    /// Create a new undo stack with default max levels (100)
    pub fn new() -> Self {
        Self::with_max_levels(100)
    }

    /// Create an undo stack with custom max levels
    pub fn with_max_levels(max_levels: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_levels,
        }
    }

    /// Record the state preceding a successful mutation
    pub fn record(&mut self, elements: ElementMap, label: &'static str) {
        self.undo_stack.push(Snapshot { elements, label });

        // Trim if exceeded max levels
        if self.max_levels > 0 && self.undo_stack.len() > self.max_levels {
            self.undo_stack.remove(0);
        }

        // New action invalidates future
        self.redo_stack.clear();
    }

    /// Restore the most recent snapshot into `current`
    pub fn undo(&mut self, current: &mut ElementMap) -> bool {
        let Some(snapshot) = self.undo_stack.pop() else {
            return false;
        };

        let undone = std::mem::replace(current, snapshot.elements);
        self.redo_stack.push(Snapshot {
            elements: undone,
            label: snapshot.label,
        });
        true
    }

    /// Reinstate the most recently undone state into `current`
    pub fn redo(&mut self, current: &mut ElementMap) -> bool {
        let Some(snapshot) = self.redo_stack.pop() else {
            return false;
        };

        let previous = std::mem::replace(current, snapshot.elements);
        self.undo_stack.push(Snapshot {
            elements: previous,
            label: snapshot.label,
        });
        true
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Get the number of undo levels available
    pub fn undo_levels(&self) -> usize {
        self.undo_stack.len()
    }

    /// Get the number of redo levels available
    pub fn redo_levels(&self) -> usize {
        self.redo_stack.len()
    }

    /// Clear all undo/redo history
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    /// Label of the step `undo` would revert
    pub fn undo_description(&self) -> Option<&'static str> {
        self.undo_stack.last().map(|snapshot| snapshot.label)
    }

    /// Label of the step `redo` would reapply
    pub fn redo_description(&self) -> Option<&'static str> {
        self.redo_stack.last().map(|snapshot| snapshot.label)
    }
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new()
    }
}
