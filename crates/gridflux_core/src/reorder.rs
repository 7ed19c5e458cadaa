//! Drag-to-reorder protocol.
//!
//! Three messages decouple column reordering from any concrete pointer or
//! gesture API: `drag_start` records the source, `drag_over` is a pure
//! highlight hint, and `drop_on` either produces a swap instruction or
//! nothing. A keyboard-driven front end can drive the same three calls.

use crate::ColumnConfigStore;

/// Index-swap instruction produced by a completed drag gesture, consumed by
/// the column configuration store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSwap {
    pub from_index: usize,
    pub to_index: usize,
}

impl ColumnSwap {
    pub fn apply(&self, store: &mut ColumnConfigStore) {
        store.reorder(self.from_index, self.to_index);
    }
}

/// Per-table drag gesture state.
#[derive(Debug, Default)]
pub struct ReorderController {
    dragged_index: Option<usize>,
}

impl ReorderController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a drag from the column at `index`. Starting a new drag while
    /// another is pending simply replaces it.
    pub fn drag_start(&mut self, index: usize) {
        if self.dragged_index.is_some() {
            log::debug!("Drag restarted at column {index} with a gesture still pending");
        }
        self.dragged_index = Some(index);
    }

    /// Highlight hint while hovering over `index`: true when releasing here
    /// would actually move a column. Mutates nothing.
    pub fn drag_over(&self, index: usize) -> bool {
        matches!(self.dragged_index, Some(from) if from != index)
    }

    /// Complete the gesture over `index`.
    ///
    /// Returns the swap to apply when a drag was pending and the target
    /// differs from the source. The pending drag is cleared unconditionally,
    /// including for ignored drops, so a stale gesture can never leak into
    /// the next one.
    pub fn drop_on(&mut self, index: usize) -> Option<ColumnSwap> {
        let from_index = self.dragged_index.take()?;
        if from_index == index {
            return None;
        }
        Some(ColumnSwap {
            from_index,
            to_index: index,
        })
    }

    pub fn is_dragging(&self) -> bool {
        self.dragged_index.is_some()
    }

    pub fn dragged_index(&self) -> Option<usize> {
        self.dragged_index
    }
}
