//! Session state: the current selection and the active pointer gesture.
//!
//! `UiState` is the selection visible to the renderer and the shell; the room
//! and furniture selections are independent, so a single click may select one
//! of each. `PointerState` is the gesture being tracked between pointer-down
//! and pointer-up, carrying the context needed to compute incremental deltas.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::geom::Point;
use crate::plan::{FurnitureId, RoomId};

/// Selection state, held per open plan.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// The currently selected room, if any.
    pub selected_room: Option<RoomId>,
    /// The currently selected furniture item, if any. Independent of the
    /// room selection; both may be set by the same click.
    pub selected_furniture: Option<FurnitureId>,
    /// Last known containing room of the selected furniture item, refreshed
    /// on pointer-up rather than every drag frame.
    pub containing_room: Option<RoomId>,
}

/// The active pointer gesture.
#[derive(Debug, Clone, Copy, Default)]
pub enum PointerState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// Dragging whatever the current selection is.
    Dragging {
        /// Pointer position at the previous event; deltas are computed
        /// against it and it advances every frame, accepted or not.
        anchor: Point,
    },
    /// Resizing one furniture item by its bottom-right handle.
    Resizing {
        /// The item being resized.
        target: FurnitureId,
        /// Pointer position at the previous event; resize deltas are
        /// incremental, not total-from-start.
        anchor: Point,
    },
}

impl PointerState {
    /// Whether a gesture is currently in progress.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Idle)
    }
}
