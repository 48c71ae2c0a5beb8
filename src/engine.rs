//! The layout engine: selection, the pointer state machine, and constraint
//! enforcement over the plan store.
//!
//! Every mutation returns a typed [`Outcome`] instead of talking to any user
//! interface; the shell maps outcomes to notices. The engine maintains four
//! invariants across all accepted mutations: no two rooms' outer bounds
//! intersect, no two furniture items' bounds intersect, furniture dragged
//! under a selected room stays inside that room's inner rect, and entities
//! stay on the canvas (enforced on add and on pointer-up). Rejected and
//! ignored operations leave the store exactly as it was.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use std::path::Path;

use tracing::{debug, info, warn};

use crate::codec::{self, PlanError};
use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::geom::Point;
use crate::hit;
use crate::input::{PointerState, UiState};
use crate::plan::{Furniture, FurnitureId, FurnitureKind, PlanStore, Room, RoomId, RoomType};

/// Why a mutation was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// The room would overlap another room's outer bounds.
    RoomOverlap,
    /// The furniture item would overlap another item's bounds.
    FurnitureOverlap,
}

/// Why a mutation had nothing to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// Delete, rotate, or drag was invoked with nothing selected.
    NothingSelected,
    /// A pointer drag arrived with no gesture in progress.
    NoGesture,
}

/// Result of a mutating engine operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Outcome {
    /// The mutation was applied; the scene should be redrawn.
    Applied,
    /// A constraint was violated; the mutation was fully reverted.
    Rejected(RejectReason),
    /// There was nothing to apply the mutation to.
    Ignored(Notice),
}

impl Outcome {
    /// Whether the mutation took effect.
    #[must_use]
    pub fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// The layout engine for one open plan. Owns the entity collections, the
/// selection, and the active gesture; one instance per document.
#[derive(Debug)]
pub struct Engine {
    /// The plan being edited.
    pub plan: PlanStore,
    /// Current selection, visible to the renderer and the shell.
    pub ui: UiState,
    /// Active pointer gesture.
    pub pointer: PointerState,
    /// Canvas width in plan units.
    pub canvas_width: f64,
    /// Canvas height in plan units.
    pub canvas_height: f64,
}

impl Default for Engine {
    fn default() -> Self {
        Self::with_canvas(CANVAS_WIDTH, CANVAS_HEIGHT)
    }
}

impl Engine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine over an empty plan with the given canvas size.
    #[must_use]
    pub fn with_canvas(canvas_width: f64, canvas_height: f64) -> Self {
        Self {
            plan: PlanStore::new(),
            ui: UiState::default(),
            pointer: PointerState::Idle,
            canvas_width,
            canvas_height,
        }
    }

    // --- Queries ---

    /// The currently selected room, if any.
    #[must_use]
    pub fn selected_room(&self) -> Option<&Room> {
        self.ui.selected_room.and_then(|id| self.plan.room(id))
    }

    /// The currently selected furniture item, if any.
    #[must_use]
    pub fn selected_furniture(&self) -> Option<&Furniture> {
        self.ui.selected_furniture.and_then(|id| self.plan.item(id))
    }

    /// The topmost room whose inner rect fully contains the item's bounds.
    /// Containment is positional; furniture holds no room reference.
    #[must_use]
    pub fn containing_room_of(&self, id: FurnitureId) -> Option<RoomId> {
        let bounds = self.plan.item(id)?.bounds();
        self.plan
            .rooms()
            .iter()
            .rev()
            .find(|r| r.inner_rect().contains_rect(&bounds))
            .map(|r| r.id)
    }

    // --- Pointer events ---

    /// Handle pointer-down: a resize-handle hit (insertion order, first match)
    /// starts a resize; otherwise both selections are re-resolved
    /// independently and a drag begins. Selecting furniture never deselects a
    /// room and vice versa.
    pub fn pointer_down(&mut self, p: Point) {
        if let Some(target) = hit::handle_at(&self.plan, p) {
            debug!(item = %target, "resize gesture started");
            self.pointer = PointerState::Resizing { target, anchor: p };
            return;
        }

        self.ui.selected_room = hit::room_at(&self.plan, p);
        self.ui.selected_furniture = hit::furniture_at(&self.plan, p);
        self.pointer = PointerState::Dragging { anchor: p };
        debug!(
            room = ?self.ui.selected_room,
            furniture = ?self.ui.selected_furniture,
            "drag gesture started"
        );
    }

    /// Handle pointer movement while a gesture is active. The anchor advances
    /// every frame, accepted or rejected, so a refused frame never leaks its
    /// delta into the next one.
    pub fn pointer_drag(&mut self, p: Point) -> Outcome {
        match self.pointer {
            PointerState::Idle => Outcome::Ignored(Notice::NoGesture),
            PointerState::Resizing { target, anchor } => {
                self.pointer = PointerState::Resizing { target, anchor: p };
                self.resize_step(target, p.x - anchor.x, p.y - anchor.y)
            }
            PointerState::Dragging { anchor } => {
                self.pointer = PointerState::Dragging { anchor: p };
                self.drag_step(p.x - anchor.x, p.y - anchor.y)
            }
        }
    }

    /// Handle pointer-up: clear the gesture and apply the final clamps. This
    /// is the only point where rooms are re-clamped against their siblings,
    /// and where the containing-room cache is refreshed.
    pub fn pointer_up(&mut self) {
        let finished = std::mem::take(&mut self.pointer);
        let (cw, ch) = (self.canvas_width, self.canvas_height);

        if let PointerState::Resizing { target, .. } = finished {
            if let Some(item) = self.plan.item_mut(target) {
                item.clamp_to_canvas(cw, ch);
            }
        }

        if let Some(id) = self.ui.selected_room {
            if let Some(mut room) = self.plan.room(id).copied() {
                room.clamp_against_siblings(self.plan.rooms(), cw, ch);
                if let Some(slot) = self.plan.room_mut(id) {
                    *slot = room;
                }
            }
        }

        if let Some(id) = self.ui.selected_furniture {
            if let Some(item) = self.plan.item_mut(id) {
                item.clamp_to_canvas(cw, ch);
            }
        }

        self.ui.containing_room = self.ui.selected_furniture.and_then(|id| self.containing_room_of(id));
    }

    fn resize_step(&mut self, target: FurnitureId, dx: f64, dy: f64) -> Outcome {
        let Some(item) = self.plan.item_mut(target) else {
            self.pointer = PointerState::Idle;
            return Outcome::Ignored(Notice::NothingSelected);
        };
        item.resize(dx, dy);
        Outcome::Applied
    }

    fn drag_step(&mut self, dx: f64, dy: f64) -> Outcome {
        // Furniture dragged while a room is selected is confined to that
        // room; this branch takes precedence over both plain drags.
        if let (Some(fid), Some(rid)) = (self.ui.selected_furniture, self.ui.selected_room) {
            if let Some(room) = self.plan.room(rid).copied() {
                return self.drag_furniture_in_room(fid, &room, dx, dy);
            }
        }
        if let Some(rid) = self.ui.selected_room {
            return self.drag_room(rid, dx, dy);
        }
        if let Some(fid) = self.ui.selected_furniture {
            return self.drag_furniture_free(fid, dx, dy);
        }
        Outcome::Ignored(Notice::NothingSelected)
    }

    fn drag_furniture_in_room(&mut self, fid: FurnitureId, room: &Room, dx: f64, dy: f64) -> Outcome {
        let Some(item) = self.plan.item_mut(fid) else {
            return Outcome::Ignored(Notice::NothingSelected);
        };
        item.x += dx;
        item.y += dy;
        item.clamp_to_room(room);
        Outcome::Applied
    }

    fn drag_room(&mut self, rid: RoomId, dx: f64, dy: f64) -> Outcome {
        let Some(room) = self.plan.room(rid).copied() else {
            return Outcome::Ignored(Notice::NothingSelected);
        };
        let mut moved = room;
        moved.x += dx;
        moved.y += dy;
        if self.plan.any_room_overlapping(&moved.outer_bounds(), Some(rid)) {
            warn!(room = %rid, "room drag rejected: overlap");
            return Outcome::Rejected(RejectReason::RoomOverlap);
        }
        moved.clamp_to_canvas(self.canvas_width, self.canvas_height);
        if let Some(slot) = self.plan.room_mut(rid) {
            *slot = moved;
        }
        Outcome::Applied
    }

    fn drag_furniture_free(&mut self, fid: FurnitureId, dx: f64, dy: f64) -> Outcome {
        let Some(item) = self.plan.item(fid) else {
            return Outcome::Ignored(Notice::NothingSelected);
        };
        let mut moved = item.bounds();
        moved.x += dx;
        moved.y += dy;
        if self.plan.any_furniture_overlapping(&moved, Some(fid)) {
            warn!(item = %fid, "furniture drag rejected: overlap");
            return Outcome::Rejected(RejectReason::FurnitureOverlap);
        }
        // No canvas clamp mid-drag on this branch; pointer-up settles it.
        if let Some(item) = self.plan.item_mut(fid) {
            item.x = moved.x;
            item.y = moved.y;
        }
        Outcome::Applied
    }

    // --- Add / delete / rotate ---

    /// Add a room. The candidate is clamped onto the canvas first, then
    /// refused outright if its outer bounds intersect any existing room's.
    pub fn add_room(&mut self, x: f64, y: f64, width: f64, height: f64, room_type: RoomType) -> Outcome {
        let mut room = Room::new(x, y, width, height, room_type);
        room.clamp_against_siblings(self.plan.rooms(), self.canvas_width, self.canvas_height);
        if self.plan.any_room_overlapping(&room.outer_bounds(), None) {
            warn!(?room_type, "room add rejected: overlap");
            return Outcome::Rejected(RejectReason::RoomOverlap);
        }
        debug!(room = %room.id, ?room_type, width, height, "room added");
        self.plan.push_room(room);
        Outcome::Applied
    }

    /// Add a furniture item of `kind` at its default spawn geometry. Refused
    /// if the candidate's bounds intersect any existing item's; otherwise
    /// clamped onto the canvas and appended.
    pub fn add_furniture(&mut self, kind: FurnitureKind) -> Outcome {
        let mut item = Furniture::new(kind);
        if self.plan.any_furniture_overlapping(&item.bounds(), None) {
            warn!(?kind, "furniture add rejected: overlap");
            return Outcome::Rejected(RejectReason::FurnitureOverlap);
        }
        item.clamp_to_canvas(self.canvas_width, self.canvas_height);
        debug!(item = %item.id, ?kind, "furniture added");
        self.plan.push_furniture(item);
        Outcome::Applied
    }

    /// Delete the selected room and clear the room selection.
    pub fn delete_selected_room(&mut self) -> Outcome {
        let Some(id) = self.ui.selected_room.take() else {
            warn!("delete room: nothing selected");
            return Outcome::Ignored(Notice::NothingSelected);
        };
        self.plan.remove_room(id);
        if self.ui.containing_room == Some(id) {
            self.ui.containing_room = None;
        }
        debug!(room = %id, "room deleted");
        Outcome::Applied
    }

    /// Delete the selected furniture item and clear the furniture selection.
    pub fn delete_selected_furniture(&mut self) -> Outcome {
        let Some(id) = self.ui.selected_furniture.take() else {
            warn!("delete furniture: nothing selected");
            return Outcome::Ignored(Notice::NothingSelected);
        };
        self.plan.remove_furniture(id);
        if let PointerState::Resizing { target, .. } = self.pointer {
            if target == id {
                self.pointer = PointerState::Idle;
            }
        }
        debug!(item = %id, "furniture deleted");
        Outcome::Applied
    }

    /// Rotate the selected furniture item a quarter turn, then clamp it back
    /// onto the canvas.
    pub fn rotate_selected_furniture(&mut self) -> Outcome {
        let Some(id) = self.ui.selected_furniture else {
            warn!("rotate furniture: nothing selected");
            return Outcome::Ignored(Notice::NothingSelected);
        };
        let Some(item) = self.plan.item_mut(id) else {
            return Outcome::Ignored(Notice::NothingSelected);
        };
        item.rotate();
        item.clamp_to_canvas(self.canvas_width, self.canvas_height);
        debug!(item = %id, "furniture rotated");
        Outcome::Applied
    }

    // --- Persistence ---

    /// Write the whole plan to `path` as one unit.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError`] on encode or I/O failure; the in-memory plan is
    /// never affected.
    pub fn save_plan(&self, path: &Path) -> Result<(), PlanError> {
        codec::save_plan(path, &self.plan)?;
        info!(path = %path.display(), rooms = self.plan.room_count(), furniture = self.plan.furniture_count(), "plan saved");
        Ok(())
    }

    /// Replace the plan with the contents of `path`. The file is fully
    /// decoded before any live state changes; on error the prior plan,
    /// selection, and gesture are all retained.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError`] on I/O or decode failure.
    pub fn load_plan(&mut self, path: &Path) -> Result<(), PlanError> {
        let loaded = codec::load_plan(path)?;
        info!(path = %path.display(), rooms = loaded.room_count(), furniture = loaded.furniture_count(), "plan loaded");
        self.plan = loaded;
        self.ui = UiState::default();
        self.pointer = PointerState::Idle;
        Ok(())
    }
}
