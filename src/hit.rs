//! Hit-testing against the plan store.
//!
//! Resize handles are scanned first and in insertion order, preserving the
//! original priority of the handle loop. Body hits scan in reverse insertion
//! order so the entity painted on top is the one the click selects; rooms
//! are hit on their outer bounds, so clicking a wall selects the room.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::geom::Point;
use crate::plan::{FurnitureId, PlanStore, RoomId};

/// First furniture item (insertion order) whose resize handle contains `p`.
#[must_use]
pub fn handle_at(store: &PlanStore, p: Point) -> Option<FurnitureId> {
    store.furniture().iter().find(|f| f.is_near_handle(p)).map(|f| f.id)
}

/// Topmost room whose outer bounds contain `p`.
#[must_use]
pub fn room_at(store: &PlanStore, p: Point) -> Option<RoomId> {
    store
        .rooms()
        .iter()
        .rev()
        .find(|r| r.outer_bounds().contains(p))
        .map(|r| r.id)
}

/// Topmost furniture item whose bounding rect contains `p`.
#[must_use]
pub fn furniture_at(store: &PlanStore, p: Point) -> Option<FurnitureId> {
    store
        .furniture()
        .iter()
        .rev()
        .find(|f| f.bounds().contains(p))
        .map(|f| f.id)
}
