//! Scene construction: turns the plan into an ordered display list.
//!
//! The engine side of the rendering contract. `build_scene` produces plain
//! draw operations, bottom first; a painter (terminal, canvas, image writer)
//! consumes them read-only and resolves icon paths to pixels itself. Nothing
//! here mutates application state.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use serde::Serialize;

use crate::consts::RESIZE_HANDLE_SIZE;
use crate::geom::Rect;
use crate::plan::{PlanStore, RoomType};

/// Canvas background, matching the original light-gray panel.
pub const BACKGROUND_COLOR: &str = "#C0C0C0";

/// Wall band color around each room.
pub const WALL_COLOR: &str = "#404040";

/// Room outline color.
pub const OUTLINE_COLOR: &str = "#000000";

/// Resize-handle square color.
pub const HANDLE_COLOR: &str = "#000000";

/// Fill color for a room type. Fixed palette; the color is derived, never
/// stored on the room.
#[must_use]
pub fn room_fill(room_type: RoomType) -> &'static str {
    match room_type {
        RoomType::Bedroom => "#00FF00",
        RoomType::Bathroom => "#0000FF",
        RoomType::Kitchen => "#FF0000",
        RoomType::LivingRoom => "#FFC800",
    }
}

/// One primitive draw operation. Colors are CSS hex strings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawOp {
    /// Fill the whole canvas.
    Clear { color: &'static str },
    /// Fill an axis-aligned rectangle.
    FillRect { rect: Rect, color: &'static str },
    /// Outline an axis-aligned rectangle.
    StrokeRect { rect: Rect, color: &'static str },
    /// Draw the image at `path` scaled to `rect`, rotated by `angle` radians
    /// about the rect's own center.
    Image { path: String, rect: Rect, angle: f64 },
}

/// Build the display list for the whole plan, bottom first: background, then
/// each room as wall band / fill / outline, then each furniture item as its
/// image plus the handle square at its bottom-right corner. Iteration order
/// is store insertion order, so the most recently added entity paints on top
/// — the same order hit-testing resolves.
#[must_use]
pub fn build_scene(store: &PlanStore) -> Vec<DrawOp> {
    let mut ops = Vec::with_capacity(1 + store.room_count() * 3 + store.furniture_count() * 2);
    ops.push(DrawOp::Clear { color: BACKGROUND_COLOR });

    for room in store.rooms() {
        ops.push(DrawOp::FillRect { rect: room.outer_bounds(), color: WALL_COLOR });
        ops.push(DrawOp::FillRect { rect: room.inner_rect(), color: room_fill(room.room_type) });
        ops.push(DrawOp::StrokeRect { rect: room.inner_rect(), color: OUTLINE_COLOR });
    }

    for item in store.furniture() {
        let bounds = item.bounds();
        ops.push(DrawOp::Image { path: item.icon_path.clone(), rect: bounds, angle: item.angle });
        ops.push(DrawOp::FillRect { rect: handle_rect(&bounds), color: HANDLE_COLOR });
    }

    ops
}

/// The resize-handle square for a furniture bounding rect.
#[must_use]
pub fn handle_rect(bounds: &Rect) -> Rect {
    Rect::new(
        bounds.right() - RESIZE_HANDLE_SIZE,
        bounds.bottom() - RESIZE_HANDLE_SIZE,
        RESIZE_HANDLE_SIZE,
        RESIZE_HANDLE_SIZE,
    )
}
