//! Shared numeric constants for the floor-plan engine.

// ── Canvas ──────────────────────────────────────────────────────

/// Default canvas width in plan units.
pub const CANVAS_WIDTH: f64 = 900.0;

/// Default canvas height in plan units.
pub const CANVAS_HEIGHT: f64 = 600.0;

/// Grid cell size. Reserved for snapping; placement does not quantize to it.
pub const GRID_SIZE: f64 = 20.0;

// ── Rooms ───────────────────────────────────────────────────────

/// Wall thickness added around every room's inner rect on all four sides.
pub const WALL_THICKNESS: f64 = 2.0;

// ── Furniture ───────────────────────────────────────────────────

/// Side length of the square resize handle anchored at a furniture item's
/// bottom-right corner.
pub const RESIZE_HANDLE_SIZE: f64 = 8.0;
