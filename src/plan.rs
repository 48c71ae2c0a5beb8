//! Plan model: rooms, furniture, and the in-memory store.
//!
//! This module defines the two entity types that live on the canvas (`Room`,
//! `Furniture`), their catalog enums (`RoomType`, `FurnitureKind`), and the
//! runtime store that owns both ordered collections (`PlanStore`).
//!
//! Data flows into this layer from the persistence codec (decoded plan files)
//! and from the layout engine (mutations). The renderer reads the store via
//! its slice accessors; insertion order is z-order, bottom first.

#[cfg(test)]
#[path = "plan_test.rs"]
mod plan_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::consts::{RESIZE_HANDLE_SIZE, WALL_THICKNESS};
use crate::geom::{Point, Rect, clamp_span};

/// Unique identifier for a room.
pub type RoomId = Uuid;

/// Unique identifier for a furniture item.
pub type FurnitureId = Uuid;

// =============================================================
// Rooms
// =============================================================

/// The function of a room, which also determines its fill color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomType {
    Bedroom,
    Bathroom,
    Kitchen,
    LivingRoom,
}

/// A rectangular room. `x`/`y`/`width`/`height` describe the inner rect; the
/// walls extend [`WALL_THICKNESS`] beyond it on every side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Room {
    /// Unique identifier for this room.
    pub id: RoomId,
    /// Left edge of the inner rect.
    pub x: f64,
    /// Top edge of the inner rect.
    pub y: f64,
    /// Width of the inner rect.
    pub width: f64,
    /// Height of the inner rect.
    pub height: f64,
    /// Function of the room.
    pub room_type: RoomType,
}

impl Room {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64, room_type: RoomType) -> Self {
        Self { id: Uuid::new_v4(), x, y, width, height, room_type }
    }

    /// The inner rect: the walkable area, and the confinement region for
    /// furniture placed inside this room.
    #[must_use]
    pub fn inner_rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// The outer bounds: the inner rect expanded by wall thickness on every
    /// side. This is the unit used for all room-room overlap checks.
    #[must_use]
    pub fn outer_bounds(&self) -> Rect {
        self.inner_rect().expand(WALL_THICKNESS)
    }

    /// Whether this room's outer bounds intersect `other`.
    #[must_use]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.outer_bounds().intersects(other)
    }

    /// Clamp the room so its outer bounds stay on the canvas. When the room
    /// is larger than the canvas the clamp span inverts and the lower bound
    /// wins.
    pub fn clamp_to_canvas(&mut self, canvas_width: f64, canvas_height: f64) {
        self.x = clamp_span(self.x, WALL_THICKNESS, canvas_width - self.width - WALL_THICKNESS);
        self.y = clamp_span(self.y, WALL_THICKNESS, canvas_height - self.height - WALL_THICKNESS);
    }

    /// Re-apply the canvas clamp for every sibling whose outer bounds
    /// intersect this room's. This does not resolve the overlap; overlap
    /// prevention lives in the add/drag rejection paths.
    pub fn clamp_against_siblings(&mut self, siblings: &[Room], canvas_width: f64, canvas_height: f64) {
        self.clamp_to_canvas(canvas_width, canvas_height);
        for other in siblings {
            if other.id != self.id && other.overlaps(&self.outer_bounds()) {
                self.clamp_to_canvas(canvas_width, canvas_height);
            }
        }
    }
}

// =============================================================
// Furniture
// =============================================================

/// The catalog of furniture and fixture kinds. Unrecognized tags decode to
/// `Default`, so plan files from newer versions still load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FurnitureKind {
    Sofa,
    Table,
    Chair,
    Bed,
    DiningSet,
    Door,
    Window,
    Stove,
    Shower,
    Commode,
    WashBasin,
    Sink,
    Default,
}

impl Serialize for FurnitureKind {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.tag())
    }
}

impl<'de> Deserialize<'de> for FurnitureKind {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(Self::from_tag(&tag))
    }
}

impl FurnitureKind {
    /// Parse a catalog tag; anything unrecognized maps to `Default`.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "Sofa" => Self::Sofa,
            "Table" => Self::Table,
            "Chair" => Self::Chair,
            "Bed" => Self::Bed,
            "Dining_Set" => Self::DiningSet,
            "Door" => Self::Door,
            "Window" => Self::Window,
            "Stove" => Self::Stove,
            "Shower" => Self::Shower,
            "Commode" => Self::Commode,
            "Wash_Basin" => Self::WashBasin,
            "Sink" => Self::Sink,
            _ => Self::Default,
        }
    }

    /// The catalog tag for this kind, as written to plan files.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Self::Sofa => "Sofa",
            Self::Table => "Table",
            Self::Chair => "Chair",
            Self::Bed => "Bed",
            Self::DiningSet => "Dining_Set",
            Self::Door => "Door",
            Self::Window => "Window",
            Self::Stove => "Stove",
            Self::Shower => "Shower",
            Self::Commode => "Commode",
            Self::WashBasin => "Wash_Basin",
            Self::Sink => "Sink",
            Self::Default => "Default",
        }
    }

    /// Icon asset path for this kind. Resolution of the path to an image is
    /// the painter's concern.
    #[must_use]
    pub fn icon_path(self) -> &'static str {
        match self {
            Self::Sofa => "/sofa.png",
            Self::Table => "/table.png",
            Self::Chair => "/chair.png",
            Self::Bed => "/bed.png",
            Self::DiningSet => "/diningset.png",
            Self::Door => "/door.png",
            Self::Window => "/window.png",
            Self::Stove => "/stove.png",
            Self::Shower => "/shower.png",
            Self::Commode => "/commode.png",
            Self::WashBasin => "/washbasin.png",
            Self::Sink => "/sink.png",
            Self::Default => "/default.png",
        }
    }

    /// Where a freshly added item of this kind lands on the canvas.
    #[must_use]
    pub fn spawn_bounds(self) -> Rect {
        match self {
            Self::Door => Rect::new(50.0, 50.0, 50.0, 20.0),
            Self::Window => Rect::new(100.0, 50.0, 60.0, 20.0),
            _ => Rect::new(50.0, 50.0, 50.0, 30.0),
        }
    }

    /// Capability hook: whether this kind punctures a wall. Doors and windows
    /// keep no special bounds behavior today; this flag is where such
    /// behavior would attach.
    #[must_use]
    pub fn is_passage(self) -> bool {
        matches!(self, Self::Door | Self::Window)
    }
}

/// A furniture or fixture item on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct Furniture {
    /// Unique identifier for this item.
    pub id: FurnitureId,
    /// Left edge of the bounding rect.
    pub x: f64,
    /// Top edge of the bounding rect.
    pub y: f64,
    /// Width of the bounding rect. May go zero or negative mid-resize.
    pub width: f64,
    /// Height of the bounding rect. May go zero or negative mid-resize.
    pub height: f64,
    /// Catalog kind.
    pub kind: FurnitureKind,
    /// Rotation about the item's own center, in radians, wrapped mod 2π.
    /// Always a multiple of 90° since rotation only happens in quarter turns.
    pub angle: f64,
    /// Icon asset path, derived from the kind at construction and persisted
    /// with the item.
    pub icon_path: String,
}

impl Furniture {
    /// Create an item of `kind` at its default spawn geometry.
    #[must_use]
    pub fn new(kind: FurnitureKind) -> Self {
        let spawn = kind.spawn_bounds();
        Self::with_bounds(kind, spawn.x, spawn.y, spawn.width, spawn.height)
    }

    /// Create an item with explicit geometry.
    #[must_use]
    pub fn with_bounds(kind: FurnitureKind, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            x,
            y,
            width,
            height,
            kind,
            angle: 0.0,
            icon_path: kind.icon_path().to_owned(),
        }
    }

    /// The item's bounding rect.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Grow or shrink by a delta on each axis. No lower bound: dimensions may
    /// pass through zero during a resize gesture.
    pub fn resize(&mut self, dx: f64, dy: f64) {
        self.width += dx;
        self.height += dy;
    }

    /// Quarter-turn rotation: swap width and height and advance the angle by
    /// 90°, wrapping mod 2π. Four applications restore the item exactly.
    pub fn rotate(&mut self) {
        std::mem::swap(&mut self.width, &mut self.height);
        self.angle = (self.angle + std::f64::consts::FRAC_PI_2) % std::f64::consts::TAU;
    }

    /// Clamp the bounding rect onto the canvas. Lower bound wins when the
    /// item is larger than the canvas.
    pub fn clamp_to_canvas(&mut self, canvas_width: f64, canvas_height: f64) {
        self.x = clamp_span(self.x, 0.0, canvas_width - self.width);
        self.y = clamp_span(self.y, 0.0, canvas_height - self.height);
    }

    /// Force the bounding rect inside `room`'s inner rect.
    pub fn clamp_to_room(&mut self, room: &Room) {
        self.x = clamp_span(self.x, room.x, room.x + room.width - self.width);
        self.y = clamp_span(self.y, room.y, room.y + room.height - self.height);
    }

    /// Whether `p` falls inside the resize handle: the
    /// [`RESIZE_HANDLE_SIZE`]-sided square whose bottom-right corner is the
    /// item's bottom-right corner.
    #[must_use]
    pub fn is_near_handle(&self, p: Point) -> bool {
        let right = self.x + self.width;
        let bottom = self.y + self.height;
        p.x >= right - RESIZE_HANDLE_SIZE
            && p.x <= right
            && p.y >= bottom - RESIZE_HANDLE_SIZE
            && p.y <= bottom
    }
}

// =============================================================
// Store
// =============================================================

/// In-memory store of the plan: the ordered room and furniture collections.
/// Insertion order is z-order for both painting and hit-testing.
#[derive(Debug, Default)]
pub struct PlanStore {
    rooms: Vec<Room>,
    furniture: Vec<Furniture>,
}

impl PlanStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All rooms in insertion order (bottom first).
    #[must_use]
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// All furniture in insertion order (bottom first).
    #[must_use]
    pub fn furniture(&self) -> &[Furniture] {
        &self.furniture
    }

    /// Append a room at the top of the z-order.
    pub fn push_room(&mut self, room: Room) {
        self.rooms.push(room);
    }

    /// Append a furniture item at the top of the z-order.
    pub fn push_furniture(&mut self, item: Furniture) {
        self.furniture.push(item);
    }

    /// Remove a room by id, returning it if it was present.
    pub fn remove_room(&mut self, id: RoomId) -> Option<Room> {
        let pos = self.rooms.iter().position(|r| r.id == id)?;
        Some(self.rooms.remove(pos))
    }

    /// Remove a furniture item by id, returning it if it was present.
    pub fn remove_furniture(&mut self, id: FurnitureId) -> Option<Furniture> {
        let pos = self.furniture.iter().position(|f| f.id == id)?;
        Some(self.furniture.remove(pos))
    }

    /// Look up a room by id.
    #[must_use]
    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == id)
    }

    /// Look up a room by id, mutably.
    pub fn room_mut(&mut self, id: RoomId) -> Option<&mut Room> {
        self.rooms.iter_mut().find(|r| r.id == id)
    }

    /// Look up a furniture item by id.
    #[must_use]
    pub fn item(&self, id: FurnitureId) -> Option<&Furniture> {
        self.furniture.iter().find(|f| f.id == id)
    }

    /// Look up a furniture item by id, mutably.
    pub fn item_mut(&mut self, id: FurnitureId) -> Option<&mut Furniture> {
        self.furniture.iter_mut().find(|f| f.id == id)
    }

    /// Whether any room other than `exclude` has outer bounds intersecting
    /// `bounds`. `bounds` must already be outer bounds.
    #[must_use]
    pub fn any_room_overlapping(&self, bounds: &Rect, exclude: Option<RoomId>) -> bool {
        self.rooms
            .iter()
            .filter(|r| exclude != Some(r.id))
            .any(|r| r.overlaps(bounds))
    }

    /// Whether any furniture item other than `exclude` has a bounding rect
    /// intersecting `bounds`.
    #[must_use]
    pub fn any_furniture_overlapping(&self, bounds: &Rect, exclude: Option<FurnitureId>) -> bool {
        self.furniture
            .iter()
            .filter(|f| exclude != Some(f.id))
            .any(|f| f.bounds().intersects(bounds))
    }

    /// Replace both collections with decoded plan contents. Only called once
    /// a plan file has fully decoded.
    pub fn replace_all(&mut self, rooms: Vec<Room>, furniture: Vec<Furniture>) {
        self.rooms = rooms;
        self.furniture = furniture;
    }

    /// Number of rooms.
    #[must_use]
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Number of furniture items.
    #[must_use]
    pub fn furniture_count(&self) -> usize {
        self.furniture.len()
    }

    /// Returns `true` if the store has no rooms and no furniture.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty() && self.furniture.is_empty()
    }
}
