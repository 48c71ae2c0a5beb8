//! Plan-file codec: the persistence contract for a whole floor plan.
//!
//! A plan file is one JSON document holding the ordered room and furniture
//! collections, written and read as a unit. The wire records here are
//! deliberately separate from the in-memory entities: the record types own
//! the format contract (field names, tags) while the entities own runtime
//! identity. Ids are not part of the format; fresh ids are minted on load.
//!
//! Loading decodes and validates the whole document before anything is
//! handed back, so a failed load can never leave a caller holding a
//! half-replaced plan.

#[cfg(test)]
#[path = "codec_test.rs"]
mod codec_test;

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::plan::{Furniture, FurnitureKind, PlanStore, Room, RoomType};

/// Error returned by [`save_plan`] and [`load_plan`].
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    /// Reading or writing the plan file failed.
    #[error("plan file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    /// The file contents are not a structurally valid plan document.
    #[error("failed to decode plan: {0}")]
    Decode(#[source] serde_json::Error),
    /// The in-memory plan could not be encoded.
    #[error("failed to encode plan: {0}")]
    Encode(#[source] serde_json::Error),
}

/// A room as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct RoomRecord {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    #[serde(rename = "type")]
    room_type: RoomType,
}

/// A furniture item as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct FurnitureRecord {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    #[serde(rename = "type")]
    kind: FurnitureKind,
    #[serde(rename = "rotationAngle")]
    angle: f64,
    #[serde(rename = "iconPath")]
    icon_path: String,
}

/// The whole plan document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct PlanFile {
    rooms: Vec<RoomRecord>,
    furniture: Vec<FurnitureRecord>,
}

fn room_to_record(room: &Room) -> RoomRecord {
    RoomRecord {
        x: room.x,
        y: room.y,
        width: room.width,
        height: room.height,
        room_type: room.room_type,
    }
}

fn record_to_room(record: RoomRecord) -> Room {
    Room::new(record.x, record.y, record.width, record.height, record.room_type)
}

fn furniture_to_record(item: &Furniture) -> FurnitureRecord {
    FurnitureRecord {
        x: item.x,
        y: item.y,
        width: item.width,
        height: item.height,
        kind: item.kind,
        angle: item.angle,
        icon_path: item.icon_path.clone(),
    }
}

fn record_to_furniture(record: FurnitureRecord) -> Furniture {
    let mut item = Furniture::with_bounds(record.kind, record.x, record.y, record.width, record.height);
    item.angle = record.angle;
    item.icon_path = record.icon_path;
    item
}

/// Serialize the whole store to `path`. The document is encoded fully before
/// the file is touched, so an encode failure leaves any existing file intact.
///
/// # Errors
///
/// Returns [`PlanError::Encode`] if serialization fails and
/// [`PlanError::Io`] if the write fails.
pub fn save_plan(path: &Path, store: &PlanStore) -> Result<(), PlanError> {
    let file = PlanFile {
        rooms: store.rooms().iter().map(room_to_record).collect(),
        furniture: store.furniture().iter().map(furniture_to_record).collect(),
    };
    let bytes = serde_json::to_vec_pretty(&file).map_err(PlanError::Encode)?;
    fs::write(path, bytes)?;
    Ok(())
}

/// Read and decode a whole plan from `path`. Nothing is returned unless the
/// entire document decodes, so callers can swap the result in atomically.
///
/// # Errors
///
/// Returns [`PlanError::Io`] if the file cannot be read and
/// [`PlanError::Decode`] if its contents are not a valid plan document.
pub fn load_plan(path: &Path) -> Result<PlanStore, PlanError> {
    let bytes = fs::read(path)?;
    let file: PlanFile = serde_json::from_slice(&bytes).map_err(PlanError::Decode)?;

    let mut store = PlanStore::new();
    store.replace_all(
        file.rooms.into_iter().map(record_to_room).collect(),
        file.furniture.into_iter().map(record_to_furniture).collect(),
    );
    Ok(store)
}
