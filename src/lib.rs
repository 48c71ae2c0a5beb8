//! Geometric layout engine for an interactive 2D floor-plan editor.
//!
//! This crate owns the full lifecycle of a floor plan: the spatial model
//! (rooms, furniture, canvas bounds), the constraint checks applied during
//! every mutation (move, resize, rotate, add), the selection and
//! drag-interaction state machine, and the plan-file codec. A host shell
//! feeds it pointer events and operation requests; a painter consumes the
//! display list it builds. The engine never talks to a user interface:
//! every mutation returns a typed [`engine::Outcome`] for the host to map
//! to notices.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | The layout engine: selection, gestures, constraints |
//! | [`plan`] | Entity model and the in-memory plan store |
//! | [`geom`] | Axis-aligned rectangle and point math |
//! | [`input`] | Selection state and the pointer gesture types |
//! | [`hit`] | Hit-testing against the plan store |
//! | [`render`] | Display-list construction and the room palette |
//! | [`codec`] | Plan-file persistence (JSON document contract) |
//! | [`consts`] | Shared numeric constants (canvas size, wall thickness) |

pub mod codec;
pub mod consts;
pub mod engine;
pub mod geom;
pub mod hit;
pub mod input;
pub mod plan;
pub mod render;

pub use engine::{Engine, Notice, Outcome, RejectReason};
