#![allow(clippy::float_cmp)]

use super::*;
use crate::geom::Rect;

// =============================================================
// Helpers
// =============================================================

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn push_room(engine: &mut Engine, x: f64, y: f64, w: f64, h: f64, ty: RoomType) -> RoomId {
    let room = Room::new(x, y, w, h, ty);
    let id = room.id;
    engine.plan.push_room(room);
    id
}

fn push_item(engine: &mut Engine, kind: FurnitureKind, x: f64, y: f64, w: f64, h: f64) -> FurnitureId {
    let item = Furniture::with_bounds(kind, x, y, w, h);
    let id = item.id;
    engine.plan.push_furniture(item);
    id
}

/// Click, drag through the given points, release.
fn drag_gesture(engine: &mut Engine, from: Point, to: Point) -> Outcome {
    engine.pointer_down(from);
    let outcome = engine.pointer_drag(to);
    engine.pointer_up();
    outcome
}

fn assert_no_room_overlaps(engine: &Engine) {
    let rooms = engine.plan.rooms();
    for (i, a) in rooms.iter().enumerate() {
        for b in &rooms[i + 1..] {
            assert!(
                !a.outer_bounds().intersects(&b.outer_bounds()),
                "rooms {:?} and {:?} overlap",
                a.id,
                b.id
            );
        }
    }
}

fn assert_no_furniture_overlaps(engine: &Engine) {
    let items = engine.plan.furniture();
    for (i, a) in items.iter().enumerate() {
        for b in &items[i + 1..] {
            assert!(
                !a.bounds().intersects(&b.bounds()),
                "items {:?} and {:?} overlap",
                a.id,
                b.id
            );
        }
    }
}

// =============================================================
// Construction and defaults
// =============================================================

#[test]
fn new_engine_is_empty_and_idle() {
    let engine = Engine::new();
    assert!(engine.plan.is_empty());
    assert!(engine.ui.selected_room.is_none());
    assert!(engine.ui.selected_furniture.is_none());
    assert!(!engine.pointer.is_active());
    assert_eq!(engine.canvas_width, 900.0);
    assert_eq!(engine.canvas_height, 600.0);
}

// =============================================================
// add_room
// =============================================================

#[test]
fn add_room_appends() {
    let mut engine = Engine::new();
    assert!(engine.add_room(10.0, 10.0, 200.0, 100.0, RoomType::Bedroom).is_applied());
    assert_eq!(engine.plan.room_count(), 1);
    assert_eq!(engine.plan.rooms()[0].room_type, RoomType::Bedroom);
}

#[test]
fn add_room_rejects_overlap_and_leaves_store_unchanged() {
    let mut engine = Engine::new();
    assert!(engine.add_room(10.0, 10.0, 200.0, 100.0, RoomType::Bedroom).is_applied());
    let outcome = engine.add_room(10.0, 10.0, 200.0, 100.0, RoomType::Kitchen);
    assert_eq!(outcome, Outcome::Rejected(RejectReason::RoomOverlap));
    assert_eq!(engine.plan.room_count(), 1);
    assert_eq!(engine.plan.rooms()[0].room_type, RoomType::Bedroom);
}

#[test]
fn add_room_clamps_candidate_onto_canvas() {
    let mut engine = Engine::new();
    assert!(engine.add_room(-500.0, -500.0, 100.0, 100.0, RoomType::Bathroom).is_applied());
    let room = engine.plan.rooms()[0];
    assert_eq!((room.x, room.y), (2.0, 2.0));
}

#[test]
fn add_room_larger_than_canvas_does_not_panic() {
    let mut engine = Engine::new();
    assert!(engine.add_room(0.0, 0.0, 5000.0, 5000.0, RoomType::LivingRoom).is_applied());
    let room = engine.plan.rooms()[0];
    assert_eq!((room.x, room.y), (2.0, 2.0));
}

#[test]
fn add_rooms_side_by_side() {
    let mut engine = Engine::new();
    assert!(engine.add_room(10.0, 10.0, 100.0, 100.0, RoomType::Bedroom).is_applied());
    // Inner rects 4 apart: outer bounds touch exactly, which is not overlap.
    assert!(engine.add_room(114.0, 10.0, 100.0, 100.0, RoomType::Kitchen).is_applied());
    assert_eq!(engine.plan.room_count(), 2);
    assert_no_room_overlaps(&engine);
}

// =============================================================
// add_furniture
// =============================================================

#[test]
fn add_furniture_spawns_at_kind_defaults() {
    let mut engine = Engine::new();
    assert!(engine.add_furniture(FurnitureKind::Sofa).is_applied());
    let item = &engine.plan.furniture()[0];
    assert_eq!(item.bounds(), Rect::new(50.0, 50.0, 50.0, 30.0));
}

#[test]
fn add_furniture_rejects_spawn_overlap() {
    let mut engine = Engine::new();
    assert!(engine.add_furniture(FurnitureKind::Sofa).is_applied());
    // Door spawns at (50,50) too, on top of the sofa.
    let outcome = engine.add_furniture(FurnitureKind::Door);
    assert_eq!(outcome, Outcome::Rejected(RejectReason::FurnitureOverlap));
    assert_eq!(engine.plan.furniture_count(), 1);
}

#[test]
fn add_furniture_touching_spawns_coexist() {
    let mut engine = Engine::new();
    assert!(engine.add_furniture(FurnitureKind::Sofa).is_applied());
    // Window spawns at x=100, flush against the sofa's right edge.
    assert!(engine.add_furniture(FurnitureKind::Window).is_applied());
    assert_eq!(engine.plan.furniture_count(), 2);
    assert_no_furniture_overlaps(&engine);
}

// =============================================================
// pointer_down: selection
// =============================================================

#[test]
fn click_selects_topmost_furniture_and_room_independently() {
    let mut engine = Engine::new();
    let rid = push_room(&mut engine, 100.0, 100.0, 300.0, 200.0, RoomType::LivingRoom);
    let fid = push_item(&mut engine, FurnitureKind::Table, 150.0, 150.0, 50.0, 30.0);

    engine.pointer_down(pt(160.0, 160.0));
    assert_eq!(engine.ui.selected_room, Some(rid));
    assert_eq!(engine.ui.selected_furniture, Some(fid));
}

#[test]
fn click_on_empty_space_clears_both_selections() {
    let mut engine = Engine::new();
    push_room(&mut engine, 100.0, 100.0, 100.0, 100.0, RoomType::Bedroom);
    engine.pointer_down(pt(150.0, 150.0));
    assert!(engine.ui.selected_room.is_some());

    engine.pointer_up();
    engine.pointer_down(pt(800.0, 500.0));
    assert!(engine.ui.selected_room.is_none());
    assert!(engine.ui.selected_furniture.is_none());
}

#[test]
fn click_in_wall_band_selects_room() {
    let mut engine = Engine::new();
    let rid = push_room(&mut engine, 100.0, 100.0, 100.0, 100.0, RoomType::Kitchen);
    engine.pointer_down(pt(99.0, 150.0));
    assert_eq!(engine.ui.selected_room, Some(rid));
}

#[test]
fn handle_click_starts_resize_and_preserves_selection() {
    let mut engine = Engine::new();
    let fid = push_item(&mut engine, FurnitureKind::Bed, 100.0, 100.0, 50.0, 30.0);
    engine.pointer_down(pt(120.0, 115.0));
    engine.pointer_up();
    assert_eq!(engine.ui.selected_furniture, Some(fid));

    engine.pointer_down(pt(149.0, 129.0));
    assert!(matches!(engine.pointer, PointerState::Resizing { target, .. } if target == fid));
    // Handle clicks do not re-run selection.
    assert_eq!(engine.ui.selected_furniture, Some(fid));
}

// =============================================================
// Resizing
// =============================================================

#[test]
fn resize_drag_is_incremental() {
    let mut engine = Engine::new();
    let fid = push_item(&mut engine, FurnitureKind::Table, 100.0, 100.0, 50.0, 30.0);

    engine.pointer_down(pt(149.0, 129.0));
    assert!(engine.pointer_drag(pt(159.0, 134.0)).is_applied());
    let item = engine.plan.item(fid).unwrap();
    assert_eq!((item.width, item.height), (60.0, 35.0));

    // Second frame applies only the new delta, not total-from-start.
    assert!(engine.pointer_drag(pt(169.0, 134.0)).is_applied());
    let item = engine.plan.item(fid).unwrap();
    assert_eq!((item.width, item.height), (70.0, 35.0));
}

#[test]
fn resize_can_go_negative_without_panic() {
    let mut engine = Engine::new();
    let fid = push_item(&mut engine, FurnitureKind::Chair, 100.0, 100.0, 50.0, 30.0);
    engine.pointer_down(pt(149.0, 129.0));
    assert!(engine.pointer_drag(pt(49.0, 29.0)).is_applied());
    let item = engine.plan.item(fid).unwrap();
    assert_eq!((item.width, item.height), (-50.0, -70.0));
    engine.pointer_up();
}

#[test]
fn resize_release_clamps_to_canvas() {
    let mut engine = Engine::new();
    let fid = push_item(&mut engine, FurnitureKind::Table, 800.0, 500.0, 50.0, 30.0);
    engine.pointer_down(pt(849.0, 529.0));
    assert!(engine.pointer_drag(pt(1049.0, 729.0)).is_applied());
    engine.pointer_up();

    let item = engine.plan.item(fid).unwrap();
    // 250x230 item pulled back so it fits the canvas.
    assert_eq!((item.width, item.height), (250.0, 230.0));
    assert_eq!((item.x, item.y), (650.0, 370.0));
}

// =============================================================
// Room dragging
// =============================================================

#[test]
fn room_drag_moves_and_stays_on_canvas() {
    let mut engine = Engine::new();
    let rid = push_room(&mut engine, 100.0, 100.0, 100.0, 100.0, RoomType::Bedroom);

    engine.pointer_down(pt(150.0, 150.0));
    assert!(engine.pointer_drag(pt(170.0, 140.0)).is_applied());
    let room = engine.plan.room(rid).unwrap();
    assert_eq!((room.x, room.y), (120.0, 90.0));
    engine.pointer_up();
}

#[test]
fn room_drag_clamps_mid_drag_at_canvas_edge() {
    let mut engine = Engine::new();
    let rid = push_room(&mut engine, 100.0, 100.0, 100.0, 100.0, RoomType::Bedroom);

    engine.pointer_down(pt(150.0, 150.0));
    assert!(engine.pointer_drag(pt(5000.0, 5000.0)).is_applied());
    let room = engine.plan.room(rid).unwrap();
    assert_eq!((room.x, room.y), (798.0, 498.0));
    engine.pointer_up();
}

#[test]
fn room_drag_into_sibling_is_rejected_and_fully_reverted() {
    let mut engine = Engine::new();
    let rid = push_room(&mut engine, 10.0, 10.0, 100.0, 100.0, RoomType::Bedroom);
    push_room(&mut engine, 200.0, 10.0, 100.0, 100.0, RoomType::Kitchen);

    engine.pointer_down(pt(60.0, 60.0));
    let outcome = engine.pointer_drag(pt(210.0, 80.0));
    assert_eq!(outcome, Outcome::Rejected(RejectReason::RoomOverlap));
    let room = engine.plan.room(rid).unwrap();
    // Both axes reverted, not just the offending one.
    assert_eq!((room.x, room.y), (10.0, 10.0));
    engine.pointer_up();
    assert_no_room_overlaps(&engine);
}

#[test]
fn rejected_room_drag_does_not_leak_delta_into_next_frame() {
    let mut engine = Engine::new();
    let rid = push_room(&mut engine, 10.0, 10.0, 100.0, 100.0, RoomType::Bedroom);
    push_room(&mut engine, 200.0, 10.0, 100.0, 100.0, RoomType::Kitchen);

    engine.pointer_down(pt(60.0, 60.0));
    assert_eq!(
        engine.pointer_drag(pt(150.0, 60.0)),
        Outcome::Rejected(RejectReason::RoomOverlap)
    );
    // The anchor advanced to (150,60); a 10-unit nudge moves 10 units from
    // the original position.
    assert!(engine.pointer_drag(pt(160.0, 60.0)).is_applied());
    let room = engine.plan.room(rid).unwrap();
    assert_eq!((room.x, room.y), (20.0, 10.0));
    engine.pointer_up();
}

// =============================================================
// Furniture dragging (free)
// =============================================================

#[test]
fn free_furniture_drag_moves_without_mid_drag_clamp() {
    let mut engine = Engine::new();
    let fid = push_item(&mut engine, FurnitureKind::Sofa, 50.0, 50.0, 50.0, 30.0);

    engine.pointer_down(pt(60.0, 60.0));
    assert!(engine.pointer_drag(pt(2060.0, 60.0)).is_applied());
    // Off-canvas mid-drag is allowed on this branch.
    assert_eq!(engine.plan.item(fid).unwrap().x, 2050.0);
}

#[test]
fn huge_furniture_drag_settles_inside_canvas_on_release() {
    let mut engine = Engine::new();
    let fid = push_item(&mut engine, FurnitureKind::Sofa, 50.0, 50.0, 50.0, 30.0);

    engine.pointer_down(pt(60.0, 60.0));
    assert!(engine.pointer_drag(pt(10060.0, 10060.0)).is_applied());
    engine.pointer_up();

    let bounds = engine.plan.item(fid).unwrap().bounds();
    assert!(Rect::new(0.0, 0.0, 900.0, 600.0).contains_rect(&bounds));
    assert_eq!((bounds.x, bounds.y), (850.0, 570.0));
}

#[test]
fn furniture_drag_into_other_furniture_is_rejected() {
    let mut engine = Engine::new();
    let fid = push_item(&mut engine, FurnitureKind::Sofa, 50.0, 50.0, 50.0, 30.0);
    push_item(&mut engine, FurnitureKind::Table, 300.0, 50.0, 50.0, 30.0);

    engine.pointer_down(pt(60.0, 60.0));
    let outcome = engine.pointer_drag(pt(320.0, 70.0));
    assert_eq!(outcome, Outcome::Rejected(RejectReason::FurnitureOverlap));
    let item = engine.plan.item(fid).unwrap();
    assert_eq!((item.x, item.y), (50.0, 50.0));
    engine.pointer_up();
    assert_no_furniture_overlaps(&engine);
}

// =============================================================
// Furniture dragging (confined to a room)
// =============================================================

#[test]
fn furniture_with_room_selected_is_confined_to_inner_rect() {
    let mut engine = Engine::new();
    push_room(&mut engine, 100.0, 100.0, 200.0, 150.0, RoomType::LivingRoom);
    let fid = push_item(&mut engine, FurnitureKind::Table, 150.0, 150.0, 50.0, 30.0);

    // Click inside both: selects room and furniture together.
    engine.pointer_down(pt(160.0, 160.0));
    assert!(engine.pointer_drag(pt(760.0, 460.0)).is_applied());

    let item = engine.plan.item(fid).unwrap();
    // Clamped to the room's inner rect, not the canvas.
    assert_eq!((item.x, item.y), (250.0, 220.0));
    engine.pointer_up();
}

#[test]
fn confined_drag_wins_over_room_drag_when_both_selected() {
    let mut engine = Engine::new();
    let rid = push_room(&mut engine, 100.0, 100.0, 200.0, 150.0, RoomType::Bedroom);
    push_item(&mut engine, FurnitureKind::Chair, 150.0, 150.0, 50.0, 30.0);

    engine.pointer_down(pt(160.0, 160.0));
    assert!(engine.pointer_drag(pt(180.0, 160.0)).is_applied());

    // The room did not move; only the furniture did.
    let room = engine.plan.room(rid).unwrap();
    assert_eq!((room.x, room.y), (100.0, 100.0));
    engine.pointer_up();
}

#[test]
fn furniture_near_wall_clamps_to_room_not_canvas() {
    let mut engine = Engine::new();
    push_room(&mut engine, 50.0, 50.0, 200.0, 150.0, RoomType::Bathroom);
    let fid = push_item(&mut engine, FurnitureKind::Commode, 60.0, 60.0, 40.0, 40.0);

    engine.pointer_down(pt(70.0, 70.0));
    // Target position would be far outside the room but still on canvas.
    assert!(engine.pointer_drag(pt(20.0, 20.0)).is_applied());
    let item = engine.plan.item(fid).unwrap();
    assert_eq!((item.x, item.y), (50.0, 50.0));
    engine.pointer_up();
}

// =============================================================
// Gesture bookkeeping
// =============================================================

#[test]
fn drag_without_gesture_is_ignored() {
    let mut engine = Engine::new();
    push_item(&mut engine, FurnitureKind::Sofa, 50.0, 50.0, 50.0, 30.0);
    assert_eq!(engine.pointer_drag(pt(100.0, 100.0)), Outcome::Ignored(Notice::NoGesture));
}

#[test]
fn drag_with_nothing_selected_is_ignored() {
    let mut engine = Engine::new();
    engine.pointer_down(pt(400.0, 400.0));
    assert_eq!(engine.pointer_drag(pt(410.0, 410.0)), Outcome::Ignored(Notice::NothingSelected));
    engine.pointer_up();
}

#[test]
fn pointer_up_resets_gesture() {
    let mut engine = Engine::new();
    push_item(&mut engine, FurnitureKind::Sofa, 50.0, 50.0, 50.0, 30.0);
    engine.pointer_down(pt(60.0, 60.0));
    assert!(engine.pointer.is_active());
    engine.pointer_up();
    assert!(!engine.pointer.is_active());
}

#[test]
fn pointer_up_refreshes_containing_room_cache() {
    let mut engine = Engine::new();
    let rid = push_room(&mut engine, 100.0, 100.0, 300.0, 200.0, RoomType::Kitchen);
    push_item(&mut engine, FurnitureKind::Stove, 150.0, 150.0, 50.0, 30.0);

    engine.pointer_down(pt(160.0, 160.0));
    engine.pointer_up();
    assert_eq!(engine.ui.containing_room, Some(rid));
}

#[test]
fn containing_room_is_none_for_free_furniture() {
    let mut engine = Engine::new();
    push_room(&mut engine, 300.0, 300.0, 100.0, 100.0, RoomType::Bedroom);
    let fid = push_item(&mut engine, FurnitureKind::Sofa, 50.0, 50.0, 50.0, 30.0);

    assert_eq!(engine.containing_room_of(fid), None);
    engine.pointer_down(pt(60.0, 60.0));
    engine.pointer_up();
    assert_eq!(engine.ui.containing_room, None);
}

// =============================================================
// Delete
// =============================================================

#[test]
fn delete_selected_room_removes_and_clears_selection() {
    let mut engine = Engine::new();
    push_room(&mut engine, 100.0, 100.0, 100.0, 100.0, RoomType::Bedroom);
    engine.pointer_down(pt(150.0, 150.0));
    engine.pointer_up();

    assert!(engine.delete_selected_room().is_applied());
    assert_eq!(engine.plan.room_count(), 0);
    assert!(engine.ui.selected_room.is_none());
}

#[test]
fn delete_with_no_selection_is_ignored_and_counts_unchanged() {
    let mut engine = Engine::new();
    push_room(&mut engine, 100.0, 100.0, 100.0, 100.0, RoomType::Bedroom);
    push_item(&mut engine, FurnitureKind::Sofa, 400.0, 400.0, 50.0, 30.0);

    assert_eq!(engine.delete_selected_room(), Outcome::Ignored(Notice::NothingSelected));
    assert_eq!(engine.delete_selected_furniture(), Outcome::Ignored(Notice::NothingSelected));
    assert_eq!(engine.plan.room_count(), 1);
    assert_eq!(engine.plan.furniture_count(), 1);
}

#[test]
fn delete_selected_furniture_removes_item() {
    let mut engine = Engine::new();
    let fid = push_item(&mut engine, FurnitureKind::Sofa, 50.0, 50.0, 50.0, 30.0);
    engine.pointer_down(pt(60.0, 60.0));
    engine.pointer_up();

    assert!(engine.delete_selected_furniture().is_applied());
    assert!(engine.plan.item(fid).is_none());
    assert!(engine.ui.selected_furniture.is_none());
}

// =============================================================
// Rotate
// =============================================================

#[test]
fn rotate_selected_furniture_swaps_dimensions() {
    let mut engine = Engine::new();
    let fid = push_item(&mut engine, FurnitureKind::Bed, 100.0, 100.0, 60.0, 40.0);
    engine.pointer_down(pt(110.0, 110.0));
    engine.pointer_up();

    assert!(engine.rotate_selected_furniture().is_applied());
    let item = engine.plan.item(fid).unwrap();
    assert_eq!((item.width, item.height), (40.0, 60.0));
    assert_eq!(item.angle, std::f64::consts::FRAC_PI_2);
}

#[test]
fn rotate_near_edge_clamps_back_onto_canvas() {
    let mut engine = Engine::new();
    let fid = push_item(&mut engine, FurnitureKind::Bed, 870.0, 100.0, 30.0, 200.0);
    engine.pointer_down(pt(880.0, 150.0));
    engine.pointer_up();

    assert!(engine.rotate_selected_furniture().is_applied());
    let item = engine.plan.item(fid).unwrap();
    assert_eq!((item.width, item.height), (200.0, 30.0));
    // 870 + 200 would overrun the right edge; clamped back to 700.
    assert_eq!(item.x, 700.0);
}

#[test]
fn rotate_with_no_selection_is_ignored() {
    let mut engine = Engine::new();
    push_item(&mut engine, FurnitureKind::Sofa, 50.0, 50.0, 50.0, 30.0);
    assert_eq!(engine.rotate_selected_furniture(), Outcome::Ignored(Notice::NothingSelected));
}

// =============================================================
// Invariants across mixed sequences
// =============================================================

#[test]
fn room_invariant_holds_after_adds_and_drags() {
    let mut engine = Engine::new();
    assert!(engine.add_room(10.0, 10.0, 150.0, 100.0, RoomType::Bedroom).is_applied());
    assert!(engine.add_room(300.0, 10.0, 150.0, 100.0, RoomType::Kitchen).is_applied());
    assert!(engine.add_room(10.0, 300.0, 150.0, 100.0, RoomType::Bathroom).is_applied());
    let _ = engine.add_room(20.0, 20.0, 150.0, 100.0, RoomType::LivingRoom);
    assert_no_room_overlaps(&engine);

    // Drag the first room around, including an attempt into the second.
    let _ = drag_gesture(&mut engine, pt(80.0, 60.0), pt(370.0, 60.0));
    let _ = drag_gesture(&mut engine, pt(80.0, 60.0), pt(80.0, 200.0));
    assert_no_room_overlaps(&engine);
}

#[test]
fn furniture_invariant_holds_after_adds_and_drags() {
    let mut engine = Engine::new();
    push_item(&mut engine, FurnitureKind::Sofa, 50.0, 50.0, 50.0, 30.0);
    push_item(&mut engine, FurnitureKind::Table, 200.0, 50.0, 50.0, 30.0);
    push_item(&mut engine, FurnitureKind::Chair, 350.0, 50.0, 50.0, 30.0);
    assert_no_furniture_overlaps(&engine);

    let _ = drag_gesture(&mut engine, pt(60.0, 60.0), pt(210.0, 70.0));
    let _ = drag_gesture(&mut engine, pt(60.0, 60.0), pt(60.0, 300.0));
    assert_no_furniture_overlaps(&engine);
}
