use kitchenkit_core::SizeVariant;
use kitchenkit_layout::{
    DragPayload, PlacementEvent, PlacementState, Rect, ScreenPoint, Wall, WallCanvas,
};

fn front_wall() -> WallCanvas {
    WallCanvas::new(Wall::new("front", "Front wall", 4.0, 3.0))
}

/// Pointer position whose drop lands at unit `(x, y)` for a module of `height`.
fn pointer_for(canvas: &WallCanvas, x: i32, y: i32, height: i32) -> ScreenPoint {
    let zoom = canvas.viewport().zoom();
    let top_y = canvas.bounds().height - y - height;
    ScreenPoint::new(
        canvas.viewport().axis_margin() + f64::from(x) * zoom,
        f64::from(top_y) * zoom,
    )
}

#[test]
fn test_drop_lands_where_pointed() {
    let mut canvas = front_wall();
    let at = pointer_for(&canvas, 50, 50, 90);
    let id = canvas
        .drop_payload(DragPayload::new("bm2p", "Base").with_size(120, 90), at)
        .placed_id()
        .unwrap();
    assert_eq!(canvas.store().get(id).unwrap().rect(), Rect::new(50, 50, 120, 90));
}

#[test]
fn test_drop_lands_where_pointed_when_zoomed() {
    let mut canvas = front_wall();
    canvas.viewport_mut().set_zoom(1.5);
    let at = pointer_for(&canvas, 50, 50, 90);
    let id = canvas
        .drop_payload(DragPayload::new("bm2p", "Base").with_size(120, 90), at)
        .placed_id()
        .unwrap();
    assert_eq!(canvas.store().get(id).unwrap().rect(), Rect::new(50, 50, 120, 90));
}

#[test]
fn test_overlapping_drop_rejected() {
    let mut canvas = front_wall();
    let payload = DragPayload::new("bm", "Base").with_size(60, 90);
    let a = pointer_for(&canvas, 0, 0, 90);
    let b = pointer_for(&canvas, 30, 0, 90);
    assert!(canvas.drop_payload(payload.clone(), a).is_committed());
    assert!(!canvas.drop_payload(payload, b).is_committed());
    assert_eq!(canvas.instances().len(), 1);
    assert_eq!(canvas.instances()[0].rect(), Rect::new(0, 0, 60, 90));
}

#[test]
fn test_size_choice_carries_delta() {
    let mut canvas = front_wall();
    let payload = DragPayload::new("bm", "Base")
        .with_variant(SizeVariant::new(60, 60).with_delta_pct(0.0))
        .with_variant(SizeVariant::new(80, 60).with_delta_pct(10.0));
    canvas.drop_payload(payload, pointer_for(&canvas, 0, 0, 60));
    assert!(matches!(
        canvas.placement_state(),
        PlacementState::AwaitingSizeChoice(_)
    ));

    let id = canvas
        .handle(PlacementEvent::ChooseSize(1))
        .and_then(|o| o.placed_id())
        .unwrap();
    let placed = canvas.store().get(id).unwrap();
    assert_eq!((placed.width, placed.height), (80, 60));
    assert_eq!(placed.price_delta_pct, Some(10.0));
    assert_eq!(canvas.selected_id(), Some(id));
}

#[test]
fn test_click_to_place_fills_third_row() {
    let mut canvas = front_wall();
    let payload = DragPayload::new("bm", "Base").with_size(100, 50);
    for y in [0, 50] {
        for x in [0, 100, 200, 300] {
            let at = pointer_for(&canvas, x, y, 50);
            assert!(canvas.drop_payload(payload.clone(), at).is_committed());
        }
    }

    let id = canvas.click_to_place(&payload).placed_id().unwrap();
    assert_eq!(canvas.store().get(id).unwrap().rect(), Rect::new(0, 100, 100, 50));
}

#[test]
fn test_move_is_stored_exactly() {
    let mut canvas = front_wall();
    let at = pointer_for(&canvas, 10, 10, 60);
    let id = canvas
        .drop_payload(DragPayload::new("bm", "Base").with_size(60, 60), at)
        .placed_id()
        .unwrap();

    assert!(canvas.move_instance(id, 50.0, 10.0));
    assert_eq!(canvas.store().get(id).unwrap().rect(), Rect::new(50, 10, 60, 60));
}

#[test]
fn test_escape_closes_linear_prompt() {
    let mut canvas = front_wall();
    canvas.click_to_place(&DragPayload::new("zocalo-pvc", "Plinth"));
    assert!(matches!(
        canvas.placement_state(),
        PlacementState::AwaitingLinearChoice(_)
    ));
    canvas.handle(PlacementEvent::Cancel);
    assert_eq!(canvas.placement_state(), &PlacementState::Idle);
    assert!(canvas.instances().is_empty());
}

#[test]
fn test_linear_module_spans_chosen_length() {
    let mut canvas = front_wall();
    canvas.click_to_place(&DragPayload::new("zocalo-pvc", "Plinth"));
    canvas.handle(PlacementEvent::SetLength(400.0));
    canvas.handle(PlacementEvent::ChooseHeight(12));
    let id = canvas
        .handle(PlacementEvent::Confirm)
        .and_then(|o| o.placed_id())
        .unwrap();
    assert_eq!(canvas.store().get(id).unwrap().rect(), Rect::new(0, 0, 400, 12));
}
