use kitchenkit_core::WallBounds;
use kitchenkit_layout::placement::find_free_slot;
use kitchenkit_layout::{InstanceStore, ModuleInstance, Rect, SlotSearch};

fn store_with(rects: &[Rect]) -> InstanceStore {
    let mut store = InstanceStore::new(WallBounds::new(400, 300));
    for r in rects {
        store.add(ModuleInstance::new("bm", "Base", *r)).unwrap();
    }
    store
}

#[test]
fn test_search_is_deterministic() {
    let store = store_with(&[Rect::new(0, 0, 60, 90), Rect::new(150, 0, 60, 90)]);
    let first = find_free_slot(&store, 60, 90, 25);
    for _ in 0..5 {
        assert_eq!(find_free_slot(&store, 60, 90, 25), first);
    }
}

#[test]
fn test_found_slot_is_free() {
    let store = store_with(&[
        Rect::new(0, 0, 60, 90),
        Rect::new(75, 0, 60, 90),
        Rect::new(150, 0, 250, 90),
    ]);
    let slot = find_free_slot(&store, 60, 90, 25);
    let SlotSearch::Free(point) = slot else {
        panic!("expected a free slot, got {:?}", slot);
    };
    let y = 300 - point.top_y - 90;
    let rect = Rect::new(point.x, y, 60, 90);
    assert!(!store.would_collide(&rect, None));
    // the floor row is full, so the slot is above it
    assert!(y > 0);
}

#[test]
fn test_row_is_scanned_left_to_right() {
    let store = store_with(&[Rect::new(0, 0, 100, 50)]);
    let slot = find_free_slot(&store, 50, 50, 25);
    assert_eq!(slot.point().x, 100);
    assert_eq!(slot.point().top_y, 250);
}

#[test]
fn test_fallback_when_wall_is_full() {
    let store = store_with(&[Rect::new(0, 0, 400, 300)]);
    let slot = find_free_slot(&store, 60, 60, 25);
    assert!(!slot.is_free());
    assert_eq!(slot.point().x, 0);
    assert_eq!(slot.point().top_y, 240);
}
