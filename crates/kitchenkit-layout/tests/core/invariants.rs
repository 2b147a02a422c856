use kitchenkit_core::WallBounds;
use kitchenkit_layout::{InstanceStore, ModuleInstance, Rect};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Add { x: f64, y: f64, w: f64, h: f64 },
    Move { index: usize, x: f64, y: f64 },
    Remove { index: usize },
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (-50.0..450.0f64, -50.0..350.0f64, 0.0..200.0f64, 0.0..200.0f64)
            .prop_map(|(x, y, w, h)| Op::Add { x, y, w, h }),
        4 => (0usize..16, -50.0..450.0f64, -50.0..350.0f64)
            .prop_map(|(index, x, y)| Op::Move { index, x, y }),
        1 => (0usize..16).prop_map(|index| Op::Remove { index }),
    ]
}

fn apply(store: &mut InstanceStore, op: &Op) -> bool {
    match *op {
        Op::Add { x, y, w, h } => {
            let mut instance = ModuleInstance::new("bm", "Base", Rect::new(0, 0, 10, 10));
            instance.x = x.round() as i32;
            instance.y = y.round() as i32;
            instance.width = w.round() as i32;
            instance.height = h.round() as i32;
            store.add(instance).is_some()
        }
        Op::Move { index, x, y } => match store.list().get(index).map(|m| m.id) {
            Some(id) => store.move_to(id, x, y),
            None => false,
        },
        Op::Remove { index } => match store.list().get(index).map(|m| m.id) {
            Some(id) => store.remove(id).is_some(),
            None => false,
        },
    }
}

fn assert_invariants(store: &InstanceStore) -> Result<(), TestCaseError> {
    let bounds = store.bounds();
    let list = store.list();
    for (i, a) in list.iter().enumerate() {
        prop_assert!(a.width >= 10 && a.height >= 10);
        prop_assert!(a.rect().is_within(bounds), "{:?} outside {}", a.rect(), bounds);
        for b in &list[i + 1..] {
            prop_assert!(!a.rect().overlaps(&b.rect()), "{:?} overlaps {:?}", a.rect(), b.rect());
        }
    }
    Ok(())
}

proptest! {
    #[test]
    fn no_overlap_and_in_bounds(ops in prop::collection::vec(arb_op(), 1..60)) {
        let mut store = InstanceStore::new(WallBounds::new(400, 300));
        for op in &ops {
            apply(&mut store, op);
            assert_invariants(&store)?;
        }
    }

    #[test]
    fn rejected_mutation_leaves_store_identical(ops in prop::collection::vec(arb_op(), 1..60)) {
        let mut store = InstanceStore::new(WallBounds::new(400, 300));
        for op in &ops {
            let before = store.list().to_vec();
            if !apply(&mut store, op) {
                prop_assert_eq!(store.list(), before.as_slice());
            }
        }
    }
}
