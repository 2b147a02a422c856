use kitchenkit_core::{JsonDirStore, KeyValueStore};
use kitchenkit_layout::serialization::{load_instances, modules_key, LAYOUT_KEY};
use kitchenkit_layout::{DragPayload, KitchenProject, KitchenType, LayoutOptions, ScreenPoint};

#[test]
fn test_project_survives_restart() {
    let dir = tempfile::tempdir().unwrap();

    {
        let mut store = JsonDirStore::open(dir.path()).unwrap();
        let mut project = KitchenProject::new(KitchenType::C);
        project.update_wall_dimensions("front", 4.5, 2.8).unwrap();
        let canvas = project.wall_mut("front").unwrap();
        canvas.click_to_place(&DragPayload::new("bm2p", "Base").with_size(120, 91));
        canvas.click_to_place(&DragPayload::new("fridge", "Fridge").with_size(60, 180));
        project.save(&mut store).unwrap();
    }

    let store = JsonDirStore::open(dir.path()).unwrap();
    assert!(store.get(LAYOUT_KEY).unwrap().is_some());
    assert!(store.get(&modules_key("left")).unwrap().is_some());

    let project = KitchenProject::load(&store, LayoutOptions::default()).unwrap();
    assert_eq!(project.kitchen_type(), KitchenType::C);
    let front = project.wall("front").unwrap();
    assert_eq!(front.wall().width_meters, 4.5);
    assert_eq!(front.instances().len(), 2);
    assert_eq!(front.instances()[1].x, 125);
}

#[test]
fn test_shrunk_wall_keeps_instances_across_reload() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = JsonDirStore::open(dir.path()).unwrap();

    let mut project = KitchenProject::new(KitchenType::Recta);
    let canvas = project.wall_mut("front").unwrap();
    for x in [50.0, 150.0] {
        // top-left at unit (x, 210) puts the module on the floor
        let at = ScreenPoint::new(x, 210.0);
        let outcome = canvas.drop_payload(DragPayload::new("bm", "Base").with_size(100, 90), at);
        assert!(outcome.is_committed());
    }
    project.update_wall_dimensions("front", 1.0, 3.0).unwrap();
    project.save(&mut store).unwrap();
    let before = project.wall("front").unwrap().instances().to_vec();
    assert_eq!(before[1].x, 100);

    let reloaded = KitchenProject::load(&store, LayoutOptions::default()).unwrap();
    assert_eq!(reloaded.wall("front").unwrap().instances(), before.as_slice());

    // saving again does not lose the overhanging module
    reloaded.save(&mut store).unwrap();
    assert_eq!(load_instances(&store, "front").unwrap(), before);
}

#[test]
fn test_stored_records_restored_verbatim() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = JsonDirStore::open(dir.path()).unwrap();
    store
        .set(
            &modules_key("front"),
            r#"[
                {"id":"00000000-0000-4000-8000-000000000001","type":"bm","title":"A","x":0,"y":0,"width":60,"height":90},
                {"id":"00000000-0000-4000-8000-000000000002","type":"bm","title":"B","x":380,"y":0,"width":60,"height":90},
                {"id":"00000000-0000-4000-8000-000000000001","type":"bm","title":"C","x":60,"y":0,"width":60,"height":90}
            ]"#,
        )
        .unwrap();
    assert_eq!(load_instances(&store, "front").unwrap().len(), 3);

    let project = KitchenProject::load(&store, LayoutOptions::default()).unwrap();
    let front = project.wall("front").unwrap();
    let titles: Vec<_> = front.instances().iter().map(|m| m.title.as_str()).collect();
    assert_eq!(titles, vec!["A", "B"]);
    assert_eq!(front.instances()[1].x, 380);
}
