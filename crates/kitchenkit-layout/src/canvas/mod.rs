//! Canvas for one wall: its instances, selection, viewport and placement flow.

mod drag;
mod types;

pub use drag::DragSession;
pub use types::{EditField, LayoutOptions};

use crate::instance_store::InstanceStore;
use crate::model::{InstanceId, InstancePatch, ModuleInstance};
use crate::payload::DragPayload;
use crate::placement::{ClickOutcome, DropOutcome, PlacementEvent, PlacementFlow, PlacementState};
use crate::selection_manager::SelectionManager;
use crate::viewport::{ScreenPoint, WallViewport};
use crate::wall::Wall;
use kitchenkit_core::WallBounds;

/// Canvas state of a single wall.
#[derive(Debug, Clone)]
pub struct WallCanvas {
    wall: Wall,
    store: InstanceStore,
    selection_manager: SelectionManager,
    viewport: WallViewport,
    flow: PlacementFlow,
    drag: Option<DragSession>,
    options: LayoutOptions,
}

impl WallCanvas {
    /// Creates an empty canvas with default options.
    pub fn new(wall: Wall) -> Self {
        Self::with_options(wall, LayoutOptions::default())
    }

    /// Creates an empty canvas with the given options.
    pub fn with_options(wall: Wall, options: LayoutOptions) -> Self {
        let bounds = wall.bounds();
        Self {
            wall,
            store: InstanceStore::new(bounds),
            selection_manager: SelectionManager::new(),
            viewport: WallViewport::with_options(bounds, &options),
            flow: PlacementFlow::new(),
            drag: None,
            options,
        }
    }

    pub fn wall(&self) -> &Wall {
        &self.wall
    }

    pub fn bounds(&self) -> WallBounds {
        self.store.bounds()
    }

    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    pub fn store(&self) -> &InstanceStore {
        &self.store
    }

    /// Placed instances in paint order.
    pub fn instances(&self) -> &[ModuleInstance] {
        self.store.list()
    }

    pub fn viewport(&self) -> &WallViewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut WallViewport {
        &mut self.viewport
    }

    pub fn placement_state(&self) -> &PlacementState {
        self.flow.state()
    }

    pub fn selected_id(&self) -> Option<InstanceId> {
        self.selection_manager.selected_id()
    }

    pub fn selected(&self) -> Option<&ModuleInstance> {
        self.selected_id().and_then(|id| self.store.get(id))
    }

    /// Applies a wall dimension edit (clamped). Instances are not moved.
    pub fn set_wall_dimensions(&mut self, width_meters: f64, height_meters: f64) {
        self.wall.set_dimensions(width_meters, height_meters);
        let bounds = self.wall.bounds();
        self.store.set_bounds(bounds);
        self.viewport.set_bounds(bounds);
        tracing::info!("Wall {} resized to {}", self.wall.id, bounds);
    }

    /// Replaces the wall's instances with persisted records.
    ///
    /// Records keep their stored geometry. Returns the number dropped for a
    /// repeated id.
    pub fn load_instances(&mut self, records: Vec<ModuleInstance>) -> usize {
        self.selection_manager.clear();
        self.drag = None;
        self.flow.cancel();
        self.store.load(records)
    }

    /// Feeds one event to the placement flow; a placed instance becomes selected.
    pub fn handle(&mut self, event: PlacementEvent) -> Option<DropOutcome> {
        let outcome = self
            .flow
            .handle(event, &mut self.store, &self.viewport, self.options.grid_step);
        if let Some(DropOutcome::Placed(id)) = outcome {
            self.selection_manager.select(&self.store, id);
        }
        outcome
    }

    /// Drops `payload` at a pointer position.
    pub fn drop_payload(&mut self, payload: DragPayload, at: ScreenPoint) -> ClickOutcome {
        let outcome = self.handle(PlacementEvent::Drop { payload, at });
        self.click_outcome(outcome)
    }

    /// Drops a raw drag payload; malformed payloads are ignored.
    pub fn drop_raw(&mut self, raw: &str, at: ScreenPoint) -> ClickOutcome {
        match DragPayload::parse(raw) {
            Some(payload) => self.drop_payload(payload, at),
            None => ClickOutcome::Ignored,
        }
    }

    /// Places `payload` at the first free slot, or opens its prompt there.
    pub fn click_to_place(&mut self, payload: &DragPayload) -> ClickOutcome {
        let outcome = self.handle(PlacementEvent::Click {
            payload: payload.clone(),
        });
        self.click_outcome(outcome)
    }

    fn click_outcome(&self, outcome: Option<DropOutcome>) -> ClickOutcome {
        match outcome {
            Some(outcome) => ClickOutcome::Committed(outcome),
            None if self.flow.is_prompting() => ClickOutcome::Prompted,
            None => ClickOutcome::Ignored,
        }
    }

    /// Closes any open prompt without placing anything.
    pub fn cancel_prompt(&mut self) {
        self.flow.cancel();
    }

    /// Selects the topmost instance under a pointer position; a miss clears
    /// the selection.
    pub fn click_at(&mut self, point: ScreenPoint) -> Option<InstanceId> {
        let zoom = self.viewport.zoom();
        let x = (point.x - self.viewport.axis_margin()) / zoom;
        let y = f64::from(self.bounds().height) - point.y / zoom;
        self.selection_manager.select_at(&self.store, x, y)
    }

    pub fn select(&mut self, id: InstanceId) -> bool {
        self.selection_manager.select(&self.store, id)
    }

    pub fn clear_selection(&mut self) {
        self.selection_manager.clear();
    }

    /// Removes the selected instance.
    pub fn delete_selected(&mut self) -> Option<ModuleInstance> {
        self.selection_manager.remove_selected(&mut self.store)
    }

    /// Removes an instance by id, clearing the selection if it pointed there.
    pub fn remove(&mut self, id: InstanceId) -> Option<ModuleInstance> {
        if self.selected_id() == Some(id) {
            self.selection_manager.clear();
        }
        self.store.remove(id)
    }

    /// Moves an instance; `false` if it would overlap or the id is unknown.
    pub fn move_instance(&mut self, id: InstanceId, x: f64, y: f64) -> bool {
        self.store.move_to(id, x, y)
    }

    pub fn update_instance(&mut self, id: InstanceId, patch: &InstancePatch) -> bool {
        self.store.update_geometry(id, patch)
    }

    /// Applies a numeric or color edit to the selected instance.
    ///
    /// Coordinates that do not parse read as 0. Width and height are
    /// read-only and always return `false`.
    pub fn edit_selected(&mut self, field: EditField, value: &str) -> bool {
        let Some(id) = self.selected_id() else {
            return false;
        };
        let number = || value.trim().parse::<f64>().ok().filter(|v| v.is_finite()).unwrap_or(0.0);
        let patch = match field {
            EditField::X => InstancePatch {
                x: Some(number()),
                ..InstancePatch::default()
            },
            EditField::Y => InstancePatch {
                y: Some(number()),
                ..InstancePatch::default()
            },
            EditField::Color => InstancePatch {
                color: Some(value.to_string()),
                ..InstancePatch::default()
            },
            EditField::Width | EditField::Height => return false,
        };
        self.store.update_geometry(id, &patch)
    }
}
