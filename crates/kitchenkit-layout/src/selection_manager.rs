use crate::instance_store::InstanceStore;
use crate::model::{InstanceId, ModuleInstance};

/// Tracks the selected module instance of one wall.
///
/// `SelectionManager` is responsible for:
/// - Remembering the single selected instance, if any
/// - Hit-testing a unit-grid point against the store (topmost first)
/// - Removing the selected instance
///
/// # Selection Model
///
/// - At most one instance is selected per wall
/// - A successful placement selects the new instance
/// - Clicking empty wall area clears the selection
///
/// The manager only stores an id; it never holds a borrow of the store, so
/// callers pass the store into each operation.
#[derive(Debug, Clone, Default)]
pub struct SelectionManager {
    /// The ID of the selected instance, if any
    selected_id: Option<InstanceId>,
}

impl SelectionManager {
    /// Creates a new `SelectionManager` with no selection.
    ///
    /// # Examples
    ///
    /// ```
    /// use kitchenkit_layout::selection_manager::SelectionManager;
    ///
    /// let manager = SelectionManager::new();
    /// assert_eq!(manager.selected_id(), None);
    /// ```
    pub fn new() -> Self {
        Self { selected_id: None }
    }

    /// Returns the ID of the selected instance.
    pub fn selected_id(&self) -> Option<InstanceId> {
        self.selected_id
    }

    /// Selects `id` if it exists in `store`.
    ///
    /// # Returns
    ///
    /// `true` if the selection changed to `id`.
    pub fn select(&mut self, store: &InstanceStore, id: InstanceId) -> bool {
        if store.contains(id) {
            self.selected_id = Some(id);
            true
        } else {
            false
        }
    }

    /// Clears the selection.
    pub fn clear(&mut self) {
        self.selected_id = None;
    }

    /// Selects the topmost instance containing the unit-grid point.
    ///
    /// The point is in stored coordinates (y from the floor). Instances are
    /// painted in insertion order, so the last hit wins. A miss clears the
    /// selection.
    ///
    /// # Returns
    ///
    /// The ID of the newly selected instance, or `None` if nothing was hit.
    pub fn select_at(&mut self, store: &InstanceStore, x: f64, y: f64) -> Option<InstanceId> {
        self.selected_id = store
            .list()
            .iter()
            .rev()
            .find(|m| contains_point(m, x, y))
            .map(|m| m.id);
        self.selected_id
    }

    /// Returns the selected instance, dropping a stale id.
    pub fn selected<'a>(&mut self, store: &'a InstanceStore) -> Option<&'a ModuleInstance> {
        let found = self.selected_id.and_then(|id| store.get(id));
        if found.is_none() {
            self.selected_id = None;
        }
        found
    }

    /// Removes the selected instance from `store` and clears the selection.
    pub fn remove_selected(&mut self, store: &mut InstanceStore) -> Option<ModuleInstance> {
        let id = self.selected_id.take()?;
        store.remove(id)
    }
}

fn contains_point(instance: &ModuleInstance, x: f64, y: f64) -> bool {
    let r = instance.rect();
    x >= f64::from(r.x) && x <= f64::from(r.right()) && y >= f64::from(r.y) && y <= f64::from(r.top())
}
