//! Instance store: the placed modules of one wall.
//!
//! Every mutation goes through [`sanitize`] and then [`collides`], so the
//! in-bounds and no-overlap invariants hold after each call. A rejected
//! mutation leaves the store untouched and is reported as `None`/`false`;
//! it is not an error. Persisted records are restored as stored.

use kitchenkit_core::WallBounds;

use crate::collision::collides;
use crate::model::{InstanceId, InstancePatch, ModuleInstance, ProposedRect, Rect};
use crate::sanitize::sanitize;

/// Owned, ordered collection of a wall's module instances.
///
/// Order is insertion order, which is also the paint order.
#[derive(Debug, Clone)]
pub struct InstanceStore {
    bounds: WallBounds,
    instances: Vec<ModuleInstance>,
}

impl InstanceStore {
    /// Creates an empty store for a wall of the given size.
    pub fn new(bounds: WallBounds) -> Self {
        Self {
            bounds,
            instances: Vec::new(),
        }
    }

    pub fn bounds(&self) -> WallBounds {
        self.bounds
    }

    /// Changes the wall size used for later mutations.
    ///
    /// Existing instances are not moved, even if they now overhang.
    pub fn set_bounds(&mut self, bounds: WallBounds) {
        self.bounds = bounds;
    }

    /// Sanitizes and inserts `instance`.
    ///
    /// Returns the id on success, `None` if the sanitized rectangle overlaps
    /// an existing instance.
    pub fn add(&mut self, mut instance: ModuleInstance) -> Option<InstanceId> {
        let rect = sanitize(ProposedRect::from(instance.rect()), self.bounds);
        if self.would_collide(&rect, None) {
            tracing::debug!(
                "Rejected {} at ({}, {}): overlaps an existing module",
                instance.module_type,
                rect.x,
                rect.y
            );
            return None;
        }
        instance.apply_rect(rect);
        let id = instance.id;
        tracing::info!(
            "Placed {} {}x{} at ({}, {})",
            instance.module_type,
            rect.width,
            rect.height,
            rect.x,
            rect.y
        );
        self.instances.push(instance);
        Some(id)
    }

    /// Applies a position patch to an instance.
    ///
    /// Width and height in the patch are ignored. Returns `false` if the id
    /// is unknown or the new position would overlap another instance; the
    /// store is then unchanged.
    pub fn update_geometry(&mut self, id: InstanceId, patch: &InstancePatch) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        if patch.touches_size() {
            tracing::debug!("Ignoring size change for {}", id);
        }

        let current = self.instances[index].rect();
        let proposed = ProposedRect::new(
            patch.x.unwrap_or(f64::from(current.x)),
            patch.y.unwrap_or(f64::from(current.y)),
            f64::from(current.width),
            f64::from(current.height),
        );
        let rect = sanitize(proposed, self.bounds);
        if self.would_collide(&rect, Some(id)) {
            tracing::debug!("Rejected move of {} to ({}, {})", id, rect.x, rect.y);
            return false;
        }

        let instance = &mut self.instances[index];
        instance.apply_rect(rect);
        if let Some(color) = &patch.color {
            instance.color = Some(color.clone());
        }
        true
    }

    /// Moves an instance to `(x, y)`; see [`InstanceStore::update_geometry`].
    pub fn move_to(&mut self, id: InstanceId, x: f64, y: f64) -> bool {
        self.update_geometry(id, &InstancePatch::position(x, y))
    }

    /// Sets the fallback fill of an instance. Geometry is not touched.
    pub fn set_color(&mut self, id: InstanceId, color: Option<String>) -> bool {
        match self.instances.iter_mut().find(|m| m.id == id) {
            Some(instance) => {
                instance.color = color;
                true
            }
            None => false,
        }
    }

    /// Removes and returns an instance.
    pub fn remove(&mut self, id: InstanceId) -> Option<ModuleInstance> {
        let index = self.index_of(id)?;
        let removed = self.instances.remove(index);
        tracing::info!("Removed {} ({})", removed.module_type, id);
        Some(removed)
    }

    /// True if `rect` overlaps any instance other than `ignore`.
    pub fn would_collide(&self, rect: &Rect, ignore: Option<InstanceId>) -> bool {
        collides(rect, &self.instances, ignore)
    }

    /// Replaces the contents with persisted records.
    ///
    /// Records keep their stored geometry, even when a wall resize left them
    /// overhanging. Only a repeated id is dropped. Returns the number dropped.
    pub fn load(&mut self, records: Vec<ModuleInstance>) -> usize {
        self.instances.clear();
        let mut dropped = 0;
        for record in records {
            if self.contains(record.id) {
                tracing::warn!("Dropped stored module {}: repeated id", record.id);
                dropped += 1;
                continue;
            }
            self.instances.push(record);
        }
        dropped
    }

    pub fn list(&self) -> &[ModuleInstance] {
        &self.instances
    }

    pub fn get(&self, id: InstanceId) -> Option<&ModuleInstance> {
        self.instances.iter().find(|m| m.id == id)
    }

    pub fn contains(&self, id: InstanceId) -> bool {
        self.index_of(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ModuleInstance> {
        self.instances.iter()
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    fn index_of(&self, id: InstanceId) -> Option<usize> {
        self.instances.iter().position(|m| m.id == id)
    }
}
