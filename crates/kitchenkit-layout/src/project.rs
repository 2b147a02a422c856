//! The walls of one kitchen and their persistence.

use kitchenkit_core::{KeyValueStore, LayoutError, StorageError};

use crate::canvas::{LayoutOptions, WallCanvas};
use crate::serialization::{self, LayoutRecord};
use crate::wall::{KitchenType, Wall};

/// A kitchen: its shape, one canvas per wall and the wall being edited.
#[derive(Debug, Clone)]
pub struct KitchenProject {
    kitchen_type: KitchenType,
    canvases: Vec<WallCanvas>,
    active_wall_id: String,
    options: LayoutOptions,
}

impl Default for KitchenProject {
    fn default() -> Self {
        Self::new(KitchenType::default())
    }
}

impl KitchenProject {
    /// Creates a project with the preset walls of `kitchen_type`.
    pub fn new(kitchen_type: KitchenType) -> Self {
        Self::with_options(kitchen_type, LayoutOptions::default())
    }

    pub fn with_options(kitchen_type: KitchenType, options: LayoutOptions) -> Self {
        Self::from_walls(kitchen_type, kitchen_type.preset_walls(), "", options)
    }

    fn from_walls(
        kitchen_type: KitchenType,
        walls: Vec<Wall>,
        active_wall_id: &str,
        options: LayoutOptions,
    ) -> Self {
        let mut canvases: Vec<WallCanvas> = Vec::with_capacity(walls.len());
        for wall in walls {
            if canvases.iter().any(|c| c.wall().id == wall.id) {
                tracing::warn!("Ignoring repeated wall id {}", wall.id);
                continue;
            }
            canvases.push(WallCanvas::with_options(wall, options.clone()));
        }
        let mut project = Self {
            kitchen_type,
            canvases,
            active_wall_id: active_wall_id.to_string(),
            options,
        };
        if project.index_of(active_wall_id).is_none() {
            project.activate_first();
        }
        project
    }

    /// Rebuilds a project from a persisted layout record.
    ///
    /// A record without walls falls back to the presets of its kitchen type,
    /// and an unknown active wall falls back to the first wall.
    pub fn from_record(record: LayoutRecord, options: LayoutOptions) -> Self {
        let walls = if record.walls.is_empty() {
            record.kitchen_type.preset_walls()
        } else {
            record.walls
        };
        Self::from_walls(record.kitchen_type, walls, &record.active_wall_id, options)
    }

    pub fn kitchen_type(&self) -> KitchenType {
        self.kitchen_type
    }

    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    /// Canvases in display order.
    pub fn canvases(&self) -> &[WallCanvas] {
        &self.canvases
    }

    pub fn walls(&self) -> impl Iterator<Item = &Wall> {
        self.canvases.iter().map(WallCanvas::wall)
    }

    pub fn wall(&self, wall_id: &str) -> Result<&WallCanvas, LayoutError> {
        self.index_of(wall_id)
            .map(|i| &self.canvases[i])
            .ok_or_else(|| wall_not_found(wall_id))
    }

    pub fn wall_mut(&mut self, wall_id: &str) -> Result<&mut WallCanvas, LayoutError> {
        match self.index_of(wall_id) {
            Some(i) => Ok(&mut self.canvases[i]),
            None => Err(wall_not_found(wall_id)),
        }
    }

    pub fn active_wall_id(&self) -> &str {
        &self.active_wall_id
    }

    pub fn active(&self) -> Option<&WallCanvas> {
        self.index_of(&self.active_wall_id).map(|i| &self.canvases[i])
    }

    pub fn active_mut(&mut self) -> Option<&mut WallCanvas> {
        let i = self.index_of(&self.active_wall_id)?;
        Some(&mut self.canvases[i])
    }

    pub fn set_active_wall(&mut self, wall_id: &str) -> Result<(), LayoutError> {
        self.wall(wall_id)?;
        self.active_wall_id = wall_id.to_string();
        Ok(())
    }

    /// Switches the kitchen shape.
    ///
    /// Walls whose id exists in both shapes keep their name, dimensions and
    /// instances; the others start from the preset. The first wall becomes
    /// active.
    pub fn set_kitchen_type(&mut self, kitchen_type: KitchenType) {
        let mut previous = std::mem::take(&mut self.canvases);
        self.canvases = kitchen_type
            .preset_walls()
            .into_iter()
            .map(|preset| match previous.iter().position(|c| c.wall().id == preset.id) {
                Some(i) => previous.swap_remove(i),
                None => WallCanvas::with_options(preset, self.options.clone()),
            })
            .collect();
        self.kitchen_type = kitchen_type;
        self.activate_first();
        tracing::info!(
            "Kitchen type set to {} ({} walls)",
            kitchen_type,
            self.canvases.len()
        );
    }

    /// Resizes a wall, clamped to the minimum wall size.
    pub fn update_wall_dimensions(
        &mut self,
        wall_id: &str,
        width_meters: f64,
        height_meters: f64,
    ) -> Result<(), LayoutError> {
        self.wall_mut(wall_id)?
            .set_wall_dimensions(width_meters, height_meters);
        Ok(())
    }

    /// Snapshot of the layout for persistence.
    pub fn layout_record(&self) -> LayoutRecord {
        LayoutRecord::new(
            self.kitchen_type,
            self.walls().cloned().collect(),
            self.active_wall_id.clone(),
        )
    }

    /// Loads the layout record and every wall's instances.
    pub fn load<S: KeyValueStore>(store: &S, options: LayoutOptions) -> Result<Self, StorageError> {
        let mut project = match serialization::load_layout(store)? {
            Some(record) => Self::from_record(record, options),
            None => Self::with_options(KitchenType::default(), options),
        };
        for canvas in &mut project.canvases {
            let records = serialization::load_instances(store, &canvas.wall().id)?;
            let dropped = canvas.load_instances(records);
            if dropped > 0 {
                tracing::warn!(
                    "Dropped {} repeated modules from wall {}",
                    dropped,
                    canvas.wall().id
                );
            }
        }
        tracing::info!(
            "Loaded {} kitchen with {} walls",
            project.kitchen_type,
            project.canvases.len()
        );
        Ok(project)
    }

    /// Writes the layout record and every wall's instances.
    pub fn save<S: KeyValueStore>(&self, store: &mut S) -> Result<(), StorageError> {
        serialization::save_layout(store, &self.layout_record())?;
        for canvas in &self.canvases {
            serialization::save_instances(store, &canvas.wall().id, canvas.instances())?;
        }
        Ok(())
    }

    /// Writes one wall's instances, as done after each mutation.
    pub fn save_wall<S: KeyValueStore>(&self, store: &mut S, wall_id: &str) -> kitchenkit_core::Result<()> {
        let canvas = self.wall(wall_id)?;
        serialization::save_instances(store, wall_id, canvas.instances())?;
        Ok(())
    }

    fn index_of(&self, wall_id: &str) -> Option<usize> {
        self.canvases.iter().position(|c| c.wall().id == wall_id)
    }

    fn activate_first(&mut self) {
        self.active_wall_id = self
            .canvases
            .first()
            .map(|c| c.wall().id.clone())
            .unwrap_or_default();
    }
}

fn wall_not_found(wall_id: &str) -> LayoutError {
    LayoutError::WallNotFound {
        wall_id: wall_id.to_string(),
    }
}
