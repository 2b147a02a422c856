//! Planner session: one kitchen project bound to a catalog, a quality tier
//! and a store, persisting after every mutation.

use anyhow::{bail, Context};
use serde::Serialize;

use kitchenkit_core::{Catalog, JsonDirStore, KeyValueStore, LayoutError, QualityTier};
use kitchenkit_layout::serialization;
use kitchenkit_layout::{
    ClickOutcome, DragPayload, InstanceId, KitchenProject, KitchenType, LayoutOptions,
    PlacementEvent, PlacementState, ScreenPoint, WallCanvas,
};
use kitchenkit_pricing::{compute_breakdown, summarize_titles, Breakdown, TitleSummary};
use kitchenkit_settings::Config;

/// A placement as requested from outside the canvas.
#[derive(Debug, Clone, Default)]
pub struct PlaceRequest {
    pub module_type: String,
    /// Target wall; the active wall when `None`.
    pub wall_id: Option<String>,
    /// Top-left drop point `(x, top_y)` in units; the first free slot when `None`.
    pub at: Option<(i32, i32)>,
    /// Size variant to pick when the entry offers several.
    pub size_index: Option<usize>,
    /// Length of a linear module.
    pub length: Option<f64>,
    /// Height of a linear module; must be one of the allowed heights.
    pub height: Option<i32>,
}

impl PlaceRequest {
    pub fn new(module_type: impl Into<String>) -> Self {
        Self {
            module_type: module_type.into(),
            ..Self::default()
        }
    }
}

/// Estimate of one wall: title counts plus the priced breakdown.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WallEstimate {
    pub wall_id: String,
    pub wall_name: String,
    pub width: i32,
    pub height: i32,
    pub tier: QualityTier,
    pub summary: TitleSummary,
    pub breakdown: Breakdown,
}

/// Kitchen project, catalog snapshot, tier and backing store.
#[derive(Debug)]
pub struct Session<S: KeyValueStore = JsonDirStore> {
    project: KitchenProject,
    catalog: Catalog,
    tier: QualityTier,
    store: S,
}

impl Session<JsonDirStore> {
    /// Opens the store under the configured data directory.
    pub fn open(config: &Config, catalog: Catalog) -> anyhow::Result<Self> {
        let data_dir = config.data_dir()?;
        let store = JsonDirStore::open(data_dir)
            .with_context(|| format!("Failed to open data directory {}", data_dir.display()))?;
        Self::with_store(
            store,
            catalog,
            crate::layout_options(&config.layout),
            config.pricing.default_tier,
        )
    }
}

impl<S: KeyValueStore> Session<S> {
    /// Loads the project and tier from `store`.
    pub fn with_store(
        store: S,
        catalog: Catalog,
        options: LayoutOptions,
        default_tier: QualityTier,
    ) -> anyhow::Result<Self> {
        let project = KitchenProject::load(&store, options).context("Failed to load layout")?;
        let tier = serialization::load_quality(&store)
            .context("Failed to load quality tier")?
            .unwrap_or(default_tier);
        tracing::info!(
            "Session opened: {} kitchen, tier {}, {} catalog entries",
            project.kitchen_type(),
            tier,
            catalog.len()
        );
        Ok(Self {
            project,
            catalog,
            tier,
            store,
        })
    }

    pub fn project(&self) -> &KitchenProject {
        &self.project
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn tier(&self) -> QualityTier {
        self.tier
    }

    /// Prices at `tier` for this session only; nothing is stored.
    pub fn with_tier(mut self, tier: QualityTier) -> Self {
        self.tier = tier;
        self
    }

    /// Changes the pricing tier and stores it.
    pub fn set_tier(&mut self, tier: QualityTier) -> anyhow::Result<()> {
        self.tier = tier;
        serialization::save_quality(&mut self.store, tier).context("Failed to save quality tier")
    }

    fn wall_id_or_active(&self, wall_id: Option<&str>) -> String {
        wall_id
            .map(str::to_string)
            .unwrap_or_else(|| self.project.active_wall_id().to_string())
    }

    fn canvas(&self, wall_id: &str) -> anyhow::Result<&WallCanvas> {
        Ok(self.project.wall(wall_id)?)
    }

    fn persist_wall(&mut self, wall_id: &str) -> anyhow::Result<()> {
        self.project
            .save_wall(&mut self.store, wall_id)
            .with_context(|| format!("Failed to save wall {}", wall_id))
    }

    fn persist_layout(&mut self) -> anyhow::Result<()> {
        self.project
            .save(&mut self.store)
            .context("Failed to save layout")
    }

    /// Places a catalog module, answering any prompt from the request.
    ///
    /// Returns the new instance id, or `None` when the placement collided.
    pub fn place(&mut self, request: &PlaceRequest) -> anyhow::Result<Option<InstanceId>> {
        let entry = self.catalog.require(&request.module_type)?;
        let payload = DragPayload::from(entry);
        let wall_id = self.wall_id_or_active(request.wall_id.as_deref());
        let canvas = self.project.wall_mut(&wall_id)?;

        let outcome = match request.at {
            Some((x, top_y)) => {
                let zoom = canvas.viewport().zoom();
                let at = ScreenPoint::new(
                    canvas.viewport().axis_margin() + f64::from(x) * zoom,
                    f64::from(top_y) * zoom,
                );
                canvas.drop_payload(payload, at)
            }
            None => canvas.click_to_place(&payload),
        };

        let placed = match outcome {
            ClickOutcome::Committed(outcome) => outcome.placed_id(),
            ClickOutcome::Prompted => answer_prompt(canvas, request)?,
            ClickOutcome::Ignored => None,
        };

        match placed {
            Some(id) => {
                self.persist_wall(&wall_id)?;
                Ok(Some(id))
            }
            None => {
                tracing::debug!("{} not placed on {}", request.module_type, wall_id);
                Ok(None)
            }
        }
    }

    /// Moves an instance to unit coordinates; `false` if the move was rejected.
    ///
    /// Fails with [`LayoutError::InstanceNotFound`] when `id` is not on the wall.
    pub fn move_instance(
        &mut self,
        wall_id: Option<&str>,
        id: InstanceId,
        x: f64,
        y: f64,
    ) -> anyhow::Result<bool> {
        let wall_id = self.wall_id_or_active(wall_id);
        let canvas = self.project.wall_mut(&wall_id)?;
        if !canvas.store().contains(id) {
            return Err(instance_not_found(id).into());
        }
        if !canvas.move_instance(id, x, y) {
            return Ok(false);
        }
        self.persist_wall(&wall_id)?;
        Ok(true)
    }

    /// Removes an instance.
    ///
    /// Fails with [`LayoutError::InstanceNotFound`] when `id` is not on the wall.
    pub fn remove(&mut self, wall_id: Option<&str>, id: InstanceId) -> anyhow::Result<()> {
        let wall_id = self.wall_id_or_active(wall_id);
        if self.project.wall_mut(&wall_id)?.remove(id).is_none() {
            return Err(instance_not_found(id).into());
        }
        self.persist_wall(&wall_id)
    }

    pub fn set_kitchen_type(&mut self, kitchen_type: KitchenType) -> anyhow::Result<()> {
        self.project.set_kitchen_type(kitchen_type);
        self.persist_layout()
    }

    pub fn set_active_wall(&mut self, wall_id: &str) -> anyhow::Result<()> {
        self.project.set_active_wall(wall_id)?;
        self.persist_layout()
    }

    /// Resizes a wall in meters; instances stay where they are.
    pub fn set_wall_dimensions(
        &mut self,
        wall_id: &str,
        width_meters: f64,
        height_meters: f64,
    ) -> anyhow::Result<()> {
        self.project
            .update_wall_dimensions(wall_id, width_meters, height_meters)?;
        self.persist_layout()
    }

    pub fn breakdown(&self, wall_id: Option<&str>) -> anyhow::Result<Breakdown> {
        let wall_id = self.wall_id_or_active(wall_id);
        let canvas = self.canvas(&wall_id)?;
        Ok(compute_breakdown(canvas.instances(), &self.catalog, self.tier))
    }

    pub fn estimate(&self, wall_id: Option<&str>) -> anyhow::Result<WallEstimate> {
        let wall_id = self.wall_id_or_active(wall_id);
        let canvas = self.canvas(&wall_id)?;
        let bounds = canvas.bounds();
        Ok(WallEstimate {
            wall_id: wall_id.clone(),
            wall_name: canvas.wall().name.clone(),
            width: bounds.width,
            height: bounds.height,
            tier: self.tier,
            summary: summarize_titles(canvas.instances()),
            breakdown: compute_breakdown(canvas.instances(), &self.catalog, self.tier),
        })
    }

    /// Estimates of every wall, in display order.
    pub fn estimate_all(&self) -> anyhow::Result<Vec<WallEstimate>> {
        self.project
            .walls()
            .map(|wall| self.estimate(Some(&wall.id)))
            .collect()
    }
}

fn instance_not_found(id: InstanceId) -> LayoutError {
    LayoutError::InstanceNotFound {
        instance_id: id.to_string(),
    }
}

fn answer_prompt(
    canvas: &mut WallCanvas,
    request: &PlaceRequest,
) -> anyhow::Result<Option<InstanceId>> {
    let mut events = Vec::new();
    match canvas.placement_state() {
        PlacementState::AwaitingSizeChoice(prompt) => {
            let index = request.size_index.unwrap_or(0);
            if index >= prompt.sizes.len() {
                let count = prompt.sizes.len();
                canvas.cancel_prompt();
                bail!("Size {} out of range, {} has {} sizes", index, request.module_type, count);
            }
            events.push(PlacementEvent::ChooseSize(index));
        }
        PlacementState::AwaitingLinearChoice(prompt) => {
            if let Some(height) = request.height {
                if !prompt.heights.contains(&height) {
                    let heights = prompt.heights.clone();
                    canvas.cancel_prompt();
                    bail!("Height {} not offered for {}: {:?}", height, request.module_type, heights);
                }
                events.push(PlacementEvent::ChooseHeight(height));
            }
            if let Some(length) = request.length {
                events.push(PlacementEvent::SetLength(length));
            }
            events.push(PlacementEvent::Confirm);
        }
        PlacementState::Idle | PlacementState::Committed(_) => return Ok(None),
    }

    let mut placed = None;
    for event in events {
        if let Some(outcome) = canvas.handle(event) {
            placed = outcome.placed_id();
        }
    }
    Ok(placed)
}
