//! Persistence of walls, instances and the chosen quality tier.
//!
//! Everything is stored as JSON strings in a [`KeyValueStore`]:
//! - `kitchen.modules.<wallId>`: the wall's instance list
//! - `kitchen.layout.v1`: kitchen type, walls and active wall
//! - `kitchen.quality.v1`: the tier key, as a bare string
//!
//! Reading is forgiving: a value that does not decode is logged and treated
//! as absent, and individual bad records in an instance list are skipped.

use chrono::{DateTime, Utc};
use kitchenkit_core::{KeyValueStore, QualityTier, StorageError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::ModuleInstance;
use crate::wall::{KitchenType, Wall};

/// Key of the kitchen layout record.
pub const LAYOUT_KEY: &str = "kitchen.layout.v1";

/// Key of the selected quality tier.
pub const QUALITY_KEY: &str = "kitchen.quality.v1";

const MODULES_KEY_PREFIX: &str = "kitchen.modules.";
const DEFAULT_WALL_KEY: &str = "default";

/// Storage key of a wall's instance list.
pub fn modules_key(wall_id: &str) -> String {
    let id = wall_id.trim();
    if id.is_empty() {
        format!("{}{}", MODULES_KEY_PREFIX, DEFAULT_WALL_KEY)
    } else {
        format!("{}{}", MODULES_KEY_PREFIX, id)
    }
}

/// Persisted kitchen layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutRecord {
    #[serde(default)]
    pub kitchen_type: KitchenType,
    #[serde(default)]
    pub walls: Vec<Wall>,
    #[serde(default)]
    pub active_wall_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
}

impl LayoutRecord {
    /// Creates a record stamped with the current time.
    pub fn new(kitchen_type: KitchenType, walls: Vec<Wall>, active_wall_id: impl Into<String>) -> Self {
        Self {
            kitchen_type,
            walls,
            active_wall_id: active_wall_id.into(),
            saved_at: Some(Utc::now()),
        }
    }
}

/// Writes a wall's instance list.
pub fn save_instances<S: KeyValueStore>(
    store: &mut S,
    wall_id: &str,
    instances: &[ModuleInstance],
) -> Result<(), StorageError> {
    let key = modules_key(wall_id);
    store.set_json(&key, &instances)?;
    tracing::debug!("Saved {} modules under {}", instances.len(), key);
    Ok(())
}

/// Reads a wall's instance list; missing or unreadable lists are empty.
pub fn load_instances<S: KeyValueStore>(
    store: &S,
    wall_id: &str,
) -> Result<Vec<ModuleInstance>, StorageError> {
    let key = modules_key(wall_id);
    let values = match store.get_json::<Vec<Value>>(&key) {
        Ok(Some(values)) => values,
        Ok(None) => return Ok(Vec::new()),
        Err(StorageError::Corrupted { reason, .. }) => {
            tracing::warn!("Ignoring unreadable module list {}: {}", key, reason);
            return Ok(Vec::new());
        }
        Err(e) => return Err(e),
    };

    let total = values.len();
    let instances: Vec<ModuleInstance> = values
        .into_iter()
        .filter_map(|v| match serde_json::from_value(v) {
            Ok(instance) => Some(instance),
            Err(e) => {
                tracing::warn!("Skipping stored module in {}: {}", key, e);
                None
            }
        })
        .collect();
    tracing::debug!("Loaded {}/{} modules from {}", instances.len(), total, key);
    Ok(instances)
}

pub fn save_layout<S: KeyValueStore>(store: &mut S, record: &LayoutRecord) -> Result<(), StorageError> {
    store.set_json(LAYOUT_KEY, record)
}

/// Reads the layout record; an unreadable record counts as absent.
pub fn load_layout<S: KeyValueStore>(store: &S) -> Result<Option<LayoutRecord>, StorageError> {
    match store.get_json::<LayoutRecord>(LAYOUT_KEY) {
        Err(StorageError::Corrupted { reason, .. }) => {
            tracing::warn!("Ignoring unreadable layout record: {}", reason);
            Ok(None)
        }
        other => other,
    }
}

pub fn save_quality<S: KeyValueStore>(store: &mut S, tier: QualityTier) -> Result<(), StorageError> {
    store.set(QUALITY_KEY, tier.key())
}

/// Reads the stored tier. Unknown keys price as `Started`.
pub fn load_quality<S: KeyValueStore>(store: &S) -> Result<Option<QualityTier>, StorageError> {
    Ok(store
        .get(QUALITY_KEY)?
        .map(|raw| QualityTier::from_key_lenient(raw.trim().trim_matches('"'))))
}
