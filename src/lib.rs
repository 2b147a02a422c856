//! # KitchenKit
//!
//! Kitchen wall elevation planner: catalog modules are placed on wall
//! canvases measured in centimeters, kept non-overlapping and inside the
//! wall, and priced live against a quality tier.
//!
//! ## Architecture
//!
//! KitchenKit is organized as a workspace with multiple crates:
//!
//! 1. **kitchenkit-core** - Errors, units, catalog model, quality tiers, storage
//! 2. **kitchenkit-layout** - Wall canvases, placement, selection, persistence
//! 3. **kitchenkit-pricing** - Cost breakdown and title summary
//! 4. **kitchenkit-settings** - Configuration files
//! 5. **kitchenkit** - Session façade and the command line binary

pub mod session;

pub use kitchenkit_layout as layout;
pub use kitchenkit_pricing as pricing;
pub use kitchenkit_settings as settings;

pub use kitchenkit_core::{
    Catalog, CatalogEntry, Error, JsonDirStore, KeyValueStore, MemoryStore, QualityTier, Result,
    SizeVariant, WallBounds,
};
pub use kitchenkit_layout::{
    DragPayload, InstanceId, KitchenProject, KitchenType, LayoutOptions, ModuleInstance, Wall,
    WallCanvas,
};
pub use kitchenkit_pricing::{compute_breakdown, summarize_titles, Breakdown, TitleSummary};
pub use kitchenkit_settings::Config;
pub use session::{PlaceRequest, Session, WallEstimate};

use anyhow::Context;
use kitchenkit_settings::LayoutSettings;
use std::path::Path;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Initialize logging
///
/// Sets up structured logging with:
/// - Output on stderr, leaving stdout to command results
/// - RUST_LOG environment variable support (default INFO)
/// - Pretty or JSON formatting
pub fn init_logging(format: LogFormat) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    match format {
        LogFormat::Pretty => {
            let fmt_layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_level(true)
                .with_line_number(true)
                .pretty();
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer)
                .try_init()?;
        }
        LogFormat::Json => {
            let fmt_layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .json();
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer)
                .try_init()?;
        }
    }

    Ok(())
}

/// Canvas options from the `[layout]` settings section.
pub fn layout_options(settings: &LayoutSettings) -> LayoutOptions {
    LayoutOptions {
        grid_step: settings.grid_step,
        label_step: settings.label_step,
        axis_margin: settings.axis_margin,
        bottom_margin: settings.bottom_margin,
        min_zoom: settings.min_zoom,
        max_zoom: settings.max_zoom,
        zoom_step: settings.zoom_step,
    }
}

/// Loads a catalog feed, or an empty catalog when no path is given.
pub fn load_catalog(path: Option<&Path>) -> anyhow::Result<Catalog> {
    match path {
        Some(path) => Catalog::load_from_file(path)
            .with_context(|| format!("Failed to load catalog {}", path.display())),
        None => {
            tracing::warn!("No catalog given, nothing will be priced");
            Ok(Catalog::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_options_from_settings() {
        let mut settings = LayoutSettings::default();
        assert_eq!(layout_options(&settings), LayoutOptions::default());

        settings.grid_step = 10;
        settings.max_zoom = 4.0;
        let options = layout_options(&settings);
        assert_eq!(options.grid_step, 10);
        assert_eq!(options.max_zoom, 4.0);
    }

    #[test]
    fn test_missing_catalog_file() {
        let err = load_catalog(Some(Path::new("/nonexistent/catalog.json"))).unwrap_err();
        assert!(err.to_string().contains("catalog.json"));
        assert!(load_catalog(None).unwrap().is_empty());
    }
}
