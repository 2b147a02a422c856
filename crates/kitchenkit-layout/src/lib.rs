//! # KitchenKit Layout
//!
//! The wall layout engine: places rectangular kitchen modules (cabinets,
//! appliances, linear trim) on independent wall canvases without overlap.
//!
//! ## Core Components
//!
//! - **Model**: module instances and their unit-grid rectangles
//! - **Viewport**: pointer ↔ unit-grid mapping under zoom, with fixed ruler gutters
//! - **Sanitizer**: clamps any proposed rectangle into the wall
//! - **Collision**: strict AABB overlap test
//! - **Instance Store**: the only mutation path for a wall's instances
//! - **Canvas**: one wall with its store, selection, viewport and drag session
//! - **Placement**: drop, click-to-place free-slot search and the prompt state machine
//! - **Project**: the walls of one kitchen and their persistence
//!
//! ## Architecture
//!
//! ```text
//! KitchenProject
//!   └── WallCanvas (one per wall)
//!         ├── InstanceStore ── sanitize ── collides
//!         ├── SelectionManager
//!         ├── WallViewport
//!         └── PlacementFlow (Idle | AwaitingSizeChoice | AwaitingLinearChoice | Committed)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use kitchenkit_layout::{DragPayload, Wall, WallCanvas};
//!
//! let mut canvas = WallCanvas::new(Wall::new("front", "Front wall", 4.0, 3.0));
//! let payload = DragPayload::new("bm2p", "Base 2 doors").with_size(120, 91);
//! let outcome = canvas.click_to_place(&payload);
//! assert!(outcome.is_committed());
//! assert_eq!(canvas.instances().len(), 1);
//! ```

pub mod canvas;
pub mod collision;
pub mod instance_store;
pub mod model;
pub mod payload;
pub mod placement;
pub mod project;
pub mod sanitize;
pub mod selection_manager;
pub mod serialization;
pub mod viewport;
pub mod wall;

pub use canvas::{DragSession, EditField, LayoutOptions, WallCanvas};
pub use collision::collides;
pub use instance_store::InstanceStore;
pub use model::{InstanceId, InstancePatch, ModuleInstance, ProposedRect, Rect};
pub use payload::{DragPayload, SizeResolution};
pub use placement::{
    ClickOutcome, DropOutcome, DropPoint, LinearPrompt, PendingDrop, PlacementEvent,
    PlacementFlow, PlacementState, Resolution, SizePrompt, SlotSearch,
};
pub use project::KitchenProject;
pub use sanitize::sanitize;
pub use selection_manager::SelectionManager;
pub use serialization::LayoutRecord;
pub use viewport::{RulerTick, ScreenPoint, WallViewport};
pub use wall::{KitchenType, Wall};
