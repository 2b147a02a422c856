//! Placement engine: turning a payload plus a position into an instance.
//!
//! Three ways in:
//! - a palette drop at a pointer position ([`resolve`] then [`finalize_drop`])
//! - a click on a palette entry, which searches a free slot first ([`find_free_slot`])
//! - a size or linear prompt confirmed through the [`PlacementFlow`] state machine
//!
//! Positions here are [`DropPoint`]s: unit-grid x plus the distance of the
//! module's top edge below the top of the wall, as a pointer reports them.

mod state;

pub use state::{PlacementEvent, PlacementFlow, PlacementState};

use kitchenkit_core::constants::MIN_MODULE_DIMENSION;
use kitchenkit_core::SizeVariant;

use crate::instance_store::InstanceStore;
use crate::model::{InstanceId, ModuleInstance, ProposedRect, Rect};
use crate::payload::{DragPayload, SizeResolution};
use crate::sanitize::{round_half_up, sanitize};

/// Top-left corner of a module in screen orientation, on the unit grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DropPoint {
    pub x: i32,
    /// Distance of the top edge below the top of the wall.
    pub top_y: i32,
}

impl DropPoint {
    pub fn new(x: i32, top_y: i32) -> Self {
        Self { x, top_y }
    }
}

/// Result of committing a drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    Placed(InstanceId),
    /// The sanitized rectangle overlapped an existing module; nothing changed.
    Rejected,
}

impl DropOutcome {
    pub fn placed_id(&self) -> Option<InstanceId> {
        match self {
            Self::Placed(id) => Some(*id),
            Self::Rejected => None,
        }
    }
}

/// Result of a drop or click as seen by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The size was known and the drop was committed (or rejected).
    Committed(DropOutcome),
    /// A size or linear prompt is now open.
    Prompted,
    /// The payload could not be used.
    Ignored,
}

impl ClickOutcome {
    /// True if a new instance was placed.
    pub fn is_committed(&self) -> bool {
        matches!(self, Self::Committed(DropOutcome::Placed(_)))
    }

    pub fn placed_id(&self) -> Option<InstanceId> {
        match self {
            Self::Committed(outcome) => outcome.placed_id(),
            _ => None,
        }
    }
}

/// Outcome of a free-slot search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotSearch {
    /// A position where the module fits without overlap.
    Free(DropPoint),
    /// Every grid position was taken; floor-left, which may overlap.
    Fallback(DropPoint),
}

impl SlotSearch {
    pub fn point(&self) -> DropPoint {
        match self {
            Self::Free(p) | Self::Fallback(p) => *p,
        }
    }

    pub fn is_free(&self) -> bool {
        matches!(self, Self::Free(_))
    }
}

/// A drop whose size is still being chosen.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingDrop {
    pub payload: DragPayload,
    pub at: DropPoint,
}

/// Open size picker for a payload with several variants.
#[derive(Debug, Clone, PartialEq)]
pub struct SizePrompt {
    pub pending: PendingDrop,
    pub sizes: Vec<SizeVariant>,
}

/// Open length/height picker for a linear payload.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearPrompt {
    pub pending: PendingDrop,
    pub length: i32,
    pub height: i32,
    pub heights: Vec<i32>,
}

impl LinearPrompt {
    /// Sets the length, rounded and at least the minimum dimension.
    pub fn set_length(&mut self, value: f64) {
        self.length = round_half_up(value).max(MIN_MODULE_DIMENSION);
    }

    /// Picks one of the offered heights. Other values are ignored.
    pub fn choose_height(&mut self, height: i32) -> bool {
        if self.heights.contains(&height) {
            self.height = height;
            true
        } else {
            false
        }
    }
}

/// What a drop resolves to before anything is committed.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Ready {
        pending: PendingDrop,
        width: i32,
        height: i32,
    },
    AskSize(SizePrompt),
    AskLinear(LinearPrompt),
}

/// Decides whether a drop can be committed directly or needs a prompt.
pub fn resolve(payload: DragPayload, at: DropPoint) -> Resolution {
    match payload.size_resolution() {
        SizeResolution::Direct { width, height, .. } => Resolution::Ready {
            pending: PendingDrop { payload, at },
            width,
            height,
        },
        SizeResolution::Choose(sizes) => Resolution::AskSize(SizePrompt {
            pending: PendingDrop { payload, at },
            sizes,
        }),
        SizeResolution::Linear { length, heights } => {
            let height = payload.default_linear_height();
            Resolution::AskLinear(LinearPrompt {
                pending: PendingDrop { payload, at },
                length,
                height,
                heights,
            })
        }
    }
}

/// Commits a drop of `width` x `height` at `at`.
///
/// The price delta comes from the payload's variant of exactly this size
/// (0 otherwise). The rectangle is sanitized and committed only if it does
/// not overlap; an overlap is a silent no-op.
pub fn finalize_drop(
    store: &mut InstanceStore,
    payload: &DragPayload,
    at: DropPoint,
    width: i32,
    height: i32,
) -> DropOutcome {
    let bounds = store.bounds();
    let proposed = ProposedRect::new(
        f64::from(at.x),
        f64::from(bounds.height.saturating_sub(at.top_y).saturating_sub(height)),
        f64::from(width),
        f64::from(height),
    );
    let rect = sanitize(proposed, bounds);

    let mut instance = ModuleInstance::new(payload.module_type.clone(), payload.resolved_title(), rect)
        .with_delta_pct(payload.delta_pct_for(width, height));
    instance.src = payload.src.clone();
    instance.color = payload.color.clone();

    match store.add(instance) {
        Some(id) => DropOutcome::Placed(id),
        None => DropOutcome::Rejected,
    }
}

/// Finds the first free position for a `width` x `height` module.
///
/// Scans rows from the floor upward and, within a row, left to right, in
/// `step` units. Each candidate is sanitized before the overlap test, so the
/// result is always inside the wall. When nothing fits the floor-left corner
/// is returned as [`SlotSearch::Fallback`].
pub fn find_free_slot(store: &InstanceStore, width: i32, height: i32, step: i32) -> SlotSearch {
    let bounds = store.bounds();
    let step = step.max(1) as usize;
    let proposed = |x: i32, top_y: i32| {
        ProposedRect::new(
            f64::from(x),
            f64::from(bounds.height - top_y - height),
            f64::from(width),
            f64::from(height),
        )
    };

    let top_rows = (0..=(bounds.height - height).max(-1)).rev().step_by(step);
    for top_y in top_rows {
        for x in (0..=(bounds.width - width)).step_by(step) {
            let rect: Rect = sanitize(proposed(x, top_y), bounds);
            if !store.would_collide(&rect, None) {
                return SlotSearch::Free(DropPoint::new(rect.x, bounds.height - rect.y - rect.height));
            }
        }
    }

    tracing::debug!("No free slot for {}x{} on {}", width, height, bounds);
    SlotSearch::Fallback(DropPoint::new(0, (bounds.height - height).max(0)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use kitchenkit_core::WallBounds;

    fn store() -> InstanceStore {
        InstanceStore::new(WallBounds::new(400, 300))
    }

    #[test]
    fn test_finalize_flips_y() {
        let mut s = store();
        let payload = DragPayload::new("bm", "Base");
        let outcome = finalize_drop(&mut s, &payload, DropPoint::new(50, 160), 120, 90);
        let id = outcome.placed_id().unwrap();
        assert_eq!(s.get(id).unwrap().rect(), Rect::new(50, 50, 120, 90));
    }

    #[test]
    fn test_finalize_records_delta() {
        let mut s = store();
        let payload = DragPayload::new("bm", "Base")
            .with_variant(SizeVariant::new(60, 60))
            .with_variant(SizeVariant::new(80, 60).with_delta_pct(10.0));
        let id = finalize_drop(&mut s, &payload, DropPoint::new(0, 240), 80, 60)
            .placed_id()
            .unwrap();
        assert_eq!(s.get(id).unwrap().price_delta_pct, Some(10.0));
    }

    #[test]
    fn test_finalize_clamps_far_drop_point() {
        let mut s = store();
        let payload = DragPayload::new("bm", "Base");
        let id = finalize_drop(&mut s, &payload, DropPoint::new(i32::MAX, i32::MIN), 120, 90)
            .placed_id()
            .unwrap();
        assert_eq!(s.get(id).unwrap().rect(), Rect::new(280, 210, 120, 90));

        let id = finalize_drop(&mut s, &payload, DropPoint::new(i32::MIN, i32::MAX), 120, 90)
            .placed_id()
            .unwrap();
        assert_eq!(s.get(id).unwrap().rect(), Rect::new(0, 0, 120, 90));
    }

    #[test]
    fn test_finalize_rejects_overlap() {
        let mut s = store();
        let payload = DragPayload::new("bm", "Base");
        finalize_drop(&mut s, &payload, DropPoint::new(0, 210), 60, 90);
        let outcome = finalize_drop(&mut s, &payload, DropPoint::new(30, 210), 60, 90);
        assert_eq!(outcome, DropOutcome::Rejected);
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn test_free_slot_on_empty_wall_is_floor_left() {
        let s = store();
        let slot = find_free_slot(&s, 60, 90, 25);
        assert_eq!(slot, SlotSearch::Free(DropPoint::new(0, 210)));
    }

    #[test]
    fn test_free_slot_skips_taken_cells() {
        let mut s = store();
        s.add(ModuleInstance::new("bm", "A", Rect::new(0, 0, 60, 90)));
        let slot = find_free_slot(&s, 60, 90, 25);
        assert_eq!(slot, SlotSearch::Free(DropPoint::new(75, 210)));
    }

    #[test]
    fn test_free_slot_fallback_when_full() {
        let mut s = InstanceStore::new(WallBounds::new(100, 100));
        s.add(ModuleInstance::new("bm", "A", Rect::new(0, 0, 100, 100)));
        let slot = find_free_slot(&s, 60, 60, 25);
        assert_eq!(slot, SlotSearch::Fallback(DropPoint::new(0, 40)));
        assert!(!slot.is_free());
    }

    #[test]
    fn test_free_slot_oversized_module() {
        let s = InstanceStore::new(WallBounds::new(100, 100));
        let slot = find_free_slot(&s, 150, 150, 25);
        assert_eq!(slot, SlotSearch::Fallback(DropPoint::new(0, 0)));
    }

    #[test]
    fn test_resolve_variants() {
        let at = DropPoint::new(10, 10);
        let bare = DragPayload::new("bm", "Base").with_size(120, 91);
        assert!(matches!(
            resolve(bare, at),
            Resolution::Ready { width: 120, height: 91, .. }
        ));

        let many = DragPayload::new("bm", "Base")
            .with_variant(SizeVariant::new(60, 60))
            .with_variant(SizeVariant::new(80, 60));
        assert!(matches!(resolve(many, at), Resolution::AskSize(p) if p.sizes.len() == 2));

        let linear = DragPayload::new("zocalo", "Plinth").linear(vec![12, 15]);
        match resolve(linear, at) {
            Resolution::AskLinear(p) => {
                assert_eq!((p.length, p.height), (80, 12));
                assert_eq!(p.heights, vec![12, 15]);
            }
            other => panic!("expected linear prompt, got {:?}", other),
        }
    }

    #[test]
    fn test_linear_prompt_edits() {
        let mut prompt = match resolve(DragPayload::new("zocalo", "Plinth"), DropPoint::default()) {
            Resolution::AskLinear(p) => p,
            other => panic!("expected linear prompt, got {:?}", other),
        };
        prompt.set_length(3.4);
        assert_eq!(prompt.length, 10);
        prompt.set_length(f64::NAN);
        assert_eq!(prompt.length, 10);
        prompt.set_length(245.5);
        assert_eq!(prompt.length, 246);
        assert!(!prompt.choose_height(11));
        assert!(prompt.choose_height(15));
        assert_eq!(prompt.height, 15);
    }
}
