//! Prompt state machine of the placement flow.
//!
//! ```text
//! Idle ──drop/click──▶ AwaitingSizeChoice ──choose/confirm──▶ Committed
//!   │                  AwaitingLinearChoice ──confirm───────▶ Committed
//!   └──────────────── (size known) ─────────────────────────▶ Committed
//! any prompt ──cancel──▶ Idle
//! ```
//!
//! A new drop or click while a prompt is open replaces the prompt. Events
//! that do not apply to the current state are ignored.

use super::{
    finalize_drop, find_free_slot, resolve, DropOutcome, DropPoint, LinearPrompt, Resolution,
    SizePrompt,
};
use crate::instance_store::InstanceStore;
use crate::payload::DragPayload;
use crate::viewport::{ScreenPoint, WallViewport};

/// Current step of the placement flow.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PlacementState {
    #[default]
    Idle,
    AwaitingSizeChoice(SizePrompt),
    AwaitingLinearChoice(LinearPrompt),
    /// The last drop finished; behaves like `Idle` for new input.
    Committed(DropOutcome),
}

/// Input to the placement flow.
#[derive(Debug, Clone, PartialEq)]
pub enum PlacementEvent {
    /// Palette item released over the canvas.
    Drop {
        payload: DragPayload,
        at: ScreenPoint,
    },
    /// Palette item clicked: place at the first free slot.
    Click { payload: DragPayload },
    /// Pick a size variant by index; commits immediately.
    ChooseSize(usize),
    /// Edit the length field of the linear prompt.
    SetLength(f64),
    /// Pick one of the offered linear heights.
    ChooseHeight(i32),
    /// Confirm the open prompt (the first variant for a size prompt).
    Confirm,
    /// Cancel button or Escape key.
    Cancel,
}

/// Drives drops and clicks through the optional prompts.
#[derive(Debug, Clone, Default)]
pub struct PlacementFlow {
    state: PlacementState,
}

impl PlacementFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &PlacementState {
        &self.state
    }

    /// True while a size or linear prompt waits for the user.
    pub fn is_prompting(&self) -> bool {
        matches!(
            self.state,
            PlacementState::AwaitingSizeChoice(_) | PlacementState::AwaitingLinearChoice(_)
        )
    }

    /// Applies one event. Returns the outcome when a drop was committed.
    pub fn handle(
        &mut self,
        event: PlacementEvent,
        store: &mut InstanceStore,
        viewport: &WallViewport,
        grid_step: i32,
    ) -> Option<DropOutcome> {
        let state = std::mem::take(&mut self.state);
        let (next, outcome) = match (state, event) {
            (_, PlacementEvent::Drop { payload, at }) => {
                begin(payload, viewport.pointer_to_drop(at), store)
            }
            (_, PlacementEvent::Click { payload }) => {
                let (width, height) = payload.initial_size();
                let slot = find_free_slot(store, width, height, grid_step);
                begin(payload, slot.point(), store)
            }
            (PlacementState::AwaitingSizeChoice(prompt), PlacementEvent::ChooseSize(index)) => {
                commit_size(prompt, index, store)
            }
            (PlacementState::AwaitingSizeChoice(prompt), PlacementEvent::Confirm) => {
                commit_size(prompt, 0, store)
            }
            (PlacementState::AwaitingLinearChoice(mut prompt), PlacementEvent::SetLength(value)) => {
                prompt.set_length(value);
                (PlacementState::AwaitingLinearChoice(prompt), None)
            }
            (PlacementState::AwaitingLinearChoice(mut prompt), PlacementEvent::ChooseHeight(h)) => {
                prompt.choose_height(h);
                (PlacementState::AwaitingLinearChoice(prompt), None)
            }
            (PlacementState::AwaitingLinearChoice(prompt), PlacementEvent::Confirm) => {
                let pending = &prompt.pending;
                let outcome =
                    finalize_drop(store, &pending.payload, pending.at, prompt.length, prompt.height);
                committed(outcome)
            }
            (_, PlacementEvent::Cancel) => (PlacementState::Idle, None),
            (state, _) => (state, None),
        };
        self.state = next;
        outcome
    }

    /// Drops any open prompt without side effects.
    pub fn cancel(&mut self) {
        self.state = PlacementState::Idle;
    }
}

fn begin(
    payload: DragPayload,
    at: DropPoint,
    store: &mut InstanceStore,
) -> (PlacementState, Option<DropOutcome>) {
    match resolve(payload, at) {
        Resolution::Ready {
            pending,
            width,
            height,
        } => committed(finalize_drop(store, &pending.payload, pending.at, width, height)),
        Resolution::AskSize(prompt) => (PlacementState::AwaitingSizeChoice(prompt), None),
        Resolution::AskLinear(prompt) => (PlacementState::AwaitingLinearChoice(prompt), None),
    }
}

fn commit_size(
    prompt: SizePrompt,
    index: usize,
    store: &mut InstanceStore,
) -> (PlacementState, Option<DropOutcome>) {
    let Some(size) = prompt.sizes.get(index).cloned() else {
        return (PlacementState::AwaitingSizeChoice(prompt), None);
    };
    let pending = &prompt.pending;
    committed(finalize_drop(
        store,
        &pending.payload,
        pending.at,
        size.width,
        size.height,
    ))
}

fn committed(outcome: DropOutcome) -> (PlacementState, Option<DropOutcome>) {
    (PlacementState::Committed(outcome), Some(outcome))
}

#[cfg(test)]
mod tests {
    use super::*;
    use kitchenkit_core::{SizeVariant, WallBounds};

    struct Harness {
        flow: PlacementFlow,
        store: InstanceStore,
        viewport: WallViewport,
    }

    impl Harness {
        fn new() -> Self {
            let bounds = WallBounds::new(400, 300);
            Self {
                flow: PlacementFlow::new(),
                store: InstanceStore::new(bounds),
                viewport: WallViewport::new(bounds),
            }
        }

        fn send(&mut self, event: PlacementEvent) -> Option<DropOutcome> {
            self.flow.handle(event, &mut self.store, &self.viewport, 25)
        }
    }

    fn two_sizes() -> DragPayload {
        DragPayload::new("bm", "Base")
            .with_variant(SizeVariant::new(60, 60))
            .with_variant(SizeVariant::new(80, 60).with_delta_pct(10.0))
    }

    #[test]
    fn test_direct_drop_commits() {
        let mut h = Harness::new();
        let outcome = h.send(PlacementEvent::Drop {
            payload: DragPayload::new("bm", "Base").with_size(120, 90),
            at: ScreenPoint::new(100.0, 160.0),
        });
        assert!(matches!(outcome, Some(DropOutcome::Placed(_))));
        assert!(matches!(h.flow.state(), PlacementState::Committed(_)));
    }

    #[test]
    fn test_size_prompt_then_choice() {
        let mut h = Harness::new();
        assert_eq!(
            h.send(PlacementEvent::Drop {
                payload: two_sizes(),
                at: ScreenPoint::new(50.0, 240.0),
            }),
            None
        );
        assert!(h.flow.is_prompting());
        assert!(h.store.is_empty());

        // out of range index keeps the prompt open
        assert_eq!(h.send(PlacementEvent::ChooseSize(5)), None);
        assert!(h.flow.is_prompting());

        let id = h
            .send(PlacementEvent::ChooseSize(1))
            .and_then(|o| o.placed_id())
            .unwrap();
        let placed = h.store.get(id).unwrap();
        assert_eq!((placed.width, placed.height), (80, 60));
        assert_eq!(placed.price_delta_pct, Some(10.0));
    }

    #[test]
    fn test_cancel_has_no_side_effects() {
        let mut h = Harness::new();
        h.send(PlacementEvent::Click {
            payload: DragPayload::new("zocalo", "Plinth"),
        });
        assert!(matches!(
            h.flow.state(),
            PlacementState::AwaitingLinearChoice(_)
        ));
        h.send(PlacementEvent::SetLength(200.0));
        assert_eq!(h.send(PlacementEvent::Cancel), None);
        assert_eq!(h.flow.state(), &PlacementState::Idle);
        assert!(h.store.is_empty());
    }

    #[test]
    fn test_linear_confirm() {
        let mut h = Harness::new();
        h.send(PlacementEvent::Click {
            payload: DragPayload::new("zocalo", "Plinth").linear(vec![10, 15]),
        });
        h.send(PlacementEvent::SetLength(240.0));
        h.send(PlacementEvent::ChooseHeight(13));
        h.send(PlacementEvent::ChooseHeight(15));
        let id = h
            .send(PlacementEvent::Confirm)
            .and_then(|o| o.placed_id())
            .unwrap();
        let placed = h.store.get(id).unwrap();
        assert_eq!((placed.x, placed.y, placed.width, placed.height), (0, 0, 240, 15));
    }

    #[test]
    fn test_new_drop_replaces_prompt() {
        let mut h = Harness::new();
        h.send(PlacementEvent::Click { payload: two_sizes() });
        assert!(h.flow.is_prompting());
        let outcome = h.send(PlacementEvent::Click {
            payload: DragPayload::new("fridge", "Fridge").with_size(60, 180),
        });
        assert!(matches!(outcome, Some(DropOutcome::Placed(_))));
        assert!(!h.flow.is_prompting());
        assert_eq!(h.store.len(), 1);
    }

    #[test]
    fn test_events_ignored_when_idle() {
        let mut h = Harness::new();
        assert_eq!(h.send(PlacementEvent::Confirm), None);
        assert_eq!(h.send(PlacementEvent::ChooseSize(0)), None);
        assert_eq!(h.send(PlacementEvent::SetLength(50.0)), None);
        assert_eq!(h.flow.state(), &PlacementState::Idle);
    }
}
