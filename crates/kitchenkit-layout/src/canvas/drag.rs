//! Pointer drag-move of a placed instance.

use super::WallCanvas;
use crate::model::InstanceId;
use crate::viewport::ScreenPoint;

/// An in-progress drag of one instance.
///
/// Deltas are measured from the pointer position where the drag began, so a
/// rejected frame does not accumulate error: the next accepted frame lands
/// exactly under the pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pub id: InstanceId,
    pub origin: ScreenPoint,
    pub start_x: i32,
    pub start_y: i32,
}

impl WallCanvas {
    /// Starts dragging `id` from a pointer position and selects it.
    pub fn begin_drag(&mut self, id: InstanceId, pointer: ScreenPoint) -> bool {
        let Some(instance) = self.store.get(id) else {
            return false;
        };
        self.drag = Some(DragSession {
            id,
            origin: pointer,
            start_x: instance.x,
            start_y: instance.y,
        });
        self.selection_manager.select(&self.store, id);
        true
    }

    /// Moves the dragged instance under the pointer.
    ///
    /// Returns `false` when no drag is active or the frame was rejected; a
    /// rejected frame keeps the previous position.
    pub fn drag_to(&mut self, pointer: ScreenPoint) -> bool {
        let Some(session) = self.drag else {
            return false;
        };
        let (dx, dy) = self
            .viewport
            .delta_to_units(pointer.x - session.origin.x, pointer.y - session.origin.y);
        self.store.move_to(
            session.id,
            f64::from(session.start_x) + dx,
            f64::from(session.start_y) + dy,
        )
    }

    /// Ends the drag and returns the id that was dragged.
    pub fn end_drag(&mut self) -> Option<InstanceId> {
        self.drag.take().map(|s| s.id)
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }
}
