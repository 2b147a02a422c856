//! Overlap test of a candidate rectangle against a wall's instances.

use crate::model::{InstanceId, ModuleInstance, Rect};

/// True if `candidate` strictly overlaps any instance other than `ignore`.
///
/// Edges that only touch do not count as overlap.
pub fn collides<'a, I>(candidate: &Rect, instances: I, ignore: Option<InstanceId>) -> bool
where
    I: IntoIterator<Item = &'a ModuleInstance>,
{
    instances
        .into_iter()
        .filter(|m| Some(m.id) != ignore)
        .any(|m| candidate.overlaps(&m.rect()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_detected() {
        let a = ModuleInstance::new("bm", "A", Rect::new(0, 0, 60, 90));
        let candidate = Rect::new(30, 0, 60, 90);
        assert!(collides(&candidate, [&a], None));
    }

    #[test]
    fn test_touching_is_allowed() {
        let a = ModuleInstance::new("bm", "A", Rect::new(0, 0, 60, 90));
        let beside = Rect::new(60, 0, 60, 90);
        let above = Rect::new(0, 90, 60, 60);
        assert!(!collides(&beside, [&a], None));
        assert!(!collides(&above, [&a], None));
    }

    #[test]
    fn test_ignore_self() {
        let a = ModuleInstance::new("bm", "A", Rect::new(0, 0, 60, 90));
        let moved = Rect::new(10, 0, 60, 90);
        assert!(collides(&moved, [&a], None));
        assert!(!collides(&moved, [&a], Some(a.id)));
    }

    #[test]
    fn test_empty_wall() {
        let none: Vec<ModuleInstance> = Vec::new();
        assert!(!collides(&Rect::new(0, 0, 10, 10), &none, None));
    }
}
