//! Object storage for one canvas.

use crate::objects::{AurObject, ObjectId, Stroke};
use serde::{Deserialize, Serialize};

/// All objects on the canvas, in insertion order (back to front).
///
/// Lookups are linear scans; hand-drawn canvases stay small.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AurchiveState {
    objects: Vec<AurObject>,
}

impl AurchiveState {
    /// Create an empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object on top of the others. Returns its id.
    pub fn add_object(&mut self, object: impl Into<AurObject>) -> ObjectId {
        let object = object.into();
        let id = object.id();
        self.objects.push(object);
        id
    }

    /// Get an object by ID.
    pub fn get(&self, id: ObjectId) -> Option<&AurObject> {
        self.objects.iter().find(|object| object.id() == id)
    }

    /// Get a mutable object by ID.
    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut AurObject> {
        self.objects.iter_mut().find(|object| object.id() == id)
    }

    /// Get a stroke by ID. `None` if missing or not a stroke.
    pub fn stroke(&self, id: ObjectId) -> Option<&Stroke> {
        self.get(id).and_then(AurObject::as_stroke)
    }

    pub fn stroke_mut(&mut self, id: ObjectId) -> Option<&mut Stroke> {
        self.get_mut(id).and_then(AurObject::as_stroke_mut)
    }

    pub fn objects(&self) -> &[AurObject] {
        &self.objects
    }

    /// The most recently added object.
    pub fn last(&self) -> Option<&AurObject> {
        self.objects.last()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objects::{FileObject, StrokeStyle};
    use kurbo::Point;
    use uuid::Uuid;

    #[test]
    fn test_add_and_get() {
        let mut state = AurchiveState::new();
        let id = state.add_object(Stroke::new(Point::new(1.0, 1.0), StrokeStyle::default()));

        assert_eq!(state.len(), 1);
        assert_eq!(state.get(id).map(AurObject::id), Some(id));
        assert!(state.stroke(id).is_some());
    }

    #[test]
    fn test_unknown_id_is_none() {
        let mut state = AurchiveState::new();
        state.add_object(Stroke::new(Point::ZERO, StrokeStyle::default()));

        let missing = Uuid::new_v4();
        assert!(state.get(missing).is_none());
        assert!(state.get_mut(missing).is_none());
        assert!(state.stroke_mut(missing).is_none());
    }

    #[test]
    fn test_insertion_order() {
        let mut state = AurchiveState::new();
        let first = state.add_object(Stroke::new(Point::ZERO, StrokeStyle::default()));
        let second = state.add_object(FileObject::new(Point::ZERO, "a.png", "image/png"));
        let third = state.add_object(Stroke::new(Point::ZERO, StrokeStyle::default()));

        let ids: Vec<ObjectId> = state.objects().iter().map(AurObject::id).collect();
        assert_eq!(ids, vec![first, second, third]);
        assert_eq!(state.last().map(AurObject::id), Some(third));
    }

    #[test]
    fn test_stroke_lookup_skips_other_kinds() {
        let mut state = AurchiveState::new();
        let file = state.add_object(FileObject::new(Point::ZERO, "a.png", "image/png"));
        assert!(state.get(file).is_some());
        assert!(state.stroke(file).is_none());
    }

    #[test]
    fn test_mutate_through_lookup() {
        let mut state = AurchiveState::new();
        let id = state.add_object(Stroke::new(Point::ZERO, StrokeStyle::default()));

        if let Some(stroke) = state.stroke_mut(id) {
            stroke.add_point(Point::new(4.0, 4.0));
        }
        assert_eq!(state.stroke(id).map(Stroke::len), Some(2));
    }
}
