//! Objects placed on the canvas.
//!
//! [`AurObject`] is a closed set of object kinds. Fields are changed through
//! typed setters on each kind.

use crate::smooth::{PathCommands, smooth};
use kurbo::{Point, Rect};
use peniko::Color;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for canvas objects.
pub type ObjectId = Uuid;

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    /// `#rrggbb` form, ignoring alpha.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Alpha as a fraction in `0.0..=1.0`.
    pub fn opacity(&self) -> f64 {
        f64::from(self.a) / 255.0
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Presentation of a stroke. Only the rendering collaborator reads this.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrokeStyle {
    pub stroke_color: SerializableColor,
    pub stroke_width: f64,
    /// Fill color (None = no fill).
    pub fill: Option<SerializableColor>,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            stroke_color: SerializableColor::black(),
            stroke_width: 8.0,
            fill: None,
        }
    }
}

impl StrokeStyle {
    pub fn stroke(&self) -> Color {
        self.stroke_color.into()
    }

    pub fn fill(&self) -> Option<Color> {
        self.fill.map(Color::from)
    }
}

/// One continuous freehand stroke in logical coordinates.
///
/// Points are append-only while the stroke is being drawn and frozen
/// afterwards. A stroke always holds at least its seed point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    id: ObjectId,
    coordinates: Point,
    points: Vec<Point>,
    width: Option<f64>,
    height: Option<f64>,
    closed: bool,
    frozen: bool,
    style: StrokeStyle,
}

impl Stroke {
    /// Start a stroke at `origin`.
    pub fn new(origin: Point, style: StrokeStyle) -> Self {
        Self {
            id: Uuid::new_v4(),
            coordinates: origin,
            points: vec![origin],
            width: None,
            height: None,
            closed: false,
            frozen: false,
            style,
        }
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// Where the stroke began. Stays put even if points are later edited.
    pub fn coordinates(&self) -> Point {
        self.coordinates
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false; a stroke keeps its seed point.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn style(&self) -> &StrokeStyle {
        &self.style
    }

    pub fn size(&self) -> (Option<f64>, Option<f64>) {
        (self.width, self.height)
    }

    /// Append a point. Returns false if the stroke is frozen.
    pub fn add_point(&mut self, point: Point) -> bool {
        if self.frozen {
            return false;
        }
        self.points.push(point);
        true
    }

    /// Stop accepting points.
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    /// The smoothed path through the current points.
    pub fn path(&self) -> PathCommands {
        smooth(&self.points, self.closed)
    }

    /// Axis-aligned bounds of the sampled points.
    pub fn bounds(&self) -> Rect {
        let mut min_x = f64::INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut max_y = f64::NEG_INFINITY;

        for point in &self.points {
            min_x = min_x.min(point.x);
            min_y = min_y.min(point.y);
            max_x = max_x.max(point.x);
            max_y = max_y.max(point.y);
        }

        Rect::new(min_x, min_y, max_x, max_y)
    }

    pub fn set_coordinates(&mut self, coordinates: Point) {
        self.coordinates = coordinates;
    }

    pub fn set_size(&mut self, width: Option<f64>, height: Option<f64>) {
        self.width = width;
        self.height = height;
    }

    pub fn set_closed(&mut self, closed: bool) {
        self.closed = closed;
    }

    pub fn set_stroke_color(&mut self, color: Color) {
        self.style.stroke_color = color.into();
    }

    pub fn set_stroke_width(&mut self, width: f64) {
        self.style.stroke_width = width;
    }

    pub fn set_fill(&mut self, color: Option<Color>) {
        self.style.fill = color.map(SerializableColor::from);
    }
}

/// A file dropped onto the canvas.
///
/// Placement only; importing and rendering file contents is left to the
/// host application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileObject {
    id: ObjectId,
    coordinates: Point,
    width: Option<f64>,
    height: Option<f64>,
    pub file_name: String,
    pub media_type: String,
}

impl FileObject {
    pub fn new(coordinates: Point, file_name: impl Into<String>, media_type: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            coordinates,
            width: None,
            height: None,
            file_name: file_name.into(),
            media_type: media_type.into(),
        }
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn coordinates(&self) -> Point {
        self.coordinates
    }

    pub fn size(&self) -> (Option<f64>, Option<f64>) {
        (self.width, self.height)
    }

    pub fn set_coordinates(&mut self, coordinates: Point) {
        self.coordinates = coordinates;
    }

    pub fn set_size(&mut self, width: Option<f64>, height: Option<f64>) {
        self.width = width;
        self.height = height;
    }
}

/// Every kind of object the canvas can hold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AurObject {
    Stroke(Stroke),
    File(FileObject),
}

impl AurObject {
    pub fn id(&self) -> ObjectId {
        match self {
            AurObject::Stroke(stroke) => stroke.id(),
            AurObject::File(file) => file.id(),
        }
    }

    pub fn coordinates(&self) -> Point {
        match self {
            AurObject::Stroke(stroke) => stroke.coordinates(),
            AurObject::File(file) => file.coordinates(),
        }
    }

    pub fn set_coordinates(&mut self, coordinates: Point) {
        match self {
            AurObject::Stroke(stroke) => stroke.set_coordinates(coordinates),
            AurObject::File(file) => file.set_coordinates(coordinates),
        }
    }

    pub fn as_stroke(&self) -> Option<&Stroke> {
        match self {
            AurObject::Stroke(stroke) => Some(stroke),
            AurObject::File(_) => None,
        }
    }

    pub fn as_stroke_mut(&mut self) -> Option<&mut Stroke> {
        match self {
            AurObject::Stroke(stroke) => Some(stroke),
            AurObject::File(_) => None,
        }
    }
}

impl From<Stroke> for AurObject {
    fn from(stroke: Stroke) -> Self {
        AurObject::Stroke(stroke)
    }
}

impl From<FileObject> for AurObject {
    fn from(file: FileObject) -> Self {
        AurObject::File(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stroke_is_seeded() {
        let stroke = Stroke::new(Point::new(3.0, 4.0), StrokeStyle::default());
        assert_eq!(stroke.len(), 1);
        assert!(!stroke.is_empty());
        assert_eq!(stroke.points()[0], stroke.coordinates());
        assert!(!stroke.is_frozen());
    }

    #[test]
    fn test_add_points() {
        let mut stroke = Stroke::new(Point::ZERO, StrokeStyle::default());
        assert!(stroke.add_point(Point::new(10.0, 10.0)));
        assert!(stroke.add_point(Point::new(20.0, 5.0)));
        assert_eq!(stroke.len(), 3);
    }

    #[test]
    fn test_frozen_stroke_rejects_points() {
        let mut stroke = Stroke::new(Point::ZERO, StrokeStyle::default());
        stroke.add_point(Point::new(1.0, 1.0));
        stroke.freeze();
        assert!(!stroke.add_point(Point::new(2.0, 2.0)));
        assert_eq!(stroke.len(), 2);
    }

    #[test]
    fn test_bounds() {
        let mut stroke = Stroke::new(Point::new(0.0, 0.0), StrokeStyle::default());
        stroke.add_point(Point::new(100.0, 50.0));
        stroke.add_point(Point::new(50.0, 100.0));

        let bounds = stroke.bounds();
        assert!((bounds.x0).abs() < f64::EPSILON);
        assert!((bounds.y0).abs() < f64::EPSILON);
        assert!((bounds.x1 - 100.0).abs() < f64::EPSILON);
        assert!((bounds.y1 - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_path_follows_closed_flag() {
        let mut stroke = Stroke::new(Point::new(0.0, 0.0), StrokeStyle::default());
        stroke.add_point(Point::new(10.0, 0.0));
        stroke.add_point(Point::new(10.0, 10.0));
        assert_eq!(stroke.path().to_string(), "M0, 0 Q10, 0 10, 5 L10, 10 ");

        stroke.set_closed(true);
        assert_eq!(stroke.path().to_string(), "M5, 0 Q10, 0 10, 5 T5, 5 5, 0 Z");
    }

    #[test]
    fn test_typed_setters() {
        let mut stroke = Stroke::new(Point::ZERO, StrokeStyle::default());
        stroke.set_stroke_color(Color::from_rgba8(255, 0, 0, 255));
        stroke.set_stroke_width(2.5);
        stroke.set_fill(Some(Color::from_rgba8(0, 0, 255, 128)));
        stroke.set_size(Some(40.0), None);

        assert_eq!(stroke.style().stroke_color.to_hex(), "#ff0000");
        assert!((stroke.style().stroke_width - 2.5).abs() < f64::EPSILON);
        assert_eq!(stroke.style().fill, Some(SerializableColor::new(0, 0, 255, 128)));
        assert_eq!(stroke.size(), (Some(40.0), None));
    }

    #[test]
    fn test_object_dispatch() {
        let stroke = Stroke::new(Point::new(1.0, 2.0), StrokeStyle::default());
        let file = FileObject::new(Point::new(5.0, 6.0), "photo.png", "image/png");
        let (stroke_id, file_id) = (stroke.id(), file.id());

        let mut objects: Vec<AurObject> = vec![stroke.into(), file.into()];
        assert_ne!(stroke_id, file_id);
        assert_eq!(objects[0].id(), stroke_id);
        assert_eq!(objects[1].id(), file_id);
        assert!(objects[0].as_stroke().is_some());
        assert!(objects[1].as_stroke().is_none());

        objects[1].set_coordinates(Point::new(7.0, 8.0));
        assert_eq!(objects[1].coordinates(), Point::new(7.0, 8.0));
    }

    #[test]
    fn test_color_roundtrip() {
        let color = SerializableColor::new(12, 34, 56, 255);
        let back = SerializableColor::from(Color::from(color));
        assert_eq!(color, back);
        assert!((color.opacity() - 1.0).abs() < f64::EPSILON);
    }
}
