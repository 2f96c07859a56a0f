//! Aurchive Core Library
//!
//! View transform engine, stroke smoothing and the drawing session for the
//! Aurchive canvas. Platform-agnostic: input arrives as plain events and
//! geometry leaves through the [`RenderSink`] trait.

pub mod config;
pub mod document;
pub mod input;
pub mod matrix;
pub mod objects;
pub mod precision;
pub mod session;
pub mod smooth;
pub mod view;

pub use config::{CanvasConfig, ConfigError, WheelConfig};
pub use document::AurchiveState;
pub use input::{InputEvent, Modifiers, NormalizedWheel, Platform, PointerEvent, WheelAction, WheelEvent, normalize_wheel};
pub use matrix::{Matrix2D, TransformError, TransformResult};
pub use objects::{AurObject, FileObject, ObjectId, SerializableColor, Stroke, StrokeStyle};
pub use session::{RenderSink, SessionState, StrokeSession};
pub use smooth::{PathCommand, PathCommands, smooth};
pub use view::ViewState;

/// A point in device or logical space.
pub type Vector2D = kurbo::Point;
