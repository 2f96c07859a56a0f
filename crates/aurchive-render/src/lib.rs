//! Aurchive Render Library
//!
//! Rendering sinks for the Aurchive canvas. [`SvgScene`] keeps one path
//! element per stroke and serializes the whole canvas as an SVG document.

mod svg;

pub use svg::{Drawable, RenderError, RenderResult, SvgScene};
