//! In-memory SVG scene.

use aurchive_core::objects::{ObjectId, SerializableColor, Stroke};
use aurchive_core::session::RenderSink;
use aurchive_core::Matrix2D;
use kurbo::Size;
use peniko::Color;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("Unknown drawable: {0}")]
    UnknownDrawable(ObjectId),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// One path element in the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct Drawable {
    pub id: ObjectId,
    pub path: String,
    pub stroke: Color,
    pub stroke_width: f64,
    pub fill: Option<Color>,
}

/// A canvas of path elements under a single view transform.
#[derive(Debug, Clone)]
pub struct SvgScene {
    drawables: Vec<Drawable>,
    transform: String,
    /// Viewport size in device pixels.
    pub viewport_size: Size,
    /// Background color.
    pub background_color: Color,
}

impl SvgScene {
    /// Create an empty scene with the identity view transform.
    pub fn new(viewport_size: Size) -> Self {
        Self {
            drawables: Vec::new(),
            transform: Matrix2D::IDENTITY.to_device_string(),
            viewport_size,
            background_color: Color::from_rgba8(250, 250, 250, 255),
        }
    }

    /// Set the background color.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    pub fn drawables(&self) -> &[Drawable] {
        &self.drawables
    }

    pub fn get(&self, id: ObjectId) -> Option<&Drawable> {
        self.drawables.iter().find(|drawable| drawable.id == id)
    }

    /// Path data of a drawable.
    pub fn path(&self, id: ObjectId) -> Option<&str> {
        self.get(id).map(|drawable| drawable.path.as_str())
    }

    /// The view transform as `a, b, c, d, e, f`.
    pub fn transform(&self) -> &str {
        &self.transform
    }

    pub fn len(&self) -> usize {
        self.drawables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drawables.is_empty()
    }

    /// Replace the path data of an existing drawable.
    pub fn try_update_path(&mut self, id: ObjectId, path: &str) -> RenderResult<()> {
        let drawable = self
            .drawables
            .iter_mut()
            .find(|drawable| drawable.id == id)
            .ok_or(RenderError::UnknownDrawable(id))?;
        drawable.path.clear();
        drawable.path.push_str(path);
        Ok(())
    }

    /// Serialize the scene as a standalone SVG document.
    pub fn to_svg(&self) -> String {
        let width = self.viewport_size.width;
        let height = self.viewport_size.height;
        let background = SerializableColor::from(self.background_color);

        let mut out = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
        );
        out.push('\n');
        out.push_str(&format!(
            r#"  <rect width="100%" height="100%" fill="{}"/>"#,
            background.to_hex()
        ));
        out.push('\n');
        out.push_str(&format!(
            r#"  <g class="aur-canvas" transform="matrix({})">"#,
            self.transform
        ));
        out.push('\n');
        for drawable in &self.drawables {
            out.push_str("    ");
            out.push_str(&path_element(drawable));
            out.push('\n');
        }
        out.push_str("  </g>\n</svg>\n");
        out
    }
}

fn paint_attributes(name: &str, color: Color) -> String {
    let color = SerializableColor::from(color);
    if color.a == u8::MAX {
        format!(r#"{name}="{}""#, color.to_hex())
    } else {
        format!(
            r#"{name}="{}" {name}-opacity="{:.3}""#,
            color.to_hex(),
            color.opacity()
        )
    }
}

fn path_element(drawable: &Drawable) -> String {
    let fill = match drawable.fill {
        Some(color) => paint_attributes("fill", color),
        None => r#"fill="none""#.to_string(),
    };
    format!(
        r#"<path id="aurobject-{}" d="{}" {} {} stroke-width="{}" stroke-linecap="round" stroke-linejoin="round"/>"#,
        drawable.id,
        drawable.path.trim_end(),
        fill,
        paint_attributes("stroke", drawable.stroke),
        drawable.stroke_width,
    )
}

impl RenderSink for SvgScene {
    fn create_drawable(&mut self, stroke: &Stroke) {
        let style = stroke.style();
        self.drawables.push(Drawable {
            id: stroke.id(),
            path: String::new(),
            stroke: style.stroke(),
            stroke_width: style.stroke_width,
            fill: style.fill(),
        });
    }

    fn update_path(&mut self, id: ObjectId, path: &str) {
        if let Err(err) = self.try_update_path(id, path) {
            log::warn!("Dropping path update: {}", err);
        }
    }

    fn set_view_transform(&mut self, transform: &str) {
        self.transform.clear();
        self.transform.push_str(transform);
    }
}
