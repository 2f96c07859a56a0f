//! View state for pan/zoom transforms.

use crate::matrix::{Matrix2D, TransformError, TransformResult};
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// ViewState owns the composed view transform of the canvas.
///
/// The matrix maps logical canvas coordinates to device (screen)
/// coordinates and is the only authoritative part of the state. `offset`
/// and `zoom` mirror what has been folded into it and are kept for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    matrix: Matrix2D,
    /// Cumulative pan offset.
    pub offset: Vec2,
    /// Cumulative relative zoom.
    pub zoom: f64,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            matrix: Matrix2D::IDENTITY,
            offset: Vec2::ZERO,
            zoom: 1.0,
        }
    }
}

impl ViewState {
    /// Create a view with the identity transform.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current logical-to-device transform.
    pub fn current_matrix(&self) -> Matrix2D {
        self.matrix
    }

    /// The device-to-logical transform used for input handling.
    ///
    /// Never degenerate: every mutation goes through [`ViewState::pan`] or a
    /// factor-checked [`ViewState::zoom_at`].
    pub fn inverse_matrix(&self) -> Matrix2D {
        self.matrix.invert()
    }

    /// Convert a device point to logical canvas coordinates.
    pub fn device_to_logical(&self, device_point: Point) -> Point {
        self.inverse_matrix().apply_to_point(device_point)
    }

    /// Convert a logical canvas point to device coordinates.
    pub fn logical_to_device(&self, logical_point: Point) -> Point {
        self.matrix.apply_to_point(logical_point)
    }

    /// Pan the view by a delta in device units.
    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
        self.matrix = Matrix2D::compose(self.matrix, &[Matrix2D::translate(delta)]);
    }

    /// Zoom by a relative `factor`, keeping the device point `cursor` fixed.
    ///
    /// Each call multiplies the current transform; it does not set an
    /// absolute zoom level. Zero and non-finite factors are rejected and
    /// leave the view untouched.
    pub fn zoom_at(&mut self, cursor: Point, factor: f64) -> TransformResult<()> {
        let step = Matrix2D::try_scale_at(cursor, factor).inspect_err(|err| {
            log::warn!("Rejected zoom step at {:?}: {}", cursor, err);
        })?;
        let matrix = Matrix2D::compose(self.matrix, &[step]);
        if matrix.determinant() == 0.0 || !matrix.determinant().is_finite() {
            return Err(TransformError::DegenerateMatrix {
                determinant: matrix.determinant(),
            });
        }
        self.matrix = matrix;
        self.zoom *= factor;
        Ok(())
    }

    /// The transform serialized for a platform transform property.
    pub fn to_device_string(&self) -> String {
        self.matrix.to_device_string()
    }

    /// Reset to the identity transform.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
