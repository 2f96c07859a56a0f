//! 2×3 affine matrices mapping logical canvas space to device space.
//!
//! A [`Matrix2D`] `{a, b, c, d, e, f}` maps a point as
//!
//! ```text
//! x' = a·x + c·y + e
//! y' = b·x + d·y + f
//! ```
//!
//! Composition is non-commutative. [`Matrix2D::multiply`] takes the outer
//! transform first: `multiply(m1, m2)` applies `m2`, then `m1`.

use crate::precision::Precise;
use kurbo::{Affine, Point, Vec2};
use serde::{Deserialize, Serialize};
use std::ops::Mul;
use thiserror::Error;

/// Transform errors.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum TransformError {
    #[error("Matrix is not invertible (determinant {determinant})")]
    DegenerateMatrix { determinant: f64 },
    #[error("Invalid scale factor: {0}")]
    InvalidScaleFactor(f64),
}

/// Result type for transform operations.
pub type TransformResult<T> = Result<T, TransformError>;

/// A 2D affine transform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Matrix2D {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Default for Matrix2D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix2D {
    /// The neutral transform.
    pub const IDENTITY: Matrix2D = Matrix2D::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);

    pub const fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self { a, b, c, d, e, f }
    }

    pub fn identity() -> Self {
        Self::IDENTITY
    }

    /// Pure translation by `delta`.
    pub fn translate(delta: Vec2) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, delta.x, delta.y)
    }

    /// Uniform scale about the origin. `factor` must be non-zero.
    pub fn scale(factor: f64) -> Self {
        Self::new(factor, 0.0, 0.0, factor, 0.0, 0.0)
    }

    /// Uniform scale that leaves `pivot` where it is.
    ///
    /// `factor` must be non-zero; see [`Matrix2D::try_scale_at`] for the
    /// checked variant.
    pub fn scale_at(pivot: Point, factor: f64) -> Self {
        Self::new(
            factor,
            0.0,
            0.0,
            factor,
            pivot.x - factor * pivot.x,
            pivot.y - factor * pivot.y,
        )
    }

    /// Like [`Matrix2D::scale_at`], rejecting factors that would make the
    /// result degenerate.
    pub fn try_scale_at(pivot: Point, factor: f64) -> TransformResult<Self> {
        if factor == 0.0 || !factor.is_finite() {
            return Err(TransformError::InvalidScaleFactor(factor));
        }
        Ok(Self::scale_at(pivot, factor))
    }

    /// Affine composition: the result applies `m2` first, then `m1`.
    pub fn multiply(m1: Matrix2D, m2: Matrix2D) -> Self {
        Self::from(Affine::from(m1) * Affine::from(m2))
    }

    /// Fold `additions` onto `base`, each one happening after the accumulated
    /// result: `[A, B]` yields `B ∘ A ∘ base`.
    pub fn compose(base: Matrix2D, additions: &[Matrix2D]) -> Self {
        additions
            .iter()
            .fold(base, |acc, addition| Self::multiply(*addition, acc))
    }

    pub fn determinant(&self) -> f64 {
        Affine::from(*self).determinant()
    }

    /// The inverse transform.
    ///
    /// A degenerate matrix yields non-finite components. Use
    /// [`Matrix2D::try_invert`] where the input is not known to be valid.
    pub fn invert(&self) -> Self {
        Self::from(Affine::from(*self).inverse())
    }

    pub fn try_invert(&self) -> TransformResult<Self> {
        let determinant = self.determinant();
        if determinant == 0.0 || !determinant.is_finite() {
            return Err(TransformError::DegenerateMatrix { determinant });
        }
        Ok(self.invert())
    }

    /// Forward-map a point through this transform.
    pub fn apply_to_point(&self, point: Point) -> Point {
        Affine::from(*self) * point
    }

    /// Serialize as `a, b, c, d, e, f` at 4 fractional digits, the form a
    /// platform `matrix(...)` transform property expects.
    pub fn to_device_string(&self) -> String {
        format!(
            "{}, {}, {}, {}, {}, {}",
            Precise(self.a),
            Precise(self.b),
            Precise(self.c),
            Precise(self.d),
            Precise(self.e),
            Precise(self.f),
        )
    }
}

impl Mul for Matrix2D {
    type Output = Matrix2D;

    /// `lhs * rhs` applies `rhs` first, matching [`kurbo::Affine`].
    fn mul(self, rhs: Matrix2D) -> Matrix2D {
        Matrix2D::multiply(self, rhs)
    }
}

impl Mul<Point> for Matrix2D {
    type Output = Point;

    fn mul(self, rhs: Point) -> Point {
        self.apply_to_point(rhs)
    }
}

impl From<Matrix2D> for Affine {
    fn from(m: Matrix2D) -> Self {
        Affine::new([m.a, m.b, m.c, m.d, m.e, m.f])
    }
}

impl From<Affine> for Matrix2D {
    fn from(affine: Affine) -> Self {
        let [a, b, c, d, e, f] = affine.as_coeffs();
        Self { a, b, c, d, e, f }
    }
}
