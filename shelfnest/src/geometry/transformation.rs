use std::borrow::Borrow;

use crate::geometry::DTransformation;
use crate::geometry::primitives::Point;

/// Rigid motion ready to be applied to points: `p ↦ R·p + t`,
/// with `R` the rotation given by `(cos, sin)` and `t = (tx, ty)`.
///
/// Builder methods append a step, i.e. `a.rotate(θ).translate(d)` first applies `a`,
/// then the rotation, then the translation.
#[derive(Clone, Debug, Copy, PartialEq)]
pub struct Transformation {
    cos: f64,
    sin: f64,
    tx: f64,
    ty: f64,
}

impl Transformation {
    pub const fn identity() -> Self {
        Self {
            cos: 1.0,
            sin: 0.0,
            tx: 0.0,
            ty: 0.0,
        }
    }

    pub fn from_translation(d: (f64, f64)) -> Self {
        Self::identity().translate(d)
    }

    /// Rotation around the origin, `angle` in radians.
    pub fn from_rotation(angle: f64) -> Self {
        Self::identity().rotate(angle)
    }

    /// Rotation of `angle` radians around `pivot`.
    pub fn from_rotation_around(angle: f64, pivot: Point) -> Self {
        Self::from_translation((-pivot.0, -pivot.1))
            .rotate(angle)
            .translate((pivot.0, pivot.1))
    }

    pub fn rotate(self, angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self {
            cos: cos * self.cos - sin * self.sin,
            sin: sin * self.cos + cos * self.sin,
            tx: cos * self.tx - sin * self.ty,
            ty: sin * self.tx + cos * self.ty,
        }
    }

    pub fn translate(self, (dx, dy): (f64, f64)) -> Self {
        Self {
            tx: self.tx + dx,
            ty: self.ty + dy,
            ..self
        }
    }

    pub fn apply(&self, Point(x, y): Point) -> Point {
        Point(
            self.cos * x - self.sin * y + self.tx,
            self.sin * x + self.cos * y + self.ty,
        )
    }

    pub fn decompose(&self) -> DTransformation {
        DTransformation::new(self.sin.atan2(self.cos), (self.tx, self.ty))
    }
}

impl<T> From<T> for Transformation
where
    T: Borrow<DTransformation>,
{
    fn from(dt: T) -> Self {
        let dt = dt.borrow();
        Self::from_rotation(dt.rotation()).translate(dt.translation())
    }
}
