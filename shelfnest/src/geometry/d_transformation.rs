use std::fmt::Display;

use ordered_float::NotNan;
use serde::{Deserialize, Serialize};

use crate::geometry::Transformation;

/// A rigid motion stored as its parameters: first a rotation around the origin, then a translation.
///
/// This is the form placements are stored, exported and compared in.
/// Use [`DTransformation::compose`] to get something that can be applied to geometry.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Copy, Serialize, Deserialize)]
pub struct DTransformation {
    /// Radians, counterclockwise
    pub rotation: NotNan<f64>,
    pub translation: (NotNan<f64>, NotNan<f64>),
}

impl DTransformation {
    /// Panics on NaN. Transformations are derived from validated (finite) geometry.
    pub fn new(rotation: f64, (tx, ty): (f64, f64)) -> Self {
        let finite = |v: f64, what: &str| {
            NotNan::new(v).unwrap_or_else(|_| panic!("{what} of a transformation is NaN"))
        };
        Self {
            rotation: finite(rotation, "rotation"),
            translation: (finite(tx, "x-translation"), finite(ty, "y-translation")),
        }
    }

    pub fn identity() -> Self {
        Self::new(0.0, (0.0, 0.0))
    }

    pub fn rotation(&self) -> f64 {
        self.rotation.into_inner()
    }

    pub fn rotation_degrees(&self) -> f64 {
        self.rotation().to_degrees()
    }

    pub fn translation(&self) -> (f64, f64) {
        (self.translation.0.into_inner(), self.translation.1.into_inner())
    }

    pub fn compose(&self) -> Transformation {
        Transformation::from(self)
    }
}

impl Default for DTransformation {
    fn default() -> Self {
        Self::identity()
    }
}

impl Display for DTransformation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (tx, ty) = self.translation();
        write!(f, "rotate {:.3}°, move ({tx:.3}, {ty:.3})", self.rotation_degrees())
    }
}
