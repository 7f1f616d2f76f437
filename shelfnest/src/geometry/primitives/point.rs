use serde::{Deserialize, Serialize};

use crate::geometry::Transformation;
use crate::geometry::geo_traits::Transformable;

/// Point in the plane, `(x, y)`
#[derive(Debug, Clone, PartialEq, Copy, Serialize, Deserialize)]
pub struct Point(pub f64, pub f64);

impl Point {
    pub fn is_finite(&self) -> bool {
        self.0.is_finite() && self.1.is_finite()
    }
}

impl Transformable for Point {
    fn transform(&mut self, t: &Transformation) -> &mut Self {
        *self = t.apply(*self);
        self
    }
}

impl From<Point> for (f64, f64) {
    fn from(p: Point) -> Self {
        (p.0, p.1)
    }
}

impl From<(f64, f64)> for Point {
    fn from(p: (f64, f64)) -> Self {
        Point(p.0, p.1)
    }
}
