use serde::{Deserialize, Serialize};

use crate::geometry::geo_traits::CollidesWith;
use crate::geometry::primitives::Point;
use crate::{NestError, Result};

///Axis-aligned rectangle, also used to describe the bounds of a [`Polygon`](crate::geometry::primitives::Polygon)
#[derive(Clone, Debug, PartialEq, Copy, Serialize, Deserialize)]
pub struct Rect {
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
}

impl Rect {
    /// Degenerate rectangles (zero width or height) are allowed, inverted or non-finite ones are not.
    pub fn try_new(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Result<Self> {
        let finite = [x_min, y_min, x_max, y_max].iter().all(|v| v.is_finite());
        if !finite || x_min > x_max || y_min > y_max {
            return Err(NestError::InvalidGeometry(format!(
                "invalid rectangle, x_min: {x_min}, x_max: {x_max}, y_min: {y_min}, y_max: {y_max}"
            )));
        }
        Ok(Rect {
            x_min,
            y_min,
            x_max,
            y_max,
        })
    }

    /// Returns the four corners of `self`, counterclockwise starting from the minimum corner.
    pub fn corners(&self) -> [Point; 4] {
        [
            Point(self.x_min, self.y_min),
            Point(self.x_max, self.y_min),
            Point(self.x_max, self.y_max),
            Point(self.x_min, self.y_max),
        ]
    }

    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    pub fn centroid(&self) -> Point {
        Point(
            (self.x_min + self.x_max) / 2.0,
            (self.y_min + self.y_max) / 2.0,
        )
    }

    /// Returns the smallest rectangle that contains both `a` and `b`.
    pub fn bounding_rect(a: Rect, b: Rect) -> Rect {
        Rect {
            x_min: f64::min(a.x_min, b.x_min),
            y_min: f64::min(a.y_min, b.y_min),
            x_max: f64::max(a.x_max, b.x_max),
            y_max: f64::max(a.y_max, b.y_max),
        }
    }

    pub fn translate(self, dx: f64, dy: f64) -> Rect {
        Rect {
            x_min: self.x_min + dx,
            y_min: self.y_min + dy,
            x_max: self.x_max + dx,
            y_max: self.y_max + dy,
        }
    }

    /// Returns a new rectangle grown by `margin` on every side.
    pub fn inflate(self, margin: f64) -> Rect {
        Rect {
            x_min: self.x_min - margin,
            y_min: self.y_min - margin,
            x_max: self.x_max + margin,
            y_max: self.y_max + margin,
        }
    }
}

impl CollidesWith<Point> for Rect {
    #[inline(always)]
    fn collides_with(&self, point: &Point) -> bool {
        let Point(x, y) = *point;
        x >= self.x_min && x <= self.x_max && y >= self.y_min && y <= self.y_max
    }
}

impl CollidesWith<Rect> for Rect {
    #[inline(always)]
    fn collides_with(&self, other: &Rect) -> bool {
        f64::max(self.x_min, other.x_min) <= f64::min(self.x_max, other.x_max)
            && f64::max(self.y_min, other.y_min) <= f64::min(self.y_max, other.y_max)
    }
}
