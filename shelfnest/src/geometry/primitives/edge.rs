use float_cmp::approx_eq;

use crate::geometry::geo_traits::CollidesWith;
use crate::geometry::primitives::Point;

/// Line segment between two [`Point`]s
#[derive(Clone, Debug, PartialEq, Copy)]
pub struct Edge {
    pub start: Point,
    pub end: Point,
}

impl Edge {
    pub fn new(start: Point, end: Point) -> Self {
        Edge { start, end }
    }

    pub fn x_min(&self) -> f64 {
        f64::min(self.start.0, self.end.0)
    }

    pub fn y_min(&self) -> f64 {
        f64::min(self.start.1, self.end.1)
    }

    pub fn x_max(&self) -> f64 {
        f64::max(self.start.0, self.end.0)
    }

    pub fn y_max(&self) -> f64 {
        f64::max(self.start.1, self.end.1)
    }

    /// Whether `p`, known to be collinear with the edge, lies within its extent.
    fn spans(&self, p: &Point) -> bool {
        self.x_min() <= p.0 && p.0 <= self.x_max() && self.y_min() <= p.1 && p.1 <= self.y_max()
    }
}

impl CollidesWith<Edge> for Edge {
    /// Proper crossings are detected through the signs of the four orientations.
    /// Touching configurations (an endpoint on the other edge, overlapping collinear edges)
    /// count as a collision.
    fn collides_with(&self, other: &Edge) -> bool {
        let o1 = orientation(self.start, self.end, other.start);
        let o2 = orientation(self.start, self.end, other.end);
        let o3 = orientation(other.start, other.end, self.start);
        let o4 = orientation(other.start, other.end, self.end);

        if o1 * o2 < 0 && o3 * o4 < 0 {
            return true;
        }

        (o1 == 0 && self.spans(&other.start))
            || (o2 == 0 && self.spans(&other.end))
            || (o3 == 0 && other.spans(&self.start))
            || (o4 == 0 && other.spans(&self.end))
    }
}

/// Sign of the cross product of (q - p) and (r - p):
/// 1 for counterclockwise, -1 for clockwise, 0 for (almost) collinear.
fn orientation(p: Point, q: Point, r: Point) -> i8 {
    let cross = (q.0 - p.0) * (r.1 - p.1) - (q.1 - p.1) * (r.0 - p.0);
    if approx_eq!(f64, cross, 0.0) {
        0
    } else if cross > 0.0 {
        1
    } else {
        -1
    }
}
