use std::borrow::Borrow;

use itertools::Itertools;

use crate::geometry::Transformation;
use crate::geometry::geo_traits::{CollidesWith, Transformable};
use crate::geometry::primitives::{Edge, Point, Rect};
use crate::{NestError, Result};

/// Closed polygon, an ordered sequence of vertices with an implicit edge from the last back to the first.
///
/// All operations are functional: transformations return a new polygon and the bounds are
/// derived from the vertices whenever they are requested.
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    vertices: Vec<Point>,
}

impl Polygon {
    /// Fewer than 3 vertices is accepted (lines, points) but yields a degenerate shape.
    pub fn new(vertices: Vec<Point>) -> Result<Self> {
        if vertices.is_empty() {
            return Err(NestError::InvalidGeometry(
                "polygon must have at least one vertex".into(),
            ));
        }
        if let Some(p) = vertices.iter().find(|p| !p.is_finite()) {
            return Err(NestError::InvalidGeometry(format!(
                "polygon contains a non-finite vertex: {p:?}"
            )));
        }
        Ok(Polygon { vertices })
    }

    /// Axis-aligned rectangle, see [`Rect::corners`] for the winding order.
    pub fn from_box(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Result<Self> {
        Rect::try_new(x_min, y_min, x_max, y_max).map(Polygon::from)
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    pub fn n_vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge(&self, i: usize) -> Edge {
        let j = (i + 1) % self.n_vertices();
        Edge::new(self.vertices[i], self.vertices[j])
    }

    pub fn edge_iter(&self) -> impl Iterator<Item = Edge> + '_ {
        (0..self.n_vertices()).map(move |i| self.edge(i))
    }

    /// Bounding box, computed in O(n) on every call.
    pub fn bbox(&self) -> Rect {
        let Point(x, y) = self.vertices[0];
        let init = Rect {
            x_min: x,
            y_min: y,
            x_max: x,
            y_max: y,
        };
        self.vertices.iter().skip(1).fold(init, |r, p| Rect {
            x_min: r.x_min.min(p.0),
            y_min: r.y_min.min(p.1),
            x_max: r.x_max.max(p.0),
            y_max: r.y_max.max(p.1),
        })
    }

    pub fn translate(&self, dx: f64, dy: f64) -> Polygon {
        self.transform_clone(&Transformation::from_translation((dx, dy)))
    }

    /// Rotates every vertex by `angle` degrees around `origin`,
    /// which defaults to the midpoint of the bounding box.
    pub fn rotate(&self, angle: f64, origin: Option<Point>) -> Polygon {
        if angle == 0.0 {
            return self.clone();
        }
        let pivot = origin.unwrap_or_else(|| self.bbox().centroid());
        self.transform_clone(&Transformation::from_rotation_around(
            angle.to_radians(),
            pivot,
        ))
    }

    /// Bounding-box "union": the rectangle covering the bounding boxes of both polygons.
    ///
    /// This over-approximates the true union and is only meant for accumulating an overall extent.
    /// It must not be used for exact areas or to compose shapes.
    pub fn bbox_union(&self, other: &Polygon) -> Polygon {
        Rect::bounding_rect(self.bbox(), other.bbox()).into()
    }

    /// Exact intersection test between the outlines and interiors of both polygons.
    pub fn intersects(&self, other: &Polygon) -> bool {
        self.collides_with(other)
    }
}

impl Transformable for Polygon {
    fn transform(&mut self, t: &Transformation) -> &mut Self {
        self.vertices.iter_mut().for_each(|p| {
            p.transform(t);
        });
        self
    }
}

impl CollidesWith<Point> for Polygon {
    /// Ray casting with the even-odd rule.
    /// Each edge covers the half-open interval `(y_i > y) != (y_j > y)`, so a ray through a vertex
    /// is counted exactly once.
    fn collides_with(&self, point: &Point) -> bool {
        if !self.bbox().collides_with(point) {
            return false;
        }
        let Point(x, y) = *point;
        let mut inside = false;
        for (Point(xi, yi), Point(xj, yj)) in self.vertices.iter().circular_tuple_windows() {
            if (*yi > y) != (*yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
                inside = !inside;
            }
        }
        inside
    }
}

impl CollidesWith<Polygon> for Polygon {
    fn collides_with(&self, other: &Polygon) -> bool {
        if !self.bbox().collides_with(&other.bbox()) {
            return false;
        }
        let edges_cross = self
            .edge_iter()
            .cartesian_product(other.edge_iter().collect_vec())
            .any(|(e1, e2)| e1.collides_with(&e2));

        edges_cross
            || self.collides_with(&other.vertices[0])
            || other.collides_with(&self.vertices[0])
    }
}

impl<T> From<T> for Polygon
where
    T: Borrow<Rect>,
{
    fn from(r: T) -> Self {
        Polygon {
            vertices: r.borrow().corners().to_vec(),
        }
    }
}
