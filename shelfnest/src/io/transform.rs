use std::ops::Mul;

use crate::geometry::primitives::Point;
use crate::io::document::parse_number_list;

/// Affine map of an SVG `transform` attribute, coefficients in `matrix(a b c d e f)` order:
/// `x' = a·x + c·y + e` and `y' = b·x + d·y + f`.
#[derive(Clone, Debug, Copy, PartialEq)]
pub(crate) struct AffineTransform {
    a: f64,
    b: f64,
    c: f64,
    d: f64,
    e: f64,
    f: f64,
}

impl AffineTransform {
    pub const IDENTITY: Self = Self::matrix(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);

    const fn matrix(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self { a, b, c, d, e, f }
    }

    fn translation(tx: f64, ty: f64) -> Self {
        Self::matrix(1.0, 0.0, 0.0, 1.0, tx, ty)
    }

    /// `angle` in degrees
    fn rotation(angle: f64) -> Self {
        let (sin, cos) = angle.to_radians().sin_cos();
        Self::matrix(cos, sin, -sin, cos, 0.0, 0.0)
    }

    /// Parses a transform list such as `translate(10 0) rotate(45, 5, 5)`.
    ///
    /// The functions apply right to left, as in SVG. `None` if any of them is unknown or has a
    /// wrong number of arguments.
    pub fn parse(list: &str) -> Option<Self> {
        let separator = |c: char| c == ',' || c.is_whitespace();
        let mut m = Self::IDENTITY;
        let mut rest = list.trim_start_matches(separator);
        while !rest.is_empty() {
            let open = rest.find('(')?;
            let close = open + rest[open..].find(')')?;
            let args = parse_number_list(&rest[open + 1..close])?;
            m = m * Self::from_function(rest[..open].trim(), &args)?;
            rest = rest[close + 1..].trim_start_matches(separator);
        }
        Some(m)
    }

    fn from_function(name: &str, args: &[f64]) -> Option<Self> {
        let m = match (name, args) {
            ("matrix", &[a, b, c, d, e, f]) => Self::matrix(a, b, c, d, e, f),
            ("translate", &[tx]) => Self::translation(tx, 0.0),
            ("translate", &[tx, ty]) => Self::translation(tx, ty),
            ("scale", &[s]) => Self::matrix(s, 0.0, 0.0, s, 0.0, 0.0),
            ("scale", &[sx, sy]) => Self::matrix(sx, 0.0, 0.0, sy, 0.0, 0.0),
            ("rotate", &[angle]) => Self::rotation(angle),
            ("rotate", &[angle, cx, cy]) => {
                Self::translation(cx, cy) * Self::rotation(angle) * Self::translation(-cx, -cy)
            }
            ("skewX", &[angle]) => Self::matrix(1.0, 0.0, angle.to_radians().tan(), 1.0, 0.0, 0.0),
            ("skewY", &[angle]) => Self::matrix(1.0, angle.to_radians().tan(), 0.0, 1.0, 0.0, 0.0),
            _ => return None,
        };
        Some(m)
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    pub fn apply(&self, Point(x, y): Point) -> Point {
        Point(
            self.a * x + self.c * y + self.e,
            self.b * x + self.d * y + self.f,
        )
    }
}

/// `self * rhs` applies `rhs` first.
impl Mul for AffineTransform {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self::matrix(
            self.a * rhs.a + self.c * rhs.b,
            self.b * rhs.a + self.d * rhs.b,
            self.a * rhs.c + self.c * rhs.d,
            self.b * rhs.c + self.d * rhs.d,
            self.a * rhs.e + self.c * rhs.f + self.e,
            self.b * rhs.e + self.d * rhs.f + self.f,
        )
    }
}
