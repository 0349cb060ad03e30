//! Points and vector drawing primitives.

use serde::{Deserialize, Serialize};

/// A 2D point. Units depend on context: points on a page, millimeters on a piece.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Convert a point in PDF points to millimeters.
    pub fn to_mm(self) -> Self {
        Self::new(crate::units::pt_to_mm(self.x), crate::units::pt_to_mm(self.y))
    }

    /// Check if two points coincide within [`crate::config::EPS`].
    pub fn approx_eq(&self, other: &Point) -> bool {
        use crate::config::float_cmp::approx_eq;
        approx_eq(self.x, other.x) && approx_eq(self.y, other.y)
    }

    /// Rotate about the origin given the angle's cosine and sine.
    pub fn rotated(self, cos_a: f64, sin_a: f64) -> Self {
        Self::new(
            self.x * cos_a - self.y * sin_a,
            self.x * sin_a + self.y * cos_a,
        )
    }

    /// Shift by an offset.
    pub fn translated(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// One path segment from a page's drawing commands.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Primitive {
    /// Straight segment.
    Line { from: Point, to: Point },
    /// Cubic Bézier curve.
    Curve {
        from: Point,
        ctrl1: Point,
        ctrl2: Point,
        to: Point,
    },
}

impl Primitive {
    /// Create a line primitive.
    pub fn line(from: impl Into<Point>, to: impl Into<Point>) -> Self {
        Primitive::Line {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Create a cubic curve primitive.
    pub fn curve(
        from: impl Into<Point>,
        ctrl1: impl Into<Point>,
        ctrl2: impl Into<Point>,
        to: impl Into<Point>,
    ) -> Self {
        Primitive::Curve {
            from: from.into(),
            ctrl1: ctrl1.into(),
            ctrl2: ctrl2.into(),
            to: to.into(),
        }
    }

    /// End point of the segment.
    pub fn end(&self) -> Point {
        match self {
            Primitive::Line { to, .. } | Primitive::Curve { to, .. } => *to,
        }
    }

    /// Evaluate the segment at parameter `t` in [0, 1].
    pub fn point_at(&self, t: f64) -> Point {
        match *self {
            Primitive::Line { from, to } => {
                Point::new(from.x + (to.x - from.x) * t, from.y + (to.y - from.y) * t)
            }
            Primitive::Curve {
                from,
                ctrl1,
                ctrl2,
                to,
            } => {
                let u = 1.0 - t;
                let b0 = u * u * u;
                let b1 = 3.0 * u * u * t;
                let b2 = 3.0 * u * t * t;
                let b3 = t * t * t;
                Point::new(
                    b0 * from.x + b1 * ctrl1.x + b2 * ctrl2.x + b3 * to.x,
                    b0 * from.y + b1 * ctrl1.y + b2 * ctrl2.y + b3 * to.y,
                )
            }
        }
    }

    /// Check if this is a curve.
    pub fn is_curve(&self) -> bool {
        matches!(self, Primitive::Curve { .. })
    }
}
