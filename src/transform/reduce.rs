//! Reduction of page drawing primitives to a piece outline.

use crate::config::CurvePolicy;
use crate::model::{Point, Primitive};

/// Reduce a page's primitives (in points) to polygon vertices in millimeters.
///
/// A line contributes its end point. A curve contributes its end point under
/// [`CurvePolicy::Endpoint`], or `segments` evenly spaced samples ending at
/// the end point under [`CurvePolicy::Sampled`]. Coincident consecutive
/// vertices are merged and a trailing vertex equal to the first is dropped, so
/// the result never repeats its starting vertex.
pub fn reduce_to_polygon(primitives: &[Primitive], policy: CurvePolicy) -> Vec<Point> {
    let mut vertices: Vec<Point> = Vec::with_capacity(primitives.len());

    for primitive in primitives {
        match (primitive, policy) {
            (Primitive::Line { to, .. }, _) => push_vertex(&mut vertices, to.to_mm()),
            (Primitive::Curve { to, .. }, CurvePolicy::Endpoint) => {
                push_vertex(&mut vertices, to.to_mm())
            }
            (curve @ Primitive::Curve { .. }, CurvePolicy::Sampled { segments }) => {
                let segments = segments.max(1);
                for i in 1..=segments {
                    let t = i as f64 / segments as f64;
                    push_vertex(&mut vertices, curve.point_at(t).to_mm());
                }
            }
        }
    }

    if vertices.len() > 1 {
        let first = vertices[0];
        if vertices.last().is_some_and(|last| last.approx_eq(&first)) {
            vertices.pop();
        }
    }

    vertices
}

/// Append a vertex unless it repeats the previous one.
fn push_vertex(vertices: &mut Vec<Point>, vertex: Point) {
    if vertices.last().is_some_and(|last| last.approx_eq(&vertex)) {
        return;
    }
    vertices.push(vertex);
}
