//! Piece - one flat pattern component with its outline geometry.

use super::{Point, PieceRole};
use crate::config::angle::normalize_degrees;
use serde::{Deserialize, Serialize};

/// A single garment piece extracted from one pattern page.
///
/// Width, height and area always describe the current vertex list: every
/// mutation goes through [`Piece::rotate`] or [`Piece::translate`], which keep
/// them in sync.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Piece {
    /// Label as found on the pattern page (e.g. "DELANTERO").
    pub name: String,
    /// Canonical role resolved from the label.
    pub role: PieceRole,
    /// snake_case name ("front", or the lower-cased label for unknown pieces).
    pub normalized_name: String,
    /// Size label (e.g. "M", "12").
    pub size: String,
    /// Source page index within the document.
    pub page: Option<usize>,
    /// Page extents in mm (width, height).
    page_size: (f64, f64),
    /// Outline in mm, without a closing duplicate.
    vertices: Vec<Point>,
    /// Bounding box width in mm.
    width: f64,
    /// Bounding box height in mm.
    height: f64,
    /// Area in mm².
    area: f64,
    /// Cumulative rotation in degrees, in [0, 360).
    rotation: f64,
    /// Cumulative translation in mm.
    position: (f64, f64),
}

impl Piece {
    /// Create a new piece, resolving its role from the label.
    ///
    /// `width` and `height` are the nominal extents in mm (the page size for
    /// extracted pieces); they are replaced by the vertex bounding box when
    /// vertices are present.
    pub fn new(
        name: impl Into<String>,
        size: impl Into<String>,
        width: f64,
        height: f64,
        vertices: Vec<Point>,
    ) -> Self {
        let name = name.into();
        let role = PieceRole::from_label(&name);
        let normalized_name = role.normalized_name(&name);
        Self::identified(name, role, normalized_name, size, width, height, vertices)
    }

    /// Create a piece whose role and normalized name are already known.
    pub fn identified(
        name: impl Into<String>,
        role: PieceRole,
        normalized_name: impl Into<String>,
        size: impl Into<String>,
        width: f64,
        height: f64,
        vertices: Vec<Point>,
    ) -> Self {
        let mut piece = Self {
            name: name.into(),
            role,
            normalized_name: normalized_name.into(),
            size: size.into(),
            page: None,
            page_size: (width, height),
            vertices,
            width,
            height,
            area: 0.0,
            rotation: 0.0,
            position: (0.0, 0.0),
        };
        piece.calculate_bounding_box();
        piece.calculate_area();
        piece
    }

    /// Set the source page index.
    pub fn with_page(mut self, page: usize) -> Self {
        self.page = Some(page);
        self
    }

    /// Outline vertices in mm.
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// Bounding box width in mm.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Bounding box height in mm.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Area in mm².
    pub fn area(&self) -> f64 {
        self.area
    }

    /// Cumulative rotation in degrees.
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Cumulative translation in mm.
    pub fn position(&self) -> (f64, f64) {
        self.position
    }

    /// Page extents in mm.
    pub fn page_size(&self) -> (f64, f64) {
        self.page_size
    }

    /// Check if the outline has too few vertices to form a polygon.
    pub fn is_degenerate(&self) -> bool {
        self.vertices.len() < 3
    }

    /// Recompute and cache the area.
    ///
    /// Uses the shoelace formula over the cyclic vertex list. With fewer than
    /// three vertices the area falls back to `width * height`.
    pub fn calculate_area(&mut self) -> f64 {
        self.area = polygon_area(&self.vertices).unwrap_or(self.width * self.height);
        self.area
    }

    /// Recompute the bounding box and update width/height.
    ///
    /// Returns `(min_x, min_y, max_x, max_y)`. Without vertices the nominal
    /// extents are returned as `(0, 0, width, height)` and left unchanged.
    pub fn calculate_bounding_box(&mut self) -> (f64, f64, f64, f64) {
        let bbox = self.bounding_box();
        self.width = bbox.2 - bbox.0;
        self.height = bbox.3 - bbox.1;
        bbox
    }

    /// Get the bounding box `(min_x, min_y, max_x, max_y)`.
    pub fn bounding_box(&self) -> (f64, f64, f64, f64) {
        if self.vertices.is_empty() {
            return (0.0, 0.0, self.width, self.height);
        }

        let mut min_x = f64::MAX;
        let mut min_y = f64::MAX;
        let mut max_x = f64::MIN;
        let mut max_y = f64::MIN;

        for v in &self.vertices {
            min_x = min_x.min(v.x);
            min_y = min_y.min(v.y);
            max_x = max_x.max(v.x);
            max_y = max_y.max(v.y);
        }

        (min_x, min_y, max_x, max_y)
    }

    /// Rotate the piece about the origin.
    ///
    /// Pieces are rotated in the shared reference frame; translate first to
    /// rotate about another point.
    ///
    /// # Panics
    ///
    /// Panics if `angle` is not finite.
    pub fn rotate(&mut self, angle: f64) {
        assert!(angle.is_finite(), "rotation angle must be finite, got {angle}");

        self.rotation = normalize_degrees(self.rotation + angle);

        if self.vertices.is_empty() {
            return;
        }

        let (sin_a, cos_a) = angle.to_radians().sin_cos();
        for v in &mut self.vertices {
            *v = v.rotated(cos_a, sin_a);
        }

        self.calculate_bounding_box();
        self.calculate_area();
    }

    /// Translate the piece.
    ///
    /// Width and height are unchanged; the shifted vertices move the bounding
    /// box for later queries.
    ///
    /// # Panics
    ///
    /// Panics if `dx` or `dy` is not finite.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        assert!(
            dx.is_finite() && dy.is_finite(),
            "translation must be finite, got ({dx}, {dy})"
        );

        self.position = (self.position.0 + dx, self.position.1 + dy);

        if self.vertices.is_empty() {
            return;
        }

        for v in &mut self.vertices {
            *v = v.translated(dx, dy);
        }
        self.calculate_area();
    }

    /// Check if this is the back piece (where name and number are printed).
    pub fn is_back_piece(&self) -> bool {
        self.role == PieceRole::Back
            || self.name.to_uppercase().contains("POSTERIOR")
            || self.normalized_name.contains("back")
    }
}

/// Normalize a free-text label: lower-case, spaces to underscores.
pub fn normalize_label(label: &str) -> String {
    label.trim().to_lowercase().replace(' ', "_")
}

/// Shoelace area of a closed polygon, or `None` with fewer than 3 vertices.
pub fn polygon_area(vertices: &[Point]) -> Option<f64> {
    if vertices.len() < 3 {
        return None;
    }

    let n = vertices.len();
    let twice_signed: f64 = (0..n)
        .map(|i| {
            let a = vertices[i];
            let b = vertices[(i + 1) % n];
            a.x * b.y - b.x * a.y
        })
        .sum();

    Some(0.5 * twice_signed.abs())
}
