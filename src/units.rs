//! Conversion between PDF page units (points) and millimeters.

/// Millimeters per PDF point (1/72 inch).
pub const PT_TO_MM: f64 = 0.352778;

/// Convert a length in points to millimeters.
#[inline]
pub fn pt_to_mm(points: f64) -> f64 {
    points * PT_TO_MM
}

/// Convert a length in millimeters to points.
#[inline]
pub fn mm_to_pt(mm: f64) -> f64 {
    mm / PT_TO_MM
}
