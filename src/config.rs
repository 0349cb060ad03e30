//! Configuration constants and settings for pattern loading.

use serde::{Deserialize, Serialize};

/// Floating-point comparison epsilon (mm).
pub const EPS: f64 = 0.0001;

/// Default number of samples per cubic curve for [`CurvePolicy::Sampled`].
pub const DEFAULT_CURVE_SEGMENTS: usize = 16;

/// Default file extension of pattern documents.
pub const DEFAULT_DOCUMENT_EXTENSION: &str = "pdf";

/// Letter sizes, longest token first so that `XXL` is never read as `XL`.
pub const LETTER_SIZES: [&str; 7] = ["XXXL", "XXL", "XL", "XS", "S", "M", "L"];

/// Numeric (kids) sizes, two-digit tokens first.
pub const NUMERIC_SIZES: [&str; 8] = ["16", "14", "12", "10", "2", "4", "6", "8"];

/// How cubic curves are reduced to polygon vertices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CurvePolicy {
    /// Keep only the curve's end point.
    #[default]
    Endpoint,
    /// Evaluate the curve at `segments` evenly spaced parameters.
    Sampled { segments: usize },
}

impl CurvePolicy {
    /// Sampled policy with the default resolution.
    pub fn sampled() -> Self {
        CurvePolicy::Sampled {
            segments: DEFAULT_CURVE_SEGMENTS,
        }
    }
}

/// What to do when two documents resolve to the same size label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DuplicateSizePolicy {
    /// The document processed last replaces the earlier one.
    #[default]
    KeepLast,
    /// The document processed first is kept; later ones are reported.
    KeepFirst,
}

/// Settings for document and pattern-set loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// Curve reduction policy.
    pub curve_policy: CurvePolicy,
    /// Size-label collision policy.
    pub duplicate_policy: DuplicateSizePolicy,
    /// Extension of documents to pick up from a directory (without dot).
    pub extension: String,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            curve_policy: CurvePolicy::default(),
            duplicate_policy: DuplicateSizePolicy::default(),
            extension: DEFAULT_DOCUMENT_EXTENSION.to_string(),
        }
    }
}

impl LoaderConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the curve policy.
    pub fn with_curve_policy(mut self, policy: CurvePolicy) -> Self {
        self.curve_policy = policy;
        self
    }

    /// Set the duplicate size policy.
    pub fn with_duplicate_policy(mut self, policy: DuplicateSizePolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }

    /// Set the document extension.
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Check whether a file extension matches the configured one.
    pub fn matches_extension(&self, extension: &str) -> bool {
        extension.eq_ignore_ascii_case(self.extension.trim_start_matches('.'))
    }
}

/// Utility functions for floating-point comparisons.
pub mod float_cmp {
    use super::EPS;

    /// Check if two floats are approximately equal.
    #[inline]
    pub fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS
    }

    /// Check if a float is approximately zero.
    #[inline]
    pub fn approx_zero(a: f64) -> bool {
        a.abs() < EPS
    }
}

/// Utility functions for angle operations.
pub mod angle {
    /// Normalize angle to 0-360 range (exclusive of 360).
    #[inline]
    pub fn normalize_degrees(angle: f64) -> f64 {
        let mut a = angle % 360.0;
        if a < 0.0 {
            a += 360.0;
        }
        // Handle 360.0 and -0.0 cases
        if a >= 360.0 || a == 0.0 {
            a = 0.0;
        }
        a
    }
}
