//! jersey-patterns - Garment pattern ingestion.
//!
//! Turns per-size pattern PDFs (one piece per page) into piece outlines,
//! groups them into a [`Garment`] per size and indexes the garments in a
//! [`PatternSet`] for the nesting and export stages.
//!
//! # Example
//!
//! ```no_run
//! use jersey_patterns::{load_patterns, validate_pattern_set};
//! use std::path::Path;
//!
//! let load = load_patterns(Path::new("patterns")).unwrap();
//! for (size, garment) in load.patterns.iter() {
//!     println!("{}: {} pieces, complete: {}", size, garment.pieces().len(), garment.is_complete());
//! }
//! let report = validate_pattern_set(&load.patterns);
//! println!("{} errors", report.errors.len());
//! ```

pub mod config;
pub mod error;
pub mod loader;
pub mod model;
pub mod parser;
pub mod transform;
pub mod units;
pub mod validation;

// Re-exports for convenience
pub use config::{CurvePolicy, DuplicateSizePolicy, LoaderConfig};
pub use error::{PatternError, Result};
pub use loader::{load_document, load_pattern_file, DocumentLoad, PatternLoad, PatternLoader};
pub use model::{Garment, PatternSet, Piece, PieceRole, Point, Primitive, Wearer};
pub use parser::{PageContent, PdfDocument, VectorDocument};
pub use validation::{
    quick_validate, validate_garment, validate_pattern_set, validate_size_coverage,
    ValidationResult,
};

/// Load every pattern PDF in a directory with the default configuration.
///
/// Documents that cannot be read are skipped and listed in the returned
/// report; only a missing directory is an error.
pub fn load_patterns(dir: &std::path::Path) -> Result<PatternLoad> {
    PatternLoader::new(dir).load()
}
