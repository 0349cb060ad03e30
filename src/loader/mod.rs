//! Pattern document and directory loaders.

mod document;
mod set;

pub use document::{load_document, load_pattern_file, piece_from_page, DocumentLoad};
pub use set::{PatternLoad, PatternLoader};
