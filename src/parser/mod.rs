//! Pattern document parsing: pages, piece labels and size tokens.

mod label;
mod page;
mod pdf;
mod size;

pub use label::{resolve_identity, PieceIdentity, UNKNOWN_LABEL};
pub use page::{PageContent, VectorDocument};
pub use pdf::PdfDocument;
pub use size::{is_standard_size, size_from_filename, size_token};
