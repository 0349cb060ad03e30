//! Data model types for garment patterns.

mod garment;
mod pattern_set;
mod piece;
mod primitive;
mod role;
mod wearer;

pub use garment::Garment;
pub use pattern_set::PatternSet;
pub use piece::{normalize_label, polygon_area, Piece};
pub use primitive::{Point, Primitive};
pub use role::{PieceRole, REQUIRED_ROLES, ROLE_VOCABULARY};
pub use wearer::Wearer;
