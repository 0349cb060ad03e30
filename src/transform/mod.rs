//! Geometry transformations applied while loading patterns.

mod reduce;

pub use reduce::*;
