//! Validation of loaded garments and pattern sets.

mod validate;

pub use validate::*;
