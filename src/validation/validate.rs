//! Validation logic for loaded patterns.

use crate::config::float_cmp::approx_zero;
use crate::error::{PatternError, Result};
use crate::model::{Garment, PatternSet, PieceRole};
use crate::parser::is_standard_size;
use serde::{Deserialize, Serialize};

/// Validation result with warnings.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Whether validation passed.
    pub passed: bool,
    /// Warning messages.
    pub warnings: Vec<String>,
    /// Error messages.
    pub errors: Vec<String>,
}

impl ValidationResult {
    /// Create a passing result.
    pub fn ok() -> Self {
        Self {
            passed: true,
            ..Default::default()
        }
    }

    /// Create a failing result with an error.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            passed: false,
            errors: vec![message.into()],
            ..Default::default()
        }
    }

    /// Add a warning.
    pub fn add_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// Add an error.
    pub fn add_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
        self.passed = false;
    }

    /// Merge another result into this one.
    pub fn merge(&mut self, other: ValidationResult) {
        self.warnings.extend(other.warnings);
        self.errors.extend(other.errors);
        if !other.passed {
            self.passed = false;
        }
    }
}

/// Validate one garment: pieces present and consistent, required roles
/// covered. Unknown pieces, degenerate outlines and non-standard size labels
/// are only warnings.
pub fn validate_garment(garment: &Garment) -> ValidationResult {
    let mut result = ValidationResult::ok();

    if garment.pieces().is_empty() {
        result.add_error("No pieces");
        return result;
    }

    if !is_standard_size(&garment.size) {
        result.add_warning(format!("Non-standard size label '{}'", garment.size));
    }

    for (idx, piece) in garment.pieces().iter().enumerate() {
        if piece.size != garment.size {
            result.add_error(format!(
                "Piece {} ({}): size '{}' does not match garment size '{}'",
                idx + 1,
                piece.name,
                piece.size,
                garment.size
            ));
        }

        if piece.role == PieceRole::Unknown {
            result.add_warning(format!(
                "Piece {} ({}): unrecognized piece",
                idx + 1,
                piece.name
            ));
        }

        if piece.is_degenerate() {
            result.add_warning(format!(
                "Piece {} ({}): only {} vertices, area taken from extents",
                idx + 1,
                piece.name,
                piece.vertices().len()
            ));
        } else if approx_zero(piece.area()) {
            result.add_warning(format!("Piece {} ({}): zero area outline", idx + 1, piece.name));
        }
    }

    for role in garment.missing_roles() {
        let label = role.pattern_label().unwrap_or(role.canonical_name());
        result.add_error(format!("Missing required piece {}", label));
    }

    result
}

/// Validate every garment of a set, collecting all errors.
pub fn validate_pattern_set(patterns: &PatternSet) -> ValidationResult {
    if patterns.is_empty() {
        return ValidationResult::error("No patterns loaded");
    }

    let mut result = ValidationResult::ok();

    for (size, garment) in patterns.iter() {
        let garment_result = validate_garment(garment);
        result.merge(ValidationResult {
            passed: garment_result.passed,
            warnings: prefixed(size, garment_result.warnings),
            errors: prefixed(size, garment_result.errors),
        });
    }

    result
}

/// Check that every requested size has a pattern.
pub fn validate_size_coverage<S: AsRef<str>>(
    patterns: &PatternSet,
    requested: &[S],
) -> ValidationResult {
    let mut result = ValidationResult::ok();

    for size in patterns.missing_sizes(requested) {
        result.add_error(format!("Size {}: no pattern available", size));
    }

    result
}

/// Quick validation check for command-line --validate flag.
pub fn quick_validate(patterns: &PatternSet) -> Result<()> {
    let result = validate_pattern_set(patterns);

    if !result.passed {
        return Err(PatternError::Validation {
            message: result.errors.join("; "),
        });
    }

    Ok(())
}

fn prefixed(size: &str, messages: Vec<String>) -> Vec<String> {
    messages
        .into_iter()
        .map(|m| format!("Size {}: {}", size, m))
        .collect()
}
