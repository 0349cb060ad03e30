//! PieceRole - canonical garment piece categories.

use super::normalize_label;
use serde::{Deserialize, Serialize};

/// Canonical category of a garment piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PieceRole {
    Front,
    Back,
    SleeveRight,
    SleeveLeft,
    CollarBias,
    Unknown,
}

/// Pattern label vocabulary: label as printed on the pattern page, and its role.
pub const ROLE_VOCABULARY: [(&str, PieceRole); 5] = [
    ("DELANTERO", PieceRole::Front),
    ("POSTERIOR", PieceRole::Back),
    ("@MANGA DER", PieceRole::SleeveRight),
    ("@MANGA IZQ", PieceRole::SleeveLeft),
    ("SESGO CUELLO", PieceRole::CollarBias),
];

/// Roles a garment needs to be wearable. Collar bias is optional.
pub const REQUIRED_ROLES: [PieceRole; 4] = [
    PieceRole::Front,
    PieceRole::Back,
    PieceRole::SleeveRight,
    PieceRole::SleeveLeft,
];

impl PieceRole {
    /// Resolve a label to a role.
    ///
    /// An exact vocabulary label (ignoring case and surrounding whitespace) wins;
    /// otherwise the first vocabulary label contained in the text is used.
    pub fn from_label(label: &str) -> PieceRole {
        let upper = label.trim().to_uppercase();

        if let Some((_, role)) = ROLE_VOCABULARY.iter().find(|(name, _)| *name == upper) {
            return *role;
        }

        ROLE_VOCABULARY
            .iter()
            .find(|(name, _)| upper.contains(name))
            .map(|(_, role)| *role)
            .unwrap_or(PieceRole::Unknown)
    }

    /// Normalized snake_case name of the role.
    pub fn canonical_name(&self) -> &'static str {
        match self {
            PieceRole::Front => "front",
            PieceRole::Back => "back",
            PieceRole::SleeveRight => "sleeve_right",
            PieceRole::SleeveLeft => "sleeve_left",
            PieceRole::CollarBias => "collar_bias",
            PieceRole::Unknown => "unknown",
        }
    }

    /// Normalized name of a piece with this role and label: the canonical
    /// name, or the normalized label for unknown pieces.
    pub fn normalized_name(&self, label: &str) -> String {
        match self {
            PieceRole::Unknown => normalize_label(label),
            known => known.canonical_name().to_string(),
        }
    }

    /// Label printed on the pattern for this role, if any.
    pub fn pattern_label(&self) -> Option<&'static str> {
        ROLE_VOCABULARY
            .iter()
            .find(|(_, role)| role == self)
            .map(|(name, _)| *name)
    }

    /// Check if a complete garment must contain this role.
    pub fn is_required(&self) -> bool {
        REQUIRED_ROLES.contains(self)
    }
}

impl std::fmt::Display for PieceRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.canonical_name())
    }
}
