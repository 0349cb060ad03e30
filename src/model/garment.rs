//! Garment - the full set of pieces for one size.

use super::{Piece, PieceRole, Wearer, REQUIRED_ROLES};
use crate::error::{PatternError, Result};
use serde::{Deserialize, Serialize};

/// All pieces of one garment size, in page order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Garment {
    /// Size label shared by every piece.
    pub size: String,
    /// Pieces in insertion (page) order.
    pieces: Vec<Piece>,
    /// Wearer attached by the order stage.
    wearer: Option<Wearer>,
}

impl Garment {
    /// Create an empty garment for a size.
    pub fn new(size: impl Into<String>) -> Self {
        Self {
            size: size.into(),
            ..Default::default()
        }
    }

    /// Add a piece. Fails if the piece belongs to another size.
    pub fn add_piece(&mut self, piece: Piece) -> Result<()> {
        if piece.size != self.size {
            return Err(PatternError::SizeMismatch {
                piece: piece.size,
                garment: self.size.clone(),
            });
        }
        self.pieces.push(piece);
        Ok(())
    }

    /// Pieces in page order.
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    #[cfg(test)]
    pub(crate) fn pieces_mut(&mut self) -> &mut [Piece] {
        &mut self.pieces
    }

    /// Find a piece by its raw label (ignoring case) or normalized name.
    pub fn piece_by_name(&self, name: &str) -> Option<&Piece> {
        let lower = name.to_lowercase();
        self.pieces
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name) || p.normalized_name == lower)
    }

    /// First piece with the given role.
    pub fn piece_by_role(&self, role: PieceRole) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.role == role)
    }

    /// First back piece in page order (where name and number are printed).
    pub fn back_piece(&self) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.is_back_piece())
    }

    /// Sum of all piece areas in mm².
    pub fn total_area(&self) -> f64 {
        self.pieces.iter().map(Piece::area).sum()
    }

    /// Footprint of the pieces stacked vertically: (widest piece, sum of heights) in mm.
    pub fn bounding_box(&self) -> (f64, f64) {
        if self.pieces.is_empty() {
            return (0.0, 0.0);
        }

        let max_width = self.pieces.iter().map(Piece::width).fold(0.0, f64::max);
        let total_height: f64 = self.pieces.iter().map(Piece::height).sum();

        (max_width, total_height)
    }

    /// Required roles not present among the pieces.
    pub fn missing_roles(&self) -> Vec<PieceRole> {
        REQUIRED_ROLES
            .iter()
            .copied()
            .filter(|role| !self.pieces.iter().any(|p| p.role == *role))
            .collect()
    }

    /// Check if the garment has every required piece.
    pub fn is_complete(&self) -> bool {
        self.missing_roles().is_empty()
    }

    /// Area per piece label, in page order.
    pub fn area_summary(&self) -> Vec<(String, f64)> {
        self.pieces
            .iter()
            .map(|p| (p.name.clone(), p.area()))
            .collect()
    }

    /// Attach the wearer.
    pub fn assign_wearer(&mut self, wearer: Wearer) {
        self.wearer = Some(wearer);
    }

    /// Attached wearer, if any.
    pub fn wearer(&self) -> Option<&Wearer> {
        self.wearer.as_ref()
    }

    /// Check if a wearer is attached.
    pub fn has_wearer(&self) -> bool {
        self.wearer.is_some()
    }

    /// Identifier such as "M_10 GARCIA" or "M_unassigned".
    pub fn identifier(&self) -> String {
        match &self.wearer {
            Some(wearer) => format!("{}_{}", self.size, wearer.full_identifier()),
            None => format!("{}_unassigned", self.size),
        }
    }
}
