//! Loading one size's pattern document into a Garment.

use crate::config::{CurvePolicy, LoaderConfig};
use crate::error::Result;
use crate::model::{Garment, Piece, PieceRole};
use crate::parser::{
    resolve_identity, size_from_filename, PageContent, PdfDocument, VectorDocument, UNKNOWN_LABEL,
};
use crate::transform::reduce_to_polygon;
use crate::units::pt_to_mm;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, warn};

/// Result of loading one document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentLoad {
    /// Garment with one piece per page, in page order.
    pub garment: Garment,
    /// Required roles with no piece in the document.
    pub missing_roles: Vec<PieceRole>,
    /// Degraded pages and similar non-fatal problems.
    pub warnings: Vec<String>,
}

impl DocumentLoad {
    /// Check if the garment has every required piece.
    pub fn is_complete(&self) -> bool {
        self.missing_roles.is_empty()
    }
}

/// Load a pattern PDF. The size label comes from the file name.
pub fn load_pattern_file(path: &Path, config: &LoaderConfig) -> Result<DocumentLoad> {
    let size = size_from_filename(path);
    info!("Loading {} as size {}", path.display(), size);

    // Dropped at the end of this scope, including on early returns
    let doc = PdfDocument::open(path)?;
    load_document(&doc, &size, config)
}

/// Build a garment from every page of a document.
///
/// A page that cannot be read still yields an `UNKNOWN` piece with no
/// geometry, so the piece count always matches the page count. Missing
/// required roles are reported, never fatal.
pub fn load_document<D>(doc: &D, size: &str, config: &LoaderConfig) -> Result<DocumentLoad>
where
    D: VectorDocument + ?Sized,
{
    let mut garment = Garment::new(size);
    let mut warnings = Vec::new();

    for index in 0..doc.page_count() {
        let piece = match doc.page(index) {
            Ok(page) => piece_from_page(&page, size, config.curve_policy),
            Err(e) => {
                warn!("Size {}: page {} unreadable: {}", size, index, e);
                warnings.push(format!("Page {}: {}", index, e));
                Piece::new(UNKNOWN_LABEL, size, 0.0, 0.0, Vec::new()).with_page(index)
            }
        };

        if piece.role == PieceRole::Unknown {
            warnings.push(format!("Page {}: no recognizable piece label", index));
        }
        garment.add_piece(piece)?;
    }

    let missing_roles = garment.missing_roles();
    if !missing_roles.is_empty() {
        let names: Vec<&str> = missing_roles.iter().map(|r| r.canonical_name()).collect();
        warn!("Size {}: missing pieces: {}", size, names.join(", "));
    }

    info!(
        "Size {}: {} pieces, total area {:.0} mm²",
        size,
        garment.pieces().len(),
        garment.total_area()
    );

    Ok(DocumentLoad {
        garment,
        missing_roles,
        warnings,
    })
}

/// Build the piece drawn on one page.
pub fn piece_from_page(page: &PageContent, size: &str, policy: CurvePolicy) -> Piece {
    let identity = resolve_identity(&page.text);
    let vertices = reduce_to_polygon(&page.primitives, policy);

    debug!(
        "Page {}: {} ({}), {} vertices",
        page.index,
        identity.name,
        identity.normalized_name,
        vertices.len()
    );

    Piece::identified(
        identity.name,
        identity.role,
        identity.normalized_name,
        size,
        pt_to_mm(page.width_pt),
        pt_to_mm(page.height_pt),
        vertices,
    )
    .with_page(page.index)
}
