//! Piece identity resolution from page text.

use crate::model::{PieceRole, ROLE_VOCABULARY};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Label used when a page carries no recognizable piece name.
pub const UNKNOWN_LABEL: &str = "UNKNOWN";

/// Identity of the piece drawn on a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceIdentity {
    /// Label as found in the text, or [`UNKNOWN_LABEL`].
    pub name: String,
    /// Canonical role.
    pub role: PieceRole,
    /// Canonical role name, or the normalized label for unknown pieces.
    pub normalized_name: String,
}

impl PieceIdentity {
    fn from_label(label: &str) -> Self {
        // Text runs may break a label across lines
        let name = label.split_whitespace().collect::<Vec<_>>().join(" ");
        let role = PieceRole::from_label(&name);
        let normalized_name = role.normalized_name(&name);
        Self {
            name,
            role,
            normalized_name,
        }
    }
}

/// Resolve the piece identity from a page's text.
///
/// Tries, in order: an explicit `Piece Name:` / `PIEZA:` label, a vocabulary
/// keyword anywhere in the text (ignoring case), and finally [`UNKNOWN_LABEL`].
/// Never fails.
pub fn resolve_identity(text: &str) -> PieceIdentity {
    let label = explicit_label(text)
        .or_else(|| vocabulary_keyword(text))
        .unwrap_or(UNKNOWN_LABEL);
    PieceIdentity::from_label(label)
}

/// Value of a `Piece Name:` or `PIEZA:` label, rest of line, trimmed.
fn explicit_label(text: &str) -> Option<&str> {
    static LABEL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = LABEL_REGEX.get_or_init(|| {
        Regex::new(r"(?i)(?:piece\s+name|pieza)\s*:[ \t]*([^\r\n]+)").expect("invalid label regex")
    });

    regex
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .find(|label| !label.is_empty())
}

/// First vocabulary keyword found in the text, as written there.
fn vocabulary_keyword(text: &str) -> Option<&str> {
    static KEYWORD_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = KEYWORD_REGEX.get_or_init(|| {
        let alternatives: Vec<String> = ROLE_VOCABULARY
            .iter()
            .map(|(name, _)| regex::escape(name).replace(' ', r"\s+"))
            .collect();
        Regex::new(&format!("(?i)({})", alternatives.join("|"))).expect("invalid keyword regex")
    });

    regex.find(text).map(|m| m.as_str())
}
