//! Wearer - the person a garment is made for.

use serde::{Deserialize, Serialize};

/// Player or customer a garment is assigned to by the order stage.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Wearer {
    /// Name printed on the back piece.
    pub name: String,
    /// Shirt number; free text ("7", "00", "A").
    pub number: Option<String>,
    /// Ordered size label.
    pub size: String,
    /// Sponsor or team the garment belongs to.
    pub sponsor: String,
}

impl Wearer {
    /// Create a new wearer. Fields are trimmed and the size upper-cased.
    pub fn new(name: &str, number: Option<&str>, size: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            number: number
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .map(str::to_string),
            size: size.trim().to_uppercase(),
            sponsor: String::new(),
        }
    }

    /// Set the sponsor.
    pub fn with_sponsor(mut self, sponsor: &str) -> Self {
        self.sponsor = sponsor.trim().to_string();
        self
    }

    /// Number and name, e.g. "10 GARCIA".
    pub fn full_identifier(&self) -> String {
        match &self.number {
            Some(number) => format!("{} {}", number, self.name),
            None => self.name.clone(),
        }
    }
}
