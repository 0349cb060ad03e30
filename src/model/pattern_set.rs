//! PatternSet - garments indexed by size label.

use super::Garment;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One garment per size label.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PatternSet {
    garments: BTreeMap<String, Garment>,
}

impl PatternSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a garment under its size label, returning the one it replaced.
    pub fn insert(&mut self, garment: Garment) -> Option<Garment> {
        self.garments.insert(garment.size.clone(), garment)
    }

    /// Look up a garment by size. The lookup upper-cases the label.
    pub fn get(&self, size: &str) -> Option<&Garment> {
        self.garments
            .get(size)
            .or_else(|| self.garments.get(&size.trim().to_uppercase()))
    }

    /// Check if a size is available.
    pub fn contains(&self, size: &str) -> bool {
        self.get(size).is_some()
    }

    /// Available size labels, sorted.
    pub fn sizes(&self) -> Vec<String> {
        self.garments.keys().cloned().collect()
    }

    /// Requested sizes that have no pattern, in request order without repeats.
    pub fn missing_sizes<S: AsRef<str>>(&self, requested: &[S]) -> Vec<String> {
        let mut missing: Vec<String> = Vec::new();
        for size in requested {
            let size = size.as_ref().trim().to_uppercase();
            if !self.contains(&size) && !missing.contains(&size) {
                missing.push(size);
            }
        }
        missing
    }

    /// Iterate over (size, garment) pairs in size order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Garment)> {
        self.garments.iter()
    }

    /// Number of sizes.
    pub fn len(&self) -> usize {
        self.garments.len()
    }

    /// Check if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.garments.is_empty()
    }
}
