//! Loading a directory of pattern documents into a PatternSet.

use super::document::load_pattern_file;
use crate::config::{DuplicateSizePolicy, LoaderConfig};
use crate::error::{PatternError, Result};
use crate::model::PatternSet;
use crate::validation::ValidationResult;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// Result of loading a pattern directory: whatever could be built, plus
/// everything that went wrong along the way.
#[derive(Debug)]
pub struct PatternLoad {
    /// Garments indexed by size label.
    pub patterns: PatternSet,
    /// Skipped documents (errors), incomplete garments and size collisions
    /// (warnings).
    pub report: ValidationResult,
}

/// Loads every pattern document in a directory.
#[derive(Debug, Clone)]
pub struct PatternLoader {
    dir: PathBuf,
    config: LoaderConfig,
}

impl PatternLoader {
    /// Create a loader for a directory with the default configuration.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            config: LoaderConfig::default(),
        }
    }

    /// Use a specific configuration.
    pub fn with_config(mut self, config: LoaderConfig) -> Self {
        self.config = config;
        self
    }

    /// Pattern directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Loader configuration.
    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// List pattern documents in the directory, sorted by path.
    pub fn discover(&self) -> Result<Vec<PathBuf>> {
        if !self.dir.is_dir() {
            return Err(PatternError::DirectoryNotFound {
                path: self.dir.clone(),
            });
        }

        let mut paths = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            let matches = path.is_file()
                && path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| self.config.matches_extension(ext));
            if matches {
                paths.push(path);
            }
        }
        paths.sort();

        Ok(paths)
    }

    /// Load every document into a PatternSet.
    ///
    /// Only a missing or unreadable directory fails. Unreadable documents are
    /// skipped and reported; size collisions follow the configured
    /// [`DuplicateSizePolicy`] and are reported as warnings.
    pub fn load(&self) -> Result<PatternLoad> {
        let paths = self.discover()?;
        info!("Found {} pattern documents in {}", paths.len(), self.dir.display());

        let mut load = PatternLoad {
            patterns: PatternSet::new(),
            report: ValidationResult::ok(),
        };
        let mut sources: BTreeMap<String, PathBuf> = BTreeMap::new();

        for path in paths {
            let file = display_name(&path);

            let document = match load_pattern_file(&path, &self.config) {
                Ok(document) => document,
                Err(e) => {
                    error!("Skipping {}: {}", file, e);
                    load.report.add_error(format!("{}: {}", file, e));
                    continue;
                }
            };

            for warning in &document.warnings {
                load.report.add_warning(format!("{}: {}", file, warning));
            }

            let size = document.garment.size.clone();
            if !document.is_complete() {
                let names: Vec<&str> = document
                    .missing_roles
                    .iter()
                    .map(|r| r.canonical_name())
                    .collect();
                load.report.add_warning(format!(
                    "Size {}: incomplete garment in {}, missing {}",
                    size,
                    file,
                    names.join(", ")
                ));
            }

            if let Some(previous) = sources.get(&size).map(|p| display_name(p)) {
                match self.config.duplicate_policy {
                    DuplicateSizePolicy::KeepLast => {
                        warn!("Size {}: {} replaces {}", size, file, previous);
                        load.report.add_warning(format!(
                            "Size {}: {} replaces {}",
                            size, file, previous
                        ));
                    }
                    DuplicateSizePolicy::KeepFirst => {
                        warn!("Size {}: keeping {}, ignoring {}", size, previous, file);
                        load.report.add_warning(format!(
                            "Size {}: keeping {}, ignoring {}",
                            size, previous, file
                        ));
                        continue;
                    }
                }
            }

            sources.insert(size, path);
            load.patterns.insert(document.garment);
        }

        info!(
            "Loaded {} sizes: {}",
            load.patterns.len(),
            load.patterns.sizes().join(", ")
        );

        Ok(load)
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
