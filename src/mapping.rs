use indexmap::IndexMap;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::error::{OnboarderError, Result};

/// Source column -> standardized column, applied in declaration order.
///
/// Loaded once at startup from a JSON object file; immutable for the run.
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct FieldMapping {
    entries: IndexMap<String, String>,
}

impl FieldMapping {
    /// Load the mapping resource. A missing or malformed file is a fatal
    /// startup error: no row may be processed without the mapping.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            OnboarderError::Config(format!(
                "failed to read field mapping '{}': {}",
                path.display(),
                e
            ))
        })?;

        let mapping: FieldMapping = serde_json::from_str(&contents)?;
        info!(
            "Loaded field mapping with {} entries from {}",
            mapping.len(),
            path.display()
        );

        Ok(mapping)
    }

    /// Mapping pairs in declaration order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, String)> for FieldMapping {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
