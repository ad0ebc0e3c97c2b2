use crate::domain::{RawRecord, StandardizedRecord};
use crate::mapping::FieldMapping;

/// Renames raw source columns to their standardized names.
pub struct FieldMapper;

impl FieldMapper {
    /// Build a standardized record from a raw row.
    ///
    /// Walks the mapping in declaration order; a source column absent from
    /// the row contributes an empty string, and values are trimmed of
    /// surrounding whitespace. Never fails and performs no validation.
    /// When two mapping entries share a target column, the later entry wins.
    pub fn standardize(raw: &RawRecord, mapping: &FieldMapping) -> StandardizedRecord {
        let mut record = StandardizedRecord::new();
        for (source, target) in mapping.entries() {
            let value = raw.get(source).map(String::as_str).unwrap_or("");
            record.set(target, value.trim().to_string());
        }
        record
    }
}
