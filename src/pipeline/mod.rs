pub mod mapper;
pub mod validate;

use tracing::{debug, info};

use crate::domain::{fields, RawRecord, StandardizedRecord};
use crate::mapping::FieldMapping;
use crate::pipeline::mapper::FieldMapper;
use crate::pipeline::validate::RecordValidator;

/// The two disjoint, order-preserving outcome sets of one pipeline pass.
#[derive(Debug, Default)]
pub struct Partition {
    pub clean: Vec<StandardizedRecord>,
    pub rejected: Vec<StandardizedRecord>,
}

impl Partition {
    pub fn total(&self) -> usize {
        self.clean.len() + self.rejected.len()
    }
}

/// Drives one pass over the raw feed: map, validate, stamp provenance, route.
pub struct Pipeline {
    mapping: FieldMapping,
    validator: RecordValidator,
}

impl Pipeline {
    pub fn new(mapping: FieldMapping) -> Self {
        Self {
            mapping,
            validator: RecordValidator::new(),
        }
    }

    pub fn with_validator(mapping: FieldMapping, validator: RecordValidator) -> Self {
        Self { mapping, validator }
    }

    /// Process the feed in input order.
    ///
    /// Row numbering is 1-based and assigned before the clean/rejected split,
    /// so the numbers across both partitions merge back into 1..=N. Data
    /// content never aborts the run; every row lands in exactly one
    /// partition.
    pub fn run(&self, raw_rows: &[RawRecord], source_file: &str) -> Partition {
        let mut partition = Partition::default();

        for (index, raw) in raw_rows.iter().enumerate() {
            let row_number = index + 1;
            let mut record = FieldMapper::standardize(raw, &self.mapping);
            let violations = self.validator.validate(&record);

            record.set(fields::SOURCE_FILE, source_file.to_string());
            record.set(fields::RAW_ROW_NUMBER, row_number.to_string());

            if violations.is_empty() {
                partition.clean.push(record);
            } else {
                debug!("Row {} rejected: {}", row_number, violations.join("; "));
                record.set(fields::ERRORS, violations.join("; "));
                partition.rejected.push(record);
            }
        }

        info!(
            clean = partition.clean.len(),
            rejected = partition.rejected.len(),
            source_file,
            "Pipeline pass complete"
        );
        partition
    }
}
