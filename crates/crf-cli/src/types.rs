use serde::Serialize;

use crf_model::{FormKind, ValidationResult};

/// Validation outcome for one input record.
#[derive(Debug, Serialize)]
pub struct RecordOutcome {
    /// Position of the record in the input file.
    pub index: usize,
    pub form: FormKind,
    pub subject_identifier: String,
    pub result: ValidationResult,
}

#[derive(Debug, Serialize)]
pub struct RunResult {
    pub records: Vec<RecordOutcome>,
    pub has_errors: bool,
}

impl RunResult {
    pub fn new(records: Vec<RecordOutcome>) -> Self {
        let has_errors = records.iter().any(|record| !record.result.is_valid());
        Self {
            records,
            has_errors,
        }
    }

    pub fn failed_count(&self) -> usize {
        self.records
            .iter()
            .filter(|record| !record.result.is_valid())
            .count()
    }

    pub fn error_count(&self) -> usize {
        self.records
            .iter()
            .map(|record| record.result.error_count())
            .sum()
    }
}
