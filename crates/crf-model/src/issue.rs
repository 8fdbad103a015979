use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Category of a field-keyed validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// A dependent field was empty when required.
    FieldRequired,
    /// A field held a value when it should have been "not applicable", or vice versa.
    FieldApplicability,
    /// Two dates violate a required ordering.
    TemporalOrder,
    /// A date falls outside a protocol-defined window relative to another date.
    TemporalWindow,
    /// Declared dose count disagrees with the stored count.
    HistoryCountMismatch,
    /// Declared product identity disagrees with stored slot occupancy.
    HistoryProductMismatch,
    /// Declared dose date disagrees with the stored slot date.
    HistoryDateMismatch,
    /// Declared product combination disqualifies the subject.
    EligibilityExclusion,
}

impl ViolationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViolationKind::FieldRequired => "field_required",
            ViolationKind::FieldApplicability => "field_applicability",
            ViolationKind::TemporalOrder => "temporal_order",
            ViolationKind::TemporalWindow => "temporal_window",
            ViolationKind::HistoryCountMismatch => "history_count_mismatch",
            ViolationKind::HistoryProductMismatch => "history_product_mismatch",
            ViolationKind::HistoryDateMismatch => "history_date_mismatch",
            ViolationKind::EligibilityExclusion => "eligibility_exclusion",
        }
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validation failure attached to one field, for display next to that field.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{field}: {message}")]
pub struct FieldError {
    pub field: String,
    pub kind: ViolationKind,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, kind: ViolationKind, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            kind,
            message: message.into(),
        }
    }
}

/// Outcome of validating one record.
///
/// `field_errors` keeps detection order and holds at most one error per
/// field. The record is valid exactly when `field_errors` is empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    is_valid: bool,
    field_errors: Vec<FieldError>,
}

impl ValidationResult {
    pub fn valid() -> Self {
        Self::from_errors(Vec::new())
    }

    pub fn from_errors(field_errors: Vec<FieldError>) -> Self {
        Self {
            is_valid: field_errors.is_empty(),
            field_errors,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn field_errors(&self) -> &[FieldError] {
        &self.field_errors
    }

    pub fn error_count(&self) -> usize {
        self.field_errors.len()
    }

    /// The error reported for `field`, if any.
    pub fn error_for(&self, field: &str) -> Option<&FieldError> {
        self.field_errors.iter().find(|error| error.field == field)
    }

    pub fn has_error(&self, field: &str) -> bool {
        self.error_for(field).is_some()
    }

    pub fn into_errors(self) -> Vec<FieldError> {
        self.field_errors
    }
}
