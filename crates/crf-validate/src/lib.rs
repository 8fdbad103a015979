//! Validation for study visit forms.
//!
//! A [`RecordValidator`] runs the conditional field rules of a form, its
//! temporal checks and, for vaccination forms, the reconciliation of the
//! submitted doses against the subject's stored history.
//!
//! ```
//! use chrono::NaiveDate;
//! use crf_model::{EligibilityConfirmation, ProtocolConfig, Record};
//! use crf_validate::{InMemoryHistory, RecordValidator};
//!
//! let protocol = ProtocolConfig::new(NaiveDate::from_ymd_opt(2021, 2, 1).unwrap());
//! let history = InMemoryHistory::new();
//! let validator = RecordValidator::new(&history, &protocol);
//!
//! let record = Record::EligibilityConfirmation(EligibilityConfirmation {
//!     subject_identifier: "S-001".to_string(),
//!     report_datetime: NaiveDate::from_ymd_opt(2021, 1, 31)
//!         .unwrap()
//!         .and_hms_opt(9, 0, 0),
//! });
//! let result = validator.validate(&record);
//! assert!(result.has_error("report_datetime"));
//! ```

pub mod accumulator;
pub mod forms;
pub mod history;
pub mod reconcile;
pub mod rules;
pub mod temporal;
mod validator;

pub use accumulator::ErrorAccumulator;
pub use history::{HistoryLookup, InMemoryHistory};
pub use reconcile::reconcile_doses;
pub use rules::{FieldRule, RuleMode};
pub use validator::RecordValidator;
