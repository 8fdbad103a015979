//! Record validation entry point.

use tracing::{debug, debug_span};

use crf_model::{ProtocolConfig, Record, ValidationOptions, ValidationResult};

use crate::accumulator::ErrorAccumulator;
use crate::forms;
use crate::history::HistoryLookup;

/// Validates submitted records against protocol constants and the subject's
/// stored history.
///
/// Holds no state between calls. The history store is queried at most once
/// per call, and only for vaccination forms.
#[derive(Debug, Clone)]
pub struct RecordValidator<'a, H> {
    history: &'a H,
    protocol: &'a ProtocolConfig,
    options: ValidationOptions,
}

impl<'a, H: HistoryLookup> RecordValidator<'a, H> {
    pub fn new(history: &'a H, protocol: &'a ProtocolConfig) -> Self {
        Self {
            history,
            protocol,
            options: ValidationOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ValidationOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> ValidationOptions {
        self.options
    }

    pub fn validate(&self, record: &Record) -> ValidationResult {
        let span = debug_span!("validate", form = %record.form());
        let _guard = span.enter();

        let mut errors = ErrorAccumulator::new(self.options.error_policy);
        match record {
            Record::VaccinationDetail(detail) => {
                forms::vaccination_detail::validate(detail, self.history, self.protocol, &mut errors);
            }
            Record::VaccinationHistory(history) => {
                forms::vaccination_history::validate(
                    history,
                    self.history,
                    self.protocol,
                    &mut errors,
                );
            }
            Record::AdverseEvent(event) => forms::adverse_event::validate(event, &mut errors),
            Record::PregnancyStatus(status) => {
                forms::pregnancy_status::validate(status, &mut errors);
            }
            Record::EligibilityConfirmation(confirmation) => {
                forms::eligibility::validate(confirmation, self.protocol, &mut errors);
            }
        }

        let policy = errors.policy();
        let result = errors.finish();
        debug!(
            ?policy,
            valid = result.is_valid(),
            errors = result.error_count(),
            "validation finished"
        );
        result
    }

    /// Validate a batch of records independently, preserving input order.
    pub fn validate_all<'r, I>(&self, records: I) -> Vec<ValidationResult>
    where
        I: IntoIterator<Item = &'r Record>,
    {
        records
            .into_iter()
            .map(|record| self.validate(record))
            .collect()
    }
}
