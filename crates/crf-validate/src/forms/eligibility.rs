use crf_model::{EligibilityConfirmation, ProtocolConfig};

use crate::accumulator::ErrorAccumulator;
use crate::temporal;

/// The report cannot predate the study opening.
pub fn validate(
    record: &EligibilityConfirmation,
    protocol: &ProtocolConfig,
    errors: &mut ErrorAccumulator,
) {
    let report_date = record.report_datetime.map(|value| value.date());
    errors.check(|| {
        temporal::not_before(
            "report_datetime",
            report_date,
            Some(protocol.study_open_date),
            || {
                format!(
                    "Date cannot be before study starts. Study opened on {}.",
                    protocol.study_open_date
                )
            },
        )
    });
}
