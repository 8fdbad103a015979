pub mod error;
pub mod history;
pub mod issue;
pub mod protocol;
pub mod record;
pub mod values;

pub use error::{CrfError, Result};
pub use history::{DoseEvent, HistorySummary};
pub use issue::{FieldError, ValidationResult, ViolationKind};
pub use protocol::{ErrorPolicy, ProtocolConfig, ValidationOptions};
pub use record::{
    AdverseEvent, EligibilityConfirmation, FormKind, PregnancyStatus, Record, VaccinationDetail,
    VaccinationHistory,
};
pub use values::{
    AeOutcome, AeStatus, Contraceptive, DoseSlot, FieldValue, Location, NOT_APPLICABLE, OTHER,
    PostMenopausal, Presence, ReceivedDoseBefore, YesNo,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_result_counts() {
        let result = ValidationResult::from_errors(vec![
            FieldError::new(
                "vaccination_site",
                ViolationKind::FieldRequired,
                "This field is required.",
            ),
            FieldError::new(
                "stop_date",
                ViolationKind::TemporalOrder,
                "AE end date can not be before AE start date",
            ),
        ]);
        assert_eq!(result.error_count(), 2);
        assert!(!result.is_valid());
        assert!(result.has_error("stop_date"));
        assert!(ValidationResult::valid().is_valid());
    }

    #[test]
    fn record_serializes_with_form_tag() {
        let record = Record::EligibilityConfirmation(EligibilityConfirmation {
            subject_identifier: "S-001".to_string(),
            report_datetime: None,
        });
        let json = serde_json::to_string(&record).expect("serialize record");
        assert!(json.contains("\"form\":\"eligibility_confirmation\""));
        let round: Record = serde_json::from_str(&json).expect("deserialize record");
        assert_eq!(round.form(), FormKind::EligibilityConfirmation);
    }
}
