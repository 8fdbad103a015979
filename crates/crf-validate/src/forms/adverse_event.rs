use crf_model::{AdverseEvent, AeOutcome, AeStatus, YesNo};

use crate::accumulator::ErrorAccumulator;
use crate::rules::{RuleMode, field_rule};
use crate::temporal;

pub fn validate(record: &AdverseEvent, errors: &mut ErrorAccumulator) {
    errors.check(|| {
        field_rule!(
            RuleMode::Required,
            AdverseEvent,
            status in &[&AeStatus::Resolved] => stop_date
        )
        .with_message("AE is resolved, please provide the AE end date")
        .apply(record)?;
        temporal::not_before("stop_date", record.stop_date, record.start_date, || {
            "AE end date can not be before AE start date".to_string()
        })
    });
    errors.check(|| {
        field_rule!(
            RuleMode::Required,
            AdverseEvent,
            outcome in &[&AeOutcome::ResolvedWithSequelae] => sequelae_specify
        )
        .apply(record)
    });
    errors.check(|| {
        field_rule!(
            RuleMode::Required,
            AdverseEvent,
            medically_attended_ae in &[&YesNo::Yes] => maae_specify
        )
        .apply(record)
    });
    errors.check(|| {
        field_rule!(
            RuleMode::Required,
            AdverseEvent,
            treatment_given in &[&YesNo::Yes] => treatmnt_given_specify
        )
        .apply(record)
    });
    errors.check(|| {
        field_rule!(
            RuleMode::Required,
            AdverseEvent,
            ae_study_discontinued in &[&YesNo::Yes] => discontn_dt
        )
        .apply(record)
    });
}
