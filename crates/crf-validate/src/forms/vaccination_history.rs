//! Vaccination history form.
//!
//! The disqualifying product combination is checked first, from the declared
//! quantity and products alone. Field rules for the two dose slots follow and
//! the record is then reconciled against the subject's stored doses.

use crf_model::{OTHER, ProtocolConfig, VaccinationHistory, YesNo};
use tracing::debug;

use crate::accumulator::ErrorAccumulator;
use crate::history::HistoryLookup;
use crate::reconcile::{check_disqualifying_combination, reconcile_doses};
use crate::rules::{FieldRule, RuleMode, field_rule};

type HistoryRule = FieldRule<VaccinationHistory, str>;

fn first_dose_required() -> [HistoryRule; 2] {
    use RuleMode::Required;
    [
        field_rule!(Required, VaccinationHistory, deref dose_quantity in &["1", "2"] => dose1_product_name),
        field_rule!(Required, VaccinationHistory, deref dose_quantity in &["1", "2"] => dose1_date),
    ]
}

fn other_product_specify() -> [HistoryRule; 2] {
    use RuleMode::OtherSpecifyRequired;
    [
        field_rule!(OtherSpecifyRequired, VaccinationHistory, deref dose1_product_name in &[OTHER] => dose1_product_other),
        field_rule!(OtherSpecifyRequired, VaccinationHistory, deref dose2_product_name in &[OTHER] => dose2_product_other),
    ]
}

fn second_dose_required() -> [HistoryRule; 2] {
    use RuleMode::Required;
    [
        field_rule!(Required, VaccinationHistory, deref dose_quantity in &["2"] => dose2_product_name),
        field_rule!(Required, VaccinationHistory, deref dose_quantity in &["2"] => dose2_date),
    ]
}

pub fn validate<H: HistoryLookup>(
    record: &VaccinationHistory,
    history: &H,
    protocol: &ProtocolConfig,
    errors: &mut ErrorAccumulator,
) {
    errors.check(|| check_disqualifying_combination(record, protocol));
    errors.check(|| {
        field_rule!(
            RuleMode::Required,
            VaccinationHistory,
            received_vaccine in &[&YesNo::Yes] => dose_quantity
        )
        .apply(record)
    });
    for rule in first_dose_required()
        .into_iter()
        .chain(other_product_specify())
        .chain(second_dose_required())
    {
        errors.check(|| rule.apply(record));
    }

    if errors.is_halted() {
        return;
    }
    let summary = history.get_history(&record.subject_identifier);
    debug!(
        recorded_doses = summary.recorded_dose_count,
        "reconciling against stored doses"
    );
    reconcile_doses(record, &summary, protocol, errors);
}
