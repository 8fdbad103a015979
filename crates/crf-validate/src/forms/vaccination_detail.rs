//! Vaccination detail form: one dose administered at a study visit.

use crf_model::{
    DoseSlot, FieldValue, Location, ProtocolConfig, ReceivedDoseBefore, VaccinationDetail, YesNo,
};
use tracing::trace;

use crate::accumulator::ErrorAccumulator;
use crate::history::HistoryLookup;
use crate::rules::{FieldRule, RuleMode, field_rule, required_if};
use crate::temporal;

type DetailRule<C> = FieldRule<VaccinationDetail, C>;

/// Fields that must be answered once the dose was received.
fn received_dose_required() -> [DetailRule<YesNo>; 8] {
    use RuleMode::Required;
    [
        field_rule!(Required, VaccinationDetail, received_dose in &[&YesNo::Yes] => vaccination_site),
        field_rule!(Required, VaccinationDetail, received_dose in &[&YesNo::Yes] => vaccination_date),
        field_rule!(Required, VaccinationDetail, received_dose in &[&YesNo::Yes] => lot_number),
        field_rule!(Required, VaccinationDetail, received_dose in &[&YesNo::Yes] => kit_serial),
        field_rule!(Required, VaccinationDetail, received_dose in &[&YesNo::Yes] => expiry_date),
        field_rule!(Required, VaccinationDetail, received_dose in &[&YesNo::Yes] => provider_name),
        field_rule!(Required, VaccinationDetail, received_dose in &[&YesNo::Yes] => part_supervised),
        field_rule!(Required, VaccinationDetail, received_dose in &[&YesNo::Yes] => adverse_event),
    ]
}

/// Fields that only apply once the dose was received.
fn received_dose_applicable() -> [DetailRule<YesNo>; 3] {
    use RuleMode::Applicable;
    [
        field_rule!(Applicable, VaccinationDetail, received_dose in &[&YesNo::Yes] => received_dose_before),
        field_rule!(Applicable, VaccinationDetail, received_dose in &[&YesNo::Yes] => location),
        field_rule!(Applicable, VaccinationDetail, received_dose in &[&YesNo::Yes] => admin_per_protocol),
    ]
}

pub fn validate<H: HistoryLookup>(
    record: &VaccinationDetail,
    history: &H,
    protocol: &ProtocolConfig,
    errors: &mut ErrorAccumulator,
) {
    for rule in received_dose_required() {
        errors.check(|| rule.apply(record));
    }
    for rule in received_dose_applicable() {
        errors.check(|| rule.apply(record));
    }

    errors.check(|| {
        required_if(
            record.admin_per_protocol == Some(YesNo::No),
            "reason_not_per_protocol",
            record.reason_not_per_protocol.presence(),
            None,
        )
    });
    errors.check(|| {
        field_rule!(
            RuleMode::OtherSpecifyRequired,
            VaccinationDetail,
            location in &[&Location::Other] => location_other
        )
        .apply(record)
    });
    errors.check(|| {
        field_rule!(
            RuleMode::Required,
            VaccinationDetail,
            received_dose_before in &[&ReceivedDoseBefore::FirstDose] => next_vaccination_date
        )
        .apply(record)
    });

    let vaccination_date = record.vaccination_date.map(|value| value.date());
    errors.check(|| {
        temporal::not_before("expiry_date", record.expiry_date, vaccination_date, || {
            "Expiry date cannot be before the vaccination date".to_string()
        })
    });

    match record.received_dose_before {
        Some(ReceivedDoseBefore::FirstDose) => {
            errors.check(|| {
                temporal::at_least_days_after(
                    "next_vaccination_date",
                    record.next_vaccination_date,
                    vaccination_date,
                    protocol.dose_interval_days,
                    |opens| {
                        format!(
                            "The next vaccination date must be on or after {opens}, {} days \
                             after this dose",
                            protocol.dose_interval_days
                        )
                    },
                )
            });
        }
        Some(ReceivedDoseBefore::SecondDose) => {
            if errors.is_halted() || vaccination_date.is_none() {
                return;
            }
            let summary = history.get_history(&record.subject_identifier);
            let Some(first_dose) = summary.event(DoseSlot::FirstDose) else {
                trace!("no stored first dose, skipping dosing window");
                return;
            };
            let first_date = first_dose.vaccination_date.date();
            errors.check(|| {
                temporal::after("vaccination_date", vaccination_date, Some(first_date), || {
                    format!(
                        "The second dose cannot be given on or before the first dose \
                         administered on {first_date}"
                    )
                })?;
                temporal::at_least_days_after(
                    "vaccination_date",
                    vaccination_date,
                    Some(first_date),
                    protocol.dose_interval_days,
                    |opens| {
                        format!(
                            "The second dose can only be given from {opens}, {} days after the \
                             first dose on {first_date}",
                            protocol.dose_interval_days
                        )
                    },
                )
            });
        }
        Some(ReceivedDoseBefore::NotApplicable) | None => {}
    }
}
