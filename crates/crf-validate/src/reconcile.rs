//! Dose reconciliation against the subject's stored history.
//!
//! Doses of the reference product are administered and recorded by the
//! study, so the stored history is authoritative for them. Other products
//! are self-reported and only checked for slot occupancy.
//!
//! [`check_disqualifying_combination`] does not need the history and runs
//! ahead of the form's field rules. The history checks run in a fixed order:
//!
//! 1. declared dose count against the stored count
//! 2. first-dose product, then first-dose date
//! 3. second-dose product, then second-dose date

use crf_model::{
    DoseSlot, FieldError, HistorySummary, ProtocolConfig, VaccinationHistory, ViolationKind,
};

use crate::accumulator::ErrorAccumulator;

/// Cross-check a vaccination history record against the stored summary.
pub fn reconcile_doses(
    record: &VaccinationHistory,
    history: &HistorySummary,
    protocol: &ProtocolConfig,
    errors: &mut ErrorAccumulator,
) {
    errors.check(|| check_dose_count(record, history, protocol));
    for slot in [DoseSlot::FirstDose, DoseSlot::SecondDose] {
        errors.check(|| check_slot_product(record, history, protocol, slot));
        errors.check(|| check_slot_date(record, history, protocol, slot));
    }
}

/// Two doses including the disqualifying product make the subject ineligible.
pub fn check_disqualifying_combination(
    record: &VaccinationHistory,
    protocol: &ProtocolConfig,
) -> Result<(), FieldError> {
    if record.dose_quantity.as_deref() != Some("2") {
        return Ok(());
    }
    let dose1 = record.dose1_product_name.as_deref();
    let dose2 = record.dose2_product_name.as_deref();
    if protocol.is_disqualifying_product(dose1) || protocol.is_disqualifying_product(dose2) {
        return Err(FieldError::new(
            "dose2_product_name",
            ViolationKind::EligibilityExclusion,
            format!(
                "Participant has received {} and {} therefore they are not eligible to participate",
                dose1.unwrap_or_default(),
                dose2.unwrap_or_default()
            ),
        ));
    }
    Ok(())
}

/// The declared dose count must match the number of stored doses, unless
/// either declared product is the reference product.
///
/// A missing quantity declares zero doses; a quantity that is not an
/// integer never matches.
pub fn check_dose_count(
    record: &VaccinationHistory,
    history: &HistorySummary,
    protocol: &ProtocolConfig,
) -> Result<(), FieldError> {
    let exempt = protocol.is_reference_product(record.dose1_product_name.as_deref())
        || protocol.is_reference_product(record.dose2_product_name.as_deref());
    if exempt {
        return Ok(());
    }
    let declared = match record.dose_quantity.as_deref().map(str::trim) {
        None | Some("") => Some(0),
        Some(quantity) => quantity.parse::<usize>().ok(),
    };
    if declared == Some(history.recorded_dose_count) {
        return Ok(());
    }
    Err(FieldError::new(
        "dose_quantity",
        ViolationKind::HistoryCountMismatch,
        format!(
            "The participant has received {} doses of {}, Please correct your entry",
            history.recorded_dose_count, protocol.reference_product_label
        ),
    ))
}

/// Declared product for a slot must agree with whether the study recorded
/// a reference-product dose in that slot.
pub fn check_slot_product(
    record: &VaccinationHistory,
    history: &HistorySummary,
    protocol: &ProtocolConfig,
    slot: DoseSlot,
) -> Result<(), FieldError> {
    let declared_reference = protocol.is_reference_product(record.product(slot));
    let stored = history.event(slot).is_some();
    let message = match (declared_reference, stored) {
        (true, false) => format!(
            "The EDC has no record that the participant received {} as a {}, \
             Please recheck the participant's dose records",
            protocol.reference_product_label,
            slot_label(slot)
        ),
        (false, true) => format!(
            "The EDC has a record that the participant received {} as a {}, \
             Please recheck the participant's dose records",
            protocol.reference_product_label,
            slot_label(slot)
        ),
        _ => return Ok(()),
    };
    Err(FieldError::new(
        product_field(slot),
        ViolationKind::HistoryProductMismatch,
        message,
    ))
}

/// A declared reference-product dose must carry the stored dose date.
pub fn check_slot_date(
    record: &VaccinationHistory,
    history: &HistorySummary,
    protocol: &ProtocolConfig,
    slot: DoseSlot,
) -> Result<(), FieldError> {
    if !protocol.is_reference_product(record.product(slot)) {
        return Ok(());
    }
    let Some(stored) = history.event(slot) else {
        return Ok(());
    };
    let stored_date = stored.vaccination_date.date();
    if record.dose_date(slot) == Some(stored_date) {
        return Ok(());
    }
    Err(FieldError::new(
        date_field(slot),
        ViolationKind::HistoryDateMismatch,
        format!(
            "The participant received {} as {} on date {}",
            protocol.reference_product_label,
            slot_label(slot),
            stored_date
        ),
    ))
}

fn slot_label(slot: DoseSlot) -> &'static str {
    match slot {
        DoseSlot::FirstDose => "first dose",
        DoseSlot::SecondDose => "second dose",
    }
}

fn product_field(slot: DoseSlot) -> &'static str {
    match slot {
        DoseSlot::FirstDose => "dose1_product_name",
        DoseSlot::SecondDose => "dose2_product_name",
    }
}

fn date_field(slot: DoseSlot) -> &'static str {
    match slot {
        DoseSlot::FirstDose => "dose1_date",
        DoseSlot::SecondDose => "dose2_date",
    }
}
