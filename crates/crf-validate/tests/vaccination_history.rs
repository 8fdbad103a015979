//! Tests for the vaccination history form and dose reconciliation.

use std::cell::Cell;

use chrono::{NaiveDate, NaiveDateTime};

use crf_model::{
    DoseEvent, DoseSlot, HistorySummary, ProtocolConfig, Record, VaccinationHistory,
    ValidationOptions, ValidationResult, ViolationKind, YesNo,
};
use crf_validate::reconcile::{check_dose_count, check_slot_date};
use crf_validate::{HistoryLookup, InMemoryHistory, RecordValidator};

const SUBJECT: &str = "111111";

fn first_dose_at() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2021, 3, 1)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap()
}

fn second_dose_at() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2021, 4, 26)
        .unwrap()
        .and_hms_opt(10, 30, 0)
        .unwrap()
}

fn protocol() -> ProtocolConfig {
    ProtocolConfig::new(NaiveDate::from_ymd_opt(2021, 2, 1).unwrap())
}

fn event(slot: DoseSlot, at: NaiveDateTime) -> DoseEvent {
    DoseEvent {
        dose_label: slot,
        product_name: "azd_1222".to_string(),
        vaccination_date: at,
    }
}

fn one_dose_store() -> InMemoryHistory {
    InMemoryHistory::new().with_event(SUBJECT, event(DoseSlot::FirstDose, first_dose_at()))
}

fn two_dose_store() -> InMemoryHistory {
    one_dose_store().with_event(SUBJECT, event(DoseSlot::SecondDose, second_dose_at()))
}

fn history_record(quantity: &str) -> VaccinationHistory {
    VaccinationHistory {
        subject_identifier: SUBJECT.to_string(),
        received_vaccine: Some(YesNo::Yes),
        dose_quantity: Some(quantity.to_string()),
        ..VaccinationHistory::default()
    }
}

fn with_dose1(record: VaccinationHistory, product: &str, date: NaiveDate) -> VaccinationHistory {
    VaccinationHistory {
        dose1_product_name: Some(product.to_string()),
        dose1_date: Some(date),
        ..record
    }
}

fn with_dose2(record: VaccinationHistory, product: &str, date: NaiveDate) -> VaccinationHistory {
    VaccinationHistory {
        dose2_product_name: Some(product.to_string()),
        dose2_date: Some(date),
        ..record
    }
}

fn validate(store: &InMemoryHistory, record: VaccinationHistory) -> ValidationResult {
    let protocol = protocol();
    RecordValidator::new(store, &protocol).validate(&Record::VaccinationHistory(record))
}

fn expect_error(result: &ValidationResult, field: &str, kind: ViolationKind) {
    let error = result
        .error_for(field)
        .unwrap_or_else(|| panic!("expected error on {field}, got {:?}", result.field_errors()));
    assert_eq!(error.kind, kind);
}

#[test]
fn dose_quantity_required_when_vaccine_received() {
    let record = VaccinationHistory {
        dose_quantity: None,
        ..history_record("1")
    };
    expect_error(
        &validate(&InMemoryHistory::new(), record),
        "dose_quantity",
        ViolationKind::FieldRequired,
    );
}

#[test]
fn first_dose_fields_required_for_one_or_two_doses() {
    for quantity in ["1", "2"] {
        let result = validate(&two_dose_store(), history_record(quantity));
        expect_error(&result, "dose1_product_name", ViolationKind::FieldRequired);
    }
}

#[test]
fn second_dose_fields_required_for_two_doses() {
    let record = with_dose1(history_record("2"), "pfizer", first_dose_at().date());
    let result = validate(&two_dose_store(), record);
    expect_error(&result, "dose2_product_name", ViolationKind::FieldRequired);
}

#[test]
fn other_product_requires_specification() {
    let record = with_dose1(history_record("1"), "other", first_dose_at().date());
    let result = validate(&one_dose_store(), record);
    expect_error(&result, "dose1_product_other", ViolationKind::FieldRequired);
}

#[test]
fn declared_count_below_stored_count_fails() {
    let record = with_dose1(history_record("1"), "pfizer", first_dose_at().date());
    let result = validate(&two_dose_store(), record);
    expect_error(&result, "dose_quantity", ViolationKind::HistoryCountMismatch);
    assert_eq!(
        result.error_for("dose_quantity").unwrap().message,
        "The participant has received 2 doses of AstraZeneca (AZD 1222), Please correct your entry"
    );
}

#[test]
fn count_matches_single_stored_dose() {
    let record = with_dose1(history_record("1"), "pfizer", first_dose_at().date());
    let summary = one_dose_store().get_history(SUBJECT);
    assert!(check_dose_count(&record, &summary, &protocol()).is_ok());

    let summary = two_dose_store().get_history(SUBJECT);
    let error = check_dose_count(&record, &summary, &protocol()).unwrap_err();
    assert_eq!(error.field, "dose_quantity");
    assert_eq!(error.kind, ViolationKind::HistoryCountMismatch);
}

#[test]
fn reference_product_exempts_count_check() {
    let record = with_dose1(history_record("2"), "azd_1222", first_dose_at().date());
    let summary = one_dose_store().get_history(SUBJECT);
    assert!(check_dose_count(&record, &summary, &protocol()).is_ok());
}

#[test]
fn unparseable_quantity_never_matches() {
    let record = history_record("two");
    let summary = HistorySummary::empty();
    assert!(check_dose_count(&record, &summary, &protocol()).is_err());
}

#[test]
fn no_vaccine_and_no_stored_doses_passes() {
    let record = VaccinationHistory {
        subject_identifier: SUBJECT.to_string(),
        received_vaccine: Some(YesNo::No),
        ..VaccinationHistory::default()
    };
    let result = validate(&InMemoryHistory::new(), record);
    assert!(result.is_valid(), "{:?}", result.field_errors());
}

#[test]
fn non_reference_first_dose_contradicts_stored_dose() {
    let record = with_dose1(history_record("1"), "vin", first_dose_at().date());
    let result = validate(&one_dose_store(), record);
    expect_error(
        &result,
        "dose1_product_name",
        ViolationKind::HistoryProductMismatch,
    );
}

#[test]
fn reference_first_dose_without_stored_dose_fails() {
    let record = with_dose1(history_record("1"), "azd_1222", first_dose_at().date());
    let result = validate(&InMemoryHistory::new(), record);
    let error = result.error_for("dose1_product_name").expect("product error");
    assert_eq!(error.kind, ViolationKind::HistoryProductMismatch);
    assert!(error.message.contains("no record"));
}

#[test]
fn reference_first_dose_date_must_match_stored_date() {
    let record = with_dose1(
        history_record("1"),
        "azd_1222",
        NaiveDate::from_ymd_opt(2021, 3, 2).unwrap(),
    );
    let result = validate(&one_dose_store(), record);
    expect_error(&result, "dose1_date", ViolationKind::HistoryDateMismatch);
    assert!(
        result
            .error_for("dose1_date")
            .unwrap()
            .message
            .ends_with("on date 2021-03-01")
    );
}

#[test]
fn reference_first_dose_on_stored_date_passes() {
    let record = with_dose1(history_record("1"), "azd_1222", first_dose_at().date());
    let result = validate(&one_dose_store(), record);
    assert!(result.is_valid(), "{:?}", result.field_errors());
}

#[test]
fn slot_date_ignored_for_self_reported_products() {
    let record = with_dose1(
        history_record("1"),
        "pfizer",
        NaiveDate::from_ymd_opt(2020, 12, 1).unwrap(),
    );
    let summary = one_dose_store().get_history(SUBJECT);
    assert!(check_slot_date(&record, &summary, &protocol(), DoseSlot::FirstDose).is_ok());
}

#[test]
fn non_reference_second_dose_contradicts_stored_dose() {
    let record = with_dose2(
        with_dose1(history_record("2"), "azd_1222", first_dose_at().date()),
        "vin",
        second_dose_at().date(),
    );
    let result = validate(&two_dose_store(), record);
    expect_error(
        &result,
        "dose2_product_name",
        ViolationKind::HistoryProductMismatch,
    );
}

#[test]
fn two_reference_doses_on_stored_dates_pass() {
    let record = with_dose2(
        with_dose1(history_record("2"), "azd_1222", first_dose_at().date()),
        "azd_1222",
        second_dose_at().date(),
    );
    let result = validate(&two_dose_store(), record);
    assert!(result.is_valid(), "{:?}", result.field_errors());
}

#[test]
fn disqualifying_product_excludes_two_dose_subject() {
    for (dose1, dose2) in [("janssen", "pfizer"), ("pfizer", "janssen")] {
        let record = with_dose2(
            with_dose1(history_record("2"), dose1, first_dose_at().date()),
            dose2,
            second_dose_at().date(),
        );
        let result = validate(&InMemoryHistory::new(), record);
        expect_error(
            &result,
            "dose2_product_name",
            ViolationKind::EligibilityExclusion,
        );
        assert_eq!(
            result.error_for("dose2_product_name").unwrap().message,
            format!(
                "Participant has received {dose1} and {dose2} therefore they are not eligible to participate"
            )
        );
    }
}

#[test]
fn disqualifying_first_dose_excludes_with_blank_second_slot() {
    let record = with_dose1(history_record("2"), "janssen", first_dose_at().date());
    let store = InMemoryHistory::new();
    let protocol = protocol();
    let record = Record::VaccinationHistory(record);

    for options in [ValidationOptions::default(), ValidationOptions::collect_all()] {
        let result = RecordValidator::new(&store, &protocol)
            .with_options(options)
            .validate(&record);
        expect_error(
            &result,
            "dose2_product_name",
            ViolationKind::EligibilityExclusion,
        );
        assert!(
            result
                .error_for("dose2_product_name")
                .unwrap()
                .message
                .starts_with("Participant has received janssen and")
        );
    }
}

#[test]
fn exclusion_reported_before_missing_second_dose_date() {
    let record = VaccinationHistory {
        dose2_product_name: Some("pfizer".to_string()),
        ..with_dose1(history_record("2"), "janssen", first_dose_at().date())
    };
    let result = validate(&InMemoryHistory::new(), record);
    assert_eq!(result.error_count(), 1);
    expect_error(
        &result,
        "dose2_product_name",
        ViolationKind::EligibilityExclusion,
    );
    assert!(!result.has_error("dose2_date"));
}

#[test]
fn disqualifying_product_allowed_for_single_dose() {
    let record = with_dose1(history_record("1"), "janssen", first_dose_at().date());
    let store = InMemoryHistory::new().with_event(
        SUBJECT,
        DoseEvent {
            dose_label: DoseSlot::SecondDose,
            product_name: "azd_1222".to_string(),
            vaccination_date: second_dose_at(),
        },
    );
    let result = validate(&store, record);
    // Count agrees; only the second slot occupancy is contradicted.
    assert!(!result.has_error("dose_quantity"));
    expect_error(
        &result,
        "dose2_product_name",
        ViolationKind::HistoryProductMismatch,
    );
}

#[test]
fn duplicate_stored_slot_uses_first_event() {
    let store = one_dose_store().with_event(
        SUBJECT,
        event(
            DoseSlot::FirstDose,
            NaiveDate::from_ymd_opt(2021, 3, 5)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
        ),
    );
    let summary = store.get_history(SUBJECT);
    assert_eq!(summary.recorded_dose_count, 2);
    assert_eq!(
        summary.event(DoseSlot::FirstDose).unwrap().vaccination_date,
        first_dose_at()
    );
}

#[test]
fn history_is_read_at_validation_time() {
    let mut store = InMemoryHistory::new();
    let record = with_dose1(history_record("1"), "pfizer", first_dose_at().date());

    let before = validate(&store, record.clone());
    expect_error(&before, "dose_quantity", ViolationKind::HistoryCountMismatch);

    store.record(
        SUBJECT,
        DoseEvent {
            dose_label: DoseSlot::SecondDose,
            product_name: "pfizer".to_string(),
            vaccination_date: first_dose_at(),
        },
    );
    let after = validate(&store, record);
    assert!(!after.has_error("dose_quantity"));
}

#[test]
fn revalidating_identical_record_is_deterministic() {
    let store = two_dose_store();
    let record = with_dose2(
        with_dose1(history_record("2"), "azd_1222", first_dose_at().date()),
        "azd_1222",
        second_dose_at().date(),
    );
    let first = validate(&store, record.clone());
    let second = validate(&store, record);
    assert!(first.is_valid());
    assert_eq!(first, second);
}

struct CountingLookup {
    inner: InMemoryHistory,
    calls: Cell<usize>,
}

impl HistoryLookup for CountingLookup {
    fn get_history(&self, subject_identifier: &str) -> HistorySummary {
        self.calls.set(self.calls.get() + 1);
        self.inner.get_history(subject_identifier)
    }
}

#[test]
fn history_queried_once_per_validation() {
    let lookup = CountingLookup {
        inner: two_dose_store(),
        calls: Cell::new(0),
    };
    let protocol = protocol();
    let validator = RecordValidator::new(&lookup, &protocol);
    let record = Record::VaccinationHistory(with_dose2(
        with_dose1(history_record("2"), "azd_1222", first_dose_at().date()),
        "azd_1222",
        second_dose_at().date(),
    ));
    validator.validate(&record);
    validator.validate(&record);
    assert_eq!(lookup.calls.get(), 2);
}
