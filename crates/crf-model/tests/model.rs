//! Tests for vocabularies, history summaries and protocol loading.

use chrono::NaiveDate;

use crf_model::{
    CrfError, DoseEvent, DoseSlot, FieldValue, HistorySummary, Location, Presence,
    ProtocolConfig, ReceivedDoseBefore, Record, YesNo,
};

#[test]
fn tokens_parse_case_insensitively() {
    assert_eq!(" Yes ".parse::<YesNo>(), Ok(YesNo::Yes));
    assert_eq!("NOT_APPLICABLE".parse::<Location>(), Ok(Location::NotApplicable));
    assert!("maybe".parse::<YesNo>().is_err());
}

#[test]
fn not_applicable_tokens_have_not_applicable_presence() {
    assert_eq!(YesNo::NotApplicable.presence(), Presence::NotApplicable);
    assert_eq!(YesNo::No.presence(), Presence::Value);
    assert_eq!(None::<YesNo>.presence(), Presence::Blank);
    assert_eq!(Vec::<Location>::new().presence(), Presence::Blank);
}

#[test]
fn received_dose_before_maps_to_slot() {
    assert_eq!(
        ReceivedDoseBefore::SecondDose.slot(),
        Some(DoseSlot::SecondDose)
    );
    assert_eq!(ReceivedDoseBefore::NotApplicable.slot(), None);
}

#[test]
fn summary_counts_every_event_and_keeps_first_per_slot() {
    let at = |day| {
        NaiveDate::from_ymd_opt(2021, 3, day)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    };
    let events = [
        DoseEvent {
            dose_label: DoseSlot::FirstDose,
            product_name: "azd_1222".to_string(),
            vaccination_date: at(1),
        },
        DoseEvent {
            dose_label: DoseSlot::FirstDose,
            product_name: "azd_1222".to_string(),
            vaccination_date: at(2),
        },
    ];
    let summary = HistorySummary::from_events(&events);
    assert_eq!(summary.recorded_dose_count, 2);
    assert_eq!(summary.dose_events.len(), 1);
    assert_eq!(
        summary.event(DoseSlot::FirstDose).unwrap().vaccination_date,
        at(1)
    );
    assert!(summary.event(DoseSlot::SecondDose).is_none());
    assert_eq!(HistorySummary::empty().recorded_dose_count, 0);
}

#[test]
fn protocol_json_fills_defaults() {
    let protocol = ProtocolConfig::from_json_str(r#"{"study_open_date": "2021-02-01"}"#)
        .expect("valid protocol");
    assert_eq!(protocol.reference_product, "azd_1222");
    assert_eq!(protocol.reference_product_label, "AstraZeneca (AZD 1222)");
    assert_eq!(protocol.disqualifying_product, "janssen");
    assert_eq!(protocol.dose_interval_days, 56);
    assert!(protocol.is_reference_product(Some("azd_1222")));
    assert!(!protocol.is_reference_product(None));
}

#[test]
fn protocol_requires_study_open_date() {
    let error = ProtocolConfig::from_json_str("{}").unwrap_err();
    assert!(matches!(error, CrfError::Json { .. }));
}

#[test]
fn protocol_rejects_same_reference_and_disqualifying_product() {
    let error = ProtocolConfig::from_json_str(
        r#"{"study_open_date": "2021-02-01", "disqualifying_product": "azd_1222"}"#,
    )
    .unwrap_err();
    assert!(matches!(error, CrfError::Protocol(_)));
}

#[test]
fn records_decode_from_collection_json() {
    let json = r#"{
        "form": "vaccination_detail",
        "subject_identifier": "S-001",
        "received_dose": "yes",
        "received_dose_before": "first_dose",
        "vaccination_date": "2021-03-01T09:00:00",
        "location": "arm",
        "expiry_date": "2021-06-01"
    }"#;
    let record: Record = serde_json::from_str(json).expect("decode record");
    let Record::VaccinationDetail(detail) = &record else {
        panic!("expected a vaccination detail record");
    };
    assert_eq!(record.subject_identifier(), "S-001");
    assert_eq!(detail.received_dose, Some(YesNo::Yes));
    assert_eq!(detail.location, Some(Location::Arm));
    assert_eq!(detail.lot_number, None);
}
