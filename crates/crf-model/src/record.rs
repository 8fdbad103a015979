//! Typed form records.
//!
//! One struct per form. Every field is optional so that a record can carry
//! exactly what the collection layer submitted; `None` is the null value.
//! Records are read-only for the duration of a validation call.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::values::{
    AeOutcome, AeStatus, Contraceptive, DoseSlot, Location, PostMenopausal, ReceivedDoseBefore,
    YesNo,
};

/// A single dose administered at a study visit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VaccinationDetail {
    pub subject_identifier: String,
    pub report_datetime: Option<NaiveDateTime>,
    pub received_dose: Option<YesNo>,
    pub received_dose_before: Option<ReceivedDoseBefore>,
    pub vaccination_site: Option<String>,
    pub vaccination_date: Option<NaiveDateTime>,
    pub admin_per_protocol: Option<YesNo>,
    pub reason_not_per_protocol: Option<String>,
    pub lot_number: Option<String>,
    pub kit_serial: Option<String>,
    pub expiry_date: Option<NaiveDate>,
    pub provider_name: Option<String>,
    pub location: Option<Location>,
    pub location_other: Option<String>,
    pub next_vaccination_date: Option<NaiveDate>,
    pub part_supervised: Option<YesNo>,
    pub adverse_event: Option<YesNo>,
}

/// Self-reported vaccination history across the two dose slots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VaccinationHistory {
    pub subject_identifier: String,
    pub report_datetime: Option<NaiveDateTime>,
    pub received_vaccine: Option<YesNo>,
    /// Integer-as-string answer: "0", "1" or "2".
    pub dose_quantity: Option<String>,
    pub dose1_product_name: Option<String>,
    pub dose1_product_other: Option<String>,
    pub dose1_date: Option<NaiveDate>,
    pub dose2_product_name: Option<String>,
    pub dose2_product_other: Option<String>,
    pub dose2_date: Option<NaiveDate>,
}

impl VaccinationHistory {
    /// Submitted product token for a slot.
    pub fn product(&self, slot: DoseSlot) -> Option<&str> {
        match slot {
            DoseSlot::FirstDose => self.dose1_product_name.as_deref(),
            DoseSlot::SecondDose => self.dose2_product_name.as_deref(),
        }
    }

    /// Submitted dose date for a slot.
    pub fn dose_date(&self, slot: DoseSlot) -> Option<NaiveDate> {
        match slot {
            DoseSlot::FirstDose => self.dose1_date,
            DoseSlot::SecondDose => self.dose2_date,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdverseEvent {
    pub subject_identifier: String,
    pub status: Option<AeStatus>,
    pub start_date: Option<NaiveDate>,
    pub stop_date: Option<NaiveDate>,
    pub outcome: Option<AeOutcome>,
    pub sequelae_specify: Option<String>,
    pub medically_attended_ae: Option<YesNo>,
    pub maae_specify: Option<String>,
    pub treatment_given: Option<YesNo>,
    pub treatmnt_given_specify: Option<String>,
    pub ae_study_discontinued: Option<YesNo>,
    pub discontn_dt: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PregnancyStatus {
    pub subject_identifier: String,
    pub contraceptive_usage: Option<YesNo>,
    pub contraceptive: Vec<Contraceptive>,
    pub contraceptive_other: Option<String>,
    pub number_miscarriages: Option<u32>,
    pub date_miscarriages: Option<NaiveDate>,
    pub post_menopausal: Option<PostMenopausal>,
    pub post_menopausal_other: Option<String>,
    pub amenorrhea_history: Option<YesNo>,
    pub primary_amenorrhea: Option<YesNo>,
    pub start_date_menstrual_period: Option<NaiveDate>,
    pub expected_delivery: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EligibilityConfirmation {
    pub subject_identifier: String,
    pub report_datetime: Option<NaiveDateTime>,
}

/// A submitted form instance pending validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "form", rename_all = "snake_case")]
pub enum Record {
    VaccinationDetail(VaccinationDetail),
    VaccinationHistory(VaccinationHistory),
    AdverseEvent(AdverseEvent),
    PregnancyStatus(PregnancyStatus),
    EligibilityConfirmation(EligibilityConfirmation),
}

impl Record {
    pub fn form(&self) -> FormKind {
        match self {
            Record::VaccinationDetail(_) => FormKind::VaccinationDetail,
            Record::VaccinationHistory(_) => FormKind::VaccinationHistory,
            Record::AdverseEvent(_) => FormKind::AdverseEvent,
            Record::PregnancyStatus(_) => FormKind::PregnancyStatus,
            Record::EligibilityConfirmation(_) => FormKind::EligibilityConfirmation,
        }
    }

    pub fn subject_identifier(&self) -> &str {
        match self {
            Record::VaccinationDetail(record) => &record.subject_identifier,
            Record::VaccinationHistory(record) => &record.subject_identifier,
            Record::AdverseEvent(record) => &record.subject_identifier,
            Record::PregnancyStatus(record) => &record.subject_identifier,
            Record::EligibilityConfirmation(record) => &record.subject_identifier,
        }
    }
}

/// Record type discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormKind {
    VaccinationDetail,
    VaccinationHistory,
    AdverseEvent,
    PregnancyStatus,
    EligibilityConfirmation,
}

impl FormKind {
    pub const ALL: &'static [FormKind] = &[
        FormKind::VaccinationDetail,
        FormKind::VaccinationHistory,
        FormKind::AdverseEvent,
        FormKind::PregnancyStatus,
        FormKind::EligibilityConfirmation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FormKind::VaccinationDetail => "vaccination_detail",
            FormKind::VaccinationHistory => "vaccination_history",
            FormKind::AdverseEvent => "adverse_event",
            FormKind::PregnancyStatus => "pregnancy_status",
            FormKind::EligibilityConfirmation => "eligibility_confirmation",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            FormKind::VaccinationDetail => "Single dose administered at a study visit",
            FormKind::VaccinationHistory => {
                "Prior vaccination history, reconciled against stored doses"
            }
            FormKind::AdverseEvent => "Adverse event record",
            FormKind::PregnancyStatus => "Pregnancy and contraceptive status",
            FormKind::EligibilityConfirmation => "Eligibility confirmation report",
        }
    }
}

impl fmt::Display for FormKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
