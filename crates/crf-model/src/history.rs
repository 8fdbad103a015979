//! Stored vaccination events and the per-subject summary built from them.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::values::DoseSlot;

/// A dose recorded by the study itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoseEvent {
    pub dose_label: DoseSlot,
    pub product_name: String,
    pub vaccination_date: NaiveDateTime,
}

/// Read-only snapshot of a subject's stored vaccination events.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HistorySummary {
    pub recorded_dose_count: usize,
    pub dose_events: BTreeMap<DoseSlot, DoseEvent>,
}

impl HistorySummary {
    /// Summary for a subject with nothing on record.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a summary from stored events in store order.
    ///
    /// Every event counts towards `recorded_dose_count`. When a slot is
    /// stored more than once the first event is kept for that slot.
    pub fn from_events<'a, I>(events: I) -> Self
    where
        I: IntoIterator<Item = &'a DoseEvent>,
    {
        let mut summary = Self::default();
        for event in events {
            summary.recorded_dose_count += 1;
            summary
                .dose_events
                .entry(event.dose_label)
                .or_insert_with(|| event.clone());
        }
        summary
    }

    pub fn event(&self, slot: DoseSlot) -> Option<&DoseEvent> {
        self.dose_events.get(&slot)
    }
}
