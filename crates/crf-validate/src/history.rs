//! Read-only access to a subject's stored vaccination events.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crf_model::{CrfError, DoseEvent, HistorySummary, Result};

/// Query interface over the external record store.
///
/// Implementations must be total: an unknown subject yields
/// [`HistorySummary::empty`]. Each call reads the store as it is now; the
/// validators call it at most once per record and never cache the result.
pub trait HistoryLookup {
    fn get_history(&self, subject_identifier: &str) -> HistorySummary;
}

impl<T: HistoryLookup + ?Sized> HistoryLookup for &T {
    fn get_history(&self, subject_identifier: &str) -> HistorySummary {
        (**self).get_history(subject_identifier)
    }
}

/// In-memory store of dose events keyed by subject identifier.
///
/// Serializes as `{ "<subject>": [DoseEvent, ...] }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InMemoryHistory {
    events: BTreeMap<String, Vec<DoseEvent>>,
}

impl InMemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event for a subject, after any already stored.
    pub fn record(&mut self, subject_identifier: impl Into<String>, event: DoseEvent) {
        self.events
            .entry(subject_identifier.into())
            .or_default()
            .push(event);
    }

    pub fn with_event(mut self, subject_identifier: impl Into<String>, event: DoseEvent) -> Self {
        self.record(subject_identifier, event);
        self
    }

    pub fn events(&self, subject_identifier: &str) -> &[DoseEvent] {
        self.events
            .get(subject_identifier)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn subject_count(&self) -> usize {
        self.events.len()
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|source| CrfError::Json {
            context: "history store".to_string(),
            source,
        })
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path).map_err(|source| CrfError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }
}

impl HistoryLookup for InMemoryHistory {
    fn get_history(&self, subject_identifier: &str) -> HistorySummary {
        HistorySummary::from_events(self.events(subject_identifier))
    }
}
