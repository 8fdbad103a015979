//! Protocol configuration and validation options.

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{CrfError, Result};

const DEFAULT_REFERENCE_PRODUCT: &str = "azd_1222";
const DEFAULT_REFERENCE_PRODUCT_LABEL: &str = "AstraZeneca (AZD 1222)";
const DEFAULT_DISQUALIFYING_PRODUCT: &str = "janssen";
const DEFAULT_DOSE_INTERVAL_DAYS: u32 = 56;

/// Study protocol constants consumed by the validators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolConfig {
    /// Date the study opened; eligibility reports cannot precede it.
    pub study_open_date: NaiveDate,
    /// Product token whose doses the study administers and records itself.
    #[serde(default = "default_reference_product")]
    pub reference_product: String,
    /// Display name of the reference product used in messages.
    #[serde(default = "default_reference_product_label")]
    pub reference_product_label: String,
    /// Product token that makes a two-dose subject ineligible.
    #[serde(default = "default_disqualifying_product")]
    pub disqualifying_product: String,
    /// Minimum number of days between the first and second dose.
    #[serde(default = "default_dose_interval_days")]
    pub dose_interval_days: u32,
}

fn default_reference_product() -> String {
    DEFAULT_REFERENCE_PRODUCT.to_string()
}

fn default_reference_product_label() -> String {
    DEFAULT_REFERENCE_PRODUCT_LABEL.to_string()
}

fn default_disqualifying_product() -> String {
    DEFAULT_DISQUALIFYING_PRODUCT.to_string()
}

fn default_dose_interval_days() -> u32 {
    DEFAULT_DOSE_INTERVAL_DAYS
}

impl ProtocolConfig {
    /// Configuration with the default products and dosing window.
    pub fn new(study_open_date: NaiveDate) -> Self {
        Self {
            study_open_date,
            reference_product: default_reference_product(),
            reference_product_label: default_reference_product_label(),
            disqualifying_product: default_disqualifying_product(),
            dose_interval_days: default_dose_interval_days(),
        }
    }

    pub fn with_reference_product(
        mut self,
        product: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        self.reference_product = product.into();
        self.reference_product_label = label.into();
        self
    }

    pub fn with_disqualifying_product(mut self, product: impl Into<String>) -> Self {
        self.disqualifying_product = product.into();
        self
    }

    pub fn with_dose_interval_days(mut self, days: u32) -> Self {
        self.dose_interval_days = days;
        self
    }

    pub fn is_reference_product(&self, product: Option<&str>) -> bool {
        product == Some(self.reference_product.as_str())
    }

    pub fn is_disqualifying_product(&self, product: Option<&str>) -> bool {
        product == Some(self.disqualifying_product.as_str())
    }

    /// Parse a configuration from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the products are blank
    /// or identical.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: ProtocolConfig = serde_json::from_str(json).map_err(|source| CrfError::Json {
            context: "protocol configuration".to_string(),
            source,
        })?;
        config.check()?;
        Ok(config)
    }

    /// Load a configuration from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path).map_err(|source| CrfError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    fn check(&self) -> Result<()> {
        if self.reference_product.trim().is_empty() {
            return Err(CrfError::Protocol(
                "reference_product must not be empty".to_string(),
            ));
        }
        if self.disqualifying_product.trim().is_empty() {
            return Err(CrfError::Protocol(
                "disqualifying_product must not be empty".to_string(),
            ));
        }
        if self.reference_product == self.disqualifying_product {
            return Err(CrfError::Protocol(format!(
                "{} cannot be both the reference and the disqualifying product",
                self.reference_product
            )));
        }
        Ok(())
    }
}

/// How many violations a validation pass surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorPolicy {
    /// Stop the pass at the first violation.
    #[default]
    StopAtFirst,
    /// Run every sub-check and report one error per field.
    CollectAll,
}

/// Options for a validation pass.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ValidationOptions {
    pub error_policy: ErrorPolicy,
}

impl ValidationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn collect_all() -> Self {
        Self {
            error_policy: ErrorPolicy::CollectAll,
        }
    }

    pub fn with_error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.error_policy = policy;
        self
    }
}
