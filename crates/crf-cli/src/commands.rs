use std::fs;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use comfy_table::Table;
use serde_json::Value;
use tracing::{debug, info, info_span, warn};

use crf_model::{FormKind, ProtocolConfig, Record, ValidationOptions};
use crf_validate::{InMemoryHistory, RecordValidator};

use crate::cli::ValidateArgs;
use crate::logging::redact_value;
use crate::summary::apply_table_style;
use crate::types::{RecordOutcome, RunResult};

pub fn run_forms() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Form", "Description"]);
    apply_table_style(&mut table);
    for form in FormKind::ALL {
        table.add_row(vec![form.as_str(), form.description()]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_validate(args: &ValidateArgs) -> Result<RunResult> {
    let span = info_span!("validate_file", path = %args.records.display());
    let _guard = span.enter();
    let started = Instant::now();

    let protocol = ProtocolConfig::from_path(&args.protocol)
        .with_context(|| format!("load protocol {}", args.protocol.display()))?;
    let history = match &args.history {
        Some(path) => InMemoryHistory::from_path(path)
            .with_context(|| format!("load history {}", path.display()))?,
        None => InMemoryHistory::new(),
    };
    debug!(subjects = history.subject_count(), "history store loaded");
    let records = load_records(&args.records)?;

    let options = if args.collect_all {
        ValidationOptions::collect_all()
    } else {
        ValidationOptions::default()
    };
    let result = validate_records(&records, &history, &protocol, options);
    info!(
        records = result.records.len(),
        failed = result.failed_count(),
        elapsed_ms = started.elapsed().as_millis(),
        "validation complete"
    );
    Ok(result)
}

/// Validate each record independently and collect the outcomes in input order.
pub fn validate_records(
    records: &[Record],
    history: &InMemoryHistory,
    protocol: &ProtocolConfig,
    options: ValidationOptions,
) -> RunResult {
    let validator = RecordValidator::new(history, protocol).with_options(options);
    let outcomes = records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let result = validator.validate(record);
            if !result.is_valid() {
                warn!(
                    index,
                    form = %record.form(),
                    subject = redact_value(record.subject_identifier()),
                    errors = result.error_count(),
                    "record failed validation"
                );
            }
            RecordOutcome {
                index,
                form: record.form(),
                subject_identifier: record.subject_identifier().to_string(),
                result,
            }
        })
        .collect();
    RunResult::new(outcomes)
}

pub fn load_records(path: &Path) -> Result<Vec<Record>> {
    let json =
        fs::read_to_string(path).with_context(|| format!("read records {}", path.display()))?;
    parse_records(&json)
}

/// Decode one record object or an array of records.
pub fn parse_records(json: &str) -> Result<Vec<Record>> {
    let value: Value = serde_json::from_str(json).context("parse records json")?;
    match value {
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                serde_json::from_value(item).with_context(|| format!("decode record {index}"))
            })
            .collect(),
        other => {
            let record = serde_json::from_value(other).context("decode record")?;
            Ok(vec![record])
        }
    }
}
