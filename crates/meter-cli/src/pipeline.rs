//! Load, validate and export one inventory file.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use polars::prelude::DataFrame;
use tracing::{debug, info, info_span, trace};

use meter_ingest::{IngestOptions, read_inventory};
use meter_model::Variant;
use meter_report::{Summary, anomaly_frame, summarize, write_anomalies_csv, write_report_json};
use meter_validate::{ValidationOutcome, Validator, ValidatorOptions};

use crate::logging::redact_value;

/// Inputs of one check run.
#[derive(Debug, Clone)]
pub struct CheckRequest {
    pub path: PathBuf,
    pub variant: Variant,
    pub ingest: IngestOptions,
    pub validator: ValidatorOptions,
}

/// A validated inventory.
#[derive(Debug)]
pub struct CheckedInventory {
    pub source: DataFrame,
    pub outcome: ValidationOutcome,
    pub summary: Summary,
}

/// Where exports go; `None` skips the export.
#[derive(Debug, Clone, Default)]
pub struct ExportTargets {
    pub csv: Option<PathBuf>,
    pub csv_delimiter: u8,
    pub json: Option<PathBuf>,
}

/// Reads and validates `request.path`.
pub fn check_inventory(request: &CheckRequest) -> Result<CheckedInventory> {
    let span = info_span!(
        "check",
        variant = %request.variant,
        source_file = %request.path.display()
    );
    let _guard = span.enter();
    let start = Instant::now();

    let source = read_inventory(&request.path, &request.ingest)
        .with_context(|| format!("read {}", request.path.display()))?;
    debug!(
        rows = source.height(),
        columns = source.width(),
        "inventory loaded"
    );

    let outcome = Validator::with_options(request.variant, request.validator)
        .validate(&source)
        .with_context(|| format!("validate {}", request.path.display()))?;
    for row in &outcome.anomalies {
        trace!(
            index = row.original_index,
            serial = redact_value(&row.record.serial_number),
            faults = %row.fault_string(),
            "anomaly"
        );
    }

    let summary = summarize(&outcome);
    info!(
        records = outcome.total_records,
        anomalies = outcome.anomaly_count(),
        fault_types = summary.rows.len(),
        duration_ms = start.elapsed().as_millis(),
        "check complete"
    );
    Ok(CheckedInventory {
        source,
        outcome,
        summary,
    })
}

/// Writes the requested exports and returns the written paths.
pub fn export(checked: &CheckedInventory, targets: &ExportTargets) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    if let Some(path) = &targets.csv {
        let frame = anomaly_frame(&checked.source, &checked.outcome)?;
        write_anomalies_csv(path, &frame, targets.csv_delimiter)?;
        log_written(path);
        written.push(path.clone());
    }
    if let Some(path) = &targets.json {
        write_report_json(path, &checked.outcome, &checked.summary)?;
        log_written(path);
        written.push(path.clone());
    }
    Ok(written)
}

fn log_written(path: &Path) {
    info!(path = %path.display(), "export written");
}
