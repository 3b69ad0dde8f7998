use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use polars::prelude::{AnyValue, DataFrame};
use serde::Serialize;

use meter_common::any_to_string;
use meter_model::{Correction, Fault, Variant};
use meter_validate::ValidationOutcome;

use crate::summary::{Summary, SummaryRow};

pub const REPORT_SCHEMA: &str = "meter-audit.report";
pub const REPORT_SCHEMA_VERSION: u32 = 1;

/// Writes `frame` as delimited text with a header row.
pub fn write_anomalies_csv(path: &Path, frame: &DataFrame, delimiter: u8) -> Result<()> {
    if let Some(parent) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create {}", parent.display()))?;
    }
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(file);

    let columns = frame.get_columns();
    writer.write_record(columns.iter().map(|column| column.name().as_str()))?;
    for idx in 0..frame.height() {
        let record: Vec<String> = columns
            .iter()
            .map(|column| any_to_string(column.get(idx).unwrap_or(AnyValue::Null)))
            .collect();
        writer.write_record(&record)?;
    }
    writer
        .flush()
        .with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

#[derive(Serialize)]
struct ReportPayload<'a> {
    schema: &'static str,
    schema_version: u32,
    generated_at: String,
    variant: Variant,
    variant_label: &'static str,
    total_records: usize,
    anomaly_count: usize,
    summary: &'a [SummaryRow],
    anomalies: Vec<AnomalyJson<'a>>,
}

#[derive(Serialize)]
struct AnomalyJson<'a> {
    original_index: usize,
    serial_number: &'a str,
    brand: &'a str,
    faults: &'a [Fault],
    fault_string: String,
    fp2e_detail: String,
    corrections: &'a [Correction],
}

/// Writes the machine-readable report.
pub fn write_report_json(
    path: &Path,
    outcome: &ValidationOutcome,
    summary: &Summary,
) -> Result<()> {
    let payload = ReportPayload {
        schema: REPORT_SCHEMA,
        schema_version: REPORT_SCHEMA_VERSION,
        generated_at: Utc::now().to_rfc3339(),
        variant: outcome.variant,
        variant_label: outcome.variant.label(),
        total_records: outcome.total_records,
        anomaly_count: outcome.anomaly_count(),
        summary: &summary.rows,
        anomalies: outcome
            .anomalies
            .iter()
            .map(|row| AnomalyJson {
                original_index: row.original_index,
                serial_number: &row.record.serial_number,
                brand: &row.record.brand_raw,
                faults: &row.faults,
                fault_string: row.fault_string(),
                fp2e_detail: row.fp2e_detail(),
                corrections: &row.corrections,
            })
            .collect(),
    };
    if let Some(parent) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(&payload)?;
    std::fs::write(path, format!("{json}\n"))
        .with_context(|| format!("write {}", path.display()))?;
    Ok(())
}
