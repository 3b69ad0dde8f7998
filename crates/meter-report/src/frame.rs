use anyhow::{Context, Result};
use polars::prelude::{AnyValue, Column, DataFrame};

use meter_common::any_to_string;
use meter_model::columns::{FAULTS, FP2E_DETAIL, ORIGINAL_INDEX};
use meter_validate::{RuleSet, ValidationOutcome};

use crate::summary::Summary;

/// Header of the summary fault column.
pub const SUMMARY_FAULT: &str = "Type d'anomalie";
/// Header of the summary occurrence column.
pub const SUMMARY_OCCURRENCES: &str = "Nombre de cas";
/// Header of the summary corrected-instance column.
pub const SUMMARY_CORRECTED: &str = "Nombre corrigé";

/// Annotated anomaly table.
///
/// Columns: `Index original`, every source column as text, `Anomalie`,
/// `Anomalie Détaillée FP2E`, then one `Correction ...` column per field the
/// variant can correct. Source columns whose names clash with an output
/// column are left out.
pub fn anomaly_frame(source: &DataFrame, outcome: &ValidationOutcome) -> Result<DataFrame> {
    let rows = outcome.anomalies.rows();
    let correction_fields = RuleSet::for_variant(outcome.variant).correction_fields();
    let reserved: Vec<&str> = [ORIGINAL_INDEX, FAULTS, FP2E_DETAIL]
        .into_iter()
        .chain(correction_fields.iter().map(|field| field.column_name()))
        .collect();

    let mut columns = Vec::new();
    let indices: Vec<u64> = rows.iter().map(|row| row.original_index as u64).collect();
    columns.push(Column::new(ORIGINAL_INDEX.into(), indices));

    for name in source.get_column_names_owned() {
        if reserved.contains(&name.as_str()) {
            continue;
        }
        let column = source
            .column(name.as_str())
            .with_context(|| format!("read source column {name}"))?;
        let values: Vec<String> = rows
            .iter()
            .map(|row| any_to_string(column.get(row.original_index).unwrap_or(AnyValue::Null)))
            .collect();
        columns.push(Column::new(name, values));
    }

    let faults: Vec<String> = rows.iter().map(|row| row.fault_string()).collect();
    columns.push(Column::new(FAULTS.into(), faults));
    let details: Vec<String> = rows.iter().map(|row| row.fp2e_detail()).collect();
    columns.push(Column::new(FP2E_DETAIL.into(), details));

    for field in correction_fields {
        let values: Vec<String> = rows
            .iter()
            .map(|row| row.correction_for(field).unwrap_or_default().to_string())
            .collect();
        columns.push(Column::new(field.column_name().into(), values));
    }

    DataFrame::new(columns).context("build anomaly frame")
}

/// The summary as a three-column table; blank corrected cells mean the fault
/// has no correction column.
pub fn summary_frame(summary: &Summary) -> Result<DataFrame> {
    let labels: Vec<String> = summary.rows.iter().map(|row| row.label.to_string()).collect();
    let occurrences: Vec<u64> = summary
        .rows
        .iter()
        .map(|row| row.occurrences as u64)
        .collect();
    let corrected: Vec<Option<u64>> = summary
        .rows
        .iter()
        .map(|row| row.corrected.map(|count| count as u64))
        .collect();
    DataFrame::new(vec![
        Column::new(SUMMARY_FAULT.into(), labels),
        Column::new(SUMMARY_OCCURRENCES.into(), occurrences),
        Column::new(SUMMARY_CORRECTED.into(), corrected),
    ])
    .context("build summary frame")
}
