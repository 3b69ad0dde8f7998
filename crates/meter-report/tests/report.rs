use std::path::PathBuf;

use polars::prelude::{AnyValue, Column, DataFrame};

use meter_model::Variant;
use meter_report::{
    REPORT_SCHEMA, SUMMARY_CORRECTED, anomaly_frame, summarize, summary_frame,
    write_anomalies_csv, write_report_json,
};
use meter_validate::validate;

fn temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let stamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    dir.push(format!("meter_report_{stamp}"));
    dir
}

/// Three manual rows: clean, bad FP2E year, zero latitude.
fn manual_df() -> DataFrame {
    let column = |name: &str, values: [&str; 3]| {
        Column::new(
            name.into(),
            values.iter().map(|v| (*v).to_string()).collect::<Vec<_>>(),
        )
    };
    DataFrame::new(vec![
        column("Latitude", ["48.85", "48.85", "0"]),
        column("Longitude", ["2.35", "2.35", "2.35"]),
        column("Numéro de compteur", ["C15BA123456", "C16BA123456", "12345678"]),
        column("Marque", ["SAPPEL (C)", "SAPPEL (C)", "KAMSTRUP"]),
        column("Année de fabrication", ["2015", "2015", "2019"]),
        column("Diametre", ["15", "15", "15"]),
        column("Commentaire", ["", "vérifié", ""]),
    ])
    .expect("df")
}

#[test]
fn anomaly_frame_keeps_source_columns_and_adds_annotations() {
    let df = manual_df();
    let outcome = validate(&df, Variant::Manual).expect("validate");
    let frame = anomaly_frame(&df, &outcome).expect("frame");

    assert_eq!(frame.height(), 2);
    let names: Vec<String> = frame
        .get_column_names_owned()
        .into_iter()
        .map(|name| name.to_string())
        .collect();
    insta::assert_snapshot!(names.join(" | "), @"Index original | Latitude | Longitude | Numéro de compteur | Marque | Année de fabrication | Diametre | Commentaire | Anomalie | Anomalie Détaillée FP2E | Correction Année de fabrication | Correction Diametre | Correction Type de compteur");

    let index = frame.column("Index original").expect("index");
    assert_eq!(index.get(0).expect("cell"), AnyValue::UInt64(1));
    assert_eq!(index.get(1).expect("cell"), AnyValue::UInt64(2));

    let year = frame
        .column("Correction Année de fabrication")
        .expect("year");
    assert_eq!(year.get(0).expect("cell"), AnyValue::String("16"));
    assert_eq!(year.get(1).expect("cell"), AnyValue::String(""));

    let comment = frame.column("Commentaire").expect("comment");
    assert_eq!(comment.get(0).expect("cell"), AnyValue::String("vérifié"));
}

#[test]
fn summary_counts_corrected_year() {
    let df = manual_df();
    let outcome = validate(&df, Variant::Manual).expect("validate");
    let summary = summarize(&outcome);
    assert_eq!(summary.total_records, 3);
    assert_eq!(summary.anomaly_count, 2);
    assert_eq!(summary.total_corrected(), 1);

    let frame = summary_frame(&summary).expect("summary frame");
    assert_eq!(frame.height(), 2);
    let corrected = frame.column(SUMMARY_CORRECTED).expect("corrected");
    assert_eq!(corrected.null_count(), 1);
}

#[test]
fn csv_export_round_trips_through_reader() {
    let df = manual_df();
    let outcome = validate(&df, Variant::Manual).expect("validate");
    let frame = anomaly_frame(&df, &outcome).expect("frame");

    let dir = temp_dir();
    let path = dir.join("anomalies.csv");
    write_anomalies_csv(&path, &frame, b';').expect("write csv");

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .from_path(&path)
        .expect("open csv");
    let headers = reader.headers().expect("headers").clone();
    assert_eq!(headers.get(0), Some("Index original"));
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.expect("row")).collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].get(0), Some("1"));
    assert_eq!(
        rows[1].get(8),
        Some("Coordonnées GPS invalides")
    );

    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn json_report_carries_schema_and_rows() {
    let df = manual_df();
    let outcome = validate(&df, Variant::Manual).expect("validate");
    let summary = summarize(&outcome);

    let dir = temp_dir();
    let path = dir.join("report.json");
    write_report_json(&path, &outcome, &summary).expect("write json");

    let text = std::fs::read_to_string(&path).expect("read json");
    let value: serde_json::Value = serde_json::from_str(&text).expect("parse json");
    assert_eq!(value["schema"], REPORT_SCHEMA);
    assert_eq!(value["variant"], "manual");
    assert_eq!(value["anomaly_count"], 2);
    assert_eq!(value["anomalies"][0]["faults"][0], "fp2e_year");
    assert_eq!(value["anomalies"][0]["corrections"][0]["value"], "16");
    assert_eq!(value["summary"][0]["occurrences"], 1);

    let _ = std::fs::remove_dir_all(dir);
}
