use std::fs;
use std::path::{Path, PathBuf};

use meter_cli::pipeline::{CheckRequest, ExportTargets, check_inventory, export};
use meter_ingest::IngestOptions;
use meter_model::{Fault, Variant};
use meter_validate::{UnformedSerialPolicy, ValidatorOptions};

const RADIO_HEADER: &str = "Protocole Radio;Marque;Numéro de tête;Numéro de compteur;Latitude;Longitude;Commune;Année de fabrication;Diametre;Mode de relève";

fn temp_dir(name: &str) -> PathBuf {
    let stamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("meter_cli_{name}_{stamp}"));
    fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn write_inventory(dir: &Path, rows: &[&str]) -> PathBuf {
    let path = dir.join("inventory.csv");
    let mut contents = String::from(RADIO_HEADER);
    for row in rows {
        contents.push('\n');
        contents.push_str(row);
    }
    contents.push('\n');
    fs::write(&path, contents).expect("write inventory");
    path
}

fn radio_request(path: PathBuf) -> CheckRequest {
    CheckRequest {
        path,
        variant: Variant::Radio,
        ingest: IngestOptions::default(),
        validator: ValidatorOptions::default(),
    }
}

#[test]
fn clean_inventory_has_no_anomalies() {
    let dir = temp_dir("clean");
    let path = write_inventory(
        &dir,
        &["WMS;KAMSTRUP;12345678;12345678;48.85;2.35;Paris;2019;15;Radio"],
    );

    let checked = check_inventory(&radio_request(path)).expect("check inventory");
    assert!(checked.outcome.is_clean());
    assert_eq!(checked.summary.total_records, 1);
    assert!(checked.summary.rows.is_empty());

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn faults_flow_into_summary_and_exports() {
    let dir = temp_dir("exports");
    let path = write_inventory(
        &dir,
        &[
            "WMS;KAMSTRUP;12345678;12345678;48.85;2.35;Paris;2019;15;Radio",
            "OMS;KAMSTRUP;12345678;12345678;0;2.35;Paris;2019;15;Radio",
            "WMS;KAMSTRUP;87654321;87654321;48.85;2.35;Lyon;2020;15;Radio",
        ],
    );

    let checked = check_inventory(&radio_request(path)).expect("check inventory");
    assert_eq!(checked.outcome.total_records, 3);
    assert_eq!(checked.outcome.anomaly_count(), 1);

    let row = checked.outcome.anomalies.iter().next().expect("anomaly row");
    assert_eq!(row.original_index, 1);
    assert!(row.has_fault(Fault::GpsInvalid));
    assert!(row.has_fault(Fault::KamstrupProtocol));

    let csv_path = dir.join("out").join("anomalies.csv");
    let json_path = dir.join("out").join("report.json");
    let targets = ExportTargets {
        csv: Some(csv_path.clone()),
        csv_delimiter: b';',
        json: Some(json_path.clone()),
    };
    let written = export(&checked, &targets).expect("export");
    assert_eq!(written, vec![csv_path.clone(), json_path.clone()]);

    let csv_text = fs::read_to_string(&csv_path).expect("read csv");
    let mut lines = csv_text.lines();
    let header = lines.next().expect("csv header");
    assert!(header.starts_with("Index original;"));
    assert!(header.contains(";Anomalie;"));
    assert_eq!(lines.count(), 1);

    let json_text = fs::read_to_string(&json_path).expect("read json");
    assert!(json_text.contains("\"anomaly_count\": 1"));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn export_without_targets_writes_nothing() {
    let dir = temp_dir("no_targets");
    let path = write_inventory(
        &dir,
        &["WMS;KAMSTRUP;12345678;12345678;48.85;2.35;Paris;2019;15;Radio"],
    );
    let checked = check_inventory(&radio_request(path)).expect("check inventory");
    let written = export(&checked, &ExportTargets::default()).expect("export");
    assert!(written.is_empty());

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn strict_policy_reaches_the_validator() {
    let dir = temp_dir("strict");
    let path = write_inventory(
        &dir,
        &["OMS;SAPPEL (C);DME123456789012;ABC;48.85;2.35;Paris;2016;15;Radio"],
    );

    let lenient = check_inventory(&radio_request(path.clone())).expect("check lenient");
    let lenient_faults = lenient
        .outcome
        .anomalies
        .iter()
        .next()
        .map(|row| row.has_fault(Fault::Fp2eFormat))
        .unwrap_or(false);
    assert!(!lenient_faults);

    let mut request = radio_request(path);
    request.validator = ValidatorOptions::default().with_unformed_serial(UnformedSerialPolicy::Fault);
    let strict = check_inventory(&request).expect("check strict");
    let row = strict.outcome.anomalies.iter().next().expect("anomaly row");
    assert!(row.has_fault(Fault::Fp2eFormat));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn missing_columns_are_reported_with_the_file() {
    let dir = temp_dir("missing");
    let path = dir.join("inventory.csv");
    fs::write(&path, "Marque;Numéro de compteur\nKAMSTRUP;12345678\n").expect("write");

    let error = check_inventory(&radio_request(path)).expect_err("missing columns");
    let message = format!("{error:#}");
    assert!(message.contains("validate"));
    assert!(message.contains("Diametre"));

    let _ = fs::remove_dir_all(&dir);
}
