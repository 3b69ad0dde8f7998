use std::fs;
use std::io::{Cursor, Write};
use std::path::PathBuf;

use polars::prelude::AnyValue;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use meter_ingest::{IngestError, IngestOptions, read_csv_table, read_inventory};

fn temp_file(name: &str, contents: &[u8]) -> PathBuf {
    let mut dir = std::env::temp_dir();
    let stamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    dir.push(format!("meter_ingest_{name}_{stamp}"));
    fs::create_dir_all(&dir).expect("create temp dir");
    let path = dir.join(name);
    fs::write(&path, contents).expect("write file");
    path
}

fn cleanup(path: &PathBuf) {
    let _ = fs::remove_file(path);
    if let Some(parent) = path.parent() {
        let _ = fs::remove_dir_all(parent);
    }
}

#[test]
fn reads_semicolon_export_as_text_columns() {
    let path = temp_file(
        "radio.csv",
        "Marque;Numéro de compteur;Diametre;Latitude\nITRON;I15BA123456;15;45.75\nKAMSTRUP;12345678;;0\n"
            .as_bytes(),
    );
    let df = read_inventory(&path, &IngestOptions::default()).expect("read inventory");
    assert_eq!(df.height(), 2);
    assert_eq!(df.width(), 4);

    let diameter = df.column("Diametre").expect("Diametre column");
    assert_eq!(diameter.get(0).expect("cell"), AnyValue::String("15"));
    assert_eq!(diameter.get(1).expect("cell"), AnyValue::String(""));

    cleanup(&path);
}

#[test]
fn explicit_delimiter_overrides_sniffing() {
    let path = temp_file("pipe.csv", b"A|B\n1|2\n");
    let table = read_csv_table(&path, &IngestOptions::default().with_delimiter(b','))
        .expect("read table");
    assert_eq!(table.headers, vec!["A|B"]);
    assert_eq!(table.delimiter, b',');
    cleanup(&path);
}

#[test]
fn windows_1252_headers_are_decoded() {
    let path = temp_file("latin.csv", b"Marque;Ann\xE9e de fabrication\nSAPPEL (C);2015\n");
    let table = read_csv_table(&path, &IngestOptions::default()).expect("read table");
    assert_eq!(table.headers, vec!["Marque", "Année de fabrication"]);
    assert_eq!(table.rows, vec![vec!["SAPPEL (C)", "2015"]]);
    cleanup(&path);
}

#[test]
fn missing_file_is_reported() {
    let path = std::env::temp_dir().join("meter_ingest_does_not_exist.csv");
    let err = read_inventory(&path, &IngestOptions::default()).unwrap_err();
    assert!(matches!(err, IngestError::FileNotFound { .. }));
}

#[test]
fn header_only_file_gives_empty_frame() {
    let path = temp_file("header.csv", b"Marque,Diametre\n");
    let df = read_inventory(&path, &IngestOptions::default()).expect("read inventory");
    assert_eq!(df.height(), 0);
    assert_eq!(df.width(), 2);
    cleanup(&path);
}

/// Writes an uncompressed zip archive holding the given entries.
fn stored_zip(entries: &[(&str, String)]) -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
    for (name, body) in entries {
        zip.start_file(*name, options).expect("start zip entry");
        zip.write_all(body.as_bytes()).expect("write zip entry");
    }
    zip.finish().expect("finish zip").into_inner()
}

fn inline_cell(reference: &str, text: &str) -> String {
    format!(r#"<c r="{reference}" t="inlineStr"><is><t>{text}</t></is></c>"#)
}

fn number_cell(reference: &str, value: &str) -> String {
    format!(r#"<c r="{reference}"><v>{value}</v></c>"#)
}

/// Minimal single-sheet workbook: header row, one meter row, a blank row
/// and a short row.
fn inventory_workbook() -> Vec<u8> {
    let main_ns = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
    let rel_ns = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
    let pkg_ns = "http://schemas.openxmlformats.org/package/2006/relationships";
    let rows = [
        format!(
            r#"<row r="1">{}{}{}</row>"#,
            inline_cell("A1", " Marque "),
            inline_cell("B1", "Numéro de compteur"),
            inline_cell("C1", "Diametre")
        ),
        format!(
            r#"<row r="2">{}{}{}</row>"#,
            inline_cell("A2", "ITRON"),
            inline_cell("B2", "I15BA123456"),
            number_cell("C2", "15")
        ),
        format!(r#"<row r="4">{}</row>"#, inline_cell("A4", "SAPPEL (C)")),
    ];
    let entries = [
        (
            "[Content_Types].xml",
            concat!(
                r#"<?xml version="1.0" encoding="UTF-8"?>"#,
                r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
                r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#,
                r#"<Default Extension="xml" ContentType="application/xml"/>"#,
                r#"<Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>"#,
                r#"<Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#,
                r#"</Types>"#
            )
            .to_string(),
        ),
        (
            "_rels/.rels",
            format!(
                r#"<?xml version="1.0" encoding="UTF-8"?><Relationships xmlns="{pkg_ns}"><Relationship Id="rId1" Type="{rel_ns}/officeDocument" Target="xl/workbook.xml"/></Relationships>"#
            ),
        ),
        (
            "xl/workbook.xml",
            format!(
                r#"<?xml version="1.0" encoding="UTF-8"?><workbook xmlns="{main_ns}" xmlns:r="{rel_ns}"><sheets><sheet name="Inventaire" sheetId="1" r:id="rId1"/></sheets></workbook>"#
            ),
        ),
        (
            "xl/_rels/workbook.xml.rels",
            format!(
                r#"<?xml version="1.0" encoding="UTF-8"?><Relationships xmlns="{pkg_ns}"><Relationship Id="rId1" Type="{rel_ns}/worksheet" Target="worksheets/sheet1.xml"/></Relationships>"#
            ),
        ),
        (
            "xl/worksheets/sheet1.xml",
            format!(
                r#"<?xml version="1.0" encoding="UTF-8"?><worksheet xmlns="{main_ns}"><sheetData>{}</sheetData></worksheet>"#,
                rows.concat()
            ),
        ),
    ];
    stored_zip(&entries)
}

#[test]
fn xlsx_export_reads_as_text_columns() {
    let path = temp_file("radio.xlsx", &inventory_workbook());
    let df = read_inventory(&path, &IngestOptions::default()).expect("read workbook");
    assert_eq!(df.height(), 2);
    let names: Vec<&str> = df.get_column_names().iter().map(|n| n.as_str()).collect();
    assert_eq!(names, vec!["Marque", "Numéro de compteur", "Diametre"]);

    let diameter = df.column("Diametre").expect("Diametre column");
    assert_eq!(diameter.get(0).expect("cell"), AnyValue::String("15"));
    assert_eq!(diameter.get(1).expect("cell"), AnyValue::String(""));
    let brand = df.column("Marque").expect("Marque column");
    assert_eq!(brand.get(1).expect("cell"), AnyValue::String("SAPPEL (C)"));

    cleanup(&path);
}

#[test]
fn corrupt_workbook_is_reported() {
    let path = temp_file("broken.xlsx", b"Marque;Diametre\nITRON;15\n");
    let err = read_inventory(&path, &IngestOptions::default()).unwrap_err();
    assert!(matches!(err, IngestError::Workbook { .. }));
    cleanup(&path);
}

#[test]
fn missing_workbook_is_reported() {
    let path = std::env::temp_dir().join("meter_ingest_does_not_exist.xlsx");
    let err = read_inventory(&path, &IngestOptions::default()).unwrap_err();
    assert!(matches!(err, IngestError::FileNotFound { .. }));
}
