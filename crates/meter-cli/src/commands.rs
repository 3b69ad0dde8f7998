use anyhow::Result;
use comfy_table::{Cell, Table};
use indicatif::{ProgressBar, ProgressStyle};

use meter_cli::pipeline::{CheckRequest, ExportTargets, check_inventory, export};
use meter_ingest::IngestOptions;
use meter_model::Variant;
use meter_validate::{RuleSet, UnformedSerialPolicy, ValidatorOptions};

use crate::cli::{CheckArgs, RulesArgs};
use crate::summary::{apply_table_style, dim_cell, header_cell};
use crate::types::CheckResult;

pub fn run_check(args: &CheckArgs, validator: ValidatorOptions) -> Result<CheckResult> {
    let request = CheckRequest {
        path: args.file.clone(),
        variant: args.variant.into(),
        ingest: IngestOptions {
            delimiter: args.delimiter,
        },
        validator,
    };

    let spinner = spinner(&format!("Checking {}", args.file.display()));
    let checked = check_inventory(&request);
    spinner.finish_and_clear();
    let checked = checked?;

    let targets = ExportTargets {
        csv: args.output.clone(),
        csv_delimiter: args.output_delimiter,
        json: args.json.clone(),
    };
    let exports = export(&checked, &targets)?;
    Ok(CheckResult {
        source_file: args.file.clone(),
        checked,
        exports,
    })
}

pub fn run_rules(args: &RulesArgs) -> Result<()> {
    let variants: Vec<Variant> = match args.variant {
        Some(variant) => vec![variant.into()],
        None => Variant::ALL.to_vec(),
    };
    for variant in variants {
        print_rule_set(&RuleSet::for_variant(variant));
    }
    Ok(())
}

fn spinner(message: &str) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner} {msg}") {
        bar.set_style(style);
    }
    bar.set_message(message.to_string());
    bar.enable_steady_tick(std::time::Duration::from_millis(100));
    bar
}

fn print_rule_set(rule_set: &RuleSet) {
    println!(
        "{} ({})",
        rule_set.variant.label(),
        rule_set.variant.as_str()
    );
    println!("Required columns: {}", rule_set.required_columns.join(", "));

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Code"),
        header_cell("Anomalie"),
        header_cell("Condition"),
        header_cell("Correction"),
    ]);
    apply_table_style(&mut table);
    for (idx, rule) in rule_set.rules.iter().enumerate() {
        table.add_row(vec![
            Cell::new(idx + 1),
            Cell::new(rule.fault.code()),
            Cell::new(rule.fault.label_in(rule_set.variant)),
            Cell::new(rule.description),
            correction_cell(rule.correction_field().map(|field| field.column_name())),
        ]);
    }
    let policy = match rule_set.fp2e.policy {
        UnformedSerialPolicy::Conforming => "unformed serial conforms",
        UnformedSerialPolicy::Fault => "unformed serial is a fault",
    };
    table.add_row(vec![
        Cell::new(rule_set.rules.len() + 1),
        Cell::new("fp2e"),
        Cell::new("Contrôle FP2E"),
        Cell::new(format!("{}; {policy}", rule_set.fp2e.description)),
        Cell::new("Correction Année de fabrication, Correction Diametre"),
    ]);
    println!("{table}");
    println!();
}

fn correction_cell(column: Option<&str>) -> Cell {
    match column {
        Some(name) => Cell::new(name),
        None => dim_cell("-"),
    }
}
