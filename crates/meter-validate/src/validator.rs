//! Record Validator: runs a variant's rule set over a batch.

use std::time::Instant;

use polars::prelude::DataFrame;
use tracing::{debug, info, info_span};

use meter_model::{MeterRecord, Variant};

use crate::error::{Result, ValidateError};
use crate::fp2e::{UnformedSerialPolicy, check_fp2e};
use crate::outcome::{AnomalyRow, AnomalySet, FaultFrequencyTable, ValidationOutcome};
use crate::records::{extract_records, missing_columns};
use crate::rules::RuleSet;

/// Run-level settings on top of a variant's defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidatorOptions {
    /// Replaces the variant's FP2E policy for unformed serials.
    pub unformed_serial: Option<UnformedSerialPolicy>,
}

impl ValidatorOptions {
    pub fn with_unformed_serial(mut self, policy: UnformedSerialPolicy) -> Self {
        self.unformed_serial = Some(policy);
        self
    }
}

/// Validator for one inventory variant.
#[derive(Debug, Clone)]
pub struct Validator {
    rule_set: RuleSet,
}

impl Validator {
    pub fn new(variant: Variant) -> Self {
        Self {
            rule_set: RuleSet::for_variant(variant),
        }
    }

    pub fn with_options(variant: Variant, options: ValidatorOptions) -> Self {
        let mut rule_set = RuleSet::for_variant(variant);
        if let Some(policy) = options.unformed_serial {
            rule_set = rule_set.with_unformed_serial_policy(policy);
        }
        Self { rule_set }
    }

    /// Uses a custom rule set.
    pub fn from_rule_set(rule_set: RuleSet) -> Self {
        Self { rule_set }
    }

    pub fn rule_set(&self) -> &RuleSet {
        &self.rule_set
    }

    /// Validates a raw batch.
    ///
    /// Fails before touching any row when a required column is absent.
    pub fn validate(&self, df: &DataFrame) -> Result<ValidationOutcome> {
        let variant = self.rule_set.variant;
        let span = info_span!("validate", variant = %variant, rows = df.height());
        let _guard = span.enter();

        let missing = missing_columns(df, self.rule_set.required_columns);
        if !missing.is_empty() {
            return Err(ValidateError::MissingColumns { columns: missing });
        }
        let records = extract_records(df, variant)?;
        Ok(self.validate_records(&records))
    }

    /// Validates already-normalized records.
    pub fn validate_records(&self, records: &[MeterRecord]) -> ValidationOutcome {
        let start = Instant::now();
        let mut hits = vec![0usize; self.rule_set.rules.len()];
        let mut fp2e_checked = 0usize;

        let mut rows = Vec::new();
        for (index, record) in records.iter().enumerate() {
            let mut faults = Vec::new();
            let mut corrections = Vec::new();
            for (rule, hit) in self.rule_set.rules.iter().zip(hits.iter_mut()) {
                if !rule.matches(record) {
                    continue;
                }
                *hit += 1;
                faults.push(rule.fault);
                corrections.extend(rule.correction(record));
            }

            let mut fp2e_faults = Vec::new();
            if self.rule_set.fp2e.is_eligible(record) {
                fp2e_checked += 1;
                let fp2e = check_fp2e(record, self.rule_set.fp2e.policy);
                faults.extend_from_slice(&fp2e.faults);
                corrections.extend(fp2e.corrections);
                fp2e_faults = fp2e.faults;
            }

            if faults.is_empty() && corrections.is_empty() {
                continue;
            }
            rows.push(AnomalyRow {
                original_index: index,
                variant: self.rule_set.variant,
                record: record.clone(),
                faults,
                corrections,
                fp2e_faults,
            });
        }

        for (rule, hit) in self.rule_set.rules.iter().zip(&hits) {
            debug!(fault = rule.fault.code(), hits = *hit, "rule evaluated");
        }

        let frequencies = FaultFrequencyTable::from_rows(&rows);
        let outcome = ValidationOutcome {
            variant: self.rule_set.variant,
            total_records: records.len(),
            anomalies: AnomalySet::new(rows),
            frequencies,
        };
        info!(
            variant = %outcome.variant,
            records = outcome.total_records,
            anomalies = outcome.anomaly_count(),
            fp2e_checked,
            duration_ms = start.elapsed().as_millis(),
            "validation complete"
        );
        outcome
    }
}

/// Validates `df` with the default rule set of `variant`.
pub fn validate(df: &DataFrame, variant: Variant) -> Result<ValidationOutcome> {
    Validator::new(variant).validate(df)
}
