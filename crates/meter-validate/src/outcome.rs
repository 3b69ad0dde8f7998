//! Validation results: anomaly rows and fault frequencies.

use serde::Serialize;

use meter_model::{Correction, CorrectionField, Fault, MeterRecord, Variant, join_faults};

/// A row with at least one fault or proposed correction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnomalyRow {
    /// Zero-based position of the row in the source batch.
    pub original_index: usize,
    /// Inventory the row was validated as; selects label wording.
    pub variant: Variant,
    pub record: MeterRecord,
    /// Faults in rule evaluation order, FP2E findings last.
    pub faults: Vec<Fault>,
    pub corrections: Vec<Correction>,
    /// The subset of `faults` produced by the FP2E checker.
    pub fp2e_faults: Vec<Fault>,
}

impl AnomalyRow {
    /// Fault labels joined with `" / "`.
    pub fn fault_string(&self) -> String {
        join_faults(&self.faults, self.variant)
    }

    /// FP2E fault labels joined with `" / "`, empty when FP2E-conforming.
    pub fn fp2e_detail(&self) -> String {
        join_faults(&self.fp2e_faults, self.variant)
    }

    pub fn has_fault(&self, fault: Fault) -> bool {
        self.faults.contains(&fault)
    }

    /// First proposed value for `field`.
    pub fn correction_for(&self, field: CorrectionField) -> Option<&str> {
        self.corrections
            .iter()
            .find(|correction| correction.field == field)
            .map(|correction| correction.value.as_str())
    }

    /// True when `fault` fired and proposed a value for `field`.
    pub fn is_corrected(&self, fault: Fault, field: CorrectionField) -> bool {
        self.has_fault(fault)
            && self.corrections.iter().any(|correction| {
                correction.fault == fault
                    && correction.field == field
                    && !correction.value.is_empty()
            })
    }
}

/// Anomalous rows in source order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AnomalySet {
    rows: Vec<AnomalyRow>,
}

impl AnomalySet {
    pub fn new(rows: Vec<AnomalyRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[AnomalyRow] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AnomalyRow> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl<'a> IntoIterator for &'a AnomalySet {
    type Item = &'a AnomalyRow;
    type IntoIter = std::slice::Iter<'a, AnomalyRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// Occurrences of one fault across the anomaly set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FaultCount {
    pub fault: Fault,
    pub label: &'static str,
    pub count: usize,
}

/// Fault occurrence counts in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FaultFrequencyTable {
    entries: Vec<FaultCount>,
}

impl FaultFrequencyTable {
    /// Explodes each row's fault list and counts labels.
    pub fn from_rows<'a>(rows: impl IntoIterator<Item = &'a AnomalyRow>) -> Self {
        let mut table = Self::default();
        for row in rows {
            for &fault in &row.faults {
                table.record(fault, row.variant);
            }
        }
        table
    }

    fn record(&mut self, fault: Fault, variant: Variant) {
        match self.entries.iter_mut().find(|entry| entry.fault == fault) {
            Some(entry) => entry.count += 1,
            None => self.entries.push(FaultCount {
                fault,
                label: fault.label_in(variant),
                count: 1,
            }),
        }
    }

    pub fn count(&self, fault: Fault) -> usize {
        self.entries
            .iter()
            .find(|entry| entry.fault == fault)
            .map_or(0, |entry| entry.count)
    }

    pub fn entries(&self) -> &[FaultCount] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|entry| entry.count).sum()
    }

    /// Entries by descending count; ties keep first-seen order.
    pub fn by_count(&self) -> Vec<FaultCount> {
        let mut sorted = self.entries.clone();
        sorted.sort_by(|a, b| b.count.cmp(&a.count));
        sorted
    }
}

/// Everything a validation run produces.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationOutcome {
    pub variant: Variant,
    pub total_records: usize,
    pub anomalies: AnomalySet,
    pub frequencies: FaultFrequencyTable,
}

impl ValidationOutcome {
    pub fn anomaly_count(&self) -> usize {
        self.anomalies.len()
    }

    pub fn is_clean(&self) -> bool {
        self.anomalies.is_empty()
    }
}
