use serde::Serialize;

use meter_model::{CorrectionField, Fault, Variant};
use meter_validate::{RuleSet, ValidationOutcome};

/// One line of the summary table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryRow {
    pub fault: Fault,
    pub label: &'static str,
    pub occurrences: usize,
    /// Correction column associated with the fault, if any.
    pub correction_field: Option<CorrectionField>,
    /// Rows with this fault and a proposed value; `None` when the fault has
    /// no correction column.
    pub corrected: Option<usize>,
}

/// Fault occurrences and corrected-instance counts for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub variant: Variant,
    pub total_records: usize,
    pub anomaly_count: usize,
    pub rows: Vec<SummaryRow>,
}

impl Summary {
    pub fn total_corrected(&self) -> usize {
        self.rows.iter().filter_map(|row| row.corrected).sum()
    }
}

/// Builds the summary table, most frequent faults first.
pub fn summarize(outcome: &ValidationOutcome) -> Summary {
    let rule_set = RuleSet::for_variant(outcome.variant);
    let rows = outcome
        .frequencies
        .by_count()
        .into_iter()
        .map(|entry| {
            let correction_field = rule_set.correction_field_for(entry.fault);
            let corrected = correction_field.map(|field| {
                outcome
                    .anomalies
                    .iter()
                    .filter(|row| row.is_corrected(entry.fault, field))
                    .count()
            });
            SummaryRow {
                fault: entry.fault,
                label: entry.label,
                occurrences: entry.count,
                correction_field,
                corrected,
            }
        })
        .collect();
    Summary {
        variant: outcome.variant,
        total_records: outcome.total_records,
        anomaly_count: outcome.anomaly_count(),
        rows,
    }
}

#[cfg(test)]
mod tests {
    use meter_model::{Correction, MeterRecord};
    use meter_validate::{AnomalyRow, AnomalySet, FaultFrequencyTable};

    use super::*;

    fn row(index: usize, faults: Vec<Fault>, corrections: Vec<Correction>) -> AnomalyRow {
        AnomalyRow {
            original_index: index,
            variant: Variant::Radio,
            record: MeterRecord::default(),
            fp2e_faults: faults.iter().copied().filter(Fault::is_fp2e).collect(),
            faults,
            corrections,
        }
    }

    #[test]
    fn counts_corrected_instances_per_fault() {
        let rows = vec![
            row(
                0,
                vec![Fault::Fp2eDiameter],
                vec![Correction::new(Fault::Fp2eDiameter, CorrectionField::Diameter, "60")],
            ),
            // unknown diameter letter: fault without a proposal
            row(1, vec![Fault::Fp2eDiameter], Vec::new()),
            row(2, vec![Fault::Fp2eDiameter, Fault::GpsInvalid], Vec::new()),
            row(3, vec![Fault::GpsInvalid], Vec::new()),
        ];
        let frequencies = FaultFrequencyTable::from_rows(&rows);
        let outcome = ValidationOutcome {
            variant: Variant::Radio,
            total_records: 10,
            anomalies: AnomalySet::new(rows),
            frequencies,
        };

        let summary = summarize(&outcome);
        assert_eq!(summary.anomaly_count, 4);
        assert_eq!(summary.rows.len(), 2);

        let diameter = &summary.rows[0];
        assert_eq!(diameter.fault, Fault::Fp2eDiameter);
        assert_eq!(diameter.occurrences, 3);
        assert_eq!(diameter.correction_field, Some(CorrectionField::Diameter));
        assert_eq!(diameter.corrected, Some(1));

        let gps = &summary.rows[1];
        assert_eq!(gps.occurrences, 2);
        assert_eq!(gps.corrected, None);
        assert_eq!(summary.total_corrected(), 1);
    }
}
