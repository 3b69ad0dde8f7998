use std::path::PathBuf;

use meter_cli::pipeline::CheckedInventory;

/// Result of `meter-audit check`.
#[derive(Debug)]
pub struct CheckResult {
    pub source_file: PathBuf,
    pub checked: CheckedInventory,
    pub exports: Vec<PathBuf>,
}

impl CheckResult {
    pub fn has_anomalies(&self) -> bool {
        !self.checked.outcome.is_clean()
    }
}
