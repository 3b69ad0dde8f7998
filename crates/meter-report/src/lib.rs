//! Renderer-facing views of a validation outcome.
//!
//! - [`summarize`] cross-tabulates faults against occurrences and corrected
//!   instances.
//! - [`anomaly_frame`] rebuilds the annotated anomaly table.
//! - [`write_anomalies_csv`] and [`write_report_json`] persist them.

mod export;
mod frame;
mod summary;

pub use export::{REPORT_SCHEMA, REPORT_SCHEMA_VERSION, write_anomalies_csv, write_report_json};
pub use frame::{
    SUMMARY_CORRECTED, SUMMARY_FAULT, SUMMARY_OCCURRENCES, anomaly_frame, summary_frame,
};
pub use summary::{Summary, SummaryRow, summarize};
