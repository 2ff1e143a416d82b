//! Cost report generation and PDF export.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub mod pdf;
pub mod report;

pub use pdf::{REPORT_FILE_NAME, export_report, write_pdf};
pub use report::{CostReport, ReportLine};

/// Errors that can occur while exporting a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Export was requested before any calculation completed.
    #[error("no calculation to export yet; calculate the costs first")]
    NotReady,

    #[error("cannot write report to {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("PDF error: {0}")]
    Pdf(String),
}
