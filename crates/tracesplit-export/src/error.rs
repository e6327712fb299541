use std::path::PathBuf;

use thiserror::Error;
use tracesplit_core::{CoreError, ReportKind};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("pdf error: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("no valid {0} data found to export")]
    NoData(ReportKind),

    #[error("operation cancelled")]
    Cancelled,
}

impl From<CoreError> for ExportError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Cancelled { .. } => Self::Cancelled,
        }
    }
}
