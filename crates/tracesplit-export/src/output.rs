//! Date-stamped output directory: `<root>/<YYYY-MM-DD>/`.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use tracesplit_core::ReportKind;
use tracing::info;

use crate::ExportError;

/// Directory that receives the dumps and reports of one day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDir {
    path: PathBuf,
}

impl OutputDir {
    /// Locate the directory for `date` under `root`. Nothing is created.
    pub fn for_date(root: &Path, date: NaiveDate) -> Self {
        Self {
            path: root.join(date.format("%Y-%m-%d").to_string()),
        }
    }

    /// Locate the directory for today's local date under `root`.
    pub fn today(root: &Path) -> Self {
        Self::for_date(root, Local::now().date_naive())
    }

    /// Create the directory (and parents) if it does not exist yet.
    pub fn create(&self) -> Result<(), ExportError> {
        if !self.path.is_dir() {
            fs::create_dir_all(&self.path)?;
            info!(path = %self.path.display(), "created output directory");
        }
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of the raw classified dump for `kind`.
    pub fn dump_path(&self, kind: ReportKind) -> PathBuf {
        self.path.join(kind.dump_file_name())
    }

    /// Path of the PDF report for `kind`.
    pub fn report_pdf_path(&self, kind: ReportKind) -> PathBuf {
        self.path.join(format!("{}.pdf", kind.file_stem()))
    }

    /// Path of the CSV report for `kind`.
    pub fn report_csv_path(&self, kind: ReportKind) -> PathBuf {
        self.path.join(format!("{}.csv", kind.file_stem()))
    }
}
