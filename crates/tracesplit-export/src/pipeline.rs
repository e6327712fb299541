//! The two user-triggered operations: process a trace file, export a report.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use tracesplit_core::{CancellationToken, ReportKind, Session};
use tracing::{info, warn};

use crate::dump::{write_dump_file, write_report_csv};
use crate::output::OutputDir;
use crate::pdf::{render_report, write_pdf};
use crate::ExportError;

/// Result of [`process_file`].
pub struct ProcessOutput {
    pub session: Session,
    pub good_dump: PathBuf,
    pub defect_dump: PathBuf,
    pub elapsed_secs: f64,
}

/// Result of [`export_report`].
pub struct ExportOutput {
    pub kind: ReportKind,
    pub rows: usize,
    pub pdf: PathBuf,
    pub csv: PathBuf,
}

/// Read a trace file as UTF-8 text.
pub fn read_trace(path: &Path) -> Result<String, ExportError> {
    fs::read_to_string(path).map_err(|source| ExportError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Classify a trace file and write both raw dumps.
///
/// Nothing is written if reading fails or the run is cancelled during
/// classification.
pub fn process_file(
    input: &Path,
    out: &OutputDir,
    cancel: &CancellationToken,
    progress: impl FnMut(usize, usize),
) -> Result<ProcessOutput, ExportError> {
    let start = Instant::now();
    let text = read_trace(input)?;
    info!(path = %input.display(), bytes = text.len(), "read trace file");

    let session = Session::classify(&text, cancel, progress)?;

    out.create()?;
    let good_dump = out.dump_path(ReportKind::Good);
    let defect_dump = out.dump_path(ReportKind::Defect);
    write_dump_file(&good_dump, session.good().iter().map(|r| r.fields()))?;
    write_dump_file(&defect_dump, session.defect().iter().map(|r| r.fields()))?;

    Ok(ProcessOutput {
        session,
        good_dump,
        defect_dump,
        elapsed_secs: start.elapsed().as_secs_f64(),
    })
}

/// Export the `kind` report of `session` as `<stem>.pdf` and `<stem>.csv`.
///
/// A defect report with no qualifying rows fails with
/// [`ExportError::NoData`] and writes nothing. A good report with no rows
/// is written with the header only. `progress(done, total)` follows the
/// PDF rows; cancelling before the last one writes nothing.
pub fn export_report(
    session: &Session,
    kind: ReportKind,
    out: &OutputDir,
    cancel: &CancellationToken,
    progress: impl FnMut(usize, usize),
) -> Result<ExportOutput, ExportError> {
    let rows = session.report(kind);
    if rows.is_empty() && kind == ReportKind::Defect {
        warn!(defects = session.defect().len(), "no qualifying defect rows");
        return Err(ExportError::NoData(kind));
    }

    let mut doc = render_report(kind, &rows, cancel, progress)?;

    out.create()?;
    let pdf = out.report_pdf_path(kind);
    let csv = out.report_csv_path(kind);
    write_pdf(&mut doc, &pdf)?;
    write_report_csv(fs::File::create(&csv)?, &rows)?;
    info!(kind = %kind, rows = rows.len(), path = %csv.display(), "wrote report csv");

    Ok(ExportOutput {
        kind,
        rows: rows.len(),
        pdf,
        csv,
    })
}
