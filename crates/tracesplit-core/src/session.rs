//! One processing run over a trace file.

use tracing::{debug, info};

use crate::cancel::CancellationToken;
use crate::error::CoreError;
use crate::normalize::body_lines;
use crate::record::{DefectRecord, GoodRecord, Record};
use crate::report::{self, ReportKind, ReportRow};
use crate::summary::Summary;

/// Classified records from a single trace file, in encounter order.
///
/// Every non-empty normalised body line lands in exactly one of
/// [`good`](Self::good) or [`defect`](Self::defect).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    good: Vec<GoodRecord>,
    defect: Vec<DefectRecord>,
    lines_scanned: usize,
}

impl Session {
    /// Classify every body line of `text`.
    ///
    /// The token is checked before each line and `progress(done, total)` is
    /// called after it. Cancelling discards everything classified so far.
    pub fn classify(
        text: &str,
        cancel: &CancellationToken,
        mut progress: impl FnMut(usize, usize),
    ) -> Result<Self, CoreError> {
        let lines = body_lines(text);
        let total = lines.len();
        let mut session = Self::default();

        for (i, line) in lines.iter().enumerate() {
            if cancel.is_cancelled() {
                info!(processed = i, total, "classification cancelled");
                return Err(CoreError::Cancelled { processed: i });
            }

            session.push_line(line);
            progress(i + 1, total);
        }

        info!(
            lines = total,
            good = session.good.len(),
            defect = session.defect.len(),
            "classified trace body"
        );
        Ok(session)
    }

    /// Classify `text` with no cancellation and no progress reporting.
    pub fn from_text(text: &str) -> Self {
        let mut session = Self::default();
        for line in body_lines(text) {
            session.push_line(line);
        }
        session
    }

    fn push_line(&mut self, line: &str) {
        self.lines_scanned += 1;
        match Record::from_line(line) {
            Some(record) => self.push(record),
            None => debug!(line_no = self.lines_scanned, "skipping empty line"),
        }
    }

    fn push(&mut self, record: Record) {
        match record {
            Record::Good(r) => self.good.push(r),
            Record::Defect(r) => self.defect.push(r),
        }
    }

    pub fn good(&self) -> &[GoodRecord] {
        &self.good
    }

    pub fn defect(&self) -> &[DefectRecord] {
        &self.defect
    }

    /// Number of body lines looked at, including ones that normalised to nothing.
    pub fn lines_scanned(&self) -> usize {
        self.lines_scanned
    }

    /// Number of classified records (good + defect).
    pub fn record_count(&self) -> usize {
        self.good.len() + self.defect.len()
    }

    /// Good/defect split, or `None` when nothing was classified.
    pub fn summary(&self) -> Option<Summary> {
        Summary::from_counts(self.good.len(), self.defect.len())
    }

    /// Report rows for `kind`.
    pub fn report(&self, kind: ReportKind) -> Vec<ReportRow> {
        match kind {
            ReportKind::Good => report::good_report(&self.good),
            ReportKind::Defect => report::defect_report(&self.defect),
        }
    }
}
