//! Trace log classification: line normalisation, good/defect partition,
//! report projection, and summary.

pub mod cancel;
pub mod normalize;
pub mod record;
pub mod report;
pub mod search;
pub mod session;
pub mod summary;

mod error;
pub use error::CoreError;

pub use cancel::CancellationToken;
pub use normalize::{body_lines, normalize_line, split_lines};
pub use record::{DefectRecord, GOOD_ARITY, GoodRecord, Record};
pub use report::{REPORT_HEADER, ReportKind, ReportRow, defect_report, good_report, qualifies};
pub use session::Session;
pub use summary::Summary;
