//! Export layer: date-stamped output directory, CSV dumps and reports, PDF reports.

mod error;
pub use error::ExportError;

pub mod dump;
pub mod output;
pub mod pdf;
pub mod pipeline;

pub use dump::{read_dump_file, write_dump_file, write_report_csv};
pub use output::OutputDir;
pub use pdf::{render_report, write_pdf};
pub use pipeline::{ExportOutput, ProcessOutput, export_report, process_file, read_trace};
