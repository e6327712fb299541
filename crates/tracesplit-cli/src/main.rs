mod display;
mod progress;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use tracesplit_core::{CancellationToken, ReportKind, Session, search};
use tracesplit_export::{ExportError, OutputDir};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::progress::ProgressLine;

#[derive(Parser)]
#[command(name = "tracesplit", version, about = "Split trace logs into good/defect records and export reports")]
struct Cli {
    /// Directory under which the dated output folder is created.
    #[arg(long, global = true, env = "TRACESPLIT_OUTPUT_ROOT", default_value = ".")]
    output_root: PathBuf,

    /// Date of the output folder (YYYY-MM-DD). Defaults to today.
    #[arg(long, global = true, env = "TRACESPLIT_DATE")]
    date: Option<NaiveDate>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Classify a trace file, write both raw dumps, and print the summary.
    Process {
        input: PathBuf,
        /// Print the summary as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Classify a trace file and export one report as PDF and CSV.
    Export {
        #[arg(value_enum)]
        kind: KindArg,
        input: PathBuf,
    },
    /// Classify a trace file in memory and print the summary only.
    Summary {
        input: PathBuf,
        #[arg(long)]
        json: bool,
    },
    /// Print a raw dump from the output folder as a table.
    Show {
        #[arg(value_enum)]
        kind: KindArg,
        /// Keep rows whose first column contains this text (case-insensitive).
        #[arg(long, short)]
        search: Option<String>,
        /// Print at most this many rows.
        #[arg(long, short)]
        limit: Option<usize>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum KindArg {
    Good,
    Defect,
}

impl From<KindArg> for ReportKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Good => ReportKind::Good,
            KindArg::Defect => ReportKind::Defect,
        }
    }
}

impl Cli {
    fn output_dir(&self) -> OutputDir {
        match self.date {
            Some(date) => OutputDir::for_date(&self.output_root, date),
            None => OutputDir::today(&self.output_root),
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!("tracesplit v{}", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();

    let cancel = CancellationToken::new();
    let interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupt received, cancelling");
            interrupt.cancel();
        }
    });

    // The pipeline is synchronous; the runtime only listens for Ctrl-C.
    match tokio::task::spawn_blocking(move || run(&cli, &cancel)).await {
        Ok(Ok(())) => ExitCode::SUCCESS,
        Ok(Err(err)) => report_error(&err),
        Err(join_err) => {
            eprintln!("Error: worker failed: {join_err}");
            ExitCode::FAILURE
        }
    }
}

fn report_error(err: &anyhow::Error) -> ExitCode {
    match err.downcast_ref::<ExportError>() {
        Some(ExportError::NoData(kind)) => {
            eprintln!("No Data: no valid {kind} data found to export.");
            ExitCode::from(2)
        }
        Some(ExportError::Cancelled) => {
            eprintln!("Cancelled: operation cancelled.");
            ExitCode::from(130)
        }
        _ => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, cancel: &CancellationToken) -> anyhow::Result<()> {
    match &cli.command {
        Command::Process { input, json } => cmd_process(cli, input, *json, cancel),
        Command::Export { kind, input } => cmd_export(cli, (*kind).into(), input, cancel),
        Command::Summary { input, json } => cmd_summary(input, *json, cancel),
        Command::Show {
            kind,
            search,
            limit,
        } => cmd_show(cli, (*kind).into(), search.as_deref(), *limit),
    }
}

fn cmd_process(
    cli: &Cli,
    input: &Path,
    json: bool,
    cancel: &CancellationToken,
) -> anyhow::Result<()> {
    let out = cli.output_dir();
    let mut progress = ProgressLine::new("Processing");
    let result = tracesplit_export::process_file(input, &out, cancel, |done, total| {
        progress.update(done, total)
    })
    .with_context(|| format!("failed to process {}", input.display()))?;

    info!(
        elapsed_secs = result.elapsed_secs,
        records = result.session.record_count(),
        "process complete"
    );

    println!("Data processed successfully.");
    println!("  {:<12} {}", "Good data", result.good_dump.display());
    println!("  {:<12} {}", "Defect data", result.defect_dump.display());
    println!();
    print_summary(&result.session, json)
}

fn cmd_export(
    cli: &Cli,
    kind: ReportKind,
    input: &Path,
    cancel: &CancellationToken,
) -> anyhow::Result<()> {
    let session = classify(input, cancel)?;
    let out = cli.output_dir();
    let mut progress = ProgressLine::new("Exporting");
    let export = tracesplit_export::export_report(&session, kind, &out, cancel, |done, total| {
        progress.update(done, total)
    })
    .with_context(|| format!("failed to export {kind} report"))?;

    println!(
        "{} report exported ({} rows).",
        capitalise(export.kind.as_str()),
        export.rows
    );
    println!("  {:<4} {}", "PDF", export.pdf.display());
    println!("  {:<4} {}", "CSV", export.csv.display());
    Ok(())
}

fn cmd_summary(input: &Path, json: bool, cancel: &CancellationToken) -> anyhow::Result<()> {
    let session = classify(input, cancel)?;
    print_summary(&session, json)
}

fn cmd_show(
    cli: &Cli,
    kind: ReportKind,
    needle: Option<&str>,
    limit: Option<usize>,
) -> anyhow::Result<()> {
    let path = cli.output_dir().dump_path(kind);
    let rows = tracesplit_export::read_dump_file(&path)
        .context("no dump found; run `tracesplit process` first")?;

    let shown = search::filter_rows(&rows, needle.unwrap_or(""));
    info!(total = rows.len(), shown = shown.len(), "loaded dump");
    display::print_table(&shown, limit);
    Ok(())
}

/// Read and classify `input` with progress on stderr.
fn classify(input: &Path, cancel: &CancellationToken) -> anyhow::Result<Session> {
    let text = tracesplit_export::read_trace(input)?;
    let mut progress = ProgressLine::new("Classifying");
    let session = Session::classify(&text, cancel, |done, total| progress.update(done, total))
        .map_err(ExportError::from)?;
    Ok(session)
}

fn print_summary(session: &Session, json: bool) -> anyhow::Result<()> {
    let summary = session.summary();
    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        display::print_summary_card(summary.as_ref());
    }
    Ok(())
}

fn capitalise(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
