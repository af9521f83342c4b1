//! High-level, ergonomic library API: run one query through
//! search → select → detail → normalize, export the result, or drive a whole
//! interactive session. Prefer these entry points over the `core` and `io`
//! primitives when embedding kinofetch.
pub mod console;

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::core::normalize::{normalize_candidate, normalize_detail};
use crate::core::params::SessionParams;
use crate::core::select::{Chooser, Resolution, SelectionResolver};
use crate::error::{Error, Result};
use crate::io::catalog::CatalogSource;
use crate::io::naming::{export_paths, sanitize_file_stem};
use crate::io::writers::{csv::write_csv, json::write_json};
use crate::types::{CanonicalRecord, RecordSource, UNKNOWN};

use console::{ConsoleChooser, ConsoleCommand, parse_command, read_line, render_summary};

/// Result of running one query through the pipeline
#[derive(Debug)]
pub enum QueryOutcome {
    Record {
        record: CanonicalRecord,
        source: RecordSource,
    },
    /// The user chose to skip this title.
    Cancelled,
    Failed(Error),
}

/// Per-file outcome of [`export_record`]
#[derive(Debug)]
pub struct ExportReport {
    pub json: Result<PathBuf>,
    pub csv: Result<PathBuf>,
}

impl ExportReport {
    pub fn is_complete(&self) -> bool {
        self.json.is_ok() && self.csv.is_ok()
    }
}

/// Counters returned by [`run_session`] and [`run_queries`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionReport {
    pub processed: usize,
    pub cancelled: usize,
    pub failed: usize,
}

/// Search, resolve, fetch details and normalize one query.
///
/// A failed detail fetch is not fatal: the record is then normalized from the
/// selected search candidate and `source` is `RecordSource::Candidate`.
pub fn fetch_record<S, C>(source: &S, chooser: &mut C, query: &str, limit: usize) -> QueryOutcome
where
    S: CatalogSource + ?Sized,
    C: Chooser + ?Sized,
{
    let mut resolver = SelectionResolver::new();
    resolver.begin_search();
    let search = source.search(query, limit);

    let candidate = match resolver.resolve(search, chooser) {
        Resolution::Resolved(candidate) => candidate,
        Resolution::Cancelled => return QueryOutcome::Cancelled,
        Resolution::Failed(e) => return QueryOutcome::Failed(e),
    };

    let Some(id) = candidate.id else {
        warn!(
            "Selected title {:?} has no identifier, using search data",
            candidate.name.as_deref().unwrap_or(UNKNOWN)
        );
        return QueryOutcome::Record {
            record: normalize_candidate(&candidate),
            source: RecordSource::Candidate,
        };
    };

    info!("Fetching details for title {}", id);
    match source.fetch_detail(id) {
        Ok(detail) => QueryOutcome::Record {
            record: normalize_detail(&detail),
            source: RecordSource::Detail,
        },
        Err(e) => {
            warn!("Detail fetch for {} failed ({}), using search data", id, e);
            QueryOutcome::Record {
                record: normalize_candidate(&candidate),
                source: RecordSource::Candidate,
            }
        }
    }
}

/// Write `<stem>.json` and `<stem>.csv` into `dir`. Each file is attempted
/// regardless of whether the other succeeded.
pub fn export_record(record: &CanonicalRecord, dir: &Path, stem: &str) -> ExportReport {
    let (json_path, csv_path) = export_paths(dir, stem);
    ExportReport {
        json: write_json(record, &json_path).map(|()| json_path),
        csv: write_csv(record, &csv_path).map(|()| csv_path),
    }
}

/// Run one query end to end and print the outcome to `out`.
///
/// Returns the outcome so callers can count it; nothing here aborts the
/// session.
pub fn handle_query<S, R, W>(
    source: &S,
    input: &mut R,
    out: &mut W,
    query: &str,
    params: &SessionParams,
) -> Result<QueryOutcome>
where
    S: CatalogSource + ?Sized,
    R: BufRead,
    W: Write,
{
    writeln!(out, "\nProcessing: {}", query)?;
    let outcome = {
        let mut chooser = ConsoleChooser::new(&mut *input, &mut *out);
        fetch_record(source, &mut chooser, query, params.search_limit)
    };

    match &outcome {
        QueryOutcome::Record { record, source: origin } => {
            info!("Record for {:?} built from {} data", query, origin);
            writeln!(out, "\n{}\n", render_summary(record))?;

            match sanitize_file_stem(query) {
                Ok(stem) => {
                    let report = export_record(record, &params.output_dir, &stem);
                    for written in [&report.json, &report.csv] {
                        match written {
                            Ok(path) => writeln!(out, "Saved: {}", path.display())?,
                            Err(e) => {
                                warn!("Export failed: {}", e);
                                writeln!(out, "Export failed: {}", e)?;
                            }
                        }
                    }
                }
                Err(e) => {
                    warn!("Skipping export: {}", e);
                    writeln!(out, "Cannot save files: {}", e)?;
                }
            }
        }
        QueryOutcome::Cancelled => writeln!(out, "Selection cancelled.")?,
        QueryOutcome::Failed(e) => {
            warn!("Query {:?} failed: {}", query, e);
            writeln!(out, "Could not get data for {:?}: {}", query, e)?;
            writeln!(out, "Try a more specific title.")?;
        }
    }

    Ok(outcome)
}

/// Interactive loop: prompt for titles on `out`, read them from `input`, and
/// process each until an exit token or end of input.
///
/// Only console I/O failures end the session early.
pub fn run_session<S, R, W>(
    source: &S,
    input: &mut R,
    out: &mut W,
    params: &SessionParams,
) -> Result<SessionReport>
where
    S: CatalogSource + ?Sized,
    R: BufRead,
    W: Write,
{
    let mut report = SessionReport::default();

    loop {
        write!(out, "\nEnter a title (or 'exit' to quit): ")?;
        out.flush()?;

        let Some(line) = read_line(input) else {
            info!("Input closed, ending session");
            break;
        };

        match parse_command(&line) {
            ConsoleCommand::Exit => {
                writeln!(out, "Goodbye!")?;
                break;
            }
            ConsoleCommand::Blank => {
                writeln!(out, "Please enter a title.")?;
            }
            ConsoleCommand::Query(query) => {
                let outcome = handle_query(source, input, out, &query, params)?;
                tally(&mut report, &outcome);
            }
        }
    }

    info!(
        "Session finished: processed={} cancelled={} failed={}",
        report.processed, report.cancelled, report.failed
    );
    Ok(report)
}

/// Non-interactive variant of [`run_session`]: process each query in order.
/// Disambiguation prompts still read from `input`.
pub fn run_queries<S, R, W>(
    source: &S,
    queries: &[String],
    input: &mut R,
    out: &mut W,
    params: &SessionParams,
) -> Result<SessionReport>
where
    S: CatalogSource + ?Sized,
    R: BufRead,
    W: Write,
{
    let mut report = SessionReport::default();
    for query in queries {
        let query = query.trim();
        if query.is_empty() {
            continue;
        }
        let outcome = handle_query(source, input, out, query, params)?;
        tally(&mut report, &outcome);
    }
    Ok(report)
}

fn tally(report: &mut SessionReport, outcome: &QueryOutcome) {
    match outcome {
        QueryOutcome::Record { .. } => report.processed += 1,
        QueryOutcome::Cancelled => report.cancelled += 1,
        QueryOutcome::Failed(_) => report.failed += 1,
    }
}
