//! Top log → CSV pipeline: scanner, aggregator and emitter.
//!
//! Reads a complete `top` batch log, sums one metric per watched process for
//! every snapshot and writes the table once the input is exhausted.

pub mod aggregator;
pub mod emitter;
pub mod grammar;
pub mod layout;
pub mod scanner;
pub mod snapshot;
pub mod watchlist;

use std::io::{BufRead, Write};

use crate::error::Result;

pub use aggregator::{Aggregator, NumericPolicy, Outcome};
pub use layout::{ColumnLayout, ColumnRole, Metric};
pub use scanner::{ScannedLine, Scanner};
pub use snapshot::{Snapshot, Timestamp};
pub use watchlist::WatchList;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ParseOptions {
    pub layout: ColumnLayout,
    pub numeric_policy: NumericPolicy,
}

/// Counters gathered over one conversion.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ConvertSummary {
    pub lines: usize,
    pub snapshots: usize,
    pub matched: usize,
    pub skipped: usize,
}

/// Parsed snapshots plus the counters collected while reading them.
#[derive(Debug)]
pub struct ParsedReport {
    pub snapshots: Vec<Snapshot>,
    pub summary: ConvertSummary,
}

/// Read `input` to the end and build one [`Snapshot`] per header.
///
/// Lines are split on `\n` and decoded lossily, so invalid UTF-8 never fails
/// the parse. Only a failing reader surfaces as [`ReportError::Io`].
///
/// [`ReportError::Io`]: crate::error::ReportError::Io
pub fn parse_report<R: BufRead>(
    mut input: R,
    watch: &WatchList,
    metric: Metric,
    options: &ParseOptions,
) -> Result<ParsedReport> {
    let _parse_span = tracing::debug_span!("report.parse", ?metric).entered();

    let aggregator = Aggregator::new(watch, metric, &options.layout, options.numeric_policy);
    let mut scanner = Scanner::new(watch.len());
    let mut summary = ConvertSummary::default();

    let mut buf = Vec::new();
    let mut line_no = 0;

    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        if buf.last() == Some(&b'\n') {
            buf.pop();
        }
        // Logs are bytes; command names are not guaranteed to be UTF-8.
        let line = String::from_utf8_lossy(&buf);
        line_no += 1;
        summary.lines = line_no;

        if let ScannedLine::Status(snapshot) = scanner.scan(line_no, &line)? {
            match aggregator.aggregate(line_no, &line, snapshot)? {
                Outcome::Added { .. } => summary.matched += 1,
                Outcome::Skipped => summary.skipped += 1,
                Outcome::NotAProcess | Outcome::Unwatched => {}
            }
        }
    }

    let snapshots = scanner.into_snapshots();
    summary.snapshots = snapshots.len();
    tracing::debug!(
        lines = summary.lines,
        snapshots = summary.snapshots,
        matched = summary.matched,
        skipped = summary.skipped,
        "parsed top log"
    );
    Ok(ParsedReport { snapshots, summary })
}

/// Parse all of `input`, then write the CSV to `output`.
///
/// Nothing is written when parsing fails.
pub fn convert<R: BufRead, W: Write>(
    input: R,
    output: &mut W,
    watch: &WatchList,
    metric: Metric,
    options: &ParseOptions,
) -> Result<ConvertSummary> {
    let report = parse_report(input, watch, metric, options)?;
    emitter::write_csv(output, &report.snapshots, watch, metric)?;
    Ok(report.summary)
}

/// Convenience wrapper over [`convert`] for in-memory text.
pub fn convert_str(
    input: &str,
    watch: &WatchList,
    metric: Metric,
    options: &ParseOptions,
) -> Result<String> {
    let mut out = Vec::new();
    convert(input.as_bytes(), &mut out, watch, metric, options)?;
    Ok(String::from_utf8_lossy(&out).into_owned())
}
