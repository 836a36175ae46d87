use std::fmt::Write as _;
use std::io::Write;

use crate::format::format_fixed;

use super::layout::Metric;
use super::snapshot::Snapshot;
use super::watchlist::WatchList;

pub const TIME_COLUMNS: [&str; 3] = ["Hour", "Minute", "Second"];

pub fn header_row(watch: &WatchList) -> String {
    let mut row = TIME_COLUMNS.join(",");
    for name in watch.names() {
        row.push(',');
        row.push_str(name);
    }
    row
}

pub fn data_row(snapshot: &Snapshot, precision: usize) -> String {
    let mut row = String::new();
    let _ = write!(
        row,
        "{},{},{}",
        snapshot.time.hour, snapshot.time.minute, snapshot.time.second
    );
    for total in &snapshot.totals {
        row.push(',');
        row.push_str(&format_fixed(*total, precision));
    }
    row
}

/// Write the CSV table for `snapshots` and flush `out`.
pub fn write_csv<W: Write>(
    out: &mut W,
    snapshots: &[Snapshot],
    watch: &WatchList,
    metric: Metric,
) -> std::io::Result<()> {
    let _emit_span = tracing::debug_span!("report.emit", rows = snapshots.len()).entered();

    let precision = metric.precision();
    writeln!(out, "{}", header_row(watch))?;
    for snapshot in snapshots {
        writeln!(out, "{}", data_row(snapshot, precision))?;
    }
    out.flush()
}
