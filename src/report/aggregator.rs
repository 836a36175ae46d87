use serde::Deserialize;

use crate::error::{ReportError, Result};

use super::grammar::parse_scaled_value;
use super::layout::{ColumnLayout, Metric};
use super::snapshot::Snapshot;
use super::watchlist::WatchList;

/// What to do with a watched process whose metric field is not a number.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumericPolicy {
    /// Stop the whole conversion with [`ReportError::NumericParse`].
    #[default]
    Abort,
    /// Drop the line, log a warning and keep going.
    Skip,
}

/// Result of feeding one status line to the aggregator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Outcome {
    /// Value added to the process at this watch-list index.
    Added { column: usize, value: f64 },
    /// Not enough fields to be a process status line.
    NotAProcess,
    /// Process is not in the watch-list.
    Unwatched,
    /// Metric field unparseable and the policy said skip.
    Skipped,
}

/// Extracts one metric per status line and sums it per watched process.
#[derive(Debug)]
pub struct Aggregator<'w> {
    watch: &'w WatchList,
    metric_column: usize,
    name_column: usize,
    min_fields: usize,
    policy: NumericPolicy,
}

impl<'w> Aggregator<'w> {
    pub fn new(
        watch: &'w WatchList,
        metric: Metric,
        layout: &ColumnLayout,
        policy: NumericPolicy,
    ) -> Self {
        Aggregator {
            watch,
            metric_column: layout.metric_column(metric),
            name_column: layout.process_name,
            min_fields: layout.min_fields(metric),
            policy,
        }
    }

    pub fn aggregate(&self, line_no: usize, line: &str, snapshot: &mut Snapshot) -> Result<Outcome> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < self.min_fields {
            return Ok(Outcome::NotAProcess);
        }

        let Some(column) = self.watch.index_of(fields[self.name_column]) else {
            return Ok(Outcome::Unwatched);
        };

        let raw = fields[self.metric_column];
        let Some(value) = parse_scaled_value(raw) else {
            return match self.policy {
                NumericPolicy::Abort => Err(ReportError::NumericParse {
                    line: line_no,
                    field: raw.to_string(),
                }),
                NumericPolicy::Skip => {
                    tracing::warn!(
                        line = line_no,
                        field = raw,
                        process = fields[self.name_column],
                        "skipping status line with non-numeric metric"
                    );
                    Ok(Outcome::Skipped)
                }
            };
        };

        snapshot.add(column, value);
        Ok(Outcome::Added { column, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::snapshot::Timestamp;

    const LINE: &str = " 4242 scada     20   0 2048m 312m  18m S  3.0  2.1  12:01.33 BmfCol";

    fn snapshot(columns: usize) -> Snapshot {
        Snapshot::new(
            Timestamp {
                hour: 0,
                minute: 0,
                second: 0,
            },
            columns,
        )
    }

    fn aggregator<'w>(watch: &'w WatchList, metric: Metric, policy: NumericPolicy) -> Aggregator<'w> {
        Aggregator::new(watch, metric, &ColumnLayout::default(), policy)
    }

    #[test]
    fn virt_column_is_scaled() {
        let watch = WatchList::new(["other", "BmfCol"]);
        let agg = aggregator(&watch, Metric::VirtualMemory, NumericPolicy::Abort);
        let mut snap = snapshot(2);
        let outcome = agg.aggregate(1, LINE, &mut snap).unwrap();
        assert_eq!(
            outcome,
            Outcome::Added {
                column: 1,
                value: 2048.0 * 1024.0
            }
        );
        assert_eq!(snap.totals, vec![0.0, 2_097_152.0]);
    }

    #[test]
    fn cpu_column_is_read() {
        let watch = WatchList::new(["BmfCol"]);
        let agg = aggregator(&watch, Metric::CpuPercent, NumericPolicy::Abort);
        let mut snap = snapshot(1);
        agg.aggregate(1, LINE, &mut snap).unwrap();
        assert_eq!(snap.totals, vec![3.0]);
    }

    #[test]
    fn repeated_rows_are_summed() {
        let watch = WatchList::new(["BmfCol"]);
        let agg = aggregator(&watch, Metric::CpuPercent, NumericPolicy::Abort);
        let mut snap = snapshot(1);
        agg.aggregate(1, LINE, &mut snap).unwrap();
        agg.aggregate(2, LINE, &mut snap).unwrap();
        assert_eq!(snap.totals, vec![6.0]);
    }

    #[test]
    fn short_lines_are_not_processes() {
        let watch = WatchList::new(["BmfCol"]);
        let agg = aggregator(&watch, Metric::VirtualMemory, NumericPolicy::Abort);
        let mut snap = snapshot(1);
        let summary = "Mem:  16318412k total, 15873200k used,   445212k free";
        assert_eq!(agg.aggregate(1, summary, &mut snap).unwrap(), Outcome::NotAProcess);
        assert_eq!(snap.totals, vec![0.0]);
    }

    #[test]
    fn unwatched_names_are_ignored() {
        let watch = WatchList::new(["bmfcol"]);
        let agg = aggregator(&watch, Metric::VirtualMemory, NumericPolicy::Abort);
        let mut snap = snapshot(1);
        assert_eq!(agg.aggregate(1, LINE, &mut snap).unwrap(), Outcome::Unwatched);
    }

    #[test]
    fn column_header_line_aborts_when_name_matches() {
        // The column title row lists COMMAND in the name position.
        let header = "  PID USER      PR  NI  VIRT  RES  SHR S %CPU %MEM    TIME+  COMMAND";
        let watch = WatchList::new(["COMMAND"]);
        let agg = aggregator(&watch, Metric::VirtualMemory, NumericPolicy::Abort);
        let mut snap = snapshot(1);
        let err = agg.aggregate(7, header, &mut snap).unwrap_err();
        match err {
            ReportError::NumericParse { line, field } => {
                assert_eq!(line, 7);
                assert_eq!(field, "VIRT");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn skip_policy_leaves_totals_untouched() {
        let bad = " 4242 scada 20 0 n/a 312m 18m S 3.0 2.1 12:01.33 BmfCol";
        let watch = WatchList::new(["BmfCol"]);
        let agg = aggregator(&watch, Metric::VirtualMemory, NumericPolicy::Skip);
        let mut snap = snapshot(1);
        assert_eq!(agg.aggregate(1, bad, &mut snap).unwrap(), Outcome::Skipped);
        assert_eq!(snap.totals, vec![0.0]);
    }
}
