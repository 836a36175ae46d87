use crate::error::{ReportError, Result};

use super::grammar::parse_header;
use super::snapshot::Snapshot;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ScanState {
    NoSnapshotYet,
    InSnapshot(usize),
}

/// How the scanner classified one input line.
#[derive(Debug)]
pub enum ScannedLine<'a> {
    /// Opened a new snapshot.
    Header,
    /// Belongs to the current snapshot.
    Status(&'a mut Snapshot),
    /// Empty or whitespace only.
    Blank,
}

/// Splits a line stream into snapshots and owns the current-snapshot cursor.
#[derive(Debug)]
pub struct Scanner {
    state: ScanState,
    snapshots: Vec<Snapshot>,
    columns: usize,
}

impl Scanner {
    /// `columns` is the number of totals each new snapshot carries.
    pub fn new(columns: usize) -> Self {
        Scanner {
            state: ScanState::NoSnapshotYet,
            snapshots: Vec::new(),
            columns,
        }
    }

    /// Classify `line` (1-based `line_no`, used in errors).
    pub fn scan(&mut self, line_no: usize, line: &str) -> Result<ScannedLine<'_>> {
        let line = line.strip_suffix('\r').unwrap_or(line);

        if let Some(time) = parse_header(line) {
            self.snapshots.push(Snapshot::new(time, self.columns));
            self.state = ScanState::InSnapshot(self.snapshots.len() - 1);
            return Ok(ScannedLine::Header);
        }

        if line.trim().is_empty() {
            return Ok(ScannedLine::Blank);
        }

        match self.state {
            ScanState::NoSnapshotYet => Err(ReportError::MalformedInput { line: line_no }),
            ScanState::InSnapshot(current) => Ok(ScannedLine::Status(&mut self.snapshots[current])),
        }
    }

    #[cfg(test)]
    fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    pub fn into_snapshots(self) -> Vec<Snapshot> {
        self.snapshots
    }
}
