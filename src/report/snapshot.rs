/// Wall-clock time printed in a snapshot header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timestamp {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

/// One monitor reading: its time and one running total per watched process.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    pub time: Timestamp,
    pub totals: Vec<f64>,
}

impl Snapshot {
    pub fn new(time: Timestamp, columns: usize) -> Self {
        Snapshot {
            time,
            totals: vec![0.0; columns],
        }
    }

    /// Add a value into the total at `column`. Repeated rows for the same
    /// process accumulate.
    pub fn add(&mut self, column: usize, value: f64) {
        if let Some(total) = self.totals.get_mut(column) {
            *total += value;
        }
    }
}
