/// Fixed-point rendering with exactly `precision` decimals (`3` at 1 → `3.0`).
pub fn format_fixed(value: f64, precision: usize) -> String {
    format!("{value:.precision$}")
}
