//! Convert plain-text `top` batch logs into per-process CSV time series.

pub mod batch;
pub mod config;
pub mod discover;
pub mod error;
pub mod format;
pub mod presets;
pub mod report;

pub use error::ReportError;
pub use report::{ColumnLayout, ConvertSummary, Metric, NumericPolicy, ParseOptions, WatchList};
