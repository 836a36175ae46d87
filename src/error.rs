use thiserror::Error;

/// Failures raised while converting a top log.
#[derive(Debug, Error)]
pub enum ReportError {
    /// A non-header line appeared before the first `top - HH:MM:SS` line.
    #[error("malformed top log at line {line}: log must start with a snapshot header")]
    MalformedInput { line: usize },

    /// The metric column of a watched process is not a number.
    #[error("line {line}: cannot parse metric field `{field}` as a number")]
    NumericParse { line: usize, field: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ReportError>;
