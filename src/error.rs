use thiserror::Error;

/// Errors raised at the ingestion boundary.
///
/// Scoring, indicator and pattern code never return these: insufficient
/// data there is reported through sentinel values instead.
#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("Unknown timeframe: {0}")]
    UnknownTimeframe(String),

    #[error("Missing column: {0}")]
    MissingColumn(String),

    #[error("Column {column} has {actual} rows, expected {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },

    #[error("Duplicate timestamp {time} at row {index}")]
    DuplicateTimestamp { index: usize, time: i64 },

    #[error("Timestamps out of order at row {index}: {time} follows {previous}")]
    UnorderedTimestamps { index: usize, previous: i64, time: i64 },
}

pub type Result<T> = std::result::Result<T, AnalyzerError>;
