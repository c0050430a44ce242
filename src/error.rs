use thiserror::Error;

/// Errors raised by the decomposition and forecasting engine.
#[derive(Error, Debug)]
pub enum Error {
    /// The input series is rejected before any estimation runs.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A quarter group received no contributing ratios, so the seasonal
    /// method cannot produce an index for it.
    #[error("insufficient data: {0}")]
    InsufficientData(String),

    /// A regression denominator is zero (sample too small or constant t).
    #[error("degenerate regression: {0}")]
    DegenerateRegression(String),

    #[error("I/O error")]
    Io(#[from] std::io::Error),

    #[error("CSV error")]
    Csv(#[from] csv::Error),

    #[error("JSON error")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for operations in this crate.
pub type Result<T> = std::result::Result<T, Error>;
