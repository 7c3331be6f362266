use thiserror::Error;

#[derive(Error, Debug)]
pub enum GrilleError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid seed value at row {row}, column {col}. Every cell must be a number from 1 to 4")]
    InvalidSeedValue { row: usize, col: usize },

    #[error("Incomplete seed: values {missing:?} are missing. Each of 1, 2, 3 and 4 must appear at least once")]
    IncompleteSeed { missing: Vec<u8> },

    #[error("Invalid seed format: {0}")]
    SeedFormat(String),

    #[error("Text too long: {len} letters, maximum is {max}")]
    CapacityExceeded { len: usize, max: usize },

    #[error("Input is empty after normalization")]
    EmptyInput,

    #[error("No stencil generated yet")]
    StencilNotGenerated,

    #[error("Session has not been started")]
    SessionNotStarted,

    #[error("Session is already complete")]
    SessionComplete,

    #[error("Unsupported option: {0}")]
    UnsupportedOption(String),
}

pub type Result<T> = std::result::Result<T, GrilleError>;
