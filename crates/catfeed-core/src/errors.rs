use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("required column '{column}' missing from header")]
    MissingColumn { column: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FeedError>;
