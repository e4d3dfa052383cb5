use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("record not found")]
    NotFound,

    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("space capacity must be at least 1, got {0}")]
    InvalidCapacity(u32),

    #[error("price must not be negative, got {0}")]
    NegativePrice(f64),

    #[error("month index out of range (0..=11): {0}")]
    InvalidMonth(u32),

    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("store unavailable: {0}")]
    Store(String),
}
