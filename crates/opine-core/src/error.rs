//! Error types for Opine

use thiserror::Error;

pub type Result<T> = std::result::Result<T, OpineError>;

#[derive(Error, Debug)]
pub enum OpineError {
    #[error("Invalid sentiment label: {0}")]
    InvalidSentiment(String),

    #[error("Storage error: {0}")]
    Storage(String),
}
