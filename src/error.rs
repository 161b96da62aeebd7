//! Error types for the command driver

use thiserror::Error;

/// Errors from parsing a command line
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command: {0}")]
    Unknown(String),

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("invalid number: {0}")]
    InvalidNumber(String),

    #[error("unterminated quote")]
    UnterminatedQuote,
}

pub type Result<T> = std::result::Result<T, CommandError>;
