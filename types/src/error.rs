//! Errors raised while constructing or parsing fundamental types.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypesError {
    #[error("address must start with 0x: {0}")]
    MissingPrefix(String),

    #[error("address must be {expected} hex characters, got {got}")]
    InvalidLength { expected: usize, got: usize },

    #[error("invalid hex in address: {0}")]
    InvalidHex(String),
}
