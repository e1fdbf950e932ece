//! Error types for prefix-codec

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("invalid frequency input: {0}")]
    InvalidInput(String),

    #[error("unsupported symbol: {0}")]
    UnsupportedSymbol(String),

    #[error("malformed bit stream at bit {bit_offset}")]
    MalformedStream { bit_offset: usize },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
