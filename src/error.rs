//! Standard errors that may occur when designing or using a BCH code.

use thiserror::Error;

/// BCH codec runtime errors.
#[derive(Debug, Error)]
pub enum BchError {
    /// The requested code parameters cannot be satisfied.
    #[error("invalid code parameters: {0}")]
    InvalidParams(String),
    /// An encoder or decoder input block has the wrong width.
    #[error("block width {found} exceeds the {expected}-bit block size")]
    BlockLength {
        /// Block width the code operates on.
        expected: usize,
        /// Width of the rejected input.
        found: usize,
    },
    /// A persisted code descriptor failed validation.
    #[error("invalid code descriptor: {0}")]
    BadDescriptor(String),
    /// A character other than '0' or '1' was found in a bit string.
    #[error("invalid bit character {0:?}")]
    BadBit(char),
}

/// Standard result using `BchError`.
pub type Result<T> = std::result::Result<T, BchError>;
