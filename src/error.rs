use std::io;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong in this crate.
///
/// All conditions are signaled to the caller at the point of violation;
/// nothing is retried or substituted with a default value.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A vector or matrix was requested with size zero.
    #[error("size must be greater than zero")]
    ZeroSize,

    /// A vector or matrix was requested above the compile-time limit.
    #[error("size {size} exceeds maximum allowed size {max}")]
    SizeTooLarge { size: usize, max: usize },

    /// The underlying buffer reservation failed.
    #[error("failed to allocate storage for {requested} elements")]
    Allocation { requested: usize },

    /// Checked access with an index at or past the end.
    #[error("index {index} out of range for size {size}")]
    IndexOutOfRange { index: usize, size: usize },

    /// Vector arithmetic between operands of different lengths.
    #[error("vector sizes differ: {left} vs {right}")]
    SizeMismatch { left: usize, right: usize },

    /// Matrix arithmetic between operands of incompatible dimensions.
    #[error("matrix dimensions differ: {left} vs {right}")]
    DimensionMismatch { left: usize, right: usize },

    /// A stream token could not be parsed as an element.
    #[error("cannot parse element from {token:?}")]
    Parse { token: String },

    /// The stream ended before enough elements were read.
    #[error("unexpected end of input")]
    UnexpectedEof,

    /// The underlying stream read failed.
    #[error("read failed: {0}")]
    Io(#[from] io::Error),
}
