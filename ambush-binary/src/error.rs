//! Binary array error types

/// Errors raised while reading from a [`BinaryArray`](crate::BinaryArray)
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BinaryError {
    /// A read asked for more bytes than have been written
    #[error("read of {requested} bytes underflows binary array ({available} bytes available)")]
    Underflow {
        /// Bytes the read needed
        requested: usize,
        /// Bytes between the read and write cursors
        available: usize,
    },
}
