//! Error types.

use std::fmt;

use thiserror::Error;

/// Errors raised by the streaming writers.
///
/// Degenerate input (zero limits, empty strings, a tail wider than the
/// truncation width, unterminated escape sequences) is never an error; every
/// such case has a defined output.
///
/// # Example
///
/// ```rust
/// use reflow::{Error, Reflow};
/// use reflow::wordwrap::WordWrap;
///
/// let mut w = WordWrap::new(10);
/// w.write("hello").unwrap();
/// w.close().unwrap();
/// assert!(matches!(w.write("again"), Err(Error::Closed { .. })));
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// A write arrived after the writer was closed.
    #[error("{writer} writer is closed")]
    Closed {
        /// Name of the writer that rejected the write.
        writer: &'static str,
    },

    /// An indent or padding callback failed.
    #[error("fill callback failed: {0}")]
    Fill(#[from] fmt::Error),

    /// Bytes handed to a [`ByteWriter`](crate::ByteWriter) are not UTF-8.
    #[error("invalid utf-8 after {valid_up_to} valid bytes")]
    InvalidUtf8 {
        /// Number of bytes of the failing call that decoded cleanly.
        valid_up_to: usize,
    },
}

/// A specialized [`Result`] type for reflow operations.
pub type Result<T> = std::result::Result<T, Error>;
