//! The streaming writer contract shared by every transform.

use std::fmt;
use std::io;
use std::sync::Arc;

use crate::error::{Error, Result};

/// A stateful, append-only text transform.
///
/// Writers accept input in any number of chunks and accumulate their result in
/// memory. Some transforms buffer content (word wrap holds back the current
/// word) and only produce a complete result after [`close`](Reflow::close).
/// Once closed, further writes fail with [`Error::Closed`].
pub trait Reflow {
    /// Feeds a chunk of input.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Closed`] after [`close`](Reflow::close) and
    /// [`Error::Fill`] if a user callback fails.
    fn write(&mut self, s: &str) -> Result<()>;

    /// Flushes buffered content and rejects further writes.
    ///
    /// Closing twice is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Fill`] if a user callback fails while flushing.
    fn close(&mut self) -> Result<()>;

    /// The output accumulated so far.
    fn output(&self) -> &str;

    /// Returns true once [`close`](Reflow::close) has been called.
    fn is_closed(&self) -> bool;

    /// Consumes the writer and returns its output without closing it.
    fn into_output(self) -> String
    where
        Self: Sized;

    /// The accumulated output as raw bytes.
    fn as_bytes(&self) -> &[u8] {
        self.output().as_bytes()
    }

    /// Closes the writer and returns its output.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`close`](Reflow::close).
    fn finish(mut self) -> Result<String>
    where
        Self: Sized,
    {
        self.close()?;
        Ok(self.into_output())
    }
}

/// A callback that writes one unit of indentation or padding.
///
/// The callback receives the style-tracking sink, so anything it writes is
/// subject to the same ANSI bookkeeping as regular content.
///
/// ```rust
/// use std::fmt::Write as _;
/// use reflow::Fill;
/// use reflow::indent::{Indent, IndentOptions};
/// use reflow::Reflow;
///
/// let dots = Fill::new(|w| w.write_char('.'));
/// let mut ind = Indent::with_options(IndentOptions::new(3).fill(dots));
/// ind.write("x").unwrap();
/// assert_eq!(ind.output(), "...x");
/// ```
#[derive(Clone)]
pub struct Fill(Arc<dyn Fn(&mut dyn fmt::Write) -> fmt::Result + Send + Sync>);

impl Fill {
    /// Wraps a closure as a fill callback.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&mut dyn fmt::Write) -> fmt::Result + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Invokes the callback once.
    pub fn call(&self, w: &mut dyn fmt::Write) -> fmt::Result {
        (self.0)(w)
    }
}

impl fmt::Debug for Fill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Fill(..)")
    }
}

/// Writes `n` units of fill: `n` callback invocations, or `n` spaces.
pub(crate) fn fill_n(fill: Option<&Fill>, n: usize, w: &mut dyn fmt::Write) -> fmt::Result {
    match fill {
        Some(fill) => (0..n).try_for_each(|_| fill.call(w)),
        None => (0..n).try_for_each(|_| w.write_char(' ')),
    }
}

/// Adapts any [`Reflow`] writer to [`std::io::Write`].
///
/// Byte input may split a multi-byte character across calls; the incomplete
/// tail is carried over to the next write. Bytes that can never form UTF-8 are
/// rejected with [`io::ErrorKind::InvalidData`] and nothing from that call is
/// forwarded.
///
/// ```rust
/// use std::io::Write;
/// use reflow::ByteWriter;
/// use reflow::hardwrap::HardWrap;
///
/// let mut w = ByteWriter::new(HardWrap::new(2));
/// w.write_all("héllo".as_bytes()).unwrap();
/// assert_eq!(w.into_string().unwrap(), "hé\nll\no");
/// ```
#[derive(Debug)]
pub struct ByteWriter<R> {
    inner: R,
    carry: Vec<u8>,
}

impl<R: Reflow> ByteWriter<R> {
    /// Wraps a writer.
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            carry: Vec::new(),
        }
    }

    /// Shared access to the wrapped writer.
    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    /// Mutable access to the wrapped writer.
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.inner
    }

    /// Closes the wrapped writer and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUtf8`] if the input ended inside a multi-byte
    /// character, or any error from closing the wrapped writer.
    pub fn into_inner(mut self) -> Result<R> {
        if !self.carry.is_empty() {
            return Err(Error::InvalidUtf8 { valid_up_to: 0 });
        }
        self.inner.close()?;
        Ok(self.inner)
    }

    /// Closes the wrapped writer and returns its output.
    ///
    /// # Errors
    ///
    /// See [`into_inner`](ByteWriter::into_inner).
    pub fn into_string(self) -> Result<String> {
        self.into_inner().map(Reflow::into_output)
    }
}

impl<R: Reflow> io::Write for ByteWriter<R> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let carried = self.carry.len();
        self.carry.extend_from_slice(buf);

        let valid = match std::str::from_utf8(&self.carry) {
            Ok(_) => self.carry.len(),
            // Incomplete trailing character: keep it for the next call.
            Err(e) if e.error_len().is_none() => e.valid_up_to(),
            Err(e) => {
                self.carry.truncate(carried);
                return Err(Error::InvalidUtf8 {
                    valid_up_to: e.valid_up_to().saturating_sub(carried),
                }
                .into());
            }
        };

        let rest = self.carry.split_off(valid);
        let chunk = std::mem::replace(&mut self.carry, rest);
        let text = String::from_utf8(chunk).map_err(|e| Error::InvalidUtf8 {
            valid_up_to: e.utf8_error().valid_up_to(),
        })?;
        self.inner.write(&text)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl From<Error> for io::Error {
    fn from(err: Error) -> Self {
        let kind = match err {
            Error::InvalidUtf8 { .. } => io::ErrorKind::InvalidData,
            Error::Closed { .. } | Error::Fill(_) => io::ErrorKind::Other,
        };
        io::Error::new(kind, err)
    }
}
