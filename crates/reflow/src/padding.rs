//! Right padding of every line to a minimum width.
//!
//! ```rust
//! use reflow::padding;
//!
//! assert_eq!(padding::pad("ab\nc", 3), "ab \nc  ");
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::ansi::{AnsiWriter, Scanner};
use crate::error::{Error, Result};
use crate::writer::{Fill, Reflow, fill_n};

/// Padding configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PaddingOptions {
    /// Minimum line width in columns. Zero disables padding.
    pub width: usize,
    /// Writes one column of padding. Defaults to a single space.
    #[serde(skip)]
    pub fill: Option<Fill>,
}

impl PaddingOptions {
    /// Options padding lines to `width` columns with spaces.
    pub fn new(width: usize) -> Self {
        Self { width, fill: None }
    }

    /// Sets the width.
    pub fn width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Sets the callback writing each column of padding.
    pub fn fill(mut self, fill: Fill) -> Self {
        self.fill = Some(fill);
        self
    }
}

/// Streaming right-padder.
///
/// Padding for a line is written when its newline arrives, inside whatever
/// style is active, after which the style is reset. The final line is only
/// padded on [`close`](Reflow::close).
#[derive(Debug, Clone)]
pub struct Padding {
    options: PaddingOptions,
    scanner: Scanner,
    ansi: AnsiWriter<String>,
    line_width: usize,
    closed: bool,
}

impl Padding {
    /// Creates a padder using spaces.
    pub fn new(width: usize) -> Self {
        Self::with_options(PaddingOptions::new(width))
    }

    /// Creates a padder from options.
    pub fn with_options(options: PaddingOptions) -> Self {
        Self {
            options,
            scanner: Scanner::new(),
            ansi: AnsiWriter::new(String::new()),
            line_width: 0,
            closed: false,
        }
    }

    fn feed(&mut self, s: &str) -> Result<()> {
        for c in s.chars() {
            let class = self.scanner.classify(c);
            if !class.is_ansi() {
                self.line_width += class.width();
                if c == '\n' {
                    self.pad()?;
                    self.ansi.reset_ansi()?;
                    self.line_width = 0;
                }
            }
            self.ansi.write_char(c)?;
        }
        Ok(())
    }

    fn pad(&mut self) -> Result<()> {
        let missing = self.options.width.saturating_sub(self.line_width);
        fill_n(self.options.fill.as_ref(), missing, &mut self.ansi)?;
        Ok(())
    }

    fn flush_tail(&mut self) -> Result<()> {
        if self.line_width > 0 {
            self.pad()?;
            self.line_width = 0;
        }
        Ok(())
    }
}

impl Reflow for Padding {
    fn write(&mut self, s: &str) -> Result<()> {
        if self.closed {
            debug!(target: "reflow::padding", "write after close rejected");
            return Err(Error::Closed { writer: "padding" });
        }
        self.feed(s)
    }

    fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.flush_tail()?;
        trace!(target: "reflow::padding", bytes = self.ansi.get_ref().len(), "closed");
        Ok(())
    }

    fn output(&self) -> &str {
        self.ansi.get_ref()
    }

    fn is_closed(&self) -> bool {
        self.closed
    }

    fn into_output(self) -> String {
        self.ansi.into_inner()
    }
}

/// Pads every line of `s` to at least `width` columns with spaces.
pub fn pad(s: &str, width: usize) -> String {
    // Space fill into a String cannot fail.
    pad_with(s, PaddingOptions::new(width)).unwrap_or_default()
}

/// Pads every line of `s` with explicit options.
///
/// # Errors
///
/// Returns [`Error::Fill`] if the fill callback fails.
pub fn pad_with(s: &str, options: PaddingOptions) -> Result<String> {
    let mut w = Padding::with_options(options);
    w.feed(s)?;
    w.flush_tail()?;
    Ok(w.into_output())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt::Write as _;

    #[test]
    fn test_pad_lines() {
        assert_eq!(pad("foo", 6), "foo   ");
        assert_eq!(pad("ab\nc", 3), "ab \nc  ");
        assert_eq!(pad("toolong", 3), "toolong");
        assert_eq!(pad("abc", 0), "abc");
    }

    #[test]
    fn test_empty_last_line_not_padded() {
        assert_eq!(pad("a\n", 2), "a \n");
        assert_eq!(pad("", 4), "");
    }

    #[test]
    fn test_ansi_does_not_count() {
        assert_eq!(
            pad("\x1b[31mab\x1b[0m", 4),
            "\x1b[31mab\x1b[0m  "
        );
    }

    #[test]
    fn test_style_reset_at_newline() {
        assert_eq!(
            pad("\x1b[31mab\ncd", 3),
            "\x1b[31mab \x1b[0m\ncd "
        );
    }

    #[test]
    fn test_wide_characters() {
        assert_eq!(pad("日", 4), "日  ");
    }

    #[test]
    fn test_custom_fill() {
        let opts = PaddingOptions::new(4).fill(Fill::new(|w| w.write_char('.')));
        assert_eq!(pad_with("ab\nabc", opts).unwrap(), "ab..\nabc.");
    }

    #[test]
    fn test_streaming_pads_on_close() {
        let mut w = Padding::new(3);
        w.write("a").unwrap();
        assert_eq!(w.output(), "a");
        w.close().unwrap();
        assert_eq!(w.output(), "a  ");
        assert!(matches!(w.write("b"), Err(Error::Closed { writer: "padding" })));
    }
}
