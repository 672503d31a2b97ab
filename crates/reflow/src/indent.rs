//! Per-line indentation that never inherits the surrounding style.
//!
//! ```rust
//! use reflow::indent;
//!
//! assert_eq!(indent::indent("foo\nbar", 4), "    foo\n    bar");
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::ansi::{AnsiWriter, Scanner};
use crate::error::{Error, Result};
use crate::writer::{Fill, Reflow, fill_n};

/// Indentation configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IndentOptions {
    /// Indentation units per line.
    pub indent: usize,
    /// Writes one unit of indentation. Defaults to a single space.
    #[serde(skip)]
    pub fill: Option<Fill>,
}

impl IndentOptions {
    /// Options indenting by `indent` spaces.
    pub fn new(indent: usize) -> Self {
        Self { indent, fill: None }
    }

    /// Sets the number of units.
    pub fn indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Sets the callback writing each unit.
    pub fn fill(mut self, fill: Fill) -> Self {
        self.fill = Some(fill);
        self
    }
}

/// Streaming indenter.
///
/// Indentation is inserted before the first printable character of every
/// line. An escape sequence at the start of a line does not trigger it, so a
/// style opened there is closed around the indentation and re-applied after.
#[derive(Debug, Clone)]
pub struct Indent {
    options: IndentOptions,
    scanner: Scanner,
    ansi: AnsiWriter<String>,
    line_started: bool,
    closed: bool,
}

impl Indent {
    /// Creates an indenter using spaces.
    pub fn new(indent: usize) -> Self {
        Self::with_options(IndentOptions::new(indent))
    }

    /// Creates an indenter from options.
    pub fn with_options(options: IndentOptions) -> Self {
        Self {
            options,
            scanner: Scanner::new(),
            ansi: AnsiWriter::new(String::new()),
            line_started: false,
            closed: false,
        }
    }

    fn feed(&mut self, s: &str) -> Result<()> {
        for c in s.chars() {
            if !self.scanner.classify(c).is_ansi() {
                if !self.line_started {
                    self.ansi.reset_ansi()?;
                    fill_n(self.options.fill.as_ref(), self.options.indent, &mut self.ansi)?;
                    self.line_started = true;
                    self.ansi.restore_ansi()?;
                }
                if c == '\n' {
                    self.line_started = false;
                }
            }
            self.ansi.write_char(c)?;
        }
        Ok(())
    }
}

impl Reflow for Indent {
    fn write(&mut self, s: &str) -> Result<()> {
        if self.closed {
            debug!(target: "reflow::indent", "write after close rejected");
            return Err(Error::Closed { writer: "indent" });
        }
        self.feed(s)
    }

    fn close(&mut self) -> Result<()> {
        if !self.closed {
            self.closed = true;
            trace!(target: "reflow::indent", bytes = self.ansi.get_ref().len(), "closed");
        }
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

/// Indents every line of `s` by `indent` spaces.
pub fn indent(s: &str, indent: usize) -> String {
    // Space fill into a String cannot fail.
    indent_with(s, IndentOptions::new(indent)).unwrap_or_default()
}

/// Indents every line of `s` with explicit options.
///
/// # Errors
///
/// Returns [`Error::Fill`] if the fill callback fails.
pub fn indent_with(s: &str, options: IndentOptions) -> Result<String> {
    let mut w = Indent::with_options(options);
    w.feed(s)?;
    Ok(w.into_output())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt::{self, Write as _};

    #[test]
    fn test_indent_lines() {
        assert_eq!(indent("foo\nbar", 4), "    foo\n    bar");
        assert_eq!(indent("foo", 0), "foo");
        assert_eq!(indent("", 2), "");
    }

    #[test]
    fn test_empty_lines_are_indented() {
        assert_eq!(indent("a\n\nb", 2), "  a\n  \n  b");
        assert_eq!(indent("a\n", 2), "  a\n");
    }

    #[test]
    fn test_leading_style_wraps_indent() {
        assert_eq!(
            indent("\x1b[31mfoo\nbar\x1b[0m", 2),
            "\x1b[31m\x1b[0m  \x1b[31mfoo\n\x1b[0m  \x1b[31mbar\x1b[0m"
        );
    }

    #[test]
    fn test_unstyled_input_has_no_resets() {
        let out = indent("plain\ntext", 1);
        assert!(!out.contains('\x1b'));
    }

    #[test]
    fn test_custom_fill() {
        let opts = IndentOptions::new(2).fill(Fill::new(|w| w.write_str("> ")));
        assert_eq!(indent_with("a\nb", opts).unwrap(), "> > a\n> > b");
    }

    #[test]
    fn test_fill_error_propagates() {
        let opts = IndentOptions::new(1).fill(Fill::new(|_| Err(fmt::Error)));
        assert!(matches!(indent_with("x", opts), Err(Error::Fill(_))));
    }

    #[test]
    fn test_streaming_across_newline() {
        let mut w = Indent::new(1);
        w.write("a\n").unwrap();
        assert_eq!(w.output(), " a\n");
        w.write("b").unwrap();
        assert_eq!(w.finish().unwrap(), " a\n b");
    }

    #[test]
    fn test_write_after_close_fails() {
        let mut w = Indent::new(1);
        w.close().unwrap();
        assert!(matches!(w.write("x"), Err(Error::Closed { writer: "indent" })));
    }
}
