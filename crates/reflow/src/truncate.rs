//! Width-limited truncation with an optional tail.
//!
//! ```rust
//! use reflow::truncate;
//!
//! assert_eq!(truncate::truncate("Hello World", 5), "Hello");
//! assert_eq!(truncate::truncate_with_tail("Hello World", 8, "..."), "Hello...");
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::ansi::{self, AnsiWriter, Class, Scanner};
use crate::error::{Error, Result};
use crate::writer::Reflow;

/// Truncation configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TruncateOptions {
    /// Maximum output width in columns, tail included.
    pub width: usize,
    /// Appended when content is cut.
    pub tail: String,
}

impl TruncateOptions {
    /// Options truncating at `width` columns without a tail.
    pub fn new(width: usize) -> Self {
        Self {
            width,
            tail: String::new(),
        }
    }

    /// Sets the width.
    pub fn width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Sets the tail.
    pub fn tail(mut self, tail: impl Into<String>) -> Self {
        self.tail = tail.into();
        self
    }
}

/// Streaming truncator.
///
/// ANSI sequences are free: they pass through regardless of the remaining
/// budget until the cut. Once the cut happens the tail is written, the active
/// style is reset, and all further input is discarded.
#[derive(Debug, Clone)]
pub struct Truncate {
    tail: String,
    budget: usize,
    used: usize,
    scanner: Scanner,
    ansi: AnsiWriter<String>,
    cut: bool,
    closed: bool,
}

impl Truncate {
    /// Creates a truncator without a tail.
    pub fn new(width: usize) -> Self {
        Self::with_options(TruncateOptions::new(width))
    }

    /// Creates a truncator from options.
    pub fn with_options(options: TruncateOptions) -> Self {
        let tail_width = ansi::printable_width(&options.tail);
        let mut t = Self {
            budget: options.width.saturating_sub(tail_width),
            tail: options.tail,
            used: 0,
            scanner: Scanner::new(),
            ansi: AnsiWriter::new(String::new()),
            cut: false,
            closed: false,
        };
        if options.width < tail_width {
            // Not even the tail fits: the tail replaces all content.
            t.ansi.get_mut().push_str(&t.tail);
            t.cut = true;
        }
        t
    }

    /// Returns true once content has been cut.
    pub fn is_truncated(&self) -> bool {
        self.cut
    }

    fn feed(&mut self, s: &str) -> Result<()> {
        if self.cut {
            return Ok(());
        }
        for c in s.chars() {
            if let Class::Plain(width) = self.scanner.classify(c) {
                self.used += width;
                if self.used > self.budget {
                    return self.cut_here();
                }
            }
            self.ansi.write_char(c)?;
        }
        Ok(())
    }

    fn cut_here(&mut self) -> Result<()> {
        debug!(
            target: "reflow::truncate",
            budget = self.budget,
            styled = self.ansi.has_pending_style(),
            "truncation point reached"
        );
        self.ansi.get_mut().push_str(&self.tail);
        self.cut = true;
        self.ansi.reset_ansi()?;
        Ok(())
    }
}

impl Reflow for Truncate {
    fn write(&mut self, s: &str) -> Result<()> {
        if self.closed {
            debug!(target: "reflow::truncate", "write after close rejected");
            return Err(Error::Closed { writer: "truncate" });
        }
        self.feed(s)
    }

    fn close(&mut self) -> Result<()> {
        if !self.closed {
            self.closed = true;
            trace!(target: "reflow::truncate", truncated = self.cut, "closed");
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

/// Truncates `s` to `width` columns.
pub fn truncate(s: &str, width: usize) -> String {
    truncate_with_tail(s, width, "")
}

/// Truncates `s` to `width` columns, ending with `tail` when content is cut.
pub fn truncate_with_tail(s: &str, width: usize, tail: &str) -> String {
    let mut t = Truncate::with_options(TruncateOptions::new(width).tail(tail));
    // Writes into a String cannot fail.
    match t.feed(s) {
        Ok(()) => t.into_output(),
        Err(_) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_plain() {
        assert_eq!(truncate("Hello World", 5), "Hello");
        assert_eq!(truncate("Hello", 5), "Hello");
        assert_eq!(truncate("Hello", 0), "");
        assert_eq!(truncate("", 3), "");
    }

    #[test]
    fn test_truncate_with_tail() {
        assert_eq!(truncate_with_tail("Hello World", 8, "..."), "Hello...");
        // No cut, no tail.
        assert_eq!(truncate_with_tail("Hello", 8, "..."), "Hello");
    }

    #[test]
    fn test_tail_wider_than_width() {
        assert_eq!(truncate_with_tail("Hello World", 2, "..."), "...");
        assert_eq!(truncate_with_tail("", 2, "..."), "...");
    }

    #[test]
    fn test_styled_truncation_resets() {
        assert_eq!(
            truncate_with_tail("\x1b[31mHello World\x1b[0m", 8, "…"),
            "\x1b[31mHello W…\x1b[0m"
        );
    }

    #[test]
    fn test_no_reset_after_style_closed() {
        assert_eq!(
            truncate_with_tail("\x1b[31mHi\x1b[0m there", 5, "."),
            "\x1b[31mHi\x1b[0m t."
        );
    }

    #[test]
    fn test_cursor_sequence_does_not_trigger_reset() {
        assert_eq!(truncate("\x1b[2KHello", 2), "\x1b[2KHe");
    }

    #[test]
    fn test_ansi_is_free_until_cut() {
        assert_eq!(
            truncate("ab\x1b[1m\x1b[0mcd", 2),
            "ab\x1b[1m\x1b[0m"
        );
    }

    #[test]
    fn test_wide_character_not_half_emitted() {
        assert_eq!(truncate("日本語", 3), "日");
        assert_eq!(truncate_with_tail("日本語", 5, "…"), "日本…");
    }

    #[test]
    fn test_streaming_budget_spans_writes() {
        let mut t = Truncate::with_options(TruncateOptions::new(6).tail("~"));
        t.write("abc").unwrap();
        assert!(!t.is_truncated());
        t.write("defgh").unwrap();
        assert!(t.is_truncated());
        t.write("ignored").unwrap();
        assert_eq!(t.finish().unwrap(), "abcde~");
    }

    #[test]
    fn test_write_reports_ok_across_cut() {
        let mut t = Truncate::with_options(TruncateOptions::new(3).tail("…"));
        assert!(t.write("\x1b[1mabcdef").is_ok());
        assert!(t.write("more").is_ok());
        assert_eq!(t.output(), "\x1b[1mab…\x1b[0m");
    }

    #[test]
    fn test_write_after_close_fails() {
        let mut t = Truncate::new(3);
        t.close().unwrap();
        assert!(matches!(
            t.write("x"),
            Err(Error::Closed { writer: "truncate" })
        ));
    }
}
