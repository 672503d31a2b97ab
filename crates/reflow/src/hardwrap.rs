//! Hard wrapping at a fixed column, ignoring word boundaries.
//!
//! ```rust
//! use reflow::hardwrap;
//!
//! assert_eq!(hardwrap::wrap("HelloWorld", 4), "Hell\noWor\nld");
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::ansi::{Class, Scanner};
use crate::error::{Error, Result};
use crate::writer::Reflow;

/// Characters recognised as line endings by default.
pub const DEFAULT_NEWLINE: &[char] = &['\n'];

/// Line ending written for every break by default.
pub const DEFAULT_LINE_ENDING: &str = "\n";

/// Number of spaces a tab expands to by default.
pub const DEFAULT_TAB_WIDTH: usize = 4;

/// Hard wrap configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HardWrapOptions {
    /// Maximum line width in columns. Zero disables wrapping.
    pub limit: usize,
    /// Characters treated as line endings in the input.
    pub newline: Vec<char>,
    /// String written for every line break, kept or forced.
    pub line_ending: String,
    /// Keep line endings from the input. When false they are dropped.
    pub keep_newlines: bool,
    /// Keep whitespace that lands at the start of a line after a forced break.
    pub preserve_space: bool,
    /// Spaces a tab expands to. Zero removes tabs.
    pub tab_width: usize,
}

impl Default for HardWrapOptions {
    fn default() -> Self {
        Self {
            limit: 0,
            newline: DEFAULT_NEWLINE.to_vec(),
            line_ending: DEFAULT_LINE_ENDING.to_string(),
            keep_newlines: true,
            preserve_space: false,
            tab_width: DEFAULT_TAB_WIDTH,
        }
    }
}

impl HardWrapOptions {
    /// Options wrapping at `limit` columns with default settings.
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }

    /// Sets the line width limit.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Sets the line ending characters recognised in the input.
    pub fn newline(mut self, newline: impl IntoIterator<Item = char>) -> Self {
        self.newline = newline.into_iter().collect();
        self
    }

    /// Sets the string written for each line break.
    pub fn line_ending(mut self, line_ending: impl Into<String>) -> Self {
        self.line_ending = line_ending.into();
        self
    }

    /// Sets whether input line endings are kept.
    pub fn keep_newlines(mut self, keep: bool) -> Self {
        self.keep_newlines = keep;
        self
    }

    /// Sets whether whitespace after a forced break is kept.
    pub fn preserve_space(mut self, preserve: bool) -> Self {
        self.preserve_space = preserve;
        self
    }

    /// Sets the tab expansion width.
    pub fn tab_width(mut self, width: usize) -> Self {
        self.tab_width = width;
        self
    }
}

/// Streaming hard wrapper.
///
/// Output is complete after every write; [`close`](Reflow::close) only stops
/// further input.
#[derive(Debug, Clone)]
pub struct HardWrap {
    options: HardWrapOptions,
    scanner: Scanner,
    out: String,
    line_width: usize,
    forced_break: bool,
    closed: bool,
}

impl HardWrap {
    /// Creates a hard wrapper with default options and the given limit.
    pub fn new(limit: usize) -> Self {
        Self::with_options(HardWrapOptions::new(limit))
    }

    /// Creates a hard wrapper from options.
    pub fn with_options(options: HardWrapOptions) -> Self {
        Self {
            options,
            scanner: Scanner::new(),
            out: String::new(),
            line_width: 0,
            forced_break: false,
            closed: false,
        }
    }

    /// The active options.
    pub fn options(&self) -> &HardWrapOptions {
        &self.options
    }

    fn feed(&mut self, s: &str) {
        for c in s.chars() {
            match self.scanner.classify(c) {
                Class::Plain(width) => self.push_plain(c, width),
                _ => self.out.push(c),
            }
        }
    }

    fn push_plain(&mut self, c: char, width: usize) {
        if self.options.newline.contains(&c) {
            if self.options.keep_newlines {
                self.out.push_str(&self.options.line_ending);
                self.line_width = 0;
                self.forced_break = false;
            }
        } else if c == '\t' {
            for _ in 0..self.options.tab_width {
                self.push_cell(' ', 1);
            }
        } else {
            self.push_cell(c, width);
        }
    }

    /// Places one printable character, breaking first if it would overflow.
    fn push_cell(&mut self, c: char, width: usize) {
        let limit = self.options.limit;
        // A character wider than the whole line still gets a line of its own,
        // never an empty one before it.
        if limit > 0 && self.line_width > 0 && self.line_width + width > limit {
            self.out.push_str(&self.options.line_ending);
            self.line_width = 0;
            self.forced_break = true;
        }
        if self.forced_break && !self.options.preserve_space && c.is_whitespace() {
            return;
        }
        self.forced_break = false;
        self.out.push(c);
        self.line_width += width;
    }
}

impl Reflow for HardWrap {
    fn write(&mut self, s: &str) -> Result<()> {
        if self.closed {
            debug!(target: "reflow::hardwrap", "write after close rejected");
            return Err(Error::Closed { writer: "hardwrap" });
        }
        self.feed(s);
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        if !self.closed {
            self.closed = true;
            trace!(target: "reflow::hardwrap", bytes = self.out.len(), "closed");
        }
        Ok(())
    }

    fn output(&self) -> &str {
        &self.out
    }

    fn is_closed(&self) -> bool {
        self.closed
    }

    fn into_output(self) -> String {
        self.out
    }
}

/// Hard-wraps `s` at `limit` columns.
pub fn wrap(s: &str, limit: usize) -> String {
    wrap_with(s, HardWrapOptions::new(limit))
}

/// Hard-wraps `s` with explicit options.
pub fn wrap_with(s: &str, options: HardWrapOptions) -> String {
    let mut w = HardWrap::with_options(options);
    w.feed(s);
    w.out
}
