//! Word wrapping at whitespace and breakpoint characters.
//!
//! Words are never split: a word wider than the limit is emitted whole on a
//! line of its own and overflows it. Use [`hardwrap`](crate::hardwrap) when
//! every line must fit.
//!
//! ```rust
//! use reflow::wordwrap;
//!
//! assert_eq!(wordwrap::wrap("foo bar foo", 4), "foo\nbar\nfoo");
//! assert_eq!(wordwrap::wrap("well-known", 6), "well-\nknown");
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::ansi::Scanner;
use crate::error::{Error, Result};
use crate::writer::Reflow;

/// Characters that end a word by default. Whitespace always ends a word.
pub const DEFAULT_BREAKPOINTS: &[char] = &[' ', '-'];

/// Characters recognised as line endings by default.
pub const DEFAULT_NEWLINE: &[char] = &['\n'];

/// Word wrap configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WordWrapOptions {
    /// Maximum line width in columns. Zero disables wrapping.
    pub limit: usize,
    /// Characters after which a line may break.
    pub breakpoints: Vec<char>,
    /// Characters treated as line endings.
    pub newline: Vec<char>,
    /// Keep line endings from the input. When false they are folded into
    /// spaces and the text is reflowed as a single paragraph.
    pub keep_newlines: bool,
}

impl Default for WordWrapOptions {
    fn default() -> Self {
        Self {
            limit: 0,
            breakpoints: DEFAULT_BREAKPOINTS.to_vec(),
            newline: DEFAULT_NEWLINE.to_vec(),
            keep_newlines: true,
        }
    }
}

impl WordWrapOptions {
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

    /// Sets the breakpoint characters.
    pub fn breakpoints(mut self, breakpoints: impl IntoIterator<Item = char>) -> Self {
        self.breakpoints = breakpoints.into_iter().collect();
        self
    }

    /// Sets the line ending characters.
    pub fn newline(mut self, newline: impl IntoIterator<Item = char>) -> Self {
        self.newline = newline.into_iter().collect();
        self
    }

    /// Sets whether input line endings are kept.
    pub fn keep_newlines(mut self, keep: bool) -> Self {
        self.keep_newlines = keep;
        self
    }
}

/// Raw text plus the columns it occupies.
#[derive(Debug, Clone, Default)]
struct Run {
    text: String,
    width: usize,
}

impl Run {
    fn push(&mut self, c: char, width: usize) {
        self.text.push(c);
        self.width += width;
    }

    fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    fn clear(&mut self) {
        self.text.clear();
        self.width = 0;
    }
}

/// Streaming word wrapper.
///
/// The current word and the whitespace before it are held back until the
/// next breakpoint, so [`close`](Reflow::close) must be called before the
/// output is complete.
#[derive(Debug, Clone)]
pub struct WordWrap {
    options: WordWrapOptions,
    scanner: Scanner,
    out: String,
    word: Run,
    space: Run,
    line_width: usize,
    seen_text: bool,
    // The space run already stands for a folded line ending.
    folded: bool,
    closed: bool,
}

impl WordWrap {
    /// Creates a word wrapper with default options and the given limit.
    pub fn new(limit: usize) -> Self {
        Self::with_options(WordWrapOptions::new(limit))
    }

    /// Creates a word wrapper from options.
    pub fn with_options(options: WordWrapOptions) -> Self {
        Self {
            options,
            scanner: Scanner::new(),
            out: String::new(),
            word: Run::default(),
            space: Run::default(),
            line_width: 0,
            seen_text: false,
            folded: false,
            closed: false,
        }
    }

    /// The active options.
    pub fn options(&self) -> &WordWrapOptions {
        &self.options
    }

    fn push_char(&mut self, c: char) {
        let class = self.scanner.classify(c);
        if class.is_ansi() {
            self.word.push(c, 0);
            return;
        }
        let width = class.width();

        if self.options.newline.contains(&c) {
            if self.options.keep_newlines {
                self.break_line();
            } else {
                self.fold_newline();
            }
        } else if c.is_whitespace() {
            self.flush_word();
            if self.options.keep_newlines || (self.seen_text && !self.folded) {
                self.space.push(c, 1);
            }
        } else if self.options.breakpoints.contains(&c) {
            self.drop_overflowing_space();
            self.flush_word();
            self.flush_space();
            self.out.push(c);
            self.line_width += width;
            self.seen_text = true;
        } else {
            self.word.push(c, width);
            self.seen_text = true;
            // Space before the first word of a line is dropped, so only a
            // non-empty line can overflow.
            let pending = self.line_width + self.space.width + self.word.width;
            if self.line_width > 0 && pending > self.options.limit {
                self.wrap();
            }
        }
    }

    /// Discards the pending space run if it would not fit on the line.
    fn drop_overflowing_space(&mut self) {
        if self.line_width + self.space.width > self.options.limit {
            self.clear_space();
        }
    }

    fn clear_space(&mut self) {
        self.space.clear();
        self.folded = false;
    }

    /// Moves the pending space run onto the line.
    fn flush_space(&mut self) {
        self.line_width += self.space.width;
        self.out.push_str(&self.space.text);
        self.clear_space();
    }

    /// Moves the pending word, preceded by its space run, onto the line.
    fn flush_word(&mut self) {
        if self.word.is_empty() {
            return;
        }
        if self.line_width == 0 {
            self.clear_space();
        }
        self.flush_space();
        self.line_width += self.word.width;
        self.out.push_str(&self.word.text);
        self.word.clear();
    }

    /// Starts a new line because the pending word does not fit.
    fn wrap(&mut self) {
        self.out.push('\n');
        self.line_width = 0;
        self.clear_space();
    }

    /// Handles a line ending from the input when newlines are kept.
    fn break_line(&mut self) {
        self.drop_overflowing_space();
        self.flush_word();
        self.flush_space();
        self.out.push('\n');
        self.line_width = 0;
    }

    fn feed(&mut self, s: &str) {
        if self.options.limit == 0 {
            self.out.push_str(s);
        } else {
            s.chars().for_each(|c| self.push_char(c));
        }
    }

    /// Emits whatever is still buffered at end of input.
    fn flush_tail(&mut self) {
        if self.options.limit == 0 {
            return;
        }
        self.drop_overflowing_space();
        self.flush_word();
        self.flush_space();
        if !self.options.keep_newlines {
            let trimmed = self.out.trim_end_matches([' ', '\t']).len();
            self.out.truncate(trimmed);
        }
    }

    /// Folds a line ending into the space run when newlines are dropped.
    ///
    /// Whitespace around the line ending collapses to a single space.
    fn fold_newline(&mut self) {
        self.flush_word();
        if self.seen_text {
            self.space.clear();
            self.space.push(' ', 1);
            self.folded = true;
        }
    }
}

impl Reflow for WordWrap {
    fn write(&mut self, s: &str) -> Result<()> {
        if self.closed {
            debug!(target: "reflow::wordwrap", "write after close rejected");
            return Err(Error::Closed { writer: "wordwrap" });
        }
        self.feed(s);
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.flush_tail();
        trace!(target: "reflow::wordwrap", bytes = self.out.len(), "closed");
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

/// Word-wraps `s` at `limit` columns.
pub fn wrap(s: &str, limit: usize) -> String {
    wrap_with(s, WordWrapOptions::new(limit))
}

/// Word-wraps `s` with explicit options.
pub fn wrap_with(s: &str, options: WordWrapOptions) -> String {
    let mut w = WordWrap::with_options(options);
    w.feed(s);
    w.flush_tail();
    w.out
}
