//! ANSI escape sequence scanning and style tracking.
//!
//! Every transform in this crate classifies its input one character at a time:
//! an escape sequence starts at [`MARKER`] and runs up to and including the
//! first terminator character (see [`is_terminator`]). Sequences are atomic and
//! occupy zero columns; everything else is a printable rune whose width comes
//! from the East Asian Width tables.
//!
//! [`AnsiWriter`] layers style tracking on top of the [`Scanner`]: it remembers
//! the last SGR sequence it forwarded so a transform can close the active
//! style before injecting content and re-open it afterwards.

use std::fmt;

use unicode_width::UnicodeWidthChar;

/// The escape character that starts every ANSI sequence.
pub const MARKER: char = '\x1b';

/// The canonical SGR reset sequence.
pub const RESET: &str = "\x1b[0m";

/// Returns true if `c` ends an ANSI sequence.
///
/// Terminators are the ASCII letters: `0x40..=0x5A` and `0x61..=0x7A`.
#[inline]
pub fn is_terminator(c: char) -> bool {
    matches!(c, '\u{40}'..='\u{5a}' | '\u{61}'..='\u{7a}')
}

/// Display width of a single printable rune.
///
/// Wide East Asian characters and emoji are 2 columns, combining marks are 0,
/// control characters count as 0.
#[inline]
pub fn rune_width(c: char) -> usize {
    if c.is_control() {
        return 0;
    }
    UnicodeWidthChar::width(c).unwrap_or(0)
}

/// Classification of one input character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Class {
    /// The escape marker opening a sequence.
    EscapeStart,
    /// A character inside an open sequence.
    InSequence,
    /// The character that closed the current sequence.
    Terminator,
    /// A printable rune and its column width.
    Plain(usize),
}

impl Class {
    /// Returns true for any part of an escape sequence.
    pub fn is_ansi(self) -> bool {
        !matches!(self, Class::Plain(_))
    }

    /// Column width contributed by this character.
    pub fn width(self) -> usize {
        match self {
            Class::Plain(w) => w,
            _ => 0,
        }
    }
}

/// Streaming character classifier.
///
/// The only state is whether a sequence is currently open, so a scanner can be
/// fed input split at arbitrary character boundaries. An unterminated sequence
/// stays open forever and swallows the rest of the input as zero-width.
#[derive(Debug, Clone, Copy, Default)]
pub struct Scanner {
    in_sequence: bool,
}

impl Scanner {
    /// Creates a scanner outside of any sequence.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true while an escape sequence is open.
    pub fn in_sequence(&self) -> bool {
        self.in_sequence
    }

    /// Classifies `c` and advances the sequence state.
    pub fn classify(&mut self, c: char) -> Class {
        if self.in_sequence {
            if is_terminator(c) {
                self.in_sequence = false;
                Class::Terminator
            } else {
                Class::InSequence
            }
        } else if c == MARKER {
            self.in_sequence = true;
            Class::EscapeStart
        } else {
            Class::Plain(rune_width(c))
        }
    }
}

/// Visible column width of `s`, ignoring ANSI sequences.
///
/// ```rust
/// use reflow::ansi::printable_width;
///
/// assert_eq!(printable_width("\x1b[1mhello\x1b[0m"), 5);
/// assert_eq!(printable_width("中文"), 4);
/// ```
pub fn printable_width(s: &str) -> usize {
    let mut scanner = Scanner::new();
    s.chars().map(|c| scanner.classify(c).width()).sum()
}

/// Removes all ANSI sequences from `s`.
pub fn strip(s: &str) -> String {
    let mut scanner = Scanner::new();
    s.chars()
        .filter(|&c| !scanner.classify(c).is_ansi())
        .collect()
}

/// A forwarding writer that remembers the active text style.
///
/// Characters are forwarded to the inner sink as they arrive. When a sequence
/// completes it updates the tracked style:
///
/// - exactly [`RESET`] clears the last style and the pending flag;
/// - any other `m`-terminated (SGR) sequence becomes the last style and marks
///   a style change as pending;
/// - other sequences (cursor movement and friends) leave both untouched.
#[derive(Debug, Clone, Default)]
pub struct AnsiWriter<W> {
    forward: W,
    scanner: Scanner,
    sequence: String,
    last_sequence: String,
    style_pending: bool,
}

impl<W: fmt::Write> AnsiWriter<W> {
    /// Creates a style tracker forwarding to `forward`.
    pub fn new(forward: W) -> Self {
        Self {
            forward,
            scanner: Scanner::new(),
            sequence: String::new(),
            last_sequence: String::new(),
            style_pending: false,
        }
    }

    /// Feeds a single character.
    pub fn write_char(&mut self, c: char) -> fmt::Result {
        match self.scanner.classify(c) {
            Class::EscapeStart => {
                self.sequence.clear();
                self.sequence.push(c);
            }
            Class::InSequence => self.sequence.push(c),
            Class::Terminator => {
                self.sequence.push(c);
                if self.sequence == RESET {
                    self.last_sequence.clear();
                    self.style_pending = false;
                } else if c == 'm' {
                    self.last_sequence.clone_from(&self.sequence);
                    self.style_pending = true;
                }
                self.sequence.clear();
            }
            Class::Plain(_) => {}
        }
        fmt::Write::write_char(&mut self.forward, c)
    }

    /// Writes [`RESET`] if a style has been applied since the last reset.
    ///
    /// The pending flag stays set: [`restore_ansi`](Self::restore_ansi)
    /// writes straight to the sink, so the style it reopens is still live.
    pub fn reset_ansi(&mut self) -> fmt::Result {
        if !self.style_pending {
            return Ok(());
        }
        fmt::Write::write_str(&mut self.forward, RESET)
    }

    /// Re-emits the last tracked style, if any.
    pub fn restore_ansi(&mut self) -> fmt::Result {
        if self.last_sequence.is_empty() {
            return Ok(());
        }
        fmt::Write::write_str(&mut self.forward, &self.last_sequence)
    }

    /// The most recent non-reset SGR sequence, or `""`.
    pub fn last_sequence(&self) -> &str {
        &self.last_sequence
    }

    /// Returns true if a style is active that a reset would close.
    pub fn has_pending_style(&self) -> bool {
        self.style_pending
    }

    /// Returns true while an escape sequence is open.
    pub fn in_sequence(&self) -> bool {
        self.scanner.in_sequence()
    }

    /// Shared access to the sink.
    pub fn get_ref(&self) -> &W {
        &self.forward
    }

    /// Mutable access to the sink, bypassing style tracking.
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.forward
    }

    /// Consumes the tracker and returns the sink.
    pub fn into_inner(self) -> W {
        self.forward
    }
}

impl<W: fmt::Write> fmt::Write for AnsiWriter<W> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        s.chars().try_for_each(|c| self.write_char(c))
    }

    fn write_char(&mut self, c: char) -> fmt::Result {
        AnsiWriter::write_char(self, c)
    }
}
