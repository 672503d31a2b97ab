#![forbid(unsafe_code)]
// Allow these clippy lints for builder-style API ergonomics
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::struct_field_names)]
#![allow(clippy::use_self)]

//! # Reflow
//!
//! ANSI-aware text reflow for terminal output.
//!
//! Every transform treats escape sequences as atomic and zero-width: they are
//! never split, never counted toward a line's width, and the active style is
//! closed and re-opened around injected content.
//!
//! - **Word wrap**: break at whitespace and breakpoints, never inside a word
//! - **Hard wrap**: break at an exact column
//! - **Truncate**: cut at a width, with an optional tail
//! - **Indent**, **Padding**, **Margin** and **Dedent**
//!
//! ## Quick Start
//!
//! ```rust
//! use reflow::{hardwrap, indent, truncate, wordwrap};
//!
//! assert_eq!(wordwrap::wrap("foo bar foo", 4), "foo\nbar\nfoo");
//! assert_eq!(hardwrap::wrap("HelloWorld", 4), "Hell\noWor\nld");
//! assert_eq!(truncate::truncate_with_tail("Hello World", 8, "..."), "Hello...");
//! assert_eq!(indent::indent("foo\nbar", 4), "    foo\n    bar");
//! ```
//!
//! ## Streaming
//!
//! Each transform is also a [`Reflow`] writer that accepts input in chunks.
//! Word wrap holds back the current word, so it needs a final
//! [`close`](Reflow::close):
//!
//! ```rust
//! use reflow::Reflow;
//! use reflow::wordwrap::WordWrap;
//!
//! let mut w = WordWrap::new(10);
//! w.write("The quick brown ").unwrap();
//! w.write("fox jumps").unwrap();
//! assert_eq!(w.finish().unwrap(), "The quick\nbrown fox\njumps");
//! ```
//!
//! ## Styles
//!
//! ```rust
//! use reflow::truncate;
//!
//! let styled = "\x1b[31mHello World\x1b[0m";
//! assert_eq!(
//!     truncate::truncate_with_tail(styled, 8, "…"),
//!     "\x1b[31mHello W…\x1b[0m",
//! );
//! ```

pub mod ansi;
pub mod dedent;
pub mod error;
pub mod hardwrap;
pub mod indent;
pub mod margin;
pub mod padding;
pub mod truncate;
pub mod wordwrap;
pub mod writer;

// Re-exports
pub use ansi::{AnsiWriter, printable_width, strip};
pub use error::{Error, Result};
pub use writer::{ByteWriter, Fill, Reflow};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::ansi::{AnsiWriter, Scanner, printable_width, strip};
    pub use crate::error::{Error, Result};
    pub use crate::hardwrap::{HardWrap, HardWrapOptions};
    pub use crate::indent::{Indent, IndentOptions};
    pub use crate::margin::{Margin, MarginOptions};
    pub use crate::padding::{Padding, PaddingOptions};
    pub use crate::truncate::{Truncate, TruncateOptions};
    pub use crate::wordwrap::{WordWrap, WordWrapOptions};
    pub use crate::writer::{ByteWriter, Fill, Reflow};
}
