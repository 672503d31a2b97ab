//! Left margin plus right padding, composed from [`Indent`] and [`Padding`].
//!
//! ```rust
//! use reflow::margin;
//!
//! assert_eq!(margin::margin("ab\nc", 5, 2), "  ab \n  c  ");
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::indent::{Indent, IndentOptions};
use crate::padding::{Padding, PaddingOptions};
use crate::writer::{Fill, Reflow};

/// Margin configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MarginOptions {
    /// Total line width, margin included, that lines are padded to.
    pub width: usize,
    /// Left margin in columns.
    pub margin: usize,
    /// Writes one column of margin or padding. Defaults to a single space.
    #[serde(skip)]
    pub fill: Option<Fill>,
}

impl MarginOptions {
    /// Options with the given total width and left margin.
    pub fn new(width: usize, margin: usize) -> Self {
        Self {
            width,
            margin,
            fill: None,
        }
    }

    /// Sets the total width.
    pub fn width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Sets the left margin.
    pub fn margin(mut self, margin: usize) -> Self {
        self.margin = margin;
        self
    }

    /// Sets the callback writing each column.
    pub fn fill(mut self, fill: Fill) -> Self {
        self.fill = Some(fill);
        self
    }
}

/// Streaming margin writer: indents each line, then pads it to the width.
#[derive(Debug, Clone)]
pub struct Margin {
    indent: Indent,
    padding: Padding,
    forwarded: usize,
    closed: bool,
}

impl Margin {
    /// Creates a margin writer using spaces.
    pub fn new(width: usize, margin: usize) -> Self {
        Self::with_options(MarginOptions::new(width, margin))
    }

    /// Creates a margin writer from options.
    pub fn with_options(options: MarginOptions) -> Self {
        let mut indent = IndentOptions::new(options.margin);
        let mut padding = PaddingOptions::new(options.width);
        if let Some(fill) = options.fill {
            indent = indent.fill(fill.clone());
            padding = padding.fill(fill);
        }
        Self {
            indent: Indent::with_options(indent),
            padding: Padding::with_options(padding),
            forwarded: 0,
            closed: false,
        }
    }
}

impl Reflow for Margin {
    fn write(&mut self, s: &str) -> Result<()> {
        if self.closed {
            debug!(target: "reflow::margin", "write after close rejected");
            return Err(Error::Closed { writer: "margin" });
        }
        self.indent.write(s)?;
        let indented = &self.indent.output()[self.forwarded..];
        self.padding.write(indented)?;
        self.forwarded = self.indent.output().len();
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.indent.close()?;
        self.padding.close()?;
        trace!(target: "reflow::margin", bytes = self.padding.output().len(), "closed");
        Ok(())
    }

    fn output(&self) -> &str {
        self.padding.output()
    }

    fn is_closed(&self) -> bool {
        self.closed
    }

    fn into_output(self) -> String {
        self.padding.into_output()
    }
}

/// Adds a left margin of `margin` spaces and pads lines to `width` columns.
pub fn margin(s: &str, width: usize, margin: usize) -> String {
    // Space fill into a String cannot fail.
    margin_with(s, MarginOptions::new(width, margin)).unwrap_or_default()
}

/// Applies a margin with explicit options.
///
/// # Errors
///
/// Returns [`Error::Fill`] if the fill callback fails.
pub fn margin_with(s: &str, options: MarginOptions) -> Result<String> {
    let mut w = Margin::with_options(options);
    w.write(s)?;
    w.finish()
}
