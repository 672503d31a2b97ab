//! Removal of common leading whitespace.
//!
//! ```rust
//! use reflow::dedent::dedent;
//!
//! assert_eq!(dedent("    foo\n      bar"), "foo\n  bar");
//! ```

/// Number of leading spaces and tabs on `line`.
fn leading_whitespace(line: &str) -> usize {
    line.chars().take_while(|&c| c == ' ' || c == '\t').count()
}

/// Smallest indentation over all lines that contain something besides
/// spaces and tabs.
pub fn min_indent(s: &str) -> usize {
    s.split('\n')
        .filter(|line| line.chars().any(|c| c != ' ' && c != '\t'))
        .map(leading_whitespace)
        .min()
        .unwrap_or(0)
}

/// Removes the common indentation from every line of `s`.
///
/// Spaces and tabs each count as one column. Blank lines do not take part in
/// finding the common indentation but lose up to that much whitespace too.
pub fn dedent(s: &str) -> String {
    let indent = min_indent(s);
    if indent == 0 {
        return s.to_string();
    }

    let mut out = String::with_capacity(s.len());
    for (i, line) in s.split('\n').enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let skip = leading_whitespace(line).min(indent);
        // Spaces and tabs are single-byte, so the char count is a byte offset.
        out.push_str(&line[skip..]);
    }
    out
}
