#![allow(clippy::doc_markdown)]
#![allow(clippy::uninlined_format_args)]

use proptest::prelude::*;
use reflow::ansi::{Class, Scanner, is_terminator};
use reflow::{hardwrap, indent, printable_width, strip, truncate, wordwrap};

/// All escape sequences of `s`, in order.
fn sequences(s: &str) -> Vec<String> {
    let mut scanner = Scanner::new();
    let mut out = Vec::new();
    let mut current = String::new();
    for c in s.chars() {
        match scanner.classify(c) {
            Class::EscapeStart => current = c.to_string(),
            Class::InSequence => current.push(c),
            Class::Terminator => {
                current.push(c);
                out.push(std::mem::take(&mut current));
            }
            Class::Plain(_) => {}
        }
    }
    out
}

/// Text interleaved with well-formed SGR sequences.
fn styled_text() -> impl Strategy<Value = String> {
    prop::collection::vec(("[a-zA-Z日本 -]{0,8}", prop::option::of(0u8..108)), 0..10).prop_map(
        |parts| {
            parts
                .into_iter()
                .map(|(text, code)| match code {
                    Some(code) => format!("\x1b[{code}m{text}"),
                    None => text,
                })
                .collect()
        },
    )
}

// =============================================================================
// Width measurement
// =============================================================================

proptest! {
    #[test]
    fn width_of_stripped_equals_width(s in styled_text()) {
        prop_assert_eq!(printable_width(&strip(&s)), printable_width(&s));
    }

    #[test]
    fn width_ascii_equals_len(s in "[a-zA-Z0-9 ]{0,100}") {
        prop_assert_eq!(printable_width(&s), s.len());
    }

    #[test]
    fn width_never_panics(s in "\\PC{0,200}") {
        let _ = printable_width(&s);
        let _ = strip(&s);
    }
}

// =============================================================================
// Zero limits pass through
// =============================================================================

proptest! {
    #[test]
    fn hardwrap_zero_limit_is_identity(s in "[^\t]{0,100}") {
        prop_assert_eq!(hardwrap::wrap(&s, 0), s);
    }

    #[test]
    fn wordwrap_zero_limit_is_identity(s in "\\PC{0,100}") {
        prop_assert_eq!(wordwrap::wrap(&s, 0), s);
    }
}

// =============================================================================
// Sequences are atomic
// =============================================================================

proptest! {
    #[test]
    fn wordwrap_keeps_sequences_whole(s in styled_text(), limit in 1usize..12) {
        let out = wordwrap::wrap(&s, limit);
        let seqs = sequences(&out);
        for seq in &seqs {
            prop_assert!(seq.chars().last().is_some_and(is_terminator));
            prop_assert!(!seq.contains('\n'));
        }
        prop_assert_eq!(seqs, sequences(&s));
    }

    #[test]
    fn hardwrap_keeps_sequences_whole(s in styled_text(), limit in 1usize..12) {
        let out = hardwrap::wrap(&s, limit);
        let seqs = sequences(&out);
        for seq in &seqs {
            prop_assert!(!seq.contains('\n'));
        }
        prop_assert_eq!(seqs, sequences(&s));
    }

    #[test]
    fn truncate_never_cuts_a_sequence(s in styled_text(), width in 0usize..20) {
        let out = truncate::truncate_with_tail(&s, width, "…");
        for seq in sequences(&out) {
            prop_assert!(seq.chars().last().is_some_and(is_terminator));
        }
        let mut scanner = Scanner::new();
        out.chars().for_each(|c| { scanner.classify(c); });
        prop_assert!(!scanner.in_sequence());
    }
}

// =============================================================================
// Budgets and line widths
// =============================================================================

proptest! {
    #[test]
    fn truncate_respects_budget(
        s in styled_text(),
        width in 0usize..20,
        tail in prop::sample::select(vec!["", ".", "...", "…"]),
    ) {
        let out = truncate::truncate_with_tail(&s, width, tail);
        if width >= printable_width(tail) {
            prop_assert!(printable_width(&out) <= width);
        } else {
            prop_assert_eq!(out, tail);
        }
    }

    #[test]
    fn truncate_short_input_untouched(s in "[a-z]{0,10}") {
        prop_assert_eq!(truncate::truncate_with_tail(&s, 10, "..."), s);
    }

    #[test]
    fn hardwrap_lines_fit(s in "[a-zA-Z0-9]{0,80}", limit in 1usize..20) {
        let out = hardwrap::wrap(&s, limit);
        for line in out.split('\n') {
            prop_assert!(printable_width(line) <= limit);
        }
        prop_assert_eq!(out.replace('\n', ""), s);
    }

    #[test]
    fn wordwrap_never_splits_short_words(s in "[a-z]{1,9}( [a-z]{1,9}){0,20}") {
        let limit = 10;
        let out = wordwrap::wrap(&s, limit);
        for line in out.split('\n') {
            prop_assert!(printable_width(line) <= limit, "line {:?} too wide", line);
        }
        // Only the spaces between words may turn into line breaks.
        prop_assert_eq!(out.replace('\n', " "), s);
    }

    #[test]
    fn indent_prefixes_every_line(s in "[a-z]{1,10}(\n[a-z]{1,10}){0,5}", n in 0usize..6) {
        let out = indent::indent(&s, n);
        let pad = " ".repeat(n);
        for (orig, line) in s.split('\n').zip(out.split('\n')) {
            prop_assert_eq!(line, format!("{pad}{orig}"));
        }
    }
}

// =============================================================================
// Streaming equivalence
// =============================================================================

proptest! {
    #[test]
    fn wordwrap_chunking_is_invisible(s in styled_text(), split in 0usize..64, limit in 1usize..12) {
        use reflow::Reflow;

        let cut = s.char_indices().map(|(i, _)| i).nth(split).unwrap_or(s.len());
        let mut w = wordwrap::WordWrap::new(limit);
        w.write(&s[..cut]).unwrap();
        w.write(&s[cut..]).unwrap();
        prop_assert_eq!(w.finish().unwrap(), wordwrap::wrap(&s, limit));
    }
}
