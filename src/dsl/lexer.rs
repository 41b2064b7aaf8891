//! Line classifier for the flowchart DSL.
//!
//! The DSL is line-oriented, so lexing is a matter of deciding what each line
//! is. Header lines and blank lines are noise and never reach the parser.

use super::ast::{DEFAULT_HEADER_KEYWORDS, EDGE_MARKER};

/// A classified, non-noise line of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    /// The kind of line
    pub kind: LineKind,
    /// Trimmed line text
    pub text: &'a str,
    /// Line number (1-indexed)
    pub number: usize,
}

/// Line types in the DSL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// A single node reference
    Declaration,
    /// Contains the `-->` edge marker
    Edge,
}

/// Lazy classifier over the lines of a DSL document.
///
/// The iterator is `Clone`, so a classification pass can be restarted from
/// any point without re-reading the input.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    lines: std::iter::Enumerate<std::str::Lines<'a>>,
    header_keywords: &'a [&'a str],
}

impl<'a> Lexer<'a> {
    /// Create a classifier that recognizes the default header keywords.
    pub fn new(input: &'a str) -> Self {
        Self::with_header_keywords(input, &DEFAULT_HEADER_KEYWORDS)
    }

    /// Create a classifier with a custom set of header keywords.
    pub fn with_header_keywords(input: &'a str, header_keywords: &'a [&'a str]) -> Self {
        Self {
            lines: input.lines().enumerate(),
            header_keywords,
        }
    }

    /// Classify a single trimmed line. Returns `None` for noise.
    pub fn classify(&self, text: &str) -> Option<LineKind> {
        classify_line(text, self.header_keywords)
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Line<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        for (idx, raw) in self.lines.by_ref() {
            let text = raw.trim();
            if let Some(kind) = classify_line(text, self.header_keywords) {
                return Some(Line {
                    kind,
                    text,
                    number: idx + 1,
                });
            }
        }
        None
    }
}

/// Classify a single trimmed line against a set of header keywords.
///
/// Returns `None` for noise: blank lines and header lines. Anything else,
/// however odd, reaches the parser.
pub fn classify_line(text: &str, header_keywords: &[&str]) -> Option<LineKind> {
    if text.is_empty() || is_header(text, header_keywords) {
        None
    } else if text.contains(EDGE_MARKER) {
        Some(LineKind::Edge)
    } else {
        Some(LineKind::Declaration)
    }
}

// A keyword only counts as a whole word, so `graphics --> x` is still an edge.
fn is_header(text: &str, header_keywords: &[&str]) -> bool {
    header_keywords.iter().any(|keyword| {
        text.strip_prefix(keyword)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with(char::is_whitespace))
    })
}
