//! Wildcard pattern to regex fragment compilation.

use super::name::{SEPARATOR, WILDCARD};

/// Characters a wildcard may consume: one label's worth, never a separator
pub const LABEL_CHAR_CLASS: &str = "[-a-zA-Z0-9_]";

/// A literal separator
const SEPARATOR_LITERAL: &str = "[.]";

/// Fragment for the match-all pattern: one or more labels, or nothing (root).
///
/// Reads the same forwards and backwards, so it serves reversed strategies too.
pub const MATCH_ALL_FRAGMENT: &str = "(?:[-a-zA-Z0-9_]+(?:[.][-a-zA-Z0-9_]+)*)?";

/// Regex text compiled from one rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledFragment {
    regex: String,
    origin: usize,
    source: String,
}

impl CompiledFragment {
    /// Compile relative, canonical rule text.
    ///
    /// `text` is the string the fragment must match (already reversed for
    /// reversed strategies); `source` is the canonical rule it came from.
    pub fn compile(text: &str, origin: usize, source: &str) -> Self {
        Self {
            regex: to_regex(text),
            origin,
            source: source.to_string(),
        }
    }

    /// The regex text
    pub fn regex(&self) -> &str {
        &self.regex
    }

    /// Index of the selector this fragment came from
    pub fn origin(&self) -> usize {
        self.origin
    }

    /// Canonical rule text, before any reversal
    pub fn source(&self) -> &str {
        &self.source
    }
}

/// Translate relative rule text into regex text.
///
/// The input is assumed validated: only label characters, separators and
/// wildcards.
pub fn to_regex(text: &str) -> String {
    if text.len() == 1 && text.starts_with(WILDCARD) {
        return MATCH_ALL_FRAGMENT.to_string();
    }

    let wildcards = text.matches(WILDCARD).count();
    let separators = text.matches(SEPARATOR).count();
    let mut out = String::with_capacity(
        text.len()
            + wildcards * (LABEL_CHAR_CLASS.len() + 1)
            + separators * SEPARATOR_LITERAL.len(),
    );

    for c in text.chars() {
        match c {
            WILDCARD => {
                out.push_str(LABEL_CHAR_CLASS);
                out.push('+');
            }
            SEPARATOR => out.push_str(SEPARATOR_LITERAL),
            c => out.push(c),
        }
    }
    out
}

/// Character-level reversal: "s3.io" becomes "oi.3s".
pub fn reverse(s: &str) -> String {
    s.chars().rev().collect()
}
