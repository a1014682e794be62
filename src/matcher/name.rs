//! Domain name canonicalization.
//!
//! Every name the engine stores or looks up is in canonical form: trimmed,
//! lowercased and absolute (exactly one trailing dot). The root is `"."`.

use std::borrow::{Borrow, Cow};
use std::fmt;

/// Label separator
pub const SEPARATOR: char = '.';

/// Wildcard glyph accepted in patterns
pub const WILDCARD: char = '*';

/// Append the trailing separator if it is missing.
pub fn fqdn(name: &str) -> Cow<'_, str> {
    if name.ends_with(SEPARATOR) {
        Cow::Borrowed(name)
    } else {
        let mut out = String::with_capacity(name.len() + 1);
        out.push_str(name);
        out.push(SEPARATOR);
        Cow::Owned(out)
    }
}

/// Strip one trailing separator, if present.
pub fn from_fqdn(name: &str) -> &str {
    name.strip_suffix(SEPARATOR).unwrap_or(name)
}

/// Canonicalize a candidate domain name for lookup.
///
/// No validation happens here: anything that is not DNS-safe simply fails to
/// match later. Only allocates when the input is not already canonical. The
/// empty string stays empty so it can never collide with the root.
pub fn canonicalize(name: &str) -> Cow<'_, str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Cow::Borrowed(trimmed);
    }

    if trimmed.chars().any(char::is_uppercase) {
        let mut lowered = trimmed.to_lowercase();
        if !lowered.ends_with(SEPARATOR) {
            lowered.push(SEPARATOR);
        }
        Cow::Owned(lowered)
    } else {
        fqdn(trimmed)
    }
}

/// A validated, canonical exact name
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CanonicalName(String);

impl CanonicalName {
    /// Validate and canonicalize raw exact-name text.
    ///
    /// Returns the rejection reason on failure.
    pub fn parse(raw: &str) -> Result<Self, String> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err("empty name".to_string());
        }

        let lowered = trimmed.to_lowercase();
        if lowered == "." {
            return Ok(Self(lowered));
        }

        validate_labels(from_fqdn(&lowered), false)?;
        Ok(Self(fqdn(&lowered).into_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The name without its trailing separator ("" for the root)
    pub fn relative(&self) -> &str {
        from_fqdn(&self.0)
    }

    pub fn is_root(&self) -> bool {
        self.0 == "."
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for CanonicalName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CanonicalName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for CanonicalName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Validate and canonicalize raw wildcard-pattern text.
///
/// The result is lowercased and relative (no trailing separator), which is
/// the form the pattern compiler consumes.
pub fn canonicalize_pattern(raw: &str) -> Result<String, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err("empty pattern".to_string());
    }

    let lowered = trimmed.to_lowercase();
    let relative = from_fqdn(&lowered);
    if relative.is_empty() {
        return Err("pattern is empty without its trailing separator".to_string());
    }

    validate_labels(relative, true)?;
    Ok(relative.to_string())
}

/// Check a relative, lowercased name against the DNS-safe alphabet.
fn validate_labels(relative: &str, allow_wildcard: bool) -> Result<(), String> {
    if let Some(bad) = relative
        .chars()
        .find(|&c| !is_label_char(c) && c != SEPARATOR && !(allow_wildcard && c == WILDCARD))
    {
        return Err(format!("invalid character {:?}", bad));
    }

    if relative.split(SEPARATOR).any(str::is_empty) {
        return Err("empty label".to_string());
    }

    Ok(())
}

/// Characters allowed inside a single label
pub fn is_label_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_'
}
