use serde::{Deserialize, Serialize};

/// One allow-list rule
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selector {
    /// Exact domain name: "cilium.io" only matches "cilium.io"
    ExactName(String),
    /// Wildcard pattern: "*.s3.io" matches "data.s3.io" but not "a.b.s3.io"
    WildcardPattern(String),
}

impl Selector {
    /// Create an exact-name selector
    pub fn exact(name: impl Into<String>) -> Self {
        Selector::ExactName(name.into())
    }

    /// Create a wildcard-pattern selector
    pub fn pattern(pattern: impl Into<String>) -> Self {
        Selector::WildcardPattern(pattern.into())
    }

    /// Raw rule text as supplied by the caller
    pub fn text(&self) -> &str {
        match self {
            Selector::ExactName(text) | Selector::WildcardPattern(text) => text,
        }
    }

    pub fn is_pattern(&self) -> bool {
        matches!(self, Selector::WildcardPattern(_))
    }
}

/// Policy-layer selector record.
///
/// Mirrors the `{ matchName, matchPattern }` shape network policies use.
/// Normally exactly one field is populated; a record with both populated
/// contributes both rules, a record with neither is rejected at compile time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FqdnSelector {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub match_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub match_pattern: String,
}

impl FqdnSelector {
    /// Create a record matching one exact name
    pub fn from_name(name: impl Into<String>) -> Self {
        Self {
            match_name: name.into(),
            match_pattern: String::new(),
        }
    }

    /// Create a record matching a wildcard pattern
    pub fn from_pattern(pattern: impl Into<String>) -> Self {
        Self {
            match_name: String::new(),
            match_pattern: pattern.into(),
        }
    }

    /// True when neither field carries any text
    pub fn is_empty(&self) -> bool {
        self.match_name.is_empty() && self.match_pattern.is_empty()
    }

    /// The rules carried by this record, name first.
    pub fn selectors(&self) -> Vec<Selector> {
        let mut out = Vec::with_capacity(2);
        if !self.match_name.is_empty() {
            out.push(Selector::ExactName(self.match_name.clone()));
        }
        if !self.match_pattern.is_empty() {
            out.push(Selector::WildcardPattern(self.match_pattern.clone()));
        }
        out
    }
}

impl From<Selector> for FqdnSelector {
    fn from(selector: Selector) -> Self {
        match selector {
            Selector::ExactName(name) => FqdnSelector::from_name(name),
            Selector::WildcardPattern(pattern) => FqdnSelector::from_pattern(pattern),
        }
    }
}
