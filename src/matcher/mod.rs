pub(crate) mod alternation;
pub mod name;
pub mod pattern;

pub use name::{canonicalize, CanonicalName};
pub use pattern::CompiledFragment;

use std::collections::HashSet;

use regex::Regex;

use crate::strategy::Strategy;

/// Compiled allow-list.
///
/// Two tiers: a hash set of canonical exact names and one anchored automaton
/// for all patterns. Immutable once built, so it can be shared across threads
/// behind an `Arc` and queried without locking.
#[derive(Debug, Clone)]
pub struct FqdnMatcher {
    strategy: Strategy,
    exact: HashSet<CanonicalName>,
    pattern: Option<Regex>,
    fragment_count: usize,
}

impl FqdnMatcher {
    pub(crate) fn new(
        strategy: Strategy,
        exact: HashSet<CanonicalName>,
        pattern: Option<Regex>,
        fragment_count: usize,
    ) -> Self {
        Self {
            strategy,
            exact,
            pattern,
            fragment_count,
        }
    }

    /// A matcher that rejects everything
    pub fn empty(strategy: Strategy) -> Self {
        Self::new(strategy, HashSet::new(), None, 0)
    }

    /// Check whether a domain name is allowed.
    ///
    /// Never fails: names that are not DNS-safe simply do not match.
    pub fn evaluate(&self, name: &str) -> bool {
        let canonical = canonicalize(name);

        // Exact set first (O(1))
        if self.exact.contains(&*canonical) {
            return true;
        }

        match &self.pattern {
            Some(re) => re.is_match(&self.strategy.rewrite_domain(&canonical)),
            None => false,
        }
    }

    /// The string the automaton sees for `name`
    pub fn rewrite_domain(&self, name: &str) -> String {
        self.strategy
            .rewrite_domain(&canonicalize(name))
            .into_owned()
    }

    /// Canonical exact names held in the set tier
    pub fn exact_names(&self) -> &HashSet<CanonicalName> {
        &self.exact
    }

    /// The composed expression, if any rule went into the automaton
    pub fn pattern(&self) -> Option<&str> {
        self.pattern.as_ref().map(Regex::as_str)
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Number of fragments joined into the automaton (after de-duplication)
    pub fn fragment_count(&self) -> usize {
        self.fragment_count
    }

    pub fn is_empty(&self) -> bool {
        self.exact.is_empty() && self.pattern.is_none()
    }
}
