use std::collections::HashSet;

use regex::RegexBuilder;
use tracing::debug;

use crate::error::{PolicyError, Result};
use crate::matcher::alternation;
use crate::matcher::name::{canonicalize_pattern, CanonicalName};
use crate::matcher::pattern::{reverse, CompiledFragment};
use crate::matcher::FqdnMatcher;
use crate::strategy::Strategy;
use crate::types::FqdnSelector;

/// Default compiled program size limit for the pattern automaton
pub const DEFAULT_SIZE_LIMIT: usize = 32 * (1 << 20);

/// Default lazy DFA cache size for the pattern automaton
pub const DEFAULT_DFA_SIZE_LIMIT: usize = 10 * (1 << 20);

/// Compiler options.
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// Construction strategy
    pub strategy: Strategy,
    /// Upper bound on the compiled automaton, in bytes
    pub size_limit: usize,
    /// Upper bound on the lazy DFA cache, in bytes
    pub dfa_size_limit: usize,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            size_limit: DEFAULT_SIZE_LIMIT,
            dfa_size_limit: DEFAULT_DFA_SIZE_LIMIT,
        }
    }
}

impl CompileOptions {
    /// Create new compile options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set construction strategy.
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Set automaton size limit.
    pub fn with_size_limit(mut self, bytes: usize) -> Self {
        self.size_limit = bytes;
        self
    }

    /// Set lazy DFA cache size.
    pub fn with_dfa_size_limit(mut self, bytes: usize) -> Self {
        self.dfa_size_limit = bytes;
        self
    }
}

/// Selectors after normalization, split into the two tiers
struct Lowered {
    exact: HashSet<CanonicalName>,
    fragments: Vec<CompiledFragment>,
}

/// Compile selectors into a matcher with the default options
pub fn compile(selectors: &[FqdnSelector]) -> Result<FqdnMatcher> {
    compile_with(selectors, &CompileOptions::default())
}

/// Compile selectors into a matcher.
///
/// Any malformed selector fails the whole compilation; there is no partially
/// built matcher.
pub fn compile_with(selectors: &[FqdnSelector], options: &CompileOptions) -> Result<FqdnMatcher> {
    let strategy = options.strategy;
    let Lowered { exact, fragments } = lower(selectors, strategy)?;

    let pattern = match alternation::build(&fragments, strategy.layout()) {
        Some(expr) => Some(
            RegexBuilder::new(&expr)
                .unicode(false)
                .size_limit(options.size_limit)
                .dfa_size_limit(options.dfa_size_limit)
                .build()?,
        ),
        None => None,
    };

    debug!(
        strategy = %strategy,
        selectors = selectors.len(),
        exact = exact.len(),
        fragments = fragments.len(),
        "compiled fqdn matcher"
    );

    Ok(FqdnMatcher::new(strategy, exact, pattern, fragments.len()))
}

/// The fragments a strategy would join, in final order.
///
/// Useful for diagnostics: each fragment records which selector it came from.
pub fn fragments(selectors: &[FqdnSelector], strategy: Strategy) -> Result<Vec<CompiledFragment>> {
    lower(selectors, strategy).map(|lowered| lowered.fragments)
}

fn lower(selectors: &[FqdnSelector], strategy: Strategy) -> Result<Lowered> {
    let mut exact = HashSet::new();
    let mut fragments = Vec::with_capacity(selectors.len());

    for (index, selector) in selectors.iter().enumerate() {
        if selector.is_empty() {
            return Err(PolicyError::malformed(
                index,
                "",
                "selector has neither a name nor a pattern",
            ));
        }

        if !selector.match_name.is_empty() {
            let name = CanonicalName::parse(&selector.match_name)
                .map_err(|reason| PolicyError::malformed(index, &selector.match_name, reason))?;
            if strategy.uses_exact_set() {
                exact.insert(name);
            } else {
                fragments.push(compile_rule(strategy, index, name.relative()));
            }
        }

        if !selector.match_pattern.is_empty() {
            let pattern = canonicalize_pattern(&selector.match_pattern)
                .map_err(|reason| PolicyError::malformed(index, &selector.match_pattern, reason))?;
            fragments.push(compile_rule(strategy, index, &pattern));
        }
    }

    if strategy.is_sorted() {
        // Stable, so the first selector wins among duplicates
        fragments.sort_by(|a, b| a.regex().cmp(b.regex()));
        fragments.dedup_by(|a, b| a.regex() == b.regex());
    }

    Ok(Lowered { exact, fragments })
}

fn compile_rule(strategy: Strategy, index: usize, relative: &str) -> CompiledFragment {
    if strategy.is_reversed() {
        CompiledFragment::compile(&reverse(relative), index, relative)
    } else {
        CompiledFragment::compile(relative, index, relative)
    }
}
