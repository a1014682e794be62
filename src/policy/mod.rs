//! Policy handle.
//!
//! Holds the matcher for the current policy version and swaps in a freshly
//! compiled one when the policy changes.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{info, warn};

use crate::compile::{compile_with, CompileOptions};
use crate::error::Result;
use crate::matcher::FqdnMatcher;
use crate::types::FqdnSelector;

/// Shared, swappable reference to the active matcher.
///
/// Readers take an `Arc` snapshot and evaluate without holding any lock, so
/// an update never blocks or disturbs in-flight evaluations.
pub struct PolicyHandle {
    current: RwLock<Arc<FqdnMatcher>>,
    options: CompileOptions,
    generation: AtomicU64,
}

impl PolicyHandle {
    /// Create a handle whose initial policy rejects everything.
    pub fn new(options: CompileOptions) -> Self {
        let empty = FqdnMatcher::empty(options.strategy);
        Self {
            current: RwLock::new(Arc::new(empty)),
            options,
            generation: AtomicU64::new(0),
        }
    }

    /// Create a handle from an initial selector list.
    pub fn from_selectors(selectors: &[FqdnSelector], options: CompileOptions) -> Result<Self> {
        let matcher = compile_with(selectors, &options)?;
        Ok(Self {
            current: RwLock::new(Arc::new(matcher)),
            options,
            generation: AtomicU64::new(1),
        })
    }

    /// Snapshot of the active matcher
    pub fn load(&self) -> Arc<FqdnMatcher> {
        self.current.read().clone()
    }

    /// Evaluate against the active matcher
    pub fn evaluate(&self, name: &str) -> bool {
        self.load().evaluate(name)
    }

    /// Recompile from a full selector list and swap the result in.
    ///
    /// On error the active matcher is left untouched. Returns the new
    /// generation number.
    pub fn update(&self, selectors: &[FqdnSelector]) -> Result<u64> {
        let matcher = compile_with(selectors, &self.options).map_err(|e| {
            warn!(error = %e, "policy update rejected, keeping previous matcher");
            e
        })?;
        self.replace(matcher);
        Ok(self.generation())
    }

    /// Swap in an already compiled matcher, returning the previous one.
    pub fn replace(&self, matcher: FqdnMatcher) -> Arc<FqdnMatcher> {
        let exact = matcher.exact_names().len();
        let fragments = matcher.fragment_count();

        let previous = {
            let mut current = self.current.write();
            std::mem::replace(&mut *current, Arc::new(matcher))
        };
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;

        info!(generation, exact, fragments, "fqdn policy swapped");
        previous
    }

    /// Number of successful swaps so far
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    pub fn options(&self) -> &CompileOptions {
        &self.options
    }
}

impl Default for PolicyHandle {
    fn default() -> Self {
        Self::new(CompileOptions::default())
    }
}
