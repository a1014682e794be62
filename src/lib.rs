//! FQDN Policy - compiles DNS allow-list selectors into a fast matcher
//!
//! Policies list exact names and wildcard patterns; this crate turns such a
//! list into an immutable two-tier matcher:
//! - O(1) exact name lookup using a HashSet
//! - One anchored regex automaton for all wildcard patterns, built over
//!   character-reversed, sorted fragments so shared suffixes are coalesced
//!
//! # Example
//!
//! ```rust
//! use fqdn_policy::{compile, FqdnSelector};
//!
//! let selectors = vec![
//!     FqdnSelector::from_name("cilium.io"),
//!     FqdnSelector::from_pattern("*.s3.io"),
//! ];
//!
//! let matcher = compile(&selectors).unwrap();
//!
//! assert!(matcher.evaluate("cilium.io"));
//! assert!(matcher.evaluate("CILIUM.IO."));
//! assert!(!matcher.evaluate("www.cilium.io"));
//! assert!(matcher.evaluate("data.s3.io"));
//! assert!(!matcher.evaluate("s3.io"));
//! ```
//!
//! # Selector Syntax
//!
//! | Type | Example | Matches |
//! |------|---------|---------|
//! | Name | `cilium.io` | `cilium.io` only (case and trailing dot ignored) |
//! | Pattern | `*.s3.io` | `data.s3.io`, not `s3.io` or `a.b.s3.io` |
//! | Pattern | `wil*dc.ard` | `wildddc.ard` |
//! | Match-all | `*` | every valid name and the root `.` |
//!
//! A wildcard consumes one or more of `[-a-zA-Z0-9_]` and never a `.`.
//!
//! # Strategies
//!
//! [`Strategy`] selects how the automaton is laid out. Every strategy accepts
//! the same names; [`Strategy::MapAndReverse`] is the default and the fastest.

pub mod compile;
pub mod error;
pub mod matcher;
pub mod parser;
pub mod policy;
pub mod strategy;
pub mod types;

// Re-export commonly used items
pub use compile::{compile, compile_with, fragments, CompileOptions};
pub use error::{PolicyError, Result};
pub use matcher::{canonicalize, CanonicalName, CompiledFragment, FqdnMatcher};
pub use parser::{parse_selectors, parse_selectors_from_file, parse_selectors_json};
pub use policy::PolicyHandle;
pub use strategy::Strategy;
pub use types::{FqdnSelector, Selector};
