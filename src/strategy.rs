use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use crate::error::PolicyError;
use crate::matcher::pattern::reverse;

/// How fragments are arranged into the final expression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Layout {
    /// Every fragment carries its own anchors and capture group
    Independent,
    /// One shared group between a common prefix and suffix
    Shared {
        prefix: &'static str,
        suffix: &'static str,
    },
}

/// Named construction policy for a matcher.
///
/// All strategies accept exactly the same names for the same rule set; they
/// differ in how the automaton is laid out and therefore in compile and
/// match cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Strategy {
    /// Every rule (names included) as an independently anchored alternative
    Baseline,
    /// Every rule reversed into one shared alternation
    Reverse,
    /// Like `Reverse`, with fragments sorted and de-duplicated
    ReverseAndSort,
    /// Exact names in a set, patterns as independently anchored alternatives
    MapAndBaseline,
    /// Exact names in a set, patterns in one shared forward alternation
    MapAndOptimized,
    /// Exact names in a set, patterns reversed, sorted, shared alternation
    #[default]
    MapAndReverse,
    /// `MapAndReverse` with a captured end anchor, which keeps the regex
    /// engine off its optimized paths. Benchmark use only.
    MapAndReverseUnoptimized,
}

impl Strategy {
    pub const ALL: [Strategy; 7] = [
        Strategy::Baseline,
        Strategy::Reverse,
        Strategy::ReverseAndSort,
        Strategy::MapAndBaseline,
        Strategy::MapAndOptimized,
        Strategy::MapAndReverseUnoptimized,
        Strategy::MapAndReverse,
    ];

    /// Stable name used in configuration and reports
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Baseline => "baseline",
            Strategy::Reverse => "reverse",
            Strategy::ReverseAndSort => "reverse+sort",
            Strategy::MapAndBaseline => "map+baseline",
            Strategy::MapAndOptimized => "map+optimized",
            Strategy::MapAndReverse => "map+reverse",
            Strategy::MapAndReverseUnoptimized => "map+reverse+unoptimized",
        }
    }

    /// Exact names go to the hash set instead of the automaton
    pub fn uses_exact_set(&self) -> bool {
        matches!(
            self,
            Strategy::MapAndBaseline
                | Strategy::MapAndOptimized
                | Strategy::MapAndReverse
                | Strategy::MapAndReverseUnoptimized
        )
    }

    /// Rules and candidates are reversed character by character
    pub fn is_reversed(&self) -> bool {
        matches!(
            self,
            Strategy::Reverse
                | Strategy::ReverseAndSort
                | Strategy::MapAndReverse
                | Strategy::MapAndReverseUnoptimized
        )
    }

    /// Fragments are sorted (and de-duplicated) before joining
    pub fn is_sorted(&self) -> bool {
        matches!(
            self,
            Strategy::ReverseAndSort | Strategy::MapAndReverse | Strategy::MapAndReverseUnoptimized
        )
    }

    pub fn is_benchmark_only(&self) -> bool {
        matches!(self, Strategy::MapAndReverseUnoptimized)
    }

    pub(crate) fn layout(&self) -> Layout {
        match self {
            Strategy::Baseline | Strategy::MapAndBaseline => Layout::Independent,
            Strategy::MapAndOptimized => Layout::Shared {
                prefix: "^(?:",
                suffix: ")[.]$",
            },
            Strategy::Reverse | Strategy::ReverseAndSort | Strategy::MapAndReverse => {
                Layout::Shared {
                    prefix: "^[.](?:",
                    suffix: ")$",
                }
            }
            Strategy::MapAndReverseUnoptimized => Layout::Shared {
                prefix: "^[.](?:",
                suffix: ")($)",
            },
        }
    }

    /// Rewrite a canonical candidate into the string the automaton scans.
    pub fn rewrite_domain<'a>(&self, canonical: &'a str) -> Cow<'a, str> {
        if self.is_reversed() {
            Cow::Owned(reverse(canonical))
        } else {
            Cow::Borrowed(canonical)
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = PolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        Strategy::ALL
            .iter()
            .copied()
            .find(|strategy| strategy.name() == s)
            .ok_or_else(|| PolicyError::ParseError(format!("Unknown strategy: {}", s)))
    }
}
