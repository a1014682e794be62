//! Joins compiled fragments into one anchored expression.

use super::pattern::CompiledFragment;
use crate::strategy::Layout;

const INDEPENDENT_OPEN: &str = "(^";
const INDEPENDENT_CLOSE: &str = "[.]$)";

/// Build the final expression, or `None` when there is nothing to match.
///
/// An empty alternation would still accept the root, so no fragments must
/// mean no automaton at all.
pub(crate) fn build(fragments: &[CompiledFragment], layout: Layout) -> Option<String> {
    if fragments.is_empty() {
        return None;
    }

    let body: usize = fragments.iter().map(|f| f.regex().len()).sum();
    let separators = fragments.len() - 1;

    let expr = match layout {
        Layout::Independent => {
            let per_fragment = INDEPENDENT_OPEN.len() + INDEPENDENT_CLOSE.len();
            let mut out = String::with_capacity(body + separators + fragments.len() * per_fragment);
            for (i, fragment) in fragments.iter().enumerate() {
                if i > 0 {
                    out.push('|');
                }
                out.push_str(INDEPENDENT_OPEN);
                out.push_str(fragment.regex());
                out.push_str(INDEPENDENT_CLOSE);
            }
            out
        }
        Layout::Shared { prefix, suffix } => {
            let mut out = String::with_capacity(prefix.len() + body + separators + suffix.len());
            out.push_str(prefix);
            for (i, fragment) in fragments.iter().enumerate() {
                if i > 0 {
                    out.push('|');
                }
                out.push_str(fragment.regex());
            }
            out.push_str(suffix);
            out
        }
    };

    Some(expr)
}
