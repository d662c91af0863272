//! Evaluation trace types for debugging claim decisions.
//!
//! [`Claim::evaluate_with_trace`](crate::Claim::evaluate_with_trace) runs the same
//! algorithm as [`Claim::matches`](crate::Claim::matches) and records what each
//! evaluated component was compared with.
//!
//! # Example
//!
//! ```ignore
//! let trace = claim.evaluate_with_trace(&uri, &catalog).await?;
//! println!("matched: {}", trace.matched);
//! for step in &trace.steps {
//!     println!("  {}: {:?} vs {} -> {}", step.component, step.actual, step.expected, step.matched);
//! }
//! ```

use std::fmt;

use crate::{MatchType, MatchValue, UriComponent};

/// One evaluated component.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ComponentStep {
    /// The component evaluated.
    pub component: UriComponent,
    /// The first (and only consulted) match type of the component.
    pub match_type: MatchType,
    /// Value extracted from the URI.
    pub actual: String,
    /// Value handed to the comparator (canonicalized for `query`).
    pub expected: MatchValue,
    /// The comparator's answer.
    pub matched: bool,
}

/// Trace of a full claim evaluation.
///
/// # INV: `matched` == `matches()` result
///
/// Steps stop at the first component that did not match, exactly where
/// [`Claim::matches`](crate::Claim::matches) short-circuits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ClaimTrace {
    /// The final result.
    pub matched: bool,
    /// Each evaluated component, in evaluation order.
    pub steps: Vec<ComponentStep>,
}

impl ClaimTrace {
    /// The component that stopped evaluation, if any.
    #[must_use]
    pub fn failed_at(&self) -> Option<UriComponent> {
        self.steps
            .last()
            .filter(|step| !step.matched)
            .map(|step| step.component)
    }
}

impl fmt::Display for ClaimTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "matched: {}", self.matched)?;
        for step in &self.steps {
            writeln!(
                f,
                "  {} [{}] actual=\"{}\" expected={} -> {}",
                step.component, step.match_type, step.actual, step.expected, step.matched
            )?;
        }
        Ok(())
    }
}
