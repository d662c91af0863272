//! Match runner — Short-circuit AND over a claim's components
//!
//! One linear pass per evaluation, in claim insertion order:
//!
//! ```text
//! for each component:
//!     first rule ──known? validate──▶ extract ──compare (await)──▶ false? stop : next
//! ```
//!
//! No fan-out: components are evaluated one at a time so the first failure, and
//! the set of comparator calls made before it, are deterministic.

use std::borrow::Cow;

use tracing::{debug, trace, warn};
use url::Url;

use crate::labels::display_name;
use crate::{
    canonical_query, extract, Claim, ClaimError, ClaimTrace, Comparator, ComponentStep,
    MatchValue, Result, UriComponent,
};

impl Claim {
    /// Check `uri` against every declared component.
    ///
    /// Returns `Ok(true)` when every component's first rule is satisfied (an empty
    /// claim matches everything) and `Ok(false)` at the first one that is not.
    /// Components after a failing one are never evaluated.
    ///
    /// # Errors
    ///
    /// - [`ClaimError::EmptyComponent`] if a reached component declares no rule
    /// - [`ClaimError::UnknownMatchType`] if the comparator does not know a reached
    ///   rule's match type
    /// - [`ClaimError::InvalidMatchValue`] if a value has the wrong shape for its type
    /// - [`ClaimError::Comparison`] if the comparator fails
    pub async fn matches<C>(&self, uri: &Url, comparator: &C) -> Result<bool>
    where
        C: Comparator + ?Sized,
    {
        self.run(uri, comparator, None).await
    }

    /// Same as [`matches`](Self::matches), also recording each evaluated component.
    ///
    /// # Errors
    ///
    /// Same as [`matches`](Self::matches).
    pub async fn evaluate_with_trace<C>(&self, uri: &Url, comparator: &C) -> Result<ClaimTrace>
    where
        C: Comparator + ?Sized,
    {
        let mut steps = Vec::with_capacity(self.len());
        let matched = self.run(uri, comparator, Some(&mut steps)).await?;
        Ok(ClaimTrace { matched, steps })
    }

    async fn run<C>(
        &self,
        uri: &Url,
        comparator: &C,
        mut steps: Option<&mut Vec<ComponentStep>>,
    ) -> Result<bool>
    where
        C: Comparator + ?Sized,
    {
        for (&component, rules) in self.payload() {
            let rule = rules
                .first()
                .ok_or(ClaimError::EmptyComponent { component })?;

            if !comparator.knows(rule.match_type) {
                return Err(ClaimError::UnknownMatchType(display_name(
                    comparator,
                    rule.match_type,
                )));
            }
            if !comparator.validate(rule.match_type, rule.value) {
                return Err(ClaimError::InvalidMatchValue {
                    match_type: display_name(comparator, rule.match_type),
                });
            }

            let actual = extract(uri, component);
            let expected = declared_value(component, rule.value);
            debug!(%component, match_type = %rule.match_type, "evaluating component");
            trace!(%component, actual = %actual, expected = %expected, "component values");

            let matched = comparator
                .compare(&actual, rule.match_type, &expected)
                .await
                .map_err(|source| {
                    warn!(%component, match_type = %rule.match_type, error = %source, "comparison failed");
                    ClaimError::Comparison {
                        match_type: display_name(comparator, rule.match_type),
                        source,
                    }
                })?;

            if let Some(steps) = steps.as_deref_mut() {
                steps.push(ComponentStep {
                    component,
                    match_type: rule.match_type,
                    actual,
                    expected: expected.into_owned(),
                    matched,
                });
            }

            if !matched {
                debug!(%component, "component did not match, stopping");
                return Ok(false);
            }
        }
        Ok(true)
    }
}

/// The value handed to the comparator: declared query strings are canonicalized
/// the same way as the request query.
fn declared_value(component: UriComponent, value: &MatchValue) -> Cow<'_, MatchValue> {
    match (component, value) {
        (UriComponent::Query, MatchValue::Single(raw)) => {
            Cow::Owned(MatchValue::Single(canonical_query(raw)))
        }
        _ => Cow::Borrowed(value),
    }
}
