//! `Comparator` — The injected match-type catalog
//!
//! The core extracts a value from the URI and hands it, together with the declared
//! rule, to a `Comparator`. Everything about what a match type means lives on the
//! other side of this trait.

use async_trait::async_trait;
use std::fmt::Debug;

use crate::{MatchLabels, MatchType, MatchValue};

/// Boxed error returned by a [`Comparator`] when a comparison cannot be performed.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Validates and evaluates match rules for a catalog of match types.
///
/// A comparator is also the [`MatchLabels`] table for its own match types, so the
/// runner can name the offending type in errors.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`: one comparator is shared by every
/// concurrent evaluation.
///
/// # Cancellation
///
/// [`compare`](Self::compare) may suspend. Dropping the evaluation future drops the
/// pending comparison; implementations own any timeout policy.
///
/// # Example
///
/// ```ignore
/// #[derive(Debug)]
/// struct ExactOnly;
///
/// #[async_trait]
/// impl Comparator for ExactOnly {
///     fn validate(&self, _: MatchType, value: &MatchValue) -> bool {
///         value.is_single()
///     }
///
///     async fn compare(&self, actual: &str, _: MatchType, value: &MatchValue)
///         -> Result<bool, BoxError>
///     {
///         Ok(value.as_str() == Some(actual))
///     }
/// }
/// ```
#[async_trait]
pub trait Comparator: MatchLabels + Debug {
    /// Returns `true` if `value` has the shape `match_type` requires
    /// (single string vs. sequence).
    fn validate(&self, match_type: MatchType, value: &MatchValue) -> bool;

    /// Compare an extracted URI value against a declared rule.
    ///
    /// # Errors
    ///
    /// Returns an error if the comparison itself cannot be performed, e.g. an
    /// invalid pattern for a pattern-based match type.
    async fn compare(
        &self,
        actual: &str,
        match_type: MatchType,
        value: &MatchValue,
    ) -> Result<bool, BoxError>;
}

#[async_trait]
impl<T: Comparator + ?Sized> Comparator for Box<T> {
    fn validate(&self, match_type: MatchType, value: &MatchValue) -> bool {
        (**self).validate(match_type, value)
    }

    async fn compare(
        &self,
        actual: &str,
        match_type: MatchType,
        value: &MatchValue,
    ) -> Result<bool, BoxError> {
        (**self).compare(actual, match_type, value).await
    }
}

#[async_trait]
impl<T: Comparator + ?Sized> Comparator for std::sync::Arc<T> {
    fn validate(&self, match_type: MatchType, value: &MatchValue) -> bool {
        (**self).validate(match_type, value)
    }

    async fn compare(
        &self,
        actual: &str,
        match_type: MatchType,
        value: &MatchValue,
    ) -> Result<bool, BoxError> {
        (**self).compare(actual, match_type, value).await
    }
}
