//! `MatchType` and `MatchValue` — What a claim declares for one component
//!
//! The core treats a match type as an opaque wire label. What the label means
//! (exact, prefix, regex, ...) and which value shape it requires is decided by the
//! injected [`Comparator`](crate::Comparator).

use std::fmt;

/// Opaque match-type identifier, carried on the wire as a signed integer label.
///
/// Translate to and from names through a [`MatchLabels`](crate::MatchLabels) table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct MatchType(i64);

impl MatchType {
    /// Wrap a wire label.
    #[must_use]
    pub const fn new(label: i64) -> Self {
        Self(label)
    }

    /// The wire label.
    #[must_use]
    pub const fn label(self) -> i64 {
        self.0
    }
}

impl From<i64> for MatchType {
    fn from(label: i64) -> Self {
        Self(label)
    }
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A declared match value: a single string or an ordered sequence of strings.
///
/// Which shape is legal depends on the match type; the runner checks it with
/// [`Comparator::validate`](crate::Comparator::validate) before comparing.
///
/// # Example
///
/// ```
/// use catu::MatchValue;
///
/// let v = MatchValue::from("/content/");
/// assert_eq!(v.as_str(), Some("/content/"));
/// assert_eq!(v.as_sequence(), None);
///
/// let v = MatchValue::from(vec!["^/v\\d+/".to_string()]);
/// assert!(v.is_sequence());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum MatchValue {
    /// A single string.
    Single(String),
    /// An ordered sequence of strings.
    Sequence(Vec<String>),
}

impl MatchValue {
    /// Returns `true` if this is the `Single` variant.
    #[inline]
    #[must_use]
    pub fn is_single(&self) -> bool {
        matches!(self, Self::Single(_))
    }

    /// Returns `true` if this is the `Sequence` variant.
    #[inline]
    #[must_use]
    pub fn is_sequence(&self) -> bool {
        matches!(self, Self::Sequence(_))
    }

    /// Try to get the value as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Single(s) => Some(s.as_str()),
            Self::Sequence(_) => None,
        }
    }

    /// Try to get the value as a slice of strings.
    #[inline]
    #[must_use]
    pub fn as_sequence(&self) -> Option<&[String]> {
        match self {
            Self::Sequence(v) => Some(v.as_slice()),
            Self::Single(_) => None,
        }
    }
}

impl fmt::Display for MatchValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(s) => write!(f, "\"{s}\""),
            Self::Sequence(v) => write!(f, "{v:?}"),
        }
    }
}

impl From<&str> for MatchValue {
    fn from(s: &str) -> Self {
        Self::Single(s.to_owned())
    }
}

impl From<String> for MatchValue {
    fn from(s: String) -> Self {
        Self::Single(s)
    }
}

impl From<Vec<String>> for MatchValue {
    fn from(v: Vec<String>) -> Self {
        Self::Sequence(v)
    }
}

impl From<Vec<&str>> for MatchValue {
    fn from(v: Vec<&str>) -> Self {
        Self::Sequence(v.into_iter().map(str::to_owned).collect())
    }
}

/// A borrowed (match type, match value) pair: the rule a component is checked by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchRule<'a> {
    /// The declared match type.
    pub match_type: MatchType,
    /// The declared match value.
    pub value: &'a MatchValue,
}
