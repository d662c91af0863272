//! `MatchLabels` — The externally owned match-type name table
//!
//! Claim documents name match types (`"prefix-match"`); tokens carry labels
//! (`1`). The table translating between the two belongs to whoever defines the
//! match types, so the core only consults it.

use crate::MatchType;

/// Bijection between match-type names and their wire labels.
///
/// Implemented by a match-type catalog. Every name-keyed builder and projection
/// on [`Claim`](crate::Claim) goes through this table; the core hardcodes no
/// match-type names.
///
/// # Example
///
/// ```
/// use catu::{MatchLabels, MatchType};
///
/// struct TwoTypes;
///
/// impl MatchLabels for TwoTypes {
///     fn match_type(&self, name: &str) -> Option<MatchType> {
///         match name {
///             "exact-match" => Some(MatchType::new(0)),
///             "prefix-match" => Some(MatchType::new(1)),
///             _ => None,
///         }
///     }
///
///     fn match_type_name(&self, match_type: MatchType) -> Option<&str> {
///         match match_type.label() {
///             0 => Some("exact-match"),
///             1 => Some("prefix-match"),
///             _ => None,
///         }
///     }
/// }
///
/// assert_eq!(TwoTypes.match_type("prefix-match"), Some(MatchType::new(1)));
/// assert!(TwoTypes.knows(MatchType::new(0)));
/// ```
pub trait MatchLabels: Send + Sync {
    /// Label for a match-type name, or `None` if the name is unknown.
    fn match_type(&self, name: &str) -> Option<MatchType>;

    /// Name for a match-type label, or `None` if the label is unknown.
    fn match_type_name(&self, match_type: MatchType) -> Option<&str>;

    /// Returns `true` if the label is present in the table.
    fn knows(&self, match_type: MatchType) -> bool {
        self.match_type_name(match_type).is_some()
    }
}

impl<T: MatchLabels + ?Sized> MatchLabels for &T {
    fn match_type(&self, name: &str) -> Option<MatchType> {
        (**self).match_type(name)
    }

    fn match_type_name(&self, match_type: MatchType) -> Option<&str> {
        (**self).match_type_name(match_type)
    }
}

impl<T: MatchLabels + ?Sized> MatchLabels for Box<T> {
    fn match_type(&self, name: &str) -> Option<MatchType> {
        (**self).match_type(name)
    }

    fn match_type_name(&self, match_type: MatchType) -> Option<&str> {
        (**self).match_type_name(match_type)
    }
}

impl<T: MatchLabels + ?Sized> MatchLabels for std::sync::Arc<T> {
    fn match_type(&self, name: &str) -> Option<MatchType> {
        (**self).match_type(name)
    }

    fn match_type_name(&self, match_type: MatchType) -> Option<&str> {
        (**self).match_type_name(match_type)
    }
}

/// Display name for a match type: its table name, or its label if unnamed.
pub(crate) fn display_name<L: MatchLabels + ?Sized>(labels: &L, match_type: MatchType) -> String {
    labels
        .match_type_name(match_type)
        .map_or_else(|| match_type.to_string(), str::to_owned)
}
