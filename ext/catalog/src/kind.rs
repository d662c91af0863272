//! `MatchKind` — The standard match types and their wire labels

use std::fmt;

/// A standard CATU match type.
///
/// Labels follow the CTA-5007 match-type registry: the string comparisons take
/// non-negative labels, the digest comparisons negative ones.
///
/// # Example
///
/// ```
/// use catu_catalog::MatchKind;
///
/// assert_eq!(MatchKind::Regex.label(), 4);
/// assert_eq!(MatchKind::from_name("sha512-256-match"), Some(MatchKind::Sha512_256));
/// assert!(MatchKind::Regex.takes_sequence());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchKind {
    /// Exact string equality.
    Exact,
    /// String starts with prefix.
    Prefix,
    /// String ends with suffix.
    Suffix,
    /// String contains substring.
    Contains,
    /// Regular expression search (first element of the value is the pattern).
    Regex,
    /// SHA-256 digest of the value equals the declared hex digest.
    Sha256,
    /// SHA-512/256 digest of the value equals the declared hex digest.
    Sha512_256,
}

impl MatchKind {
    /// All standard match types.
    pub const ALL: [Self; 7] = [
        Self::Exact,
        Self::Prefix,
        Self::Suffix,
        Self::Contains,
        Self::Regex,
        Self::Sha256,
        Self::Sha512_256,
    ];

    /// Wire label.
    #[must_use]
    pub const fn label(self) -> i64 {
        match self {
            Self::Exact => 0,
            Self::Prefix => 1,
            Self::Suffix => 2,
            Self::Contains => 3,
            Self::Regex => 4,
            Self::Sha256 => -1,
            Self::Sha512_256 => -2,
        }
    }

    /// Claim-document name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Exact => "exact-match",
            Self::Prefix => "prefix-match",
            Self::Suffix => "suffix-match",
            Self::Contains => "contains-match",
            Self::Regex => "regex-match",
            Self::Sha256 => "sha256-match",
            Self::Sha512_256 => "sha512-256-match",
        }
    }

    /// Look up by wire label.
    #[must_use]
    pub fn from_label(label: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.label() == label)
    }

    /// Look up by claim-document name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }

    /// Returns `true` if the declared value must be a sequence rather than a string.
    #[must_use]
    pub const fn takes_sequence(self) -> bool {
        matches!(self, Self::Regex)
    }
}

impl fmt::Display for MatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<MatchKind> for catu::MatchType {
    fn from(kind: MatchKind) -> Self {
        catu::MatchType::new(kind.label())
    }
}
