//! catu-catalog: the standard CATU match-type catalog
//!
//! Implements the match types of the CTA-5007 registry behind the two seams the
//! core exposes, [`catu::MatchLabels`] and [`catu::Comparator`]:
//!
//! | Name | Label | Value | Semantics |
//! |------|-------|-------|-----------|
//! | `exact-match` | 0 | string | equality |
//! | `prefix-match` | 1 | string | starts with |
//! | `suffix-match` | 2 | string | ends with |
//! | `contains-match` | 3 | string | substring |
//! | `regex-match` | 4 | sequence | regex search, pattern is the first element |
//! | `sha256-match` | -1 | hex string | SHA-256 digest equality |
//! | `sha512-256-match` | -2 | hex string | SHA-512/256 digest equality |
//!
//! # Example
//!
//! ```ignore
//! use catu::prelude::*;
//! use catu_catalog::StandardCatalog;
//!
//! let catalog = StandardCatalog::new();
//! let claim = Claim::from_named(
//!     [("filename", vec![("regex-match", MatchValue::from(vec![r"^seg_\d+\.ts$"]))])],
//!     &catalog,
//! )?;
//! assert!(claim.matches(&Url::parse("https://a.example/v/seg_7.ts")?, &catalog).await?);
//! ```

mod catalog;
mod kind;
mod matcher;

pub use catalog::StandardCatalog;
pub use kind::MatchKind;
pub use matcher::{DigestAlgorithm, ValueMatcher};

/// Maximum length for non-regex match values (exact, prefix, suffix, contains, digests).
pub const MAX_PATTERN_LENGTH: usize = 8192;

/// Maximum length for regex patterns.
///
/// Shorter than [`MAX_PATTERN_LENGTH`] because regex compilation cost scales
/// faster than literal matching.
pub const MAX_REGEX_PATTERN_LENGTH: usize = 4096;

/// Compiled regexes a [`StandardCatalog`] keeps before evicting.
pub const DEFAULT_REGEX_CACHE_CAPACITY: usize = 1024;

/// Errors from compiling or evaluating a standard match rule.
///
/// Returned through [`catu::Comparator::compare`], where the core wraps it in
/// [`catu::ClaimError::Comparison`].
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The match-type label is not a standard match type.
    #[error("unknown match type label {0}")]
    UnknownMatchType(i64),

    /// The value shape does not suit the match type.
    #[error("{kind} requires a {expected} value")]
    WrongShape {
        /// The match type.
        kind: MatchKind,
        /// The required shape: `"string"` or `"sequence"`.
        expected: &'static str,
    },

    /// A regex rule declared an empty sequence.
    #[error("regex-match requires a pattern as its first element")]
    MissingPattern,

    /// A pattern exceeds the length limit.
    #[error("pattern length is {len}, but maximum allowed is {max}")]
    PatternTooLong {
        /// Actual length of the pattern.
        len: usize,
        /// Maximum allowed length.
        max: usize,
    },

    /// A regex pattern failed to compile.
    #[error("invalid pattern \"{pattern}\": {source}")]
    InvalidPattern {
        /// The pattern that failed to compile.
        pattern: String,
        /// The regex compiler's error.
        #[source]
        source: regex::Error,
    },

    /// A digest value is not valid hex.
    #[error("invalid digest \"{digest}\": {source}")]
    InvalidDigest {
        /// The declared digest.
        digest: String,
        /// The hex decoder's error.
        #[source]
        source: hex::FromHexError,
    },
}
