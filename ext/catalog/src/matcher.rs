//! `ValueMatcher` — Compiled form of one declared rule
//!
//! A declared `(MatchKind, MatchValue)` pair compiles into a `ValueMatcher`,
//! which then answers `matches(&str)` without further allocation (digests aside).

use regex::Regex;
use sha2::{Digest, Sha256, Sha512_256};

use catu::MatchValue;

use crate::{CatalogError, MatchKind, MAX_PATTERN_LENGTH, MAX_REGEX_PATTERN_LENGTH};

/// Digest algorithm of a digest match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigestAlgorithm {
    /// SHA-256.
    Sha256,
    /// SHA-512/256 (SHA-512 truncated to 256 bits, distinct IV).
    Sha512_256,
}

impl DigestAlgorithm {
    /// Digest of `input`.
    #[must_use]
    pub fn digest(self, input: &[u8]) -> Vec<u8> {
        match self {
            Self::Sha256 => Sha256::digest(input).to_vec(),
            Self::Sha512_256 => Sha512_256::digest(input).to_vec(),
        }
    }
}

/// A compiled match rule.
///
/// # Example
///
/// ```
/// use catu_catalog::{MatchKind, ValueMatcher};
///
/// let m = ValueMatcher::compile(MatchKind::Prefix, &"/live/".into()).unwrap();
/// assert!(m.matches("/live/ch1.m3u8"));
/// assert!(!m.matches("/vod/ch1.m3u8"));
///
/// let m = ValueMatcher::compile(MatchKind::Regex, &vec![r"^/v\d+/"].into()).unwrap();
/// assert!(m.matches("/v2/a"));
/// ```
#[derive(Debug, Clone)]
pub enum ValueMatcher {
    /// Exact string equality.
    Exact(String),
    /// String prefix match.
    Prefix(String),
    /// String suffix match.
    Suffix(String),
    /// Substring contains match.
    Contains(String),
    /// Regular expression search (RE2 semantics, linear time).
    Regex(Regex),
    /// Digest equality.
    Digest {
        /// Hash function applied to the input.
        algorithm: DigestAlgorithm,
        /// Expected digest bytes.
        expected: Vec<u8>,
    },
}

impl ValueMatcher {
    /// Compile a declared value for `kind`.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::WrongShape`] if the value shape does not suit `kind`
    /// - [`CatalogError::PatternTooLong`] if a pattern exceeds the length limits
    /// - [`CatalogError::MissingPattern`] for an empty regex sequence
    /// - [`CatalogError::InvalidPattern`] for a regex that does not compile
    /// - [`CatalogError::InvalidDigest`] for a digest that is not hex
    pub fn compile(kind: MatchKind, value: &MatchValue) -> Result<Self, CatalogError> {
        match kind {
            MatchKind::Exact => Ok(Self::Exact(single(kind, value)?.to_owned())),
            MatchKind::Prefix => Ok(Self::Prefix(single(kind, value)?.to_owned())),
            MatchKind::Suffix => Ok(Self::Suffix(single(kind, value)?.to_owned())),
            MatchKind::Contains => Ok(Self::Contains(single(kind, value)?.to_owned())),
            MatchKind::Regex => Self::regex(regex_pattern(value)?),
            MatchKind::Sha256 => Self::digest(DigestAlgorithm::Sha256, single(kind, value)?),
            MatchKind::Sha512_256 => {
                Self::digest(DigestAlgorithm::Sha512_256, single(kind, value)?)
            }
        }
    }

    /// Compile a regex matcher.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::PatternTooLong`] or [`CatalogError::InvalidPattern`].
    pub fn regex(pattern: &str) -> Result<Self, CatalogError> {
        compile_regex(pattern).map(Self::Regex)
    }

    fn digest(algorithm: DigestAlgorithm, hex_digest: &str) -> Result<Self, CatalogError> {
        let expected = hex::decode(hex_digest).map_err(|e| CatalogError::InvalidDigest {
            digest: hex_digest.to_owned(),
            source: e,
        })?;
        Ok(Self::Digest {
            algorithm,
            expected,
        })
    }

    /// Check an extracted URI value.
    #[must_use]
    pub fn matches(&self, input: &str) -> bool {
        match self {
            Self::Exact(v) => input == v,
            Self::Prefix(v) => input.starts_with(v.as_str()),
            Self::Suffix(v) => input.ends_with(v.as_str()),
            Self::Contains(v) => input.contains(v.as_str()),
            Self::Regex(re) => re.is_match(input),
            Self::Digest {
                algorithm,
                expected,
            } => algorithm.digest(input.as_bytes()) == *expected,
        }
    }
}

/// The string of a single-valued rule, length-checked.
fn single(kind: MatchKind, value: &MatchValue) -> Result<&str, CatalogError> {
    let s = value.as_str().ok_or(CatalogError::WrongShape {
        kind,
        expected: "string",
    })?;
    check_length(s, MAX_PATTERN_LENGTH)?;
    Ok(s)
}

/// The pattern of a regex rule: the first element of its sequence.
pub(crate) fn regex_pattern(value: &MatchValue) -> Result<&str, CatalogError> {
    let sequence = value.as_sequence().ok_or(CatalogError::WrongShape {
        kind: MatchKind::Regex,
        expected: "sequence",
    })?;
    sequence
        .first()
        .map(String::as_str)
        .ok_or(CatalogError::MissingPattern)
}

pub(crate) fn compile_regex(pattern: &str) -> Result<Regex, CatalogError> {
    check_length(pattern, MAX_REGEX_PATTERN_LENGTH)?;
    Regex::new(pattern).map_err(|e| CatalogError::InvalidPattern {
        pattern: pattern.to_owned(),
        source: e,
    })
}

fn check_length(pattern: &str, max: usize) -> Result<(), CatalogError> {
    if pattern.len() > max {
        return Err(CatalogError::PatternTooLong {
            len: pattern.len(),
            max,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compile(kind: MatchKind, value: impl Into<MatchValue>) -> ValueMatcher {
        ValueMatcher::compile(kind, &value.into()).unwrap()
    }

    #[test]
    fn string_kinds() {
        assert!(compile(MatchKind::Exact, "https").matches("https"));
        assert!(!compile(MatchKind::Exact, "https").matches("HTTPS"));
        assert!(compile(MatchKind::Prefix, "/api/").matches("/api/users"));
        assert!(!compile(MatchKind::Prefix, "/api/").matches("/users"));
        assert!(compile(MatchKind::Suffix, ".example.com").matches("cdn.example.com"));
        assert!(!compile(MatchKind::Suffix, ".example.com").matches("example.org"));
        assert!(compile(MatchKind::Contains, "live").matches("/a/live/b"));
        assert!(!compile(MatchKind::Contains, "live").matches("/a/vod/b"));
    }

    #[test]
    fn regex_is_unanchored_search() {
        let m = compile(MatchKind::Regex, vec![r"seg_\d+"]);
        assert!(m.matches("/v1/seg_0042.ts"));
        assert!(!m.matches("/v1/init.mp4"));

        let m = compile(MatchKind::Regex, vec![r"^/v\d+/[^/]+\.m3u8$", "ignored"]);
        assert!(m.matches("/v3/master.m3u8"));
        assert!(!m.matches("/x/v3/master.m3u8"));
    }

    #[test]
    fn sha256_digest() {
        // sha256("abc")
        let m = compile(
            MatchKind::Sha256,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad",
        );
        assert!(m.matches("abc"));
        assert!(!m.matches("abd"));
    }

    #[test]
    fn sha512_256_digest() {
        // sha512/256("abc")
        let m = compile(
            MatchKind::Sha512_256,
            "53048E2681941EF99B2E29B76B4C7DABE4C2D0C634FC6D46E0E2F13107E7AF23",
        );
        assert!(m.matches("abc"));
        assert!(!m.matches(""));
    }

    #[test]
    fn wrong_shape_is_rejected() {
        let err = ValueMatcher::compile(MatchKind::Regex, &"^x".into()).unwrap_err();
        assert!(matches!(err, CatalogError::WrongShape { expected: "sequence", .. }));

        let err = ValueMatcher::compile(MatchKind::Exact, &vec!["x"].into()).unwrap_err();
        assert!(matches!(err, CatalogError::WrongShape { expected: "string", .. }));
    }

    #[test]
    fn invalid_regex_is_rejected() {
        let err = ValueMatcher::compile(MatchKind::Regex, &vec!["[bad"].into()).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidPattern { .. }));
        assert!(err.to_string().starts_with("invalid pattern \"[bad\""));
    }

    #[test]
    fn empty_regex_sequence_is_rejected() {
        let err =
            ValueMatcher::compile(MatchKind::Regex, &MatchValue::Sequence(vec![])).unwrap_err();
        assert!(matches!(err, CatalogError::MissingPattern));
    }

    #[test]
    fn non_hex_digest_is_rejected() {
        let err = ValueMatcher::compile(MatchKind::Sha256, &"not-hex".into()).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidDigest { .. }));
    }

    #[test]
    fn length_limits() {
        let long = "a".repeat(MAX_PATTERN_LENGTH + 1);
        let err = ValueMatcher::compile(MatchKind::Prefix, &long.into()).unwrap_err();
        assert!(matches!(err, CatalogError::PatternTooLong { max: MAX_PATTERN_LENGTH, .. }));

        let long = "a".repeat(MAX_REGEX_PATTERN_LENGTH + 1);
        let err = ValueMatcher::regex(&long).unwrap_err();
        assert!(matches!(err, CatalogError::PatternTooLong { max: MAX_REGEX_PATTERN_LENGTH, .. }));
    }
}
