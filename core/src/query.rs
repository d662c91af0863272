//! Query canonicalization
//!
//! Query parameters are an unordered set as far as a claim is concerned, and the
//! `cat` parameter carries the token itself. Both the request query and a declared
//! query value go through [`canonical_query`] before comparison, so
//! `?cat=T&a=1&b=2` and `b=2&a=1` compare equal.

use std::borrow::Cow;

use url::form_urlencoded;

/// Query parameter that carries the token. Never part of the comparison.
pub const TOKEN_QUERY_PARAM: &str = "cat";

/// Canonicalize a raw query string.
///
/// 1. Strip one leading `?`, if present.
/// 2. Parse as `application/x-www-form-urlencoded` pairs.
/// 3. Drop every pair whose key is [`TOKEN_QUERY_PARAM`].
/// 4. Stable-sort by key (UTF-16 code unit order; equal keys keep their order).
/// 5. Re-serialize.
///
/// # Example
///
/// ```
/// use catu::canonical_query;
///
/// assert_eq!(canonical_query("?cat=T0K3N&z=9&a=1&a=0"), "a=1&a=0&z=9");
/// assert_eq!(canonical_query("b=2&a=1"), "a=1&b=2");
/// assert_eq!(canonical_query(""), "");
/// ```
#[must_use]
pub fn canonical_query(raw: &str) -> String {
    let raw = raw.strip_prefix('?').unwrap_or(raw);

    let mut pairs: Vec<(Cow<'_, str>, Cow<'_, str>)> = form_urlencoded::parse(raw.as_bytes())
        .filter(|(key, _)| key != TOKEN_QUERY_PARAM)
        .collect();
    pairs.sort_by(|(a, _), (b, _)| a.encode_utf16().cmp(b.encode_utf16()));

    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish()
}
