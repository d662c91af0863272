//! `StandardCatalog` — The standard match types behind the core's seams

use async_trait::async_trait;
use dashmap::DashMap;
use regex::Regex;
use tracing::{debug, trace};

use catu::{BoxError, Comparator, MatchLabels, MatchType, MatchValue};

use crate::matcher::{compile_regex, regex_pattern};
use crate::{CatalogError, MatchKind, ValueMatcher, DEFAULT_REGEX_CACHE_CAPACITY};

/// The standard CATU match-type catalog.
///
/// Compiled regexes are cached by pattern, so a claim evaluated for every request
/// compiles its pattern once. The cache is shared by all evaluations using this
/// catalog and holds at most [`capacity`](Self::capacity) patterns; when full, a
/// tenth of it is evicted before the next insert.
///
/// # Example
///
/// ```
/// use catu::{Comparator, MatchLabels, MatchType, MatchValue};
/// use catu_catalog::StandardCatalog;
///
/// let catalog = StandardCatalog::new();
/// let prefix = catalog.match_type("prefix-match").unwrap();
/// assert_eq!(prefix, MatchType::new(1));
/// assert!(catalog.validate(prefix, &MatchValue::from("/api")));
/// assert!(!catalog.validate(prefix, &MatchValue::from(vec!["/api"])));
/// ```
#[derive(Debug)]
pub struct StandardCatalog {
    regex_cache: DashMap<String, Regex>,
    capacity: usize,
}

impl Default for StandardCatalog {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_REGEX_CACHE_CAPACITY)
    }
}

impl StandardCatalog {
    /// Create a catalog with an empty regex cache of the default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog caching at most `capacity` compiled regexes.
    ///
    /// A capacity of 0 disables the cache.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            regex_cache: DashMap::new(),
            capacity,
        }
    }

    /// Maximum number of cached regexes.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of compiled regexes currently cached.
    #[must_use]
    pub fn cached_patterns(&self) -> usize {
        self.regex_cache.len()
    }

    /// Drop every cached regex.
    pub fn clear_cache(&self) {
        self.regex_cache.clear();
    }

    /// Compare synchronously. [`Comparator::compare`] delegates here.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if `match_type` is not standard or the value
    /// cannot be compiled.
    pub fn compare_now(
        &self,
        actual: &str,
        match_type: MatchType,
        value: &MatchValue,
    ) -> Result<bool, CatalogError> {
        let kind = MatchKind::from_label(match_type.label())
            .ok_or(CatalogError::UnknownMatchType(match_type.label()))?;

        if kind == MatchKind::Regex {
            return self.regex_match(actual, value);
        }
        Ok(ValueMatcher::compile(kind, value)?.matches(actual))
    }

    fn regex_match(&self, actual: &str, value: &MatchValue) -> Result<bool, CatalogError> {
        let pattern = regex_pattern(value)?;
        if let Some(re) = self.regex_cache.get(pattern) {
            return Ok(re.is_match(actual));
        }

        let re = compile_regex(pattern)?;
        trace!(pattern, "compiled regex");
        let matched = re.is_match(actual);
        if self.capacity > 0 {
            if self.regex_cache.len() >= self.capacity {
                self.evict_some();
            }
            self.regex_cache.insert(pattern.to_owned(), re);
        }
        Ok(matched)
    }

    /// Remove a tenth of the capacity (at least one entry).
    fn evict_some(&self) {
        let to_remove = (self.capacity / 10).max(1);
        let mut removed = 0;
        self.regex_cache.retain(|_, _| {
            if removed < to_remove {
                removed += 1;
                false
            } else {
                true
            }
        });
        debug!(removed, capacity = self.capacity, "evicted cached regexes");
    }
}

impl MatchLabels for StandardCatalog {
    fn match_type(&self, name: &str) -> Option<MatchType> {
        MatchKind::from_name(name).map(MatchType::from)
    }

    fn match_type_name(&self, match_type: MatchType) -> Option<&str> {
        MatchKind::from_label(match_type.label()).map(MatchKind::name)
    }
}

#[async_trait]
impl Comparator for StandardCatalog {
    fn validate(&self, match_type: MatchType, value: &MatchValue) -> bool {
        MatchKind::from_label(match_type.label()).is_some_and(|kind| {
            if kind.takes_sequence() {
                value.is_sequence()
            } else {
                value.is_single()
            }
        })
    }

    async fn compare(
        &self,
        actual: &str,
        match_type: MatchType,
        value: &MatchValue,
    ) -> Result<bool, BoxError> {
        Ok(self.compare_now(actual, match_type, value)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(kind: MatchKind) -> MatchType {
        kind.into()
    }

    #[test]
    fn labels_cover_all_kinds() {
        let catalog = StandardCatalog::new();
        for kind in MatchKind::ALL {
            assert_eq!(catalog.match_type(kind.name()), Some(t(kind)));
            assert_eq!(catalog.match_type_name(t(kind)), Some(kind.name()));
        }
        assert_eq!(catalog.match_type("glob-match"), None);
        assert!(!catalog.knows(MatchType::new(5)));
    }

    #[test]
    fn validate_checks_shape() {
        let catalog = StandardCatalog::new();
        assert!(catalog.validate(t(MatchKind::Regex), &vec!["^a"].into()));
        assert!(!catalog.validate(t(MatchKind::Regex), &"^a".into()));
        assert!(catalog.validate(t(MatchKind::Sha256), &"00".into()));
        assert!(!catalog.validate(t(MatchKind::Exact), &vec!["a"].into()));
        assert!(!catalog.validate(MatchType::new(77), &"a".into()));
    }

    #[tokio::test]
    async fn compare_dispatches_by_kind() {
        let catalog = StandardCatalog::new();
        assert!(catalog
            .compare("https", t(MatchKind::Exact), &"https".into())
            .await
            .unwrap());
        assert!(!catalog
            .compare("/vod/a", t(MatchKind::Prefix), &"/live/".into())
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn unknown_label_fails_comparison() {
        let catalog = StandardCatalog::new();
        let err = catalog
            .compare("x", MatchType::new(9), &"x".into())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "unknown match type label 9");
    }

    #[test]
    fn regexes_are_cached() {
        let catalog = StandardCatalog::new();
        let rule: MatchValue = vec![r"^/v\d+/"].into();
        assert!(catalog
            .compare_now("/v1/a", t(MatchKind::Regex), &rule)
            .unwrap());
        assert!(!catalog
            .compare_now("/x/a", t(MatchKind::Regex), &rule)
            .unwrap());
        assert_eq!(catalog.cached_patterns(), 1);
    }

    #[test]
    fn regex_cache_never_exceeds_capacity() {
        let catalog = StandardCatalog::with_capacity(4);
        for i in 0..20 {
            let rule: MatchValue = vec![format!("^/p{i}/")].into();
            assert!(catalog
                .compare_now(&format!("/p{i}/a"), t(MatchKind::Regex), &rule)
                .unwrap());
            assert!(catalog.cached_patterns() <= 4, "after {i}: {}", catalog.cached_patterns());
        }
        assert!(catalog.cached_patterns() > 0);
    }

    #[test]
    fn zero_capacity_disables_cache() {
        let catalog = StandardCatalog::with_capacity(0);
        let rule: MatchValue = vec!["^a"].into();
        assert!(catalog.compare_now("ab", t(MatchKind::Regex), &rule).unwrap());
        assert_eq!(catalog.cached_patterns(), 0);
    }

    #[test]
    fn clear_cache_empties_cache() {
        let catalog = StandardCatalog::new();
        assert_eq!(catalog.capacity(), DEFAULT_REGEX_CACHE_CAPACITY);
        for pattern in ["^a", "^b", "^c"] {
            catalog
                .compare_now("a", t(MatchKind::Regex), &vec![pattern].into())
                .unwrap();
        }
        assert_eq!(catalog.cached_patterns(), 3);
        catalog.clear_cache();
        assert_eq!(catalog.cached_patterns(), 0);
        assert!(catalog
            .compare_now("a", t(MatchKind::Regex), &vec!["^a"].into())
            .unwrap());
    }

    #[test]
    fn invalid_regex_is_not_cached() {
        let catalog = StandardCatalog::new();
        let err = catalog
            .compare_now("a", t(MatchKind::Regex), &vec!["(unclosed"].into())
            .unwrap_err();
        assert!(matches!(err, CatalogError::InvalidPattern { .. }));
        assert_eq!(catalog.cached_patterns(), 0);
    }
}
