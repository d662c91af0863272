//! `Claim` — The CATU claim store and its four construction routes
//!
//! Whatever shape the claim arrives in, it is normalized once into a
//! [`ClaimMap`]: components keyed by [`UriComponent`], rules keyed by
//! [`MatchType`], both in insertion order.
//!
//! | Route | Input | Translation |
//! |-------|-------|-------------|
//! | [`Claim::from_labeled`] | wire labels, nested | labels checked against both tables |
//! | [`Claim::from_dict`] | name-keyed JSON record | names translated (feature `serde`) |
//! | [`Claim::from_named`] | name-keyed map of maps | names translated |
//! | [`Claim::from_map`] | a [`ClaimMap`] | none (identity) |

use indexmap::IndexMap;
use tracing::trace;

use crate::labels::display_name;
use crate::{ClaimError, MatchLabels, MatchRule, MatchType, MatchValue, Result, UriComponent};

/// The rules declared for one component, in insertion order.
///
/// Only the [`first`](Self::first) entry is ever evaluated. Later entries are kept
/// (they survive projections) but never consulted.
///
/// Equality is order-sensitive: the same rules in a different order select a
/// different first rule.
#[derive(Debug, Clone, Default, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ComponentRules(IndexMap<MatchType, MatchValue>);

impl ComponentRules {
    /// Create an empty rule set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule. Re-inserting an existing match type replaces its value in place.
    pub fn insert(&mut self, match_type: MatchType, value: impl Into<MatchValue>) {
        self.0.insert(match_type, value.into());
    }

    /// Builder form of [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, match_type: MatchType, value: impl Into<MatchValue>) -> Self {
        self.insert(match_type, value);
        self
    }

    /// The rule this component is evaluated by: the first one inserted.
    #[must_use]
    pub fn first(&self) -> Option<MatchRule<'_>> {
        self.0.first().map(|(match_type, value)| MatchRule {
            match_type: *match_type,
            value,
        })
    }

    /// Look up the value declared for a match type.
    #[must_use]
    pub fn get(&self, match_type: MatchType) -> Option<&MatchValue> {
        self.0.get(&match_type)
    }

    /// Iterate over all declared rules, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = MatchRule<'_>> {
        self.0.iter().map(|(match_type, value)| MatchRule {
            match_type: *match_type,
            value,
        })
    }

    /// Number of declared rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no rule is declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl PartialEq for ComponentRules {
    fn eq(&self, other: &Self) -> bool {
        self.0.iter().eq(other.0.iter())
    }
}

impl FromIterator<(MatchType, MatchValue)> for ComponentRules {
    fn from_iter<I: IntoIterator<Item = (MatchType, MatchValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Canonical claim storage: component → rules, both insertion-ordered.
pub type ClaimMap = IndexMap<UriComponent, ComponentRules>;

/// Name-keyed projection of a claim (`"path" → "prefix-match" → value`).
pub type NamedClaim = IndexMap<String, IndexMap<String, MatchValue>>;

/// Wire-label projection of a claim (`3 → 1 → value`).
pub type LabeledClaim = IndexMap<i64, IndexMap<i64, MatchValue>>;

/// A CATU claim: the URI rules carried by one token.
///
/// Built once through one of the constructors, then evaluated with
/// [`matches`](Self::matches). Evaluation takes `&self` and keeps no state, so one
/// claim can serve any number of concurrent evaluations.
///
/// # Example
///
/// ```
/// use catu::{Claim, ClaimMap, ComponentRules, MatchType, UriComponent};
///
/// let mut map = ClaimMap::new();
/// map.insert(
///     UriComponent::Host,
///     ComponentRules::new().with(MatchType::new(2), ".example.com"),
/// );
/// let claim = Claim::from_map(map);
/// assert_eq!(claim.len(), 1);
/// assert!(claim.payload().contains_key(&UriComponent::Host));
/// ```
///
/// Two claims are equal when they declare the same components and rules in the
/// same order, i.e. when they evaluate identically.
#[derive(Debug, Clone, Default, Eq)]
pub struct Claim {
    map: ClaimMap,
}

impl Claim {
    /// Create an empty claim. An empty claim matches every URI.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from wire labels: outer keys are component labels, inner keys are
    /// match-type labels.
    ///
    /// This is the shape a claim has straight out of a token decoder.
    ///
    /// # Errors
    ///
    /// Returns [`ClaimError::UnknownUriComponent`] or [`ClaimError::UnknownMatchType`]
    /// for a label missing from the respective table.
    pub fn from_labeled<O, I, L>(labeled: O, labels: &L) -> Result<Self>
    where
        O: IntoIterator<Item = (i64, I)>,
        I: IntoIterator<Item = (i64, MatchValue)>,
        L: MatchLabels + ?Sized,
    {
        let mut map = ClaimMap::new();
        for (component_label, rules) in labeled {
            let component = UriComponent::try_from(component_label)?;
            let mut translated = ComponentRules::new();
            for (match_label, value) in rules {
                let match_type = MatchType::new(match_label);
                if !labels.knows(match_type) {
                    return Err(ClaimError::UnknownMatchType(match_label.to_string()));
                }
                trace!(%component, %match_type, "claim rule from label");
                translated.insert(match_type, value);
            }
            map.insert(component, translated);
        }
        Ok(Self { map })
    }

    /// Build from names: outer keys are component names (`"path"`), inner keys are
    /// match-type names (`"prefix-match"`).
    ///
    /// Accepts any nested iterable, e.g. a [`NamedClaim`], a `BTreeMap` of maps, or
    /// arrays of tuples.
    ///
    /// # Errors
    ///
    /// Returns [`ClaimError::UnknownUriComponent`] or [`ClaimError::UnknownMatchType`]
    /// for a name missing from the respective table.
    pub fn from_named<O, K, I, M, L>(named: O, labels: &L) -> Result<Self>
    where
        O: IntoIterator<Item = (K, I)>,
        K: AsRef<str>,
        I: IntoIterator<Item = (M, MatchValue)>,
        M: AsRef<str>,
        L: MatchLabels + ?Sized,
    {
        let mut map = ClaimMap::new();
        for (component_name, rules) in named {
            let component: UriComponent = component_name.as_ref().parse()?;
            let mut translated = ComponentRules::new();
            for (match_name, value) in rules {
                let match_name = match_name.as_ref();
                let match_type = labels
                    .match_type(match_name)
                    .ok_or_else(|| ClaimError::UnknownMatchType(match_name.to_owned()))?;
                trace!(%component, match_type = match_name, "claim rule from name");
                translated.insert(match_type, value);
            }
            map.insert(component, translated);
        }
        Ok(Self { map })
    }

    /// Build from a name-keyed JSON record, e.g.
    /// `{"path": {"prefix-match": "/content/"}}`.
    ///
    /// Values must be strings or arrays of strings.
    ///
    /// # Errors
    ///
    /// Returns [`ClaimError::InvalidDocument`] if the record is not an object of
    /// objects or a value has the wrong JSON type, and the unknown-label errors of
    /// [`from_named`](Self::from_named).
    #[cfg(feature = "serde")]
    pub fn from_dict<L>(dict: &serde_json::Value, labels: &L) -> Result<Self>
    where
        L: MatchLabels + ?Sized,
    {
        let outer = dict
            .as_object()
            .ok_or_else(|| ClaimError::InvalidDocument("claim must be an object".into()))?;

        let mut named = NamedClaim::with_capacity(outer.len());
        for (component, rules) in outer {
            let inner = rules.as_object().ok_or_else(|| {
                ClaimError::InvalidDocument(format!("rules for \"{component}\" must be an object"))
            })?;
            let mut values = IndexMap::with_capacity(inner.len());
            for (match_name, value) in inner {
                let value: MatchValue = serde_json::from_value(value.clone()).map_err(|_| {
                    ClaimError::InvalidDocument(format!(
                        "value of \"{component}.{match_name}\" must be a string or an array of strings"
                    ))
                })?;
                values.insert(match_name.clone(), value);
            }
            named.insert(component.clone(), values);
        }
        Self::from_named(named, labels)
    }

    /// Adopt an already-canonical map as-is. No translation, no validation.
    #[must_use]
    pub fn from_map(map: ClaimMap) -> Self {
        Self { map }
    }

    /// Project to the name-keyed shape accepted by [`from_named`](Self::from_named).
    ///
    /// # Errors
    ///
    /// Returns [`ClaimError::UnknownMatchType`] if a stored match type is missing
    /// from `labels` (possible only for claims adopted through
    /// [`from_map`](Self::from_map) or edited via [`payload_mut`](Self::payload_mut)).
    pub fn to_named<L>(&self, labels: &L) -> Result<NamedClaim>
    where
        L: MatchLabels + ?Sized,
    {
        self.map
            .iter()
            .map(|(component, rules)| {
                let rules = rules
                    .iter()
                    .map(|rule| {
                        let name = labels.match_type_name(rule.match_type).ok_or_else(|| {
                            ClaimError::UnknownMatchType(display_name(labels, rule.match_type))
                        })?;
                        Ok((name.to_owned(), rule.value.clone()))
                    })
                    .collect::<Result<IndexMap<_, _>>>()?;
                Ok((component.name().to_owned(), rules))
            })
            .collect()
    }

    /// Project to a name-keyed JSON record, the shape accepted by
    /// [`from_dict`](Self::from_dict).
    ///
    /// # Errors
    ///
    /// Same as [`to_named`](Self::to_named).
    #[cfg(feature = "serde")]
    pub fn to_dict<L>(&self, labels: &L) -> Result<serde_json::Value>
    where
        L: MatchLabels + ?Sized,
    {
        let named = self.to_named(labels)?;
        serde_json::to_value(named).map_err(|e| ClaimError::InvalidDocument(e.to_string()))
    }

    /// Project to wire labels, the shape accepted by
    /// [`from_labeled`](Self::from_labeled).
    #[must_use]
    pub fn to_labeled(&self) -> LabeledClaim {
        self.map
            .iter()
            .map(|(component, rules)| {
                let rules = rules
                    .iter()
                    .map(|rule| (rule.match_type.label(), rule.value.clone()))
                    .collect();
                (component.label(), rules)
            })
            .collect()
    }

    /// The internal map, by reference.
    #[must_use]
    pub fn payload(&self) -> &ClaimMap {
        &self.map
    }

    /// The internal map, mutably. Edits here change the claim itself.
    pub fn payload_mut(&mut self) -> &mut ClaimMap {
        &mut self.map
    }

    /// Consume the claim, returning its map.
    #[must_use]
    pub fn into_map(self) -> ClaimMap {
        self.map
    }

    /// Declared components, in evaluation order.
    pub fn components(&self) -> impl Iterator<Item = UriComponent> + '_ {
        self.map.keys().copied()
    }

    /// Rules declared for a component.
    #[must_use]
    pub fn rules(&self, component: UriComponent) -> Option<&ComponentRules> {
        self.map.get(&component)
    }

    /// Number of declared components.
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if no component is declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl PartialEq for Claim {
    fn eq(&self, other: &Self) -> bool {
        self.map.iter().eq(other.map.iter())
    }
}

impl From<ClaimMap> for Claim {
    fn from(map: ClaimMap) -> Self {
        Self::from_map(map)
    }
}
