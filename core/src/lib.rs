//! catu - URI claim matching for Common Access Tokens
//!
//! A CATU claim restricts which request URIs a token authorizes. For each of nine
//! URI components it declares one comparison rule: a match type plus a match value.
//! Verifying a request checks every declared rule against the actual URI.
//!
//! # Architecture
//!
//! - [`UriComponent`] — The nine components, with their fixed wire labels (0–8)
//! - [`MatchType`] / [`MatchValue`] — An opaque match-type label and its declared value
//! - [`ComponentRules`] / [`ClaimMap`] — Insertion-ordered rule storage
//! - [`Claim`] — Built once from one of four input shapes, read-only during evaluation
//! - [`extract`] / [`canonical_query`] — Component values derived from a [`Url`](url::Url)
//! - [`Comparator`] — Injected, asynchronous comparison seam (the match-type catalog)
//! - [`MatchLabels`] — Injected name ↔ label table for match types
//!
//! # Key Design Insights
//!
//! 1. **The core never knows what a match type means.** Comparison and shape validation
//!    live behind [`Comparator`]; names live behind [`MatchLabels`]. Alternative catalogs
//!    plug in without touching the core.
//!
//! 2. **First rule wins, per component.** Only the first inserted rule of each
//!    component is consulted. Order is guaranteed by [`indexmap::IndexMap`].
//!
//! 3. **Short-circuit AND, strictly left to right.** Components are evaluated in
//!    insertion order; the first `false` stops evaluation and no later comparator
//!    call is made.
//!
//! # Example
//!
//! ```ignore
//! use catu::prelude::*;
//! use catu_catalog::StandardCatalog;
//!
//! let catalog = StandardCatalog::new();
//! let claim = Claim::from_named(
//!     [
//!         ("scheme", vec![("exact-match", MatchValue::from("https"))]),
//!         ("path", vec![("prefix-match", MatchValue::from("/content/"))]),
//!     ],
//!     &catalog,
//! )?;
//!
//! let uri = Url::parse("https://cdn.example.com/content/a.m3u8")?;
//! assert!(claim.matches(&uri, &catalog).await?);
//! ```

// ═══════════════════════════════════════════════════════════════════════════════
// Modules
// ═══════════════════════════════════════════════════════════════════════════════

mod claim;
mod comparator;
mod component;
mod extract;
mod labels;
mod match_value;
mod query;
mod runner;
mod trace;

// ═══════════════════════════════════════════════════════════════════════════════
// Public API
// ═══════════════════════════════════════════════════════════════════════════════

pub use claim::{Claim, ClaimMap, ComponentRules, LabeledClaim, NamedClaim};
pub use comparator::{BoxError, Comparator};
pub use component::UriComponent;
pub use extract::{extension, extract, filename, parent_path, stem};
pub use labels::MatchLabels;
pub use match_value::{MatchRule, MatchType, MatchValue};
pub use query::{canonical_query, TOKEN_QUERY_PARAM};
pub use trace::{ClaimTrace, ComponentStep};

pub use url::Url;

// ═══════════════════════════════════════════════════════════════════════════════
// Prelude
// ═══════════════════════════════════════════════════════════════════════════════

/// Prelude module for convenient imports.
///
/// ```
/// use catu::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        // Claim store
        Claim,
        ClaimError,
        ClaimMap,
        // Trace types
        ClaimTrace,
        // Seams
        Comparator,
        ComponentRules,
        ComponentStep,
        MatchLabels,
        // Values
        MatchRule,
        MatchType,
        MatchValue,
        UriComponent,
        Url,
    };
}

// ═══════════════════════════════════════════════════════════════════════════════
// Errors
// ═══════════════════════════════════════════════════════════════════════════════

/// Claim validation error.
///
/// Every failure the core can raise is a claim-validation failure: a malformed
/// claim, a value whose shape does not suit its match type, or a comparison that
/// could not be performed. A clean `Ok(false)` from [`Claim::matches`] is reserved
/// for a well-formed claim whose rules the URI does not satisfy.
#[derive(Debug, thiserror::Error)]
pub enum ClaimError {
    /// A URI component label or name is not one of the nine known components.
    #[error("unknown URI component \"{0}\"")]
    UnknownUriComponent(String),

    /// A match-type label or name is not present in the match-type table.
    #[error("unknown match type \"{0}\"")]
    UnknownMatchType(String),

    /// The declared value has the wrong shape for its match type.
    #[error("invalid match value type for {match_type}")]
    InvalidMatchValue {
        /// Name (or label, if unnamed) of the offending match type.
        match_type: String,
    },

    /// A component was declared without any rule.
    #[error("URI component \"{component}\" declares no match rule")]
    EmptyComponent {
        /// The component with an empty rule set.
        component: UriComponent,
    },

    /// The comparator could not perform the comparison.
    #[error("{match_type} comparison failed: {source}")]
    Comparison {
        /// Name (or label, if unnamed) of the match type being compared.
        match_type: String,
        /// The comparator's own failure.
        #[source]
        source: BoxError,
    },

    /// A name-keyed claim document does not have the expected structure.
    #[error("invalid claim document: {0}")]
    InvalidDocument(String),
}

/// Result alias used throughout the crate.
pub type Result<T, E = ClaimError> = std::result::Result<T, E>;
