//! Conformance test fixture runner
//!
//! Loads YAML fixtures and runs them against a claim evaluated with the standard
//! catalog.
//!
//! ```yaml
//! name: prefix_path
//! description: path prefix restricts the token to one directory
//! claim:
//!   path:
//!     prefix-match: /vod/
//! cases:
//!   - name: inside
//!     uri: https://cdn.example.com/vod/a.ts
//!     expect: true
//!   - name: regex rule with a string value
//!     uri: https://cdn.example.com/vod/a.ts
//!     error: invalid match value type
//! ```

use catu::prelude::*;
use catu_catalog::StandardCatalog;
use serde::Deserialize;

/// A complete test fixture
#[derive(Debug, Deserialize)]
pub struct Fixture {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Name-keyed claim document, the shape accepted by [`Claim::from_dict`].
    pub claim: serde_json::Value,
    pub cases: Vec<TestCase>,
}

/// Test case
///
/// Exactly one of `expect` and `error` is set. `error` is matched as a substring
/// of the error message.
#[derive(Debug, Deserialize)]
pub struct TestCase {
    pub name: String,
    pub uri: String,
    #[serde(default)]
    pub expect: Option<bool>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Outcome of evaluating one case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Clean boolean result.
    Matched(bool),
    /// Construction, parse or evaluation error (its message).
    Error(String),
}

impl TestCase {
    /// The outcome this case declares.
    ///
    /// A case declaring neither `expect` nor `error` is itself malformed and
    /// expects an error no evaluation can produce.
    #[must_use]
    pub fn expected(&self) -> Outcome {
        match (&self.error, self.expect) {
            (Some(message), _) => Outcome::Error(message.clone()),
            (None, Some(matched)) => Outcome::Matched(matched),
            (None, None) => Outcome::Error("case declares neither expect nor error".into()),
        }
    }
}

impl Outcome {
    /// Returns `true` if `self` (actual) satisfies `expected`.
    fn satisfies(&self, expected: &Outcome) -> bool {
        match (self, expected) {
            (Outcome::Matched(a), Outcome::Matched(e)) => a == e,
            (Outcome::Error(a), Outcome::Error(e)) => a.contains(e.as_str()),
            _ => false,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Runner
// ═══════════════════════════════════════════════════════════════════════════════

/// Result of running a single test case
#[derive(Debug)]
pub struct CaseResult {
    pub case_name: String,
    pub passed: bool,
    pub expected: Outcome,
    pub actual: Outcome,
}

impl Fixture {
    /// Parse a fixture from YAML
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Parse multiple fixtures from a YAML file with `---` separators
    pub fn from_yaml_multi(yaml: &str) -> Result<Vec<Self>, serde_yaml::Error> {
        let mut fixtures = Vec::new();
        for doc in serde_yaml::Deserializer::from_str(yaml) {
            fixtures.push(Self::deserialize(doc)?);
        }
        Ok(fixtures)
    }

    /// Build the fixture's claim.
    pub fn build_claim(&self, catalog: &StandardCatalog) -> Result<Claim, ClaimError> {
        Claim::from_dict(&self.claim, catalog)
    }

    /// Run all test cases and return results
    ///
    /// A claim that fails to build turns every case into that error.
    pub async fn run(&self, catalog: &StandardCatalog) -> Vec<CaseResult> {
        let claim = self.build_claim(catalog);
        let mut results = Vec::with_capacity(self.cases.len());
        for case in &self.cases {
            let actual = match &claim {
                Ok(claim) => evaluate(claim, &case.uri, catalog).await,
                Err(e) => Outcome::Error(e.to_string()),
            };
            let expected = case.expected();
            results.push(CaseResult {
                case_name: case.name.clone(),
                passed: actual.satisfies(&expected),
                expected,
                actual,
            });
        }
        results
    }

    /// Run all test cases and panic on first failure
    pub async fn run_and_assert(&self, catalog: &StandardCatalog) {
        for result in self.run(catalog).await {
            assert!(
                result.passed,
                "Fixture '{}' case '{}' failed: expected {:?}, got {:?}",
                self.name, result.case_name, result.expected, result.actual
            );
        }
    }
}

async fn evaluate(claim: &Claim, uri: &str, catalog: &StandardCatalog) -> Outcome {
    let uri = match Url::parse(uri) {
        Ok(uri) => uri,
        Err(e) => return Outcome::Error(format!("invalid URI \"{uri}\": {e}")),
    };
    match claim.matches(&uri, catalog).await {
        Ok(matched) => Outcome::Matched(matched),
        Err(e) => Outcome::Error(e.to_string()),
    }
}
