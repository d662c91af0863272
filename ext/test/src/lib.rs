//! catu-test: Conformance fixtures for claim evaluation
//!
//! YAML fixtures declare a name-keyed claim and a list of request URIs with the
//! expected result (or error). The runner builds each claim with the standard
//! catalog and evaluates every case.
//!
//! # Example
//!
//! ```ignore
//! use catu_catalog::StandardCatalog;
//! use catu_test::fixture::Fixture;
//!
//! let fixture = Fixture::from_yaml(yaml)?;
//! fixture.run_and_assert(&StandardCatalog::new()).await;
//! ```

use std::path::{Path, PathBuf};

#[cfg(feature = "fixtures")]
pub mod fixture;

/// Directory holding the bundled YAML fixtures.
#[must_use]
pub fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

/// Prelude for convenient imports.
pub mod prelude {
    #[cfg(feature = "fixtures")]
    pub use super::fixture::{CaseResult, Fixture, Outcome, TestCase};
    pub use catu::prelude::*;
    pub use catu_catalog::StandardCatalog;
}

#[cfg(all(test, feature = "fixtures"))]
mod tests {
    use super::fixture::{Fixture, Outcome};
    use catu_catalog::StandardCatalog;

    const YAML: &str = r"
name: scheme_and_query
description: scheme pinned, query canonicalized
claim:
  scheme:
    exact-match: https
  query:
    exact-match: b=2&a=1
cases:
  - name: reordered with token
    uri: https://a.example/x?cat=TOKEN&a=1&b=2
    expect: true
  - name: plain http
    uri: http://a.example/x?a=1&b=2
    expect: false
  - name: deliberately wrong
    uri: https://a.example/x?a=1&b=2
    expect: false
";

    #[test]
    fn parses_fixture() {
        let fixture = Fixture::from_yaml(YAML).unwrap();
        assert_eq!(fixture.name, "scheme_and_query");
        assert_eq!(fixture.cases.len(), 3);
        assert_eq!(fixture.cases[0].expected(), Outcome::Matched(true));
    }

    #[test]
    fn parses_multi_document() {
        let multi = format!("{YAML}---{YAML}");
        assert_eq!(Fixture::from_yaml_multi(&multi).unwrap().len(), 2);
    }

    #[tokio::test]
    async fn reports_failing_case() {
        let fixture = Fixture::from_yaml(YAML).unwrap();
        let results = fixture.run(&StandardCatalog::new()).await;
        let passed: Vec<bool> = results.iter().map(|r| r.passed).collect();
        assert_eq!(passed, vec![true, true, false]);
        assert_eq!(results[2].actual, Outcome::Matched(true));
    }

    #[tokio::test]
    async fn construction_error_fails_every_case() {
        let yaml = r"
name: bad
claim:
  fragment:
    exact-match: x
cases:
  - name: any
    uri: https://a.example/
    error: unknown URI component
";
        let fixture = Fixture::from_yaml(yaml).unwrap();
        let results = fixture.run(&StandardCatalog::new()).await;
        assert!(results[0].passed, "{:?}", results[0].actual);
    }
}
