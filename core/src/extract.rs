//! URI component extraction
//!
//! Derives the string a rule is compared against from a parsed [`Url`]. Paths are
//! split on the **last** `/` (parent-path / filename) and filenames on the
//! **first** `.` (stem / extension):
//!
//! | Path | parent-path | filename | stem | extension |
//! |------|-------------|----------|------|-----------|
//! | `/dir/sub/file.tar.gz` | `/dir/sub` | `file.tar.gz` | `file` | `.tar.gz` |
//! | `report.pdf` | `""` | `report.pdf` | `report` | `.pdf` |
//! | `/conf/.env` | `/conf` | `.env` | `""` | `.env` |
//! | `/bin/run` | `/bin` | `run` | `run` | `""` |

use url::Url;

use crate::query::canonical_query;
use crate::UriComponent;

/// Extract the normalized value of `component` from `uri`.
///
/// `query` is canonicalized (see [`canonical_query`]); every other component is
/// taken verbatim from the parsed URL. Components absent from the URL yield `""`.
///
/// # Example
///
/// ```
/// use catu::{extract, UriComponent, Url};
///
/// let uri = Url::parse("https://user@cdn.example.com:8443/a/b/seg.ts?x=1").unwrap();
/// assert_eq!(extract(&uri, UriComponent::Scheme), "https");
/// assert_eq!(extract(&uri, UriComponent::Host), "cdn.example.com");
/// assert_eq!(extract(&uri, UriComponent::Port), "8443");
/// assert_eq!(extract(&uri, UriComponent::ParentPath), "/a/b");
/// assert_eq!(extract(&uri, UriComponent::Extension), ".ts");
/// ```
#[must_use]
pub fn extract(uri: &Url, component: UriComponent) -> String {
    match component {
        UriComponent::Scheme => uri.scheme().to_owned(),
        UriComponent::Host => uri.host_str().unwrap_or_default().to_owned(),
        UriComponent::Port => uri.port().map(|p| p.to_string()).unwrap_or_default(),
        UriComponent::Path => uri.path().to_owned(),
        UriComponent::Query => canonical_query(uri.query().unwrap_or_default()),
        UriComponent::ParentPath => parent_path(uri.path()).to_owned(),
        UriComponent::Filename => filename(uri.path()).to_owned(),
        UriComponent::Stem => stem(filename(uri.path())).to_owned(),
        UriComponent::Extension => extension(filename(uri.path())).to_owned(),
    }
}

/// Path up to, excluding, the last `/`. Empty if there is no `/`.
#[must_use]
pub fn parent_path(path: &str) -> &str {
    path.rfind('/').map_or("", |idx| &path[..idx])
}

/// Path after the last `/`. The whole path if there is no `/`.
#[must_use]
pub fn filename(path: &str) -> &str {
    path.rfind('/').map_or(path, |idx| &path[idx + 1..])
}

/// Filename before the first `.`. The whole filename if there is no `.`.
#[must_use]
pub fn stem(filename: &str) -> &str {
    filename.find('.').map_or(filename, |idx| &filename[..idx])
}

/// Filename from the first `.` (inclusive). Empty if there is no `.`.
#[must_use]
pub fn extension(filename: &str) -> &str {
    filename.find('.').map_or("", |idx| &filename[idx..])
}
