//! `UriComponent` — The nine URI components a CATU claim can constrain
//!
//! The numeric labels are a wire contract: a claim decoded from a token carries
//! them verbatim. The mapping is an exhaustive `match`, so there is no lookup that
//! can silently miss.

use std::fmt;
use std::str::FromStr;

use crate::ClaimError;

/// A URI component addressable by a CATU claim.
///
/// # Example
///
/// ```
/// use catu::UriComponent;
///
/// assert_eq!(UriComponent::Path.label(), 3);
/// assert_eq!(UriComponent::from_label(5), Some(UriComponent::ParentPath));
/// assert_eq!("extension".parse::<UriComponent>().unwrap(), UriComponent::Extension);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[repr(u8)]
pub enum UriComponent {
    /// Scheme, without the trailing `:`.
    Scheme = 0,
    /// Host name, without userinfo or port.
    Host = 1,
    /// Explicit port, or empty.
    Port = 2,
    /// Full path, without query or fragment.
    Path = 3,
    /// Canonicalized query string.
    Query = 4,
    /// Path up to (excluding) the last `/`.
    ParentPath = 5,
    /// Path after the last `/`.
    Filename = 6,
    /// Filename before the first `.`.
    Stem = 7,
    /// Filename from the first `.` (inclusive).
    Extension = 8,
}

impl UriComponent {
    /// All components, in label order.
    pub const ALL: [Self; 9] = [
        Self::Scheme,
        Self::Host,
        Self::Port,
        Self::Path,
        Self::Query,
        Self::ParentPath,
        Self::Filename,
        Self::Stem,
        Self::Extension,
    ];

    /// The wire label of this component.
    #[must_use]
    pub const fn label(self) -> i64 {
        self as i64
    }

    /// Look up a component by its wire label.
    #[must_use]
    pub const fn from_label(label: i64) -> Option<Self> {
        match label {
            0 => Some(Self::Scheme),
            1 => Some(Self::Host),
            2 => Some(Self::Port),
            3 => Some(Self::Path),
            4 => Some(Self::Query),
            5 => Some(Self::ParentPath),
            6 => Some(Self::Filename),
            7 => Some(Self::Stem),
            8 => Some(Self::Extension),
            _ => None,
        }
    }

    /// The claim-document name of this component.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Scheme => "scheme",
            Self::Host => "host",
            Self::Port => "port",
            Self::Path => "path",
            Self::Query => "query",
            Self::ParentPath => "parent-path",
            Self::Filename => "filename",
            Self::Stem => "stem",
            Self::Extension => "extension",
        }
    }

    /// Look up a component by its claim-document name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }
}

impl fmt::Display for UriComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for UriComponent {
    type Err = ClaimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| ClaimError::UnknownUriComponent(s.to_owned()))
    }
}

impl TryFrom<i64> for UriComponent {
    type Error = ClaimError;

    fn try_from(label: i64) -> Result<Self, Self::Error> {
        Self::from_label(label).ok_or_else(|| ClaimError::UnknownUriComponent(label.to_string()))
    }
}

impl From<UriComponent> for i64 {
    fn from(component: UriComponent) -> Self {
        component.label()
    }
}
