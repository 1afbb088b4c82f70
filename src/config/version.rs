//! SeamlessPay API version definitions.
//!
//! This module provides the [`ApiVersion`] enum. Every request carries the
//! version the bindings are pinned to, unless a version override is set on
//! the request options.

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// SeamlessPay API version.
///
/// The bindings are pinned to [`ApiVersion::latest`]. A `Custom` variant
/// carries versions this crate does not know about, which is how requests
/// made on behalf of other integrations pass their own version through.
///
/// # Example
///
/// ```rust
/// use seamlesspay_api::ApiVersion;
///
/// let version: ApiVersion = " v2 ".parse().unwrap();
/// assert_eq!(version, ApiVersion::V2);
/// assert_eq!(version.to_string(), "v2");
///
/// let custom: ApiVersion = "2020-08-01".parse().unwrap();
/// assert_eq!(custom, ApiVersion::Custom("2020-08-01".to_string()));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ApiVersion {
    /// API version v1.
    V1,
    /// API version v2.
    V2,
    /// Custom version string for future or unrecognized versions.
    Custom(String),
}

impl ApiVersion {
    /// Returns the version these bindings are pinned to.
    #[must_use]
    pub const fn latest() -> Self {
        Self::V2
    }

    /// Returns `true` if this is a version known to these bindings.
    #[must_use]
    pub const fn is_known(&self) -> bool {
        !matches!(self, Self::Custom(_))
    }
}

impl Default for ApiVersion {
    fn default() -> Self {
        Self::latest()
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let version_str = match self {
            Self::V1 => "v1",
            Self::V2 => "v2",
            Self::Custom(s) => s,
        };
        f.write_str(version_str)
    }
}

impl FromStr for ApiVersion {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        match s.to_lowercase().as_str() {
            "" => Err(ConfigError::EmptyOption {
                field: "api_version",
            }),
            "v1" => Ok(Self::V1),
            "v2" => Ok(Self::V2),
            _ => Ok(Self::Custom(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_version_parses_known_versions() {
        assert_eq!("v1".parse::<ApiVersion>().unwrap(), ApiVersion::V1);
        assert_eq!("V2".parse::<ApiVersion>().unwrap(), ApiVersion::V2);
    }

    #[test]
    fn test_api_version_display() {
        assert_eq!(format!("{}", ApiVersion::V1), "v1");
        assert_eq!(format!("{}", ApiVersion::V2), "v2");
        assert_eq!(
            format!("{}", ApiVersion::Custom("2020-08-01".to_string())),
            "2020-08-01"
        );
    }

    #[test]
    fn test_api_version_keeps_custom_value_trimmed() {
        let version: ApiVersion = "  2020-08-01\t".parse().unwrap();
        assert_eq!(version, ApiVersion::Custom("2020-08-01".to_string()));
        assert!(!version.is_known());
    }

    #[test]
    fn test_api_version_rejects_blank() {
        assert_eq!(
            "   ".parse::<ApiVersion>(),
            Err(ConfigError::EmptyOption {
                field: "api_version"
            })
        );
    }

    #[test]
    fn test_latest_is_default() {
        assert_eq!(ApiVersion::default(), ApiVersion::latest());
        assert!(ApiVersion::latest().is_known());
    }
}
