//! Shopify API version definitions.
//!
//! The version is part of every Admin API path
//! (`/admin/api/{version}/graphql.json`), so it is fixed per configuration.

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// Shopify Admin API version.
///
/// Shopify releases versions quarterly. Known stable releases have their own
/// variant; anything else in `YYYY-MM` form is kept as [`ApiVersion::Custom`].
///
/// # Example
///
/// ```rust
/// use shopify_admin_tools::ApiVersion;
///
/// let version: ApiVersion = "2024-10".parse().unwrap();
/// assert_eq!(version, ApiVersion::V2024_10);
/// assert_eq!(ApiVersion::default().to_string(), "2024-01");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum ApiVersion {
    /// API version 2024-01. The product input shape used by the tools
    /// (inline `options` and `variants`) targets this release.
    #[default]
    V2024_01,
    /// API version 2024-04.
    V2024_04,
    /// API version 2024-07.
    V2024_07,
    /// API version 2024-10.
    V2024_10,
    /// API version 2025-01.
    V2025_01,
    /// API version 2025-04.
    V2025_04,
    /// API version 2025-07.
    V2025_07,
    /// API version 2025-10.
    V2025_10,
    /// Unstable API version.
    Unstable,
    /// Any other `YYYY-MM` version string.
    Custom(String),
}

impl ApiVersion {
    /// Returns `true` for known stable releases.
    #[must_use]
    pub const fn is_stable(&self) -> bool {
        !matches!(self, Self::Unstable | Self::Custom(_))
    }

    fn is_valid_version_format(s: &str) -> bool {
        let Some((year, month)) = s.split_once('-') else {
            return false;
        };
        if year.len() != 4 || month.len() != 2 {
            return false;
        }
        let (Ok(year), Ok(month)) = (year.parse::<u32>(), month.parse::<u32>()) else {
            return false;
        };
        year >= 2000 && (1..=12).contains(&month)
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let version_str = match self {
            Self::V2024_01 => "2024-01",
            Self::V2024_04 => "2024-04",
            Self::V2024_07 => "2024-07",
            Self::V2024_10 => "2024-10",
            Self::V2025_01 => "2025-01",
            Self::V2025_04 => "2025-04",
            Self::V2025_07 => "2025-07",
            Self::V2025_10 => "2025-10",
            Self::Unstable => "unstable",
            Self::Custom(s) => s,
        };
        f.write_str(version_str)
    }
}

impl FromStr for ApiVersion {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();

        match s.as_str() {
            "2024-01" => Ok(Self::V2024_01),
            "2024-04" => Ok(Self::V2024_04),
            "2024-07" => Ok(Self::V2024_07),
            "2024-10" => Ok(Self::V2024_10),
            "2025-01" => Ok(Self::V2025_01),
            "2025-04" => Ok(Self::V2025_04),
            "2025-07" => Ok(Self::V2025_07),
            "2025-10" => Ok(Self::V2025_10),
            "unstable" => Ok(Self::Unstable),
            _ if Self::is_valid_version_format(&s) => Ok(Self::Custom(s)),
            _ => Err(ConfigError::InvalidApiVersion { version: s }),
        }
    }
}
