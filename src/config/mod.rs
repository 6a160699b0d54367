//! Configuration for talking to one Shopify store.
//!
//! The credentials are supplied once, at process start, and never change
//! afterwards. They live in an explicitly constructed [`ShopifyConfig`] that
//! is passed to every client; there is no process-wide state.
//!
//! # Overview
//!
//! - [`ShopifyConfig`]: shop domain, access token, API version, optional base URL
//! - [`ShopifyConfigBuilder`]: builder for [`ShopifyConfig`]
//! - [`AccessToken`], [`ShopDomain`], [`BaseUrl`]: validated newtypes
//! - [`ApiVersion`]: the Admin API version in request paths
//!
//! # Example
//!
//! ```rust
//! use shopify_admin_tools::{AccessToken, ApiVersion, ShopDomain, ShopifyConfig};
//!
//! let config = ShopifyConfig::builder()
//!     .shop(ShopDomain::new("my-store").unwrap())
//!     .access_token(AccessToken::new("shpat_123").unwrap())
//!     .api_version(ApiVersion::V2024_10)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.base_uri(), "https://my-store.myshopify.com");
//! assert_eq!(config.admin_path(), "/admin/api/2024-10");
//! ```

mod newtypes;
mod version;

pub use newtypes::{AccessToken, BaseUrl, ShopDomain};
pub use version::ApiVersion;

use crate::error::ConfigError;

/// Environment variable holding the shop domain.
pub const ENV_SHOP_URL: &str = "SHOPIFY_SHOP_URL";
/// Environment variable holding the Admin API access token.
pub const ENV_ACCESS_TOKEN: &str = "SHOPIFY_ACCESS_TOKEN";
/// Optional environment variable overriding the API version.
pub const ENV_API_VERSION: &str = "SHOPIFY_API_VERSION";
/// Optional environment variable overriding the base URL.
pub const ENV_API_BASE_URL: &str = "SHOPIFY_API_BASE_URL";

/// Credentials and connection settings for one store.
///
/// `ShopifyConfig` is `Clone`, `Send`, and `Sync`; clone it freely to build
/// several clients for the same store.
#[derive(Clone, Debug)]
pub struct ShopifyConfig {
    shop: ShopDomain,
    access_token: AccessToken,
    api_version: ApiVersion,
    base_url: Option<BaseUrl>,
    user_agent_prefix: Option<String>,
}

impl ShopifyConfig {
    /// Creates a new builder for constructing a `ShopifyConfig`.
    #[must_use]
    pub fn builder() -> ShopifyConfigBuilder {
        ShopifyConfigBuilder::new()
    }

    /// Builds a configuration from the process environment.
    ///
    /// Reads [`ENV_SHOP_URL`] and [`ENV_ACCESS_TOKEN`] (required) and
    /// [`ENV_API_VERSION`] and [`ENV_API_BASE_URL`] (optional). Call
    /// `dotenvy::dotenv()` first to pick up a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] when a required variable is
    /// unset, or the validation error of the offending value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a configuration from an arbitrary variable lookup.
    ///
    /// This is what [`from_env`](Self::from_env) uses; tests pass a closure
    /// over a map instead of mutating the environment. Blank values count as
    /// unset.
    ///
    /// # Errors
    ///
    /// Same as [`from_env`](Self::from_env).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let shop = get(ENV_SHOP_URL).ok_or(ConfigError::MissingEnvVar { name: ENV_SHOP_URL })?;
        let token = get(ENV_ACCESS_TOKEN).ok_or(ConfigError::MissingEnvVar {
            name: ENV_ACCESS_TOKEN,
        })?;

        let mut builder = Self::builder()
            .shop(ShopDomain::new(shop)?)
            .access_token(AccessToken::new(token)?);

        if let Some(version) = get(ENV_API_VERSION) {
            builder = builder.api_version(version.parse()?);
        }
        if let Some(base_url) = get(ENV_API_BASE_URL) {
            builder = builder.base_url(BaseUrl::new(base_url)?);
        }

        builder.build()
    }

    /// Returns the shop domain.
    #[must_use]
    pub const fn shop(&self) -> &ShopDomain {
        &self.shop
    }

    /// Returns the access token.
    #[must_use]
    pub const fn access_token(&self) -> &AccessToken {
        &self.access_token
    }

    /// Returns the API version.
    #[must_use]
    pub const fn api_version(&self) -> &ApiVersion {
        &self.api_version
    }

    /// Returns the base URL override, if configured.
    #[must_use]
    pub const fn base_url(&self) -> Option<&BaseUrl> {
        self.base_url.as_ref()
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns the scheme and authority every Admin call is sent to.
    ///
    /// This is the base URL override when set, otherwise `https://{shop}`.
    #[must_use]
    pub fn base_uri(&self) -> String {
        self.base_url.as_ref().map_or_else(
            || format!("https://{}", self.shop),
            |url| url.as_ref().to_string(),
        )
    }

    /// Returns the versioned Admin API path, e.g. `/admin/api/2024-01`.
    #[must_use]
    pub fn admin_path(&self) -> String {
        format!("/admin/api/{}", self.api_version)
    }
}

// Verify ShopifyConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ShopifyConfig>();
};

/// Builder for [`ShopifyConfig`].
///
/// `shop` and `access_token` are required. The API version defaults to
/// [`ApiVersion::default`].
#[derive(Debug, Default)]
pub struct ShopifyConfigBuilder {
    shop: Option<ShopDomain>,
    access_token: Option<AccessToken>,
    api_version: Option<ApiVersion>,
    base_url: Option<BaseUrl>,
    user_agent_prefix: Option<String>,
}

impl ShopifyConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the shop domain (required).
    #[must_use]
    pub fn shop(mut self, shop: ShopDomain) -> Self {
        self.shop = Some(shop);
        self
    }

    /// Sets the access token (required).
    #[must_use]
    pub fn access_token(mut self, token: AccessToken) -> Self {
        self.access_token = Some(token);
        self
    }

    /// Sets the API version.
    #[must_use]
    pub fn api_version(mut self, version: ApiVersion) -> Self {
        self.api_version = Some(version);
        self
    }

    /// Routes Admin calls to `base_url` instead of `https://{shop}`.
    #[must_use]
    pub fn base_url(mut self, base_url: BaseUrl) -> Self {
        self.base_url = Some(base_url);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`ShopifyConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `shop` or
    /// `access_token` are not set.
    pub fn build(self) -> Result<ShopifyConfig, ConfigError> {
        let shop = self
            .shop
            .ok_or(ConfigError::MissingRequiredField { field: "shop" })?;
        let access_token = self
            .access_token
            .ok_or(ConfigError::MissingRequiredField {
                field: "access_token",
            })?;

        if let Some(base_url) = &self.base_url {
            if base_url.scheme() != "https" {
                tracing::warn!(
                    base_url = base_url.as_ref(),
                    "Admin API calls will not use TLS; only use a plain-HTTP base URL for local testing"
                );
            }
        }

        Ok(ShopifyConfig {
            shop,
            access_token,
            api_version: self.api_version.unwrap_or_default(),
            base_url: self.base_url,
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_builder_requires_shop() {
        let result = ShopifyConfigBuilder::new()
            .access_token(AccessToken::new("token").unwrap())
            .build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField { field: "shop" })
        ));
    }

    #[test]
    fn test_builder_requires_access_token() {
        let result = ShopifyConfigBuilder::new()
            .shop(ShopDomain::new("my-store").unwrap())
            .build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField {
                field: "access_token"
            })
        ));
    }

    #[test]
    fn test_builder_provides_sensible_defaults() {
        let config = ShopifyConfig::builder()
            .shop(ShopDomain::new("my-store").unwrap())
            .access_token(AccessToken::new("token").unwrap())
            .build()
            .unwrap();

        assert_eq!(config.api_version(), &ApiVersion::V2024_01);
        assert!(config.base_url().is_none());
        assert!(config.user_agent_prefix().is_none());
        assert_eq!(config.base_uri(), "https://my-store.myshopify.com");
        assert_eq!(config.admin_path(), "/admin/api/2024-01");
    }

    #[test]
    fn test_base_url_override_replaces_shop_uri() {
        let config = ShopifyConfig::builder()
            .shop(ShopDomain::new("my-store").unwrap())
            .access_token(AccessToken::new("token").unwrap())
            .base_url(BaseUrl::new("http://127.0.0.1:9000").unwrap())
            .build()
            .unwrap();

        assert_eq!(config.base_uri(), "http://127.0.0.1:9000");
    }

    #[test]
    fn test_from_lookup_reads_required_and_optional_values() {
        let config = ShopifyConfig::from_lookup(lookup(&[
            (ENV_SHOP_URL, "my-store.myshopify.com"),
            (ENV_ACCESS_TOKEN, "shpat_abc"),
            (ENV_API_VERSION, "2024-10"),
            (ENV_API_BASE_URL, "http://localhost:4000"),
        ]))
        .unwrap();

        assert_eq!(config.shop().as_ref(), "my-store.myshopify.com");
        assert_eq!(config.access_token().as_ref(), "shpat_abc");
        assert_eq!(config.api_version(), &ApiVersion::V2024_10);
        assert_eq!(config.base_uri(), "http://localhost:4000");
    }

    #[test]
    fn test_from_lookup_reports_missing_variables() {
        let result = ShopifyConfig::from_lookup(lookup(&[(ENV_ACCESS_TOKEN, "shpat_abc")]));
        assert!(matches!(
            result,
            Err(ConfigError::MissingEnvVar { name: ENV_SHOP_URL })
        ));

        let result = ShopifyConfig::from_lookup(lookup(&[
            (ENV_SHOP_URL, "my-store"),
            (ENV_ACCESS_TOKEN, "  "),
        ]));
        assert!(matches!(
            result,
            Err(ConfigError::MissingEnvVar {
                name: ENV_ACCESS_TOKEN
            })
        ));
    }

    #[test]
    fn test_from_lookup_rejects_bad_version() {
        let result = ShopifyConfig::from_lookup(lookup(&[
            (ENV_SHOP_URL, "my-store"),
            (ENV_ACCESS_TOKEN, "shpat_abc"),
            (ENV_API_VERSION, "latest"),
        ]));
        assert!(matches!(result, Err(ConfigError::InvalidApiVersion { .. })));
    }

    #[test]
    fn test_config_debug_does_not_leak_token() {
        let config = ShopifyConfig::builder()
            .shop(ShopDomain::new("my-store").unwrap())
            .access_token(AccessToken::new("shpat_secret").unwrap())
            .build()
            .unwrap();

        let debug_str = format!("{config:?}");
        assert!(debug_str.contains("ShopifyConfig"));
        assert!(!debug_str.contains("shpat_secret"));
    }
}
