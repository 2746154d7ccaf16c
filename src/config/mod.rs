//! Configuration types for the historian connector client.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`PlatformConfig`]: The configuration struct holding credentials and endpoint settings
//! - [`PlatformConfigBuilder`]: A builder for constructing [`PlatformConfig`] instances
//! - [`ApiKey`]: A validated API key newtype
//! - [`AuthToken`]: A validated authentication token with masked debug output
//! - [`OrgId`]: A validated organization id
//! - [`BaseUrl`]: A validated base URL override
//!
//! # Example
//!
//! ```rust
//! use wiotp_historian::{PlatformConfig, ApiKey, AuthToken};
//!
//! let config = PlatformConfig::builder()
//!     .api_key(ApiKey::new("a-abc123-xyz7890").unwrap())
//!     .auth_token(AuthToken::new("my-token").unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.base_url(), "https://abc123.internetofthings.ibmcloud.com");
//! ```

mod newtypes;

pub use newtypes::{ApiKey, AuthToken, BaseUrl, OrgId};

use crate::error::ConfigError;

/// Default platform domain, combined with the organization id to form the host.
pub const DEFAULT_DOMAIN: &str = "internetofthings.ibmcloud.com";

/// Environment variable holding the API key.
pub const ENV_AUTH_KEY: &str = "WIOTP_AUTH_KEY";
/// Environment variable holding the authentication token.
pub const ENV_AUTH_TOKEN: &str = "WIOTP_AUTH_TOKEN";
/// Environment variable overriding the platform domain.
pub const ENV_DOMAIN: &str = "WIOTP_OPTIONS_DOMAIN";
/// Environment variable overriding the full base URL.
pub const ENV_BASE_URL: &str = "WIOTP_OPTIONS_BASE_URL";

/// Configuration for the historian connector client.
///
/// Holds the API credentials and the endpoint the client talks to. The
/// organization id is taken from [`PlatformConfigBuilder::org_id`] when set,
/// otherwise derived from the API key.
///
/// # Thread Safety
///
/// `PlatformConfig` is `Clone`, `Send`, and `Sync`.
#[derive(Clone, Debug)]
pub struct PlatformConfig {
    api_key: ApiKey,
    auth_token: AuthToken,
    org_id: OrgId,
    domain: String,
    base_url: Option<BaseUrl>,
    user_agent_prefix: Option<String>,
}

impl PlatformConfig {
    /// Creates a new builder for constructing a `PlatformConfig`.
    #[must_use]
    pub fn builder() -> PlatformConfigBuilder {
        PlatformConfigBuilder::new()
    }

    /// Builds a configuration from the process environment.
    ///
    /// Reads `WIOTP_AUTH_KEY`, `WIOTP_AUTH_TOKEN` and, optionally,
    /// `WIOTP_OPTIONS_DOMAIN` and `WIOTP_OPTIONS_BASE_URL`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a required variable is missing or a value
    /// fails validation.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a configuration from an arbitrary variable lookup.
    ///
    /// This is what [`PlatformConfig::from_env`] uses; passing a closure over
    /// a map makes it usable without touching the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a required variable is missing or a value
    /// fails validation.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(ENV_AUTH_KEY).ok_or(ConfigError::MissingRequiredField {
            field: ENV_AUTH_KEY,
        })?;
        let auth_token = lookup(ENV_AUTH_TOKEN).ok_or(ConfigError::MissingRequiredField {
            field: ENV_AUTH_TOKEN,
        })?;

        let mut builder = Self::builder()
            .api_key(ApiKey::new(api_key)?)
            .auth_token(AuthToken::new(auth_token)?);

        if let Some(domain) = lookup(ENV_DOMAIN).filter(|d| !d.trim().is_empty()) {
            builder = builder.domain(domain.trim());
        }
        if let Some(url) = lookup(ENV_BASE_URL).filter(|u| !u.trim().is_empty()) {
            builder = builder.base_url(BaseUrl::new(url)?);
        }

        builder.build()
    }

    /// Returns the API key.
    #[must_use]
    pub const fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    /// Returns the authentication token.
    #[must_use]
    pub const fn auth_token(&self) -> &AuthToken {
        &self.auth_token
    }

    /// Returns the organization id.
    #[must_use]
    pub const fn org_id(&self) -> &OrgId {
        &self.org_id
    }

    /// Returns the platform domain.
    #[must_use]
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns the base URL requests are sent to, without a trailing slash.
    ///
    /// This is the configured override when present, otherwise
    /// `https://{org_id}.{domain}`.
    #[must_use]
    pub fn base_url(&self) -> String {
        self.base_url.as_ref().map_or_else(
            || format!("https://{}.{}", self.org_id, self.domain),
            |url| url.as_ref().to_string(),
        )
    }
}

// Verify PlatformConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<PlatformConfig>();
};

/// Builder for constructing [`PlatformConfig`] instances.
///
/// Required fields are `api_key` and `auth_token`.
///
/// # Defaults
///
/// - `org_id`: derived from the API key
/// - `domain`: [`DEFAULT_DOMAIN`]
/// - `base_url`: `None` (derived from org id and domain)
/// - `user_agent_prefix`: `None`
#[derive(Debug, Default)]
pub struct PlatformConfigBuilder {
    api_key: Option<ApiKey>,
    auth_token: Option<AuthToken>,
    org_id: Option<OrgId>,
    domain: Option<String>,
    base_url: Option<BaseUrl>,
    user_agent_prefix: Option<String>,
}

impl PlatformConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API key (required).
    #[must_use]
    pub fn api_key(mut self, key: ApiKey) -> Self {
        self.api_key = Some(key);
        self
    }

    /// Sets the authentication token (required).
    #[must_use]
    pub fn auth_token(mut self, token: AuthToken) -> Self {
        self.auth_token = Some(token);
        self
    }

    /// Sets the organization id, overriding the one derived from the API key.
    #[must_use]
    pub fn org_id(mut self, org_id: OrgId) -> Self {
        self.org_id = Some(org_id);
        self
    }

    /// Sets the platform domain.
    #[must_use]
    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    /// Sets a base URL that is used verbatim instead of `https://{org}.{domain}`.
    #[must_use]
    pub fn base_url(mut self, url: BaseUrl) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`PlatformConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `api_key` or
    /// `auth_token` are not set, and [`ConfigError::UnknownOrgId`] if no
    /// org id was given and none can be derived from the API key.
    pub fn build(self) -> Result<PlatformConfig, ConfigError> {
        let api_key = self
            .api_key
            .ok_or(ConfigError::MissingRequiredField { field: "api_key" })?;
        let auth_token = self
            .auth_token
            .ok_or(ConfigError::MissingRequiredField {
                field: "auth_token",
            })?;

        let org_id = match self.org_id {
            Some(org_id) => org_id,
            None => api_key.org_id()?,
        };

        Ok(PlatformConfig {
            api_key,
            auth_token,
            org_id,
            domain: self.domain.unwrap_or_else(|| DEFAULT_DOMAIN.to_string()),
            base_url: self.base_url,
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}
