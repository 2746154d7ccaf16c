//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use std::fmt;

/// A validated platform API key.
///
/// API keys issued by the platform have the form `a-<orgId>-<suffix>`; the
/// organization id can be derived from them with [`ApiKey::org_id`].
///
/// # Example
///
/// ```rust
/// use wiotp_historian::ApiKey;
///
/// let key = ApiKey::new("a-abc123-xyz7890").unwrap();
/// assert_eq!(key.as_ref(), "a-abc123-xyz7890");
/// assert_eq!(key.org_id().unwrap().as_ref(), "abc123");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Creates a new validated API key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyApiKey`] if the key is empty.
    pub fn new(key: impl Into<String>) -> Result<Self, ConfigError> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(ConfigError::EmptyApiKey);
        }
        Ok(Self(key))
    }

    /// Derives the organization id embedded in the key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownOrgId`] if the key does not follow the
    /// `a-<orgId>-<suffix>` format.
    pub fn org_id(&self) -> Result<OrgId, ConfigError> {
        let unknown = || ConfigError::UnknownOrgId {
            key: self.0.clone(),
        };

        let mut parts = self.0.splitn(3, '-');
        match (parts.next(), parts.next(), parts.next()) {
            (Some("a"), Some(org), Some(suffix)) if !suffix.is_empty() => {
                OrgId::new(org).map_err(|_| unknown())
            }
            _ => Err(unknown()),
        }
    }
}

impl AsRef<str> for ApiKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A validated authentication token paired with an [`ApiKey`].
///
/// # Security
///
/// The `Debug` implementation masks the token, displaying only
/// `AuthToken(*****)`.
///
/// # Example
///
/// ```rust
/// use wiotp_historian::AuthToken;
///
/// let token = AuthToken::new("my-token").unwrap();
/// assert_eq!(format!("{:?}", token), "AuthToken(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    /// Creates a new validated authentication token.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyAuthToken`] if the token is empty.
    pub fn new(token: impl Into<String>) -> Result<Self, ConfigError> {
        let token = token.into();
        if token.is_empty() {
            return Err(ConfigError::EmptyAuthToken);
        }
        Ok(Self(token))
    }
}

impl AsRef<str> for AuthToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(*****)")
    }
}

/// A validated organization id.
///
/// Organization ids are lowercase alphanumeric strings. Input is trimmed and
/// lowercased before validation.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct OrgId(String);

impl OrgId {
    /// Creates a new validated organization id.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOrgId`] if the id is empty or contains
    /// characters other than ASCII letters and digits.
    pub fn new(org_id: impl Into<String>) -> Result<Self, ConfigError> {
        let raw = org_id.into();
        let normalized = raw.trim().to_ascii_lowercase();
        if normalized.is_empty() || !normalized.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(ConfigError::InvalidOrgId { org_id: raw });
        }
        Ok(Self(normalized))
    }
}

impl AsRef<str> for OrgId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrgId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A validated base URL for API requests.
///
/// Requires an `http` or `https` scheme and a host. A trailing slash is stripped so paths can be
/// appended with a single `/`.
///
/// # Example
///
/// ```rust
/// use wiotp_historian::BaseUrl;
///
/// let url = BaseUrl::new("http://localhost:8080/").unwrap();
/// assert_eq!(url.as_ref(), "http://localhost:8080");
/// assert_eq!(url.scheme(), "http");
///
/// assert!(BaseUrl::new("ftp://localhost").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseUrl {
    url: String,
    scheme_end: usize,
}

impl BaseUrl {
    /// Creates a new validated base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if the URL is invalid.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let url = url.trim().trim_end_matches('/').to_string();
        let invalid = || ConfigError::InvalidBaseUrl { url: url.clone() };

        let scheme_end = url.find("://").ok_or_else(invalid)?;
        let scheme = &url[..scheme_end];
        if scheme.is_empty() || !scheme.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(invalid());
        }

        let host_start = scheme_end + 3;
        if host_start >= url.len() {
            return Err(invalid());
        }

        // Host ends at port, path, query, or end of string
        let remainder = &url[host_start..];
        let host_end = remainder
            .find([':', '/', '?', '#'])
            .map_or(url.len(), |i| host_start + i);
        if host_end == host_start {
            return Err(invalid());
        }

        let base = Self { url, scheme_end };
        if !matches!(base.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidBaseUrl { url: base.url });
        }
        Ok(base)
    }

    /// Returns the URL scheme (e.g., "https").
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.url[..self.scheme_end]
    }
}

impl AsRef<str> for BaseUrl {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_key_rejects_empty_string() {
        assert!(matches!(ApiKey::new(""), Err(ConfigError::EmptyApiKey)));
        assert!(matches!(ApiKey::new("   "), Err(ConfigError::EmptyApiKey)));
    }

    #[test]
    fn test_api_key_derives_org_id() {
        let key = ApiKey::new("a-ab12cd-qwertyuiop").unwrap();
        assert_eq!(key.org_id().unwrap(), OrgId::new("ab12cd").unwrap());

        // Suffix may itself contain hyphens
        let key = ApiKey::new("a-ab12cd-qwe-rty").unwrap();
        assert_eq!(key.org_id().unwrap().as_ref(), "ab12cd");
    }

    #[test]
    fn test_api_key_org_id_rejects_unexpected_formats() {
        for raw in ["ab12cd", "g-ab12cd-suffix", "a-ab12cd-", "a--suffix", "a-ab_12-x"] {
            let key = ApiKey::new(raw).unwrap();
            assert!(
                matches!(key.org_id(), Err(ConfigError::UnknownOrgId { .. })),
                "expected UnknownOrgId for {raw}"
            );
        }
    }

    #[test]
    fn test_auth_token_masks_value_in_debug() {
        let token = AuthToken::new("super-secret-token").unwrap();
        let debug_output = format!("{token:?}");
        assert_eq!(debug_output, "AuthToken(*****)");
        assert!(!debug_output.contains("super-secret-token"));
    }

    #[test]
    fn test_auth_token_rejects_empty_string() {
        assert!(matches!(AuthToken::new(""), Err(ConfigError::EmptyAuthToken)));
    }

    #[test]
    fn test_org_id_normalizes_case() {
        let org = OrgId::new(" AB12CD ").unwrap();
        assert_eq!(org.as_ref(), "ab12cd");
        assert_eq!(org.to_string(), "ab12cd");
    }

    #[test]
    fn test_org_id_rejects_invalid() {
        assert!(OrgId::new("").is_err());
        assert!(OrgId::new("ab-12").is_err());
        assert!(OrgId::new("ab 12").is_err());
    }

    #[test]
    fn test_base_url_validates_format() {
        let url = BaseUrl::new("https://ab12cd.internetofthings.ibmcloud.com").unwrap();
        assert_eq!(url.scheme(), "https");

        let url = BaseUrl::new("http://127.0.0.1:9000/").unwrap();
        assert_eq!(url.as_ref(), "http://127.0.0.1:9000");
        assert_eq!(url.scheme(), "http");
    }

    #[test]
    fn test_base_url_rejects_non_http_schemes() {
        for url in ["ftp://example.com", "ws://localhost:9000", "file://host/path"] {
            assert!(
                matches!(BaseUrl::new(url), Err(ConfigError::InvalidBaseUrl { .. })),
                "Expected {url} to be rejected"
            );
        }
    }

    #[test]
    fn test_base_url_rejects_invalid() {
        assert!(BaseUrl::new("example.com").is_err());
        assert!(BaseUrl::new("https://").is_err());
        assert!(BaseUrl::new("://example.com").is_err());
        assert!(BaseUrl::new("https://:8080").is_err());
    }
}
