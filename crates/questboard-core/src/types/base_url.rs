//! Backend base URL type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::error::{Constraint, Error, ValidationError};

/// Path prefix the application is mounted under when none is given.
pub const DEFAULT_PREFIX: &str = "/quest-board";

/// Versioned API segment appended to the prefix.
pub const API_PATH: &str = "/api/v1";

/// A validated Quest Board base URL: origin plus mount prefix.
///
/// The URL must be absolute and use HTTPS, except for loopback hosts
/// where plain HTTP is accepted for local development.
///
/// # Example
///
/// ```
/// use questboard_core::BaseUrl;
///
/// let base = BaseUrl::new("https://guild.example.com/quest-board/").unwrap();
/// assert_eq!(base.api_url("/quests"),
///            "https://guild.example.com/quest-board/api/v1/quests");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BaseUrl(Url);

impl BaseUrl {
    /// Create a new base URL from a string, validating the format.
    ///
    /// A bare origin (`https://host`) gets the default `/quest-board` prefix.
    ///
    /// # Errors
    ///
    /// Returns a validation error on field `baseUrl` if the URL is not valid.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let mut url = Url::parse(s).map_err(|_| invalid())?;

        Self::validate(&url)?;

        url.set_query(None);
        url.set_fragment(None);
        let path = url.path().trim_end_matches('/').to_string();
        if path.is_empty() {
            url.set_path(DEFAULT_PREFIX);
        } else {
            url.set_path(&path);
        }

        Ok(Self(url))
    }

    /// Returns the full URL for an API path (`/quests` → `.../api/v1/quests`).
    pub fn api_url(&self, path: &str) -> String {
        let base = self.0.as_str().trim_end_matches('/');
        if path.starts_with('/') {
            format!("{base}{API_PATH}{path}")
        } else {
            format!("{base}{API_PATH}/{path}")
        }
    }

    /// Returns the base URL as a string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the inner URL.
    pub fn as_url(&self) -> &Url {
        &self.0
    }

    /// Returns the origin (scheme, host, port) as a URL, used for cookie scoping.
    pub fn origin(&self) -> Url {
        let mut origin = self.0.clone();
        origin.set_path("/");
        origin
    }

    fn validate(url: &Url) -> Result<(), Error> {
        if url.cannot_be_a_base() {
            return Err(invalid());
        }

        let Some(host) = url.host_str() else {
            return Err(invalid());
        };

        let is_loopback = matches!(host, "localhost" | "127.0.0.1" | "[::1]" | "::1");
        match url.scheme() {
            "https" => Ok(()),
            "http" if is_loopback => Ok(()),
            _ => Err(invalid()),
        }
    }
}

fn invalid() -> Error {
    ValidationError::field("baseUrl", Constraint::OneOf {
        allowed: &["https://<host>[/prefix]", "http://localhost[:port][/prefix]"],
    })
    .into()
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BaseUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for BaseUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.0.as_str())
    }
}

impl<'de> Deserialize<'de> for BaseUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        BaseUrl::new(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_origin_gets_default_prefix() {
        let base = BaseUrl::new("https://guild.example.com").unwrap();
        assert_eq!(
            base.api_url("/quests"),
            "https://guild.example.com/quest-board/api/v1/quests"
        );
    }

    #[test]
    fn custom_prefix_kept() {
        let base = BaseUrl::new("http://localhost:3000/qb/").unwrap();
        assert_eq!(base.api_url("users"), "http://localhost:3000/qb/api/v1/users");
    }

    #[test]
    fn origin_drops_prefix() {
        let base = BaseUrl::new("http://127.0.0.1:8080/quest-board").unwrap();
        assert_eq!(base.origin().as_str(), "http://127.0.0.1:8080/");
    }

    #[test]
    fn http_rejected_for_remote_hosts() {
        assert!(BaseUrl::new("http://guild.example.com").is_err());
    }

    #[test]
    fn relative_rejected() {
        assert!(BaseUrl::new("/quest-board").is_err());
    }
}
