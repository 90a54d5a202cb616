//! API base URL type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::error::{Error, InvalidInputError};

/// A validated base URL of the booking backend.
///
/// Must use HTTPS, or HTTP when the host is the local machine.
///
/// # Example
///
/// ```
/// use sporta_core::ApiUrl;
///
/// let api = ApiUrl::new("https://api.sporta.example/").unwrap();
/// assert_eq!(api.endpoint("/api/halls/"), "https://api.sporta.example/api/halls/");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ApiUrl(Url);

impl ApiUrl {
    /// Parse and validate a base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is malformed, relative, has no host, or
    /// uses plain HTTP for a remote host.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let url = Url::parse(s).map_err(|e| InvalidInputError::ApiUrl {
            value: s.to_string(),
            reason: e.to_string(),
        })?;

        Self::validate(&url, s)?;

        Ok(Self(url))
    }

    /// Returns the full URL for an endpoint path such as `/api/halls/`.
    pub fn endpoint(&self, path: &str) -> String {
        let base = self.0.as_str().trim_end_matches('/');
        if path.starts_with('/') {
            format!("{base}{path}")
        } else {
            format!("{base}/{path}")
        }
    }

    /// Returns the base URL as a string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the host string.
    pub fn host(&self) -> Option<&str> {
        self.0.host_str()
    }

    fn validate(url: &Url, original: &str) -> Result<(), Error> {
        let invalid = |reason: &str| -> Error {
            InvalidInputError::ApiUrl {
                value: original.to_string(),
                reason: reason.to_string(),
            }
            .into()
        };

        if url.cannot_be_a_base() {
            return Err(invalid("must be an absolute URL"));
        }

        let Some(host) = url.host_str() else {
            return Err(invalid("must have a host"));
        };

        let is_localhost = matches!(host, "localhost" | "127.0.0.1" | "::1" | "[::1]");
        match url.scheme() {
            "https" => Ok(()),
            "http" if is_localhost => Ok(()),
            _ => Err(invalid("must use HTTPS (HTTP allowed only for localhost)")),
        }
    }
}

impl fmt::Display for ApiUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ApiUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for ApiUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.0.as_str())
    }
}

impl<'de> Deserialize<'de> for ApiUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ApiUrl::new(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_https_url() {
        let api = ApiUrl::new("https://api.sporta.example").unwrap();
        assert_eq!(api.host(), Some("api.sporta.example"));
    }

    #[test]
    fn valid_localhost_http() {
        let api = ApiUrl::new("http://127.0.0.1:8000").unwrap();
        assert_eq!(
            api.endpoint("/api/login/"),
            "http://127.0.0.1:8000/api/login/"
        );
    }

    #[test]
    fn endpoint_joins_without_double_slash() {
        let api = ApiUrl::new("https://api.sporta.example/").unwrap();
        assert_eq!(
            api.endpoint("api/halls/"),
            "https://api.sporta.example/api/halls/"
        );
    }

    #[test]
    fn invalid_http_non_localhost() {
        assert!(ApiUrl::new("http://api.sporta.example").is_err());
    }

    #[test]
    fn invalid_relative_url() {
        assert!(ApiUrl::new("/api/halls/").is_err());
    }
}
