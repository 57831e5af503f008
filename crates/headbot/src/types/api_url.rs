//! API base URL type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::error::{Error, InvalidInputError};

/// A validated API root URL.
///
/// All endpoint paths (`token/`, `crawlers/`, ...) are relative to this URL.
/// The URL must be absolute and use HTTPS (or HTTP for localhost). The path
/// is normalised to end with a single `/` so relative joins never drop the
/// last segment.
///
/// # Example
///
/// ```
/// use headbot::ApiUrl;
///
/// let api = ApiUrl::new("https://headbot.io/api").unwrap();
/// assert_eq!(api.endpoint("token/"), "https://headbot.io/api/token/");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ApiUrl(Url);

impl ApiUrl {
    /// Create a new API URL from a string, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not valid or doesn't meet requirements.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let mut url = Url::parse(s).map_err(|e| InvalidInputError::ApiUrl {
            value: s.to_string(),
            reason: e.to_string(),
        })?;

        Self::validate(&url, s)?;

        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        url.set_query(None);
        url.set_fragment(None);

        Ok(Self(url))
    }

    /// Returns the absolute URL for an endpoint path relative to the root.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.0.as_str(), path.trim_start_matches('/'))
    }

    /// Returns the base URL as a string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the inner URL.
    pub fn as_url(&self) -> &Url {
        &self.0
    }

    /// Returns the host string.
    pub fn host(&self) -> Option<&str> {
        self.0.host_str()
    }

    fn validate(url: &Url, original: &str) -> Result<(), Error> {
        if url.cannot_be_a_base() {
            return Err(InvalidInputError::ApiUrl {
                value: original.to_string(),
                reason: "must be an absolute URL".to_string(),
            }
            .into());
        }

        let Some(host) = url.host_str() else {
            return Err(InvalidInputError::ApiUrl {
                value: original.to_string(),
                reason: "must have a host".to_string(),
            }
            .into());
        };

        let scheme = url.scheme();
        let is_localhost = matches!(host, "localhost" | "127.0.0.1" | "[::1]" | "::1");

        if scheme != "https" && !(scheme == "http" && is_localhost) {
            return Err(InvalidInputError::ApiUrl {
                value: original.to_string(),
                reason: "must use HTTPS (HTTP allowed only for localhost)".to_string(),
            }
            .into());
        }

        Ok(())
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

impl AsRef<str> for ApiUrl {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_https_url() {
        let api = ApiUrl::new("https://headbot.io/api/").unwrap();
        assert_eq!(api.host(), Some("headbot.io"));
    }

    #[test]
    fn valid_localhost_http() {
        let api = ApiUrl::new("http://127.0.0.1:8000/api/").unwrap();
        assert_eq!(api.host(), Some("127.0.0.1"));
    }

    #[test]
    fn endpoint_construction() {
        let api = ApiUrl::new("https://headbot.io/api/").unwrap();
        assert_eq!(api.endpoint("token/"), "https://headbot.io/api/token/");
        assert_eq!(
            api.endpoint("token/refresh/"),
            "https://headbot.io/api/token/refresh/"
        );
    }

    #[test]
    fn adds_missing_trailing_slash() {
        let api = ApiUrl::new("https://headbot.io/api").unwrap();
        assert_eq!(api.as_str(), "https://headbot.io/api/");
        assert_eq!(api.endpoint("/crawlers/"), "https://headbot.io/api/crawlers/");
    }

    #[test]
    fn bare_host_gets_root_path() {
        let api = ApiUrl::new("https://headbot.io").unwrap();
        assert_eq!(api.endpoint("token/"), "https://headbot.io/token/");
    }

    #[test]
    fn invalid_http_non_localhost() {
        assert!(ApiUrl::new("http://headbot.io/api/").is_err());
    }

    #[test]
    fn invalid_relative_url() {
        assert!(ApiUrl::new("/api/token/").is_err());
    }

    #[test]
    fn deserializes_with_validation() {
        let api: ApiUrl = serde_json::from_str("\"https://headbot.io/api\"").unwrap();
        assert_eq!(api.as_str(), "https://headbot.io/api/");
        assert!(serde_json::from_str::<ApiUrl>("\"ftp://headbot.io\"").is_err());
    }
}
