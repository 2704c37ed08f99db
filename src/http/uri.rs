//! URI references carried by requests
//!
//! A request may start out with a relative reference such as `users?page=2`
//! and only become absolute once a `base_uri` is applied, so the URI is kept
//! as an RFC 3986 reference split into its five components.

use std::fmt;
use std::str::FromStr;

use http::Uri;

use crate::error::{Result, ReqoptsError};
use crate::utils::UrlUtils;

/// An absolute URI or a relative reference (`/path`, `users`, `../up`, `?q`,
/// or empty).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UriRef {
    scheme: Option<String>,
    authority: Option<String>,
    path: String,
    query: Option<String>,
    fragment: Option<String>,
}

impl UriRef {
    /// Split `input` into components (RFC 3986 appendix B).
    pub fn parse(input: &str) -> Result<Self> {
        if let Some(c) = input
            .chars()
            .find(|c| c.is_ascii_control() || c.is_whitespace())
        {
            return Err(invalid(input, &format!("unexpected character {:?}", c)));
        }

        let (rest, fragment) = match input.split_once('#') {
            Some((rest, fragment)) => (rest, Some(fragment.to_string())),
            None => (input, None),
        };
        let (rest, query) = match rest.split_once('?') {
            Some((rest, query)) => (rest, Some(query.to_string())),
            None => (rest, None),
        };

        let (scheme, rest) = match rest.find(|c: char| c == ':' || c == '/') {
            Some(i) if i > 0 && rest[i..].starts_with(':') => {
                let scheme = &rest[..i];
                if !is_scheme(scheme) {
                    return Err(invalid(input, "malformed scheme"));
                }
                (Some(scheme.to_string()), &rest[i + 1..])
            }
            Some(0) if rest.starts_with(':') => return Err(invalid(input, "empty scheme")),
            _ => (None, rest),
        };

        let (authority, path) = match rest.strip_prefix("//") {
            Some(after) => {
                let end = after.find('/').unwrap_or(after.len());
                (Some(after[..end].to_string()), &after[end..])
            }
            None => (None, rest),
        };

        Ok(Self {
            scheme,
            authority,
            path: path.to_string(),
            query,
            fragment,
        })
    }

    pub fn scheme(&self) -> Option<&str> {
        self.scheme.as_deref()
    }

    pub fn authority(&self) -> Option<&str> {
        self.authority.as_deref()
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    pub fn is_absolute(&self) -> bool {
        self.scheme.is_some()
    }

    pub fn host(&self) -> Option<&str> {
        self.host_and_port()
            .map(|(host, _)| host)
            .filter(|host| !host.is_empty())
    }

    pub fn port(&self) -> Option<u16> {
        self.host_and_port()
            .and_then(|(_, port)| port)
            .and_then(|port| port.parse().ok())
    }

    /// Same reference with its query replaced. Characters that may not
    /// appear in a query are escaped; an empty query removes it.
    pub fn with_query(&self, query: &str) -> Self {
        let mut uri = self.clone();
        uri.query = if query.is_empty() {
            None
        } else {
            Some(UrlUtils::sanitize_query(query))
        };
        uri
    }

    /// `Host` header value; the port is kept only when it is not the
    /// scheme's default.
    pub fn host_header(&self) -> Option<String> {
        let host = self.host()?;
        let default_port = match self.scheme() {
            Some(scheme) if scheme.eq_ignore_ascii_case("http") => Some(80),
            Some(scheme) if scheme.eq_ignore_ascii_case("https") => Some(443),
            _ => None,
        };
        match self.port() {
            Some(port) if Some(port) != default_port => Some(format!("{}:{}", host, port)),
            _ => Some(host.to_string()),
        }
    }

    /// Origin-form request target: path (`/` when empty) plus query.
    pub fn request_target(&self) -> String {
        let path: &str = if self.path.is_empty() { "/" } else { &self.path };
        match &self.query {
            Some(query) => format!("{}?{}", path, query),
            None => path.to_string(),
        }
    }

    /// Convert to an `http::Uri` for sending. The fragment is dropped.
    pub fn to_http_uri(&self) -> Result<Uri> {
        let text = match (&self.scheme, &self.authority) {
            (Some(scheme), Some(authority)) => {
                format!("{}://{}{}", scheme, authority, self.request_target())
            }
            _ => {
                let mut uri = self.clone();
                uri.fragment = None;
                uri.to_string()
            }
        };
        text.parse::<Uri>()
            .map_err(|e| ReqoptsError::InvalidUrl(format!("Invalid URI '{}': {}", text, e)))
    }

    fn host_and_port(&self) -> Option<(&str, Option<&str>)> {
        let authority = self.authority.as_deref()?;
        let host_port = match authority.rsplit_once('@') {
            Some((_, host_port)) => host_port,
            None => authority,
        };
        if host_port.starts_with('[') {
            return match host_port.find(']') {
                Some(end) => Some((&host_port[..=end], host_port[end + 1..].strip_prefix(':'))),
                None => Some((host_port, None)),
            };
        }
        match host_port.rsplit_once(':') {
            Some((host, port)) => Some((host, Some(port))),
            None => Some((host_port, None)),
        }
    }
}

impl fmt::Display for UriRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(scheme) = &self.scheme {
            write!(f, "{}:", scheme)?;
        }
        if let Some(authority) = &self.authority {
            write!(f, "//{}", authority)?;
        }
        f.write_str(&self.path)?;
        if let Some(query) = &self.query {
            write!(f, "?{}", query)?;
        }
        if let Some(fragment) = &self.fragment {
            write!(f, "#{}", fragment)?;
        }
        Ok(())
    }
}

impl FromStr for UriRef {
    type Err = ReqoptsError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

fn is_scheme(candidate: &str) -> bool {
    let mut chars = candidate.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

fn invalid(input: &str, reason: &str) -> ReqoptsError {
    ReqoptsError::InvalidUrl(format!("Invalid URI '{}': {}", input, reason))
}
