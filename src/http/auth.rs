//! HTTP authentication utilities

use crate::error::{Result, ReqoptsError};
use base64::Engine;

/// Credentials from the `auth` option: `[user, pass]` or
/// `[user, pass, scheme]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Auth {
    pub username: String,
    pub password: String,
    pub scheme: Option<String>,
}

impl Auth {
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            scheme: None,
        }
    }

    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = Some(scheme.into());
        self
    }

    /// Absent scheme means basic.
    pub fn is_basic(&self) -> bool {
        self.scheme
            .as_deref()
            .map(|scheme| scheme.eq_ignore_ascii_case("basic"))
            .unwrap_or(true)
    }

    /// `Authorization` value for basic auth, if this is basic auth.
    pub fn header_value(&self) -> Option<String> {
        self.is_basic()
            .then(|| Self::basic_header(&self.username, &self.password))
    }

    /// Create basic auth header value
    pub fn basic_header(username: &str, password: &str) -> String {
        let credentials = format!("{}:{}", username, password);
        let encoded = base64::engine::general_purpose::STANDARD.encode(credentials.as_bytes());
        format!("Basic {}", encoded)
    }

    /// Parse user:password format
    pub fn parse_user_pass(input: &str) -> Result<Self> {
        let parts: Vec<&str> = input.splitn(2, ':').collect();
        match parts.as_slice() {
            [user, pass] => Ok(Self::basic(*user, *pass)),
            [user] if !user.is_empty() => Ok(Self::basic(*user, "")),
            _ => Err(ReqoptsError::Config(
                "Invalid user:password format".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Auth;

    #[test]
    fn basic_header_encodes_credentials() {
        assert_eq!(Auth::basic_header("user", "pass"), "Basic dXNlcjpwYXNz");
    }

    #[test]
    fn scheme_is_case_insensitive() {
        let auth = Auth::basic("u", "p").with_scheme("BASIC");
        assert!(auth.is_basic());
        assert!(auth.header_value().is_some());

        let digest = Auth::basic("u", "p").with_scheme("digest");
        assert_eq!(digest.header_value(), None);
    }

    #[test]
    fn parse_user_pass_splits_on_first_colon() {
        let auth = Auth::parse_user_pass("me:se:cret").expect("auth");
        assert_eq!(auth.username, "me");
        assert_eq!(auth.password, "se:cret");

        let auth = Auth::parse_user_pass("me").expect("auth");
        assert_eq!(auth.password, "");

        assert!(Auth::parse_user_pass("").is_err());
    }
}
