//! Utility functions and helpers

use crate::error::{Result, ReqoptsError};
use crate::http::UriRef;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use std::path::{Path, PathBuf};
use url::Url;

const QUERY_ESCAPES: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>');

/// URL validation and parsing utilities
pub struct UrlUtils;

impl UrlUtils {
    /// Validate and normalize URL
    pub fn validate_url(input: &str) -> Result<Url> {
        // Add http:// if no scheme is provided
        let url_str = if input.contains("://") {
            input.to_string()
        } else {
            format!("http://{}", input)
        };

        Url::parse(&url_str)
            .map_err(|e| ReqoptsError::InvalidUrl(format!("Invalid URL '{}': {}", input, e)))
    }

    /// Resolve `reference` against `base` (RFC 3986 section 5).
    pub fn resolve(base: &str, reference: &UriRef) -> Result<UriRef> {
        let base_url = Url::parse(base).map_err(|e| {
            ReqoptsError::InvalidUrl(format!("Invalid base URI '{}': {}", base, e))
        })?;
        let reference = reference.to_string();
        let resolved = base_url.join(&reference).map_err(|e| {
            ReqoptsError::InvalidUrl(format!(
                "Cannot resolve '{}' against '{}': {}",
                reference, base, e
            ))
        })?;
        UriRef::parse(resolved.as_str())
    }

    /// Percent-encode the characters a request target may not carry in its
    /// query. Everything else, existing escapes included, is kept as given.
    pub fn sanitize_query(query: &str) -> String {
        utf8_percent_encode(query, QUERY_ESCAPES).to_string()
    }
}

/// File system utilities
pub struct FileUtils;

impl FileUtils {
    /// Expand tilde (~) in file paths
    pub fn expand_path(path: &str) -> Result<PathBuf> {
        if let Some(rest) = path.strip_prefix("~/") {
            if let Some(home_dir) = dirs::home_dir() {
                Ok(home_dir.join(rest))
            } else {
                Err(ReqoptsError::Config(
                    "Cannot determine home directory".to_string(),
                ))
            }
        } else {
            Ok(PathBuf::from(path))
        }
    }

    /// Read a whole file, reporting missing files as configuration errors
    pub fn read_to_string(path: &Path) -> Result<String> {
        if !path.is_file() {
            return Err(ReqoptsError::Config(format!(
                "Not a readable file: {:?}",
                path
            )));
        }
        Ok(std::fs::read_to_string(path)?)
    }
}

/// String utilities
pub struct StringUtils;

impl StringUtils {
    /// Parse `Name: value` header lines
    pub fn parse_header(input: &str) -> Result<(String, String)> {
        let parts: Vec<&str> = input.splitn(2, ':').collect();
        match parts.as_slice() {
            [key, value] if !key.trim().is_empty() => {
                let key = key.trim().to_string();
                let value = value.trim().to_string();
                Ok((key, value))
            }
            _ => Err(ReqoptsError::Config(format!(
                "Invalid header format: '{}'. Expected 'key: value'",
                input
            ))),
        }
    }

    /// Parse `key=value` form fields
    pub fn parse_field(input: &str) -> Result<(String, String)> {
        match input.split_once('=') {
            Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
            _ => Err(ReqoptsError::Config(format!(
                "Invalid form field: '{}'. Expected 'key=value'",
                input
            ))),
        }
    }
}
