//! Typed request options
//!
//! `RequestOptions` is the set of modifications [`normalize`] applies to a
//! request. It can be built in code or parsed from a loosely-typed JSON
//! document with [`RequestOptions::from_value`], where unknown keys are
//! ignored and `null` means "not set".
//!
//! [`normalize`]: crate::normalize::normalize

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Result, ReqoptsError};
use crate::http::{Auth, Body, Headers, MultipartPart};

/// Insertion-ordered parameter mapping used by `form_params` and `query`.
pub type Params = Map<String, Value>;

/// Value of the `query` option.
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    /// Used verbatim as the query component.
    Raw(String),
    /// Encoded per RFC 3986.
    Params(Params),
}

impl From<&str> for Query {
    fn from(value: &str) -> Self {
        Query::Raw(value.to_string())
    }
}

impl From<String> for Query {
    fn from(value: String) -> Self {
        Query::Raw(value)
    }
}

impl From<Params> for Query {
    fn from(value: Params) -> Self {
        Query::Params(value)
    }
}

/// Value of the `decode_content` option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeContent {
    /// `true`: the transport picks the encodings it announces.
    Auto,
    /// `false`
    Disabled,
    /// An explicit `Accept-Encoding` value.
    Encoding(String),
}

impl DecodeContent {
    pub fn accept_encoding(&self) -> Option<&str> {
        match self {
            DecodeContent::Encoding(value) if !value.is_empty() => Some(value),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    pub headers: Headers,
    pub base_uri: Option<String>,
    pub form_params: Option<Params>,
    pub multipart: Option<Vec<MultipartPart>>,
    pub json: Option<Value>,
    pub body: Option<Body>,
    pub decode_content: Option<DecodeContent>,
    pub auth: Option<Auth>,
    pub query: Option<Query>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn header<N, I, V>(mut self, name: N, values: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.headers.set(name, values);
        self
    }

    pub fn base_uri(mut self, base_uri: impl Into<String>) -> Self {
        self.base_uri = Some(base_uri.into());
        self
    }

    pub fn form_params(mut self, params: Params) -> Self {
        self.form_params = Some(params);
        self
    }

    pub fn multipart(mut self, parts: Vec<MultipartPart>) -> Self {
        self.multipart = Some(parts);
        self
    }

    /// Set the `json` option from any serializable value.
    pub fn json<T: Serialize + ?Sized>(mut self, value: &T) -> Result<Self> {
        let value = serde_json::to_value(value)
            .map_err(|e| ReqoptsError::Encoding(format!("json value is not serializable: {}", e)))?;
        self.json = Some(value);
        Ok(self)
    }

    pub fn body(mut self, body: impl Into<Body>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn decode_content(mut self, decode_content: DecodeContent) -> Self {
        self.decode_content = Some(decode_content);
        self
    }

    pub fn basic_auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.auth = Some(Auth::basic(username, password));
        self
    }

    pub fn auth(mut self, auth: Auth) -> Self {
        self.auth = Some(auth);
        self
    }

    pub fn query(mut self, query: impl Into<Query>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Parse an options document.
    pub fn from_json_str(input: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(input)?;
        Self::from_value(value)
    }

    /// Parse a loosely-typed options map.
    pub fn from_value(value: Value) -> Result<Self> {
        let map = match value {
            Value::Object(map) => map,
            other => {
                return Err(ReqoptsError::Type(format!(
                    "options must be a JSON object, got {}",
                    kind(&other)
                )))
            }
        };

        let mut options = RequestOptions::default();
        for (key, value) in map {
            if value.is_null() {
                continue;
            }
            match key.as_str() {
                "headers" => options.headers = parse_headers("headers", value)?,
                "base_uri" => options.base_uri = Some(parse_string("base_uri", value)?),
                "form_params" => options.form_params = Some(parse_params("form_params", value)?),
                "multipart" => options.multipart = Some(parse_multipart(value)?),
                "json" => options.json = Some(value),
                "body" => options.body = Some(parse_body(value)?),
                "decode_content" => options.decode_content = Some(parse_decode_content(value)?),
                "auth" => options.auth = parse_auth(value)?,
                "query" => options.query = Some(parse_query(value)?),
                other => log::trace!("ignoring unrecognized option '{}'", other),
            }
        }
        Ok(options)
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(true) => Some("1".to_string()),
        Value::Bool(false) => Some(String::new()),
        _ => None,
    }
}

fn parse_string(option: &str, value: Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s),
        other => Err(ReqoptsError::Type(format!(
            "{} must be a string, got {}",
            option,
            kind(&other)
        ))),
    }
}

fn parse_headers(option: &str, value: Value) -> Result<Headers> {
    let map = match value {
        Value::Object(map) => map,
        other => {
            return Err(ReqoptsError::Type(format!(
                "{} must be an object, got {}",
                option,
                kind(&other)
            )))
        }
    };

    let mut headers = Headers::new();
    for (name, value) in map {
        let values = match &value {
            Value::Array(items) if items.is_empty() => {
                return Err(ReqoptsError::Type(format!(
                    "{} value for '{}' must not be an empty list",
                    option, name
                )))
            }
            Value::Array(items) => items.iter().map(scalar).collect::<Option<Vec<_>>>(),
            other => scalar(other).map(|s| vec![s]),
        };
        let values = values.ok_or_else(|| {
            ReqoptsError::Type(format!(
                "{} value for '{}' must be a string or a list of strings",
                option, name
            ))
        })?;
        headers.set(name, values);
    }
    Ok(headers)
}

fn parse_params(option: &str, value: Value) -> Result<Params> {
    match value {
        Value::Object(map) => Ok(map),
        Value::Array(items) => Ok(items
            .into_iter()
            .enumerate()
            .map(|(idx, item)| (idx.to_string(), item))
            .collect()),
        other => Err(ReqoptsError::Type(format!(
            "{} must be an object or an array, got {}",
            option,
            kind(&other)
        ))),
    }
}

#[derive(Deserialize)]
struct RawPart {
    name: String,
    contents: Value,
    #[serde(default)]
    filename: Option<String>,
    #[serde(default)]
    headers: Option<Value>,
}

fn parse_multipart(value: Value) -> Result<Vec<MultipartPart>> {
    let items = match value {
        Value::Array(items) => items,
        other => {
            return Err(ReqoptsError::Type(format!(
                "multipart must be an array of parts, got {}",
                kind(&other)
            )))
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(idx, item)| {
            let raw: RawPart = serde_json::from_value(item)
                .map_err(|e| ReqoptsError::Type(format!("multipart[{}]: {}", idx, e)))?;
            let contents = scalar(&raw.contents).ok_or_else(|| {
                ReqoptsError::Type(format!("multipart[{}].contents must be a string", idx))
            })?;
            let headers = match raw.headers {
                Some(value) => parse_headers(&format!("multipart[{}].headers", idx), value)?,
                None => Headers::new(),
            };
            Ok(MultipartPart {
                name: raw.name,
                contents: Bytes::from(contents),
                filename: raw.filename,
                headers,
            })
        })
        .collect()
}

fn parse_body(value: Value) -> Result<Body> {
    scalar(&value).map(Body::from).ok_or_else(|| {
        ReqoptsError::Type(format!(
            "body must be a string, got {}; use form_params or json for structured data",
            kind(&value)
        ))
    })
}

fn parse_decode_content(value: Value) -> Result<DecodeContent> {
    match value {
        Value::Bool(true) => Ok(DecodeContent::Auto),
        Value::Bool(false) => Ok(DecodeContent::Disabled),
        Value::String(s) => Ok(DecodeContent::Encoding(s)),
        other => Err(ReqoptsError::Type(format!(
            "decode_content must be a boolean or a string, got {}",
            kind(&other)
        ))),
    }
}

fn parse_auth(value: Value) -> Result<Option<Auth>> {
    let items = match value {
        Value::Bool(false) => return Ok(None),
        Value::Array(items) if items.is_empty() => return Ok(None),
        Value::Array(mut items) => {
            if items.len() == 3 && items[2].is_null() {
                items.pop();
            }
            items
        }
        other => {
            return Err(ReqoptsError::Type(format!(
                "auth must be [user, pass] or [user, pass, scheme], got {}",
                kind(&other)
            )))
        }
    };

    let fields: Option<Vec<String>> = items.iter().map(scalar).collect();
    match fields.as_deref() {
        Some([user, pass]) => Ok(Some(Auth::basic(user.as_str(), pass.as_str()))),
        Some([user, pass, scheme]) => {
            Ok(Some(Auth::basic(user.as_str(), pass.as_str()).with_scheme(scheme.as_str())))
        }
        _ => Err(ReqoptsError::Type(format!(
            "auth must hold 2 or 3 strings, got {} entries",
            items.len()
        ))),
    }
}

fn parse_query(value: Value) -> Result<Query> {
    match value {
        Value::String(s) => Ok(Query::Raw(s)),
        Value::Object(_) | Value::Array(_) => Ok(Query::Params(parse_params("query", value)?)),
        other => Err(ReqoptsError::Type(format!(
            "query must be a string or an object, got {}",
            kind(&other)
        ))),
    }
}
