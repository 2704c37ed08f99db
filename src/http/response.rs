//! HTTP response values returned by a transport

use bytes::Bytes;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::Result;
use crate::http::headers::Headers;

#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    status: StatusCode,
    headers: Headers,
    body: Bytes,
}

impl Response {
    pub fn new(status: StatusCode, headers: Headers, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// Whether the `Content-Type` announces a JSON body.
    pub fn is_json(&self) -> bool {
        self.headers
            .get_line("Content-Type")
            .map(|ct| ct.contains("application/json"))
            .unwrap_or(false)
    }

    /// Body re-indented when the response declares JSON, verbatim otherwise.
    pub fn pretty_text(&self) -> Result<String> {
        if !self.is_json() {
            return Ok(self.text());
        }
        let value: Value = serde_json::from_slice(&self.body)?;
        Ok(serde_json::to_string_pretty(&value)?)
    }
}

#[cfg(test)]
mod tests {
    use super::Response;
    use crate::http::headers::Headers;
    use reqwest::StatusCode;

    #[test]
    fn pretty_text_formats_json_only() {
        let headers: Headers = [("content-type", "application/json")].into_iter().collect();
        let response = Response::new(StatusCode::OK, headers, "{\"a\":1}");
        assert_eq!(response.pretty_text().expect("pretty"), "{\n  \"a\": 1\n}");

        let plain = Response::new(StatusCode::OK, Headers::new(), "{\"a\":1}");
        assert_eq!(plain.pretty_text().expect("plain"), "{\"a\":1}");
    }

    #[test]
    fn json_decodes_body() {
        let response = Response::new(StatusCode::OK, Headers::new(), "{}");
        let value: serde_json::Value = response.json().expect("json");
        assert!(value.as_object().map(|o| o.is_empty()).unwrap_or(false));
    }
}
