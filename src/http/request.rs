//! Immutable HTTP request values

use std::borrow::Cow;
use std::io::Read;

use bytes::Bytes;
use reqwest::Method;

use crate::error::{Result, ReqoptsError};
use crate::http::headers::Headers;
use crate::http::multipart::MultipartBody;
use crate::http::uri::UriRef;

/// Request or response payload, fully buffered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    Bytes(Bytes),
    Multipart(MultipartBody),
}

impl Body {
    pub fn empty() -> Self {
        Body::Bytes(Bytes::new())
    }

    /// Buffer a reader into a body.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf)?;
        Ok(Body::Bytes(Bytes::from(buf)))
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Body::Bytes(bytes) => bytes,
            Body::Multipart(multipart) => multipart.as_bytes(),
        }
    }

    pub fn to_bytes(&self) -> Bytes {
        match self {
            Body::Bytes(bytes) => bytes.clone(),
            Body::Multipart(multipart) => multipart.to_bytes(),
        }
    }

    pub fn as_multipart(&self) -> Option<&MultipartBody> {
        match self {
            Body::Multipart(multipart) => Some(multipart),
            Body::Bytes(_) => None,
        }
    }

    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }

    /// Body as text, replacing invalid UTF-8.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.as_bytes())
    }
}

impl Default for Body {
    fn default() -> Self {
        Body::empty()
    }
}

impl From<&str> for Body {
    fn from(value: &str) -> Self {
        Body::Bytes(Bytes::copy_from_slice(value.as_bytes()))
    }
}

impl From<String> for Body {
    fn from(value: String) -> Self {
        Body::Bytes(Bytes::from(value))
    }
}

impl From<Vec<u8>> for Body {
    fn from(value: Vec<u8>) -> Self {
        Body::Bytes(Bytes::from(value))
    }
}

impl From<Bytes> for Body {
    fn from(value: Bytes) -> Self {
        Body::Bytes(value)
    }
}

impl From<MultipartBody> for Body {
    fn from(value: MultipartBody) -> Self {
        Body::Multipart(value)
    }
}

/// An outbound request. Every `with_*` method consumes the request and
/// returns the modified copy.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    method: Method,
    uri: UriRef,
    headers: Headers,
    body: Body,
}

impl Request {
    /// Create a request. An absolute URI also yields a leading `Host` header.
    pub fn new(method: Method, uri: UriRef) -> Self {
        let request = Self {
            method,
            uri,
            headers: Headers::new(),
            body: Body::empty(),
        };
        request.with_host_from_uri()
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn uri(&self) -> &UriRef {
        &self.uri
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    pub fn has_header(&self, name: &str) -> bool {
        self.headers.contains(name)
    }

    pub fn header_line(&self, name: &str) -> Option<String> {
        self.headers.get_line(name)
    }

    /// Replace all values of `name`.
    pub fn with_header<N, I, V>(mut self, name: N, values: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.headers.set(name, values);
        self
    }

    pub fn with_added_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.append(name, value);
        self
    }

    pub fn without_header(mut self, name: &str) -> Self {
        self.headers.remove(name);
        self
    }

    /// Swap the whole header map.
    pub fn with_headers(mut self, headers: Headers) -> Self {
        self.headers = headers;
        self
    }

    /// Change the URI. `Host` is refreshed from the new URI unless
    /// `preserve_host` is set and the request already carries one.
    pub fn with_uri(mut self, uri: UriRef, preserve_host: bool) -> Self {
        self.uri = uri;
        if preserve_host && self.has_header("Host") {
            return self;
        }
        self.with_host_from_uri()
    }

    pub fn with_body(mut self, body: impl Into<Body>) -> Self {
        self.body = body.into();
        self
    }

    fn with_host_from_uri(mut self) -> Self {
        let Some(host) = self.uri.host_header() else {
            return self;
        };
        let name = self
            .headers
            .names()
            .find(|name| name.eq_ignore_ascii_case("host"))
            .unwrap_or("Host")
            .to_string();
        let mut front = Headers::new();
        front.set(name, [host]);
        self.headers = self.headers.overlay(&front);
        self
    }
}

/// Source of fresh requests.
pub trait RequestFactory {
    fn create_request(&self, method: &str, uri: &str) -> Result<Request>;
}

/// Builds requests from a method name and any URI reference, absolute or
/// relative.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultRequestFactory;

impl RequestFactory for DefaultRequestFactory {
    fn create_request(&self, method: &str, uri: &str) -> Result<Request> {
        let method = Method::from_bytes(method.to_ascii_uppercase().as_bytes())
            .map_err(|_| ReqoptsError::Config(format!("Unknown HTTP method: {}", method)))?;
        Ok(Request::new(method, UriRef::parse(uri)?))
    }
}

#[cfg(test)]
mod tests {
    use super::{Body, DefaultRequestFactory, Request, RequestFactory};
    use reqwest::Method;

    #[test]
    fn absolute_uri_sets_leading_host() {
        let request = DefaultRequestFactory
            .create_request("get", "http://example.com:8080/path")
            .expect("request");
        assert_eq!(request.method(), &Method::GET);
        assert_eq!(request.header_line("host").as_deref(), Some("example.com:8080"));
    }

    #[test]
    fn default_port_is_left_out_of_host() {
        let request = DefaultRequestFactory
            .create_request("GET", "https://example.com:443/")
            .expect("request");
        assert_eq!(request.header_line("Host").as_deref(), Some("example.com"));
    }

    #[test]
    fn relative_uri_has_no_host() {
        let request = DefaultRequestFactory
            .create_request("post", "/oauth/token")
            .expect("request");
        assert!(request.headers().is_empty());
        assert_eq!(request.uri().path(), "/oauth/token");
    }

    #[test]
    fn relative_path_references_are_accepted() {
        for uri in ["users?x=1", "../x", ""] {
            let request = DefaultRequestFactory
                .create_request("GET", uri)
                .expect("relative reference");
            assert_eq!(request.uri().to_string(), uri);
            assert!(!request.has_header("Host"));
        }
    }

    #[test]
    fn with_uri_respects_preserve_host() {
        let request = DefaultRequestFactory
            .create_request("GET", "http://a.example/")
            .expect("request");
        let other = "http://b.example/x".parse().expect("uri");

        let preserved = request.clone().with_uri(other, true);
        assert_eq!(preserved.header_line("Host").as_deref(), Some("a.example"));

        let other = "http://b.example/x".parse().expect("uri");
        let refreshed = request.with_uri(other, false);
        assert_eq!(refreshed.header_line("Host").as_deref(), Some("b.example"));
    }

    #[test]
    fn mutators_leave_original_untouched() {
        let original = Request::new(Method::GET, "/".parse().expect("uri"));
        let changed = original
            .clone()
            .with_header("X-Foo", ["bar"])
            .with_body("payload");
        assert!(original.headers().is_empty());
        assert!(original.body().is_empty());
        assert_eq!(changed.body().text(), "payload");
    }

    #[test]
    fn body_from_reader_buffers_everything() {
        let body = Body::from_reader(&b"streamed bytes"[..]).expect("body");
        assert_eq!(body.as_bytes(), b"streamed bytes");
        assert!(body.as_multipart().is_none());
    }
}
