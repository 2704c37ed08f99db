//! multipart/form-data body assembly

use std::path::Path;

use bytes::{BufMut, Bytes, BytesMut};
use uuid::Uuid;

use crate::http::headers::Headers;

/// One field of a multipart body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultipartPart {
    pub name: String,
    pub contents: Bytes,
    pub filename: Option<String>,
    pub headers: Headers,
}

impl MultipartPart {
    pub fn new(name: impl Into<String>, contents: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            contents: contents.into(),
            filename: None,
            headers: Headers::new(),
        }
    }

    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.append(name, value);
        self
    }

    fn filename(&self) -> Option<&str> {
        self.filename.as_deref().filter(|name| !name.is_empty())
    }

    /// Part headers: caller-supplied ones, then defaults for whatever the
    /// caller left out.
    fn resolved_headers(&self) -> Headers {
        let mut headers = self.headers.clone();

        if !headers.contains("Content-Disposition") {
            let disposition = match self.filename() {
                Some(filename) => format!(
                    "form-data; name=\"{}\"; filename=\"{}\"",
                    self.name,
                    basename(filename)
                ),
                None => format!("form-data; name=\"{}\"", self.name),
            };
            headers.append("Content-Disposition", disposition);
        }

        if !headers.contains("Content-Length") && !self.contents.is_empty() {
            headers.append("Content-Length", self.contents.len().to_string());
        }

        if !headers.contains("Content-Type") {
            if let Some(mime) = self.filename().and_then(mime_from_filename) {
                headers.append("Content-Type", mime);
            }
        }

        headers
    }
}

/// A finished multipart payload and the boundary that delimits it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultipartBody {
    boundary: String,
    bytes: Bytes,
}

impl MultipartBody {
    /// Assemble `parts` under a freshly generated boundary.
    pub fn new(parts: &[MultipartPart]) -> Self {
        Self::with_boundary(parts, Uuid::new_v4().simple().to_string())
    }

    pub fn with_boundary(parts: &[MultipartPart], boundary: impl Into<String>) -> Self {
        let boundary = boundary.into();
        let mut buf = BytesMut::new();

        for part in parts {
            buf.put_slice(format!("--{}\r\n", boundary).as_bytes());
            buf.put_slice(part.resolved_headers().to_string().as_bytes());
            buf.put_slice(b"\r\n");
            buf.put_slice(&part.contents);
            buf.put_slice(b"\r\n");
        }
        buf.put_slice(format!("--{}--\r\n", boundary).as_bytes());

        Self {
            boundary,
            bytes: buf.freeze(),
        }
    }

    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    /// `Content-Type` value announcing this body.
    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn to_bytes(&self) -> Bytes {
        self.bytes.clone()
    }
}

fn basename(filename: &str) -> &str {
    Path::new(filename)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(filename)
}

fn mime_from_filename(filename: &str) -> Option<&'static str> {
    mime_guess::from_path(filename).first_raw()
}
