//! Synchronous transports that put a finished request on the wire

use reqwest::blocking::{Client, ClientBuilder};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use url::Url;

use crate::error::{Result, ReqoptsError};
use crate::http::headers::Headers;
use crate::http::request::Request;
use crate::http::response::Response;

/// Sends a request and waits for the response.
pub trait Transport {
    fn send(&self, request: Request) -> Result<Response>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, request: Request) -> Result<Response> {
        (**self).send(request)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn send(&self, request: Request) -> Result<Response> {
        (**self).send(request)
    }
}

/// Transport backed by a blocking reqwest client. Redirects are not
/// followed.
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self> {
        let client = ClientBuilder::new()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(ReqoptsError::Http)?;
        Ok(Self { client })
    }
}

impl Transport for ReqwestTransport {
    fn send(&self, request: Request) -> Result<Response> {
        if !request.uri().is_absolute() {
            return Err(ReqoptsError::InvalidUrl(format!(
                "Cannot send relative URI '{}'; supply an absolute URI or base_uri",
                request.uri()
            )));
        }
        let uri = request.uri().to_http_uri()?.to_string();
        let url = Url::parse(&uri)
            .map_err(|e| ReqoptsError::InvalidUrl(format!("Invalid URL '{}': {}", uri, e)))?;

        log::debug!("sending {} {}", request.method(), url);

        let mut builder = self
            .client
            .request(request.method().clone(), url)
            .headers(to_header_map(request.headers())?);
        if !request.body().is_empty() {
            builder = builder.body(request.body().as_bytes().to_vec());
        }

        let response = builder.send().map_err(ReqoptsError::Http)?;
        let status = response.status();
        let mut headers = Headers::new();
        for (name, value) in response.headers() {
            headers.append(name.as_str(), String::from_utf8_lossy(value.as_bytes()));
        }
        let body = response.bytes().map_err(ReqoptsError::Http)?;

        log::debug!("received {} ({} bytes)", status, body.len());
        Ok(Response::new(status, headers, body))
    }
}

fn to_header_map(headers: &Headers) -> Result<HeaderMap> {
    let mut map = HeaderMap::new();
    for (name, values) in headers.iter() {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| ReqoptsError::Transport(format!("Invalid header name '{}': {}", name, e)))?;
        for value in values {
            let header_value = HeaderValue::from_str(value).map_err(|e| {
                ReqoptsError::Transport(format!("Invalid value for header '{}': {}", name, e))
            })?;
            map.append(header_name.clone(), header_value);
        }
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::{to_header_map, ReqwestTransport, Transport};
    use crate::error::ReqoptsError;
    use crate::http::headers::Headers;
    use crate::http::request::Request;
    use reqwest::Method;

    #[test]
    fn header_map_keeps_repeated_values() {
        let headers: Headers = [("X-Foo", "Bar"), ("X-Foo", "Baz")].into_iter().collect();
        let map = to_header_map(&headers).expect("header map");
        let values: Vec<&str> = map
            .get_all("x-foo")
            .iter()
            .map(|v| v.to_str().expect("ascii"))
            .collect();
        assert_eq!(values, vec!["Bar", "Baz"]);
    }

    #[test]
    fn header_map_rejects_bad_names() {
        let headers: Headers = [("Bad Name", "x")].into_iter().collect();
        let err = to_header_map(&headers).expect_err("invalid name");
        assert!(matches!(err, ReqoptsError::Transport(_)));
    }

    #[test]
    fn relative_uri_is_rejected_before_io() {
        let transport = ReqwestTransport::new().expect("transport");
        for uri in ["/relative", "users?page=2"] {
            let request = Request::new(Method::GET, uri.parse().expect("uri"));
            let err = transport.send(request).expect_err("relative uri");
            assert!(matches!(err, ReqoptsError::InvalidUrl(_)));
        }
    }
}
