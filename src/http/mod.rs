//! HTTP client module
//!
//! Request and response values, the collaborators that create and send
//! them, and `HttpClient`, which normalizes options before every send.

use futures_util::future::{self, Ready};

use crate::error::Result;
use crate::normalize::normalize;
use crate::options::RequestOptions;

pub mod auth;
pub mod headers;
pub mod multipart;
pub mod request;
pub mod response;
pub mod transport;
pub mod uri;

pub use auth::Auth;
pub use headers::Headers;
pub use multipart::{MultipartBody, MultipartPart};
pub use request::{Body, DefaultRequestFactory, Request, RequestFactory};
pub use response::Response;
pub use transport::{ReqwestTransport, Transport};
pub use uri::UriRef;

/// HTTP client wrapper
pub struct HttpClient<T, F = DefaultRequestFactory> {
    transport: T,
    factory: F,
}

impl<T: Transport> HttpClient<T> {
    pub fn new(transport: T) -> Self {
        Self::with_factory(transport, DefaultRequestFactory)
    }
}

impl<T: Transport, F: RequestFactory> HttpClient<T, F> {
    pub fn with_factory(transport: T, factory: F) -> Self {
        Self { transport, factory }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Apply `options` to `request` and send the result.
    pub fn send(&self, request: Request, options: &RequestOptions) -> Result<Response> {
        let request = normalize(&request, options)?;
        self.transport.send(request)
    }

    /// Same as [`send`](Self::send); the returned future is already resolved.
    pub fn send_async(&self, request: Request, options: &RequestOptions) -> Ready<Result<Response>> {
        future::ready(self.send(request, options))
    }

    /// Build a request from `method` and `uri`, then send it.
    pub fn request(&self, method: &str, uri: &str, options: &RequestOptions) -> Result<Response> {
        let request = self.factory.create_request(method, uri)?;
        self.send(request, options)
    }

    pub fn request_async(
        &self,
        method: &str,
        uri: &str,
        options: &RequestOptions,
    ) -> Ready<Result<Response>> {
        future::ready(self.request(method, uri, options))
    }
}
