//! reqopts - apply request options to immutable HTTP requests
//!
//! The core is [`normalize()`]: given a [`Request`](crate::http::Request) and a
//! [`RequestOptions`] bag (headers, base URI, form, multipart or JSON
//! body, raw body, content negotiation, basic auth, query string) it returns a
//! new request with every option applied. Headers the caller sets explicitly
//! always win over headers implied by a body encoding.
//!
//! [`HttpClient`](crate::http::HttpClient) wraps a
//! [`Transport`](crate::http::Transport) so that every send goes
//! through the normalizer first.

pub mod cli;
pub mod config;
pub mod error;
pub mod exit_code;
pub mod http;
pub mod logging;
pub mod normalize;
pub mod options;
pub mod output;
pub mod utils;

pub use error::{Result, ReqoptsError};
pub use normalize::normalize;
pub use options::RequestOptions;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
