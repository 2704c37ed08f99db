//! Options normalizer
//!
//! Turns a request plus [`RequestOptions`] into a new request. Modifications
//! are staged in two layers: unconditional changes (caller headers, auth,
//! body, query) always win, while headers implied by a body encoding, such as
//! `Content-Type: application/json`, are only added when the request does not
//! already carry that header.

use crate::error::{Result, ReqoptsError};
use crate::http::{Body, Headers, MultipartBody, Request};
use crate::options::{Query, RequestOptions};
use crate::utils::UrlUtils;

pub mod encoding;

pub use encoding::{build_query, QueryEncoding};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
const JSON_CONTENT_TYPE: &str = "application/json";

/// Changes collected from the options before any of them touch the request.
#[derive(Debug, Default)]
struct PendingModification {
    set_headers: Headers,
    conditional: Headers,
    body: Option<Body>,
    query: Option<String>,
}

impl PendingModification {
    fn stage_body(&mut self, options: &RequestOptions) -> Result<()> {
        if let Some(params) = &options.form_params {
            self.body = Some(Body::from(build_query(params, QueryEncoding::FormUrlEncoded)));
            self.conditional.set("Content-Type", [FORM_CONTENT_TYPE]);
        }

        if let Some(parts) = &options.multipart {
            let multipart = MultipartBody::new(parts);
            log::trace!("built multipart body with boundary {}", multipart.boundary());
            self.body = Some(multipart.into());
        }

        if let Some(value) = &options.json {
            let text = serde_json::to_vec(value).map_err(|e| {
                ReqoptsError::Encoding(format!("json option cannot be encoded: {}", e))
            })?;
            self.body = Some(Body::from(text));
            self.conditional.set("Content-Type", [JSON_CONTENT_TYPE]);
        }

        Ok(())
    }

    /// Caller headers go in front of whatever the request keeps; body and
    /// query replace the current ones.
    fn apply_unconditional(&self, mut request: Request) -> Request {
        if !self.set_headers.is_empty() {
            let headers = request.headers().overlay(&self.set_headers);
            request = request.with_headers(headers);
        }
        if let Some(body) = &self.body {
            request = request.with_body(body.clone());
        }
        if let Some(query) = &self.query {
            let uri = request.uri().with_query(query);
            request = request.with_uri(uri, true);
        }
        request
    }

    /// Conditional headers the request lacks, placed in front.
    fn apply_conditional(&self, request: Request) -> Request {
        let mut missing = Headers::new();
        for (name, values) in self.conditional.iter() {
            if request.has_header(name) {
                log::trace!("keeping explicit {} header", name);
                continue;
            }
            missing.set(name, values.iter().cloned());
        }
        if missing.is_empty() {
            return request;
        }
        let headers = request.headers().overlay(&missing);
        request.with_headers(headers)
    }
}

fn check_conflicts(options: &RequestOptions) -> Result<()> {
    if options.form_params.is_some() && options.multipart.is_some() {
        return Err(ReqoptsError::Conflict(
            "You cannot use form_params and multipart at the same time. Use the \
             form_params option if you want to send application/x-www-form-urlencoded \
             requests, and the multipart option to send multipart/form-data requests."
                .to_string(),
        ));
    }
    Ok(())
}

/// Apply `options` to `request`, returning the resulting request.
///
/// Fails before producing anything when the options conflict, when a value
/// cannot be encoded, or when a URI cannot be resolved.
pub fn normalize(request: &Request, options: &RequestOptions) -> Result<Request> {
    check_conflicts(options)?;

    let mut request = request.clone();
    for (name, values) in options.headers.iter() {
        request = request.with_header(name, values.iter().cloned());
    }

    if let Some(base_uri) = &options.base_uri {
        let resolved = UrlUtils::resolve(base_uri, request.uri())?;
        log::debug!("resolved {} against {} as {}", request.uri(), base_uri, resolved);
        let preserve_host = request.has_header("Host");
        request = request.with_uri(resolved, preserve_host);
    }

    let mut pending = PendingModification {
        set_headers: options.headers.clone(),
        ..PendingModification::default()
    };

    pending.stage_body(options)?;

    if let Some(encoding) = options
        .decode_content
        .as_ref()
        .and_then(|decode| decode.accept_encoding())
    {
        pending.conditional.set("Accept-Encoding", [encoding]);
    }

    // A raw body given next to form_params, multipart or json replaces the
    // encoded one; the implied Content-Type is still staged.
    if let Some(body) = &options.body {
        if pending.body.is_some() {
            log::debug!("body option overrides the encoded request body");
        }
        pending.body = Some(body.clone());
    }

    if let Some(auth) = &options.auth {
        match auth.header_value() {
            Some(value) => pending.set_headers.set("Authorization", [value]),
            None => log::debug!(
                "auth scheme {:?} is not handled here, leaving it to the transport",
                auth.scheme
            ),
        }
    }

    if let Some(query) = &options.query {
        pending.query = Some(match query {
            Query::Raw(raw) => raw.clone(),
            Query::Params(params) => build_query(params, QueryEncoding::Rfc3986),
        });
    }

    let request = pending.apply_unconditional(request);

    // The boundary is only known once the multipart body is on the request.
    if let Some(multipart) = request.body().as_multipart() {
        pending
            .conditional
            .set("Content-Type", [multipart.content_type()]);
    }

    let request = pending.apply_conditional(request);
    log::debug!(
        "normalized {} {} with {} header(s), {} byte body",
        request.method(),
        request.uri(),
        request.headers().len(),
        request.body().len()
    );
    Ok(request)
}
