use std::sync::Mutex;

use reqopts::http::{Headers, Request, Response, Transport};
use reqopts::Result;
use reqwest::StatusCode;

/// Transport that records the last request and answers with a fixed response.
pub struct RecordingTransport {
    last: Mutex<Option<Request>>,
    response: Response,
}

impl RecordingTransport {
    pub fn new() -> Self {
        let headers: Headers = [("baz", "quix"), ("baz", "last")].into_iter().collect();
        Self {
            last: Mutex::new(None),
            response: Response::new(StatusCode::OK, headers, "{}"),
        }
    }

    pub fn last_request(&self) -> Request {
        self.last
            .lock()
            .expect("lock")
            .clone()
            .expect("a request was sent")
    }
}

impl Transport for RecordingTransport {
    fn send(&self, request: Request) -> Result<Response> {
        *self.last.lock().expect("lock") = Some(request);
        Ok(self.response.clone())
    }
}
