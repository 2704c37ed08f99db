use super::{render_request, OutputWriter};
use crate::config::OutputConfig;
use crate::http::Request;
use reqwest::Method;
use tempfile::tempdir;

#[test]
fn render_request_uses_origin_form_target() {
    let request = Request::new(Method::POST, "http://example.com/post?a=1".parse().expect("uri"))
        .with_header("Content-Type", ["text/plain"])
        .with_body("hello");

    let rendered = String::from_utf8(render_request(&request)).expect("utf8");
    assert_eq!(
        rendered,
        "POST /post?a=1 HTTP/1.1\r\nHost: example.com\r\nContent-Type: text/plain\r\n\r\nhello"
    );
}

#[test]
fn render_request_joins_repeated_values() {
    let request = Request::new(Method::GET, "/".parse().expect("uri"))
        .with_header("X-Foo", ["Bar", "Baz"]);
    let rendered = String::from_utf8(render_request(&request)).expect("utf8");
    assert!(rendered.contains("X-Foo: Bar, Baz\r\n"));
}

#[test]
fn writer_writes_to_configured_file() {
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("out.txt");
    let writer = OutputWriter::new(OutputConfig {
        file: Some(path.clone()),
        ..OutputConfig::default()
    });

    writer.write(b"payload").expect("write");
    assert_eq!(std::fs::read(&path).expect("read"), b"payload");
}
