//! Output formatting and display utilities

use crate::config::OutputConfig;
use crate::error::Result;
use crate::http::Request;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

/// Output writer that handles file vs stdout
pub struct OutputWriter {
    config: OutputConfig,
}

impl OutputWriter {
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    /// Write content to configured output
    pub fn write(&self, content: &[u8]) -> Result<()> {
        if let Some(file_path) = &self.config.file {
            self.write_to_file(content, file_path)
        } else {
            self.write_to_stdout(content)
        }
    }

    /// Write verbose information (if enabled)
    pub fn write_verbose(&self, message: &str) {
        if self.config.verbose && !self.config.silent {
            eprintln!("* {}", message);
        }
    }

    /// Write error message
    pub fn write_error(&self, message: &str) {
        if !self.config.silent {
            eprintln!("reqopts: error: {}", message);
        }
    }

    fn write_to_file(&self, content: &[u8], file_path: &Path) -> Result<()> {
        let mut file = File::create(file_path)?;
        file.write_all(content)?;
        Ok(())
    }

    fn write_to_stdout(&self, content: &[u8]) -> Result<()> {
        let mut stdout = io::stdout().lock();
        stdout.write_all(content)?;
        stdout.flush()?;
        Ok(())
    }
}

/// Render `request` as an HTTP/1.1 message: request line, headers, blank
/// line, body.
pub fn render_request(request: &Request) -> Vec<u8> {
    let target = request.uri().request_target();

    let mut out = Vec::new();
    out.extend_from_slice(format!("{} {} HTTP/1.1\r\n", request.method(), target).as_bytes());
    out.extend_from_slice(request.headers().to_string().as_bytes());
    out.extend_from_slice(b"\r\n");
    out.extend_from_slice(request.body().as_bytes());
    out
}

#[cfg(test)]
mod tests;
