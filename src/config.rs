//! Configuration management for the reqopts command line

use std::path::PathBuf;

use reqwest::Method;

use crate::options::RequestOptions;

/// Output configuration
#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    pub file: Option<PathBuf>,
    pub verbose: bool,
    pub silent: bool,
}

/// Main configuration struct
#[derive(Debug, Clone)]
pub struct Config {
    pub method: Method,
    pub url: String,
    pub options: RequestOptions,
    /// Send the request instead of printing it.
    pub send: bool,
    pub output: OutputConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            method: Method::GET,
            url: String::new(),
            options: RequestOptions::default(),
            send: false,
            output: OutputConfig::default(),
        }
    }
}
