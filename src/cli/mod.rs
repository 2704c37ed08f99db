//! CLI argument parsing module
//!
//! This module handles command-line argument parsing and application entry point.

use crate::config::Config;
use crate::error::{Result, ReqoptsError};
use crate::exit_code::exit_code_for_error;
use crate::http::{Auth, DefaultRequestFactory, HttpClient, RequestFactory, ReqwestTransport};
use crate::normalize::normalize;
use crate::options::{DecodeContent, Params, RequestOptions};
use crate::output::{render_request, OutputWriter};
use crate::utils::{FileUtils, StringUtils, UrlUtils};
use clap::{Arg, ArgAction, ArgMatches, Command};
use reqwest::Method;
use serde_json::Value;

/// Main entry point for the CLI application
pub fn run() {
    crate::logging::init();

    let matches = create_app().get_matches();

    if let Err(e) = run_with_args(&matches) {
        let writer = OutputWriter::new(crate::config::OutputConfig {
            silent: matches.get_flag("silent"),
            ..Default::default()
        });
        writer.write_error(&e.to_string());
        std::process::exit(exit_code_for_error(&e));
    }
}

/// Run reqopts with parsed command line arguments
fn run_with_args(matches: &ArgMatches) -> Result<()> {
    let config = build_config_from_args(matches)?;
    let writer = OutputWriter::new(config.output.clone());

    if !config.send {
        let request = DefaultRequestFactory.create_request(config.method.as_str(), &config.url)?;
        let normalized = normalize(&request, &config.options)?;
        return writer.write(&render_request(&normalized));
    }

    writer.write_verbose(&format!("{} {}", config.method, config.url));
    let client = HttpClient::new(ReqwestTransport::new()?);
    let response = client.request(config.method.as_str(), &config.url, &config.options)?;
    writer.write_verbose(&format!("< {}", response.status()));
    if response.is_json() {
        match response.pretty_text() {
            Ok(pretty) => return writer.write(pretty.as_bytes()),
            Err(e) => log::debug!("response claims JSON but does not parse: {}", e),
        }
    }
    writer.write(response.body())
}

/// Create the CLI application structure
pub fn create_app() -> Command {
    Command::new("reqopts")
        .version(crate::VERSION)
        .about("Apply request options to an HTTP request and print or send the result")
        .arg(Arg::new("url")
            .help("The request URI, absolute or relative to --base-uri")
            .required(true)
            .index(1))
        .arg(Arg::new("request")
            .short('X')
            .long("request")
            .value_name("METHOD")
            .help("HTTP request method")
            .default_value("GET"))
        .arg(Arg::new("header")
            .short('H')
            .long("header")
            .value_name("HEADER")
            .help("Add custom HTTP header")
            .action(ArgAction::Append))
        .arg(Arg::new("options")
            .long("options")
            .value_name("JSON")
            .env("REQOPTS_OPTIONS")
            .help("Request options as a JSON object"))
        .arg(Arg::new("options-file")
            .long("options-file")
            .value_name("FILE")
            .conflicts_with("options")
            .help("Read request options from a JSON file"))
        .arg(Arg::new("base-uri")
            .long("base-uri")
            .value_name("URI")
            .help("Resolve the request URI against this base"))
        .arg(Arg::new("data")
            .short('d')
            .long("data")
            .value_name("DATA")
            .help("Raw request body"))
        .arg(Arg::new("json")
            .long("json")
            .value_name("JSON")
            .help("JSON request body"))
        .arg(Arg::new("form")
            .short('F')
            .long("form")
            .value_name("KEY=VALUE")
            .help("Add a urlencoded form field")
            .action(ArgAction::Append))
        .arg(Arg::new("query")
            .long("query")
            .value_name("QUERY")
            .help("Replace the query string"))
        .arg(Arg::new("user")
            .short('u')
            .long("user")
            .value_name("USER[:PASSWORD]")
            .help("HTTP basic authentication"))
        .arg(Arg::new("compressed")
            .long("compressed")
            .value_name("ENCODING")
            .help("Announce this Accept-Encoding unless a header already does"))
        .arg(Arg::new("send")
            .long("send")
            .help("Send the request instead of printing it")
            .action(ArgAction::SetTrue))
        .arg(Arg::new("verbose")
            .short('v')
            .long("verbose")
            .help("Verbose output")
            .action(ArgAction::SetTrue))
        .arg(Arg::new("silent")
            .short('s')
            .long("silent")
            .help("Silent mode")
            .action(ArgAction::SetTrue))
        .arg(Arg::new("output")
            .short('o')
            .long("output")
            .value_name("FILE")
            .help("Write output to file"))
}

/// Build configuration from command line arguments
fn build_config_from_args(matches: &ArgMatches) -> Result<Config> {
    let mut config = Config::default();

    if let Some(url) = matches.get_one::<String>("url") {
        config.url = url.clone();
    }

    if let Some(method) = matches.get_one::<String>("request") {
        config.method = Method::from_bytes(method.to_ascii_uppercase().as_bytes())
            .map_err(|_| ReqoptsError::Config(format!("Unknown HTTP method: {}", method)))?;
    }

    // Options documents first; individual flags layer on top
    let mut options = if let Some(json) = matches.get_one::<String>("options") {
        RequestOptions::from_json_str(json)?
    } else if let Some(path) = matches.get_one::<String>("options-file") {
        let path = FileUtils::expand_path(path)?;
        RequestOptions::from_json_str(&FileUtils::read_to_string(&path)?)?
    } else {
        RequestOptions::default()
    };

    if let Some(headers) = matches.get_many::<String>("header") {
        for header in headers {
            let (name, value) = StringUtils::parse_header(header)?;
            options.headers.append(name, value);
        }
    }

    if let Some(base_uri) = matches.get_one::<String>("base-uri") {
        options.base_uri = Some(UrlUtils::validate_url(base_uri)?.to_string());
    }

    if let Some(data) = matches.get_one::<String>("data") {
        options.body = Some(data.as_str().into());
    }

    if let Some(json) = matches.get_one::<String>("json") {
        let value: Value = serde_json::from_str(json)?;
        options.json = Some(value);
    }

    if let Some(fields) = matches.get_many::<String>("form") {
        let mut params = options.form_params.take().unwrap_or_else(Params::new);
        for field in fields {
            let (key, value) = StringUtils::parse_field(field)?;
            params.insert(key, Value::String(value));
        }
        options.form_params = Some(params);
    }

    if let Some(query) = matches.get_one::<String>("query") {
        options.query = Some(query.as_str().into());
    }

    if let Some(user) = matches.get_one::<String>("user") {
        options.auth = Some(Auth::parse_user_pass(user)?);
    }

    if let Some(encoding) = matches.get_one::<String>("compressed") {
        options.decode_content = Some(DecodeContent::Encoding(encoding.clone()));
    }

    config.options = options;
    config.send = matches.get_flag("send");

    config.output.verbose = matches.get_flag("verbose");
    config.output.silent = matches.get_flag("silent");

    if let Some(output_file) = matches.get_one::<String>("output") {
        config.output.file = Some(FileUtils::expand_path(output_file)?);
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::{build_config_from_args, create_app};
    use crate::error::ReqoptsError;
    use crate::options::Query;
    use reqwest::Method;

    fn config_for(args: &[&str]) -> crate::error::Result<crate::config::Config> {
        let matches = create_app()
            .try_get_matches_from(std::iter::once("reqopts").chain(args.iter().copied()))
            .expect("arguments parse");
        build_config_from_args(&matches)
    }

    #[test]
    fn flags_layer_over_options_document() {
        let config = config_for(&[
            "/post",
            "-X",
            "post",
            "--options",
            r#"{"headers": {"X-Doc": "1"}, "query": "a=1"}"#,
            "-H",
            "X-Flag: 2",
            "-F",
            "foo=bar",
            "--query",
            "b=2",
        ])
        .expect("config");

        assert_eq!(config.method, Method::POST);
        assert!(config.options.headers.contains("x-doc"));
        assert!(config.options.headers.contains("x-flag"));
        assert_eq!(config.options.query, Some(Query::Raw("b=2".to_string())));
        let form = config.options.form_params.expect("form");
        assert_eq!(form.get("foo").and_then(|v| v.as_str()), Some("bar"));
        assert!(!config.send);
    }

    #[test]
    fn malformed_header_flag_is_a_config_error() {
        let err = config_for(&["/", "-H", "no-colon"]).expect_err("bad header");
        assert!(matches!(err, ReqoptsError::Config(_)));
    }

    #[test]
    fn bad_options_document_is_a_type_error() {
        let err = config_for(&["/", "--options", r#"{"query": 5}"#]).expect_err("bad query");
        assert!(matches!(err, ReqoptsError::Type(_)));
    }
}
