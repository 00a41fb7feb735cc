//! Shared command parameters for all CLI commands.
//!
//! This module defines the command and parameter names used across the CLI,
//! plus the argument definitions shared by several commands.

use crate::format::OutputFormat;
use clap::{Arg, ArgAction};
use url::Url;

// Target commands
pub const COMMAND_START: &str = "start";
pub const COMMAND_STOP: &str = "stop";
pub const COMMAND_TARGETS: &str = "targets";

// Feed commands
pub const COMMAND_PUSH: &str = "push";
pub const COMMAND_PULL: &str = "pull";

// Notification commands
pub const COMMAND_NOTIFY: &str = "notify";

// Parameter names
pub const PARAMETER_HOST: &str = "host";
pub const PARAMETER_FEED: &str = "feed";
pub const PARAMETER_TARGET: &str = "target";
pub const PARAMETER_VALUE: &str = "value";
pub const PARAMETER_URL: &str = "url";
pub const PARAMETER_FORMAT: &str = "format";
pub const PARAMETER_PRETTY: &str = "pretty";
pub const PARAMETER_HEADERS: &str = "headers";
pub const PARAMETER_VERBOSE: &str = "verbose";

pub const FEED_NAMES_HELP: &str = "port, domain, login, cve";

/// Create the global verbose flag.
pub fn verbose_parameter() -> Arg {
    Arg::new(PARAMETER_VERBOSE)
        .short('v')
        .long(PARAMETER_VERBOSE)
        .action(ArgAction::SetTrue)
        .global(true)
        .help("Enable verbose output for debugging")
}

/// Create the global format parameter.
pub fn format_parameter() -> Arg {
    Arg::new(PARAMETER_FORMAT)
        .short('f')
        .long(PARAMETER_FORMAT)
        .num_args(1)
        .required(false)
        .env("EXPOSED_FORMAT")
        .default_value("text")
        .global(true)
        .help("Output data format")
        .value_parser(OutputFormat::names())
}

pub fn format_pretty_parameter() -> Arg {
    Arg::new(PARAMETER_PRETTY)
        .long(PARAMETER_PRETTY)
        .action(ArgAction::SetTrue)
        .required(false)
        .global(true)
        .help("Format the JSON output pretty")
}

pub fn format_with_headers_parameter() -> Arg {
    Arg::new(PARAMETER_HEADERS)
        .long(PARAMETER_HEADERS)
        .action(ArgAction::SetTrue)
        .required(false)
        .env("EXPOSED_HEADERS")
        .global(true)
        .help("Format the CSV output with headers")
}

/// Host name of a monitored target.
pub fn host_parameter() -> Arg {
    Arg::new(PARAMETER_HOST)
        .required(true)
        .value_name("HOST")
        .help("Host name of the target (e.g., example.com)")
}

pub fn feed_parameter() -> Arg {
    Arg::new(PARAMETER_FEED)
        .required(true)
        .value_name("FEED")
        .value_parser(parse_feed_name)
        .help(format!("Feed name: {}", FEED_NAMES_HELP))
}

pub fn target_parameter(required: bool) -> Arg {
    let help = if required {
        "Host name of the target"
    } else {
        "Host name of the target; omit to read the feed of every target"
    };

    Arg::new(PARAMETER_TARGET)
        .required(required)
        .value_name("TARGET")
        .help(help)
}

pub fn value_parameter() -> Arg {
    Arg::new(PARAMETER_VALUE)
        .required(true)
        .value_name("VALUE")
        .help("Value to store in the feed (e.g., 80)")
}

pub fn url_parameter() -> Arg {
    Arg::new(PARAMETER_URL)
        .required(true)
        .value_name("URL")
        .value_parser(parse_callback_url)
        .help("Callback address that receives a POST request for every notification")
}

fn parse_callback_url(value: &str) -> Result<String, String> {
    let url = Url::parse(value).map_err(|e| format!("invalid URL: {}", e))?;
    match url.scheme() {
        "http" | "https" => Ok(value.to_string()),
        scheme => Err(format!("unsupported URL scheme {:?}", scheme)),
    }
}

fn parse_feed_name(value: &str) -> Result<String, String> {
    if value.is_empty() || value == "." || value == ".." {
        return Err(format!("invalid feed name {:?}", value));
    }
    if let Some(c) = value.chars().find(|c| matches!(c, '/' | '?' | '#')) {
        return Err(format!("feed name must not contain {:?}", c));
    }
    Ok(value.to_string())
}
