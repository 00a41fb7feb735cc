use crate::{
    commands::params::{PARAMETER_FORMAT, PARAMETER_HEADERS, PARAMETER_PRETTY},
    error::CliError,
    format::{OutputFormat, OutputFormatOptions},
};
use clap::ArgMatches;
use tracing::trace;

pub fn get_format_parameter_value(sub_matches: &ArgMatches) -> Result<OutputFormat, CliError> {
    trace!("Resolving output format options...");

    let format = sub_matches
        .get_one::<String>(PARAMETER_FORMAT)
        .map(String::as_str)
        .unwrap_or(crate::format::TEXT);
    let with_headers = sub_matches.get_flag(PARAMETER_HEADERS);
    let pretty = sub_matches.get_flag(PARAMETER_PRETTY);

    trace!("Format: {}", format);
    trace!("With headers: {}", with_headers);
    trace!("Pretty: {}", pretty);

    let options = OutputFormatOptions {
        with_headers,
        pretty,
    };
    Ok(OutputFormat::from_string_with_options(format, options)?)
}

/// Fetch a positional argument that clap has already declared mandatory.
pub fn get_required_argument<'a>(
    sub_matches: &'a ArgMatches,
    name: &str,
) -> Result<&'a str, CliError> {
    sub_matches
        .try_get_one::<String>(name)
        .ok()
        .flatten()
        .map(String::as_str)
        .ok_or_else(|| CliError::MissingRequiredArgument(name.to_string()))
}
