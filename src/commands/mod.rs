//! CLI command definitions and argument parsing.
//!
//! This module defines all the CLI commands and their arguments using the clap
//! builder API. Each command group lives in its own file.

use clap::{ArgMatches, Command};

pub mod feed;
pub mod notify;
pub mod params;
pub mod target;

pub use params::{
    COMMAND_NOTIFY, COMMAND_PULL, COMMAND_PUSH, COMMAND_START, COMMAND_STOP, COMMAND_TARGETS,
    PARAMETER_FEED, PARAMETER_FORMAT, PARAMETER_HEADERS, PARAMETER_HOST, PARAMETER_PRETTY,
    PARAMETER_TARGET, PARAMETER_URL, PARAMETER_VALUE, PARAMETER_VERBOSE,
};

/// Build the complete command-line interface definition.
pub fn cli_command() -> Command {
    Command::new(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .about("A command-line interface for the Exposed API")
        .propagate_version(true)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .disable_help_subcommand(true)
        .arg(params::verbose_parameter())
        .arg(params::format_parameter())
        .arg(params::format_pretty_parameter())
        .arg(params::format_with_headers_parameter())
        .subcommand(target::start_command())
        .subcommand(target::stop_command())
        .subcommand(target::targets_command())
        .subcommand(feed::push_command())
        .subcommand(feed::pull_command())
        .subcommand(notify::notify_command())
}

/// Parse the process arguments, exiting with usage information on error.
pub fn create_cli_commands() -> ArgMatches {
    cli_command().get_matches()
}
