//! Target command definitions.
//!
//! This module defines CLI commands that manage the set of monitored hosts.

use crate::commands::params::{host_parameter, COMMAND_START, COMMAND_STOP, COMMAND_TARGETS};
use clap::Command;

pub fn start_command() -> Command {
    Command::new(COMMAND_START)
        .about("Start monitoring a new target")
        .after_help("Example: exposed start example.com")
        .arg(host_parameter())
}

pub fn stop_command() -> Command {
    Command::new(COMMAND_STOP)
        .about("Stop monitoring an existing target")
        .after_help("Example: exposed stop example.com")
        .arg(host_parameter())
}

pub fn targets_command() -> Command {
    Command::new(COMMAND_TARGETS)
        .about("List all targets")
        .visible_alias("ls")
        .after_help("Example: exposed targets")
}
