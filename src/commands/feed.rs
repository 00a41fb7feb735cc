//! Feed command definitions.

use crate::commands::params::{
    feed_parameter, target_parameter, value_parameter, COMMAND_PULL, COMMAND_PUSH,
    FEED_NAMES_HELP,
};
use clap::Command;

pub fn push_command() -> Command {
    Command::new(COMMAND_PUSH)
        .about("Push data into a feed")
        .long_about(format!(
            "Push data into any available feed: {}",
            FEED_NAMES_HELP
        ))
        .after_help("Example: exposed push port example.com 80")
        .arg(feed_parameter())
        .arg(target_parameter(true))
        .arg(value_parameter())
}

pub fn pull_command() -> Command {
    Command::new(COMMAND_PULL)
        .about("Pull feed for a target")
        .long_about(format!(
            "Pull data from any available feed: {}. Without a target, the feed of every target is returned.",
            FEED_NAMES_HELP
        ))
        .after_help("Example: exposed pull port example.com")
        .arg(feed_parameter())
        .arg(target_parameter(false))
}
