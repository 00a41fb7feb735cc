use crate::commands::params::{url_parameter, COMMAND_NOTIFY};
use clap::Command;

pub fn notify_command() -> Command {
    Command::new(COMMAND_NOTIFY)
        .about("Set a callback address for notifications")
        .long_about(
            "A callback URL can be any endpoint that receives a POST request, including Slack or Teams webhooks",
        )
        .after_help("Example: exposed notify https://hooks.slack.com/services/T123/B456/7890")
        .arg(url_parameter())
}
