use clap::ArgMatches;
use exposed::{
    actions::{feeds, notify, targets},
    client::ExposedClient,
    commands::{
        COMMAND_NOTIFY, COMMAND_PULL, COMMAND_PUSH, COMMAND_START, COMMAND_STOP, COMMAND_TARGETS,
    },
    error::CliError,
};

/// Dispatch the parsed command line to its handler.
pub async fn execute_command(
    client: &mut ExposedClient,
    matches: &ArgMatches,
) -> Result<(), CliError> {
    match matches.subcommand() {
        Some((COMMAND_START, sub_matches)) => targets::start_target(client, sub_matches).await,
        Some((COMMAND_STOP, sub_matches)) => targets::stop_target(client, sub_matches).await,
        Some((COMMAND_TARGETS, sub_matches)) => targets::list_targets(client, sub_matches).await,
        Some((COMMAND_PUSH, sub_matches)) => feeds::push_feed(client, sub_matches).await,
        Some((COMMAND_PULL, sub_matches)) => feeds::pull_feed(client, sub_matches).await,
        Some((COMMAND_NOTIFY, sub_matches)) => {
            notify::set_notification(client, sub_matches).await
        }
        Some((name, _)) => Err(CliError::UnsupportedSubcommand(name.to_string())),
        None => Err(CliError::UnsupportedSubcommand(String::from("unknown"))),
    }
}
