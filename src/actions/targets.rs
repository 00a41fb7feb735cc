use crate::{
    actions::print_hits,
    client::ExposedClient,
    commands::params::PARAMETER_HOST,
    error::CliError,
    model::FeedColumn,
    param_utils::{get_format_parameter_value, get_required_argument},
};
use clap::ArgMatches;
use tracing::trace;

pub async fn start_target(
    client: &mut ExposedClient,
    sub_matches: &ArgMatches,
) -> Result<(), CliError> {
    let host = get_required_argument(sub_matches, PARAMETER_HOST)?;
    trace!("Executing 'start' command for {}", host);

    client.add_target(host).await?;
    println!("Added target: {}", host);

    Ok(())
}

pub async fn stop_target(
    client: &mut ExposedClient,
    sub_matches: &ArgMatches,
) -> Result<(), CliError> {
    let host = get_required_argument(sub_matches, PARAMETER_HOST)?;
    trace!("Executing 'stop' command for {}", host);

    client.remove_target(host).await?;
    println!("Removed target: {}", host);

    Ok(())
}

pub async fn list_targets(
    client: &mut ExposedClient,
    sub_matches: &ArgMatches,
) -> Result<(), CliError> {
    trace!("Executing 'targets' command");

    let format = get_format_parameter_value(sub_matches)?;
    let response = client.list_targets().await?;
    print_hits(&response, &format, FeedColumn::Host)
}
