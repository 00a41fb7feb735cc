use crate::{
    actions::print_hits,
    client::ExposedClient,
    commands::params::{PARAMETER_FEED, PARAMETER_TARGET, PARAMETER_VALUE},
    error::CliError,
    model::FeedColumn,
    param_utils::{get_format_parameter_value, get_required_argument},
};
use clap::ArgMatches;
use tracing::trace;

pub async fn push_feed(
    client: &mut ExposedClient,
    sub_matches: &ArgMatches,
) -> Result<(), CliError> {
    let feed = get_required_argument(sub_matches, PARAMETER_FEED)?;
    let target = get_required_argument(sub_matches, PARAMETER_TARGET)?;
    let value = get_required_argument(sub_matches, PARAMETER_VALUE)?;
    trace!("Executing 'push' command: {} {} {}", feed, target, value);

    client.push(feed, target, value).await?;
    println!("Saved data");

    Ok(())
}

pub async fn pull_feed(
    client: &mut ExposedClient,
    sub_matches: &ArgMatches,
) -> Result<(), CliError> {
    let feed = get_required_argument(sub_matches, PARAMETER_FEED)?;
    // no target means every target
    let target = sub_matches
        .get_one::<String>(PARAMETER_TARGET)
        .map(String::as_str)
        .unwrap_or_default();
    trace!("Executing 'pull' command: {} {:?}", feed, target);

    let format = get_format_parameter_value(sub_matches)?;
    let response = client.pull(feed, target).await?;
    print_hits(&response, &format, FeedColumn::Value)
}
