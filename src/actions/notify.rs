use crate::{
    client::ExposedClient, commands::params::PARAMETER_URL, error::CliError,
    param_utils::get_required_argument,
};
use clap::ArgMatches;
use tracing::trace;

pub async fn set_notification(
    client: &mut ExposedClient,
    sub_matches: &ArgMatches,
) -> Result<(), CliError> {
    let url = get_required_argument(sub_matches, PARAMETER_URL)?;
    trace!("Executing 'notify' command for {}", url);

    client.set_notification(url).await?;
    println!("Notification address set: {}", url);

    Ok(())
}
