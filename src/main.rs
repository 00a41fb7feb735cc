use exposed::{
    client::ExposedClient,
    commands::{create_cli_commands, PARAMETER_VERBOSE},
    error::CliError,
    session::Session,
};
use tracing::error;
use tracing_subscriber::EnvFilter;

mod cli;
use cli::execute_command;

/// Main entry point for the program
#[tokio::main]
async fn main() {
    let matches = create_cli_commands();

    // Intialize the logging subsystem
    let default_directive = if matches.get_flag(PARAMETER_VERBOSE) {
        "exposed=debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(&matches).await {
        error!("{}", e);
        eprintln!("ERROR: {}", e);
        ::std::process::exit(e.exit_code().code());
    }
}

async fn run(matches: &clap::ArgMatches) -> Result<(), CliError> {
    let session = Session::bootstrap().await?;
    let mut client = ExposedClient::new(session)?;

    execute_command(&mut client, matches).await
}
