//! `civic` - command-line front end for the complaint portal

mod cli;
mod commands;
mod logging;

use clap::Parser;
use civic_client::{CivicClient, ClientConfig, ClientError};
use std::process::ExitCode;

use cli::Cli;

fn config_from(cli: &Cli) -> ClientConfig {
    let mut config = ClientConfig::from_env();
    if let Some(url) = &cli.api_url {
        config = config.with_base_url(url.clone());
    }
    if let Some(dir) = &cli.data_dir {
        config = config.with_data_dir(dir.clone());
    }
    if let Some(profile) = &cli.profile {
        config = config.with_client_name(profile.clone());
    }
    if let Some(timeout) = cli.timeout {
        config = config.with_timeout(timeout);
    }
    config
}

/// Text shown to the user for a failed command. Context added on top of a
/// client error is kept in full.
fn notice(error: &anyhow::Error) -> String {
    let outermost = error.chain().next();
    match outermost.and_then(|e| e.downcast_ref::<ClientError>()) {
        Some(e) => e.user_notice(),
        None => format!("{error:#}"),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    let config = config_from(&cli);
    let _log_guard = logging::init(&config.log_dir(), cli.verbose);

    let result = match CivicClient::connect(&config) {
        Ok(client) => commands::run(&client, cli.command).await,
        Err(e) => Err(e.into()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::warn!(error = %format!("{e:#}"), "Command failed");
            eprintln!("error: {}", notice(&e));
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_environment() {
        let cli = Cli::parse_from([
            "civic",
            "--api-url",
            "http://10.0.0.5:8000/api",
            "--profile",
            "ward-7",
            "whoami",
        ]);
        let config = config_from(&cli);
        assert_eq!(config.base_url, "http://10.0.0.5:8000/api");
        assert_eq!(config.client_name, "ward-7");
    }

    #[test]
    fn client_errors_use_their_notice() {
        let err = anyhow::Error::from(ClientError::NotAuthenticated);
        assert_eq!(notice(&err), "You are not logged in.");

        let err = anyhow::anyhow!("disk full").context("Cannot read image a.jpg");
        assert_eq!(notice(&err), "Cannot read image a.jpg: disk full");
    }
}
