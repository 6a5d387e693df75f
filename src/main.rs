//! Recorder Bridge CLI entry point

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use recorder_bridge::cli::{
    app::{load_merged_config, run_command, EXIT_ERROR, EXIT_USAGE_ERROR},
    args::{Cli, Commands, HostOptions},
    config_cmd::handle_config_command,
    presenter::Presenter,
};
use recorder_bridge::domain::config::AppConfig;
use recorder_bridge::domain::recording::Timeout;
use recorder_bridge::infrastructure::{HostAddress, XdgConfigStore};

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let presenter = Presenter::new();

    if let Commands::Config { action } = cli.command {
        let store = XdgConfigStore::new();
        if let Err(e) = handle_config_command(action, &store, &presenter).await {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
        return ExitCode::SUCCESS;
    }

    // Build CLI config from args
    let cli_config = AppConfig {
        host: cli.host.clone(),
        timeout: cli.timeout.clone(),
        web: if cli.web { Some(true) } else { None },
        recorder: None,
    };

    // Merge config
    let config = load_merged_config(cli_config).await;

    let address = match config.host.as_ref() {
        Some(s) => match s.parse::<HostAddress>() {
            Ok(address) => address,
            Err(e) => {
                presenter.error(&e.to_string());
                return ExitCode::from(EXIT_USAGE_ERROR);
            }
        },
        None => HostAddress::default_socket(),
    };

    let timeout = match config.timeout.as_ref() {
        Some(s) => match s.parse::<Timeout>() {
            Ok(t) => t,
            Err(e) => {
                presenter.error(&e.to_string());
                return ExitCode::from(EXIT_USAGE_ERROR);
            }
        },
        None => Timeout::default_timeout(),
    };

    let options = HostOptions {
        address,
        timeout,
        web: config.web_or_default(),
        recorder: config.recorder_or_default(),
    };

    run_command(cli.command, options).await
}
