//! Command runner: connects to the host and issues one recorder command

use std::env;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::debug;

use crate::application::ports::ConfigStore;
use crate::application::{RecorderError, RecorderProxy};
use crate::domain::config::AppConfig;
use crate::domain::error::InvalidArgument;
use crate::domain::recording::{AudioEncoder, RecorderConfiguration};
use crate::infrastructure::{StreamChannel, XdgConfigStore};

use super::args::{Commands, HostOptions, StartArgs};
use super::presenter::Presenter;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Environment variable overriding the host address
pub const ENV_HOST: &str = "RECORDER_BRIDGE_HOST";

/// Environment variable overriding the response timeout
pub const ENV_TIMEOUT: &str = "RECORDER_BRIDGE_TIMEOUT";

type Proxy = RecorderProxy<StreamChannel>;

/// Run a recorder command against the configured host.
/// `Commands::Config` is handled separately and never reaches here.
pub async fn run_command(command: Commands, options: HostOptions) -> ExitCode {
    let mut presenter = Presenter::new();

    // Usage errors are reported without touching the host
    if let Commands::Start(ref args) = command {
        if let Err(e) = check_output_path(args, options.web) {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
    }

    let channel = match StreamChannel::connect(&options.address).await {
        Ok(channel) => Arc::new(channel),
        Err(e) => {
            presenter.error(&format!(
                "Failed to connect to recording host at {}: {}",
                options.address, e
            ));
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let proxy = RecorderProxy::new(Arc::clone(&channel))
        .with_configuration(options.recorder)
        .with_web(options.web)
        .with_default_timeout(options.timeout.as_std());

    if let Commands::Watch = command {
        return watch(&proxy, &channel, &presenter).await;
    }

    presenter.start_spinner("Waiting for host...");
    let result = execute(&proxy, command, &presenter).await;
    presenter.stop_spinner();

    match result {
        Ok(code) => code,
        Err(e) => {
            presenter.error(&e.to_string());
            ExitCode::from(exit_code_for(&e))
        }
    }
}

async fn execute(
    proxy: &Proxy,
    command: Commands,
    presenter: &Presenter,
) -> Result<ExitCode, RecorderError> {
    match command {
        Commands::Start(args) => start(proxy, args, presenter).await,
        Commands::Stop => {
            match proxy.stop_recording(None).await? {
                Some(path) => presenter.output(&path),
                None => presenter.info("Recording stopped (host returned no output path)"),
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Cancel => {
            proxy.cancel_recording(None).await?;
            presenter.success("Recording cancelled");
            Ok(ExitCode::SUCCESS)
        }
        Commands::Pause => {
            proxy.pause_recording(None).await?;
            presenter.success("Pause requested");
            Ok(ExitCode::SUCCESS)
        }
        Commands::Resume => {
            proxy.resume_recording(None).await?;
            presenter.success("Resume requested");
            Ok(ExitCode::SUCCESS)
        }
        Commands::Status => {
            let status = if proxy.is_paused(None).await? {
                "paused"
            } else if proxy.is_recording(None).await? {
                "recording"
            } else {
                "stopped"
            };
            presenter.output(status);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Devices => {
            let devices = proxy.get_input_devices(None).await?;
            presenter.devices(&devices);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Permission => {
            let granted = proxy.has_permission(None).await?;
            presenter.output(&granted.to_string());
            Ok(ExitCode::SUCCESS)
        }
        Commands::Supports { encoder } => {
            let supported = proxy
                .is_supported_encoder(AudioEncoder::from(encoder), None)
                .await?;
            presenter.output(&supported.to_string());
            Ok(ExitCode::SUCCESS)
        }
        Commands::Watch | Commands::Config { .. } => Ok(ExitCode::from(EXIT_USAGE_ERROR)),
    }
}

async fn start(
    proxy: &Proxy,
    args: StartArgs,
    presenter: &Presenter,
) -> Result<ExitCode, RecorderError> {
    let configuration = if args.has_overrides() {
        Some(build_override(proxy, &args).await?)
    } else {
        None
    };

    let started = proxy
        .start_recording(args.path.as_deref(), configuration.as_ref(), None)
        .await?;

    if started {
        match args.path {
            Some(path) => presenter.success(&format!("Recording to {}", path)),
            None => presenter.success("Recording started"),
        }
        Ok(ExitCode::SUCCESS)
    } else {
        presenter.warn("Host did not start recording");
        Ok(ExitCode::from(EXIT_ERROR))
    }
}

fn check_output_path(args: &StartArgs, web: bool) -> Result<(), InvalidArgument> {
    let has_path = args.path.as_deref().is_some_and(|p| !p.is_empty());
    if has_path || web {
        Ok(())
    } else {
        Err(InvalidArgument::new(
            "output_path",
            "a path is required unless --web is set",
        ))
    }
}

/// Apply CLI flags over the proxy's default configuration
async fn build_override(
    proxy: &Proxy,
    args: &StartArgs,
) -> Result<RecorderConfiguration, RecorderError> {
    let mut builder = proxy.configuration().to_builder();

    if let Some(encoder) = args.encoder {
        builder = builder.encoder(encoder.into());
    }
    if let Some(channels) = args.channels {
        builder = builder.channels(channels);
    }
    if let Some(sample_rate) = args.sample_rate {
        builder = builder.sample_rate(sample_rate);
    }
    if let Some(bit_rate) = args.bit_rate {
        builder = builder.bit_rate(bit_rate);
    }
    if args.suppress_noise {
        builder = builder.suppress_noise(true);
    }
    if args.cancel_echo {
        builder = builder.cancel_echo(true);
    }
    if args.auto_gain {
        builder = builder.auto_gain(true);
    }
    if let Some(ref id) = args.device {
        // Resolve the label from the host so the selection is a real device
        let devices = proxy.get_input_devices(None).await?;
        let device = devices
            .into_iter()
            .find(|d| d.id() == id.as_str())
            .ok_or_else(|| InvalidArgument::new("device", format!("no input device '{}'", id)))?;
        builder = builder.device(Some(device));
    }

    Ok(builder.build()?)
}

/// Print state changes until Ctrl+C or until the host disconnects
async fn watch(proxy: &Proxy, channel: &StreamChannel, presenter: &Presenter) -> ExitCode {
    let (tx, mut rx) = mpsc::unbounded_channel();
    proxy.on_state_change(move |event| {
        let _ = tx.send(event);
    });

    presenter.info("Watching recorder state (Ctrl+C to stop)");
    let mut liveness = tokio::time::interval(Duration::from_millis(250));

    loop {
        tokio::select! {
            Some(event) = rx.recv() => presenter.state_change(&event),
            _ = tokio::signal::ctrl_c() => {
                debug!("interrupted, leaving watch");
                proxy.clear_state_change();
                return ExitCode::SUCCESS;
            }
            _ = liveness.tick() => {
                if channel.is_closed() {
                    // Flush anything the reader delivered before closing
                    while let Ok(event) = rx.try_recv() {
                        presenter.state_change(&event);
                    }
                    presenter.error("Recording host closed the connection");
                    return ExitCode::from(EXIT_ERROR);
                }
            }
        }
    }
}

/// Map a command failure to an exit code
pub fn exit_code_for(error: &RecorderError) -> u8 {
    match error {
        RecorderError::InvalidArgument(_) => EXIT_USAGE_ERROR,
        _ => EXIT_ERROR,
    }
}

/// Load and merge configuration from file, env, and CLI
pub async fn load_merged_config(cli_config: AppConfig) -> AppConfig {
    let store = XdgConfigStore::new();
    let file_config = match store.load().await {
        Ok(config) => config,
        Err(e) => {
            Presenter::new().warn(&format!("Ignoring config file: {}", e));
            AppConfig::empty()
        }
    };

    // Build env config
    let env_config = AppConfig {
        host: env::var(ENV_HOST).ok().filter(|s| !s.is_empty()),
        timeout: env::var(ENV_TIMEOUT).ok().filter(|s| !s.is_empty()),
        ..Default::default()
    };

    // Merge: defaults < file < env < cli
    AppConfig::defaults()
        .merge(file_config)
        .merge(env_config)
        .merge(cli_config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn invalid_argument_is_usage_error() {
        let err = RecorderError::from(InvalidArgument::new("output_path", "missing"));
        assert_eq!(exit_code_for(&err), EXIT_USAGE_ERROR);
    }

    #[test]
    fn output_path_required_off_web() {
        let args = StartArgs::default();
        assert!(check_output_path(&args, false).is_err());
        assert!(check_output_path(&args, true).is_ok());

        let args = StartArgs {
            path: Some(String::new()),
            ..Default::default()
        };
        assert!(check_output_path(&args, false).is_err());

        let args = StartArgs {
            path: Some("take1.wav".to_string()),
            ..Default::default()
        };
        assert!(check_output_path(&args, false).is_ok());
    }

    #[test]
    fn runtime_failures_are_errors() {
        let err = RecorderError::TimedOut {
            method: "is_paused",
            timeout: Duration::from_secs(1),
        };
        assert_eq!(exit_code_for(&err), EXIT_ERROR);
        assert_eq!(
            exit_code_for(&RecorderError::Transport("closed".to_string())),
            EXIT_ERROR
        );
    }
}
