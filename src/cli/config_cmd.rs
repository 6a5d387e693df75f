//! Config command handler

use crate::application::ports::ConfigStore;
use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;
use crate::domain::recording::{AudioEncoder, RecorderConfiguration, Timeout};
use crate::infrastructure::HostAddress;

use super::args::{is_valid_config_key, ConfigAction, VALID_CONFIG_KEYS};
use super::presenter::Presenter;

const NOT_SET: &str = "(not set)";

/// Handle config subcommand
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => handle_init(store, presenter).await,
        ConfigAction::Set { key, value } => handle_set(store, presenter, &key, &value).await,
        ConfigAction::Get { key } => handle_get(store, presenter, &key).await,
        ConfigAction::List => handle_list(store, presenter).await,
        ConfigAction::Path => handle_path(store, presenter),
    }
}

async fn handle_init<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    store.init().await?;
    presenter.success(&format!(
        "Config file created at: {}",
        store.path().display()
    ));
    Ok(())
}

async fn handle_set<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    check_key(key)?;

    let mut config = store.load().await?;
    apply_value(&mut config, key, value)?;

    store.save(&config).await?;
    presenter.success(&format!("{} = {}", key, value));

    Ok(())
}

async fn handle_get<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
) -> Result<(), ConfigError> {
    check_key(key)?;

    let config = store.load().await?;
    match read_value(&config, key) {
        Some(v) => presenter.output(&v),
        None => presenter.output(NOT_SET),
    }

    Ok(())
}

async fn handle_list<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    let config = store.load().await?;

    for key in VALID_CONFIG_KEYS {
        let value = read_value(&config, key);
        presenter.key_value(key, value.as_deref().unwrap_or(NOT_SET));
    }

    Ok(())
}

fn handle_path<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    presenter.output(&store.path().to_string_lossy());
    Ok(())
}

fn check_key(key: &str) -> Result<(), ConfigError> {
    if is_valid_config_key(key) {
        Ok(())
    } else {
        Err(ConfigError::ValidationError {
            key: key.to_string(),
            message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
        })
    }
}

/// Validate `value` for `key` and store it in `config`
fn apply_value(config: &mut AppConfig, key: &str, value: &str) -> Result<(), ConfigError> {
    let invalid = |message: String| ConfigError::ValidationError {
        key: key.to_string(),
        message,
    };

    match key {
        "host" => {
            value
                .parse::<HostAddress>()
                .map_err(|e| invalid(e.to_string()))?;
            config.host = Some(value.to_string());
        }
        "timeout" => {
            value
                .parse::<Timeout>()
                .map_err(|e| invalid(e.to_string()))?;
            config.timeout = Some(value.to_string());
        }
        "web" => config.web = Some(parse_bool(value).map_err(|_| bool_error(key))?),
        _ => {
            let Some(field) = key.strip_prefix("recorder.") else {
                return Err(invalid("Unknown key".to_string()));
            };
            // The recorder section is validated as a whole
            let builder = config.recorder_or_default().to_builder();
            let builder = match field {
                "encoder" => builder.encoder(
                    value
                        .parse::<AudioEncoder>()
                        .map_err(|e| invalid(e.to_string()))?,
                ),
                "channels" => builder.channels(parse_number(key, value)?),
                "sample_rate" => builder.sample_rate(parse_number(key, value)?),
                "bit_rate" => builder.bit_rate(parse_number(key, value)?),
                "suppress_noise" => {
                    builder.suppress_noise(parse_bool(value).map_err(|_| bool_error(key))?)
                }
                "cancel_echo" => {
                    builder.cancel_echo(parse_bool(value).map_err(|_| bool_error(key))?)
                }
                "auto_gain" => builder.auto_gain(parse_bool(value).map_err(|_| bool_error(key))?),
                _ => return Err(invalid("Unknown key".to_string())),
            };
            let recorder = builder.build().map_err(|e| invalid(e.message))?;
            config.recorder = Some(recorder);
        }
    }
    Ok(())
}

/// Read the stored value for `key`, if the file sets it
fn read_value(config: &AppConfig, key: &str) -> Option<String> {
    match key {
        "host" => config.host.clone(),
        "timeout" => config.timeout.clone(),
        "web" => config.web.map(|b| b.to_string()),
        _ => {
            let recorder = config.recorder.as_ref()?;
            let field = key.strip_prefix("recorder.")?;
            recorder_field(recorder, field)
        }
    }
}

fn recorder_field(recorder: &RecorderConfiguration, field: &str) -> Option<String> {
    let value = match field {
        "encoder" => recorder.encoder().to_string(),
        "channels" => recorder.channels().to_string(),
        "sample_rate" => recorder.sample_rate().to_string(),
        "bit_rate" => recorder.bit_rate().to_string(),
        "suppress_noise" => recorder.suppress_noise().to_string(),
        "cancel_echo" => recorder.cancel_echo().to_string(),
        "auto_gain" => recorder.auto_gain().to_string(),
        _ => return None,
    };
    Some(value)
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.parse::<T>().map_err(|_| ConfigError::ValidationError {
        key: key.to_string(),
        message: format!("Invalid number '{}'", value),
    })
}

fn bool_error(key: &str) -> ConfigError {
    ConfigError::ValidationError {
        key: key.to_string(),
        message: "Value must be 'true' or 'false'".to_string(),
    }
}

/// Parse a boolean value
fn parse_bool(value: &str) -> Result<bool, ()> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(()),
    }
}
