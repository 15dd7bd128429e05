//! TOML configuration file parsing and loading
//!
//! This module handles loading and parsing of TOML configuration files,
//! including default config file discovery and validation of config values.
//! Values from the command line always win over the file.

use crate::app::error::{AppError, AppResult};
use std::path::{Path, PathBuf};

use super::args::{Args, DRAIN_MODES, LOG_FORMATS, LOG_LEVELS};

/// Keys accepted in the configuration file
pub const CONFIG_KEYS: [&str; 11] = [
    "items",
    "remove",
    "clear",
    "mode",
    "drain-timeout",
    "log-level",
    "log-format",
    "log-file",
    "color",
    "no-color",
    "json",
];

/// Default config location: `<config_dir>/Drainq/drainq.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("Drainq").join("drainq.toml"))
}

impl Args {
    /// Locate, read and apply the configuration file
    ///
    /// An explicitly named file must exist. The default file is optional.
    /// Returns the raw table when a file was applied.
    pub async fn load_config_file(&mut self) -> AppResult<Option<toml::Table>> {
        let config_path = match self.config_file.clone() {
            Some(path) => {
                if !path.exists() {
                    return Err(AppError::ConfigNotFound { path });
                }
                path
            }
            None => match default_config_path() {
                Some(path) if path.exists() => path,
                _ => return Ok(None),
            },
        };

        let config = read_config_table(&config_path).await?;
        Self::apply_toml_values(self, &config)?;
        Ok(Some(config))
    }

    /// Apply TOML configuration values to Args without overriding CLI values
    pub fn apply_toml_values(args: &mut Self, config: &toml::Table) -> AppResult<()> {
        if let Some(unknown) = config.keys().find(|k| !CONFIG_KEYS.contains(&k.as_str())) {
            return Err(AppError::InvalidValue {
                key: unknown.clone(),
                message: format!("unknown key (expected one of: {})", CONFIG_KEYS.join(", ")),
            });
        }

        // Config items come first; CLI items are queued after them
        let mut items = string_list(config, "items")?;
        items.append(&mut args.items);
        args.items = items;

        let mut remove = string_list(config, "remove")?;
        remove.append(&mut args.remove);
        args.remove = remove;

        args.clear = args.clear || bool_value(config, "clear")?.unwrap_or(false);
        args.json = args.json || bool_value(config, "json")?.unwrap_or(false);

        if args.mode.is_none() {
            args.mode = choice_value(config, "mode", &DRAIN_MODES)?;
        }
        if args.log_level.is_none() {
            args.log_level = choice_value(config, "log-level", &LOG_LEVELS)?;
        }
        if args.log_format.is_none() {
            args.log_format = choice_value(config, "log-format", &LOG_FORMATS)?;
        }
        if args.log_file.is_none() {
            args.log_file = string_value(config, "log-file")?.map(PathBuf::from);
        }
        if args.drain_timeout.is_none() {
            args.drain_timeout = timeout_value(config, "drain-timeout")?;
        }

        // Colour flags only come from the file when neither was given on the CLI
        if !args.color && !args.no_color {
            let color = bool_value(config, "color")?.unwrap_or(false);
            let no_color = bool_value(config, "no-color")?.unwrap_or(false);
            if color && no_color {
                return Err(AppError::InvalidValue {
                    key: "color".to_string(),
                    message: "'color' and 'no-color' cannot both be true".to_string(),
                });
            }
            args.color = color;
            args.no_color = no_color;
        }

        Ok(())
    }
}

async fn read_config_table(path: &Path) -> AppResult<toml::Table> {
    let contents =
        tokio::fs::read_to_string(path)
            .await
            .map_err(|source| AppError::ConfigRead {
                path: path.to_path_buf(),
                source,
            })?;
    toml::from_str::<toml::Table>(&contents).map_err(|source| AppError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })
}

fn invalid(key: &str, message: impl Into<String>) -> AppError {
    AppError::InvalidValue {
        key: key.to_string(),
        message: message.into(),
    }
}

/// Accepts both `key = "value"` and `key = ["a", "b"]`
fn string_list(config: &toml::Table, key: &str) -> AppResult<Vec<String>> {
    match config.get(key) {
        None => Ok(Vec::new()),
        Some(toml::Value::String(value)) => Ok(vec![value.clone()]),
        Some(toml::Value::Array(values)) => values
            .iter()
            .map(|value| {
                value
                    .as_str()
                    .map(str::to_string)
                    .ok_or_else(|| invalid(key, "array entries must be strings"))
            })
            .collect(),
        Some(_) => Err(invalid(key, "expected a string or an array of strings")),
    }
}

fn string_value(config: &toml::Table, key: &str) -> AppResult<Option<String>> {
    match config.get(key) {
        None => Ok(None),
        Some(value) => value
            .as_str()
            .map(|s| Some(s.to_string()))
            .ok_or_else(|| invalid(key, "expected a string")),
    }
}

fn bool_value(config: &toml::Table, key: &str) -> AppResult<Option<bool>> {
    match config.get(key) {
        None => Ok(None),
        Some(value) => value
            .as_bool()
            .map(Some)
            .ok_or_else(|| invalid(key, "expected true or false")),
    }
}

fn choice_value(config: &toml::Table, key: &str, choices: &[&str]) -> AppResult<Option<String>> {
    match string_value(config, key)? {
        None => Ok(None),
        Some(value) if choices.contains(&value.as_str()) => Ok(Some(value)),
        Some(value) => Err(invalid(
            key,
            format!("'{}' is not one of: {}", value, choices.join(", ")),
        )),
    }
}

fn timeout_value(config: &toml::Table, key: &str) -> AppResult<Option<u64>> {
    match config.get(key) {
        None => Ok(None),
        Some(value) => match value.as_integer() {
            Some(secs) if secs > 0 => Ok(Some(secs as u64)),
            Some(secs) => Err(invalid(key, format!("{} must be greater than 0", secs))),
            None => Err(invalid(key, "expected a whole number of seconds")),
        },
    }
}
