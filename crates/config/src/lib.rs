//! Configuration management for evmi
//!
//! This crate provides functionality for managing the evmi configuration, including loading,
//! saving, updating, and deleting configuration settings. The configuration holds the default
//! execution limits and trace setting used by `evmi run`.

/// Error types for the configuration module
pub mod error;

use std::path::{Path, PathBuf};

use crate::error::Error;
use clap::Parser;
use evmi_common::utils::io::file::{read_file, write_file};
use evmi_vm::{core::memory::DEFAULT_MEMORY_LIMIT, Limits};
use serde::{Deserialize, Serialize};
#[allow(deprecated)]
use std::env::home_dir;
use tracing::{debug, error, info};

/// Command line arguments for the configuration command
#[derive(Debug, Clone, Parser)]
#[clap(
    about = "Display and edit the current configuration",
    override_usage = "evmi config [KEY] [VALUE]"
)]
pub struct ConfigArgs {
    /// The target key to update.
    #[clap(required = false, default_value = "")]
    pub key: String,

    /// The value to set the key to. Use `none` to clear an optional limit.
    #[clap(required = false, default_value = "")]
    pub value: String,
}

/// The [`Configuration`] struct represents the configuration of the CLI. `evmi run` reads its
/// defaults from here; command-line flags take precedence.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Configuration {
    /// Whether to dump the stack after every instruction
    pub trace: bool,

    /// The gas limit for a run. Unset means gas is tallied but never enforced
    pub gas_limit: Option<u64>,

    /// The maximum number of instructions a run may execute
    pub step_limit: Option<u64>,

    /// The maximum memory size in bytes
    pub memory_limit: usize,
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration {
            trace: false,
            gas_limit: None,
            step_limit: None,
            memory_limit: DEFAULT_MEMORY_LIMIT,
        }
    }
}

/// Returns the path of the configuration file, `$HOME/.evmi/config.toml`.
#[allow(deprecated)]
pub fn config_path() -> Result<PathBuf, Error> {
    let mut home = home_dir().ok_or_else(|| {
        Error::Generic(
            "failed to get home directory. does your os support `std::env::home_dir()`?"
                .to_string(),
        )
    })?;
    home.push(".evmi");
    home.push("config.toml");
    Ok(home)
}

fn path_str(path: &Path) -> Result<&str, Error> {
    path.to_str().ok_or_else(|| Error::Generic("failed to convert path to string".to_string()))
}

fn parse_limit(key: &str, value: &str) -> Result<Option<u64>, Error> {
    match value {
        "" | "none" => Ok(None),
        _ => value
            .parse::<u64>()
            .map(Some)
            .map_err(|e| Error::ParseError(format!("invalid value for '{key}': {e}"))),
    }
}

impl Configuration {
    /// Returns the current configuration, creating the file with defaults if it doesn't exist.
    pub fn load() -> Result<Self, Error> {
        Self::load_from(&config_path()?)
    }

    /// Saves the current configuration to disk.
    pub fn save(&self) -> Result<(), Error> {
        self.save_to(&config_path()?)
    }

    /// Deletes the configuration file at `$HOME/.evmi/config.toml`.
    pub fn delete() -> Result<(), Error> {
        let path = config_path()?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::Generic(format!("failed to delete config file: {e}"))),
        }
    }

    /// Loads the configuration at `path`, creating the file with defaults if it doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self, Error> {
        // if the config file doesn't exist, create it
        if !path.exists() {
            debug!("creating default config file at '{}'", path.display());
            let config = Configuration::default();
            config.save_to(path)?;
            return Ok(config);
        }

        // read the config file
        let contents = read_file(path_str(path)?)
            .map_err(|e| Error::Generic(format!("failed to read config file: {e}")))?;

        // parse the config file
        toml::from_str(&contents)
            .map_err(|e| Error::ParseError(format!("failed to parse config file: {e}")))
    }

    /// Saves the configuration to `path`.
    pub fn save_to(&self, path: &Path) -> Result<(), Error> {
        write_file(
            path_str(path)?,
            &toml::to_string(&self)
                .map_err(|e| Error::ParseError(format!("failed to serialize config: {e}")))?,
        )
        .map_err(|e| Error::Generic(format!("failed to write config file: {e}")))?;

        Ok(())
    }

    /// Update a single key/value pair in the configuration, validating the value's type.
    pub fn update(&mut self, key: &str, value: &str) -> Result<(), Error> {
        match key {
            "trace" => {
                self.trace = value.parse::<bool>().map_err(|e| {
                    Error::ParseError(format!("invalid value for '{key}': {e}"))
                })?;
            }
            "gas_limit" => {
                self.gas_limit = parse_limit(key, value)?;
            }
            "step_limit" => {
                self.step_limit = parse_limit(key, value)?;
            }
            "memory_limit" => {
                self.memory_limit = value.parse::<usize>().map_err(|e| {
                    Error::ParseError(format!("invalid value for '{key}': {e}"))
                })?;
            }
            _ => {
                return Err(Error::Generic(format!(
                    "invalid key: \'{key}\' is not a valid configuration key."
                )))
            }
        }

        Ok(())
    }

    /// The execution limits this configuration describes.
    pub fn limits(&self) -> Limits {
        Limits {
            gas_limit: self.gas_limit,
            step_limit: self.step_limit,
            memory_limit: self.memory_limit,
        }
    }
}

/// The `config` command is used to display and edit the current configuration.
pub fn config(args: ConfigArgs) -> Result<(), Error> {
    if !args.key.is_empty() {
        if !args.value.is_empty() {
            // read the config file and update the key/value pair
            let mut config = Configuration::load()?;
            config.update(&args.key, &args.value)?;
            config.save()?;
            info!("updated configuration! Set \'{}\' = \'{}\' .", &args.key, &args.value);
        } else {
            // key is set, but no value is set
            error!("found key but no value to set. Please specify a value to set, use `evmi config --help` for more information.");
        }
    } else {
        // no key is set, print the config file
        let config = Configuration::load()?;
        print!(
            "{}",
            toml::to_string(&config)
                .map_err(|e| Error::ParseError(format!("failed to serialize config: {e}")))?
        );
        info!("use `evmi config <KEY> <VALUE>` to set a key/value pair.");
    }

    Ok(())
}
