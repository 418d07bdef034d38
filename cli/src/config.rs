// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, path::PathBuf, str::FromStr};

use jiff::tz::TimeZone;
use rrulekit_core::ParseOptions;
use tokio::fs;

use crate::util::ArgOutputFormat;

pub const APP_NAME: &str = "rrulekit";

const RRULEKIT_CONFIG_ENV: &str = "RRULEKIT_CONFIG";

/// Load the configuration.
///
/// The file is taken from `path`, then from the `RRULEKIT_CONFIG` environment
/// variable, then from the user's config directory. Only the last one may be
/// missing, in which case the defaults are used.
#[tracing::instrument]
pub async fn parse_config(path: Option<PathBuf>) -> Result<Config, Box<dyn Error>> {
    let path = if let Some(path) = path {
        path
    } else if let Ok(env_path) = std::env::var(RRULEKIT_CONFIG_ENV) {
        PathBuf::from(env_path)
    } else {
        let config = match get_config_dir() {
            Ok(dir) => dir.join(format!("{APP_NAME}/config.toml")),
            Err(e) => {
                tracing::debug!(error = %e, "no config directory, using defaults");
                return Ok(Config::default());
            }
        };
        if !config.exists() {
            tracing::debug!(path = %config.display(), "no config file, using defaults");
            return Ok(Config::default());
        }
        config
    };

    fs::read_to_string(&path)
        .await
        .map_err(|e| format!("Failed to read config file at {}: {}", path.display(), e))?
        .parse()
}

/// Configuration of the command line interface.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// IANA zone used for `UNTIL` values without offset or `TZID`, UTC if unset
    pub floating_time_zone: Option<String>,

    /// Output format used when `--output-format` is not given
    pub output_format: Option<ArgOutputFormat>,
}

impl Config {
    /// Parse options derived from the configuration.
    pub fn parse_options(&self) -> Result<ParseOptions, Box<dyn Error>> {
        let options = ParseOptions::default();
        match &self.floating_time_zone {
            Some(name) => {
                let tz = TimeZone::get(name)
                    .map_err(|e| format!("Invalid floating_time_zone `{name}`: {e}"))?;
                Ok(options.floating_time_zone(tz))
            }
            None => Ok(options),
        }
    }

    /// The output format of a command, falling back to the configured one.
    pub fn output_format(&self, arg: Option<ArgOutputFormat>) -> ArgOutputFormat {
        arg.or(self.output_format).unwrap_or(ArgOutputFormat::Table)
    }
}

impl FromStr for Config {
    type Err = Box<dyn Error>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(s)?)
    }
}

fn get_config_dir() -> Result<PathBuf, Box<dyn Error>> {
    #[cfg(unix)]
    let config_dir = xdg::BaseDirectories::new().get_config_home();
    #[cfg(windows)]
    let config_dir = dirs::config_dir();
    config_dir.ok_or_else(|| "User-specific home directory not found".into())
}
