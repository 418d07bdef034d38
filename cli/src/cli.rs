// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, ffi::OsString, io, path::PathBuf};

use clap::{ArgMatches, Command, ValueHint, arg, builder::styling, crate_version, value_parser};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use crate::cmd_compare::CmdCompare;
use crate::cmd_describe::CmdDescribe;
use crate::cmd_format::CmdFormat;
use crate::cmd_generate_completion::CmdGenerateCompletion;
use crate::cmd_parse::CmdParse;
use crate::cmd_presets::CmdPresets;
use crate::config::{APP_NAME, Config, parse_config};

/// Run the rrk command-line interface.
pub async fn run() -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    match Cli::parse() {
        Ok(cli) => {
            if let Err(e) = cli.run().await {
                println!("{} {}", "Error:".red(), e);
            }
        }
        Err(e) => println!("{} {}", "Error:".red(), e),
    };
    Ok(())
}

/// Command-line interface
#[derive(Debug)]
pub struct Cli {
    /// Path to the configuration file
    pub config: Option<PathBuf>,

    /// The command to execute
    pub command: Commands,
}

impl Cli {
    /// Create the command-line interface
    pub fn command() -> Command {
        const STYLES: styling::Styles = styling::Styles::styled()
            .header(styling::AnsiColor::Green.on_default().bold())
            .usage(styling::AnsiColor::Green.on_default().bold())
            .literal(styling::AnsiColor::Blue.on_default().bold())
            .placeholder(styling::AnsiColor::Cyan.on_default());

        Command::new("rrk")
            .about("Parse, build and compare iCalendar recurrence rules.")
            .author("Zexin Yuan <aim@yzx9.xyz>")
            .version(crate_version!())
            .styles(STYLES)
            .subcommand_required(true)
            .arg_required_else_help(true)
            .arg(
                arg!(-c --config [CONFIG] "Path to the configuration file")
                    .long_help(format!(
                        "\
Path to the configuration file. Defaults to $XDG_CONFIG_HOME/{APP_NAME}/config.toml on Linux and \
MacOS, %APPDATA%/{APP_NAME}/config.toml on Windows."
                    ))
                    .value_parser(value_parser!(PathBuf))
                    .value_hint(ValueHint::FilePath)
                    .global(true),
            )
            .subcommand(CmdParse::command())
            .subcommand(CmdFormat::command())
            .subcommand(CmdCompare::command())
            .subcommand(CmdDescribe::command())
            .subcommand(CmdPresets::command())
            .subcommand(CmdGenerateCompletion::command())
    }

    /// Parse the command-line arguments
    pub fn parse() -> Result<Self, Box<dyn Error>> {
        let commands = Self::command();
        let matches = commands.get_matches();
        Self::from(matches)
    }

    /// Parse the specified arguments
    pub fn try_parse_from<I, T>(args: I) -> Result<Self, Box<dyn Error>>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let commands = Self::command();
        let matches = commands.try_get_matches_from(args)?;
        Self::from(matches)
    }

    /// Create a CLI instance from the `ArgMatches`
    pub fn from(matches: ArgMatches) -> Result<Self, Box<dyn Error>> {
        use Commands::*;
        let command = match matches.subcommand() {
            Some((CmdParse::NAME, matches)) => Parse(CmdParse::from(matches)),
            Some((CmdFormat::NAME, matches)) => Format(CmdFormat::from(matches)),
            Some((CmdCompare::NAME, matches)) => Compare(CmdCompare::from(matches)),
            Some((CmdDescribe::NAME, matches)) => Describe(CmdDescribe::from(matches)),
            Some((CmdPresets::NAME, matches)) => Presets(CmdPresets::from(matches)),
            Some((CmdGenerateCompletion::NAME, matches)) => {
                GenerateCompletion(CmdGenerateCompletion::from(matches))
            }
            _ => unreachable!(),
        };

        let config = matches.get_one("config").cloned();
        Ok(Cli { config, command })
    }

    /// Run the command
    pub async fn run(self) -> Result<(), Box<dyn Error>> {
        self.command.run(self.config).await
    }
}

/// The commands available in the CLI
#[derive(Debug, Clone)]
pub enum Commands {
    /// Parse a rule and show its fields
    Parse(CmdParse),

    /// Build a rule from its fields
    Format(CmdFormat),

    /// Compare two rules
    Compare(CmdCompare),

    /// Describe a rule in English
    Describe(CmdDescribe),

    /// List the built-in presets
    Presets(CmdPresets),

    /// Generate shell completion
    GenerateCompletion(CmdGenerateCompletion),
}

impl Commands {
    /// Run the command, loading the configuration only for commands reading it
    #[rustfmt::skip]
    pub async fn run(self, config: Option<PathBuf>) -> Result<(), Box<dyn Error>> {
        use Commands::*;
        match self {
            Parse(a)              => a.run(&Self::load(config).await?),
            Format(a)             => a.run(),
            Compare(a)            => a.run(),
            Describe(a)           => a.run(&Self::load(config).await?),
            Presets(a)            => a.run(&Self::load(config).await?),
            GenerateCompletion(a) => a.run(),
        }
    }

    async fn load(config: Option<PathBuf>) -> Result<Config, Box<dyn Error>> {
        tracing::debug!("parsing configuration...");
        parse_config(config).await
    }
}
