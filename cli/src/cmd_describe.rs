// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{ArgMatches, Command, arg};
use colored::Colorize;
use rrulekit_core::{Preset, Rule, describe, parse_with, serialize};

use crate::config::Config;

#[derive(Debug, Clone)]
pub struct CmdDescribe {
    pub rrule: String,
}

impl CmdDescribe {
    pub const NAME: &str = "describe";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Describe a recurrence rule in plain English")
            .arg(arg!(rrule: <RRULE> "The rule, with or without the RRULE: prefix"))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        let rrule = match matches.get_one::<String>("rrule") {
            Some(rrule) => rrule.clone(),
            None => unreachable!("rrule is required"),
        };
        Self { rrule }
    }

    pub fn run(self, config: &Config) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "describing rule...");
        let rule = parse_with(&self.rrule, &config.parse_options()?)?;
        let (description, preset) = summarize(&rule);
        println!("{description}");
        if let Some(preset) = preset {
            println!("{} {}", "preset:".dimmed(), preset.name().bold());
        }
        Ok(())
    }
}

fn summarize(rule: &Rule) -> (String, Option<Preset>) {
    (describe(rule), Preset::matching(&serialize(rule)))
}
