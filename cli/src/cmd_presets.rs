// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{ArgMatches, Command};
use colored::Colorize;
use rrulekit_core::{Preset, describe, serialize};

use crate::config::Config;
use crate::util::ArgOutputFormat;

#[derive(Debug, Clone)]
pub struct CmdPresets {
    pub output_format: Option<ArgOutputFormat>,
}

impl CmdPresets {
    pub const NAME: &str = "presets";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("List the built-in recurrence presets")
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            output_format: ArgOutputFormat::from(matches),
        }
    }

    pub fn run(self, config: &Config) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "listing presets...");
        let entries = entries();
        match config.output_format(self.output_format) {
            ArgOutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entries)?),
            ArgOutputFormat::Table => print!("{}", format_table(&entries)),
        }
        Ok(())
    }
}

#[derive(Debug, serde::Serialize)]
struct PresetEntry {
    id: Preset,
    name: &'static str,
    rrule: String,
    description: String,
}

fn entries() -> Vec<PresetEntry> {
    Preset::ALL
        .into_iter()
        .map(|preset| {
            let rule = preset.rule();
            PresetEntry {
                id: preset,
                name: preset.name(),
                rrule: serialize(&rule),
                description: describe(&rule),
            }
        })
        .collect()
}

fn format_table(entries: &[PresetEntry]) -> String {
    let name_width = entries.iter().map(|e| e.name.len()).max().unwrap_or(0);
    let rrule_width = entries.iter().map(|e| e.rrule.len()).max().unwrap_or(0);
    entries
        .iter()
        .map(|e| {
            format!(
                "{}  {:<rrule_width$}  {}\n",
                format!("{:<name_width$}", e.name).bold(),
                e.rrule,
                e.description.dimmed(),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_presets_command() {
        let cmd = Command::new("test").subcommand(CmdPresets::command());
        let matches = cmd
            .try_get_matches_from(["test", "presets", "--output-format", "table"])
            .unwrap();
        let sub_matches = matches.subcommand_matches(CmdPresets::NAME).unwrap();
        let parsed = CmdPresets::from(sub_matches);
        assert_eq!(parsed.output_format, Some(ArgOutputFormat::Table));
    }

    #[test]
    fn lists_presets() {
        let entries = entries();
        assert_eq!(entries.len(), Preset::ALL.len());
        assert_eq!(entries[2].rrule, "RRULE:FREQ=WEEKLY;BYDAY=SU,SA");
        assert_eq!(entries[2].description, "every weekend");
        assert_eq!(entries[4].description, "every 15 minutes");
    }

    #[test]
    fn serializes_presets_to_json() {
        let json = serde_json::to_value(entries()).unwrap();
        assert_eq!(json[0]["id"], "every-day");
        assert_eq!(json[0]["name"], "Every Day");
        assert_eq!(json[0]["rrule"], "RRULE:FREQ=DAILY");
        assert_eq!(json[4]["id"], "every15-minutes");
    }

    #[test]
    fn formats_table() {
        colored::control::set_override(false);
        let table = format_table(&entries()[..1]);
        assert_eq!(table, "Every Day  RRULE:FREQ=DAILY  every day\n");
    }
}
