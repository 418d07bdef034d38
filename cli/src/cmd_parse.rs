// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{ArgMatches, Command, arg};
use rrulekit_core::{End, Rule, describe, parse_with, serialize};

use crate::config::Config;
use crate::util::{ArgOutputFormat, format_rows};

#[derive(Debug, Clone)]
pub struct CmdParse {
    pub rrule: String,
    pub output_format: Option<ArgOutputFormat>,
}

impl CmdParse {
    pub const NAME: &str = "parse";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Parse a recurrence rule and show its fields")
            .arg(arg!(rrule: <RRULE> "The rule, with or without the RRULE: prefix"))
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        let rrule = match matches.get_one::<String>("rrule") {
            Some(rrule) => rrule.clone(),
            None => unreachable!("rrule is required"),
        };
        Self {
            rrule,
            output_format: ArgOutputFormat::from(matches),
        }
    }

    pub fn run(self, config: &Config) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "parsing rule...");
        let options = config.parse_options()?;
        let rule = parse_with(&self.rrule, &options)?;
        match config.output_format(self.output_format) {
            ArgOutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rule)?),
            ArgOutputFormat::Table => print!("{}", format_rows(&rule_rows(&rule))),
        }
        Ok(())
    }
}

/// The fields that are set, keyed by their RRULE name.
fn rule_rows(rule: &Rule) -> Vec<(&'static str, String)> {
    fn join<T: ToString>(values: &[T]) -> String {
        values
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",")
    }

    let mut rows = vec![("FREQ", rule.frequency().to_string())];
    if rule.interval() > 1 {
        rows.push(("INTERVAL", rule.interval().to_string()));
    }
    match rule.end() {
        Some(End::AtDate(until)) => rows.push(("UNTIL", until.to_string())),
        Some(End::AfterCount(count)) => rows.push(("COUNT", count.to_string())),
        None => {}
    }
    if let Some(day) = rule.first_day_of_week() {
        rows.push(("WKST", day.to_string()));
    }
    if !rule.days_of_the_week().is_empty() {
        rows.push(("BYDAY", join(rule.days_of_the_week())));
    }
    if !rule.months_of_the_year().is_empty() {
        rows.push(("BYMONTH", join(rule.months_of_the_year())));
    }
    if !rule.days_of_the_month().is_empty() {
        rows.push(("BYMONTHDAY", join(rule.days_of_the_month())));
    }
    if let Some(days) = rule.days_of_the_year() {
        rows.push(("BYYEARDAY", join(days)));
    }
    if let Some(weeks) = rule.weeks_of_the_year() {
        rows.push(("BYWEEKNO", join(weeks)));
    }
    if let Some(positions) = rule.set_positions() {
        rows.push(("BYSETPOS", join(positions)));
    }
    rows.push(("canonical", serialize(rule)));
    rows.push(("description", describe(rule)));
    rows
}

#[cfg(test)]
mod tests {
    use rrulekit_core::parse;

    use super::*;

    #[test]
    fn parses_parse_command() {
        let cmd = Command::new("test").subcommand(CmdParse::command());
        let matches = cmd
            .try_get_matches_from(["test", "parse", "FREQ=DAILY", "--output-format", "json"])
            .unwrap();
        let sub_matches = matches.subcommand_matches(CmdParse::NAME).unwrap();
        let parsed = CmdParse::from(sub_matches);
        assert_eq!(parsed.rrule, "FREQ=DAILY");
        assert_eq!(parsed.output_format, Some(ArgOutputFormat::Json));
    }

    #[test]
    fn lists_set_fields() {
        let rule = parse("RRULE:FREQ=MONTHLY;INTERVAL=2;COUNT=5;BYDAY=-1FR;BYSETPOS=1").unwrap();
        let rows = rule_rows(&rule);
        let keys: Vec<_> = rows.iter().map(|(k, _)| *k).collect();
        assert_eq!(
            keys,
            ["FREQ", "INTERVAL", "COUNT", "BYDAY", "BYSETPOS", "canonical", "description"]
        );
        assert_eq!(rows[3].1, "-1FR");
        assert_eq!(rows[6].1, "every 2 months");
    }

    #[test]
    fn shows_until_as_instant() {
        let rule = parse("FREQ=DAILY;UNTIL=20230101T120000Z").unwrap();
        let rows = rule_rows(&rule);
        assert_eq!(rows[1], ("UNTIL", "2023-01-01T12:00:00Z".to_owned()));
    }
}
