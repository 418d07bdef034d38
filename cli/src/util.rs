// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use clap::{Arg, ArgMatches, arg, value_parser};
use colored::Colorize;
use rrulekit_core::{DayOfWeek, Weekday};

/// The output format for commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArgOutputFormat {
    Json,
    Table,
}

impl ArgOutputFormat {
    pub fn arg() -> Arg {
        arg!(--"output-format" <FORMAT> "Output format, defaults to the configured one or table")
            .value_parser(value_parser!(ArgOutputFormat))
    }

    pub fn from(matches: &ArgMatches) -> Option<Self> {
        matches.get_one("output-format").copied()
    }
}

/// Parse a `BYDAY` item such as `MO`, `2TU` or `-1FR`, case-insensitively.
pub fn parse_day_of_week(s: &str) -> Result<DayOfWeek, String> {
    let s = s.trim();
    let split = s
        .char_indices()
        .find(|(_, c)| c.is_ascii_alphabetic())
        .map_or(s.len(), |(i, _)| i);
    let (number, code) = s.split_at(split);

    let day = Weekday::from_code(code)
        .ok_or_else(|| format!("invalid weekday `{code}`, expected one of SU, MO, TU, WE, TH, FR, SA"))?;
    let week_number = match number {
        "" => 0,
        n => n
            .parse::<i8>()
            .map_err(|e| format!("invalid week number `{n}`: {e}"))?,
    };
    DayOfWeek::new(day, week_number).map_err(|e| e.to_string())
}

/// Render key/value rows with the keys aligned in a bold column.
pub fn format_rows(rows: &[(&str, String)]) -> String {
    let width = rows.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
    rows.iter()
        .map(|(key, value)| format!("{}  {value}\n", format!("{key:<width$}").bold()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_day_of_week() {
        let cases = [
            ("MO", DayOfWeek::every(Weekday::Monday)),
            ("su", DayOfWeek::every(Weekday::Sunday)),
            ("2TU", DayOfWeek::new(Weekday::Tuesday, 2).unwrap()),
            ("+3WE", DayOfWeek::new(Weekday::Wednesday, 3).unwrap()),
            ("-1fr", DayOfWeek::new(Weekday::Friday, -1).unwrap()),
        ];
        for (src, expected) in cases {
            assert_eq!(parse_day_of_week(src), Ok(expected), "Failed for {src}");
        }
    }

    #[test]
    fn rejects_bad_day_of_week() {
        for src in ["", "1", "XX", "MONDAY", "54MO", "1000MO", "1.5MO"] {
            assert!(parse_day_of_week(src).is_err(), "Parse {src} should fail");
        }
    }

    #[test]
    fn aligns_rows() {
        colored::control::set_override(false);
        let rows = [("FREQ", "WEEKLY".to_owned()), ("INTERVAL", "2".to_owned())];
        assert_eq!(format_rows(&rows), "FREQ      WEEKLY\nINTERVAL  2\n");
    }
}
