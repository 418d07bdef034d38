// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{Arg, ArgMatches, Command, arg, value_parser};
use jiff::Timestamp;
use rrulekit_core::{DayOfWeek, End, Frequency, Rule, RuleParts, Weekday, serialize_full};

use crate::util::parse_day_of_week;

#[derive(Debug, Clone)]
pub struct CmdFormat {
    pub frequency: Frequency,
    pub interval: Option<u32>,
    pub count: Option<u32>,
    pub until: Option<Timestamp>,
    pub first_day_of_week: Option<Weekday>,
    pub days_of_the_week: Vec<DayOfWeek>,
    pub months_of_the_year: Vec<u8>,
    pub days_of_the_month: Vec<i8>,
    pub days_of_the_year: Option<Vec<i16>>,
    pub weeks_of_the_year: Option<Vec<i8>>,
    pub set_positions: Option<Vec<i16>>,
    pub time_zone: Option<String>,
    pub start: Option<Timestamp>,
}

impl CmdFormat {
    pub const NAME: &str = "format";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Build a recurrence rule from its fields and print it")
            .arg(
                arg!(-f --freq <FREQ> "Frequency of the rule")
                    .required(true)
                    .value_parser(value_parser!(Frequency)),
            )
            .arg(
                arg!(-i --interval <N> "Number of periods between occurrences")
                    .value_parser(value_parser!(u32)),
            )
            .arg(
                arg!(--count <N> "Stop after this many occurrences")
                    .value_parser(value_parser!(u32))
                    .conflicts_with("until"),
            )
            .arg(
                arg!(--until <TIMESTAMP> "Stop after this instant, e.g. 2025-12-31T23:59:59Z")
                    .value_parser(value_parser!(Timestamp)),
            )
            .arg(
                arg!(--wkst <DAY> "First day of the week")
                    .value_parser(value_parser!(Weekday)),
            )
            .arg(
                arg!(--"by-day" <DAYS> "Weekdays with optional ordinals, e.g. MO,2TU,-1FR")
                    .value_parser(parse_day_of_week)
                    .value_delimiter(',')
                    .allow_hyphen_values(true),
            )
            .arg(list_arg(arg!(--"by-month" <MONTHS> "Months, 1 to 12")).value_parser(value_parser!(u8)))
            .arg(list_arg(arg!(--"by-month-day" <DAYS> "Days of the month")).value_parser(value_parser!(i8)))
            .arg(list_arg(arg!(--"by-year-day" <DAYS> "Days of the year")).value_parser(value_parser!(i16)))
            .arg(list_arg(arg!(--"by-week-no" <WEEKS> "Weeks of the year")).value_parser(value_parser!(i8)))
            .arg(list_arg(arg!(--"by-set-pos" <POSITIONS> "Set positions")).value_parser(value_parser!(i16)))
            .arg(arg!(--tz <ZONE> "IANA time zone of the rule, e.g. Europe/Berlin"))
            .arg(
                arg!(--start <TIMESTAMP> "Start of the first occurrence, printed as DTSTART with --tz")
                    .value_parser(value_parser!(Timestamp)),
            )
    }

    pub fn from(matches: &ArgMatches) -> Self {
        fn many<T: Clone + Send + Sync + 'static>(matches: &ArgMatches, id: &str) -> Option<Vec<T>> {
            matches.get_many::<T>(id).map(|v| v.cloned().collect())
        }

        let frequency = match matches.get_one::<Frequency>("freq") {
            Some(freq) => *freq,
            None => unreachable!("freq is required"),
        };
        Self {
            frequency,
            interval: matches.get_one("interval").copied(),
            count: matches.get_one("count").copied(),
            until: matches.get_one("until").copied(),
            first_day_of_week: matches.get_one("wkst").copied(),
            days_of_the_week: many(matches, "by-day").unwrap_or_default(),
            months_of_the_year: many(matches, "by-month").unwrap_or_default(),
            days_of_the_month: many(matches, "by-month-day").unwrap_or_default(),
            days_of_the_year: many(matches, "by-year-day"),
            weeks_of_the_year: many(matches, "by-week-no"),
            set_positions: many(matches, "by-set-pos"),
            time_zone: matches.get_one("tz").cloned(),
            start: matches.get_one("start").copied(),
        }
    }

    pub fn run(self) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "formatting rule...");
        let rule = self.build()?;
        println!("{}", serialize_full(&rule));
        Ok(())
    }

    fn build(self) -> Result<Rule, Box<dyn Error>> {
        let end = match (self.count, self.until) {
            (Some(count), _) => Some(End::count(count)?),
            (None, Some(until)) => Some(End::AtDate(until)),
            (None, None) => None,
        };
        let rule = RuleParts::new(self.frequency)
            .interval(self.interval.unwrap_or(1))
            .first_day_of_week(self.first_day_of_week)
            .days_of_the_week(self.days_of_the_week)
            .months_of_the_year(self.months_of_the_year)
            .days_of_the_month(self.days_of_the_month)
            .days_of_the_year(self.days_of_the_year)
            .weeks_of_the_year(self.weeks_of_the_year)
            .set_positions(self.set_positions)
            .end(end)
            .time_zone_identifier(self.time_zone)
            .start_date(self.start)
            .build()?;
        Ok(rule)
    }
}

fn list_arg(arg: Arg) -> Arg {
    arg.value_delimiter(',').allow_hyphen_values(true)
}

#[cfg(test)]
mod tests {
    use rrulekit_core::{serialize, serialize_full};

    use super::*;

    fn parse(args: &[&str]) -> CmdFormat {
        let cmd = Command::new("test").subcommand(CmdFormat::command());
        let matches = cmd
            .try_get_matches_from(["test", CmdFormat::NAME].iter().chain(args))
            .unwrap();
        let sub_matches = matches.subcommand_matches(CmdFormat::NAME).unwrap();
        CmdFormat::from(sub_matches)
    }

    #[test]
    fn parses_format_command() {
        let cmd = parse(&[
            "--freq",
            "monthly",
            "--interval",
            "2",
            "--by-day",
            "-1FR,2mo",
            "--by-month-day",
            "-1,15",
            "--count",
            "3",
        ]);
        assert_eq!(cmd.frequency, Frequency::Monthly);
        assert_eq!(cmd.interval, Some(2));
        assert_eq!(
            cmd.days_of_the_week,
            [
                DayOfWeek::new(Weekday::Friday, -1).unwrap(),
                DayOfWeek::new(Weekday::Monday, 2).unwrap()
            ]
        );
        assert_eq!(cmd.days_of_the_month, [-1, 15]);
        assert_eq!(cmd.count, Some(3));
        assert_eq!(cmd.days_of_the_year, None);

        let rule = cmd.build().unwrap();
        assert_eq!(
            serialize(&rule),
            "RRULE:FREQ=MONTHLY;INTERVAL=2;COUNT=3;BYDAY=2MO,-1FR;BYMONTHDAY=-1,15"
        );
    }

    #[test]
    fn accepts_weekday_aliases() {
        let cmd = parse(&["--freq", "weekly", "--wkst", "su"]);
        assert_eq!(cmd.first_day_of_week, Some(Weekday::Sunday));
        let cmd = parse(&["--freq", "weekly", "--wkst", "monday"]);
        assert_eq!(cmd.first_day_of_week, Some(Weekday::Monday));
    }

    #[test]
    fn formats_with_start_line() {
        let cmd = parse(&[
            "--freq",
            "daily",
            "--until",
            "2025-01-01T00:00:00Z",
            "--tz",
            "Asia/Shanghai",
            "--start",
            "2024-06-01T01:00:00Z",
        ]);
        let rule = cmd.build().unwrap();
        assert_eq!(
            serialize_full(&rule),
            "DTSTART;TZID=Asia/Shanghai:20240601T090000\n\
             RRULE:FREQ=DAILY;UNTIL=20250101T080000+08"
        );
    }

    #[test]
    fn rejects_invalid_rules() {
        let cmd = parse(&["--freq", "weekly", "--by-month-day", "1"]);
        let err = cmd.build().unwrap_err();
        assert_eq!(err.to_string(), "BYMONTHDAY is not allowed with FREQ=WEEKLY");

        assert!(parse(&["--freq", "daily", "--count", "0"]).build().is_err());
        assert!(parse(&["--freq", "daily", "--interval", "0"]).build().is_err());
    }

    #[test]
    fn rejects_conflicting_arguments() {
        let cmd = Command::new("test").subcommand(CmdFormat::command());
        let result = cmd.try_get_matches_from([
            "test",
            CmdFormat::NAME,
            "--freq",
            "daily",
            "--count",
            "1",
            "--until",
            "2025-01-01T00:00:00Z",
        ]);
        assert!(result.is_err());

        let cmd = Command::new("test").subcommand(CmdFormat::command());
        assert!(cmd.try_get_matches_from(["test", CmdFormat::NAME]).is_err());
    }
}
