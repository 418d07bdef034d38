// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Serialize a [`Rule`] into canonical RRULE text.
//!
//! The canonical form omits every field equal to its implicit default and
//! writes the clauses in a fixed order:
//!
//! ```txt
//! RRULE:FREQ=..;INTERVAL=..;UNTIL=..|COUNT=..;WKST=..;BYWEEKNO=..;BYDAY=..;
//!       BYMONTH=..;BYMONTHDAY=..;BYYEARDAY=..;BYSETPOS=..
//! ```

use std::fmt::{self, Display, Write};

use jiff::Timestamp;
use jiff::tz::TimeZone;

use crate::keyword::{
    KW_DTSTART, KW_RRULE, KW_RRULE_BYDAY, KW_RRULE_BYMONTH, KW_RRULE_BYMONTHDAY,
    KW_RRULE_BYSETPOS, KW_RRULE_BYWEEKNO, KW_RRULE_BYYEARDAY, KW_RRULE_COUNT, KW_RRULE_FREQ,
    KW_RRULE_INTERVAL, KW_RRULE_UNTIL, KW_RRULE_WKST, KW_TZID,
};
use crate::model::{DayOfWeek, End, Rule};

const LOCAL_DATE_TIME: &str = "%Y%m%dT%H%M%S";

/// Serialize a rule into its canonical `RRULE:` line.
///
/// ```
/// # use rrulekit_core::{Frequency, RuleParts, Weekday, serialize};
/// let rule = RuleParts::new(Frequency::Weekly)
///     .interval(2)
///     .days_of_the_week(vec![Weekday::Thursday.into(), Weekday::Monday.into()])
///     .build()
///     .unwrap();
/// assert_eq!(serialize(&rule), "RRULE:FREQ=WEEKLY;INTERVAL=2;BYDAY=MO,TH");
/// ```
#[must_use]
pub fn serialize(rule: &Rule) -> String {
    rule.to_string()
}

/// Serialize a rule together with its `DTSTART` line, newline separated.
///
/// Only the rule line is returned when [`date_start_line`] yields nothing.
#[must_use]
pub fn serialize_full(rule: &Rule) -> String {
    match date_start_line(rule) {
        Some(start) => format!("{start}\n{rule}"),
        None => rule.to_string(),
    }
}

/// The companion `DTSTART;TZID=<zone>:<local time>` line.
///
/// Returns `None` unless the rule has both a start date and a known time zone.
#[must_use]
pub fn date_start_line(rule: &Rule) -> Option<String> {
    let start = rule.start_date()?;
    let name = rule.time_zone_identifier()?;
    let tz = TimeZone::get(name)
        .inspect_err(|e| tracing::warn!(zone = name, error = %e, "unknown time zone, no DTSTART line"))
        .ok()?;

    let local = start.to_zoned(tz);
    Some(format!(
        "{KW_DTSTART};{KW_TZID}={name}:{}",
        local.strftime(LOCAL_DATE_TIME)
    ))
}

/// Write the canonical `RRULE:` line of a rule.
///
/// # Errors
/// Returns an error only if the writer fails.
pub fn write_rule<W: Write + ?Sized>(w: &mut W, rule: &Rule) -> fmt::Result {
    write!(w, "{KW_RRULE}:{KW_RRULE_FREQ}={}", rule.frequency())?;

    if rule.interval() > 1 {
        write!(w, ";{KW_RRULE_INTERVAL}={}", rule.interval())?;
    }

    match rule.end() {
        Some(End::AtDate(until)) => {
            write!(w, ";{KW_RRULE_UNTIL}=")?;
            write_until(w, until, rule.time_zone_identifier())?;
        }
        Some(End::AfterCount(count)) => write!(w, ";{KW_RRULE_COUNT}={count}")?,
        None => {}
    }

    if let Some(day) = rule.first_day_of_week() {
        write!(w, ";{KW_RRULE_WKST}={day}")?;
    }

    if let Some(weeks) = rule.weeks_of_the_year() {
        write_list(w, KW_RRULE_BYWEEKNO, weeks)?;
    }

    let days = rule.days_of_the_week();
    if !days.is_empty() && !is_whole_week(days) {
        let mut days = days.to_vec();
        days.sort_by_key(|d| d.day().number());
        write_list(w, KW_RRULE_BYDAY, &days)?;
    }

    let months = rule.months_of_the_year();
    if !months.is_empty() {
        let mut months = months.to_vec();
        months.sort_unstable();
        if !months.iter().copied().eq(1..=12) {
            write_list(w, KW_RRULE_BYMONTH, &months)?;
        }
    }

    let month_days = rule.days_of_the_month();
    if !month_days.is_empty() {
        let mut month_days = month_days.to_vec();
        month_days.sort_unstable();
        if !month_days.iter().copied().eq(1..=31) {
            write_list(w, KW_RRULE_BYMONTHDAY, &month_days)?;
        }
    }

    if let Some(days) = rule.days_of_the_year() {
        write_list(w, KW_RRULE_BYYEARDAY, days)?;
    }

    if let Some(positions) = rule.set_positions() {
        write_list(w, KW_RRULE_BYSETPOS, positions)?;
    }

    Ok(())
}

impl Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_rule(f, self)
    }
}

/// All seven days, each without an ordinal.
fn is_whole_week(days: &[DayOfWeek]) -> bool {
    let mut seen = [false; 7];
    for day in days {
        if day.week_number() != 0 {
            return false;
        }
        if let Some(slot) = seen.get_mut(usize::from(day.day().number() - 1)) {
            *slot = true;
        }
    }
    days.len() == 7 && seen.iter().all(|s| *s)
}

fn write_list<W: Write + ?Sized, T: Display>(w: &mut W, key: &str, values: &[T]) -> fmt::Result {
    write!(w, ";{key}=")?;
    for (i, v) in values.iter().enumerate() {
        if i > 0 {
            w.write_char(',')?;
        }
        write!(w, "{v}")?;
    }
    Ok(())
}

/// `yyyyMMddTHHmmss` followed by `Z` in UTC, or by the `±HH[MM]` offset of
/// the rule's zone. Rules only hold instants whose year in that zone has four
/// digits.
fn write_until<W: Write + ?Sized>(
    w: &mut W,
    until: Timestamp,
    time_zone_identifier: Option<&str>,
) -> fmt::Result {
    let tz = match time_zone_identifier {
        Some(name) => TimeZone::get(name).unwrap_or_else(|e| {
            tracing::warn!(zone = name, error = %e, "unknown time zone, writing UNTIL in UTC");
            TimeZone::UTC
        }),
        None => TimeZone::UTC,
    };

    let local = until.to_zoned(tz);
    write!(w, "{}", local.strftime(LOCAL_DATE_TIME))?;

    let seconds = local.offset().seconds();
    if seconds == 0 {
        return w.write_char('Z');
    }

    let sign = if seconds < 0 { '-' } else { '+' };
    let (hours, minutes) = (seconds.abs() / 3600, seconds.abs() % 3600 / 60);
    write!(w, "{sign}{hours:02}")?;
    if minutes != 0 {
        write!(w, "{minutes:02}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;
    use crate::model::{Frequency, RuleParts, Weekday};

    fn until(s: &str) -> Option<End> {
        Some(End::AtDate(s.parse().unwrap()))
    }

    #[test]
    fn serializes_weekly_vectors() {
        let all_days: Vec<DayOfWeek> = Weekday::iter().map(DayOfWeek::from).collect();
        let cases = [
            (RuleParts::new(Frequency::Weekly), "RRULE:FREQ=WEEKLY"),
            (
                RuleParts::new(Frequency::Weekly).interval(2),
                "RRULE:FREQ=WEEKLY;INTERVAL=2",
            ),
            (
                RuleParts::new(Frequency::Weekly)
                    .interval(2)
                    .days_of_the_week(vec![Weekday::Monday.into(), Weekday::Thursday.into()]),
                "RRULE:FREQ=WEEKLY;INTERVAL=2;BYDAY=MO,TH",
            ),
            (
                RuleParts::new(Frequency::Weekly)
                    .interval(2)
                    .days_of_the_week(all_days),
                "RRULE:FREQ=WEEKLY;INTERVAL=2",
            ),
        ];
        for (parts, expected) in cases {
            assert_eq!(serialize(&parts.build().unwrap()), expected);
        }
    }

    #[test]
    fn serializes_clauses_in_canonical_order() {
        let rule = RuleParts::new(Frequency::Yearly)
            .interval(3)
            .end(Some(End::count(5).unwrap()))
            .first_day_of_week(Some(Weekday::Monday))
            .weeks_of_the_year(Some(vec![20, 1]))
            .days_of_the_week(vec![Weekday::Friday.into(), Weekday::Sunday.into()])
            .months_of_the_year(vec![6, 3])
            .days_of_the_month(vec![-1, 15])
            .days_of_the_year(Some(vec![200, 100]))
            .set_positions(Some(vec![-1]))
            .build()
            .unwrap();
        assert_eq!(
            serialize(&rule),
            "RRULE:FREQ=YEARLY;INTERVAL=3;COUNT=5;WKST=MO;BYWEEKNO=20,1;BYDAY=SU,FR;\
             BYMONTH=3,6;BYMONTHDAY=-1,15;BYYEARDAY=200,100;BYSETPOS=-1"
        );
    }

    #[test]
    fn serializes_weekday_ordinals_by_day_number() {
        let rule = RuleParts::new(Frequency::Monthly)
            .days_of_the_week(vec![
                DayOfWeek::new(Weekday::Friday, -1).unwrap(),
                DayOfWeek::new(Weekday::Monday, 2).unwrap(),
                DayOfWeek::new(Weekday::Monday, 1).unwrap(),
            ])
            .build()
            .unwrap();
        // sort is stable, equal days keep their relative order
        assert_eq!(serialize(&rule), "RRULE:FREQ=MONTHLY;BYDAY=2MO,1MO,-1FR");
    }

    #[test]
    fn keeps_whole_week_with_ordinals() {
        let mut days: Vec<DayOfWeek> = Weekday::iter().map(DayOfWeek::from).collect();
        days[0] = DayOfWeek::new(Weekday::Sunday, 1).unwrap();
        let rule = RuleParts::new(Frequency::Monthly)
            .days_of_the_week(days)
            .build()
            .unwrap();
        assert_eq!(
            serialize(&rule),
            "RRULE:FREQ=MONTHLY;BYDAY=1SU,MO,TU,WE,TH,FR,SA"
        );
    }

    #[test]
    fn omits_implicit_months_and_month_days() {
        let rule = RuleParts::new(Frequency::Yearly)
            .months_of_the_year((1..=12).rev().collect())
            .days_of_the_month((1..=31).collect())
            .build()
            .unwrap();
        assert_eq!(serialize(&rule), "RRULE:FREQ=YEARLY");

        let rule = RuleParts::new(Frequency::Yearly)
            .months_of_the_year((1..=11).collect())
            .build()
            .unwrap();
        assert_eq!(
            serialize(&rule),
            "RRULE:FREQ=YEARLY;BYMONTH=1,2,3,4,5,6,7,8,9,10,11"
        );
    }

    #[test]
    fn serializes_until_in_utc() {
        let rule = Rule::new(Frequency::Daily)
            .with_end(until("2023-01-01T12:30:00Z"))
            .unwrap();
        assert_eq!(serialize(&rule), "RRULE:FREQ=DAILY;UNTIL=20230101T123000Z");
    }

    #[test]
    fn serializes_until_in_rule_zone() {
        let cases = [
            ("Europe/Berlin", "RRULE:FREQ=DAILY;UNTIL=20230101T133000+01"),
            ("Asia/Kolkata", "RRULE:FREQ=DAILY;UNTIL=20230101T180000+0530"),
            ("America/New_York", "RRULE:FREQ=DAILY;UNTIL=20230101T073000-05"),
            ("UTC", "RRULE:FREQ=DAILY;UNTIL=20230101T123000Z"),
            ("Not/A_Zone", "RRULE:FREQ=DAILY;UNTIL=20230101T123000Z"),
        ];
        for (zone, expected) in cases {
            let rule = Rule::new(Frequency::Daily)
                .with_end(until("2023-01-01T12:30:00Z"))
                .unwrap()
                .with_time_zone_identifier(Some(zone.to_owned()))
                .unwrap();
            assert_eq!(serialize(&rule), expected, "Failed for {zone}");
        }
    }

    #[test]
    fn writes_date_start_line() {
        let start: Timestamp = "2024-03-10T14:00:00Z".parse().unwrap();
        let rule = Rule::new(Frequency::Weekly)
            .with_start_date(Some(start))
            .with_time_zone_identifier(Some("America/New_York".to_owned()))
            .unwrap();
        assert_eq!(
            date_start_line(&rule).as_deref(),
            Some("DTSTART;TZID=America/New_York:20240310T100000")
        );
        assert_eq!(
            serialize_full(&rule),
            "DTSTART;TZID=America/New_York:20240310T100000\nRRULE:FREQ=WEEKLY"
        );
    }

    #[test]
    fn skips_date_start_line_without_zone_or_start() {
        let start: Timestamp = "2024-03-10T14:00:00Z".parse().unwrap();
        let cases = [
            Rule::new(Frequency::Daily),
            Rule::new(Frequency::Daily).with_start_date(Some(start)),
            Rule::new(Frequency::Daily)
                .with_time_zone_identifier(Some("UTC".to_owned()))
                .unwrap(),
            Rule::new(Frequency::Daily)
                .with_start_date(Some(start))
                .with_time_zone_identifier(Some("Nowhere/Nothing".to_owned()))
                .unwrap(),
        ];
        for rule in cases {
            assert_eq!(date_start_line(&rule), None);
            assert_eq!(serialize_full(&rule), "RRULE:FREQ=DAILY");
        }
    }

    #[test]
    fn writes_into_any_fmt_writer() {
        let mut out = String::from("> ");
        write_rule(&mut out, &Rule::new(Frequency::Monthly)).unwrap();
        assert_eq!(out, "> RRULE:FREQ=MONTHLY");
    }
}
