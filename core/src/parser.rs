// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Parse RRULE text into a [`Rule`].

use std::num::NonZeroU32;
use std::str::FromStr;

use chumsky::error::Rich;
use chumsky::prelude::*;
use jiff::Timestamp;
use jiff::tz::TimeZone;

use crate::error::{Field, ParseError, RuleError};
use crate::keyword::{
    KW_DTSTART, KW_RRULE, KW_RRULE_BYDAY, KW_RRULE_BYMONTH, KW_RRULE_BYMONTHDAY,
    KW_RRULE_BYSETPOS, KW_RRULE_BYWEEKNO, KW_RRULE_BYYEARDAY, KW_RRULE_COUNT, KW_RRULE_FREQ,
    KW_RRULE_INTERVAL, KW_RRULE_UNTIL, KW_RRULE_WKST,
};
use crate::model::{DayOfWeek, End, Frequency, Rule, RuleParts, Weekday};
use crate::value::{
    ValueUntil, describe_error, value_frequency, value_integer, value_until, value_weekday,
    values_integer, values_weekday_num,
};

/// Options of [`parse_with`].
#[derive(Debug, Clone)]
pub struct ParseOptions {
    floating_time_zone: TimeZone,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            floating_time_zone: TimeZone::UTC,
        }
    }
}

impl ParseOptions {
    /// Set the zone used to resolve `UNTIL` values written without an offset
    /// or a `TZID`. Defaults to UTC.
    #[must_use]
    pub fn floating_time_zone(mut self, tz: TimeZone) -> Self {
        self.floating_time_zone = tz;
        self
    }

    /// The zone used to resolve floating `UNTIL` values.
    #[must_use]
    pub const fn get_floating_time_zone(&self) -> &TimeZone {
        &self.floating_time_zone
    }
}

/// Parse an RRULE line with the default options.
///
/// The text may start with `RRULE:` and is case-insensitive. Clauses are
/// separated by `;`, each clause is `KEY=VALUE`, and every key may appear at
/// most once. `DTSTART` is accepted and ignored.
///
/// ## Errors
///
/// Returns a [`ParseError`] describing the first clause that is rejected, or
/// the constraint the resulting rule would break.
///
/// ## Examples
///
/// ```
/// # use rrulekit_core::{Frequency, parse};
/// let rule = parse("RRULE:FREQ=MONTHLY;BYMONTHDAY=-1").unwrap();
/// assert_eq!(rule.frequency(), Frequency::Monthly);
/// assert_eq!(rule.days_of_the_month(), [-1]);
/// ```
///
/// Malformed values carry the location of the failure within the value
///
/// ```
/// # use rrulekit_core::{ParseError, parse};
/// use ariadne::{Color, Label, Report, ReportKind, Source};
/// let result = parse("FREQ=DAILY;UNTIL=20231301");
/// let Err(ParseError::MalformedValue { key, value, reason, span }) = result else {
///     panic!("expected a malformed value");
/// };
/// assert_eq!(key, "UNTIL");
/// let report = Report::build(ReportKind::Error, span.clone())
///     .with_config(ariadne::Config::new().with_index_type(ariadne::IndexType::Byte))
///     .with_message(format!("malformed {key} value"))
///     .with_label(Label::new(span).with_message(reason).with_color(Color::Red))
///     .finish();
/// report.eprint(Source::from(value.as_str())).unwrap();
/// ```
pub fn parse(text: &str) -> Result<Rule, ParseError> {
    parse_with(text, &ParseOptions::default())
}

/// Parse an RRULE line.
///
/// ## Errors
///
/// See [`parse`].
pub fn parse_with(text: &str, options: &ParseOptions) -> Result<Rule, ParseError> {
    let mut clauses = Clauses::default();
    for clause in split_clauses(text) {
        let (key, value) = match clause.split_once('=') {
            Some((key, value)) if !key.is_empty() => (key, value),
            _ => return Err(ParseError::MalformedClause { clause }),
        };
        clauses
            .accept(key, value, options)
            .inspect_err(|e| tracing::debug!(key, value, error = %e, "rejected clause"))?;
        tracing::trace!(key, value, "accepted clause");
    }

    clauses
        .build()
        .inspect_err(|e| tracing::debug!(error = %e, "rejected rule"))
}

/// Split RRULE text into its clauses.
///
/// The text is trimmed and uppercased, and a leading `RRULE:` is removed. The
/// clauses are returned as written, empty ones included.
#[must_use]
pub fn split_clauses(text: &str) -> Vec<String> {
    let text = text.trim().to_uppercase();
    let body = text
        .strip_prefix(KW_RRULE)
        .and_then(|rest| rest.strip_prefix(':'))
        .unwrap_or(&text);

    body.split(';').map(str::to_owned).collect()
}

impl FromStr for Rule {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

/// Clauses accepted so far, each slot set at most once.
#[derive(Debug, Default)]
struct Clauses {
    frequency: Option<Frequency>,
    interval: Option<u32>,
    end: Option<(&'static str, End)>,
    first_day_of_week: Option<Weekday>,
    days_of_the_week: Option<Vec<DayOfWeek>>,
    days_of_the_month: Option<Vec<i8>>,
    days_of_the_year: Option<Vec<i16>>,
    weeks_of_the_year: Option<Vec<i8>>,
    months_of_the_year: Option<Vec<u8>>,
    set_positions: Option<Vec<i16>>,
    date_start: Option<()>,
}

impl Clauses {
    fn accept(&mut self, key: &str, value: &str, options: &ParseOptions) -> Result<(), ParseError> {
        match key {
            KW_RRULE_FREQ => {
                ensure_unset(self.frequency.as_ref(), key)?;
                self.frequency = Some(parse_value(key, value, value_frequency())?);
            }
            KW_RRULE_COUNT | KW_RRULE_UNTIL => {
                let key = if key == KW_RRULE_COUNT {
                    KW_RRULE_COUNT
                } else {
                    KW_RRULE_UNTIL
                };
                match self.end {
                    Some((seen, _)) if seen == key => return Err(duplicate(key)),
                    Some(_) => return Err(ParseError::ConflictingEnd),
                    None => {}
                }

                let end = if key == KW_RRULE_COUNT {
                    let count = parse_value(key, value, value_integer())?;
                    End::AfterCount(to_count(count)?)
                } else {
                    let until = parse_value(key, value, value_until())?;
                    End::AtDate(resolve_until(key, value, until, options)?)
                };
                self.end = Some((key, end));
            }
            KW_RRULE_INTERVAL => {
                ensure_unset(self.interval.as_ref(), key)?;
                let interval = parse_value(key, value, value_integer())?;
                let interval = u32::try_from(interval).map_err(|_| RuleError::InvalidField {
                    field: Field::Interval,
                    value: interval.into(),
                })?;
                self.interval = Some(interval);
            }
            KW_RRULE_BYMONTH => {
                ensure_unset(self.months_of_the_year.as_ref(), key)?;
                let months = parse_value(key, value, values_integer())?;
                self.months_of_the_year = Some(narrow(Field::MonthsOfTheYear, months)?);
            }
            KW_RRULE_BYDAY => {
                ensure_unset(self.days_of_the_week.as_ref(), key)?;
                let days = parse_value(key, value, values_weekday_num())?
                    .into_iter()
                    .map(|(n, day)| {
                        let n = i8::try_from(n).map_err(|_| RuleError::InvalidField {
                            field: Field::WeekNumber,
                            value: n.into(),
                        })?;
                        DayOfWeek::new(day, n)
                    })
                    .collect::<Result<_, _>>()?;
                self.days_of_the_week = Some(days);
            }
            KW_RRULE_BYMONTHDAY => {
                ensure_unset(self.days_of_the_month.as_ref(), key)?;
                let days = parse_value(key, value, values_integer())?;
                self.days_of_the_month = Some(narrow(Field::DaysOfTheMonth, days)?);
            }
            KW_RRULE_BYYEARDAY => {
                ensure_unset(self.days_of_the_year.as_ref(), key)?;
                let days = parse_value(key, value, values_integer())?;
                self.days_of_the_year = Some(narrow(Field::DaysOfTheYear, days)?);
            }
            KW_RRULE_BYWEEKNO => {
                ensure_unset(self.weeks_of_the_year.as_ref(), key)?;
                let weeks = parse_value(key, value, values_integer())?;
                self.weeks_of_the_year = Some(narrow(Field::WeeksOfTheYear, weeks)?);
            }
            KW_RRULE_BYSETPOS => {
                ensure_unset(self.set_positions.as_ref(), key)?;
                let positions = parse_value(key, value, values_integer())?;
                self.set_positions = Some(narrow(Field::SetPositions, positions)?);
            }
            KW_RRULE_WKST => {
                ensure_unset(self.first_day_of_week.as_ref(), key)?;
                self.first_day_of_week = Some(parse_value(key, value, value_weekday())?);
            }
            KW_DTSTART => {
                ensure_unset(self.date_start.as_ref(), key)?;
                self.date_start = Some(());
            }
            // BYSECOND, BYMINUTE and BYHOUR end up here as well
            _ => {
                return Err(ParseError::UnknownClause {
                    key: key.to_owned(),
                });
            }
        }
        Ok(())
    }

    fn build(self) -> Result<Rule, ParseError> {
        let frequency = self.frequency.ok_or(ParseError::MissingFrequency)?;
        let parts = RuleParts {
            frequency,
            interval: self.interval.unwrap_or(1),
            first_day_of_week: self.first_day_of_week,
            days_of_the_week: self.days_of_the_week.unwrap_or_default(),
            days_of_the_month: self.days_of_the_month.unwrap_or_default(),
            days_of_the_year: self.days_of_the_year,
            weeks_of_the_year: self.weeks_of_the_year,
            months_of_the_year: self.months_of_the_year.unwrap_or_default(),
            set_positions: self.set_positions,
            end: self.end.map(|(_, end)| end),
            time_zone_identifier: None,
            start_date: None,
        };
        Ok(parts.build()?)
    }
}

fn ensure_unset<T>(slot: Option<&T>, key: &str) -> Result<(), ParseError> {
    match slot {
        Some(_) => Err(duplicate(key)),
        None => Ok(()),
    }
}

fn duplicate(key: &str) -> ParseError {
    ParseError::DuplicateClause {
        key: key.to_owned(),
    }
}

/// Run a value grammar over the whole value.
fn parse_value<'src, T>(
    key: &str,
    value: &'src str,
    parser: impl Parser<'src, &'src str, T, extra::Err<Rich<'src, char>>>,
) -> Result<T, ParseError> {
    parser
        .then_ignore(end())
        .parse(value)
        .into_result()
        .map_err(|errs| {
            let (reason, span) = match errs.first() {
                Some(e) => (describe_error(e), e.span().start..e.span().end),
                None => ("invalid value".to_owned(), 0..value.len()),
            };
            ParseError::MalformedValue {
                key: key.to_owned(),
                value: value.to_owned(),
                reason,
                span,
            }
        })
}

/// Narrow parsed integers to the storage type of `field`. Values that do not
/// fit are out of range for the field anyway.
fn narrow<T: TryFrom<i32>>(field: Field, values: Vec<i32>) -> Result<Vec<T>, RuleError> {
    values
        .into_iter()
        .map(|v| {
            T::try_from(v).map_err(|_| RuleError::InvalidField {
                field,
                value: v.into(),
            })
        })
        .collect()
}

fn to_count(count: i32) -> Result<NonZeroU32, RuleError> {
    u32::try_from(count)
        .ok()
        .and_then(NonZeroU32::new)
        .ok_or(RuleError::InvalidField {
            field: Field::Count,
            value: count.into(),
        })
}

fn resolve_until(
    key: &str,
    value: &str,
    until: ValueUntil,
    options: &ParseOptions,
) -> Result<Timestamp, ParseError> {
    let malformed = |reason: String| ParseError::MalformedValue {
        key: key.to_owned(),
        value: value.to_owned(),
        reason,
        span: 0..value.len(),
    };

    let resolved = match until {
        ValueUntil::Fixed(dt, offset) => offset.to_timestamp(dt),
        ValueUntil::Floating(dt) => dt
            .to_zoned(options.get_floating_time_zone().clone())
            .map(|zdt| zdt.timestamp()),
        ValueUntil::Zoned(name, dt) => {
            let tz = TimeZone::get(&name)
                .map_err(|_| malformed(format!("unknown time zone {name}")))?;
            dt.to_zoned(tz).map(|zdt| zdt.timestamp())
        }
        ValueUntil::Date(date) => date
            .to_zoned(options.get_floating_time_zone().clone())
            .map(|zdt| zdt.timestamp()),
    };
    resolved.map_err(|e| malformed(e.to_string()))
}
