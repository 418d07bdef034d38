// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::num::NonZeroU32;

use jiff::Timestamp;
use jiff::tz::TimeZone;

use crate::error::{Field, RuleError};
use crate::model::{DayOfWeek, End, Frequency, Weekday};

/// A validated recurrence rule.
///
/// Every `Rule` satisfies the cross-field constraints of the RRULE subset
/// supported here. It can only be obtained from [`Rule::new`], from
/// [`RuleParts::build`] (or `Rule::try_from`), or from the parser, all of
/// which run the same validation.
///
/// ```
/// use rrulekit_core::{Frequency, RuleParts, Weekday};
///
/// let rule = RuleParts::new(Frequency::Weekly)
///     .interval(2)
///     .days_of_the_week(vec![Weekday::Monday.into(), Weekday::Thursday.into()])
///     .build()
///     .unwrap();
/// assert_eq!(rule.to_string(), "RRULE:FREQ=WEEKLY;INTERVAL=2;BYDAY=MO,TH");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Rule {
    frequency: Frequency,
    interval: u32,
    first_day_of_week: Option<Weekday>,
    days_of_the_week: Vec<DayOfWeek>,
    days_of_the_month: Vec<i8>,
    days_of_the_year: Option<Vec<i16>>,
    weeks_of_the_year: Option<Vec<i8>>,
    months_of_the_year: Vec<u8>,
    set_positions: Option<Vec<i16>>,
    end: Option<End>,
    time_zone_identifier: Option<String>,
    start_date: Option<Timestamp>,
}

impl Rule {
    /// A rule with the given frequency and every other field at its default.
    #[must_use]
    pub const fn new(frequency: Frequency) -> Self {
        Self {
            frequency,
            interval: 1,
            first_day_of_week: None,
            days_of_the_week: Vec::new(),
            days_of_the_month: Vec::new(),
            days_of_the_year: None,
            weeks_of_the_year: None,
            months_of_the_year: Vec::new(),
            set_positions: None,
            end: None,
            time_zone_identifier: None,
            start_date: None,
        }
    }

    /// Frequency of the rule.
    #[must_use]
    pub const fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// Number of periods between occurrences, at least 1.
    #[must_use]
    pub const fn interval(&self) -> u32 {
        self.interval
    }

    /// Configured first day of the week (`WKST`).
    #[must_use]
    pub const fn first_day_of_week(&self) -> Option<Weekday> {
        self.first_day_of_week
    }

    /// Weekdays the rule is restricted to (`BYDAY`).
    #[must_use]
    pub fn days_of_the_week(&self) -> &[DayOfWeek] {
        &self.days_of_the_week
    }

    /// Days of the month (`BYMONTHDAY`).
    #[must_use]
    pub fn days_of_the_month(&self) -> &[i8] {
        &self.days_of_the_month
    }

    /// Days of the year (`BYYEARDAY`).
    #[must_use]
    pub fn days_of_the_year(&self) -> Option<&[i16]> {
        self.days_of_the_year.as_deref()
    }

    /// Week numbers of the year (`BYWEEKNO`).
    #[must_use]
    pub fn weeks_of_the_year(&self) -> Option<&[i8]> {
        self.weeks_of_the_year.as_deref()
    }

    /// Months, 1 through 12 (`BYMONTH`).
    #[must_use]
    pub fn months_of_the_year(&self) -> &[u8] {
        &self.months_of_the_year
    }

    /// Ordinal filter over the expanded set (`BYSETPOS`).
    #[must_use]
    pub fn set_positions(&self) -> Option<&[i16]> {
        self.set_positions.as_deref()
    }

    /// End condition, `None` if the rule repeats forever.
    #[must_use]
    pub const fn end(&self) -> Option<End> {
        self.end
    }

    /// IANA time zone the rule is anchored in.
    #[must_use]
    pub fn time_zone_identifier(&self) -> Option<&str> {
        self.time_zone_identifier.as_deref()
    }

    /// Start of the first occurrence.
    #[must_use]
    pub const fn start_date(&self) -> Option<Timestamp> {
        self.start_date
    }

    /// Change the frequency, validating the remaining fields against it.
    ///
    /// # Errors
    /// Returns the first constraint the existing fields break under `frequency`.
    pub fn with_frequency(self, frequency: Frequency) -> Result<Self, RuleError> {
        let mut parts = self.into_parts();
        parts.frequency = frequency;
        parts.build()
    }

    /// Change the interval.
    ///
    /// # Errors
    /// Returns [`RuleError::InvalidField`] if `interval` is zero.
    pub fn with_interval(mut self, interval: u32) -> Result<Self, RuleError> {
        validate_interval(interval)?;
        self.interval = interval;
        Ok(self)
    }

    /// A rule repeating every `interval` periods of `frequency`.
    #[must_use]
    pub const fn every(frequency: Frequency, interval: NonZeroU32) -> Self {
        let mut rule = Self::new(frequency);
        rule.interval = interval.get();
        rule
    }

    /// Restrict the rule to every occurrence of the given weekdays.
    ///
    /// Days without an ordinal are valid under any frequency, unlike the ones
    /// accepted by [`RuleParts::days_of_the_week`].
    #[must_use]
    pub fn with_weekdays(mut self, days: impl IntoIterator<Item = Weekday>) -> Self {
        self.days_of_the_week = days.into_iter().map(DayOfWeek::every).collect();
        self
    }

    /// Change the end condition.
    ///
    /// # Errors
    /// Returns [`RuleError::InvalidField`] if an `UNTIL` instant falls outside
    /// the years 0000 to 9999 in the rule's zone.
    pub fn with_end(self, end: Option<End>) -> Result<Self, RuleError> {
        let mut parts = self.into_parts();
        parts.end = end;
        parts.build()
    }

    /// Change the time zone identifier, which decides how `UNTIL` is written.
    ///
    /// # Errors
    /// Same as [`Rule::with_end`], for the `UNTIL` instant seen in the new zone.
    pub fn with_time_zone_identifier(
        self,
        time_zone_identifier: Option<String>,
    ) -> Result<Self, RuleError> {
        let mut parts = self.into_parts();
        parts.time_zone_identifier = time_zone_identifier;
        parts.build()
    }

    /// Change the start date.
    #[must_use]
    pub const fn with_start_date(mut self, start_date: Option<Timestamp>) -> Self {
        self.start_date = start_date;
        self
    }

    /// Copy the fields out for editing.
    #[must_use]
    pub fn to_parts(&self) -> RuleParts {
        self.clone().into_parts()
    }

    /// Move the fields out for editing.
    #[must_use]
    pub fn into_parts(self) -> RuleParts {
        RuleParts {
            frequency: self.frequency,
            interval: self.interval,
            first_day_of_week: self.first_day_of_week,
            days_of_the_week: self.days_of_the_week,
            days_of_the_month: self.days_of_the_month,
            days_of_the_year: self.days_of_the_year,
            weeks_of_the_year: self.weeks_of_the_year,
            months_of_the_year: self.months_of_the_year,
            set_positions: self.set_positions,
            end: self.end,
            time_zone_identifier: self.time_zone_identifier,
            start_date: self.start_date,
        }
    }
}

impl TryFrom<RuleParts> for Rule {
    type Error = RuleError;

    fn try_from(parts: RuleParts) -> Result<Self, Self::Error> {
        parts.build()
    }
}

/// Unvalidated fields of a [`Rule`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleParts {
    /// Frequency of the rule
    pub frequency: Frequency,
    /// Number of periods between occurrences, must be at least 1
    pub interval: u32,
    /// First day of the week
    pub first_day_of_week: Option<Weekday>,
    /// Weekdays, optionally with ordinals
    pub days_of_the_week: Vec<DayOfWeek>,
    /// Days of the month, in `[-31, -1]` or `[1, 31]`
    pub days_of_the_month: Vec<i8>,
    /// Days of the year, in `[-366, -1]` or `[1, 366]`, yearly rules only
    pub days_of_the_year: Option<Vec<i16>>,
    /// Week numbers, in `[-53, -1]` or `[1, 53]`, yearly rules only
    pub weeks_of_the_year: Option<Vec<i8>>,
    /// Months, in `[1, 12]`
    pub months_of_the_year: Vec<u8>,
    /// Set positions, in `[-366, -1]` or `[1, 366]`
    pub set_positions: Option<Vec<i16>>,
    /// End condition
    pub end: Option<End>,
    /// IANA time zone identifier
    pub time_zone_identifier: Option<String>,
    /// Start of the first occurrence
    pub start_date: Option<Timestamp>,
}

impl RuleParts {
    /// Fields of a rule with the given frequency and every other field at its default.
    #[must_use]
    pub const fn new(frequency: Frequency) -> Self {
        Self {
            frequency,
            interval: 1,
            first_day_of_week: None,
            days_of_the_week: Vec::new(),
            days_of_the_month: Vec::new(),
            days_of_the_year: None,
            weeks_of_the_year: None,
            months_of_the_year: Vec::new(),
            set_positions: None,
            end: None,
            time_zone_identifier: None,
            start_date: None,
        }
    }

    /// Set the interval.
    #[must_use]
    pub const fn interval(mut self, interval: u32) -> Self {
        self.interval = interval;
        self
    }

    /// Set the first day of the week.
    #[must_use]
    pub const fn first_day_of_week(mut self, day: Option<Weekday>) -> Self {
        self.first_day_of_week = day;
        self
    }

    /// Set the weekdays.
    #[must_use]
    pub fn days_of_the_week(mut self, days: Vec<DayOfWeek>) -> Self {
        self.days_of_the_week = days;
        self
    }

    /// Set the days of the month.
    #[must_use]
    pub fn days_of_the_month(mut self, days: Vec<i8>) -> Self {
        self.days_of_the_month = days;
        self
    }

    /// Set the days of the year.
    #[must_use]
    pub fn days_of_the_year(mut self, days: Option<Vec<i16>>) -> Self {
        self.days_of_the_year = days;
        self
    }

    /// Set the week numbers.
    #[must_use]
    pub fn weeks_of_the_year(mut self, weeks: Option<Vec<i8>>) -> Self {
        self.weeks_of_the_year = weeks;
        self
    }

    /// Set the months.
    #[must_use]
    pub fn months_of_the_year(mut self, months: Vec<u8>) -> Self {
        self.months_of_the_year = months;
        self
    }

    /// Set the set positions.
    #[must_use]
    pub fn set_positions(mut self, positions: Option<Vec<i16>>) -> Self {
        self.set_positions = positions;
        self
    }

    /// Set the end condition.
    #[must_use]
    pub const fn end(mut self, end: Option<End>) -> Self {
        self.end = end;
        self
    }

    /// Set the time zone identifier.
    #[must_use]
    pub fn time_zone_identifier(mut self, tz: Option<String>) -> Self {
        self.time_zone_identifier = tz;
        self
    }

    /// Set the start date.
    #[must_use]
    pub const fn start_date(mut self, start: Option<Timestamp>) -> Self {
        self.start_date = start;
        self
    }

    /// Validate the fields and build the rule.
    ///
    /// Nothing is sorted or coerced: a single offending value rejects the
    /// whole rule.
    ///
    /// # Errors
    /// Returns the first violated constraint, checked in this order: interval,
    /// weekday ordinals, days of the month, months, week numbers, days of the
    /// year, set positions, `UNTIL` year. A list that is set must not be
    /// empty.
    pub fn build(self) -> Result<Rule, RuleError> {
        self.validate()?;
        Ok(Rule {
            frequency: self.frequency,
            interval: self.interval,
            first_day_of_week: self.first_day_of_week,
            days_of_the_week: self.days_of_the_week,
            days_of_the_month: self.days_of_the_month,
            days_of_the_year: self.days_of_the_year,
            weeks_of_the_year: self.weeks_of_the_year,
            months_of_the_year: self.months_of_the_year,
            set_positions: self.set_positions,
            end: self.end,
            time_zone_identifier: self.time_zone_identifier,
            start_date: self.start_date,
        })
    }

    fn validate(&self) -> Result<(), RuleError> {
        let freq = self.frequency;
        validate_interval(self.interval)?;

        // Ordinals only make sense inside a month, or a year not split into weeks
        if self.days_of_the_week.iter().any(|d| d.week_number() != 0) {
            match (freq, &self.weeks_of_the_year) {
                (Frequency::Monthly, _) | (Frequency::Yearly, None) => {}
                (Frequency::Yearly, Some(_)) => {
                    return Err(RuleError::ConflictingFields {
                        field: Field::DaysOfTheWeek,
                        other: Field::WeeksOfTheYear,
                    });
                }
                (frequency, _) => {
                    return Err(RuleError::InvalidCombination {
                        field: Field::DaysOfTheWeek,
                        frequency,
                    });
                }
            }
        }

        if !self.days_of_the_month.is_empty() {
            require_not(freq, Frequency::Weekly, Field::DaysOfTheMonth)?;
            validate_ordinals(Field::DaysOfTheMonth, &self.days_of_the_month, 31)?;
        }

        if let Some(month) = self.months_of_the_year.iter().find(|m| !(1..=12).contains(*m)) {
            return Err(RuleError::InvalidField {
                field: Field::MonthsOfTheYear,
                value: (*month).into(),
            });
        }

        if let Some(weeks) = &self.weeks_of_the_year {
            require_yearly(freq, Field::WeeksOfTheYear)?;
            require_values(Field::WeeksOfTheYear, weeks)?;
            validate_ordinals(Field::WeeksOfTheYear, weeks, 53)?;
        }

        if let Some(days) = &self.days_of_the_year {
            require_yearly(freq, Field::DaysOfTheYear)?;
            require_values(Field::DaysOfTheYear, days)?;
            validate_ordinals(Field::DaysOfTheYear, days, 366)?;
        }

        if let Some(positions) = &self.set_positions {
            require_values(Field::SetPositions, positions)?;
            validate_ordinals(Field::SetPositions, positions, 366)?;
        }

        if let Some(End::AtDate(until)) = self.end {
            validate_until_year(until, self.time_zone_identifier.as_deref())?;
        }

        Ok(())
    }
}

impl From<Rule> for RuleParts {
    fn from(rule: Rule) -> Self {
        rule.into_parts()
    }
}

fn validate_interval(interval: u32) -> Result<(), RuleError> {
    match interval {
        0 => Err(RuleError::InvalidField {
            field: Field::Interval,
            value: 0,
        }),
        _ => Ok(()),
    }
}

fn require_not(freq: Frequency, forbidden: Frequency, field: Field) -> Result<(), RuleError> {
    if freq == forbidden {
        Err(RuleError::InvalidCombination {
            field,
            frequency: freq,
        })
    } else {
        Ok(())
    }
}

fn require_values<T>(field: Field, values: &[T]) -> Result<(), RuleError> {
    match values {
        [] => Err(RuleError::EmptyList { field }),
        _ => Ok(()),
    }
}

/// `UNTIL` is written with a four digit year, in the rule's zone or in UTC
/// when that zone is unknown.
fn validate_until_year(
    until: Timestamp,
    time_zone_identifier: Option<&str>,
) -> Result<(), RuleError> {
    let tz = time_zone_identifier
        .and_then(|name| TimeZone::get(name).ok())
        .unwrap_or(TimeZone::UTC);
    let year = until.to_zoned(tz).year();
    if (0..=9999).contains(&year) {
        Ok(())
    } else {
        Err(RuleError::InvalidField {
            field: Field::Until,
            value: year.into(),
        })
    }
}

fn require_yearly(freq: Frequency, field: Field) -> Result<(), RuleError> {
    match freq {
        Frequency::Yearly => Ok(()),
        frequency => Err(RuleError::InvalidCombination { field, frequency }),
    }
}

/// Every value must be nonzero and within `[-max, max]`.
fn validate_ordinals<T>(field: Field, values: &[T], max: i64) -> Result<(), RuleError>
where
    T: Copy + Into<i64>,
{
    match values
        .iter()
        .map(|&v| Into::<i64>::into(v))
        .find(|v| *v == 0 || v.abs() > max)
    {
        Some(value) => Err(RuleError::InvalidField { field, value }),
        None => Ok(()),
    }
}
