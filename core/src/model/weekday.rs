// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt::{self, Display};

use crate::error::{Field, RuleError};
use crate::keyword::{KW_DAY_FR, KW_DAY_MO, KW_DAY_SA, KW_DAY_SU, KW_DAY_TH, KW_DAY_TU, KW_DAY_WE};

/// Day of the week, numbered 1 (Sunday) through 7 (Saturday).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, strum::EnumIter)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[repr(u8)]
#[expect(missing_docs)]
pub enum Weekday {
    #[cfg_attr(feature = "clap", value(alias = "su"))]
    Sunday = 1,
    #[cfg_attr(feature = "clap", value(alias = "mo"))]
    Monday = 2,
    #[cfg_attr(feature = "clap", value(alias = "tu"))]
    Tuesday = 3,
    #[cfg_attr(feature = "clap", value(alias = "we"))]
    Wednesday = 4,
    #[cfg_attr(feature = "clap", value(alias = "th"))]
    Thursday = 5,
    #[cfg_attr(feature = "clap", value(alias = "fr"))]
    Friday = 6,
    #[cfg_attr(feature = "clap", value(alias = "sa"))]
    Saturday = 7,
}

impl Weekday {
    /// Monday through Friday.
    pub const WEEKDAYS: [Weekday; 5] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
    ];

    /// Saturday and Sunday.
    pub const WEEKEND: [Weekday; 2] = [Weekday::Saturday, Weekday::Sunday];

    /// Day number, 1 for Sunday through 7 for Saturday.
    #[must_use]
    pub const fn number(self) -> u8 {
        self as u8
    }

    /// Inverse of [`Weekday::number`].
    #[must_use]
    pub const fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(Weekday::Sunday),
            2 => Some(Weekday::Monday),
            3 => Some(Weekday::Tuesday),
            4 => Some(Weekday::Wednesday),
            5 => Some(Weekday::Thursday),
            6 => Some(Weekday::Friday),
            7 => Some(Weekday::Saturday),
            _ => None,
        }
    }

    /// Two-letter RRULE code, e.g. `MO`.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Weekday::Sunday => KW_DAY_SU,
            Weekday::Monday => KW_DAY_MO,
            Weekday::Tuesday => KW_DAY_TU,
            Weekday::Wednesday => KW_DAY_WE,
            Weekday::Thursday => KW_DAY_TH,
            Weekday::Friday => KW_DAY_FR,
            Weekday::Saturday => KW_DAY_SA,
        }
    }

    /// Inverse of [`Weekday::code`], case-insensitive.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        <Self as strum::IntoEnumIterator>::iter().find(|d| d.code().eq_ignore_ascii_case(code))
    }
}

impl Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl From<Weekday> for jiff::civil::Weekday {
    fn from(day: Weekday) -> Self {
        match day {
            Weekday::Sunday => jiff::civil::Weekday::Sunday,
            Weekday::Monday => jiff::civil::Weekday::Monday,
            Weekday::Tuesday => jiff::civil::Weekday::Tuesday,
            Weekday::Wednesday => jiff::civil::Weekday::Wednesday,
            Weekday::Thursday => jiff::civil::Weekday::Thursday,
            Weekday::Friday => jiff::civil::Weekday::Friday,
            Weekday::Saturday => jiff::civil::Weekday::Saturday,
        }
    }
}

impl From<jiff::civil::Weekday> for Weekday {
    fn from(day: jiff::civil::Weekday) -> Self {
        match day {
            jiff::civil::Weekday::Sunday => Weekday::Sunday,
            jiff::civil::Weekday::Monday => Weekday::Monday,
            jiff::civil::Weekday::Tuesday => Weekday::Tuesday,
            jiff::civil::Weekday::Wednesday => Weekday::Wednesday,
            jiff::civil::Weekday::Thursday => Weekday::Thursday,
            jiff::civil::Weekday::Friday => Weekday::Friday,
            jiff::civil::Weekday::Saturday => Weekday::Saturday,
        }
    }
}

/// A weekday with an optional ordinal inside the rule's period.
///
/// A week number of 0 matches every occurrence of the day. A positive `n`
/// selects the n-th occurrence and a negative `n` the n-th from the end, so
/// `-1FR` is the last Friday of the month with `FREQ=MONTHLY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DayOfWeek {
    day: Weekday,
    week_number: i8,
}

impl DayOfWeek {
    /// Largest accepted absolute week number.
    pub const MAX_WEEK_NUMBER: i8 = 53;

    /// Create a day with an ordinal.
    ///
    /// # Errors
    /// Returns [`RuleError::InvalidField`] if `week_number` is outside `[-53, 53]`.
    pub fn new(day: Weekday, week_number: i8) -> Result<Self, RuleError> {
        if (-Self::MAX_WEEK_NUMBER..=Self::MAX_WEEK_NUMBER).contains(&week_number) {
            Ok(Self { day, week_number })
        } else {
            Err(RuleError::InvalidField {
                field: Field::WeekNumber,
                value: week_number.into(),
            })
        }
    }

    /// Every occurrence of `day`.
    #[must_use]
    pub const fn every(day: Weekday) -> Self {
        Self {
            day,
            week_number: 0,
        }
    }

    /// The weekday.
    #[must_use]
    pub const fn day(self) -> Weekday {
        self.day
    }

    /// The ordinal, 0 for every occurrence.
    #[must_use]
    pub const fn week_number(self) -> i8 {
        self.week_number
    }
}

impl From<Weekday> for DayOfWeek {
    fn from(day: Weekday) -> Self {
        Self::every(day)
    }
}

impl Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.week_number != 0 {
            write!(f, "{}", self.week_number)?;
        }
        write!(f, "{}", self.day)
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn numbers_days_from_sunday() {
        let numbers: Vec<_> = Weekday::iter().map(Weekday::number).collect();
        assert_eq!(numbers, [1, 2, 3, 4, 5, 6, 7]);
        for day in Weekday::iter() {
            assert_eq!(Weekday::from_number(day.number()), Some(day));
            assert_eq!(Weekday::from_code(day.code()), Some(day));
        }
        assert_eq!(Weekday::from_number(0), None);
        assert_eq!(Weekday::from_number(8), None);
        assert_eq!(Weekday::from_code("mo"), Some(Weekday::Monday));
        assert_eq!(Weekday::from_code("XX"), None);
    }

    #[test]
    fn converts_to_and_from_jiff() {
        for day in Weekday::iter() {
            let civil: jiff::civil::Weekday = day.into();
            assert_eq!(Weekday::from(civil), day);
        }
        let date = jiff::civil::date(2024, 1, 1); // a Monday
        assert_eq!(Weekday::from(date.weekday()), Weekday::Monday);
    }

    #[test]
    fn rejects_out_of_range_week_number() {
        assert!(DayOfWeek::new(Weekday::Friday, 53).is_ok());
        assert!(DayOfWeek::new(Weekday::Friday, -53).is_ok());

        let err = DayOfWeek::new(Weekday::Friday, 54).unwrap_err();
        assert_eq!(
            err,
            RuleError::InvalidField {
                field: Field::WeekNumber,
                value: 54
            }
        );
        assert!(DayOfWeek::new(Weekday::Friday, -54).is_err());
    }

    #[test]
    fn displays_day_of_week() {
        assert_eq!(DayOfWeek::every(Weekday::Sunday).to_string(), "SU");
        assert_eq!(
            DayOfWeek::new(Weekday::Monday, 2).unwrap().to_string(),
            "2MO"
        );
        assert_eq!(
            DayOfWeek::new(Weekday::Friday, -1).unwrap().to_string(),
            "-1FR"
        );
    }
}
