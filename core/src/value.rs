// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Grammars of the RRULE clause values.
//!
//! Each parser consumes the value of a single `KEY=VALUE` clause. They check
//! syntax only; ranges are left to the rule constructor so that a value such
//! as `BYMONTH=13` is reported as an invalid field rather than as malformed
//! text.

mod datetime;
mod numeric;
mod weekday;

use std::borrow::Cow;

use chumsky::error::{Rich, RichPattern};

pub(crate) use datetime::{ValueUntil, value_until};
pub(crate) use numeric::{value_integer, values_integer};
pub(crate) use weekday::{value_frequency, value_weekday, values_weekday_num};

/// Failure reasons when a specific value type was expected but not found.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValueExpected {
    /// A valid calendar date was expected
    Date,
    /// A valid time of day was expected
    Time,
    /// A valid UTC offset was expected
    UtcOffset,
    /// A 32-bit signed integer value was expected
    I32,
    /// An integer, possibly signed
    Integer,
    /// One of the frequencies the codec accepts
    SupportedFrequency,
    /// A two-letter weekday code
    Weekday,
}

impl From<ValueExpected> for RichPattern<'_, char> {
    fn from(expected: ValueExpected) -> Self {
        match expected {
            ValueExpected::Date => Self::Label(Cow::Borrowed("valid date")),
            ValueExpected::Time => Self::Label(Cow::Borrowed("valid time")),
            ValueExpected::UtcOffset => Self::Label(Cow::Borrowed("valid UTC offset")),
            ValueExpected::I32 => Self::Label(Cow::Borrowed("i32 in range")),
            ValueExpected::Integer => Self::Label(Cow::Borrowed("integer")),
            ValueExpected::SupportedFrequency => {
                Self::Label(Cow::Borrowed("DAILY, WEEKLY, MONTHLY or YEARLY"))
            }
            ValueExpected::Weekday => Self::Label(Cow::Borrowed("weekday code")),
        }
    }
}

/// Render a grammar error as a short, human readable reason.
pub(crate) fn describe_error(err: &Rich<'_, char>) -> String {
    let expected: Vec<String> = err.expected().map(ToString::to_string).collect();
    match (err.found(), expected.is_empty()) {
        (Some(c), false) => format!("found '{c}', expected {}", expected.join(" or ")),
        (Some(c), true) => format!("unexpected '{c}'"),
        (None, false) => format!("expected {}", expected.join(" or ")),
        (None, true) => "unexpected end of value".to_owned(),
    }
}
