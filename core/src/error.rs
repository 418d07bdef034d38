// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Errors reported by rule construction and RRULE parsing.

use std::ops::Range;

use crate::model::Frequency;

/// A field of a recurrence rule, displayed with its RRULE key.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum Field {
    /// `INTERVAL`
    #[strum(to_string = "INTERVAL")]
    Interval,

    /// `COUNT`
    #[strum(to_string = "COUNT")]
    Count,

    /// `UNTIL`
    #[strum(to_string = "UNTIL")]
    Until,

    /// `BYDAY`
    #[strum(to_string = "BYDAY")]
    DaysOfTheWeek,

    /// The ordinal of a single `BYDAY` item, e.g. the `-1` in `-1FR`
    #[strum(to_string = "BYDAY week number")]
    WeekNumber,

    /// `BYMONTHDAY`
    #[strum(to_string = "BYMONTHDAY")]
    DaysOfTheMonth,

    /// `BYYEARDAY`
    #[strum(to_string = "BYYEARDAY")]
    DaysOfTheYear,

    /// `BYWEEKNO`
    #[strum(to_string = "BYWEEKNO")]
    WeeksOfTheYear,

    /// `BYMONTH`
    #[strum(to_string = "BYMONTH")]
    MonthsOfTheYear,

    /// `BYSETPOS`
    #[strum(to_string = "BYSETPOS")]
    SetPositions,
}

/// Flat classification of every failure the crate reports.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A single value is out of range
    InvalidField,
    /// A field is incompatible with the frequency or with another field
    InvalidCombination,
    /// A key appears twice in RRULE text
    DuplicateClause,
    /// Both COUNT and UNTIL are present
    ConflictingEnd,
    /// Unrecognized or unsupported key
    UnknownClause,
    /// A clause is not of the form `KEY=VALUE`
    MalformedClause,
    /// A value does not match its grammar
    MalformedValue,
    /// No FREQ clause
    MissingFrequency,
}

/// Failure to build a [`Rule`](crate::Rule) or a [`DayOfWeek`](crate::DayOfWeek).
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleError {
    /// A value lies outside the range its field accepts.
    #[error("invalid {field} value: {value}")]
    InvalidField {
        /// Field holding the value
        field: Field,

        /// The rejected value
        value: i64,
    },

    /// A list field is set but holds no value.
    #[error("{field} must hold at least one value")]
    EmptyList {
        /// The empty field
        field: Field,
    },

    /// A field is not meaningful for the rule's frequency.
    #[error("{field} is not allowed with FREQ={frequency}")]
    InvalidCombination {
        /// The offending field
        field: Field,

        /// Frequency of the rule
        frequency: Frequency,
    },

    /// Two fields are set that cannot be used together.
    #[error("{field} cannot be combined with {other}")]
    ConflictingFields {
        /// The offending field
        field: Field,

        /// The field it conflicts with
        other: Field,
    },
}

impl RuleError {
    /// Classify the error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            RuleError::InvalidField { .. } | RuleError::EmptyList { .. } => ErrorKind::InvalidField,
            RuleError::InvalidCombination { .. } | RuleError::ConflictingFields { .. } => {
                ErrorKind::InvalidCombination
            }
        }
    }
}

/// Failure to parse RRULE text into a [`Rule`](crate::Rule).
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// A key occurs more than once.
    #[error("{key} appears more than once")]
    DuplicateClause {
        /// The repeated key
        key: String,
    },

    /// COUNT and UNTIL are both present.
    #[error("COUNT and UNTIL must not occur in the same rule")]
    ConflictingEnd,

    /// The key is not part of the supported grammar.
    #[error("unsupported clause {key}")]
    UnknownClause {
        /// The unrecognized key
        key: String,
    },

    /// The clause is not a `KEY=VALUE` pair.
    #[error("malformed clause `{clause}`, expected KEY=VALUE")]
    MalformedClause {
        /// The clause as found in the (uppercased) text
        clause: String,
    },

    /// The value does not match the grammar of its key.
    #[error("malformed {key} value `{value}`: {reason}")]
    MalformedValue {
        /// Key of the clause
        key: String,

        /// Value of the clause
        value: String,

        /// What the grammar expected
        reason: String,

        /// Location of the failure within `value`
        span: Range<usize>,
    },

    /// There is no FREQ clause.
    #[error("FREQ is required")]
    MissingFrequency,

    /// The clauses are well-formed but describe an invalid rule.
    #[error(transparent)]
    Invalid(#[from] RuleError),
}

impl ParseError {
    /// Classify the error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            ParseError::DuplicateClause { .. } => ErrorKind::DuplicateClause,
            ParseError::ConflictingEnd => ErrorKind::ConflictingEnd,
            ParseError::UnknownClause { .. } => ErrorKind::UnknownClause,
            ParseError::MalformedClause { .. } => ErrorKind::MalformedClause,
            ParseError::MalformedValue { .. } => ErrorKind::MalformedValue,
            ParseError::MissingFrequency => ErrorKind::MissingFrequency,
            ParseError::Invalid(e) => e.kind(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_field_with_rrule_key() {
        assert_eq!(Field::DaysOfTheMonth.to_string(), "BYMONTHDAY");
        assert_eq!(Field::SetPositions.to_string(), "BYSETPOS");
    }

    #[test]
    fn displays_rule_errors() {
        let err = RuleError::InvalidCombination {
            field: Field::DaysOfTheMonth,
            frequency: Frequency::Weekly,
        };
        assert_eq!(err.to_string(), "BYMONTHDAY is not allowed with FREQ=WEEKLY");
        assert_eq!(err.kind(), ErrorKind::InvalidCombination);

        let err = RuleError::InvalidField {
            field: Field::MonthsOfTheYear,
            value: 13,
        };
        assert_eq!(err.to_string(), "invalid BYMONTH value: 13");
        assert_eq!(err.kind(), ErrorKind::InvalidField);
    }

    #[test]
    fn classifies_wrapped_rule_errors() {
        let err = ParseError::from(RuleError::ConflictingFields {
            field: Field::DaysOfTheWeek,
            other: Field::WeeksOfTheYear,
        });
        assert_eq!(err.kind(), ErrorKind::InvalidCombination);
        assert_eq!(err.to_string(), "BYDAY cannot be combined with BYWEEKNO");
    }
}
