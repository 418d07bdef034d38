// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Inputs the parser and the validating constructor must refuse.

use rrulekit_core::{
    DayOfWeek, ErrorKind, Field, Frequency, ParseError, RuleError, RuleParts, Weekday, parse,
};

#[test]
fn rejects_documented_inputs() {
    let cases = [
        ("FREQ=DAILY;FREQ=DAILY", ErrorKind::DuplicateClause),
        ("FREQ=DAILY;COUNT=2;UNTIL=20230101", ErrorKind::ConflictingEnd),
        ("FREQ=WEEKLY;BYMONTHDAY=1", ErrorKind::InvalidCombination),
        ("FREQ=DAILY;BYEASTER=1", ErrorKind::UnknownClause),
        ("FREQ=DAILY;INTERVAL", ErrorKind::MalformedClause),
        ("FREQ=DAILY;UNTIL=yesterday", ErrorKind::MalformedValue),
        ("COUNT=3", ErrorKind::MissingFrequency),
        ("FREQ=YEARLY;BYMONTH=0", ErrorKind::InvalidField),
    ];
    for (src, kind) in cases {
        let err = parse(src).expect_err(src);
        assert_eq!(err.kind(), kind, "Failed for {src}: {err}");
    }
}

#[test]
fn reports_errors_in_clause_order() {
    // The duplicate comes before the bad value
    assert_eq!(
        parse("FREQ=DAILY;FREQ=DAILY;COUNT=x").unwrap_err().kind(),
        ErrorKind::DuplicateClause
    );
    // Malformed clauses are found before the missing FREQ
    assert_eq!(
        parse("COUNT=1;;").unwrap_err().kind(),
        ErrorKind::MalformedClause
    );
}

#[test]
fn explains_malformed_values() {
    let err = parse("FREQ=MONTHLY;BYMONTHDAY=1,,2").unwrap_err();
    let ParseError::MalformedValue {
        key, value, span, ..
    } = &err
    else {
        panic!("unexpected error {err}");
    };
    assert_eq!(key, "BYMONTHDAY");
    assert_eq!(value, "1,,2");
    assert!(span.start <= value.len() && span.end <= value.len());
    assert!(err.to_string().starts_with("malformed BYMONTHDAY value `1,,2`"));
}

#[test]
fn rejects_out_of_range_week_numbers_without_panicking() {
    assert_eq!(
        DayOfWeek::new(Weekday::Monday, 54),
        Err(RuleError::InvalidField {
            field: Field::WeekNumber,
            value: 54
        })
    );
    assert_eq!(
        DayOfWeek::new(Weekday::Monday, i8::MIN).unwrap_err().kind(),
        ErrorKind::InvalidField
    );
    assert!(DayOfWeek::new(Weekday::Monday, -53).is_ok());
}

#[test]
fn constructor_rejects_what_parser_rejects() {
    let parts = RuleParts::new(Frequency::Weekly).days_of_the_month(vec![1]);
    let from_parts = parts.build().unwrap_err();
    let from_text = parse("FREQ=WEEKLY;BYMONTHDAY=1").unwrap_err();
    assert_eq!(from_text, ParseError::Invalid(from_parts));
}

#[test]
fn displays_errors() {
    let cases = [
        ("FREQ=DAILY;WKST=MO;WKST=SU", "WKST appears more than once"),
        (
            "FREQ=DAILY;UNTIL=20230101;COUNT=1",
            "COUNT and UNTIL must not occur in the same rule",
        ),
        ("FREQ=DAILY;BYHOUR=1", "unsupported clause BYHOUR"),
        ("BYDAY=MO", "FREQ is required"),
        (
            "FREQ=WEEKLY;BYMONTHDAY=1",
            "BYMONTHDAY is not allowed with FREQ=WEEKLY",
        ),
        ("FREQ=DAILY;INTERVAL=0", "invalid INTERVAL value: 0"),
    ];
    for (src, expected) in cases {
        assert_eq!(parse(src).unwrap_err().to_string(), expected);
    }
}
