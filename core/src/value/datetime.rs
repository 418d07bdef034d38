// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use chumsky::Parser;
use chumsky::extra::ParserExtra;
use chumsky::input::Input;
use chumsky::label::LabelError;
use chumsky::prelude::*;
use chumsky::span::SimpleSpan;
use jiff::civil::{Date, DateTime, Time};
use jiff::tz::Offset;

use crate::keyword::KW_TZID;
use crate::value::ValueExpected;
use crate::value::numeric::sign;

/// An `UNTIL` value before it is resolved to an instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueUntil {
    /// Date-time with `Z` or a numeric UTC offset
    Fixed(DateTime, Offset),

    /// Date-time without any zone information
    Floating(DateTime),

    /// Date-time local to a named time zone, as written
    Zoned(String, DateTime),

    /// Date only
    Date(Date),
}

/// Accepted forms, tried in order; the first one that consumes the whole
/// value wins:
///
/// ```txt
/// until       = date-time utc-offset         ; 19970714T133000Z, 19970714T133000+0200
///             / date-time                    ; 19970714T133000
///             / "TZID=" tzid ":" date-time   ; TZID=EUROPE/PARIS:19970714T133000
///             / date                         ; 19970714
///
/// utc-offset  = "Z" / ("+" / "-") time-hour [[":"] time-minute]
/// ```
pub fn value_until<'src, I, E>() -> impl Parser<'src, I, ValueUntil, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
    E::Error: LabelError<'src, I, ValueExpected>,
{
    let fixed = value_date_time()
        .then(utc_offset())
        .then_ignore(end())
        .map(|(dt, offset)| ValueUntil::Fixed(dt, offset));

    let floating = value_date_time()
        .then_ignore(end())
        .map(ValueUntil::Floating);

    let zoned = just(KW_TZID)
        .ignore_then(just('='))
        .ignore_then(
            select! { c if c != ':' => c }
                .repeated()
                .at_least(1)
                .collect::<String>(),
        )
        .then_ignore(just(':'))
        .then(value_date_time())
        .then_ignore(end())
        .map(|(tz, dt)| ValueUntil::Zoned(tz, dt));

    let date = value_date().then_ignore(end()).map(ValueUntil::Date);

    choice((fixed, floating, zoned, date))
}

/// ```txt
/// date-time   = date "T" time
/// ```
fn value_date_time<'src, I, E>() -> impl Parser<'src, I, DateTime, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
    E::Error: LabelError<'src, I, ValueExpected>,
{
    value_date()
        .then_ignore(just('T'))
        .then(value_time())
        .map(|(date, time)| date.to_datetime(time))
}

/// ```txt
/// date        = date-fullyear date-month date-mday
/// date-fullyear = 4DIGIT
/// date-month  = 2DIGIT        ;01-12
/// date-mday   = 2DIGIT        ;01-31, based on month/year
/// ```
fn value_date<'src, I, E>() -> impl Parser<'src, I, Date, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
    E::Error: LabelError<'src, I, ValueExpected>,
{
    let year = i16_0_9()
        .then(i16_0_9())
        .then(i16_0_9())
        .then(i16_0_9())
        .map(|(((a, b), c), d)| 1000 * a + 100 * b + 10 * c + d);

    let month = choice((
        just('0').ignore_then(i8_1_9()),
        just('1').ignore_then(i8_0_2()).map(|b| 10 + b),
    ));

    let day = choice((
        just('0').ignore_then(i8_1_9()),
        i8_1_2().then(i8_0_9()).map(|(a, b)| 10 * a + b),
        just('3').ignore_then(i8_0_1()).map(|b| 30 + b),
    ));

    year.then(month)
        .then(day)
        .try_map(|((year, month), day), span| {
            Date::new(year, month, day)
                .map_err(|_| E::Error::expected_found([ValueExpected::Date], None, span))
        })
}

/// ```txt
/// time        = time-hour time-minute time-second
/// time-hour   = 2DIGIT        ;00-23
/// time-minute = 2DIGIT        ;00-59
/// time-second = 2DIGIT        ;00-60
/// ```
fn value_time<'src, I, E>() -> impl Parser<'src, I, Time, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
    E::Error: LabelError<'src, I, ValueExpected>,
{
    time_hour()
        .then(time_minute())
        .then(time_second())
        .try_map(|((hour, minute), second), span| {
            // NOTE: leap second 60 is contracted to 59
            Time::new(hour, minute, second.min(59), 0)
                .map_err(|_| E::Error::expected_found([ValueExpected::Time], None, span))
        })
}

fn utc_offset<'src, I, E>() -> impl Parser<'src, I, Offset, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
    E::Error: LabelError<'src, I, ValueExpected>,
{
    let numeric = sign()
        .then(time_hour())
        .then(just(':').or_not().ignore_then(time_minute()).or_not())
        .try_map(|((sign, hour), minute), span| {
            let seconds = i32::from(hour) * 3600 + i32::from(minute.unwrap_or(0)) * 60;
            let seconds = if sign == '-' { -seconds } else { seconds };
            Offset::from_seconds(seconds)
                .map_err(|_| E::Error::expected_found([ValueExpected::UtcOffset], None, span))
        });

    choice((just('Z').to(Offset::UTC), numeric))
}

fn time_hour<'src, I, E>() -> impl Parser<'src, I, i8, E> + Copy
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    choice((
        i8_0_1().then(i8_0_9()).map(|(a, b)| 10 * a + b),
        just('2').ignore_then(i8_0_3()).map(|b| 20 + b),
    ))
}

fn time_minute<'src, I, E>() -> impl Parser<'src, I, i8, E> + Copy
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    i8_0_5().then(i8_0_9()).map(|(a, b)| 10 * a + b)
}

fn time_second<'src, I, E>() -> impl Parser<'src, I, i8, E> + Copy
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    choice((
        i8_0_5().then(i8_0_9()).map(|(a, b)| 10 * a + b),
        just('6').ignore_then(just('0')).to(60), // leap second
    ))
}

macro_rules! define_digit_select {
    ($fname:ident : $ty:ty => { $($ch:literal),+ $(,)? }) => {
        #[allow(trivial_numeric_casts, clippy::cast_lossless, clippy::char_lit_as_u8, clippy::cast_possible_wrap)]
        fn $fname<'src, I, E>() -> impl Parser<'src, I, $ty, E> + Copy
        where
            I: Input<'src, Token = char, Span = SimpleSpan>,
            E: ParserExtra<'src, I>,
        {
            select! {
                $(
                    $ch => (($ch as u8 - b'0') as $ty),
                )+
            }
        }
    };
}

define_digit_select!(i8_0_1 : i8 => { '0', '1' });
define_digit_select!(i8_0_2 : i8 => { '0', '1', '2' });
define_digit_select!(i8_0_3 : i8 => { '0', '1', '2', '3' });
define_digit_select!(i8_0_5 : i8 => { '0', '1', '2', '3', '4', '5' });
define_digit_select!(i8_0_9 : i8 => { '0', '1', '2', '3', '4', '5', '6', '7', '8', '9' });
define_digit_select!(i8_1_2 : i8 => { '1', '2' });
define_digit_select!(i8_1_9 : i8 => { '1', '2', '3', '4', '5', '6', '7', '8', '9' });
define_digit_select!(i16_0_9 : i16 => { '0', '1', '2', '3', '4', '5', '6', '7', '8', '9' });
