// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use chumsky::Parser;
use chumsky::extra::ParserExtra;
use chumsky::input::Input;
use chumsky::label::LabelError;
use chumsky::prelude::*;
use chumsky::span::SimpleSpan;

use crate::keyword::{
    KW_DAY_FR, KW_DAY_MO, KW_DAY_SA, KW_DAY_SU, KW_DAY_TH, KW_DAY_TU, KW_DAY_WE,
    KW_RRULE_FREQ_DAILY, KW_RRULE_FREQ_HOURLY, KW_RRULE_FREQ_MINUTELY, KW_RRULE_FREQ_MONTHLY,
    KW_RRULE_FREQ_SECONDLY, KW_RRULE_FREQ_WEEKLY, KW_RRULE_FREQ_YEARLY,
};
use crate::model::{Frequency, Weekday};
use crate::value::ValueExpected;
use crate::value::numeric::value_integer;

/// ```txt
/// freq        = "SECONDLY" / "MINUTELY" / "HOURLY" / "DAILY"
///             / "WEEKLY" / "MONTHLY" / "YEARLY"
/// ```
///
/// The sub-daily frequencies are recognized but rejected: the calendars this
/// codec targets cannot express them.
pub fn value_frequency<'src, I, E>() -> impl Parser<'src, I, Frequency, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
    E::Error: LabelError<'src, I, ValueExpected>,
{
    choice((
        just(KW_RRULE_FREQ_SECONDLY).to(None),
        just(KW_RRULE_FREQ_MINUTELY).to(None),
        just(KW_RRULE_FREQ_HOURLY).to(None),
        just(KW_RRULE_FREQ_DAILY).to(Some(Frequency::Daily)),
        just(KW_RRULE_FREQ_WEEKLY).to(Some(Frequency::Weekly)),
        just(KW_RRULE_FREQ_MONTHLY).to(Some(Frequency::Monthly)),
        just(KW_RRULE_FREQ_YEARLY).to(Some(Frequency::Yearly)),
    ))
    .labelled(ValueExpected::SupportedFrequency)
    .try_map(|freq, span| {
        freq.ok_or_else(|| {
            E::Error::expected_found([ValueExpected::SupportedFrequency], None, span)
        })
    })
}

/// ```txt
/// weekday     = "SU" / "MO" / "TU" / "WE" / "TH" / "FR" / "SA"
/// ```
pub fn value_weekday<'src, I, E>() -> impl Parser<'src, I, Weekday, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
    E::Error: LabelError<'src, I, ValueExpected>,
{
    choice((
        just(KW_DAY_SU).to(Weekday::Sunday),
        just(KW_DAY_MO).to(Weekday::Monday),
        just(KW_DAY_TU).to(Weekday::Tuesday),
        just(KW_DAY_WE).to(Weekday::Wednesday),
        just(KW_DAY_TH).to(Weekday::Thursday),
        just(KW_DAY_FR).to(Weekday::Friday),
        just(KW_DAY_SA).to(Weekday::Saturday),
    ))
    .labelled(ValueExpected::Weekday)
}

/// ```txt
/// weekdaynum  = [[plus / minus] ordwk] weekday
/// ```
///
/// The ordinal is returned as written, 0 when absent; its range is checked
/// when the day is built.
fn value_weekday_num<'src, I, E>() -> impl Parser<'src, I, (i32, Weekday), E>
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
    E::Error: LabelError<'src, I, ValueExpected>,
{
    value_integer()
        .or_not()
        .then(value_weekday())
        .map(|(n, day)| (n.unwrap_or(0), day))
}

/// ```txt
/// bywdaylist  = ( weekdaynum *("," weekdaynum) )
/// ```
pub fn values_weekday_num<'src, I, E>() -> impl Parser<'src, I, Vec<(i32, Weekday)>, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
    E::Error: LabelError<'src, I, ValueExpected>,
{
    value_weekday_num()
        .separated_by(just(','))
        .at_least(1)
        .collect()
}
