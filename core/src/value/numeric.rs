// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use chumsky::Parser;
use chumsky::extra::ParserExtra;
use chumsky::input::Input;
use chumsky::label::LabelError;
use chumsky::prelude::*;
use chumsky::span::SimpleSpan;

use crate::value::ValueExpected;

/// ```txt
/// integer    = (["+"] / "-") 1*DIGIT
/// ```
///
/// Used for `COUNT` and `INTERVAL` as well; their sign is checked together
/// with the other ranges.
pub fn value_integer<'src, I, E>() -> impl Parser<'src, I, i32, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
    E::Error: LabelError<'src, I, ValueExpected>,
{
    sign()
        .or_not()
        .then(
            select! { c @ '0'..='9' => c }
                .repeated()
                .at_least(1)
                .collect::<String>(),
        )
        .try_map_with(|(sign, digits), e| {
            let mut int_str = String::with_capacity(digits.len() + 1);
            if let Some(s) = sign {
                int_str.push(s);
            }
            int_str.push_str(&digits);

            match lexical::parse_partial::<i32, _>(&int_str) {
                Ok((v, n)) if n == int_str.len() => Ok(v),
                _ => Err(E::Error::expected_found(
                    [ValueExpected::I32],
                    None,
                    e.span(),
                )),
            }
        })
        .labelled(ValueExpected::Integer)
}

/// ```txt
/// intlist    = integer *("," integer)
/// ```
pub fn values_integer<'src, I, E>() -> impl Parser<'src, I, Vec<i32>, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
    E::Error: LabelError<'src, I, ValueExpected>,
{
    value_integer()
        .separated_by(just(','))
        .at_least(1)
        .collect()
}

pub(super) fn sign<'src, I, E>() -> impl Parser<'src, I, char, E> + Copy
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    select! { c @ ('+' | '-') => c }
}

#[cfg(test)]
mod tests {
    use chumsky::input::Stream;

    use super::*;

    fn parse(src: &str) -> Result<Vec<i32>, Vec<Rich<'_, char>>> {
        let stream = Stream::from_iter(src.chars());
        values_integer::<'_, _, extra::Err<_>>()
            .then_ignore(end())
            .parse(stream)
            .into_result()
    }

    #[test]
    fn parses_integer_list() {
        let success_cases = [
            ("1", vec![1]),
            ("1,15,-1", vec![1, 15, -1]),
            ("+3,-366", vec![3, -366]),
            ("007", vec![7]),
            ("2147483647", vec![i32::MAX]),
            ("-2147483648", vec![i32::MIN]),
        ];
        for (src, expected) in success_cases {
            assert_eq!(parse(src).unwrap(), expected, "Failed for {src}");
        }
    }

    #[test]
    fn rejects_malformed_integer_list() {
        let fail_cases = [
            "",            // empty
            "1,",          // trailing comma
            ",1",          // leading comma
            "1,,2",        // empty item
            "--1",         // double sign
            "1.5",         // not an integer
            "A",           // not a digit
            "2147483648",  // out of range
            "-2147483649", // out of range
        ];
        for src in fail_cases {
            assert!(parse(src).is_err(), "Parse {src} should fail");
        }
    }

    #[test]
    fn names_expected_integer() {
        for src in ["", "x"] {
            let errs = parse(src).unwrap_err();
            let expected: Vec<String> = errs[0].expected().map(ToString::to_string).collect();
            assert_eq!(expected, ["integer"], "Failed for {src}");
        }
    }
}
