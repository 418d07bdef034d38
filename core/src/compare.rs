// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Compare RRULE texts.

use crate::keyword::KW_RRULE_UNTIL;
use crate::parser::{parse, split_clauses};

/// Whether two RRULE texts consist of the same clauses, in any order.
///
/// The comparison is textual: clauses are split as the parser does, the
/// comma separated values of each clause are sorted, and the clauses are
/// compared after sorting them too. When both sides carry an `UNTIL` clause, it is
/// dropped from each side, since the same instant may be written in several
/// formats. Omitted defaults are not filled in, so `FREQ=YEARLY` and
/// `FREQ=YEARLY;BYMONTH=1,2,3,4,5,6,7,8,9,10,11,12` differ here; see
/// [`equivalent_normalized`].
///
/// ```
/// # use rrulekit_core::equivalent;
/// assert!(equivalent("RRULE:FREQ=WEEKLY;BYDAY=MO,TH", "rrule:byday=TH,MO;freq=weekly"));
/// assert!(!equivalent("FREQ=WEEKLY;BYDAY=MO,TH", "FREQ=WEEKLY;BYDAY=MO,TU"));
/// ```
#[must_use]
pub fn equivalent(left: &str, right: &str) -> bool {
    let mut left = clauses(left);
    let mut right = clauses(right);

    let is_until = |clause: &String| clause.starts_with(KW_RRULE_UNTIL);
    if left.iter().any(is_until) && right.iter().any(is_until) {
        left.retain(|c| !is_until(c));
        right.retain(|c| !is_until(c));
    }

    left.sort_unstable();
    right.sort_unstable();
    left == right
}

fn clauses(text: &str) -> Vec<String> {
    split_clauses(text)
        .into_iter()
        .map(|clause| match clause.split_once('=') {
            Some((key, value)) if value.contains(',') => {
                let mut values: Vec<&str> = value.split(',').collect();
                values.sort_unstable();
                format!("{key}={}", values.join(","))
            }
            _ => clause,
        })
        .collect()
}

/// Like [`equivalent`], but both sides are first brought into canonical
/// form by parsing and serializing them again.
///
/// Falls back to [`equivalent`] if either side fails to parse.
#[must_use]
pub fn equivalent_normalized(left: &str, right: &str) -> bool {
    match (parse(left), parse(right)) {
        (Ok(l), Ok(r)) => equivalent(&l.to_string(), &r.to_string()),
        (l, r) => {
            tracing::debug!(
                left_ok = l.is_ok(),
                right_ok = r.is_ok(),
                "falling back to textual comparison"
            );
            equivalent(left, right)
        }
    }
}
