// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use crate::model::{DayOfWeek, Frequency, Rule, Weekday};

/// A short English description of how often the rule repeats.
///
/// Only the frequency and the interval are described, plus the weekday and
/// weekend shortcuts of weekly rules.
///
/// ```
/// # use rrulekit_core::{Frequency, Rule, describe};
/// let rule = Rule::new(Frequency::Monthly).with_interval(3).unwrap();
/// assert_eq!(describe(&rule), "every 3 months");
/// ```
#[must_use]
pub fn describe(rule: &Rule) -> String {
    let frequency = rule.frequency();
    match rule.interval() {
        1 if frequency == Frequency::Weekly && same_days(rule.days_of_the_week(), &Weekday::WEEKDAYS) => {
            "every weekday".to_owned()
        }
        1 if frequency == Frequency::Weekly && same_days(rule.days_of_the_week(), &Weekday::WEEKEND) => {
            "every weekend".to_owned()
        }
        1 => format!("every {}", frequency.noun()),
        n => format!("every {n} {}", frequency.plural()),
    }
}

/// Every occurrence of exactly `expected`, in any order.
fn same_days(days: &[DayOfWeek], expected: &[Weekday]) -> bool {
    days.len() == expected.len()
        && days
            .iter()
            .all(|d| d.week_number() == 0 && expected.contains(&d.day()))
        && expected
            .iter()
            .all(|e| days.iter().any(|d| d.day() == *e))
}
