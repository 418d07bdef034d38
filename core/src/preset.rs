// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt::{self, Display};
use std::num::NonZeroU32;

use crate::compare::equivalent;
use crate::model::{Frequency, Rule, Weekday};

const FIFTEEN: NonZeroU32 = match NonZeroU32::new(15) {
    Some(n) => n,
    None => NonZeroU32::MIN,
};

/// Commonly used rules, offered as shortcuts by editors.
///
/// `EveryHour` and `Every15Minutes` serialize fine but their text is
/// rejected by the parser, which only accepts daily and coarser rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Preset {
    /// `FREQ=DAILY`
    EveryDay,
    /// `FREQ=WEEKLY;BYDAY=MO,TU,WE,TH,FR`
    EveryWeekday,
    /// `FREQ=WEEKLY;BYDAY=SU,SA`
    EveryWeekend,
    /// `FREQ=HOURLY`
    EveryHour,
    /// `FREQ=MINUTELY;INTERVAL=15`
    Every15Minutes,
}

impl Preset {
    /// All presets, in menu order.
    pub const ALL: [Preset; 5] = [
        Preset::EveryDay,
        Preset::EveryWeekday,
        Preset::EveryWeekend,
        Preset::EveryHour,
        Preset::Every15Minutes,
    ];

    /// The rule of the preset.
    #[must_use]
    pub fn rule(self) -> Rule {
        match self {
            Preset::EveryDay => Rule::new(Frequency::Daily),
            Preset::EveryWeekday => Rule::new(Frequency::Weekly).with_weekdays(Weekday::WEEKDAYS),
            Preset::EveryWeekend => Rule::new(Frequency::Weekly).with_weekdays(Weekday::WEEKEND),
            Preset::EveryHour => Rule::new(Frequency::Hourly),
            Preset::Every15Minutes => Rule::every(Frequency::Minutely, FIFTEEN),
        }
    }

    /// Human readable name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Preset::EveryDay => "Every Day",
            Preset::EveryWeekday => "Every Weekday",
            Preset::EveryWeekend => "Every Weekend",
            Preset::EveryHour => "Every Hour",
            Preset::Every15Minutes => "Every 15 Minutes",
        }
    }

    /// The first preset whose rule is [`equivalent`] to `text`.
    ///
    /// ```
    /// # use rrulekit_core::Preset;
    /// assert_eq!(
    ///     Preset::matching("RRULE:BYDAY=SA,SU;FREQ=WEEKLY"),
    ///     Some(Preset::EveryWeekend)
    /// );
    /// assert_eq!(Preset::matching("FREQ=WEEKLY;BYDAY=SA"), None);
    /// ```
    #[must_use]
    pub fn matching(text: &str) -> Option<Preset> {
        Self::ALL
            .into_iter()
            .find(|preset| equivalent(&preset.rule().to_string(), text))
    }
}

impl Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn lists_every_preset() {
        assert_eq!(Preset::ALL.to_vec(), Preset::iter().collect::<Vec<_>>());
    }

    #[test]
    fn serializes_presets() {
        let expected = [
            "RRULE:FREQ=DAILY",
            "RRULE:FREQ=WEEKLY;BYDAY=MO,TU,WE,TH,FR",
            "RRULE:FREQ=WEEKLY;BYDAY=SU,SA",
            "RRULE:FREQ=HOURLY",
            "RRULE:FREQ=MINUTELY;INTERVAL=15",
        ];
        for (preset, expected) in Preset::ALL.into_iter().zip(expected) {
            assert_eq!(preset.rule().to_string(), expected, "Failed for {preset}");
        }
    }

    #[test]
    fn matches_presets() {
        let cases = [
            ("freq=daily", Some(Preset::EveryDay)),
            ("FREQ=WEEKLY;BYDAY=FR,TH,WE,TU,MO", Some(Preset::EveryWeekday)),
            ("INTERVAL=15;FREQ=MINUTELY", Some(Preset::Every15Minutes)),
            ("RRULE:FREQ=HOURLY", Some(Preset::EveryHour)),
            ("FREQ=DAILY;INTERVAL=2", None),
            ("FREQ=DAILY;COUNT=3", None),
        ];
        for (text, expected) in cases {
            assert_eq!(Preset::matching(text), expected, "Failed for {text}");
        }
    }

    #[test]
    fn names_presets() {
        assert_eq!(Preset::Every15Minutes.to_string(), "Every 15 Minutes");
        assert_eq!(Preset::EveryWeekday.name(), "Every Weekday");
    }
}
