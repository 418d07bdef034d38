// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt::{self, Display};

use crate::keyword::{
    KW_RRULE_FREQ_DAILY, KW_RRULE_FREQ_HOURLY, KW_RRULE_FREQ_MINUTELY, KW_RRULE_FREQ_MONTHLY,
    KW_RRULE_FREQ_WEEKLY, KW_RRULE_FREQ_YEARLY,
};

/// How often a rule repeats; decides which other fields are meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, strum::EnumIter)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[expect(missing_docs)]
pub enum Frequency {
    Minutely,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    /// The RRULE keyword, e.g. `WEEKLY`.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Frequency::Minutely => KW_RRULE_FREQ_MINUTELY,
            Frequency::Hourly => KW_RRULE_FREQ_HOURLY,
            Frequency::Daily => KW_RRULE_FREQ_DAILY,
            Frequency::Weekly => KW_RRULE_FREQ_WEEKLY,
            Frequency::Monthly => KW_RRULE_FREQ_MONTHLY,
            Frequency::Yearly => KW_RRULE_FREQ_YEARLY,
        }
    }

    /// English unit of the period, e.g. `week`.
    #[must_use]
    pub const fn noun(self) -> &'static str {
        match self {
            Frequency::Minutely => "minute",
            Frequency::Hourly => "hour",
            Frequency::Daily => "day",
            Frequency::Weekly => "week",
            Frequency::Monthly => "month",
            Frequency::Yearly => "year",
        }
    }

    /// Plural of [`Frequency::noun`].
    #[must_use]
    pub const fn plural(self) -> &'static str {
        match self {
            Frequency::Minutely => "minutes",
            Frequency::Hourly => "hours",
            Frequency::Daily => "days",
            Frequency::Weekly => "weeks",
            Frequency::Monthly => "months",
            Frequency::Yearly => "years",
        }
    }
}

impl Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}
