// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::num::NonZeroU32;

use jiff::Timestamp;

use crate::error::{Field, RuleError};

/// When a rule stops repeating. A rule without an `End` never ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum End {
    /// Stop after the last occurrence on or before this instant (`UNTIL`).
    AtDate(Timestamp),

    /// Stop after this many occurrences (`COUNT`).
    AfterCount(NonZeroU32),
}

impl End {
    /// End after `count` occurrences.
    ///
    /// # Errors
    /// Returns [`RuleError::InvalidField`] if `count` is zero.
    pub fn count(count: u32) -> Result<Self, RuleError> {
        NonZeroU32::new(count)
            .map(End::AfterCount)
            .ok_or(RuleError::InvalidField {
                field: Field::Count,
                value: 0,
            })
    }

    /// The end instant, if this is an `UNTIL` end.
    #[must_use]
    pub const fn until(self) -> Option<Timestamp> {
        match self {
            End::AtDate(t) => Some(t),
            End::AfterCount(_) => None,
        }
    }

    /// The occurrence count, if this is a `COUNT` end.
    #[must_use]
    pub const fn occurrence_count(self) -> Option<u32> {
        match self {
            End::AtDate(_) => None,
            End::AfterCount(n) => Some(n.get()),
        }
    }
}

impl From<Timestamp> for End {
    fn from(t: Timestamp) -> Self {
        End::AtDate(t)
    }
}

impl From<NonZeroU32> for End {
    fn from(n: NonZeroU32) -> Self {
        End::AfterCount(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_count() {
        assert_eq!(
            End::count(0),
            Err(RuleError::InvalidField {
                field: Field::Count,
                value: 0
            })
        );
        assert_eq!(End::count(3).unwrap().occurrence_count(), Some(3));
        assert_eq!(End::count(3).unwrap().until(), None);
    }

    #[test]
    fn exposes_until_instant() {
        let t = Timestamp::from_second(1_672_531_200).unwrap();
        let end = End::from(t);
        assert_eq!(end.until(), Some(t));
        assert_eq!(end.occurrence_count(), None);
    }
}
