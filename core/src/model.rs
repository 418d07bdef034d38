// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Recurrence rule model.
//!
//! Values of these types are valid by construction: the fallible constructors
//! check every range and cross-field constraint before anything is built.

mod end;
mod frequency;
mod rule;
mod weekday;

pub use end::End;
pub use frequency::Frequency;
pub use rule::{Rule, RuleParts};
pub use weekday::{DayOfWeek, Weekday};
