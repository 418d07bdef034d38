// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Validate, parse, serialize and compare iCalendar recurrence rules
//! (RFC 5545 `RRULE`).
//!
//! ```
//! use rrulekit_core::{Preset, describe, parse, serialize};
//!
//! let rule = parse("rrule:byday=fr,mo,tu,we,th;freq=weekly").unwrap();
//! assert_eq!(serialize(&rule), "RRULE:FREQ=WEEKLY;BYDAY=MO,TU,WE,TH,FR");
//! assert_eq!(describe(&rule), "every weekday");
//! assert_eq!(Preset::matching(&serialize(&rule)), Some(Preset::EveryWeekday));
//! ```

#![warn(
    trivial_casts,
    trivial_numeric_casts,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications,
    clippy::dbg_macro,
    clippy::indexing_slicing,
    clippy::pedantic
)]
// Allow certain clippy lints that are too restrictive for this crate
#![allow(
    clippy::option_option,
    clippy::similar_names,
    clippy::single_match_else,
    clippy::match_bool
)]

mod compare;
mod describe;
mod error;
mod formatter;
pub mod keyword;
mod model;
mod parser;
mod preset;
mod value;

pub use crate::compare::{equivalent, equivalent_normalized};
pub use crate::describe::describe;
pub use crate::error::{ErrorKind, Field, ParseError, RuleError};
pub use crate::formatter::{date_start_line, serialize, serialize_full, write_rule};
pub use crate::model::{DayOfWeek, End, Frequency, Rule, RuleParts, Weekday};
pub use crate::parser::{ParseOptions, parse, parse_with, split_clauses};
pub use crate::preset::Preset;
