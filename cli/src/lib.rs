// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Command-line interface of rrulekit, installed as `rrk`.

mod cli;
mod cmd_compare;
mod cmd_describe;
mod cmd_format;
mod cmd_generate_completion;
mod cmd_parse;
mod cmd_presets;
mod config;
mod util;

pub use crate::cli::{Cli, Commands, run};
pub use crate::config::Config;
