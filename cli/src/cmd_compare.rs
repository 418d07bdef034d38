// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{ArgMatches, Command, arg};
use colored::Colorize;
use rrulekit_core::{equivalent, equivalent_normalized};

#[derive(Debug, Clone)]
pub struct CmdCompare {
    pub left: String,
    pub right: String,
    pub normalize: bool,
}

impl CmdCompare {
    pub const NAME: &str = "compare";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Check whether two recurrence rules are equivalent")
            .arg(arg!(left: <LEFT> "The first rule"))
            .arg(arg!(right: <RIGHT> "The second rule"))
            .arg(arg!(-n --normalize "Compare the canonical forms of both rules"))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        let (left, right) = match (
            matches.get_one::<String>("left"),
            matches.get_one::<String>("right"),
        ) {
            (Some(left), Some(right)) => (left.clone(), right.clone()),
            _ => unreachable!("left and right are required"),
        };
        Self {
            left,
            right,
            normalize: matches.get_flag("normalize"),
        }
    }

    pub fn run(self) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "comparing rules...");
        if self.is_equivalent() {
            println!("{}", "equivalent".green());
        } else {
            println!("{}", "different".yellow());
        }
        Ok(())
    }

    fn is_equivalent(&self) -> bool {
        if self.normalize {
            equivalent_normalized(&self.left, &self.right)
        } else {
            equivalent(&self.left, &self.right)
        }
    }
}
