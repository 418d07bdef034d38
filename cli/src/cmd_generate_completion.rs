// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, io};

use clap::{ArgMatches, Command, ValueEnum, arg, value_parser};
use clap_complete::generate;

use crate::Cli;

#[derive(Debug, Clone, Copy)]
pub struct CmdGenerateCompletion {
    pub shell: Shell,
}

impl CmdGenerateCompletion {
    pub const NAME: &str = "generate-completion";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Print the completion script of rrk for a shell")
            .hide(true)
            .arg(arg!(shell: <SHELL> "Target shell").value_parser(value_parser!(Shell)))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        match matches.get_one::<Shell>("shell") {
            Some(shell) => Self { shell: *shell },
            None => unreachable!("shell is required"),
        }
    }

    pub fn run(self) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "generating shell completion...");
        self.generate(&mut io::stdout());
        Ok(())
    }

    /// Write the completion script of the whole command tree into `buf`.
    pub fn generate(self, buf: &mut impl io::Write) {
        use clap_complete::Shell as Target;

        let mut cmd = Cli::command();
        let bin = cmd.get_name().to_owned();
        let target = match self.shell {
            Shell::Bash => Target::Bash,
            Shell::Elvish => Target::Elvish,
            Shell::Fish => Target::Fish,
            Shell::PowerShell => Target::PowerShell,
            Shell::Zsh => Target::Zsh,
            Shell::Nushell => {
                return generate(clap_complete_nushell::Nushell {}, &mut cmd, bin, buf);
            }
        };
        generate(target, &mut cmd, bin, buf);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    Bash,
    Elvish,
    Fish,
    Nushell,
    #[clap(name = "powershell")]
    #[allow(clippy::enum_variant_names)]
    PowerShell,
    Zsh,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(shell: &str) -> CmdGenerateCompletion {
        let matches = Cli::command()
            .try_get_matches_from(["rrk", CmdGenerateCompletion::NAME, shell])
            .unwrap_or_else(|e| panic!("Failed to parse for shell '{shell}': {e}"));
        let sub_matches = matches
            .subcommand_matches(CmdGenerateCompletion::NAME)
            .unwrap();
        CmdGenerateCompletion::from(sub_matches)
    }

    #[test]
    fn parses_shell_variants() {
        let cases = [
            ("bash", Shell::Bash),
            ("elvish", Shell::Elvish),
            ("fish", Shell::Fish),
            ("nushell", Shell::Nushell),
            ("powershell", Shell::PowerShell),
            ("zsh", Shell::Zsh),
        ];
        for (src, expected) in cases {
            assert_eq!(parse(src).shell, expected, "Failed for {src}");
        }
    }

    #[test]
    fn completes_subcommands() {
        for shell in Shell::value_variants() {
            let mut output = vec![];
            CmdGenerateCompletion { shell: *shell }.generate(&mut output);
            let script = String::from_utf8(output).unwrap();
            assert!(script.contains("rrk"), "Missing binary name for {shell:?}");
            assert!(script.contains("describe"), "Missing subcommand for {shell:?}");
        }
    }

    #[test]
    fn rejects_unknown_shell() {
        let result = Cli::command().try_get_matches_from(["rrk", CmdGenerateCompletion::NAME, "tcsh"]);
        assert!(result.is_err());
    }
}
