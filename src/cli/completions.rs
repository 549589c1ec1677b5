//! `pwdvault completions` — generate shell completion scripts.
//!
//! Usage:
//!   pwdvault completions bash > ~/.bash_completion.d/pwdvault
//!   pwdvault completions zsh

use std::io::Write;

use clap::CommandFactory;
use clap_complete::{generate, Shell};

use crate::cli::Cli;

/// Write the completion script for `shell` to `out`.
pub fn execute(shell: Shell, out: &mut dyn Write) {
    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, out);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bash_script_mentions_subcommands() {
        let mut buf = Vec::new();
        execute(Shell::Bash, &mut buf);
        let script = String::from_utf8(buf).unwrap();
        assert!(script.contains("pwdvault"));
        assert!(script.contains("update"));
    }

    #[test]
    fn fish_script_is_generated() {
        let mut buf = Vec::new();
        execute(Shell::Fish, &mut buf);
        assert!(!buf.is_empty());
    }
}
