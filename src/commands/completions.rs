//! Shell completion generation
//! Usage: ghup completions <SHELL>

use clap::Command;
use clap_complete::{generate, Shell};
use std::io::{self, Write};

/// Write completions for `cmd` to stdout
pub fn execute(cmd: &mut Command, shell: Shell) {
    write_completions(cmd, shell, &mut io::stdout());
}

pub fn write_completions(cmd: &mut Command, shell: Shell, out: &mut dyn Write) {
    let name = cmd.get_name().to_string();
    generate(shell, cmd, name, out);
}
