use clap::CommandFactory;
use clap_complete::{Shell, generate};

use crate::cli::Cli;

pub fn handle(shell: Shell) {
    let mut command = Cli::command();
    generate(shell, &mut command, "cleanse", &mut std::io::stdout());
}
