//! `crucible`: run one of the puzzle solvers on an input file.

use std::io::IsTerminal;
use std::process::ExitCode;

use clap::Parser;
use crucible_cli::{Cli, init_logging, run};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let color = std::io::stdout().is_terminal();
    let mut out = std::io::stdout().lock();
    match run(&cli, &mut out, color) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("crucible: {err}");
            ExitCode::FAILURE
        }
    }
}
