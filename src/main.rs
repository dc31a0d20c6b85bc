use cardex::cli::Cli;
use std::process::ExitCode;

fn main() -> ExitCode {
    Cli::run()
}
