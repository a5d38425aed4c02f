//! Roadmap CLI - per-version roadmaps of nested issues

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = roadmap_cli::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
