//! clear-todos - Remove completed checklist items from markdown notes

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = clear_todos::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
