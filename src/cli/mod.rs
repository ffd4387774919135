//! # Command-Line Interface
//!
//! The CLI is one host for the command registry.
//!
//! ## Commands
//!
//! | Command | Purpose |
//! |---------|---------|
//! | `clear [FILES...]` | Remove completed items in place (stdin to stdout without files) |
//! | `clear --lines 3:10 FILE` | Only clear within a line range |
//! | `check [FILES...]` | Count completed items, fail if any |
//! | `commands` | List registered commands |
//! | `config` | Show effective configuration |
//!
//! ## Output Formats
//!
//! All commands support `--format` flag:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for debug output on stderr:
//! ```bash
//! clear-todos --verbose clear notes.md
//! ```
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod clear_cmd;
mod output;

pub use app::{run, Cli, Commands};
pub use clear_cmd::{ClearOptions, LineRange};
pub use output::{Output, OutputFormat};
