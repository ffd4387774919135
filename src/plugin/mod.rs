//! # Command Registry
//!
//! Hosts (the CLI, or an editor embedding this crate) talk to the clearer
//! through registered commands.
//!
//! ## Built-in Commands
//!
//! | Id | Name | Acts on |
//! |----|------|---------|
//! | `clear-todos` | Clear in selection or current file | Buffer selection, else whole buffer |
//! | `clear-todos-file` | Clear in current file on disk | Active file |
//!
//! ## Invocation
//!
//! ```text
//! Host                              Registry
//!  │                                    │
//!  ├── Workspace { buffer, file } ──────►
//!  │                                    ├── read source
//!  │                                    ├── clear
//!  │                                    ├── write back to same source
//!  ◄── Outcome::Applied / Skipped ──────┤
//! ```
//!
//! A missing buffer or file is not an error: the command returns
//! [`Outcome::Skipped`] with a [`Notice`] and touches nothing.

mod builtin;
mod registry;

pub use builtin::{CLEAR_TODOS, CLEAR_TODOS_FILE};
pub use registry::{Command, CommandRegistry, Handler, Notice, Outcome, RegistryError, Workspace};
