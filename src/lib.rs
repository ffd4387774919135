//! clear-todos - Remove completed checklist items from markdown notes
//!
//! The core is a single pure function, [`clear`], that deletes every line
//! starting (after optional tab indentation) with `- [x]`. Hosts read text
//! from a selection, a buffer or a file, call it through a registered
//! command, and write the result back to the same place.

pub mod domain;
pub mod storage;
pub mod plugin;
pub mod cli;

pub use domain::{clear, clear_counted, is_completed_item, Cleared};
