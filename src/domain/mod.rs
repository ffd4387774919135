//! Domain logic for clear-todos
//!
//! Contains the text transformation without any I/O concerns.

mod clearer;

pub use clearer::{clear, clear_counted, count_completed, is_completed_item, Cleared, DONE_MARKER};
