//! Completed checklist item removal
//!
//! A completed item is a line that starts, after optional tab indentation,
//! with `- [x]`. Removing it also removes exactly one line terminator, so the
//! document never gains a blank line where the item used to be:
//!
//! - a line followed by a terminator goes together with that terminator
//! - the final line of a text without a trailing terminator goes together
//!   with the terminator before it
//!
//! `\r\n` endings are handled the same way as `\n`.

use std::sync::LazyLock;

use regex::Regex;

/// Checklist marker in its done state
pub const DONE_MARKER: &str = "- [x]";

/// A whole completed line, plus its trailing `\n` when it has one
static DONE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\t*- \[x\][^\n]*(?:\n|\z)").expect("completed item pattern must compile")
});

/// Result of a counted clear
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cleared {
    /// Text with completed lines removed
    pub text: String,

    /// Number of lines removed
    pub removed: usize,
}

impl Cleared {
    /// Returns true if at least one line was removed
    pub fn is_changed(&self) -> bool {
        self.removed > 0
    }
}

/// Removes every completed checklist item line from `text`
///
/// Total over all inputs and idempotent: `clear(&clear(s)) == clear(s)`.
pub fn clear(text: &str) -> String {
    clear_counted(text).text
}

/// Same as [`clear`], also reporting how many lines were removed
pub fn clear_counted(text: &str) -> Cleared {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    let mut removed = 0;

    for m in DONE_LINE.find_iter(text) {
        out.push_str(&text[last..m.start()]);

        // Last line without its own terminator takes the previous one along
        if !m.as_str().ends_with('\n') {
            pop_terminator(&mut out);
        }

        last = m.end();
        removed += 1;
    }

    out.push_str(&text[last..]);
    Cleared { text: out, removed }
}

/// Counts completed checklist item lines without building a new text
pub fn count_completed(text: &str) -> usize {
    DONE_LINE.find_iter(text).count()
}

/// Returns true if a single line (without its terminator) is a completed item
pub fn is_completed_item(line: &str) -> bool {
    line.trim_start_matches('\t').starts_with(DONE_MARKER)
}

/// Drops one trailing `\n` or `\r\n`
fn pop_terminator(out: &mut String) {
    if out.ends_with('\n') {
        out.pop();
        if out.ends_with('\r') {
            out.pop();
        }
    }
}
