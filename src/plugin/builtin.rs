//! Built-in commands
//!
//! - `clear-todos`: clears the selection of the active buffer, or the whole
//!   buffer when nothing is selected
//! - `clear-todos-file`: clears the active file on disk

use super::registry::{Command, Outcome, Workspace};
use crate::storage::{
    clear_source, DocumentSource, FileSource, SelectionSource, SourceError, TextSource, WriteMode,
};

pub const CLEAR_TODOS: &str = "clear-todos";
pub const CLEAR_TODOS_FILE: &str = "clear-todos-file";

/// Returns the built-in commands
pub fn commands() -> Vec<Command> {
    vec![
        Command::new(CLEAR_TODOS, "Clear in selection or current file", clear_in_buffer),
        Command::new(CLEAR_TODOS_FILE, "Clear in current file on disk", clear_in_file),
    ]
}

fn clear_in_buffer(workspace: &mut Workspace) -> Result<Outcome, SourceError> {
    let Some(buffer) = workspace.buffer.as_mut() else {
        return Ok(Outcome::skipped("No active document"));
    };

    if buffer.selection().is_some() {
        run(&mut SelectionSource::new(buffer), WriteMode::IfChanged)
    } else {
        run(&mut DocumentSource::new(buffer), WriteMode::IfChanged)
    }
}

fn clear_in_file(workspace: &mut Workspace) -> Result<Outcome, SourceError> {
    let Some(path) = workspace.file.as_ref() else {
        return Ok(Outcome::skipped("No active file"));
    };

    run(&mut FileSource::new(path), workspace.write_mode)
}

fn run(source: &mut dyn TextSource, mode: WriteMode) -> Result<Outcome, SourceError> {
    let target = source.label();
    let cleared = clear_source(source, mode)?;

    Ok(Outcome::Applied {
        target,
        removed: cleared.removed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugin::CommandRegistry;
    use crate::storage::Buffer;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn clears_whole_buffer_without_selection() {
        let registry = CommandRegistry::with_builtins();
        let mut workspace = Workspace::new().with_buffer(Buffer::new("- [ ] a\n- [x] b\nc"));

        let outcome = registry.invoke(CLEAR_TODOS, &mut workspace).unwrap();

        assert_eq!(
            outcome,
            Outcome::Applied {
                target: "document".to_string(),
                removed: 1
            }
        );
        assert_eq!(workspace.buffer.unwrap().text(), "- [ ] a\nc");
    }

    #[test]
    fn clears_only_the_selection() {
        let registry = CommandRegistry::with_builtins();
        let text = "- [x] a\n- [x] b\n- [x] c\n";
        let buffer = Buffer::with_selection(text, 8..16).unwrap();
        let mut workspace = Workspace::new().with_buffer(buffer);

        let outcome = registry.invoke(CLEAR_TODOS, &mut workspace).unwrap();

        assert_eq!(outcome.removed(), 1);
        assert_eq!(workspace.buffer.unwrap().text(), "- [x] a\n- [x] c\n");
    }

    #[test]
    fn skips_without_active_document() {
        let registry = CommandRegistry::with_builtins();
        let mut workspace = Workspace::new();

        let outcome = registry.invoke(CLEAR_TODOS, &mut workspace).unwrap();

        assert_eq!(outcome, Outcome::skipped("No active document"));
        assert!(workspace.buffer.is_none());
    }

    #[test]
    fn clears_active_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("todo.md");
        fs::write(&path, "- [x] shipped\n- [ ] next\n").unwrap();

        let registry = CommandRegistry::with_builtins();
        let mut workspace = Workspace::new().with_file(&path);

        let outcome = registry.invoke(CLEAR_TODOS_FILE, &mut workspace).unwrap();

        assert_eq!(outcome.removed(), 1);
        assert_eq!(fs::read_to_string(&path).unwrap(), "- [ ] next\n");
    }

    #[test]
    fn dry_run_leaves_file_alone() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("todo.md");
        fs::write(&path, "- [x] shipped\n").unwrap();

        let registry = CommandRegistry::with_builtins();
        let mut workspace = Workspace::new()
            .with_file(&path)
            .with_write_mode(WriteMode::Never);

        let outcome = registry.invoke(CLEAR_TODOS_FILE, &mut workspace).unwrap();

        assert_eq!(outcome.removed(), 1);
        assert_eq!(fs::read_to_string(&path).unwrap(), "- [x] shipped\n");
    }

    #[test]
    fn skips_without_active_file() {
        let registry = CommandRegistry::with_builtins();
        let outcome = registry.invoke(CLEAR_TODOS_FILE, &mut Workspace::new()).unwrap();

        assert_eq!(outcome, Outcome::skipped("No active file"));
    }
}
