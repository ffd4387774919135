//! Command registry
//!
//! Hosts register commands by id and invoke them against a [`Workspace`],
//! the state the host hands over for one invocation (active buffer, active
//! file). Commands never keep a reference to host state between calls.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use super::builtin;
use crate::storage::{Buffer, SourceError, WriteMode};

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Command already registered: {0}")]
    DuplicateCommand(String),

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Command '{id}' failed")]
    Failed {
        id: String,
        #[source]
        source: SourceError,
    },
}

/// Host state handed to a command
#[derive(Debug, Default)]
pub struct Workspace {
    /// Active editable document, if any
    pub buffer: Option<Buffer>,

    /// Active file on disk, if any
    pub file: Option<PathBuf>,

    /// When file commands write their result back
    pub write_mode: WriteMode,
}

impl Workspace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_buffer(mut self, buffer: Buffer) -> Self {
        self.buffer = Some(buffer);
        self
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }

    pub fn with_write_mode(mut self, mode: WriteMode) -> Self {
        self.write_mode = mode;
        self
    }
}

/// Non-fatal message for the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
}

impl Notice {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// What a command did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The command ran against `target` and removed `removed` lines
    Applied { target: String, removed: usize },

    /// Nothing to act on; nothing was modified
    Skipped { notice: Notice },
}

impl Outcome {
    pub fn skipped(message: impl Into<String>) -> Self {
        Outcome::Skipped {
            notice: Notice::new(message),
        }
    }

    /// Number of removed lines (zero when skipped)
    pub fn removed(&self) -> usize {
        match self {
            Outcome::Applied { removed, .. } => *removed,
            Outcome::Skipped { .. } => 0,
        }
    }
}

/// Command callback
pub type Handler = Box<dyn Fn(&mut Workspace) -> Result<Outcome, SourceError> + Send + Sync>;

/// A registered command
pub struct Command {
    /// Stable identifier used to invoke the command
    pub id: String,

    /// Human-readable name
    pub name: String,

    handler: Handler,
}

impl Command {
    pub fn new<F>(id: impl Into<String>, name: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&mut Workspace) -> Result<Outcome, SourceError> + Send + Sync + 'static,
    {
        Self {
            id: id.into(),
            name: name.into(),
            handler: Box::new(handler),
        }
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("id", &self.id)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Commands by id
#[derive(Debug, Default)]
pub struct CommandRegistry {
    commands: BTreeMap<String, Command>,
}

impl CommandRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the built-in commands
    pub fn with_builtins() -> Self {
        let commands = builtin::commands()
            .into_iter()
            .map(|command| (command.id.clone(), command))
            .collect();
        Self { commands }
    }

    /// Registers a command, rejecting duplicate ids
    pub fn register(&mut self, command: Command) -> Result<(), RegistryError> {
        if self.commands.contains_key(&command.id) {
            return Err(RegistryError::DuplicateCommand(command.id));
        }
        self.commands.insert(command.id.clone(), command);
        Ok(())
    }

    /// Removes a command, returning it if it was registered
    pub fn unregister(&mut self, id: &str) -> Option<Command> {
        self.commands.remove(id)
    }

    /// Looks up a command
    pub fn get(&self, id: &str) -> Option<&Command> {
        self.commands.get(id)
    }

    /// Returns all commands sorted by id
    pub fn commands(&self) -> impl Iterator<Item = &Command> {
        self.commands.values()
    }

    /// Runs a command against the workspace
    pub fn invoke(&self, id: &str, workspace: &mut Workspace) -> Result<Outcome, RegistryError> {
        let command = self
            .get(id)
            .ok_or_else(|| RegistryError::UnknownCommand(id.to_string()))?;

        (command.handler)(workspace).map_err(|source| RegistryError::Failed {
            id: id.to_string(),
            source,
        })
    }
}
