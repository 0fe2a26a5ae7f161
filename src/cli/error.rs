// src/cli/error.rs

use thiserror::Error;

/// Errors raised by the menu tree, the command resolver and the interactive
/// engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MenuError {
    /// Two siblings share a command key. Fatal at startup.
    #[error(
        "Duplicate command '{command}' under '{parent}': claimed by both '{first}' and '{second}'."
    )]
    DuplicateCommand {
        command: String,
        parent: String,
        first: String,
        second: String,
    },
    #[error("No command provided.")]
    NoCommand,
    #[error("Unknown command: '{0}'. Run with --commands to list them.")]
    UnknownCommand(String),
    /// The command table points at a path that has no node.
    #[error("Command '{command}' maps to '{path}', but no node exists there.")]
    NodeNotFound { command: String, path: String },
    #[error("Already at the main menu, cannot go back.")]
    AlreadyAtRoot,
    #[error("Invalid option: '{0}'.")]
    InvalidOption(String),
    /// A handler asks the engine to return to the parent menu without
    /// reporting anything.
    #[error("Back to previous menu.")]
    Back,
    /// Input ended in the middle of a multi-step entry.
    #[error("Input closed, entry cancelled.")]
    Aborted,
}
