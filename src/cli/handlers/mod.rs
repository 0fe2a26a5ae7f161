// src/cli/handlers/mod.rs

// The actions behind each menu node.

pub mod commons;
pub mod files;
pub mod sections;
pub mod words;

use crate::cli::node::ExecutionContext;
use crate::cli::workspace::Workspace;
use anyhow::Result;

/// Execution context as seen by the handlers.
pub type Context<'a> = ExecutionContext<'a, Workspace>;

/// Every action the menu can run. Each node of the default tree carries one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    EnterSections,
    CreateSection,
    SelectSection,
    ListSections,
    DeleteSection,
    AddWord,
    ListWords,
    RandomWords,
    SearchWord,
    RemoveWord,
    EnterFiles,
    SwitchFile,
    FileInfo,
    RollbackFile,
}

impl Operation {
    pub fn run(self, ctx: &mut Context<'_>) -> Result<()> {
        match self {
            Self::EnterSections => sections::enter(ctx),
            Self::CreateSection => sections::create(ctx),
            Self::SelectSection => sections::select(ctx),
            Self::ListSections => sections::list(ctx),
            Self::DeleteSection => sections::delete(ctx),
            Self::AddWord => words::add(ctx),
            Self::ListWords => words::list(ctx),
            Self::RandomWords => words::random(ctx),
            Self::SearchWord => words::search(ctx),
            Self::RemoveWord => words::remove(ctx),
            Self::EnterFiles => files::enter(ctx),
            Self::SwitchFile => files::switch(ctx),
            Self::FileInfo => files::info(ctx),
            Self::RollbackFile => files::rollback(ctx),
        }
    }
}
