// src/cli/workspace.rs

use crate::cli::error::MenuError;
use crate::core::section_store::JsonSectionStore;
use crate::models::AppConfig;
use crate::state::AppState;
use crate::system::console::Console;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io;
use std::path::{Path, PathBuf};

/// Everything handlers work with during one run of the program.
pub struct Workspace {
    pub config: AppConfig,
    pub store: JsonSectionStore,
    pub state: AppState,
    pub rng: StdRng,
    console: Box<dyn Console>,
}

impl Workspace {
    pub fn new(
        config: AppConfig,
        data_file: PathBuf,
        state: AppState,
        console: Box<dyn Console>,
    ) -> Self {
        Self {
            config,
            store: JsonSectionStore::new(data_file),
            state,
            rng: StdRng::from_entropy(),
            console,
        }
    }

    /// Path of the data file currently backing the store.
    pub fn data_file(&self) -> &Path {
        self.store.path()
    }

    /// Points the store at another data file.
    pub fn use_data_file(&mut self, path: PathBuf) {
        log::info!("Switching data file to '{}'", path.display());
        self.store = JsonSectionStore::new(path);
    }

    /// Reads one trimmed line. Closed input becomes [`MenuError::Aborted`].
    pub fn prompt(&mut self, prompt: &str) -> anyhow::Result<String> {
        match self.console.read_line(prompt)? {
            Some(line) => Ok(line.trim().to_string()),
            None => Err(MenuError::Aborted.into()),
        }
    }

    /// Yes/no question. Closed input becomes [`MenuError::Aborted`].
    pub fn ask(&mut self, prompt: &str, default: bool) -> anyhow::Result<bool> {
        self.console
            .confirm(prompt, default)?
            .ok_or_else(|| MenuError::Aborted.into())
    }
}

impl Console for Workspace {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.console.read_line(prompt)
    }

    fn write_line(&mut self, text: &str) {
        self.console.write_line(text);
    }

    fn confirm(&mut self, prompt: &str, default: bool) -> io::Result<Option<bool>> {
        self.console.confirm(prompt, default)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::cli::builder::build_default_tree;
    use crate::cli::engine::InteractiveEngine;
    use crate::cli::resolver::CommandPathResolver;
    use crate::core::arg_parser::ValueMap;
    use crate::models::SessionState;
    use crate::system::console::ScriptedConsole;
    use std::cell::RefCell;
    use std::rc::Rc;
    use tempfile::TempDir;

    pub(crate) type Output = Rc<RefCell<Vec<String>>>;

    /// A workspace over a fresh temp directory with scripted input.
    /// The `TempDir` must be kept alive for the duration of the test.
    pub(crate) fn workspace(inputs: &[&str]) -> (TempDir, Workspace, Output) {
        colored::control::set_override(false);
        let dir = tempfile::tempdir().unwrap();
        let console = ScriptedConsole::new(inputs);
        let output = console.output();
        let state = AppState::new(SessionState::default(), dir.path().join("state.bin"));
        let mut workspace = Workspace::new(
            AppConfig::default(),
            dir.path().join("sections.json"),
            state,
            Box::new(console),
        );
        workspace.rng = StdRng::seed_from_u64(42);
        (dir, workspace, output)
    }

    pub(crate) fn printed(output: &Output) -> String {
        output.borrow().join("\n")
    }

    /// Runs one command line against the default tree.
    pub(crate) fn command(ws: &mut Workspace, tokens: &[&str]) -> anyhow::Result<()> {
        let tree = build_default_tree();
        let resolver = CommandPathResolver::new(&tree);
        let args: Vec<String> = tokens.iter().map(|s| s.to_string()).collect();
        resolver.execute_command(&args, ws)
    }

    /// Runs the interactive menu over the scripted input and returns the
    /// session it ended with.
    pub(crate) fn interactive(ws: &mut Workspace) -> ValueMap {
        let tree = build_default_tree();
        let mut engine = InteractiveEngine::new(&tree);
        engine.run(ws).unwrap();
        engine.session().clone()
    }
}
