// src/cli/engine.rs

//! The interactive menu loop.

use crate::cli::error::MenuError;
use crate::cli::node::{ExecutionContext, MenuNode, RunMode};
use crate::core::arg_parser::ValueMap;
use crate::system::console::Console;
use colored::Colorize;

/// What the loop should do after one line of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Walks a menu tree one line of input at a time.
///
/// Branches are entered and stay current, even when their handler fails,
/// unless it returns [`MenuError::Back`] or [`MenuError::Aborted`]. Leaves are
/// run once and the engine returns to their parent straight away, whether the
/// handler failed or not.
pub struct InteractiveEngine<'t, E> {
    current: &'t MenuNode<E>,
    stack: Vec<&'t MenuNode<E>>,
    /// Lives for the whole run and is shared by every execution.
    session: ValueMap,
}

impl<'t, E: Console> InteractiveEngine<'t, E> {
    pub fn new(root: &'t MenuNode<E>) -> Self {
        Self {
            current: root,
            stack: Vec::new(),
            session: ValueMap::new(),
        }
    }

    pub fn current_node(&self) -> &'t MenuNode<E> {
        self.current
    }

    /// How many menus deep the engine is (0 at the root).
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn session(&self) -> &ValueMap {
        &self.session
    }

    /// Runs until the user quits or the input ends.
    pub fn run(&mut self, env: &mut E) -> anyhow::Result<()> {
        loop {
            self.render(env);
            let Some(line) = env.read_line(t!("engine.prompt"))? else {
                env.write_line("");
                env.write_line(t!("engine.goodbye"));
                return Ok(());
            };
            if self.handle_input(&line, env) == Flow::Exit {
                return Ok(());
            }
        }
    }

    /// Prints the current menu.
    pub fn render(&self, env: &mut E) {
        let current = self.current;
        env.write_line("");
        env.write_line(&format!("=== {} ===", current.name()).bold().to_string());

        if current.is_leaf() {
            env.write_line(t!("engine.execution_node"));
        } else {
            for child in current.children() {
                env.write_line(&format!("  {}. {}", child.command().cyan(), child.name()));
            }
        }

        if !self.stack.is_empty() {
            env.write_line(&format!("  {}. {}", "b".dimmed(), t!("engine.hint.back")));
        }
        env.write_line(&format!("  {}. {}", "q".dimmed(), t!("engine.hint.quit")));
    }

    /// Applies one line of input.
    pub fn handle_input(&mut self, input: &str, env: &mut E) -> Flow {
        let input = input.trim();
        let lowered = input.to_lowercase();

        match lowered.as_str() {
            "q" | "quit" | "exit" => {
                env.write_line(t!("engine.goodbye"));
                return Flow::Exit;
            }
            "b" | "back" => {
                if let Err(e) = self.go_back() {
                    env.write_line(&e.to_string().yellow().to_string());
                }
                return Flow::Continue;
            }
            _ => {}
        }

        let current = self.current;
        let Some(child) = current.child(input).or_else(|| current.child(&lowered)) else {
            let err = MenuError::InvalidOption(input.to_string());
            env.write_line(&err.to_string().yellow().to_string());
            return Flow::Continue;
        };

        log::debug!("Entering '{}' from '{}'", child.id(), current.id());
        self.stack.push(current);
        self.current = child;

        let result = self.execute_current(env);
        match result {
            Ok(()) if !child.is_leaf() => {}
            Ok(()) => self.pop_after_execution(),
            Err(e) => {
                report(&e, env);
                // A branch stays current unless its handler asked to leave.
                if child.is_leaf() || leaves_branch(&e) {
                    self.pop_after_execution();
                }
            }
        }
        Flow::Continue
    }

    fn execute_current(&mut self, env: &mut E) -> anyhow::Result<()> {
        let node = self.current;
        let path = self
            .stack
            .iter()
            .map(|n| n.id().to_string())
            .chain(std::iter::once(node.id().to_string()))
            .collect();
        let mut ctx = ExecutionContext::new(
            node,
            path,
            &mut self.session,
            ValueMap::new(),
            RunMode::Interactive,
            env,
        );
        node.execute(&mut ctx)
    }

    fn go_back(&mut self) -> Result<(), MenuError> {
        let parent = self.stack.pop().ok_or(MenuError::AlreadyAtRoot)?;
        log::debug!("Back to '{}'", parent.id());
        self.current = parent;
        Ok(())
    }

    fn pop_after_execution(&mut self) {
        // A node is only entered after its parent was pushed.
        if let Err(e) = self.go_back() {
            log::warn!("Could not return after executing a node: {}", e);
        }
    }
}

fn leaves_branch(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<MenuError>(),
        Some(MenuError::Back | MenuError::Aborted)
    )
}

fn report<C: Console + ?Sized>(err: &anyhow::Error, console: &mut C) {
    match err.downcast_ref::<MenuError>() {
        Some(MenuError::Back) => {}
        Some(MenuError::Aborted) => console.write_line(&err.to_string().yellow().to_string()),
        _ => console.write_line(&format!("{}: {:#}", "Error".red().bold(), err)),
    }
}
