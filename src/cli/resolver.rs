// src/cli/resolver.rs

//! Flat command names for the leaves of the menu tree, so that a leaf can be
//! run in one shot (`vocab add cat chat`) without walking the menu.

use crate::cli::builder::ROOT_ID;
use crate::cli::error::MenuError;
use crate::cli::node::{ExecutionContext, MenuNode, RunMode};
use crate::constants::PATH_SEPARATOR;
use crate::core::arg_parser::{self, ArgValue, ParsedCommand, ValueMap};
use std::collections::{BTreeMap, HashMap};

/// External names for node ids that don't read well on a command line.
/// Ids missing here are used lowercased.
static COMMAND_ALIASES: &[(&str, &str)] = &[
    ("addWord", "add"),
    ("listWords", "list"),
    ("randomWords", "random"),
    ("searchWord", "search"),
    ("removeWord", "remove"),
    ("createSection", "create"),
    ("listSections", "sections"),
    ("deleteSection", "delete"),
    ("switchFile", "switch"),
    ("fileInfo", "info"),
    ("rollbackFile", "rollback"),
];

#[derive(Debug, Clone, Copy)]
enum Slot {
    Text(&'static str),
    /// Only integer tokens fill this slot; any other token is skipped. The
    /// slot stays open, so the last integer wins.
    Int(&'static str),
}

/// Argument names that bare tokens fill, in order, for each command.
fn positional_slots(command: &str) -> &'static [Slot] {
    match command {
        "add" => &[
            Slot::Text("word"),
            Slot::Text("translation"),
            Slot::Text("phrase"),
        ],
        "random" => &[Slot::Int("count")],
        "search" => &[Slot::Text("keyword")],
        "remove" => &[Slot::Text("word")],
        "create" | "delete" => &[Slot::Text("name")],
        "switch" => &[Slot::Text("path")],
        _ => &[],
    }
}

/// Maps a node id to its external command name.
pub fn command_name_for(id: &str) -> String {
    COMMAND_ALIASES
        .iter()
        .find(|(node_id, _)| *node_id == id)
        .map_or_else(|| id.to_lowercase(), |(_, name)| (*name).to_string())
}

/// Indexes a validated tree by external command name and by path.
pub struct CommandPathResolver<'t, E> {
    root: &'t MenuNode<E>,
    path_mapping: BTreeMap<String, Vec<String>>,
    node_mapping: HashMap<String, &'t MenuNode<E>>,
}

impl<'t, E> CommandPathResolver<'t, E> {
    pub fn new(root: &'t MenuNode<E>) -> Self {
        let mut resolver = Self {
            root,
            path_mapping: BTreeMap::new(),
            node_mapping: HashMap::new(),
        };
        resolver.index(root, &[]);
        log::debug!(
            "Indexed {} node(s), {} command(s)",
            resolver.node_mapping.len(),
            resolver.path_mapping.len()
        );
        resolver
    }

    fn index(&mut self, node: &'t MenuNode<E>, parent_path: &[String]) {
        let mut current_path = parent_path.to_vec();
        current_path.push(node.id().to_string());

        self.node_mapping
            .insert(current_path.join(PATH_SEPARATOR), node);

        if node.is_leaf() && node.id() != ROOT_ID {
            let name = command_name_for(node.id());
            if let Some(existing) = self.path_mapping.get(&name) {
                log::warn!(
                    "Command name '{}' of '{}' is already used by '{}'; keeping the first.",
                    name,
                    current_path.join(PATH_SEPARATOR),
                    existing.join(PATH_SEPARATOR)
                );
            } else {
                self.path_mapping.insert(name, current_path.clone());
            }
        }

        for child in node.children() {
            self.index(child, &current_path);
        }
    }

    pub fn root(&self) -> &'t MenuNode<E> {
        self.root
    }

    /// All command names with the node-id path they resolve to, sorted by name.
    pub fn list_commands(&self) -> Vec<(String, Vec<String>)> {
        self.path_mapping
            .iter()
            .map(|(name, path)| (name.clone(), path.clone()))
            .collect()
    }

    /// Finds the node a command name points to, with its path.
    pub fn resolve(&self, command: &str) -> Result<(&'t MenuNode<E>, Vec<String>), MenuError> {
        let path = self
            .path_mapping
            .get(command)
            .ok_or_else(|| MenuError::UnknownCommand(command.to_string()))?;
        let joined = path.join(PATH_SEPARATOR);
        let node = self
            .node_mapping
            .get(&joined)
            .copied()
            .ok_or_else(|| MenuError::NodeNotFound {
                command: command.to_string(),
                path: joined,
            })?;
        Ok((node, path.clone()))
    }

    /// Runs one command line against the tree. `args[0]` is the command name.
    /// The handler's result is returned unchanged.
    pub fn execute_command(&self, args: &[String], env: &mut E) -> anyhow::Result<()> {
        let parsed = arg_parser::parse_command_line(args).ok_or(MenuError::NoCommand)?;
        let (node, path) = self.resolve(&parsed.name)?;
        let node_args = build_args(parsed);

        log::debug!(
            "Executing '{}' with args {:?}",
            path.join(PATH_SEPARATOR),
            node_args
        );

        let mut session = ValueMap::new();
        let mut ctx =
            ExecutionContext::new(node, path, &mut session, node_args, RunMode::Command, env);
        node.execute(&mut ctx)
    }
}

/// Merges flags and positional tokens into one argument map. A flag given
/// explicitly wins over the positional slot of the same name.
fn build_args(parsed: ParsedCommand) -> ValueMap {
    let ParsedCommand {
        name,
        mut named,
        positional,
    } = parsed;

    let mut filled = ValueMap::new();
    let mut slots = positional_slots(&name).iter();
    let mut pending = slots.next();
    for token in positional {
        match pending {
            None => break,
            Some(Slot::Text(key)) => {
                filled.insert((*key).to_string(), ArgValue::Text(token));
                pending = slots.next();
            }
            Some(Slot::Int(key)) => {
                if let Ok(n) = token.parse::<i64>() {
                    filled.insert((*key).to_string(), ArgValue::Int(n));
                }
            }
        }
    }
    for (key, value) in filled {
        named.entry(key).or_insert(value);
    }
    named
}
