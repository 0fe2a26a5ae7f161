// src/cli/node.rs

//! Menu tree nodes and the context handed to their handlers.

use crate::core::arg_parser::{ArgValue, ValueMap};
use std::fmt;

/// Action attached to a node. `E` is the environment the handlers work on.
pub type Handler<E> = Box<dyn Fn(&mut ExecutionContext<'_, E>) -> anyhow::Result<()>>;

/// How a node is being run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Walked to through the menu. Handlers prompt for what they need.
    Interactive,
    /// Resolved from a one-shot command line. Handlers read `args`.
    Command,
}

/// A named, addressable unit of the menu.
///
/// A node with children is a branch; one without is a leaf. Nodes are wired
/// together with [`mount`](Self::mount) while the tree is built and are not
/// changed afterwards.
pub struct MenuNode<E> {
    id: String,
    name: String,
    command: String,
    children: Vec<MenuNode<E>>,
    handler: Option<Handler<E>>,
}

impl<E> MenuNode<E> {
    pub fn new(id: impl Into<String>, name: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            command: command.into(),
            children: Vec::new(),
            handler: None,
        }
    }

    pub fn with_handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&mut ExecutionContext<'_, E>) -> anyhow::Result<()> + 'static,
    {
        self.handler = Some(Box::new(handler));
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn children(&self) -> &[MenuNode<E>] {
        &self.children
    }

    /// Looks up a direct child by its command key. With duplicate keys the
    /// first mounted child wins; `validate_tree` rejects such trees.
    pub fn child(&self, command: &str) -> Option<&MenuNode<E>> {
        self.children.iter().find(|c| c.command == command)
    }

    /// Adds `child` under this node.
    ///
    /// Mounting a node with the same command and id as an existing child
    /// replaces it. Anything else is appended, even on an occupied command
    /// key, so that validation can report the clash.
    pub fn mount(mut self, child: MenuNode<E>) -> Self {
        match self
            .children
            .iter_mut()
            .find(|c| c.command == child.command && c.id == child.id)
        {
            Some(existing) => *existing = child,
            None => self.children.push(child),
        }
        self
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn has_handler(&self) -> bool {
        self.handler.is_some()
    }

    /// Runs the handler. A node without one succeeds without doing anything.
    pub fn execute(&self, ctx: &mut ExecutionContext<'_, E>) -> anyhow::Result<()> {
        match &self.handler {
            Some(handler) => handler(ctx),
            None => Ok(()),
        }
    }
}

impl<E> fmt::Debug for MenuNode<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuNode")
            .field("id", &self.id)
            .field("command", &self.command)
            .field("children", &self.children)
            .field("has_handler", &self.handler.is_some())
            .finish()
    }
}

/// Everything a handler gets for one execution. Built fresh for each call.
pub struct ExecutionContext<'a, E> {
    pub node: &'a MenuNode<E>,
    /// Node ids from the root down to `node`.
    pub path: Vec<String>,
    /// Values that outlive a single step, such as the selected section.
    pub session: &'a mut ValueMap,
    pub args: ValueMap,
    pub mode: RunMode,
    pub env: &'a mut E,
}

impl<'a, E> ExecutionContext<'a, E> {
    pub fn new(
        node: &'a MenuNode<E>,
        path: Vec<String>,
        session: &'a mut ValueMap,
        args: ValueMap,
        mode: RunMode,
        env: &'a mut E,
    ) -> Self {
        Self {
            node,
            path,
            session,
            args,
            mode,
            env,
        }
    }

    pub fn is_interactive(&self) -> bool {
        self.mode == RunMode::Interactive
    }

    pub fn arg(&self, key: &str) -> Option<&ArgValue> {
        self.args.get(key)
    }

    /// The argument as text, whatever it parsed as. Blank values count as
    /// missing.
    pub fn arg_text(&self, key: &str) -> Option<String> {
        self.args
            .get(key)
            .map(ArgValue::to_text)
            .filter(|s| !s.trim().is_empty())
    }

    pub fn arg_int(&self, key: &str) -> Option<i64> {
        self.args.get(key).and_then(ArgValue::as_int)
    }

    /// True only for an explicit boolean `true` (`--yes`, `--yes=true`).
    pub fn flag(&self, key: &str) -> bool {
        self.args.get(key).and_then(ArgValue::as_bool).unwrap_or(false)
    }

    pub fn session_text(&self, key: &str) -> Option<String> {
        self.session.get(key).map(ArgValue::to_text)
    }
}

impl<E> fmt::Debug for ExecutionContext<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExecutionContext")
            .field("node", &self.node.id())
            .field("path", &self.path)
            .field("session", &self.session)
            .field("args", &self.args)
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn leaf(id: &str, command: &str) -> MenuNode<()> {
        MenuNode::new(id, id, command)
    }

    #[test]
    fn test_mount_chains_and_keeps_order() {
        let root = MenuNode::<()>::new("root", "Main", "")
            .mount(leaf("a", "1"))
            .mount(leaf("b", "2"));

        let ids: Vec<_> = root.children().iter().map(MenuNode::id).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(root.child("2").map(MenuNode::id), Some("b"));
        assert!(root.child("3").is_none());
        assert!(!root.is_leaf());
        assert!(root.child("1").is_some_and(MenuNode::is_leaf));
    }

    #[test]
    fn test_remount_same_node_replaces_it() {
        let root = MenuNode::<()>::new("root", "Main", "")
            .mount(MenuNode::new("a", "Old", "1"))
            .mount(MenuNode::new("a", "New", "1"));

        assert_eq!(root.children().len(), 1);
        assert_eq!(root.child("1").map(MenuNode::name), Some("New"));
    }

    #[test]
    fn test_different_node_on_taken_key_is_kept() {
        let root = MenuNode::<()>::new("root", "Main", "")
            .mount(leaf("a", "1"))
            .mount(leaf("b", "1"));

        assert_eq!(root.children().len(), 2);
        assert_eq!(root.child("1").map(MenuNode::id), Some("a"));
    }

    #[test]
    fn test_execute_without_handler_is_noop() {
        let node = leaf("a", "1");
        let mut session = ValueMap::new();
        let mut env = ();
        let mut ctx = ExecutionContext::new(
            &node,
            vec![],
            &mut session,
            ValueMap::new(),
            RunMode::Command,
            &mut env,
        );
        assert!(node.execute(&mut ctx).is_ok());
    }

    #[test]
    fn test_execute_calls_handler_with_context() {
        let calls = Rc::new(Cell::new(0));
        let seen = Rc::clone(&calls);
        let node = MenuNode::<u32>::new("a", "A", "1").with_handler(move |ctx| {
            seen.set(seen.get() + 1);
            *ctx.env += 1;
            ctx.session.insert("visited".into(), ArgValue::Bool(true));
            Ok(())
        });

        let mut session = ValueMap::new();
        let mut env = 41;
        let mut ctx = ExecutionContext::new(
            &node,
            vec!["a".into()],
            &mut session,
            ValueMap::new(),
            RunMode::Interactive,
            &mut env,
        );
        node.execute(&mut ctx).unwrap();

        assert_eq!(calls.get(), 1);
        assert_eq!(env, 42);
        assert_eq!(session.get("visited"), Some(&ArgValue::Bool(true)));
    }

    #[test]
    fn test_context_argument_helpers() {
        let node = leaf("a", "1");
        let mut session = ValueMap::new();
        let mut env = ();
        let mut args = ValueMap::new();
        args.insert("section".into(), ArgValue::Int(2024));
        args.insert("yes".into(), ArgValue::Bool(true));
        args.insert("blank".into(), ArgValue::Text("  ".into()));

        let ctx = ExecutionContext::new(&node, vec![], &mut session, args, RunMode::Command, &mut env);
        assert_eq!(ctx.arg_text("section").as_deref(), Some("2024"));
        assert_eq!(ctx.arg_int("section"), Some(2024));
        assert!(ctx.flag("yes"));
        assert!(!ctx.flag("section"));
        assert_eq!(ctx.arg_text("blank"), None);
        assert!(!ctx.is_interactive());
    }
}
