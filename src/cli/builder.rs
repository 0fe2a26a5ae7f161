// src/cli/builder.rs

//! Assembles and checks the application's menu tree.

use crate::cli::error::MenuError;
use crate::cli::handlers::Operation;
use crate::cli::node::MenuNode;
use crate::cli::workspace::Workspace;

/// Id of the tree root. It has an empty command and is never addressable.
pub const ROOT_ID: &str = "root";

fn node(id: &str, name: &str, command: &str, operation: Operation) -> MenuNode<Workspace> {
    MenuNode::<Workspace>::new(id, name, command).with_handler(move |ctx| operation.run(ctx))
}

/// Builds the full menu. Every call returns a new, independent tree with the
/// same structure.
///
/// ```text
/// root
/// ├─ sections [1]
/// │  ├─ createSection [1]
/// │  ├─ selectSection [2]
/// │  │  ├─ addWord [1]  listWords [2]  randomWords [3]
/// │  │  └─ searchWord [4]  removeWord [5]
/// │  ├─ listSections [3]
/// │  └─ deleteSection [4]
/// └─ files [f]
///    ├─ switchFile [1]  fileInfo [2]
///    └─ rollbackFile [3]
/// ```
pub fn build_default_tree() -> MenuNode<Workspace> {
    let select_section = node(
        "selectSection",
        t!("menu.select_section"),
        "2",
        Operation::SelectSection,
    )
    .mount(node("addWord", t!("menu.add_word"), "1", Operation::AddWord))
    .mount(node("listWords", t!("menu.list_words"), "2", Operation::ListWords))
    .mount(node(
        "randomWords",
        t!("menu.random_words"),
        "3",
        Operation::RandomWords,
    ))
    .mount(node(
        "searchWord",
        t!("menu.search_word"),
        "4",
        Operation::SearchWord,
    ))
    .mount(node(
        "removeWord",
        t!("menu.remove_word"),
        "5",
        Operation::RemoveWord,
    ));

    let sections = node("sections", t!("menu.sections"), "1", Operation::EnterSections)
        .mount(node(
            "createSection",
            t!("menu.create_section"),
            "1",
            Operation::CreateSection,
        ))
        .mount(select_section)
        .mount(node(
            "listSections",
            t!("menu.list_sections"),
            "3",
            Operation::ListSections,
        ))
        .mount(node(
            "deleteSection",
            t!("menu.delete_section"),
            "4",
            Operation::DeleteSection,
        ));

    let files = node("files", t!("menu.files"), "f", Operation::EnterFiles)
        .mount(node("switchFile", t!("menu.switch_file"), "1", Operation::SwitchFile))
        .mount(node("fileInfo", t!("menu.file_info"), "2", Operation::FileInfo))
        .mount(node(
            "rollbackFile",
            t!("menu.rollback_file"),
            "3",
            Operation::RollbackFile,
        ));

    MenuNode::new(ROOT_ID, t!("menu.main"), "")
        .mount(sections)
        .mount(files)
}

/// Depth-first check that no two siblings share a non-empty command key.
/// Stops at the first clash found.
pub fn validate_tree<E>(root: &MenuNode<E>) -> Result<(), MenuError> {
    let children = root.children();
    for (i, child) in children.iter().enumerate() {
        if child.command().is_empty() {
            continue;
        }
        let clash = children
            .iter()
            .take(i)
            .find(|earlier| earlier.command() == child.command());
        if let Some(first) = clash {
            return Err(MenuError::DuplicateCommand {
                command: child.command().to_string(),
                parent: root.id().to_string(),
                first: first.id().to_string(),
                second: child.id().to_string(),
            });
        }
    }

    children.iter().try_for_each(validate_tree)
}

/// Renders the tree as ASCII art, one `name (id) [command]` line per node.
pub fn render_tree<E>(root: &MenuNode<E>) -> String {
    let mut out = format!("{} ({})\n", root.name(), root.id());
    render_children(root, "", &mut out);
    out
}

fn render_children<E>(parent: &MenuNode<E>, prefix: &str, out: &mut String) {
    let count = parent.children().len();
    for (i, child) in parent.children().iter().enumerate() {
        let is_last = i + 1 == count;
        let connector = if is_last { "└─" } else { "├─" };
        out.push_str(&format!(
            "{}{} {} ({}) [{}]\n",
            prefix,
            connector,
            child.name(),
            child.id(),
            child.command()
        ));

        let child_prefix = format!("{}{}", prefix, if is_last { "   " } else { "│  " });
        render_children(child, &child_prefix, out);
    }
}
