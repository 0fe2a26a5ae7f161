// src/cli/handlers/commons.rs

// Shared helpers for the menu handlers.

use anyhow::{Result, anyhow};
use colored::Colorize;

use crate::{
    cli::{handlers::Context, node::RunMode, workspace::Workspace},
    constants::SESSION_SECTION_KEY,
    core::{arg_parser::ArgValue, sections::SectionsResult, validation},
    models::{Page, Word},
    system::console::Console,
};

/// Section the word commands operate on.
///
/// Looked up in order: the `section` argument, the session, the section
/// remembered from a previous run, `default_section` in `config.toml`.
pub fn resolve_section(ctx: &Context<'_>) -> Result<String> {
    ctx.arg_text("section")
        .or_else(|| ctx.session_text(SESSION_SECTION_KEY))
        .or_else(|| ctx.env.state.get().last_section.clone())
        .or_else(|| ctx.env.config.default_section.clone())
        .ok_or_else(|| anyhow!(t!("sections.error.no_section")))
}

/// Section explicitly chosen for this run: argument or session only.
pub fn explicit_section(ctx: &Context<'_>) -> Option<String> {
    ctx.arg_text("section")
        .or_else(|| ctx.session_text(SESSION_SECTION_KEY))
}

/// Makes `name` the current section for this run and the next one.
pub fn remember_section(ctx: &mut Context<'_>, name: &str) {
    ctx.session
        .insert(SESSION_SECTION_KEY.to_string(), ArgValue::from(name));
    ctx.env.state.get_mut().last_section = Some(name.to_string());
}

/// Drops `name` wherever it is remembered as the current section.
pub fn forget_section(ctx: &mut Context<'_>, name: &str) {
    if ctx.session_text(SESSION_SECTION_KEY).as_deref() == Some(name) {
        ctx.session.remove(SESSION_SECTION_KEY);
    }
    if ctx.env.state.get().last_section.as_deref() == Some(name) {
        ctx.env.state.get_mut().last_section = None;
    }
}

/// A text value from the command line, or typed in when interactive.
pub fn required_text(ctx: &mut Context<'_>, key: &str, prompt: &str) -> Result<String> {
    match ctx.mode {
        RunMode::Command => ctx
            .arg_text(key)
            .ok_or_else(|| anyhow!(format!(t!("common.error.missing_argument"), name = key))),
        RunMode::Interactive => ctx.env.prompt(prompt),
    }
}

/// Like [`required_text`] but blank or missing is fine.
pub fn optional_text(ctx: &mut Context<'_>, key: &str, prompt: &str) -> Result<String> {
    match ctx.mode {
        RunMode::Command => Ok(ctx.arg_text(key).unwrap_or_default()),
        RunMode::Interactive => ctx.env.prompt(prompt),
    }
}

/// A positive count: the `key` argument, a typed number when interactive
/// (blank keeps `default`), or `default`.
pub fn count_arg(ctx: &mut Context<'_>, key: &str, prompt: &str, default: usize) -> Result<usize> {
    let raw = match ctx.mode {
        RunMode::Command => match ctx.arg(key) {
            Some(ArgValue::Int(n)) => Some(*n),
            Some(other) => {
                return Err(anyhow!(format!(
                    t!("common.error.not_a_number"),
                    name = key,
                    value = other
                )));
            }
            None => None,
        },
        RunMode::Interactive => {
            let typed = ctx.env.prompt(&format!("{} [{}]: ", prompt, default))?;
            if typed.is_empty() {
                None
            } else {
                Some(typed.parse::<i64>().map_err(|_| {
                    anyhow!(format!(t!("common.error.not_a_number"), name = key, value = typed))
                })?)
            }
        }
    };

    match raw {
        Some(n) => Ok(validation::validate_count(n)?),
        None => Ok(default),
    }
}

/// Page number from the arguments. Values below 1 mean the first page.
pub fn page_arg(ctx: &Context<'_>) -> usize {
    ctx.arg_int("page")
        .and_then(|n| usize::try_from(n).ok())
        .unwrap_or(1)
        .max(1)
}

/// Confirms a destructive step. `--yes` skips the question in command mode.
pub fn confirm_or_yes(ctx: &mut Context<'_>, prompt: &str) -> Result<bool> {
    if ctx.mode == RunMode::Command && ctx.flag("yes") {
        return Ok(true);
    }
    ctx.env.ask(prompt, false)
}

/// Shows paged results. In interactive mode the user can move between pages
/// with `n` and `p`; Enter (or closed input) ends the listing.
pub fn browse<T, F, S>(
    ws: &mut Workspace,
    mode: RunMode,
    first_page: usize,
    fetch: F,
    mut show: S,
) -> Result<()>
where
    F: Fn(&Workspace, usize) -> SectionsResult<Page<T>>,
    S: FnMut(&mut Workspace, &Page<T>),
{
    let mut page = first_page;
    loop {
        let current = fetch(ws, page)?;
        show(ws, &current);

        if mode == RunMode::Command || (!current.has_next && !current.has_prev) {
            return Ok(());
        }

        let Some(answer) = ws.read_line(t!("common.prompt.pages"))? else {
            return Ok(());
        };
        match answer.trim().to_lowercase().as_str() {
            "n" | "next" if current.has_next => page = current.current_page + 1,
            "p" | "prev" if current.has_prev => page = current.current_page - 1,
            "" | "b" | "back" | "q" => return Ok(()),
            _ => ws.write_line(&t!("common.error.invalid_page_choice").yellow().to_string()),
        }
    }
}

/// One numbered line per word. `offset` is the position of the first word in
/// the full listing.
pub fn print_words(ws: &mut Workspace, words: &[Word], offset: usize) {
    for (i, word) in words.iter().enumerate() {
        ws.write_line(&format_word(offset + i + 1, word));
    }
}

pub fn format_word(number: usize, word: &Word) -> String {
    let mut line = format!(
        "{:>3}. {} - {}",
        number,
        word.word.bold(),
        word.translation
    );
    if !word.phrase.is_empty() {
        line.push_str(&format!("  {}", format!("({})", word.phrase).dimmed()));
    }
    line
}

pub fn success(ws: &mut Workspace, message: &str) {
    ws.write_line(&format!("{} {}", t!("common.success").green(), message));
}
