// src/cli/handlers/sections.rs

use anyhow::Result;
use colored::Colorize;

use super::{Context, commons};
use crate::{
    cli::error::MenuError,
    constants::SESSION_SECTION_KEY,
    core::{section_store::SectionStore, sections},
    system::console::Console,
};

/// Entry banner of the sections menu.
pub fn enter(ctx: &mut Context<'_>) -> Result<()> {
    let current = commons::explicit_section(ctx)
        .or_else(|| ctx.env.state.get().last_section.clone());
    ctx.env.write_line(&t!("sections.banner").bold().to_string());
    if let Some(name) = current {
        ctx.env
            .write_line(&format!(t!("sections.info.current"), name = name.cyan()));
    }
    Ok(())
}

pub fn create(ctx: &mut Context<'_>) -> Result<()> {
    let raw = commons::required_text(ctx, "name", t!("sections.prompt.name"))?;
    let name = sections::create_section(&ctx.env.store, &raw)?;
    commons::remember_section(ctx, &name);

    let message = format!(t!("sections.success.created"), name = name.cyan());
    commons::success(ctx.env, &message);
    Ok(())
}

/// Picks the section the word operations below work on.
///
/// Shows the sections a page at a time; the user answers with a number on
/// the page or a section name, `n`/`p` to change page, `b` to go back.
pub fn select(ctx: &mut Context<'_>) -> Result<()> {
    let size = ctx.env.config.section_page_size;
    let mut page = 1;

    loop {
        let listing = sections::list_sections(&ctx.env.store, page, size)?;
        if listing.total == 0 {
            ctx.env
                .write_line(&t!("sections.info.none").yellow().to_string());
            return Err(MenuError::Back.into());
        }

        ctx.env.write_line("");
        ctx.env.write_line(
            &format!(
                t!("sections.list.header"),
                page = listing.current_page,
                pages = listing.total_pages
            )
            .bold()
            .to_string(),
        );
        for (i, section) in listing.items.iter().enumerate() {
            ctx.env.write_line(&format!(
                t!("sections.list.item"),
                number = i + 1,
                name = section.name.cyan(),
                count = section.words.len()
            ));
        }
        if listing.has_prev {
            ctx.env.write_line(t!("sections.list.hint_prev"));
        }
        if listing.has_next {
            ctx.env.write_line(t!("sections.list.hint_next"));
        }
        ctx.env.write_line(t!("sections.list.hint_back"));

        let answer = ctx.env.prompt(t!("sections.prompt.choice"))?;
        let chosen = match answer.to_lowercase().as_str() {
            "b" | "back" => return Err(MenuError::Back.into()),
            "p" | "prev" if listing.has_prev => {
                page = listing.current_page - 1;
                continue;
            }
            "n" | "next" if listing.has_next => {
                page = listing.current_page + 1;
                continue;
            }
            _ => answer
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|i| listing.items.get(i))
                .map(|s| s.name.clone())
                .or_else(|| {
                    listing
                        .items
                        .iter()
                        .any(|s| s.name == answer)
                        .then(|| answer.clone())
                })
                .or_else(|| {
                    // A name from another page.
                    ctx.env
                        .store
                        .section_exists(&answer)
                        .unwrap_or(false)
                        .then(|| answer.clone())
                }),
        };

        let Some(name) = chosen else {
            ctx.env.write_line(
                &MenuError::InvalidOption(answer)
                    .to_string()
                    .yellow()
                    .to_string(),
            );
            continue;
        };

        let section = sections::select_section(&ctx.env.store, &name)?;
        commons::remember_section(ctx, &section.name);
        let message = format!(
            t!("sections.success.selected"),
            name = section.name.cyan(),
            count = section.words.len()
        );
        commons::success(ctx.env, &message);
        return Ok(());
    }
}

pub fn list(ctx: &mut Context<'_>) -> Result<()> {
    let size = match ctx.arg("size") {
        Some(_) => commons::count_arg(ctx, "size", "", 1)?,
        None => ctx.env.config.section_page_size,
    };
    let first_page = commons::page_arg(ctx);
    let current = ctx.session_text(SESSION_SECTION_KEY)
        .or_else(|| ctx.env.state.get().last_section.clone());
    let mode = ctx.mode;

    commons::browse(
        ctx.env,
        mode,
        first_page,
        |ws, page| sections::list_sections(&ws.store, page, size),
        |ws, page| {
            if page.total == 0 {
                ws.write_line(&t!("sections.info.none").yellow().to_string());
                return;
            }
            ws.write_line(
                &format!(
                    t!("sections.list.header"),
                    page = page.current_page,
                    pages = page.total_pages
                )
                .bold()
                .to_string(),
            );
            for (i, section) in page.items.iter().enumerate() {
                let marker = if current.as_deref() == Some(section.name.as_str()) {
                    " *"
                } else {
                    ""
                };
                ws.write_line(&format!(
                    "{}{}",
                    format!(
                        t!("sections.list.item"),
                        number = page.offset + i + 1,
                        name = section.name.cyan(),
                        count = section.words.len()
                    ),
                    marker.green()
                ));
            }
        },
    )
}

pub fn delete(ctx: &mut Context<'_>) -> Result<()> {
    let name = commons::required_text(ctx, "name", t!("sections.prompt.delete_name"))?;
    let section = sections::select_section(&ctx.env.store, &name)?;

    let question = format!(
        t!("sections.prompt.confirm_delete"),
        name = section.name,
        count = section.words.len()
    );
    if !commons::confirm_or_yes(ctx, &question)? {
        ctx.env.write_line(t!("common.info.operation_cancelled"));
        return Ok(());
    }

    sections::delete_section(&ctx.env.store, &section.name)?;
    commons::forget_section(ctx, &section.name);

    let message = format!(t!("sections.success.deleted"), name = section.name.cyan());
    commons::success(ctx.env, &message);
    Ok(())
}
