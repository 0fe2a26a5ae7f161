// src/cli/handlers/files.rs

use anyhow::{Context as _, Result, anyhow};
use colored::Colorize;
use std::time::SystemTime;

use super::{Context, commons};
use crate::{
    constants::SESSION_SECTION_KEY,
    core::{data_file, paths},
    system::console::Console,
};

/// Entry banner of the file menu: which file is in use and whether it's
/// healthy.
pub fn enter(ctx: &mut Context<'_>) -> Result<()> {
    let info = data_file::inspect(ctx.env.data_file());
    let ws = &mut *ctx.env;

    ws.write_line(&format!(
        t!("files.status.path"),
        path = paths::display_path(&info.path).cyan()
    ));
    let status = match (&info.error, info.exists) {
        (None, true) => format!(t!("files.status.ok"), count = info.sections)
            .green()
            .to_string(),
        (_, false) => t!("files.status.not_created").yellow().to_string(),
        (Some(error), true) => format!(t!("files.status.broken"), error = error)
            .red()
            .to_string(),
    };
    ws.write_line(&status);
    Ok(())
}

pub fn switch(ctx: &mut Context<'_>) -> Result<()> {
    let raw = commons::required_text(ctx, "path", t!("files.prompt.path"))?;
    let target = paths::resolve_data_path(&raw)?;
    let current = ctx.env.data_file().to_path_buf();

    if target == current {
        ctx.env.write_line(t!("files.info.already_active"));
        return Ok(());
    }

    let sections = data_file::validate_data_file(&target).with_context(|| {
        format!(
            t!("files.error.switch_rejected"),
            path = target.display()
        )
    })?;

    {
        let state = ctx.env.state.get_mut();
        state.previous_data_file = Some(current);
        state.active_data_file = Some(target.clone());
        state.last_section = None;
    }
    ctx.session.remove(SESSION_SECTION_KEY);
    ctx.env.use_data_file(target.clone());

    let message = format!(
        t!("files.success.switched"),
        path = paths::display_path(&target).cyan(),
        count = sections
    );
    commons::success(ctx.env, &message);
    Ok(())
}

pub fn info(ctx: &mut Context<'_>) -> Result<()> {
    let info = data_file::inspect(ctx.env.data_file());
    let yes_no = |flag: bool| if flag { t!("common.yes") } else { t!("common.no") };

    let mut lines = vec![
        t!("files.info.header").bold().to_string(),
        format!(t!("files.info.path"), value = info.path.display()),
        format!(t!("files.info.exists"), value = yes_no(info.exists)),
    ];
    if let Some(size) = info.size {
        lines.push(format!(t!("files.info.size"), value = data_file::format_size(size)));
    }
    if let Some(modified) = info.modified {
        let age = SystemTime::now()
            .duration_since(modified)
            .unwrap_or_default();
        lines.push(format!(t!("files.info.modified"), value = data_file::format_age(age)));
    }
    lines.push(format!(t!("files.info.readable"), value = yes_no(info.readable)));
    lines.push(format!(t!("files.info.valid_json"), value = yes_no(info.valid_json)));
    lines.push(format!(t!("files.info.sections"), value = info.sections));
    if let Some(fingerprint) = &info.fingerprint {
        lines.push(format!(t!("files.info.fingerprint"), value = fingerprint.dimmed()));
    }
    if let Some(previous) = &ctx.env.state.get().previous_data_file {
        lines.push(format!(
            t!("files.info.previous"),
            value = paths::display_path(previous)
        ));
    }
    if let Some(error) = &info.error {
        lines.push(format!(t!("files.info.error"), value = error.red()));
    }

    for line in lines {
        ctx.env.write_line(&line);
    }
    Ok(())
}

pub fn rollback(ctx: &mut Context<'_>) -> Result<()> {
    let previous = ctx
        .env
        .state
        .get()
        .previous_data_file
        .clone()
        .ok_or_else(|| anyhow!(t!("files.error.no_previous")))?;

    data_file::validate_data_file(&previous).with_context(|| {
        format!(
            t!("files.error.rollback_rejected"),
            path = previous.display()
        )
    })?;

    let question = format!(
        t!("files.prompt.confirm_rollback"),
        path = paths::display_path(&previous)
    );
    if !commons::confirm_or_yes(ctx, &question)? {
        ctx.env.write_line(t!("common.info.operation_cancelled"));
        return Ok(());
    }

    {
        let state = ctx.env.state.get_mut();
        state.previous_data_file = None;
        state.active_data_file = Some(previous.clone());
        state.last_section = None;
    }
    ctx.session.remove(SESSION_SECTION_KEY);
    ctx.env.use_data_file(previous.clone());

    let message = format!(
        t!("files.success.rolled_back"),
        path = paths::display_path(&previous).cyan()
    );
    commons::success(ctx.env, &message);
    Ok(())
}
