// src/bin/vocab.rs

use anyhow::{Context as _, Result};
use clap::Parser;
use colored::*;
use std::path::PathBuf;
use vocab::{
    cli::{
        Cli,
        builder::{build_default_tree, render_tree, validate_tree},
        engine::InteractiveEngine,
        resolver::CommandPathResolver,
        workspace::Workspace,
    },
    constants::PATH_SEPARATOR,
    core::{config_loader, paths},
    models::AppConfig,
    state::AppState,
    system::console::TerminalConsole,
};

/// The main entry point of `vocab`.
/// Sets up logging, parses arguments and reports any error in one place.
fn main() {
    env_logger::init();

    if let Err(e) = run_cli(Cli::parse()) {
        eprintln!("\n{}: {:#}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Picks the data file for this run: the `-f` flag, then the file last
/// switched to, then the configured one.
fn choose_data_file(cli: &Cli, config: &AppConfig, state: &AppState) -> Result<PathBuf> {
    if let Some(raw) = &cli.file {
        return Ok(paths::resolve_data_path(raw)?);
    }
    if let Some(active) = &state.get().active_data_file {
        return Ok(active.clone());
    }
    Ok(paths::resolve_data_path(&config.data_file)?)
}

fn run_cli(cli: Cli) -> Result<()> {
    log::debug!("CLI args parsed: {:?}", cli);

    let tree = build_default_tree();
    validate_tree(&tree).context("The built-in menu tree is invalid")?;

    if cli.tree {
        print!("{}", render_tree(&tree));
        return Ok(());
    }

    let resolver = CommandPathResolver::new(&tree);
    if cli.commands {
        for (command, path) in resolver.list_commands() {
            println!("  {:<12} {}", command.cyan(), path.join(PATH_SEPARATOR).dimmed());
        }
        return Ok(());
    }

    let config_dir = paths::get_config_dir()?;
    let config = config_loader::load_config(&config_dir)?;
    let state = AppState::load(&paths::state_file_in(&config_dir));
    let data_file = choose_data_file(&cli, &config, &state)?;
    log::info!("Using data file '{}'.", data_file.display());

    let mut workspace = Workspace::new(config, data_file, state, Box::new(TerminalConsole::new()));

    let outcome = if cli.args.is_empty() {
        InteractiveEngine::new(&tree).run(&mut workspace)
    } else {
        resolver.execute_command(&cli.args, &mut workspace)
    };

    // Whatever happened, keep what the session learned.
    if let Err(e) = workspace.state.save_if_needed() {
        log::warn!("Could not save session state: {}", e);
    }
    outcome
}
