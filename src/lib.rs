//! `vocab`: an offline vocabulary trainer driven by a fixed menu tree.
//!
//! The same tree is walked step by step by the interactive engine and
//! resolved in one shot by the command path resolver.

include!(concat!(env!("OUT_DIR"), "/translations.rs"));

pub mod cli;
pub mod constants;
pub mod core;
pub mod models;
pub mod state;
pub mod system;
