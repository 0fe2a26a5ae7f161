// src/core/mod.rs

pub mod arg_parser;
pub mod config_loader;
pub mod data_file;
pub mod paths;
pub mod section_store;
pub mod sections;
pub mod validation;
