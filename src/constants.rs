// src/constants.rs

/// The name of the directory holding vocab configuration (inside the system config dir).
pub const CONFIG_DIR_NAME: &str = "vocab";

/// Environment variable that redirects the configuration directory.
pub const CONFIG_DIR_ENV: &str = "VOCAB_CONFIG_DIR";

/// The name of the main configuration file.
pub const CONFIG_FILENAME: &str = "config.toml";

/// The name of the binary file persisting session state between runs.
pub const STATE_FILENAME: &str = "state.bin";

/// Data file used when neither the config nor `--file` names one.
pub const DEFAULT_DATA_FILE: &str = "data/sections.json";

/// Required extension for data files.
pub const DATA_FILE_EXTENSION: &str = "json";

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const DEFAULT_SECTION_PAGE_SIZE: usize = 5;
pub const DEFAULT_RANDOM_COUNT: usize = 10;

/// Session key under which the currently selected section is stored.
pub const SESSION_SECTION_KEY: &str = "section";

/// Separator used when joining node ids into a path key.
pub const PATH_SEPARATOR: &str = "/";
