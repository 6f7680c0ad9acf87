//! Configuration file loading for ewp-commlog
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `--config <path>` specified file
//! 2. Project root: `./commlog.toml` or `./.commlog.toml`
//! 3. XDG config: `$XDG_CONFIG_HOME/ewp-commlog/config.toml`
//! 4. Default values

mod file_config;
mod loader;

pub use file_config::{
    FileConfig, FileDecodeConfig, FileOutputConfig, FileQueryConfig, MAX_DECODE_CONCURRENCY,
};
pub use loader::ConfigLoader;
