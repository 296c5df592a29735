//! Configuration file loading for colloquy
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `COLLOQUY_` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./colloquy.toml` or `./.colloquy.toml`
//! 4. Global: `$XDG_CONFIG_HOME/colloquy/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileConfig, FileLoggingConfig, FileOrchestratorConfig,
    FileSchedulerConfig,
};
pub use loader::{ConfigLoader, ENV_PREFIX};
