//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use muno_observability::{SessionId, StructuredLogger};

use crate::config::MunoConfig;
use crate::output::Output;

/// Config file names searched from the working directory upward.
pub const CONFIG_NAMES: [&str; 3] = ["muno.toml", ".muno.toml", "muno.json"];

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: MunoConfig,
    /// Output handler.
    pub output: Output,
    /// Session logger shared by every command.
    pub logger: StructuredLogger,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let config = if let Some(path) = config_path {
            MunoConfig::load(path)?
        } else {
            Self::find_config(&cwd).unwrap_or_default()
        };

        let logger = StructuredLogger::new(SessionId::generate())
            .with_min_level(config.logging.level)
            .with_format(config.logging.format);

        Ok(Self {
            config,
            output,
            logger,
            cwd,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<MunoConfig> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    if let Ok(config) = MunoConfig::load(config_path.to_str()?) {
                        return Some(config);
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if Path::new(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.cwd.join(path)
        }
    }
}
