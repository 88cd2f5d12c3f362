//! Server configuration management for `diagserve.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── render     # [render]
//! │   └── serve      # [serve]
//! ├── types/         # ConfigError
//! ├── util.rs        # Config file lookup, size parsing
//! └── mod.rs         # ServerConfig (this file)
//! ```
//!
//! The file is optional: without one every section uses its defaults.
//! Command-line flags override values from the file.

pub mod section;
pub mod types;
mod util;

use util::find_config_file;

pub use section::{RenderConfig, ServeConfig};
pub use types::ConfigError;

use crate::{
    cli::{Cli, Commands},
    debug, log,
};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing diagserve.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Absolute path to the config file, if one was found (internal use only)
    #[serde(skip)]
    pub config_path: Option<PathBuf>,

    /// HTTP server settings
    #[serde(default)]
    pub serve: ServeConfig,

    /// Diagram tool settings
    #[serde(default)]
    pub render: RenderConfig,
}

impl ServerConfig {
    /// Load configuration from CLI arguments.
    ///
    /// Searches upward from cwd for the config file; falls back to defaults
    /// when none exists.
    pub fn load(cli: &Cli) -> Result<Self> {
        let mut config = match find_config_file(&cli.config) {
            Some(path) => {
                let mut config = Self::from_path(&path)?;
                config.config_path = Some(path);
                config
            }
            None => {
                debug!("config"; "{} not found, using defaults", cli.config.display());
                Self::default()
            }
        };

        config.apply_command_options(cli);
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })
        .map_err(ConfigError::from)?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {} (ignored): {}", display_path, fields.join(", "));
    }

    /// Decompressed source cap in bytes. Valid after [`ServerConfig::validate`].
    pub fn max_source_bytes(&self) -> usize {
        self.serve.max_source_bytes().unwrap_or_default()
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    /// Apply command-specific configuration options.
    fn apply_command_options(&mut self, cli: &Cli) {
        match &cli.command {
            Commands::Serve {
                interface,
                port,
                workers,
                max_source,
            } => {
                Self::update_option(&mut self.serve.interface, interface.as_ref());
                Self::update_option(&mut self.serve.port, port.as_ref());
                Self::update_option(&mut self.serve.workers, workers.as_ref());
                Self::update_option(&mut self.serve.max_source, max_source.as_ref());
            }
            // Encode command doesn't read config
            Commands::Encode { .. } => {}
        }
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate configuration values.
    ///
    /// Missing diagram tools are only warned about: the server can still
    /// answer for the dialects that are installed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.serve.workers == 0 {
            return Err(ConfigError::Validation(
                "[serve] workers must be at least 1".into(),
            ));
        }

        match self.serve.max_source_bytes() {
            Some(0) | None => {
                return Err(ConfigError::Validation(format!(
                    "[serve] max_source `{}` is not a valid size (use e.g. \"512KB\" or \"1MB\")",
                    self.serve.max_source
                )));
            }
            Some(_) => {}
        }

        for (kind, command) in self.render.commands() {
            let Some(program) = command.first() else {
                return Err(ConfigError::Validation(format!(
                    "[render] {} command is empty",
                    kind.keyword()
                )));
            };
            if which::which(program).is_err() {
                log!("warning"; "`{}` not found, {} diagrams will fail", program, kind.label());
            }
        }

        if let Some(font) = &self.render.font
            && !font.is_file()
        {
            log!("warning"; "font `{}` not found", font.display());
        }

        Ok(())
    }
}

/// Parse a config snippet for tests, rejecting unknown fields.
#[cfg(test)]
pub fn test_parse_config(extra: &str) -> ServerConfig {
    let (parsed, ignored) = ServerConfig::parse_with_ignored(extra).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================
