//! # Configuration
//!
//! Settings are managed by [`confique`], layered from environment variables, an
//! optional TOML file and compiled defaults.
//!
//! ## Resolution Order
//!
//! 1. **Environment variables**: `DATATABLE_PAGE_SIZE`, `DATATABLE_COLOR`, `DATATABLE_NAME_WIDTH`.
//! 2. **Config file**: passed with `--config <PATH>`.
//! 3. **Compiled defaults**: `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `page_size` | `10` | Rows per page of the table |
//! | `color` | `true` | Colorize terminal output |
//! | `name_width` | `32` | Names wider than this are truncated in the table |
//!
//! `datatable --config-template` prints a commented sample file.

use crate::error::{DataTableError, Result};
use crate::query::DEFAULT_PAGE_SIZE;
use confique::Config;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for the table, stored in `datatable.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DataTableConfig {
    /// Rows shown per page of the table.
    #[config(env = "DATATABLE_PAGE_SIZE", default = 10)]
    pub page_size: usize,

    /// Colorize terminal output.
    #[config(env = "DATATABLE_COLOR", default = true)]
    pub color: bool,

    /// Names wider than this many columns are truncated in the table.
    #[config(env = "DATATABLE_NAME_WIDTH", default = 32)]
    pub name_width: usize,
}

impl Default for DataTableConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            color: true,
            name_width: 32,
        }
    }
}

impl DataTableConfig {
    /// Loads from the environment and, when given, a TOML file.
    /// A path that does not exist is an error rather than silently ignored.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Self::builder().env();
        if let Some(path) = path {
            if !path.is_file() {
                return Err(DataTableError::Config(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
            builder = builder.file(path);
        }
        let config = builder
            .load()
            .map_err(|e| DataTableError::Config(e.to_string()))?;
        config.check()?;
        Ok(config)
    }

    fn check(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(DataTableError::Config(
                "page_size must be at least 1".to_string(),
            ));
        }
        if self.name_width < 4 {
            return Err(DataTableError::Config(
                "name_width must be at least 4".to_string(),
            ));
        }
        Ok(())
    }

    /// A commented TOML file listing every setting with its default.
    pub fn template() -> String {
        confique::toml::template::<Self>(confique::toml::FormatOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_default_config() {
        let config = DataTableConfig::default();
        assert_eq!(config.page_size, 10);
        assert!(config.color);
        assert_eq!(config.name_width, 32);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("datatable.toml");
        fs::write(&path, "page_size = 3\ncolor = false\n").unwrap();

        let config = DataTableConfig::load(Some(&path)).unwrap();
        assert_eq!(config.page_size, 3);
        assert!(!config.color);
        assert_eq!(config.name_width, 32);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = DataTableConfig::load(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(matches!(err, DataTableError::Config(msg) if msg.contains("not found")));
    }

    #[test]
    fn test_zero_page_size_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("datatable.toml");
        fs::write(&path, "page_size = 0\n").unwrap();

        assert!(DataTableConfig::load(Some(&path)).is_err());
    }

    #[test]
    fn test_template_mentions_every_key() {
        let template = DataTableConfig::template();
        assert!(template.contains("page_size"));
        assert!(template.contains("color"));
        assert!(template.contains("name_width"));
    }
}
