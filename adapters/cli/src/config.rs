//! Session settings read from an optional TOML file.
//!
//! ```toml
//! seed = 7
//!
//! [game]
//! rows = 6
//! columns = 8
//! move_limit = 20
//! initial_budget = 150
//! ```

use std::{fs, path::Path};

use anyhow::{ensure, Context, Result};
use kaiju_rampage_core::GameConfig;
use serde::Deserialize;

/// Contents of a settings file. Missing keys fall back to defaults.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct SettingsFile {
    pub(crate) seed: Option<u64>,
    pub(crate) game: GameConfig,
}

impl SettingsFile {
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings from {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("failed to parse settings in {}", path.display()))
    }

    fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }
}

/// Command-line values that take precedence over the settings file.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct Overrides {
    pub(crate) rows: Option<u32>,
    pub(crate) columns: Option<u32>,
    pub(crate) move_limit: Option<u32>,
    pub(crate) budget: Option<u32>,
}

impl Overrides {
    /// Applies the overrides and rejects boards without cells.
    pub(crate) fn apply(self, mut config: GameConfig) -> Result<GameConfig> {
        if let Some(rows) = self.rows {
            config.rows = rows;
        }
        if let Some(columns) = self.columns {
            config.columns = columns;
        }
        if let Some(move_limit) = self.move_limit {
            config.move_limit = move_limit;
        }
        if let Some(budget) = self.budget {
            config.initial_budget = budget;
        }
        ensure!(
            config.rows > 0 && config.columns > 0,
            "board must have at least one row and one column, got {}x{}",
            config.rows,
            config.columns
        );
        Ok(config)
    }
}
