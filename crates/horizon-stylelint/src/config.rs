//! Linter configuration.
//!
//! Configuration lives in a TOML file, `.horizon-stylelint.toml` by default:
//!
//! ```toml
//! [rules]
//! "scss/selector-no-union-class-name" = true
//! "scss/dollar-variable-default" = { ignore = ["local"] }
//! "scss/double-slash-comment-inline" = { expect = "never", ignore = ["stylelint-commands"] }
//! ```
//!
//! Each rule maps to `true` (enabled with default options), `false`
//! (disabled), or a table of options. Option tables are validated when the
//! rules are built, see [`crate::rules::configure_rule`].

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::logging::targets;

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = ".horizon-stylelint.toml";

/// Parsed configuration file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Rule settings keyed by rule name.
    #[serde(default)]
    pub rules: BTreeMap<String, RuleSetting>,
}

/// How a single rule is configured.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RuleSetting {
    /// `true` or `false`.
    Enabled(bool),
    /// Enabled, with options.
    Options(toml::Table),
}

impl RuleSetting {
    /// Whether the rule runs at all.
    pub fn is_enabled(&self) -> bool {
        !matches!(self, RuleSetting::Enabled(false))
    }

    /// The option table, if one was given.
    pub fn options(&self) -> Option<&toml::Table> {
        match self {
            RuleSetting::Options(table) => Some(table),
            RuleSetting::Enabled(_) => None,
        }
    }
}

impl Config {
    /// Parse configuration from TOML text.
    pub fn from_toml(text: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Load configuration from a file.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let config = Self::from_toml(&text).map_err(|e| Error::config(path, e))?;
        tracing::debug!(
            target: targets::CONFIG,
            path = %path.display(),
            rules = config.rules.len(),
            "loaded config"
        );
        Ok(config)
    }

    /// Find the nearest config file in `start` or one of its ancestors.
    pub fn find(start: &Path) -> Option<PathBuf> {
        start
            .ancestors()
            .map(|dir| dir.join(CONFIG_FILE_NAME))
            .find(|candidate| candidate.is_file())
    }

    /// Load the nearest config file, if there is one.
    pub fn discover(start: &Path) -> Result<Option<(PathBuf, Self)>> {
        let Some(path) = Self::find(start) else {
            tracing::debug!(
                target: targets::CONFIG,
                start = %start.display(),
                "no {} found",
                CONFIG_FILE_NAME
            );
            return Ok(None);
        };
        let config = Self::load_from_path(&path)?;
        Ok(Some((path, config)))
    }

    /// Names of the rules that are switched on.
    pub fn enabled_rules(&self) -> impl Iterator<Item = &str> {
        self.rules
            .iter()
            .filter(|(_, setting)| setting.is_enabled())
            .map(|(name, _)| name.as_str())
    }
}
