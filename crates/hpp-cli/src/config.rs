//! CLI configuration: an optional TOML file layered under `HPP_*` variables.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use hpp_core::{access::DEFAULT_PASSPHRASE, pricing::DEFAULT_MARGIN};
use serde::Deserialize;

/// Settings read from `hpp.toml` (or `--config`) and the environment.
///
/// ```toml
/// store_path     = "~/.local/share/hpp/hpp.sqlite3"
/// default_margin = 40
/// passphrase     = "change me"
/// require_login  = true
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CliConfig {
  pub store_path:     PathBuf,
  /// Margin in percent used when a command gets no `--margin`.
  pub default_margin: f64,
  /// Placeholder gate passphrase; see `hpp_core::access`.
  pub passphrase:     String,
  pub require_login:  bool,
}

impl Default for CliConfig {
  fn default() -> Self {
    Self {
      store_path:     PathBuf::from("~/.local/share/hpp/hpp.sqlite3"),
      default_margin: DEFAULT_MARGIN,
      passphrase:     DEFAULT_PASSPHRASE.to_owned(),
      require_login:  true,
    }
  }
}

impl CliConfig {
  /// Read `path` if it exists, then apply `HPP_*` environment overrides.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("HPP"))
      .build()
      .with_context(|| format!("failed to read config file {}", path.display()))?;

    settings
      .try_deserialize()
      .context("failed to deserialise CliConfig")
  }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
