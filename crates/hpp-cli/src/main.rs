//! `hpp`: command-line HPP (cost of goods produced) calculator.
//!
//! # Usage
//!
//! ```text
//! hpp login 081234567
//! hpp rename "Kue Lapis"
//! hpp yield 10
//! hpp add raw-materials --name Tepung --price 50000
//! hpp show
//! hpp save
//! hpp history kue
//! ```

mod app;
mod config;
mod export;
mod render;

use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use hpp_core::{access::AccessGate, category::Category, session::Session};
use hpp_store_sqlite::SqliteStore;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use crate::config::{CliConfig, expand_tilde};

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "hpp", version, about = "Cost of goods produced (HPP) calculator")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, value_name = "FILE", default_value = "hpp.toml")]
  config: PathBuf,

  /// SQLite file holding the current product and history.
  #[arg(long, value_name = "PATH")]
  store: Option<PathBuf>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
  /// Unlock the calculator on this machine.
  Login { passphrase: String },
  /// Lock the calculator again.
  Logout,
  /// Show the product being edited, with totals.
  Show {
    #[arg(short, long)]
    margin: Option<f64>,
  },
  /// Set the product name.
  Rename { name: String },
  /// Set how many units one batch yields.
  Yield {
    #[arg(allow_negative_numbers = true)]
    value: f64,
  },
  /// Add a cost item to a category (raw-materials, packaging, labor, overhead).
  Add {
    category: Category,
    #[arg(long)]
    name:     Option<String>,
    #[arg(long)]
    price:    Option<f64>,
  },
  /// Change an item's name and/or price.
  Update {
    item:  Uuid,
    #[arg(long)]
    name:  Option<String>,
    #[arg(long)]
    price: Option<f64>,
  },
  /// Remove a cost item.
  Remove { item: Uuid },
  /// Discard the product being edited and start an empty one.
  New,
  /// Suggest a selling price for a margin.
  Price {
    #[arg(short, long, allow_negative_numbers = true)]
    margin: Option<f64>,
  },
  /// Save the product to history and start a new one.
  Save,
  /// List saved calculations, optionally filtered by product name.
  History { query: Option<String> },
  /// Edit a copy of a saved calculation.
  Load { record: Uuid },
  /// Delete a saved calculation.
  Delete {
    record: Uuid,
    /// Confirm the deletion; without it nothing is deleted.
    #[arg(long)]
    yes:    bool,
  },
  /// Write the product to a CSV spreadsheet.
  Export {
    /// Directory to write into.
    #[arg(long, value_name = "DIR", default_value = ".")]
    out: PathBuf,
  },
  /// Print a report of the product.
  Print {
    #[arg(short, long)]
    margin: Option<f64>,
  },
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let cfg = CliConfig::load(&cli.config)?;

  // CLI flag overrides config file, which overrides defaults.
  let store_path = expand_tilde(cli.store.as_deref().unwrap_or(cfg.store_path.as_path()));
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  let gate = AccessGate::new(cfg.passphrase.clone());
  match &cli.command {
    Command::Login { passphrase } => {
      if !gate.unlock(&store, passphrase).await? {
        anyhow::bail!("wrong passphrase");
      }
      println!("Unlocked.");
      return Ok(());
    }
    Command::Logout => {
      AccessGate::lock(&store).await?;
      println!("Locked.");
      return Ok(());
    }
    _ => {}
  }

  if cfg.require_login && !AccessGate::is_unlocked(&store).await {
    anyhow::bail!("calculator is locked; run `hpp login <passphrase>` first");
  }

  let mut session = Session::hydrate(store).await;
  app::run(cli.command, &mut session, &cfg).await
}
