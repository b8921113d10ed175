//! Argument definitions for the `stockdeck` binary.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use stockdeck_core::{SortBy, SortDir};

#[derive(Debug, Parser)]
#[command(
    name = "stockdeck",
    version,
    about = "Inventory dashboard for a remote product catalog",
    long_about = "Fetch, filter, and edit products from a remote catalog API, \
                  with a locally persisted snapshot for display continuity."
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global options ──────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Output format.
    #[arg(long, short = 'o', global = true, value_enum, default_value = "table")]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv).
    #[arg(long, short = 'v', global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-essential output.
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts.
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Catalog API root (overrides config file).
    #[arg(long, global = true, env = "STOCKDECK_CATALOG_BASE_URL")]
    pub base_url: Option<String>,

    /// Page limit for catalog refreshes (overrides config file).
    #[arg(long, global = true)]
    pub limit: Option<u32>,

    /// Snapshot file path (overrides config file).
    #[arg(long, global = true, env = "STOCKDECK_STORAGE_SNAPSHOT_PATH")]
    pub snapshot_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Yaml,
    Plain,
}

// ── Sort flags ──────────────────────────────────────────────────────
//
// CLI-side mirrors of the core enums so clap's value parsing stays in
// this crate.

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SortKey {
    Name,
    Price,
}

impl From<SortKey> for SortBy {
    fn from(key: SortKey) -> Self {
        match key {
            SortKey::Name => SortBy::Name,
            SortKey::Price => SortBy::Price,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl From<SortDirection> for SortDir {
    fn from(dir: SortDirection) -> Self {
        match dir {
            SortDirection::Asc => SortDir::Asc,
            SortDirection::Desc => SortDir::Desc,
        }
    }
}

// ── Commands ────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Refresh the local catalog from the remote API.
    Fetch,

    /// List products through the current filters.
    List(ListArgs),

    /// Add a product to the catalog.
    Add(AddArgs),

    /// Update fields on an existing product.
    Update(UpdateArgs),

    /// Delete a product from the catalog.
    Delete(DeleteArgs),

    /// List the known categories.
    Categories,

    /// Manage stockdeck configuration.
    Config(ConfigArgs),

    /// Generate shell completions.
    Completions(CompletionsArgs),
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Free-text filter over title and category (case-insensitive).
    #[arg(long)]
    pub query: Option<String>,

    /// Category filter; "all" selects everything.
    #[arg(long, short = 'c')]
    pub category: Option<String>,

    /// Sort key.
    #[arg(long, value_enum)]
    pub sort_by: Option<SortKey>,

    /// Sort direction.
    #[arg(long, value_enum)]
    pub sort_dir: Option<SortDirection>,

    /// Refresh from the remote before listing.
    #[arg(long, short = 'r')]
    pub refresh: bool,
}

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Product title.
    #[arg(long)]
    pub title: String,

    /// Price (non-negative).
    #[arg(long)]
    pub price: f64,

    /// Units in stock.
    #[arg(long, default_value_t = 0)]
    pub stock: u32,

    /// Category (defaults to "uncategorized").
    #[arg(long, short = 'c')]
    pub category: Option<String>,

    /// Thumbnail URI.
    #[arg(long)]
    pub thumbnail: Option<String>,
}

#[derive(Debug, Args)]
pub struct UpdateArgs {
    /// Product id.
    pub id: String,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub price: Option<f64>,

    #[arg(long)]
    pub stock: Option<u32>,

    #[arg(long, short = 'c')]
    pub category: Option<String>,

    #[arg(long)]
    pub thumbnail: Option<String>,
}

#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// Product id.
    pub id: String,
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the resolved configuration.
    Show,
    /// Write a default config file.
    Init,
    /// Print the config file path.
    Path,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for.
    #[arg(value_enum)]
    pub shell: Shell,
}
