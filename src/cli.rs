use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "principal-list")]
#[command(about = "Resolve and render a list of users/groups", long_about = None)]
pub struct Cli {
    /// Settings file (defaults to the platform config dir)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// JSON directory fixture keyed by identifier
    #[arg(short, long)]
    pub directory: PathBuf,

    /// Offer group selection
    #[arg(long)]
    pub with_groups: bool,

    /// Render the field disabled
    #[arg(long)]
    pub disabled: bool,

    /// Artificial lookup latency in milliseconds
    #[arg(long, default_value_t = 0)]
    pub latency_ms: u64,

    /// Make every lookup fail
    #[arg(long)]
    pub fail_lookups: bool,

    /// JSON array of records to add, as a search would hand them over
    #[arg(long)]
    pub add: Option<PathBuf>,

    /// Identifier to delete (repeatable)
    #[arg(long = "delete")]
    pub delete: Vec<String>,

    /// User id already in the favorite set (repeatable)
    #[arg(long = "favorite-user")]
    pub favorite_users: Vec<String>,

    /// Identifier whose favorite state to toggle (repeatable)
    #[arg(long = "toggle-favorite")]
    pub toggle_favorite: Vec<String>,

    /// Print the view as JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Initial identifier list
    pub identifiers: Vec<String>,
}
