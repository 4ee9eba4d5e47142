//! Command-line argument definition and processing.

use clap::Parser;

use crate::app::runtime::SessionOptions;
use crate::state::Tab;

/// aptshelf - browse an APT package catalog by repository, store, and tab
#[derive(Parser, Debug)]
#[command(name = "aptshelf")]
#[command(version)]
#[command(
    about = "Browse an APT package catalog by repository, curated store, and tab",
    long_about = None
)]
pub struct Args {
    /// Narrow the catalog to one repository id (empty value clears it)
    #[arg(long)]
    pub repo: Option<String>,

    /// Select the catalog tab (available, installed, upgradable)
    #[arg(short, long)]
    pub tab: Option<String>,

    /// Free-text search, applied on the available tab
    #[arg(short, long)]
    pub search: Option<String>,

    /// Narrow the visible packages to a configured store id
    #[arg(long)]
    pub store: Option<String>,

    /// Maximum number of packages per query (session only, not persisted)
    #[arg(long)]
    pub limit: Option<usize>,

    /// Refresh the package lists before the first query
    #[arg(short = 'y', long)]
    pub refresh: bool,

    /// List the configured repositories and exit
    #[arg(long)]
    pub list_repos: bool,

    /// Set the logging level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Enable verbose output (equivalent to --log-level debug)
    #[arg(short, long)]
    pub verbose: bool,

    /// Specify the configuration directory (default: ~/.config/aptshelf)
    #[arg(long)]
    pub config_dir: Option<String>,
}

/// Parse the process arguments.
#[must_use]
pub fn process_args() -> Args {
    Args::parse()
}

impl Args {
    /// What: Translate CLI flags into session startup options.
    ///
    /// Output: Options for `app::run`, or a message for an unusable flag
    /// value.
    ///
    /// # Errors
    /// - When `--tab` names none of the three known tabs.
    pub fn session_options(&self) -> Result<SessionOptions, String> {
        let tab = match &self.tab {
            None => None,
            Some(raw) => match Tab::from_config_key(raw) {
                Some(tab) => Some(tab),
                None => {
                    return Err(format!(
                        "unknown tab '{raw}' (expected available, installed, or upgradable)"
                    ));
                }
            },
        };
        Ok(SessionOptions {
            config_dir: self.config_dir.clone().map(Into::into),
            repository: self.repo.clone(),
            tab,
            search: self.search.clone(),
            store: self.store.clone(),
            limit: self.limit,
            force_refresh: self.refresh,
            exit_when_idle: true,
        })
    }
}
