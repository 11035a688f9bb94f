//! CLI commands module
//!
//! This module contains all CLI command implementations.

pub mod config;
pub mod content;
pub mod export;
pub mod init;
pub mod site;
pub mod sitemap;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::debug;

use sitekit_core::config::Config;
use sitekit_core::content::{ContentPage, ContentStatus};
use sitekit_core::manager::SiteManager;
use sitekit_core::site::Site;
use sitekit_core::sitemap::{tree, InsertPosition, SitemapNode};
use sitekit_storage::FileSystemStorage;

/// Project directory created by `sitekit init`
pub const PROJECT_DIR: &str = ".sitekit";

/// sitekit - plan site structures and export them to WordPress
#[derive(Debug, Parser)]
#[command(name = "sitekit")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Data directory (overrides the configured one)
    #[arg(long, global = true, env = "SITEKIT_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Initialize sitekit in the current directory
    Init(init::InitArgs),

    /// Manage sites
    #[command(subcommand)]
    Site(site::SiteCommand),

    /// Edit the page tree of a site
    #[command(subcommand)]
    Sitemap(sitemap::SitemapCommand),

    /// Manage content pages
    #[command(subcommand)]
    Content(content::ContentCommand),

    /// Export a site for WordPress
    Export(export::ExportArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(config::ConfigCommand),
}

/// Options shared by every command
#[derive(Debug, Clone)]
pub struct GlobalOpts {
    pub config: Option<PathBuf>,
    pub data_dir: Option<PathBuf>,
}

impl GlobalOpts {
    /// Configuration file in use
    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(|| PathBuf::from(PROJECT_DIR).join("config.toml"))
    }

    pub fn load_config(&self) -> Result<Config> {
        let path = self.config_path();
        Config::load(&path).with_context(|| format!("Failed to load config from {}", path.display()))
    }

    /// Data directory: `--data-dir`, then the config file, then the platform default
    pub fn data_dir(&self, config: &Config) -> PathBuf {
        self.data_dir
            .clone()
            .or_else(|| config.storage.data_dir.clone())
            .unwrap_or_else(FileSystemStorage::default_dir)
    }

    /// Open storage and build a site manager
    pub fn manager(&self) -> Result<SiteManager> {
        let config = self.load_config()?;
        let data_dir = self.data_dir(&config);
        debug!("Using data directory {:?}", data_dir);

        let storage = FileSystemStorage::new(&data_dir)
            .with_context(|| format!("Failed to open data directory {}", data_dir.display()))?;
        Ok(SiteManager::new(storage).with_export_config(config.export))
    }
}

/// Insert position argument
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
pub enum PositionArg {
    /// Sibling before the target
    Before,
    /// Sibling after the target
    #[default]
    After,
    /// Last child of the target
    Child,
}

impl From<PositionArg> for InsertPosition {
    fn from(arg: PositionArg) -> Self {
        match arg {
            PositionArg::Before => InsertPosition::Before,
            PositionArg::After => InsertPosition::After,
            PositionArg::Child => InsertPosition::Child,
        }
    }
}

/// Content status argument
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StatusArg {
    Draft,
    Published,
}

impl From<StatusArg> for ContentStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Draft => ContentStatus::Draft,
            StatusArg::Published => ContentStatus::Published,
        }
    }
}

/// First eight characters of an id, for display
pub fn short_id(id: &str) -> String {
    id.chars().take(8).collect()
}

/// Pick the single item matching `query` by exact id, id prefix or alias
fn pick_unique<'a, T>(
    kind: &str,
    query: &str,
    items: &[&'a T],
    id_of: impl Fn(&T) -> &str,
    alias: impl Fn(&T) -> bool,
) -> Result<&'a T> {
    if let Some(item) = items.iter().copied().find(|item| id_of(item) == query) {
        return Ok(item);
    }

    let matches: Vec<&'a T> = items
        .iter()
        .copied()
        .filter(|item| id_of(item).starts_with(query) || alias(item))
        .collect();

    match matches.as_slice() {
        [item] => Ok(*item),
        [] => bail!("{} '{}' not found", kind, query),
        _ => bail!(
            "'{}' matches {} {}s; use a longer ID",
            query,
            matches.len(),
            kind.to_lowercase()
        ),
    }
}

/// Find a site by ID, ID prefix or name
pub fn resolve_site(manager: &SiteManager, query: &str) -> Result<Site> {
    let sites = manager.list_sites()?;
    let refs: Vec<&Site> = sites.iter().collect();
    let site = pick_unique("Site", query, &refs, |s| s.id.as_str(), |s| {
        s.name.eq_ignore_ascii_case(query)
    })?;
    Ok(site.clone())
}

/// Find a sitemap node by ID, ID prefix or URL
pub fn resolve_node<'a>(pages: &'a [SitemapNode], query: &str) -> Result<&'a SitemapNode> {
    let nodes: Vec<&SitemapNode> = tree::iter(pages).map(|(_, node)| node).collect();
    pick_unique("Page", query, &nodes, |n| n.id.as_str(), |n| n.url == query)
}

/// Find a content page by ID, ID prefix or URL
pub fn resolve_content_page<'a>(pages: &'a [ContentPage], query: &str) -> Result<&'a ContentPage> {
    let refs: Vec<&ContentPage> = pages.iter().collect();
    pick_unique("Content page", query, &refs, |p| p.id.as_str(), |p| p.url == query)
}

/// Run the CLI application
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    setup_logging(cli.verbose);

    // Handle color output
    if cli.no_color {
        colored::control::set_override(false);
    }

    let opts = GlobalOpts {
        config: cli.config,
        data_dir: cli.data_dir,
    };

    // Dispatch to command handler
    match cli.command {
        Commands::Init(args) => init::execute(args),
        Commands::Site(cmd) => site::execute(cmd, &opts),
        Commands::Sitemap(cmd) => sitemap::execute(cmd, &opts),
        Commands::Content(cmd) => content::execute(cmd, &opts),
        Commands::Export(args) => export::execute(args, &opts),
        Commands::Config(cmd) => config::execute(cmd, &opts),
    }
}

fn setup_logging(verbosity: u8) {
    use tracing_subscriber::EnvFilter;

    let filter = match verbosity {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parse() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_help_text() {
        let cmd = Cli::command();
        assert!(cmd.get_about().is_some());
    }

    #[test]
    fn test_short_id() {
        assert_eq!(short_id("0123456789abcdef"), "01234567");
        assert_eq!(short_id("abc"), "abc");
    }

    #[test]
    fn test_resolve_node_by_prefix_and_url() {
        let home = SitemapNode::new("Home", "/")
            .with_child(SitemapNode::new("About", "/about"));
        let pages = vec![home];
        let about_id = pages[0].children[0].id.clone();

        assert_eq!(resolve_node(&pages, "/about").unwrap().id, about_id);
        assert_eq!(
            resolve_node(&pages, &about_id.as_str()[..10]).unwrap().id,
            about_id
        );
        assert!(resolve_node(&pages, "/missing").is_err());
    }

    #[test]
    fn test_resolve_node_ambiguous_url() {
        let pages = vec![SitemapNode::new("A", "/dup"), SitemapNode::new("B", "/dup")];
        let err = resolve_node(&pages, "/dup").unwrap_err();
        assert!(err.to_string().contains("matches 2"));
    }

    #[test]
    fn test_data_dir_precedence() {
        let mut config = Config::default();
        config.storage.data_dir = Some(PathBuf::from("/from/config"));

        let opts = GlobalOpts {
            config: None,
            data_dir: Some(PathBuf::from("/from/flag")),
        };
        assert_eq!(opts.data_dir(&config), PathBuf::from("/from/flag"));

        let opts = GlobalOpts {
            config: None,
            data_dir: None,
        };
        assert_eq!(opts.data_dir(&config), PathBuf::from("/from/config"));
    }
}
