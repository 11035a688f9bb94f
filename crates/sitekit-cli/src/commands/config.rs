//! Config command
//!
//! Manage sitekit configuration.

use anyhow::{Context, Result};
use clap::Subcommand;
use std::fs;

use super::GlobalOpts;
use sitekit_core::config::Config;
use sitekit_core::export::ExportManager;

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Show as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the configuration file path
    Path,

    /// Reset to default configuration
    Reset {
        /// Force reset without confirmation
        #[arg(long)]
        force: bool,
    },

    /// Validate configuration
    Validate,
}

/// Execute the config command
pub fn execute(cmd: ConfigCommand, opts: &GlobalOpts) -> Result<()> {
    match cmd {
        ConfigCommand::Show { json } => show_config(opts, json),
        ConfigCommand::Path => {
            println!("{}", opts.config_path().display());
            Ok(())
        }
        ConfigCommand::Reset { force } => reset_config(opts, force),
        ConfigCommand::Validate => validate_config(opts),
    }
}

fn show_config(opts: &GlobalOpts, as_json: bool) -> Result<()> {
    use colored::Colorize;

    let config_path = opts.config_path();
    let config = opts.load_config()?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    println!("{}", "Configuration:".bold().underline());
    if config_path.exists() {
        println!("{}", config_path.display().to_string().dimmed());
    } else {
        println!(
            "{}",
            format!("{} not found, showing defaults", config_path.display()).dimmed()
        );
    }
    println!();
    println!("{}", config.to_toml()?);
    println!(
        "{} {}",
        "Data directory:".bold(),
        opts.data_dir(&config).display()
    );

    Ok(())
}

fn reset_config(opts: &GlobalOpts, force: bool) -> Result<()> {
    use colored::Colorize;

    let config_path = opts.config_path();

    if !force {
        use dialoguer::Confirm;

        let confirmed = Confirm::new()
            .with_prompt("Reset configuration to defaults?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("Reset cancelled.");
            return Ok(());
        }
    }

    // Backup existing
    let mut config = Config::default();
    if config_path.exists() {
        let backup_path = format!(
            "{}.backup-{}",
            config_path.display(),
            chrono::Local::now().format("%Y%m%d-%H%M%S")
        );
        fs::copy(&config_path, &backup_path)?;
        println!("{} Backed up to {}", "✓".green(), backup_path);

        // Keep the data directory so existing sites stay reachable
        if let Ok(old) = Config::load(&config_path) {
            config.storage = old.storage;
        }
    }

    if let Some(parent) = config_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(&config_path, config.to_toml()?)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    println!("{} Configuration reset to defaults.", "✓".green());
    Ok(())
}

/// Problems that do not stop the config from loading
fn config_warnings(config: &Config) -> Vec<String> {
    let mut warnings = Vec::new();
    let exporters = ExportManager::new();

    if config.export.default_format != "backup"
        && !exporters.has_format(&config.export.default_format)
    {
        warnings.push(format!(
            "export.default_format '{}' is not one of: {}, backup",
            config.export.default_format,
            exporters.available_formats().join(", ")
        ));
    }
    if !config.export.fallback_url.starts_with("http://")
        && !config.export.fallback_url.starts_with("https://")
    {
        warnings.push(format!(
            "export.fallback_url '{}' is not an http(s) URL",
            config.export.fallback_url
        ));
    }
    if config.export.author.trim().is_empty() {
        warnings.push("export.author is empty".to_string());
    }

    warnings
}

fn validate_config(opts: &GlobalOpts) -> Result<()> {
    use colored::Colorize;

    let config_path = opts.config_path();

    if !config_path.exists() {
        eprintln!(
            "{} Configuration not found at {}",
            "✗".red(),
            config_path.display()
        );
        return Ok(());
    }

    let content = fs::read_to_string(&config_path)?;
    let config = match Config::from_toml(&content) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} Invalid configuration: {}", "✗".red(), e);
            return Ok(());
        }
    };
    println!("{} Configuration is valid TOML", "✓".green());

    let warnings = config_warnings(&config);
    if warnings.is_empty() {
        println!("{} All settings look good", "✓".green());
    } else {
        for warning in warnings {
            println!("{} {}", "⚠".yellow(), warning);
        }
    }

    Ok(())
}
