//! Init command
//!
//! Initialize sitekit configuration in a project directory.

use anyhow::{Context, Result};
use clap::Args;
use std::fs;
use std::path::{Path, PathBuf};

use super::PROJECT_DIR;
use sitekit_core::config::Config;

/// Arguments for the init command
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Force overwrite existing configuration
    #[arg(long)]
    pub force: bool,

    /// Directory to initialize (default: current directory)
    #[arg(long)]
    pub path: Option<PathBuf>,

    /// Keep data in the platform data directory instead of the project
    #[arg(long)]
    pub global_data: bool,
}

/// Execute the init command
pub fn execute(args: InitArgs) -> Result<()> {
    use colored::Colorize;

    let project_dir = args
        .path
        .clone()
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));

    println!("Initializing sitekit in {}...", project_dir.display());

    // Check if already initialized
    let sitekit_dir = project_dir.join(PROJECT_DIR);
    if sitekit_dir.exists() && !args.force {
        eprintln!(
            "{} sitekit already initialized. Use --force to reinitialize.",
            "⚠".yellow()
        );
        return Ok(());
    }

    let data_dir = sitekit_dir.join("data");
    fs::create_dir_all(&data_dir)
        .with_context(|| format!("Failed to create {}", data_dir.display()))?;
    println!("{} Created {}/ directory", "✓".green(), PROJECT_DIR);

    let config = generate_config(&data_dir, args.global_data)?;
    let config_path = sitekit_dir.join("config.toml");
    fs::write(&config_path, config).context("Failed to write config.toml")?;
    println!("{} Generated config.toml", "✓".green());

    if project_dir.join(".git").exists() {
        update_gitignore(&project_dir)?;
        println!("{} Updated .gitignore", "✓".green());
    }

    println!("\n{}", "Next steps:".bold());
    println!("  1. Review {}/config.toml (author, language, fallback URL)", PROJECT_DIR);
    println!("  2. Create your first site:");
    println!("     ");
    println!("     {}", "sitekit site create \"My Site\"".cyan());
    println!("     ");
    println!("  3. Plan its pages and export:");
    println!("     ");
    println!("     {}", "sitekit sitemap add \"My Site\" Home /".cyan());
    println!("     {}", "sitekit export \"My Site\" --format wxr".cyan());

    Ok(())
}

fn generate_config(data_dir: &Path, global_data: bool) -> Result<String> {
    let mut config = Config::default();
    if !global_data {
        let data_dir = data_dir
            .canonicalize()
            .unwrap_or_else(|_| data_dir.to_path_buf());
        config.storage.data_dir = Some(data_dir);
    }

    Ok(format!("# sitekit configuration\n\n{}", config.to_toml()?))
}

fn update_gitignore(project_dir: &Path) -> Result<()> {
    let gitignore_path = project_dir.join(".gitignore");
    let entries = "\n# sitekit\n.sitekit/data/\n";

    if gitignore_path.exists() {
        let content = fs::read_to_string(&gitignore_path)?;
        if !content.contains(".sitekit/data/") {
            let mut file = fs::OpenOptions::new()
                .append(true)
                .open(&gitignore_path)?;
            use std::io::Write;
            file.write_all(entries.as_bytes())?;
        }
    } else {
        fs::write(&gitignore_path, entries)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_config_points_at_project_data() {
        let temp = tempfile::tempdir().unwrap();
        let data_dir = temp.path().join("data");
        fs::create_dir_all(&data_dir).unwrap();

        let text = generate_config(&data_dir, false).unwrap();
        let config = Config::from_toml(&text).unwrap();

        assert_eq!(
            config.storage.data_dir,
            Some(data_dir.canonicalize().unwrap())
        );
        assert_eq!(config.export.default_format, "wxr");
    }

    #[test]
    fn test_generate_config_global_data() {
        let temp = tempfile::tempdir().unwrap();
        let text = generate_config(temp.path(), true).unwrap();
        assert!(Config::from_toml(&text).unwrap().storage.data_dir.is_none());
    }

    #[test]
    fn test_update_gitignore_is_idempotent() {
        let temp = tempfile::tempdir().unwrap();
        fs::write(temp.path().join(".gitignore"), "target/\n").unwrap();

        update_gitignore(temp.path()).unwrap();
        update_gitignore(temp.path()).unwrap();

        let content = fs::read_to_string(temp.path().join(".gitignore")).unwrap();
        assert_eq!(content.matches(".sitekit/data/").count(), 1);
        assert!(content.starts_with("target/"));
    }
}
