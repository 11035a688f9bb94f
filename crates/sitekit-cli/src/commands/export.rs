//! Export command
//!
//! Export a site for the WordPress importer, or as a raw backup.

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use std::io::Write;
use std::path::{Path, PathBuf};

use super::{resolve_site, GlobalOpts};
use sitekit_core::export::{ExportPreview, SiteBackup};

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// WordPress eXtended RSS, for Tools > Import > WordPress
    Wxr,
    /// Pretty-printed JSON
    Json,
    /// Single-line JSON
    JsonCompact,
    /// Raw dump of the site, its sitemap and its content pages
    Backup,
}

impl ExportFormat {
    /// Name registered with the export manager
    pub fn name(&self) -> &'static str {
        match self {
            ExportFormat::Wxr => "wxr",
            ExportFormat::Json => "json",
            ExportFormat::JsonCompact => "json-compact",
            ExportFormat::Backup => "backup",
        }
    }
}

/// Arguments for the export command
#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Site ID, ID prefix or name
    pub site: String,

    /// Export format (defaults to the configured one)
    #[arg(long, short, value_enum)]
    pub format: Option<ExportFormat>,

    /// Output file or directory (default: `<Site_Name>_wordpress_export.<ext>` in the current directory)
    #[arg(long, short, conflicts_with = "stdout")]
    pub output: Option<PathBuf>,

    /// Write to stdout instead of a file
    #[arg(long)]
    pub stdout: bool,

    /// Print page statistics before exporting
    #[arg(long)]
    pub stats: bool,
}

/// Execute the export command
pub fn execute(args: ExportArgs, opts: &GlobalOpts) -> Result<()> {
    use colored::Colorize;

    let manager = opts.manager()?;
    let site = resolve_site(&manager, &args.site)?;

    let format = match args.format {
        Some(format) => format.name().to_string(),
        None => manager.export_config().default_format.clone(),
    };

    if args.stats {
        print_preview(&manager.preview(&site.id)?);
    }

    let is_backup = format == ExportFormat::Backup.name();

    if args.stdout {
        let content = if is_backup {
            manager.backup(&site.id)?.to_json()?
        } else {
            manager
                .export(&site.id, &format)
                .with_context(|| format!("Failed to export {}", site.name))?
        };
        std::io::stdout()
            .write_all(content.as_bytes())
            .context("Failed to write to stdout")?;
        return Ok(());
    }

    let written = if is_backup {
        let path = output_path(args.output.as_deref(), &SiteBackup::file_name(&site.name));
        manager
            .backup(&site.id)?
            .write_to(&path)
            .with_context(|| format!("Failed to write to {}", path.display()))?;
        path
    } else {
        let file_name = manager.exporters().file_name(&site.name, &format)?;
        let path = output_path(args.output.as_deref(), &file_name);
        manager
            .export_to_file(&site.id, &format, &path)
            .with_context(|| format!("Failed to export {} to {}", site.name, path.display()))?
    };

    eprintln!(
        "{} Exported {} as {} to {}",
        "✓".green(),
        site.name.bold(),
        format.cyan(),
        written.display()
    );
    Ok(())
}

/// Resolve `--output`: a directory receives the default file name
fn output_path(output: Option<&Path>, file_name: &str) -> PathBuf {
    match output {
        Some(path) if path.is_dir() => path.join(file_name),
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(file_name),
    }
}

fn print_preview(preview: &ExportPreview) {
    use colored::Colorize;

    eprintln!("{}", "Export preview".bold().underline());
    eprintln!("  Site: {} ({})", preview.site.name, preview.site.url.dimmed());
    eprintln!(
        "  Pages: {} ({} published, {} draft)",
        preview.stats.total_pages.to_string().cyan(),
        preview.stats.published_pages.to_string().green(),
        preview.stats.draft_pages.to_string().yellow()
    );
    eprintln!(
        "  With content: {}",
        preview.stats.pages_with_content.to_string().cyan()
    );
    if !preview.has_sitemap {
        eprintln!("  {} The sitemap is empty.", "⚠".yellow());
    }
    if !preview.has_content {
        eprintln!("  {} No content pages yet.", "⚠".yellow());
    }
    eprintln!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_format_values() {
        assert!(ExportFormat::from_str("wxr", true).is_ok());
        assert!(ExportFormat::from_str("json", true).is_ok());
        assert!(ExportFormat::from_str("json-compact", true).is_ok());
        assert!(ExportFormat::from_str("backup", true).is_ok());
        assert!(ExportFormat::from_str("markdown", true).is_err());
    }

    #[test]
    fn test_format_names_match_value_names() {
        for format in ExportFormat::value_variants() {
            let value = format.to_possible_value().unwrap();
            assert_eq!(value.get_name(), format.name());
        }
    }

    #[test]
    fn test_output_path() {
        let temp = tempfile::tempdir().unwrap();

        assert_eq!(
            output_path(None, "Acme_wordpress_export.xml"),
            PathBuf::from("Acme_wordpress_export.xml")
        );
        assert_eq!(
            output_path(Some(temp.path()), "Acme_wordpress_export.xml"),
            temp.path().join("Acme_wordpress_export.xml")
        );
        assert_eq!(
            output_path(Some(Path::new("out/site.xml")), "Acme_wordpress_export.xml"),
            PathBuf::from("out/site.xml")
        );
    }
}
