//! Site command
//!
//! Manage sites.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use super::{resolve_site, short_id, GlobalOpts};
use sitekit_core::manager::SiteManager;
use sitekit_core::site::{Site, SiteDraft};
use sitekit_core::sitemap::tree;

/// Editable site fields shared by `create` and `update`
#[derive(Debug, Default, Args)]
pub struct SiteFields {
    /// Development URL
    #[arg(long)]
    pub dev_url: Option<String>,

    /// Production URL (used as the export link when set)
    #[arg(long)]
    pub production_url: Option<String>,

    /// Free-form notes
    #[arg(long)]
    pub notes: Option<String>,

    /// Client name
    #[arg(long)]
    pub client: Option<String>,

    /// Hosting provider
    #[arg(long)]
    pub host: Option<String>,

    /// Custom host name, when host is "Other"
    #[arg(long)]
    pub custom_host: Option<String>,

    /// Theme or template name
    #[arg(long)]
    pub template: Option<String>,
}

impl SiteFields {
    /// Overwrite the fields given on the command line
    fn apply_to(self, mut draft: SiteDraft) -> SiteDraft {
        if let Some(v) = self.dev_url {
            draft.dev_url = v;
        }
        if let Some(v) = self.production_url {
            draft.production_url = v;
        }
        if let Some(v) = self.notes {
            draft.notes = v;
        }
        if let Some(v) = self.client {
            draft.client = v;
        }
        if let Some(v) = self.host {
            draft.host = v;
        }
        if self.custom_host.is_some() {
            draft.custom_host = self.custom_host;
        }
        if let Some(v) = self.template {
            draft.template = v;
        }
        draft
    }
}

/// Site subcommands
#[derive(Debug, Subcommand)]
pub enum SiteCommand {
    /// Create a new site
    Create {
        /// Site name
        name: String,

        #[command(flatten)]
        fields: SiteFields,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List all sites
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show site details
    Show {
        /// Site ID, ID prefix or name
        site: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Update a site
    Update {
        /// Site ID, ID prefix or name
        site: String,

        /// New site name
        #[arg(long)]
        name: Option<String>,

        #[command(flatten)]
        fields: SiteFields,
    },

    /// Delete a site with its sitemap and content
    Delete {
        /// Site ID, ID prefix or name
        site: String,

        /// Skip confirmation
        #[arg(long, short)]
        yes: bool,
    },
}

/// Execute the site command
pub fn execute(cmd: SiteCommand, opts: &GlobalOpts) -> Result<()> {
    let manager = opts.manager()?;

    match cmd {
        SiteCommand::Create { name, fields, json } => create_site(&manager, name, fields, json),
        SiteCommand::List { json } => list_sites(&manager, json),
        SiteCommand::Show { site, json } => show_site(&manager, &site, json),
        SiteCommand::Update { site, name, fields } => update_site(&manager, &site, name, fields),
        SiteCommand::Delete { site, yes } => delete_site(&manager, &site, yes),
    }
}

fn create_site(manager: &SiteManager, name: String, fields: SiteFields, as_json: bool) -> Result<()> {
    use colored::Colorize;

    let draft = fields.apply_to(SiteDraft::new(name));
    let site = manager.create_site(draft).context("Failed to create site")?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&site)?);
        return Ok(());
    }

    println!(
        "{} Created site {} ({})",
        "✓".green(),
        site.name.bold(),
        site.id.to_string().green()
    );
    Ok(())
}

fn list_sites(manager: &SiteManager, as_json: bool) -> Result<()> {
    use colored::Colorize;

    let sites = manager.list_sites()?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&sites)?);
        return Ok(());
    }

    if sites.is_empty() {
        println!("No sites found.");
        return Ok(());
    }

    println!("{}", "Sites:".bold().underline());
    println!();

    for site in &sites {
        let url = site.export_url("");
        println!(
            "  {} {} {}",
            short_id(site.id.as_str()).green(),
            site.name,
            url.dimmed()
        );
    }

    Ok(())
}

fn show_site(manager: &SiteManager, query: &str, as_json: bool) -> Result<()> {
    use colored::Colorize;

    let site = resolve_site(manager, query)?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&site)?);
        return Ok(());
    }

    println!("{}", "Site Details".bold().underline());
    println!();
    println!("  ID: {}", site.id.to_string().green());
    println!("  Name: {}", site.name);
    print_optional("Dev URL", &site.dev_url);
    print_optional("Production URL", &site.production_url);
    print_optional("Client", &site.client);
    print_optional("Host", host_label(&site));
    print_optional("Template", &site.template);
    print_optional("Notes", &site.notes);
    println!("  Created: {}", site.created_at.format("%Y-%m-%d %H:%M:%S"));
    println!("  Updated: {}", site.updated_at.format("%Y-%m-%d %H:%M:%S"));

    let page_count = manager
        .storage()
        .load_sitemap(&site.id)?
        .map(|sitemap| tree::count_nodes(&sitemap.pages))
        .unwrap_or(0);
    let content_pages = manager.content_pages(&site.id, None)?;
    let published = content_pages.iter().filter(|p| p.is_published()).count();

    println!();
    println!("{}", "Pages".bold());
    println!(
        "  Sitemap: {}",
        page_count.to_string().cyan()
    );
    println!(
        "  Content: {} ({} published)",
        content_pages.len().to_string().cyan(),
        published.to_string().green()
    );

    Ok(())
}

fn host_label(site: &Site) -> &str {
    match (&site.custom_host, site.host.as_str()) {
        (Some(custom), "Other") if !custom.is_empty() => custom.as_str(),
        (_, host) => host,
    }
}

fn print_optional(label: &str, value: &str) {
    if !value.is_empty() {
        println!("  {}: {}", label, value);
    }
}

fn update_site(
    manager: &SiteManager,
    query: &str,
    name: Option<String>,
    fields: SiteFields,
) -> Result<()> {
    use colored::Colorize;

    let site = resolve_site(manager, query)?;
    let mut draft = fields.apply_to(site.to_draft());
    if let Some(name) = name {
        draft.name = name;
    }

    let site = manager
        .update_site(&site.id, draft)
        .context("Failed to update site")?;
    println!("{} Updated site {}", "✓".green(), site.name.bold());
    Ok(())
}

fn delete_site(manager: &SiteManager, query: &str, yes: bool) -> Result<()> {
    use colored::Colorize;

    let site = resolve_site(manager, query)?;

    if !yes {
        use dialoguer::Confirm;

        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Delete site '{}' with its sitemap and content pages?",
                site.name
            ))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("Delete cancelled.");
            return Ok(());
        }
    }

    manager.delete_site(&site.id)?;
    println!("{} Deleted site {}", "✓".green(), site.name);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields_only_override_given_values() {
        let draft = SiteDraft::new("Acme").dev_url("https://dev.acme.test").notes("keep");
        let fields = SiteFields {
            production_url: Some("https://acme.test".to_string()),
            ..SiteFields::default()
        };

        let draft = fields.apply_to(draft);
        assert_eq!(draft.dev_url, "https://dev.acme.test");
        assert_eq!(draft.production_url, "https://acme.test");
        assert_eq!(draft.notes, "keep");
    }

    #[test]
    fn test_host_label_prefers_custom_for_other() {
        let mut site = Site::new(SiteDraft::new("Acme"));
        site.host = "Other".to_string();
        site.custom_host = Some("My VPS".to_string());
        assert_eq!(host_label(&site), "My VPS");

        site.host = "Kinsta".to_string();
        assert_eq!(host_label(&site), "Kinsta");
    }
}
