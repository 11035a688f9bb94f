//! Content command
//!
//! Manage content pages. Rich-text editing happens in an external editor;
//! its rendered HTML (and optionally its structured payload) is read from files.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};

use super::{resolve_content_page, resolve_site, short_id, GlobalOpts, StatusArg};
use sitekit_core::content::{ContentPage, ContentPageDraft};
use sitekit_core::manager::SiteManager;
use sitekit_core::sitemap::tree;
use sitekit_core::types::SiteId;

/// Optional content fields shared by `create` and `update`
#[derive(Debug, Default, Args)]
pub struct ContentFields {
    /// Meta description (also used as the WordPress excerpt)
    #[arg(long)]
    pub meta_description: Option<String>,

    /// File holding the rendered HTML body
    #[arg(long)]
    pub html_file: Option<PathBuf>,

    /// File holding the editor's structured payload
    #[arg(long)]
    pub content_file: Option<PathBuf>,

    /// Publication status
    #[arg(long, value_enum)]
    pub status: Option<StatusArg>,
}

impl ContentFields {
    /// Overwrite the fields given on the command line
    fn apply_to(self, mut draft: ContentPageDraft) -> Result<ContentPageDraft> {
        if let Some(description) = self.meta_description {
            draft.meta_description = Some(description);
        }
        if let Some(path) = self.html_file {
            draft.content_html = Some(read_file(&path)?);
        }
        if let Some(path) = self.content_file {
            draft.content = Some(read_file(&path)?);
        }
        if let Some(status) = self.status {
            draft.status = status.into();
        }
        Ok(draft)
    }
}

fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Content subcommands
#[derive(Debug, Subcommand)]
pub enum ContentCommand {
    /// Create a content page
    Create {
        /// Site ID, ID prefix or name
        site: String,

        /// Page title
        #[arg(long)]
        title: String,

        /// Page URL
        #[arg(long)]
        url: String,

        #[command(flatten)]
        fields: ContentFields,

        /// Also add the page to the sitemap
        #[arg(long)]
        link: bool,
    },

    /// List content pages
    List {
        /// Site ID, ID prefix or name
        site: String,

        /// Only pages with this status
        #[arg(long, value_enum)]
        status: Option<StatusArg>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a content page
    Show {
        /// Site ID, ID prefix or name
        site: String,

        /// Content page ID, ID prefix or URL
        page: String,

        /// Print the rendered HTML body
        #[arg(long)]
        html: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Update a content page
    Update {
        /// Site ID, ID prefix or name
        site: String,

        /// Content page ID, ID prefix or URL
        page: String,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New URL
        #[arg(long)]
        url: Option<String>,

        #[command(flatten)]
        fields: ContentFields,
    },

    /// Delete a content page (sitemap pages keep their link)
    Delete {
        /// Site ID, ID prefix or name
        site: String,

        /// Content page ID, ID prefix or URL
        page: String,

        /// Skip confirmation
        #[arg(long, short)]
        yes: bool,
    },
}

/// Execute the content command
pub fn execute(cmd: ContentCommand, opts: &GlobalOpts) -> Result<()> {
    let manager = opts.manager()?;

    match cmd {
        ContentCommand::Create {
            site,
            title,
            url,
            fields,
            link,
        } => create_page(&manager, &site, title, url, fields, link),
        ContentCommand::List { site, status, json } => list_pages(&manager, &site, status, json),
        ContentCommand::Show {
            site,
            page,
            html,
            json,
        } => show_page(&manager, &site, &page, html, json),
        ContentCommand::Update {
            site,
            page,
            title,
            url,
            fields,
        } => update_page(&manager, &site, &page, title, url, fields),
        ContentCommand::Delete { site, page, yes } => delete_page(&manager, &site, &page, yes),
    }
}

fn find_page(manager: &SiteManager, site: &SiteId, query: &str) -> Result<ContentPage> {
    let pages = manager.content_pages(site, None)?;
    Ok(resolve_content_page(&pages, query)?.clone())
}

fn create_page(
    manager: &SiteManager,
    query: &str,
    title: String,
    url: String,
    fields: ContentFields,
    link: bool,
) -> Result<()> {
    use colored::Colorize;

    let site = resolve_site(manager, query)?;
    let draft = fields.apply_to(ContentPageDraft::new(title, url))?;
    let page = manager
        .create_content_page(&site.id, draft)
        .context("Failed to create content page")?;

    println!(
        "{} Created content page {} ({})",
        "✓".green(),
        page.url.bold(),
        page.id.to_string().green()
    );

    if link {
        manager.link_content_page(&site.id, &page.id)?;
        println!("{} Added to the sitemap", "✓".green());
    }
    Ok(())
}

fn list_pages(
    manager: &SiteManager,
    query: &str,
    status: Option<StatusArg>,
    as_json: bool,
) -> Result<()> {
    use colored::Colorize;

    let site = resolve_site(manager, query)?;
    let pages = manager.content_pages(&site.id, status.map(Into::into))?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&pages)?);
        return Ok(());
    }

    if pages.is_empty() {
        println!("No content pages found.");
        return Ok(());
    }

    println!("{}", "Content pages:".bold().underline());
    println!();

    for page in &pages {
        let status = if page.is_published() {
            page.status.as_str().green()
        } else {
            page.status.as_str().yellow()
        };
        println!(
            "  {} {} {} ({})",
            short_id(page.id.as_str()).green(),
            page.url.cyan(),
            page.title,
            status
        );
    }

    Ok(())
}

fn show_page(
    manager: &SiteManager,
    query: &str,
    page: &str,
    html: bool,
    as_json: bool,
) -> Result<()> {
    use colored::Colorize;

    let site = resolve_site(manager, query)?;
    let page = find_page(manager, &site.id, page)?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&page)?);
        return Ok(());
    }

    if html {
        println!("{}", page.content_html.as_deref().unwrap_or_default());
        return Ok(());
    }

    let linked = manager
        .storage()
        .load_sitemap(&site.id)?
        .map(|sitemap| tree::has_linked_content(&sitemap.pages, &page.id))
        .unwrap_or(false);

    println!("{}", "Content Page".bold().underline());
    println!();
    println!("  ID: {}", page.id.to_string().green());
    println!("  Title: {}", page.title);
    println!("  URL: {}", page.url.cyan());
    println!("  Status: {}", page.status);
    if let Some(description) = &page.meta_description {
        println!("  Meta description: {}", description);
    }
    println!(
        "  Body: {} bytes of HTML",
        page.content_html.as_deref().map(str::len).unwrap_or(0)
    );
    println!("  In sitemap: {}", if linked { "yes" } else { "no" });
    println!("  Created: {}", page.created_at.format("%Y-%m-%d %H:%M:%S"));
    println!("  Updated: {}", page.updated_at.format("%Y-%m-%d %H:%M:%S"));
    Ok(())
}

fn update_page(
    manager: &SiteManager,
    query: &str,
    page: &str,
    title: Option<String>,
    url: Option<String>,
    fields: ContentFields,
) -> Result<()> {
    use colored::Colorize;

    let site = resolve_site(manager, query)?;
    let page = find_page(manager, &site.id, page)?;

    let mut draft = fields.apply_to(page.to_draft())?;
    if let Some(title) = title {
        draft.title = title;
    }
    if let Some(url) = url {
        draft.url = url;
    }

    let page = manager
        .update_content_page(&site.id, &page.id, draft)
        .context("Failed to update content page")?;
    println!("{} Updated content page {}", "✓".green(), page.url.bold());
    Ok(())
}

fn delete_page(manager: &SiteManager, query: &str, page: &str, yes: bool) -> Result<()> {
    use colored::Colorize;

    let site = resolve_site(manager, query)?;
    let page = find_page(manager, &site.id, page)?;

    if !yes {
        use dialoguer::Confirm;

        let confirmed = Confirm::new()
            .with_prompt(format!("Delete content page '{}'?", page.url))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("Delete cancelled.");
            return Ok(());
        }
    }

    manager.delete_content_page(&site.id, &page.id)?;
    println!("{} Deleted content page {}", "✓".green(), page.url);

    let dangling = manager.dangling_links(&site.id)?;
    if !dangling.is_empty() {
        eprintln!(
            "{} {} sitemap page(s) still link it. Run '{}' to review.",
            "⚠".yellow(),
            dangling.len(),
            "sitekit sitemap check".cyan()
        );
    }
    Ok(())
}
