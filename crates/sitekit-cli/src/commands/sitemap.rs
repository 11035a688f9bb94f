//! Sitemap command
//!
//! Edit the page tree of a site.

use anyhow::{Context, Result};
use clap::Subcommand;
use std::collections::HashSet;

use super::{resolve_content_page, resolve_node, resolve_site, short_id, GlobalOpts, PositionArg};
use sitekit_core::manager::{LinkOutcome, SiteManager};
use sitekit_core::sitemap::{tree, NodeUpdate, SitemapNode};
use sitekit_core::types::{ContentPageId, NodeId, SiteId};

/// Sitemap subcommands
#[derive(Debug, Subcommand)]
pub enum SitemapCommand {
    /// Print the page tree
    Show {
        /// Site ID, ID prefix or name
        site: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Add a page
    Add {
        /// Site ID, ID prefix or name
        site: String,

        /// Page title
        title: String,

        /// Page URL
        url: String,

        /// Page to insert relative to (ID, ID prefix or URL); root level if omitted
        #[arg(long, short)]
        target: Option<String>,

        /// Where to insert relative to the target
        #[arg(long, short, value_enum, default_value = "after")]
        position: PositionArg,

        /// Content page to link (ID, ID prefix or URL)
        #[arg(long)]
        link: Option<String>,
    },

    /// Edit a page
    Edit {
        /// Site ID, ID prefix or name
        site: String,

        /// Page ID, ID prefix or URL
        page: String,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New URL
        #[arg(long)]
        url: Option<String>,

        /// Content page to link (ID, ID prefix or URL)
        #[arg(long, conflicts_with = "unlink")]
        link: Option<String>,

        /// Remove the content page link
        #[arg(long)]
        unlink: bool,
    },

    /// Remove a page and everything below it
    Remove {
        /// Site ID, ID prefix or name
        site: String,

        /// Page ID, ID prefix or URL
        page: String,
    },

    /// Move a page (with its subtree)
    Move {
        /// Site ID, ID prefix or name
        site: String,

        /// Page ID, ID prefix or URL
        page: String,

        /// Page to move relative to; end of the root level if omitted
        #[arg(long, short)]
        target: Option<String>,

        /// Where to move relative to the target
        #[arg(long, short, value_enum, default_value = "after")]
        position: PositionArg,
    },

    /// Add a content page to the sitemap as a root-level page
    Link {
        /// Site ID, ID prefix or name
        site: String,

        /// Content page ID, ID prefix or URL
        content_page: String,
    },

    /// List pages linking content pages that no longer exist
    Check {
        /// Site ID, ID prefix or name
        site: String,
    },
}

/// Execute the sitemap command
pub fn execute(cmd: SitemapCommand, opts: &GlobalOpts) -> Result<()> {
    let manager = opts.manager()?;

    match cmd {
        SitemapCommand::Show { site, json } => show_sitemap(&manager, &site, json),
        SitemapCommand::Add {
            site,
            title,
            url,
            target,
            position,
            link,
        } => add_page(&manager, &site, title, url, target, position, link),
        SitemapCommand::Edit {
            site,
            page,
            title,
            url,
            link,
            unlink,
        } => edit_page(&manager, &site, &page, title, url, link, unlink),
        SitemapCommand::Remove { site, page } => remove_page(&manager, &site, &page),
        SitemapCommand::Move {
            site,
            page,
            target,
            position,
        } => move_page(&manager, &site, &page, target, position),
        SitemapCommand::Link { site, content_page } => link_page(&manager, &site, &content_page),
        SitemapCommand::Check { site } => check_links(&manager, &site),
    }
}

/// Render the forest with box-drawing prefixes, one line per node
///
/// Linked nodes are marked `*`; nodes whose content page is missing are
/// marked `!`.
pub fn render_tree(pages: &[SitemapNode], existing: &HashSet<ContentPageId>) -> Vec<String> {
    let mut lines = Vec::new();
    render_level(pages, "", existing, &mut lines);
    lines
}

fn render_level(
    nodes: &[SitemapNode],
    prefix: &str,
    existing: &HashSet<ContentPageId>,
    lines: &mut Vec<String>,
) {
    for (index, node) in nodes.iter().enumerate() {
        let last = index + 1 == nodes.len();
        let branch = if last { "└── " } else { "├── " };
        let marker = match &node.content_page_id {
            Some(id) if existing.contains(id) => " *",
            Some(_) => " !",
            None => "",
        };

        lines.push(format!(
            "{}{}{} {}{} [{}]",
            prefix,
            branch,
            node.title,
            node.url,
            marker,
            short_id(node.id.as_str())
        ));

        let child_prefix = format!("{}{}", prefix, if last { "    " } else { "│   " });
        render_level(&node.children, &child_prefix, existing, lines);
    }
}

fn existing_content(manager: &SiteManager, site: &SiteId) -> Result<HashSet<ContentPageId>> {
    Ok(manager
        .content_pages(site, None)?
        .into_iter()
        .map(|page| page.id)
        .collect())
}

fn show_sitemap(manager: &SiteManager, query: &str, as_json: bool) -> Result<()> {
    use colored::Colorize;

    let site = resolve_site(manager, query)?;
    let sitemap = manager.sitemap(&site.id)?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&sitemap)?);
        return Ok(());
    }

    println!("{} {}", "Sitemap:".bold().underline(), site.name.bold());
    println!();

    if sitemap.is_empty() {
        println!("  No pages yet. Add one with '{}'.", "sitekit sitemap add".cyan());
        return Ok(());
    }

    let existing = existing_content(manager, &site.id)?;
    for line in render_tree(&sitemap.pages, &existing) {
        println!("  {}", line);
    }

    println!();
    println!(
        "  {}",
        "* linked to content   ! linked content is missing".dimmed()
    );
    Ok(())
}

/// Titles from the root down to the node, joined with `›`
pub fn breadcrumb(pages: &[SitemapNode], id: &NodeId) -> Option<String> {
    let path = tree::find_path(pages, id)?;
    Some(
        path.iter()
            .map(|node| node.title.as_str())
            .collect::<Vec<_>>()
            .join(" › "),
    )
}

/// Tell the user when other pages already link the same content page
fn warn_shared_link(pages: &[SitemapNode], content_page_id: &ContentPageId, node_id: &NodeId) {
    use colored::Colorize;

    let others = SiteManager::other_links(pages, content_page_id, node_id);
    if others.is_empty() {
        return;
    }

    eprintln!("{} Content page is already linked by:", "⚠".yellow());
    for node in others {
        eprintln!(
            "    {} {} [{}]",
            node.title,
            node.url.dimmed(),
            short_id(node.id.as_str())
        );
    }
}

fn lookup_content_page(
    manager: &SiteManager,
    site: &SiteId,
    query: &str,
) -> Result<ContentPageId> {
    let pages = manager.content_pages(site, None)?;
    Ok(resolve_content_page(&pages, query)?.id.clone())
}

fn lookup_node(manager: &SiteManager, site: &SiteId, query: &str) -> Result<NodeId> {
    let sitemap = manager.sitemap(site)?;
    Ok(resolve_node(&sitemap.pages, query)?.id.clone())
}

fn add_page(
    manager: &SiteManager,
    query: &str,
    title: String,
    url: String,
    target: Option<String>,
    position: PositionArg,
    link: Option<String>,
) -> Result<()> {
    use colored::Colorize;

    let site = resolve_site(manager, query)?;
    let target = target
        .map(|t| lookup_node(manager, &site.id, &t))
        .transpose()?;

    let mut node = SitemapNode::new(title, url);
    if let Some(link) = link {
        node = node.with_content_page(lookup_content_page(manager, &site.id, &link)?);
    }
    let node_id = node.id.clone();
    let content_page_id = node.content_page_id.clone();

    let sitemap = manager
        .add_page(&site.id, node, target.as_ref(), position.into())
        .context("Failed to add page")?;

    println!(
        "{} Added page {}",
        "✓".green(),
        node_id.to_string().green()
    );
    if let Some(path) = breadcrumb(&sitemap.pages, &node_id) {
        println!("  {}", path.dimmed());
    }
    if let Some(content_page_id) = content_page_id {
        warn_shared_link(&sitemap.pages, &content_page_id, &node_id);
    }
    Ok(())
}

fn edit_page(
    manager: &SiteManager,
    query: &str,
    page: &str,
    title: Option<String>,
    url: Option<String>,
    link: Option<String>,
    unlink: bool,
) -> Result<()> {
    use colored::Colorize;

    let site = resolve_site(manager, query)?;
    let node_id = lookup_node(manager, &site.id, page)?;

    let mut update = NodeUpdate::default();
    if let Some(title) = title {
        update = update.title(title);
    }
    if let Some(url) = url {
        update = update.url(url);
    }
    if let Some(link) = link {
        update = update.link(lookup_content_page(manager, &site.id, &link)?);
    }
    if unlink {
        update = update.unlink();
    }

    if update.is_empty() {
        eprintln!("{} Nothing to change.", "⚠".yellow());
        return Ok(());
    }

    let sitemap = manager
        .update_page(&site.id, &node_id, &update)
        .context("Failed to update page")?;
    println!("{} Updated page {}", "✓".green(), short_id(node_id.as_str()));
    if let Some(Some(content_page_id)) = &update.content_page_id {
        warn_shared_link(&sitemap.pages, content_page_id, &node_id);
    }
    Ok(())
}

fn remove_page(manager: &SiteManager, query: &str, page: &str) -> Result<()> {
    use colored::Colorize;

    let site = resolve_site(manager, query)?;
    let node_id = lookup_node(manager, &site.id, page)?;

    manager.remove_page(&site.id, &node_id)?;
    println!("{} Removed page {}", "✓".green(), short_id(node_id.as_str()));
    Ok(())
}

fn move_page(
    manager: &SiteManager,
    query: &str,
    page: &str,
    target: Option<String>,
    position: PositionArg,
) -> Result<()> {
    use colored::Colorize;

    let site = resolve_site(manager, query)?;
    let node_id = lookup_node(manager, &site.id, page)?;
    let target = target
        .map(|t| lookup_node(manager, &site.id, &t))
        .transpose()?;

    let sitemap = manager.move_page(&site.id, &node_id, target.as_ref(), position.into())?;
    println!("{} Moved page {}", "✓".green(), short_id(node_id.as_str()));
    if let Some(path) = breadcrumb(&sitemap.pages, &node_id) {
        println!("  {}", path.dimmed());
    }
    Ok(())
}

fn link_page(manager: &SiteManager, query: &str, content_page: &str) -> Result<()> {
    use colored::Colorize;

    let site = resolve_site(manager, query)?;
    let content_page_id = lookup_content_page(manager, &site.id, content_page)?;

    match manager.link_content_page(&site.id, &content_page_id)? {
        LinkOutcome::Linked(node_id) => println!(
            "{} Added page {} to the sitemap",
            "✓".green(),
            node_id.to_string().green()
        ),
        LinkOutcome::AlreadyLinked => eprintln!(
            "{} Content page is already in the sitemap.",
            "⚠".yellow()
        ),
    }
    Ok(())
}

fn check_links(manager: &SiteManager, query: &str) -> Result<()> {
    use colored::Colorize;

    let site = resolve_site(manager, query)?;
    let dangling = manager.dangling_links(&site.id)?;

    if dangling.is_empty() {
        println!("{} All linked content pages exist.", "✓".green());
        return Ok(());
    }

    println!(
        "{} {} page(s) link missing content:",
        "⚠".yellow(),
        dangling.len()
    );
    for node in &dangling {
        println!(
            "  {} {} {}",
            short_id(node.id.as_str()).yellow(),
            node.title,
            node.url.dimmed()
        );
    }
    Ok(())
}
