//! Site manager: CRUD over sites, sitemaps and content pages, plus export

use crate::config::ExportConfig;
use crate::content::{ContentPage, ContentPageDraft, ContentStatus, ContentValidator};
use crate::error::{Result, SitekitError};
use crate::export::{
    ExportAssembler, ExportData, ExportManager, ExportPreview, ExportStats, PreviewSite,
    SiteBackup,
};
use crate::site::{Site, SiteDraft};
use crate::sitemap::{mutator, tree, InsertPosition, NodeUpdate, Sitemap, SitemapNode};
use crate::storage::SiteStorage;
use crate::types::{ContentPageId, NodeId, SiteId};
use chrono::Utc;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Result of linking a content page into the sitemap
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkOutcome {
    /// A new root node was created for the page
    Linked(NodeId),
    /// Some node already links the page; the tree was left alone
    AlreadyLinked,
}

/// Manager for site lifecycle and sitemap edits
///
/// Every mutating call loads the current record, applies the change and
/// writes the whole record back. There is no locking; the last write wins.
pub struct SiteManager {
    /// Storage backend
    storage: Arc<dyn SiteStorage>,
    export_config: ExportConfig,
    exporters: ExportManager,
}

impl SiteManager {
    /// Create a new site manager with the given storage
    pub fn new(storage: impl SiteStorage + 'static) -> Self {
        Self::with_storage(Arc::new(storage))
    }

    /// Create a new site manager with shared storage
    pub fn with_storage(storage: Arc<dyn SiteStorage>) -> Self {
        let export_config = ExportConfig::default();
        let exporters = ExportManager::with_generator(export_config.generator.clone());
        Self {
            storage,
            export_config,
            exporters,
        }
    }

    /// Use the given export settings
    pub fn with_export_config(mut self, config: ExportConfig) -> Self {
        self.exporters = ExportManager::with_generator(config.generator.clone());
        self.export_config = config;
        self
    }

    /// Get access to the underlying storage
    pub fn storage(&self) -> &dyn SiteStorage {
        self.storage.as_ref()
    }

    /// Registered export formats
    pub fn exporters(&self) -> &ExportManager {
        &self.exporters
    }

    pub fn export_config(&self) -> &ExportConfig {
        &self.export_config
    }

    // ---- sites ----

    /// Create a new site
    pub fn create_site(&self, draft: SiteDraft) -> Result<Site> {
        let site = Site::new(draft.normalize()?);
        self.storage.save_site(&site)?;
        info!(site_id = %site.id, name = %site.name, "Created site");
        Ok(site)
    }

    /// Replace the editable fields of a site
    pub fn update_site(&self, id: &SiteId, draft: SiteDraft) -> Result<Site> {
        let draft = draft.normalize()?;
        let mut site = self.storage.load_site(id)?;
        site.apply(draft);
        self.storage.save_site(&site)?;
        debug!(site_id = %id, "Updated site");
        Ok(site)
    }

    pub fn get_site(&self, id: &SiteId) -> Result<Site> {
        self.storage.load_site(id)
    }

    /// List all sites, most recently updated first
    pub fn list_sites(&self) -> Result<Vec<Site>> {
        let mut sites = self.storage.list_sites()?;
        sites.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(sites)
    }

    /// Delete a site with its sitemap and content pages
    pub fn delete_site(&self, id: &SiteId) -> Result<()> {
        self.storage.delete_site(id)?;
        info!(site_id = %id, "Deleted site");
        Ok(())
    }

    // ---- sitemap ----

    /// Load the sitemap of a site, creating an empty one on first access
    pub fn sitemap(&self, site_id: &SiteId) -> Result<Sitemap> {
        self.ensure_site(site_id)?;

        if let Some(sitemap) = self.storage.load_sitemap(site_id)? {
            return Ok(sitemap);
        }

        let sitemap = Sitemap::new(site_id.clone());
        self.storage.save_sitemap(&sitemap)?;
        debug!(site_id = %site_id, "Created empty sitemap");
        Ok(sitemap)
    }

    /// Insert a page relative to `target`, or at the end of the root level
    pub fn add_page(
        &self,
        site_id: &SiteId,
        node: SitemapNode,
        target: Option<&NodeId>,
        position: InsertPosition,
    ) -> Result<Sitemap> {
        let mut sitemap = self.sitemap(site_id)?;
        if let Some(target) = target {
            Self::require_node(&sitemap, target)?;
        }
        if let Some(content_page_id) = &node.content_page_id {
            self.storage.load_content_page(site_id, content_page_id)?;
            Self::warn_shared_link(site_id, &sitemap, content_page_id, &node.id);
        }

        let node_id = node.id.clone();
        let pages = mutator::insert(&sitemap.pages, node, target, position);
        sitemap.set_pages(pages);
        self.storage.save_sitemap(&sitemap)?;

        debug!(site_id = %site_id, node_id = %node_id, %position, "Added page");
        Ok(sitemap)
    }

    /// Edit the title, URL or content link of a page
    pub fn update_page(
        &self,
        site_id: &SiteId,
        node_id: &NodeId,
        update: &NodeUpdate,
    ) -> Result<Sitemap> {
        let mut sitemap = self.sitemap(site_id)?;
        Self::require_node(&sitemap, node_id)?;
        if let Some(Some(content_page_id)) = &update.content_page_id {
            self.storage.load_content_page(site_id, content_page_id)?;
            Self::warn_shared_link(site_id, &sitemap, content_page_id, node_id);
        }
        if update.is_empty() {
            return Ok(sitemap);
        }

        let pages = mutator::update_node(&sitemap.pages, node_id, update);
        sitemap.set_pages(pages);
        self.storage.save_sitemap(&sitemap)?;

        debug!(site_id = %site_id, node_id = %node_id, "Updated page");
        Ok(sitemap)
    }

    /// Remove a page and all its descendants
    pub fn remove_page(&self, site_id: &SiteId, node_id: &NodeId) -> Result<Sitemap> {
        let mut sitemap = self.sitemap(site_id)?;
        let removed = tree::count_nodes(std::slice::from_ref(Self::require_node(
            &sitemap, node_id,
        )?));

        let pages = mutator::remove(&sitemap.pages, node_id);
        sitemap.set_pages(pages);
        self.storage.save_sitemap(&sitemap)?;

        info!(site_id = %site_id, node_id = %node_id, removed, "Removed page");
        Ok(sitemap)
    }

    /// Move a page (with its subtree) relative to `target`
    pub fn move_page(
        &self,
        site_id: &SiteId,
        dragged: &NodeId,
        target: Option<&NodeId>,
        position: InsertPosition,
    ) -> Result<Sitemap> {
        let mut sitemap = self.sitemap(site_id)?;
        Self::require_node(&sitemap, dragged)?;
        if let Some(target) = target {
            Self::require_node(&sitemap, target)?;
        }

        let pages = mutator::move_node(&sitemap.pages, dragged, target, position)?;
        sitemap.set_pages(pages);
        self.storage.save_sitemap(&sitemap)?;

        debug!(site_id = %site_id, node_id = %dragged, %position, "Moved page");
        Ok(sitemap)
    }

    /// Add a root node for a content page unless one already links it
    pub fn link_content_page(
        &self,
        site_id: &SiteId,
        content_page_id: &ContentPageId,
    ) -> Result<LinkOutcome> {
        let page = self.storage.load_content_page(site_id, content_page_id)?;
        let mut sitemap = self.sitemap(site_id)?;

        if tree::has_linked_content(&sitemap.pages, content_page_id) {
            warn!(
                site_id = %site_id,
                content_page_id = %content_page_id,
                "Content page is already in the sitemap"
            );
            return Ok(LinkOutcome::AlreadyLinked);
        }

        let node = SitemapNode::new(&page.title, &page.url).with_content_page(page.id.clone());
        let node_id = node.id.clone();
        let pages = mutator::insert(&sitemap.pages, node, None, InsertPosition::After);
        sitemap.set_pages(pages);
        self.storage.save_sitemap(&sitemap)?;

        info!(site_id = %site_id, node_id = %node_id, "Linked content page");
        Ok(LinkOutcome::Linked(node_id))
    }

    /// Nodes other than `node_id` that link the given content page
    pub fn other_links<'a>(
        pages: &'a [SitemapNode],
        content_page_id: &ContentPageId,
        node_id: &NodeId,
    ) -> Vec<&'a SitemapNode> {
        tree::linked_nodes(pages, content_page_id)
            .into_iter()
            .filter(|node| &node.id != node_id)
            .collect()
    }

    fn warn_shared_link(
        site_id: &SiteId,
        sitemap: &Sitemap,
        content_page_id: &ContentPageId,
        node_id: &NodeId,
    ) {
        let others = Self::other_links(&sitemap.pages, content_page_id, node_id);
        if !others.is_empty() {
            warn!(
                site_id = %site_id,
                content_page_id = %content_page_id,
                node_id = %node_id,
                linked_by = others.len(),
                "Content page is already linked by another page"
            );
        }
    }

    /// Nodes whose linked content page no longer exists, in pre-order
    pub fn dangling_links(&self, site_id: &SiteId) -> Result<Vec<SitemapNode>> {
        let sitemap = self.sitemap(site_id)?;
        let existing: HashSet<ContentPageId> = self
            .storage
            .list_content_pages(site_id)?
            .into_iter()
            .map(|page| page.id)
            .collect();

        Ok(tree::iter(&sitemap.pages)
            .map(|(_, node)| node)
            .filter(|node| {
                node.content_page_id
                    .as_ref()
                    .is_some_and(|id| !existing.contains(id))
            })
            .cloned()
            .collect())
    }

    // ---- content pages ----

    /// Create a content page after validating its input
    pub fn create_content_page(
        &self,
        site_id: &SiteId,
        draft: ContentPageDraft,
    ) -> Result<ContentPage> {
        self.ensure_site(site_id)?;
        let draft = ContentValidator::normalize(draft)?;
        let existing = self.storage.list_content_pages(site_id)?;
        ContentValidator::check_unique_url(&draft.url, &existing, None)?;

        let page = ContentPage::new(site_id.clone(), draft);
        self.storage.save_content_page(&page)?;

        info!(site_id = %site_id, content_page_id = %page.id, url = %page.url, "Created content page");
        Ok(page)
    }

    /// Replace the editable fields of a content page
    pub fn update_content_page(
        &self,
        site_id: &SiteId,
        id: &ContentPageId,
        draft: ContentPageDraft,
    ) -> Result<ContentPage> {
        let draft = ContentValidator::normalize(draft)?;
        let mut page = self.storage.load_content_page(site_id, id)?;
        let existing = self.storage.list_content_pages(site_id)?;
        ContentValidator::check_unique_url(&draft.url, &existing, Some(id))?;

        page.apply(draft);
        self.storage.save_content_page(&page)?;

        debug!(site_id = %site_id, content_page_id = %id, "Updated content page");
        Ok(page)
    }

    pub fn get_content_page(&self, site_id: &SiteId, id: &ContentPageId) -> Result<ContentPage> {
        self.storage.load_content_page(site_id, id)
    }

    /// Delete a content page
    ///
    /// Sitemap nodes linking it keep their link; see [`Self::dangling_links`].
    pub fn delete_content_page(&self, site_id: &SiteId, id: &ContentPageId) -> Result<()> {
        self.storage.delete_content_page(site_id, id)?;
        info!(site_id = %site_id, content_page_id = %id, "Deleted content page");
        Ok(())
    }

    /// Content pages of a site, most recently updated first
    pub fn content_pages(
        &self,
        site_id: &SiteId,
        status: Option<ContentStatus>,
    ) -> Result<Vec<ContentPage>> {
        self.ensure_site(site_id)?;
        let mut pages: Vec<ContentPage> = self
            .storage
            .list_content_pages(site_id)?
            .into_iter()
            .filter(|page| status.map_or(true, |s| page.status == s))
            .collect();
        pages.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(pages)
    }

    // ---- export ----

    /// Flatten a site's sitemap and content into an export document
    pub fn assemble_export(&self, site_id: &SiteId) -> Result<ExportData> {
        let site = self.storage.load_site(site_id)?;
        let pages = self
            .storage
            .load_sitemap(site_id)?
            .map(|sitemap| sitemap.pages)
            .unwrap_or_default();
        let content_pages = self.storage.list_content_pages(site_id)?;

        let data = ExportAssembler::from_config(&self.export_config).assemble(
            &site.name,
            site.export_url(&self.export_config.fallback_url),
            &pages,
            &content_pages,
            Utc::now(),
        );
        debug!(site_id = %site_id, posts = data.posts.len(), "Assembled export");
        Ok(data)
    }

    /// Render a site in one of the registered formats
    pub fn export(&self, site_id: &SiteId, format: &str) -> Result<String> {
        let data = self.assemble_export(site_id)?;
        let rendered = self.exporters.export(&data, format)?;
        info!(site_id = %site_id, format, bytes = rendered.len(), "Exported site");
        Ok(rendered)
    }

    /// Render a site export straight to a file, returning the path written
    pub fn export_to_file(&self, site_id: &SiteId, format: &str, path: &Path) -> Result<PathBuf> {
        let data = self.assemble_export(site_id)?;
        let written = self.exporters.export_to_file(&data, format, path)?;
        info!(site_id = %site_id, format, path = %written.display(), "Exported site to file");
        Ok(written)
    }

    /// Raw dump of every record belonging to a site
    pub fn backup(&self, site_id: &SiteId) -> Result<SiteBackup> {
        let site = self.storage.load_site(site_id)?;
        let sitemap = self
            .storage
            .load_sitemap(site_id)?
            .unwrap_or_else(|| Sitemap::new(site_id.clone()));
        let content_pages = self.storage.list_content_pages(site_id)?;
        Ok(SiteBackup::new(site, sitemap, content_pages))
    }

    /// Counts shown before exporting
    pub fn preview(&self, site_id: &SiteId) -> Result<ExportPreview> {
        let site = self.storage.load_site(site_id)?;
        let has_sitemap = self
            .storage
            .load_sitemap(site_id)?
            .is_some_and(|sitemap| !sitemap.is_empty());
        let has_content = !self.storage.list_content_pages(site_id)?.is_empty();

        let stats = if has_sitemap {
            ExportStats::from_data(&self.assemble_export(site_id)?)
        } else {
            ExportStats::empty(Utc::now())
        };

        Ok(ExportPreview {
            site: PreviewSite {
                id: site.id.clone(),
                name: site.name.clone(),
                url: site
                    .export_url(&self.export_config.fallback_url)
                    .to_string(),
            },
            stats,
            has_sitemap,
            has_content,
        })
    }

    fn ensure_site(&self, id: &SiteId) -> Result<()> {
        if self.storage.site_exists(id) {
            Ok(())
        } else {
            Err(SitekitError::SiteNotFound(id.to_string()))
        }
    }

    fn require_node<'a>(sitemap: &'a Sitemap, id: &NodeId) -> Result<&'a SitemapNode> {
        tree::find_node(&sitemap.pages, id).ok_or_else(|| SitekitError::NodeNotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use pretty_assertions::assert_eq;

    fn create_manager() -> SiteManager {
        SiteManager::new(MemoryStorage::new())
    }

    fn titles(pages: &[SitemapNode]) -> Vec<String> {
        tree::iter(pages)
            .map(|(depth, node)| format!("{}{}", "-".repeat(depth), node.title))
            .collect()
    }

    #[test]
    fn test_create_site_requires_name() {
        let manager = create_manager();
        assert!(matches!(
            manager.create_site(SiteDraft::new("   ")),
            Err(SitekitError::Validation(_))
        ));

        let site = manager.create_site(SiteDraft::new("  Acme  ")).unwrap();
        assert_eq!(site.name, "Acme");
        assert_eq!(manager.get_site(&site.id).unwrap(), site);
    }

    #[test]
    fn test_update_and_delete_site() {
        let manager = create_manager();
        let site = manager.create_site(SiteDraft::new("Acme")).unwrap();

        let updated = manager
            .update_site(&site.id, SiteDraft::new("Acme Corp").production_url("https://acme.test"))
            .unwrap();
        assert_eq!(updated.name, "Acme Corp");
        assert!(updated.updated_at >= site.updated_at);

        manager.delete_site(&site.id).unwrap();
        assert!(manager.get_site(&site.id).unwrap_err().is_not_found());
        assert!(manager.list_sites().unwrap().is_empty());
    }

    #[test]
    fn test_sitemap_is_created_lazily() {
        let manager = create_manager();
        let site = manager.create_site(SiteDraft::new("Acme")).unwrap();

        assert!(manager.storage().load_sitemap(&site.id).unwrap().is_none());
        let sitemap = manager.sitemap(&site.id).unwrap();
        assert!(sitemap.is_empty());
        assert_eq!(
            manager.storage().load_sitemap(&site.id).unwrap().unwrap().id,
            sitemap.id
        );
    }

    #[test]
    fn test_sitemap_for_unknown_site() {
        let manager = create_manager();
        assert!(matches!(
            manager.sitemap(&SiteId::from("missing")),
            Err(SitekitError::SiteNotFound(_))
        ));
    }

    #[test]
    fn test_add_and_move_pages() {
        let manager = create_manager();
        let site = manager.create_site(SiteDraft::new("Acme")).unwrap();

        let home = SitemapNode::new("Home", "/");
        let about = SitemapNode::new("About", "/about");
        let team = SitemapNode::new("Team", "/about/team");
        let (home_id, about_id, team_id) = (home.id.clone(), about.id.clone(), team.id.clone());

        manager.add_page(&site.id, home, None, InsertPosition::After).unwrap();
        manager.add_page(&site.id, about, None, InsertPosition::After).unwrap();
        let sitemap = manager
            .add_page(&site.id, team, Some(&about_id), InsertPosition::Child)
            .unwrap();
        assert_eq!(titles(&sitemap.pages), vec!["Home", "About", "-Team"]);

        let sitemap = manager
            .move_page(&site.id, &team_id, Some(&home_id), InsertPosition::Before)
            .unwrap();
        assert_eq!(titles(&sitemap.pages), vec!["Team", "Home", "About"]);

        let err = manager
            .move_page(&site.id, &about_id, Some(&NodeId::from("nope")), InsertPosition::After)
            .unwrap_err();
        assert!(matches!(err, SitekitError::NodeNotFound(_)));
    }

    #[test]
    fn test_move_into_own_subtree_is_rejected() {
        let manager = create_manager();
        let site = manager.create_site(SiteDraft::new("Acme")).unwrap();

        let parent = SitemapNode::new("Parent", "/p");
        let child = SitemapNode::new("Child", "/p/c");
        let (parent_id, child_id) = (parent.id.clone(), child.id.clone());
        manager.add_page(&site.id, parent, None, InsertPosition::After).unwrap();
        manager
            .add_page(&site.id, child, Some(&parent_id), InsertPosition::Child)
            .unwrap();

        let err = manager
            .move_page(&site.id, &parent_id, Some(&child_id), InsertPosition::Child)
            .unwrap_err();
        assert!(matches!(err, SitekitError::InvalidMove { .. }));

        let sitemap = manager.sitemap(&site.id).unwrap();
        assert_eq!(titles(&sitemap.pages), vec!["Parent", "-Child"]);
    }

    #[test]
    fn test_update_and_remove_page() {
        let manager = create_manager();
        let site = manager.create_site(SiteDraft::new("Acme")).unwrap();
        let node = SitemapNode::new("Old", "/old").with_child(SitemapNode::new("Kid", "/kid"));
        let node_id = node.id.clone();
        manager.add_page(&site.id, node, None, InsertPosition::After).unwrap();

        let sitemap = manager
            .update_page(&site.id, &node_id, &NodeUpdate::default().title("New"))
            .unwrap();
        assert_eq!(tree::find_node(&sitemap.pages, &node_id).unwrap().title, "New");

        let sitemap = manager.remove_page(&site.id, &node_id).unwrap();
        assert!(sitemap.is_empty());
        assert!(manager.remove_page(&site.id, &node_id).unwrap_err().is_not_found());
    }

    #[test]
    fn test_update_page_rejects_unknown_content_page() {
        let manager = create_manager();
        let site = manager.create_site(SiteDraft::new("Acme")).unwrap();
        let node = SitemapNode::new("Home", "/");
        let node_id = node.id.clone();
        manager.add_page(&site.id, node, None, InsertPosition::After).unwrap();

        let update = NodeUpdate::default().link(ContentPageId::from("ghost"));
        assert!(matches!(
            manager.update_page(&site.id, &node_id, &update),
            Err(SitekitError::ContentPageNotFound(_))
        ));
    }

    #[test]
    fn test_link_content_page_once() {
        let manager = create_manager();
        let site = manager.create_site(SiteDraft::new("Acme")).unwrap();
        let page = manager
            .create_content_page(&site.id, ContentPageDraft::new("Services", "services"))
            .unwrap();

        let outcome = manager.link_content_page(&site.id, &page.id).unwrap();
        let LinkOutcome::Linked(node_id) = outcome else {
            panic!("expected a new node");
        };

        let sitemap = manager.sitemap(&site.id).unwrap();
        let node = tree::find_node(&sitemap.pages, &node_id).unwrap();
        assert_eq!(node.title, "Services");
        assert_eq!(node.url, "/services");
        assert_eq!(node.content_page_id.as_ref(), Some(&page.id));

        assert_eq!(
            manager.link_content_page(&site.id, &page.id).unwrap(),
            LinkOutcome::AlreadyLinked
        );
        assert_eq!(tree::count_nodes(&manager.sitemap(&site.id).unwrap().pages), 1);
    }

    #[test]
    fn test_add_and_update_page_allow_shared_links() {
        let manager = create_manager();
        let site = manager.create_site(SiteDraft::new("Acme")).unwrap();
        let page = manager
            .create_content_page(&site.id, ContentPageDraft::new("Services", "/services"))
            .unwrap();
        let LinkOutcome::Linked(first) = manager.link_content_page(&site.id, &page.id).unwrap()
        else {
            panic!("expected a new node");
        };

        let second = SitemapNode::new("Our services", "/our-services")
            .with_content_page(page.id.clone());
        let second_id = second.id.clone();
        let sitemap = manager
            .add_page(&site.id, second, None, InsertPosition::After)
            .unwrap();

        assert_eq!(tree::linked_nodes(&sitemap.pages, &page.id).len(), 2);
        let others = SiteManager::other_links(&sitemap.pages, &page.id, &second_id);
        assert_eq!(others.len(), 1);
        assert_eq!(others[0].id, first);

        let third = SitemapNode::new("Pricing", "/pricing");
        let third_id = third.id.clone();
        manager
            .add_page(&site.id, third, None, InsertPosition::After)
            .unwrap();
        let sitemap = manager
            .update_page(&site.id, &third_id, &NodeUpdate::default().link(page.id.clone()))
            .unwrap();

        let others: Vec<NodeId> = SiteManager::other_links(&sitemap.pages, &page.id, &third_id)
            .into_iter()
            .map(|node| node.id.clone())
            .collect();
        assert_eq!(others, vec![first, second_id]);
    }

    #[test]
    fn test_other_links_ignores_unlinked_pages() {
        let manager = create_manager();
        let site = manager.create_site(SiteDraft::new("Acme")).unwrap();
        let page = manager
            .create_content_page(&site.id, ContentPageDraft::new("About", "/about"))
            .unwrap();

        let node = SitemapNode::new("About", "/about").with_content_page(page.id.clone());
        let node_id = node.id.clone();
        let sitemap = manager
            .add_page(&site.id, node, None, InsertPosition::After)
            .unwrap();

        assert!(SiteManager::other_links(&sitemap.pages, &page.id, &node_id).is_empty());
    }

    #[test]
    fn test_content_page_url_rules() {
        let manager = create_manager();
        let site = manager.create_site(SiteDraft::new("Acme")).unwrap();

        let first = manager
            .create_content_page(&site.id, ContentPageDraft::new("About", "about"))
            .unwrap();
        assert_eq!(first.url, "/about");

        let dup = manager.create_content_page(&site.id, ContentPageDraft::new("Again", "/about"));
        assert!(matches!(dup, Err(SitekitError::Validation(_))));

        let missing = manager.create_content_page(&site.id, ContentPageDraft::new("", "/x"));
        assert!(matches!(missing, Err(SitekitError::Validation(_))));

        // Keeping its own URL is not a conflict
        let updated = manager
            .update_content_page(&site.id, &first.id, ContentPageDraft::new("About us", "/about"))
            .unwrap();
        assert_eq!(updated.title, "About us");
    }

    #[test]
    fn test_content_pages_status_filter() {
        let manager = create_manager();
        let site = manager.create_site(SiteDraft::new("Acme")).unwrap();
        manager
            .create_content_page(&site.id, ContentPageDraft::new("A", "/a").published())
            .unwrap();
        manager
            .create_content_page(&site.id, ContentPageDraft::new("B", "/b"))
            .unwrap();

        assert_eq!(manager.content_pages(&site.id, None).unwrap().len(), 2);
        let published = manager
            .content_pages(&site.id, Some(ContentStatus::Published))
            .unwrap();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].title, "A");
    }

    #[test]
    fn test_deleted_content_leaves_dangling_link() {
        let manager = create_manager();
        let site = manager.create_site(SiteDraft::new("Acme")).unwrap();
        let page = manager
            .create_content_page(&site.id, ContentPageDraft::new("Gone", "/gone"))
            .unwrap();
        manager.link_content_page(&site.id, &page.id).unwrap();

        manager.delete_content_page(&site.id, &page.id).unwrap();

        let dangling = manager.dangling_links(&site.id).unwrap();
        assert_eq!(dangling.len(), 1);
        assert_eq!(dangling[0].title, "Gone");

        // The orphaned node still exports, as an empty draft
        let data = manager.assemble_export(&site.id).unwrap();
        assert_eq!(data.posts.len(), 1);
        assert_eq!(data.posts[0].content, "");
    }

    #[test]
    fn test_export_uses_site_url_and_config() {
        let config = ExportConfig {
            author: "editor".to_string(),
            ..ExportConfig::default()
        };
        let manager = create_manager().with_export_config(config);
        let site = manager
            .create_site(SiteDraft::new("Acme").dev_url("https://dev.acme.test"))
            .unwrap();
        let page = manager
            .create_content_page(
                &site.id,
                ContentPageDraft::new("Home", "/")
                    .content_html("<p>Hi</p>")
                    .published(),
            )
            .unwrap();
        manager.link_content_page(&site.id, &page.id).unwrap();

        let data = manager.assemble_export(&site.id).unwrap();
        assert_eq!(data.site.url, "https://dev.acme.test");
        assert_eq!(data.posts[0].author, "editor");
        assert_eq!(data.posts[0].slug, "home");

        let xml = manager.export(&site.id, "wxr").unwrap();
        assert!(xml.contains("<![CDATA[<p>Hi</p>]]>"));
        assert!(manager.export(&site.id, "pdf").is_err());
    }

    #[test]
    fn test_preview_without_sitemap() {
        let manager = create_manager();
        let site = manager.create_site(SiteDraft::new("Acme")).unwrap();

        let preview = manager.preview(&site.id).unwrap();
        assert!(!preview.has_sitemap);
        assert!(!preview.has_content);
        assert_eq!(preview.stats.total_pages, 0);
        assert_eq!(preview.site.url, "https://example.com");
    }

    #[test]
    fn test_preview_counts() {
        let manager = create_manager();
        let site = manager.create_site(SiteDraft::new("Acme")).unwrap();
        let published = manager
            .create_content_page(
                &site.id,
                ContentPageDraft::new("Home", "/").content_html("<p>x</p>").published(),
            )
            .unwrap();
        let draft = manager
            .create_content_page(&site.id, ContentPageDraft::new("About", "/about"))
            .unwrap();
        manager.link_content_page(&site.id, &published.id).unwrap();
        manager.link_content_page(&site.id, &draft.id).unwrap();
        manager
            .add_page(&site.id, SitemapNode::new("Contact", "/contact"), None, InsertPosition::After)
            .unwrap();

        let preview = manager.preview(&site.id).unwrap();
        assert!(preview.has_sitemap);
        assert!(preview.has_content);
        assert_eq!(preview.stats.total_pages, 3);
        assert_eq!(preview.stats.published_pages, 1);
        assert_eq!(preview.stats.draft_pages, 2);
        assert_eq!(preview.stats.pages_with_content, 1);
    }

    #[test]
    fn test_export_to_file() {
        let manager = create_manager();
        let site = manager.create_site(SiteDraft::new("Acme")).unwrap();
        manager
            .add_page(&site.id, SitemapNode::new("Home", "/"), None, InsertPosition::After)
            .unwrap();

        let temp = tempfile::TempDir::new().unwrap();
        let written = manager
            .export_to_file(&site.id, "wxr", &temp.path().join("acme"))
            .unwrap();

        assert_eq!(written, temp.path().join("acme.xml"));
        let xml = std::fs::read_to_string(&written).unwrap();
        assert!(xml.contains("<wp:post_name>home</wp:post_name>"));
    }

    #[test]
    fn test_backup_contains_all_records() {
        let manager = create_manager();
        let site = manager.create_site(SiteDraft::new("Acme")).unwrap();
        manager
            .create_content_page(&site.id, ContentPageDraft::new("A", "/a"))
            .unwrap();

        let backup = manager.backup(&site.id).unwrap();
        assert_eq!(backup.site.id, site.id);
        assert_eq!(backup.content_pages.len(), 1);
        assert!(backup.sitemap.is_empty());
    }
}
