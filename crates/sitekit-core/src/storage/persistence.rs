//! Storage trait for sites, sitemaps and content pages

use crate::content::ContentPage;
use crate::error::Result;
use crate::site::Site;
use crate::sitemap::Sitemap;
use crate::types::{ContentPageId, SiteId};

/// Trait for storage implementations
///
/// Implementations only move records in and out; the sitemap tree is stored
/// as a single value and replaced wholesale. Last write wins.
pub trait SiteStorage: Send + Sync {
    /// Save a site
    fn save_site(&self, site: &Site) -> Result<()>;

    /// Load a site by ID
    fn load_site(&self, id: &SiteId) -> Result<Site>;

    /// List all sites
    fn list_sites(&self) -> Result<Vec<Site>>;

    /// Delete a site together with its sitemap and content pages
    fn delete_site(&self, id: &SiteId) -> Result<()>;

    /// Check if a site exists
    fn site_exists(&self, id: &SiteId) -> bool;

    /// Load the sitemap of a site, if one was stored
    fn load_sitemap(&self, site_id: &SiteId) -> Result<Option<Sitemap>>;

    /// Save a sitemap, replacing the previous one
    fn save_sitemap(&self, sitemap: &Sitemap) -> Result<()>;

    /// List content pages of a site
    fn list_content_pages(&self, site_id: &SiteId) -> Result<Vec<ContentPage>>;

    /// Save a content page
    fn save_content_page(&self, page: &ContentPage) -> Result<()>;

    /// Load a content page by ID
    fn load_content_page(&self, site_id: &SiteId, id: &ContentPageId) -> Result<ContentPage>;

    /// Delete a content page
    fn delete_content_page(&self, site_id: &SiteId, id: &ContentPageId) -> Result<()>;
}
