//! Flattening of a sitemap plus content pages into WordPress posts

use crate::config::ExportConfig;
use crate::content::{ContentPage, ContentStatus};
use crate::sitemap::SitemapNode;
use crate::types::ContentPageId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Complete export document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportData {
    pub site: ExportSite,
    pub posts: Vec<ExportPost>,
    #[serde(default)]
    pub categories: Vec<ExportTerm>,
    #[serde(default)]
    pub tags: Vec<ExportTerm>,
}

/// Channel-level site metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportSite {
    pub name: String,
    pub url: String,
    pub description: String,
    pub language: String,
    pub export_date: DateTime<Utc>,
}

/// Category or tag term. Always empty for sitemap exports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportTerm {
    pub id: u32,
    pub name: String,
    pub slug: String,
    pub description: String,
}

/// WordPress post status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Publish,
    Draft,
    Private,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Publish => "publish",
            PostStatus::Draft => "draft",
            PostStatus::Private => "private",
        }
    }
}

impl From<ContentStatus> for PostStatus {
    fn from(status: ContentStatus) -> Self {
        match status {
            ContentStatus::Published => PostStatus::Publish,
            ContentStatus::Draft => PostStatus::Draft,
        }
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// WordPress post type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostType {
    Post,
    Page,
}

impl PostType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostType::Post => "post",
            PostType::Page => "page",
        }
    }
}

impl fmt::Display for PostType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single exported post, derived from one sitemap node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportPost {
    /// 1-based id in pre-order
    pub id: u32,
    pub title: String,
    /// Rendered HTML
    pub content: String,
    pub excerpt: String,
    pub status: PostStatus,
    #[serde(rename = "type")]
    pub post_type: PostType,
    pub slug: String,
    pub date: DateTime<Utc>,
    pub author: String,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Export id of the tree parent; `None` for roots
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<u32>,
    /// Position among siblings, from 0
    pub menu_order: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_description: Option<String>,
}

/// Builds [`ExportData`] from a sitemap and its content pages
#[derive(Debug, Clone)]
pub struct ExportAssembler {
    author: String,
    language: String,
    description: String,
}

impl ExportAssembler {
    /// Create an assembler with default channel settings
    pub fn new() -> Self {
        Self::from_config(&ExportConfig::default())
    }

    /// Create an assembler from export configuration
    pub fn from_config(config: &ExportConfig) -> Self {
        Self {
            author: config.author.clone(),
            language: config.language.clone(),
            description: config.description.clone(),
        }
    }

    /// Assemble the export document
    ///
    /// Nodes are visited in pre-order. Unlinked nodes and nodes whose content
    /// page no longer exists become empty drafts.
    pub fn assemble(
        &self,
        site_name: &str,
        site_url: &str,
        pages: &[SitemapNode],
        content_pages: &[ContentPage],
        export_date: DateTime<Utc>,
    ) -> ExportData {
        let mut lookup: HashMap<&ContentPageId, &ContentPage> = HashMap::new();
        for page in content_pages {
            lookup.entry(&page.id).or_insert(page);
        }

        let mut walker = Walker {
            author: &self.author,
            lookup,
            next_id: 1,
            posts: Vec::new(),
        };
        walker.visit(pages, None);

        ExportData {
            site: ExportSite {
                name: site_name.to_string(),
                url: site_url.to_string(),
                description: self.description.clone(),
                language: self.language.clone(),
                export_date,
            },
            posts: walker.posts,
            categories: Vec::new(),
            tags: Vec::new(),
        }
    }
}

impl Default for ExportAssembler {
    fn default() -> Self {
        Self::new()
    }
}

struct Walker<'a> {
    author: &'a str,
    lookup: HashMap<&'a ContentPageId, &'a ContentPage>,
    next_id: u32,
    posts: Vec<ExportPost>,
}

impl<'a> Walker<'a> {
    fn visit(&mut self, nodes: &'a [SitemapNode], parent_id: Option<u32>) {
        for (index, node) in nodes.iter().enumerate() {
            let id = self.next_id;
            self.next_id += 1;

            let content_page = node
                .content_page_id
                .as_ref()
                .and_then(|cp| self.lookup.get(cp).copied());
            let post = self.post(id, node, content_page, parent_id, index as u32);
            self.posts.push(post);

            if node.has_children() {
                self.visit(&node.children, Some(id));
            }
        }
    }

    fn post(
        &self,
        id: u32,
        node: &SitemapNode,
        content_page: Option<&ContentPage>,
        parent_id: Option<u32>,
        menu_order: u32,
    ) -> ExportPost {
        let meta_description = content_page
            .and_then(|cp| cp.meta_description.clone())
            .filter(|d| !d.trim().is_empty());

        ExportPost {
            id,
            title: node.title.clone(),
            content: content_page
                .and_then(|cp| cp.content_html.clone())
                .unwrap_or_default(),
            excerpt: meta_description.clone().unwrap_or_default(),
            status: content_page
                .map(|cp| PostStatus::from(cp.status))
                .unwrap_or(PostStatus::Draft),
            post_type: PostType::Page,
            slug: slug_from_url(&node.url),
            date: content_page.map(|cp| cp.updated_at).unwrap_or(node.updated_at),
            author: self.author.to_string(),
            categories: Vec::new(),
            tags: Vec::new(),
            parent_id,
            menu_order,
            meta_description,
        }
    }
}

/// Derive a WordPress slug: strip one leading and one trailing `/`, `home` if empty
pub fn slug_from_url(url: &str) -> String {
    let slug = url.strip_prefix('/').unwrap_or(url);
    let slug = slug.strip_suffix('/').unwrap_or(slug);
    if slug.is_empty() {
        "home".to_string()
    } else {
        slug.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentPageDraft;
    use crate::sitemap::tree::fixtures::{node, sample_tree};
    use crate::types::SiteId;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn export_date() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    fn content(id: &str, draft: ContentPageDraft) -> ContentPage {
        let mut page = ContentPage::new(SiteId::from("s1"), draft);
        page.id = ContentPageId::from(id);
        page
    }

    fn assemble(pages: &[SitemapNode], content_pages: &[ContentPage]) -> ExportData {
        ExportAssembler::new().assemble("Acme", "https://acme.test", pages, content_pages, export_date())
    }

    #[test]
    fn test_pre_order_id_assignment() {
        let data = assemble(&sample_tree(), &[]);
        let ids: Vec<_> = data.posts.iter().map(|p| (p.title.as_str(), p.id)).collect();
        assert_eq!(ids, vec![("A", 1), ("B", 2), ("D", 3), ("C", 4)]);

        let d = &data.posts[2];
        assert_eq!(d.parent_id, Some(2));
        let c = &data.posts[3];
        assert_eq!(c.parent_id, Some(1));
        assert_eq!(c.menu_order, 1);
        assert_eq!(data.posts[0].parent_id, None);
    }

    #[test]
    fn test_root_menu_order() {
        let pages = vec![node("x", "X", "/x"), node("y", "Y", "/y"), node("z", "Z", "/z")];
        let data = assemble(&pages, &[]);
        let orders: Vec<_> = data.posts.iter().map(|p| p.menu_order).collect();
        assert_eq!(orders, vec![0, 1, 2]);
        assert!(data.posts.iter().all(|p| p.parent_id.is_none()));
    }

    #[test]
    fn test_slug_derivation() {
        assert_eq!(slug_from_url("/about-us/"), "about-us");
        assert_eq!(slug_from_url("/"), "home");
        assert_eq!(slug_from_url(""), "home");
        assert_eq!(slug_from_url("contact"), "contact");
        assert_eq!(slug_from_url("/services/web"), "services/web");
        assert_eq!(slug_from_url("//"), "home");
    }

    #[test]
    fn test_content_join() {
        let cp = content(
            "cp1",
            ContentPageDraft::new("About", "/about")
                .meta_description("About Acme")
                .content_html("<p>About</p>")
                .published(),
        );
        let pages = vec![node("n1", "About", "/about").with_content_page(cp.id.clone())];
        let data = assemble(&pages, &[cp.clone()]);

        let post = &data.posts[0];
        assert_eq!(post.content, "<p>About</p>");
        assert_eq!(post.excerpt, "About Acme");
        assert_eq!(post.meta_description.as_deref(), Some("About Acme"));
        assert_eq!(post.status, PostStatus::Publish);
        assert_eq!(post.date, cp.updated_at);
        assert_eq!(post.post_type, PostType::Page);
        assert_eq!(post.author, "admin");
    }

    #[test]
    fn test_blank_meta_description_is_absent() {
        let cp = content(
            "cp1",
            ContentPageDraft::new("About", "/about").meta_description("   "),
        );
        let pages = vec![node("n1", "About", "/about").with_content_page(cp.id.clone())];
        let data = assemble(&pages, &[cp]);

        assert!(data.posts[0].excerpt.is_empty());
        assert!(data.posts[0].meta_description.is_none());
    }

    #[test]
    fn test_unlinked_and_dangling_nodes_become_empty_drafts() {
        let pages = vec![
            node("n1", "Plain", "/plain"),
            node("n2", "Gone", "/gone").with_content_page(ContentPageId::from("deleted")),
        ];
        let data = assemble(&pages, &[]);

        for (post, source) in data.posts.iter().zip(&pages) {
            assert_eq!(post.status, PostStatus::Draft);
            assert!(post.content.is_empty());
            assert!(post.excerpt.is_empty());
            assert!(post.meta_description.is_none());
            assert_eq!(post.date, source.updated_at);
        }
    }

    #[test]
    fn test_page_without_html_has_empty_content() {
        let cp = content("cp1", ContentPageDraft::new("Draft", "/draft"));
        let pages = vec![node("n1", "Draft", "/draft").with_content_page(cp.id.clone())];
        let data = assemble(&pages, &[cp]);
        assert_eq!(data.posts[0].content, "");
        assert_eq!(data.posts[0].status, PostStatus::Draft);
    }

    #[test]
    fn test_site_metadata_and_placeholders() {
        let data = assemble(&[], &[]);
        assert_eq!(data.site.name, "Acme");
        assert_eq!(data.site.url, "https://acme.test");
        assert_eq!(data.site.language, "en-US");
        assert_eq!(data.site.export_date, export_date());
        assert!(data.posts.is_empty());
        assert!(data.categories.is_empty());
        assert!(data.tags.is_empty());
    }

    #[test]
    fn test_custom_author_from_config() {
        let config = ExportConfig {
            author: "editor".to_string(),
            ..ExportConfig::default()
        };
        let data = ExportAssembler::from_config(&config).assemble(
            "Acme",
            "https://acme.test",
            &sample_tree(),
            &[],
            export_date(),
        );
        assert!(data.posts.iter().all(|p| p.author == "editor"));
    }
}
