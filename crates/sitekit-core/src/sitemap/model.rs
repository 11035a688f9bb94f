//! Sitemap data models

use crate::types::{ContentPageId, NodeId, SiteId, SitemapId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A page in the sitemap tree. Each node owns its children outright.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SitemapNode {
    /// Unique node identifier
    pub id: NodeId,
    /// Display name
    pub title: String,
    /// Site-relative path, conventionally starting with `/`
    pub url: String,
    /// Weak reference to a content page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_page_id: Option<ContentPageId>,
    /// Ordered child pages
    #[serde(default)]
    pub children: Vec<SitemapNode>,
    /// Informational back-reference; `children` containment is authoritative
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<NodeId>,
    /// Sibling ordering hint
    #[serde(default)]
    pub order: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SitemapNode {
    /// Create a new root-level node
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: NodeId::generate(),
            title: title.into(),
            url: url.into(),
            content_page_id: None,
            children: Vec::new(),
            parent_id: None,
            order: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Link the node to a content page
    pub fn with_content_page(mut self, id: ContentPageId) -> Self {
        self.content_page_id = Some(id);
        self
    }

    /// Set the informational parent id
    pub fn with_parent(mut self, id: NodeId) -> Self {
        self.parent_id = Some(id);
        self
    }

    /// Append a child node
    pub fn with_child(mut self, child: SitemapNode) -> Self {
        self.children.push(child);
        self
    }

    /// Mark node as updated
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Whether the node has any children
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

/// Per-site container holding the top-level nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sitemap {
    pub id: SitemapId,
    pub site_id: SiteId,
    /// Top-level nodes in display order
    pub pages: Vec<SitemapNode>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Sitemap {
    /// Create an empty sitemap for a site
    pub fn new(site_id: SiteId) -> Self {
        let now = Utc::now();
        Self {
            id: SitemapId::generate(),
            site_id,
            pages: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the tree and bump the timestamp
    pub fn set_pages(&mut self, pages: Vec<SitemapNode>) {
        self.pages = pages;
        self.updated_at = Utc::now();
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

/// Where a node lands relative to a target node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsertPosition {
    /// Sibling immediately preceding the target
    Before,
    /// Sibling immediately following the target
    #[default]
    After,
    /// Last child of the target
    Child,
}

impl fmt::Display for InsertPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            InsertPosition::Before => "before",
            InsertPosition::After => "after",
            InsertPosition::Child => "child",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for InsertPosition {
    type Err = crate::SitekitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "before" => Ok(InsertPosition::Before),
            "after" => Ok(InsertPosition::After),
            "child" => Ok(InsertPosition::Child),
            other => Err(crate::SitekitError::Validation(format!(
                "Unknown insert position: {}",
                other
            ))),
        }
    }
}

/// Field edits applied to a single node
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeUpdate {
    pub title: Option<String>,
    pub url: Option<String>,
    /// `Some(None)` unlinks, `Some(Some(id))` links, `None` leaves the link alone
    pub content_page_id: Option<Option<ContentPageId>>,
}

impl NodeUpdate {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn link(mut self, id: ContentPageId) -> Self {
        self.content_page_id = Some(Some(id));
        self
    }

    pub fn unlink(mut self) -> Self {
        self.content_page_id = Some(None);
        self
    }

    /// Whether the update changes nothing
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.url.is_none() && self.content_page_id.is_none()
    }
}
