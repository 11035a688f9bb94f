//! Content page data models

use crate::types::{ContentPageId, SiteId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Publication status of a content page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentStatus {
    #[default]
    Draft,
    Published,
}

impl ContentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentStatus::Draft => "draft",
            ContentStatus::Published => "published",
        }
    }
}

impl fmt::Display for ContentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ContentStatus {
    type Err = crate::SitekitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "draft" => Ok(ContentStatus::Draft),
            "published" => Ok(ContentStatus::Published),
            other => Err(crate::SitekitError::Validation(format!(
                "Unknown content status: {}",
                other
            ))),
        }
    }
}

/// A rich-text page stored independently of the sitemap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentPage {
    pub id: ContentPageId,
    pub site_id: SiteId,
    pub title: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_description: Option<String>,
    /// Opaque structured editor payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// HTML rendered by the editor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_html: Option<String>,
    #[serde(default)]
    pub status: ContentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ContentPage {
    /// Create a content page from validated input
    pub fn new(site_id: SiteId, draft: ContentPageDraft) -> Self {
        let now = Utc::now();
        Self {
            id: ContentPageId::generate(),
            site_id,
            title: draft.title,
            url: draft.url,
            meta_description: draft.meta_description,
            content: draft.content,
            content_html: draft.content_html,
            status: draft.status,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the editable fields and bump `updated_at`
    pub fn apply(&mut self, draft: ContentPageDraft) {
        self.title = draft.title;
        self.url = draft.url;
        self.meta_description = draft.meta_description;
        self.content = draft.content;
        self.content_html = draft.content_html;
        self.status = draft.status;
        self.touch();
    }

    /// Mark page as updated
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn is_published(&self) -> bool {
        self.status == ContentStatus::Published
    }

    /// Editable fields of this page, as a draft
    pub fn to_draft(&self) -> ContentPageDraft {
        ContentPageDraft {
            title: self.title.clone(),
            url: self.url.clone(),
            meta_description: self.meta_description.clone(),
            content: self.content.clone(),
            content_html: self.content_html.clone(),
            status: self.status,
        }
    }
}

/// Editable fields of a content page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentPageDraft {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub meta_description: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub content_html: Option<String>,
    #[serde(default)]
    pub status: ContentStatus,
}

impl ContentPageDraft {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn meta_description(mut self, description: impl Into<String>) -> Self {
        self.meta_description = Some(description.into());
        self
    }

    pub fn content_html(mut self, html: impl Into<String>) -> Self {
        self.content_html = Some(html.into());
        self
    }

    pub fn status(mut self, status: ContentStatus) -> Self {
        self.status = status;
        self
    }

    pub fn published(self) -> Self {
        self.status(ContentStatus::Published)
    }
}
