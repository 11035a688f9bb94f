//! Export statistics and preview

use super::assembler::{ExportData, PostStatus, PostType};
use crate::types::SiteId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Page counts of an assembled export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportStats {
    pub total_pages: usize,
    pub published_pages: usize,
    pub draft_pages: usize,
    /// Posts whose content is non-empty after trimming
    pub pages_with_content: usize,
    pub export_date: DateTime<Utc>,
}

impl ExportStats {
    /// Compute statistics from an assembled export
    pub fn from_data(data: &ExportData) -> Self {
        let pages = || data.posts.iter().filter(|p| p.post_type == PostType::Page);

        Self {
            total_pages: pages().count(),
            published_pages: pages().filter(|p| p.status == PostStatus::Publish).count(),
            draft_pages: pages().filter(|p| p.status == PostStatus::Draft).count(),
            pages_with_content: data
                .posts
                .iter()
                .filter(|p| !p.content.trim().is_empty())
                .count(),
            export_date: data.site.export_date,
        }
    }

    /// Zeroed statistics
    pub fn empty(export_date: DateTime<Utc>) -> Self {
        Self {
            total_pages: 0,
            published_pages: 0,
            draft_pages: 0,
            pages_with_content: 0,
            export_date,
        }
    }
}

/// Summary shown before downloading an export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportPreview {
    pub site: PreviewSite,
    pub stats: ExportStats,
    pub has_sitemap: bool,
    pub has_content: bool,
}

/// Site identity in a preview
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewSite {
    pub id: SiteId,
    pub name: String,
    pub url: String,
}
