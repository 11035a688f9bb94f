//! Raw site backup: the stored records as they are, without WordPress mapping

use super::exporter::{sanitize_file_stem, write_atomic};
use crate::content::ContentPage;
use crate::error::Result;
use crate::site::Site;
use crate::sitemap::Sitemap;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Full dump of one site's records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteBackup {
    pub site: Site,
    pub sitemap: Sitemap,
    pub content_pages: Vec<ContentPage>,
    pub exported_at: DateTime<Utc>,
}

impl SiteBackup {
    pub fn new(site: Site, sitemap: Sitemap, content_pages: Vec<ContentPage>) -> Self {
        Self {
            site,
            sitemap,
            content_pages,
            exported_at: Utc::now(),
        }
    }

    /// Pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Download file name for a backup: `<Site_Name>_export.json`
    pub fn file_name(site_name: &str) -> String {
        format!("{}_export.json", sanitize_file_stem(site_name))
    }

    /// Write the backup as pretty JSON, atomically
    pub fn write_to(&self, path: &Path) -> Result<()> {
        write_atomic(path, &self.to_json()?)
    }
}
