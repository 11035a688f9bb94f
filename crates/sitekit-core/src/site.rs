//! Site metadata

use crate::error::{Result, SitekitError};
use crate::types::SiteId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A WordPress-bound site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Site {
    pub id: SiteId,
    pub name: String,
    #[serde(default)]
    pub dev_url: String,
    #[serde(default)]
    pub production_url: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub client: String,
    #[serde(default)]
    pub host: String,
    /// Only meaningful when `host` is "Other"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_host: Option<String>,
    #[serde(default)]
    pub template: String,
    #[serde(default)]
    pub header_scripts: String,
    #[serde(default)]
    pub body_scripts: String,
    #[serde(default)]
    pub footer_scripts: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Site {
    /// Create a site from validated input
    pub fn new(draft: SiteDraft) -> Self {
        let now = Utc::now();
        let mut site = Self {
            id: SiteId::generate(),
            name: String::new(),
            dev_url: String::new(),
            production_url: String::new(),
            notes: String::new(),
            client: String::new(),
            host: String::new(),
            custom_host: None,
            template: String::new(),
            header_scripts: String::new(),
            body_scripts: String::new(),
            footer_scripts: String::new(),
            created_at: now,
            updated_at: now,
        };
        site.assign(draft);
        site
    }

    /// Replace the editable fields and bump `updated_at`
    pub fn apply(&mut self, draft: SiteDraft) {
        self.assign(draft);
        self.updated_at = Utc::now();
    }

    fn assign(&mut self, draft: SiteDraft) {
        self.name = draft.name;
        self.dev_url = draft.dev_url;
        self.production_url = draft.production_url;
        self.notes = draft.notes;
        self.client = draft.client;
        self.host = draft.host;
        self.custom_host = draft.custom_host;
        self.template = draft.template;
        self.header_scripts = draft.header_scripts;
        self.body_scripts = draft.body_scripts;
        self.footer_scripts = draft.footer_scripts;
    }

    /// URL written into exports: production, then dev, then `fallback`
    pub fn export_url<'a>(&'a self, fallback: &'a str) -> &'a str {
        [self.production_url.as_str(), self.dev_url.as_str()]
            .into_iter()
            .find(|url| !url.is_empty())
            .unwrap_or(fallback)
    }

    /// Editable fields of this site, as a draft
    pub fn to_draft(&self) -> SiteDraft {
        SiteDraft {
            name: self.name.clone(),
            dev_url: self.dev_url.clone(),
            production_url: self.production_url.clone(),
            notes: self.notes.clone(),
            client: self.client.clone(),
            host: self.host.clone(),
            custom_host: self.custom_host.clone(),
            template: self.template.clone(),
            header_scripts: self.header_scripts.clone(),
            body_scripts: self.body_scripts.clone(),
            footer_scripts: self.footer_scripts.clone(),
        }
    }
}

/// Editable fields of a site
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SiteDraft {
    pub name: String,
    pub dev_url: String,
    pub production_url: String,
    pub notes: String,
    pub client: String,
    pub host: String,
    pub custom_host: Option<String>,
    pub template: String,
    pub header_scripts: String,
    pub body_scripts: String,
    pub footer_scripts: String,
}

impl SiteDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn dev_url(mut self, url: impl Into<String>) -> Self {
        self.dev_url = url.into();
        self
    }

    pub fn production_url(mut self, url: impl Into<String>) -> Self {
        self.production_url = url.into();
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Trim text fields and require a name
    pub fn normalize(self) -> Result<Self> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(SitekitError::Validation("Site name is required".to_string()));
        }

        Ok(Self {
            name,
            dev_url: self.dev_url.trim().to_string(),
            production_url: self.production_url.trim().to_string(),
            notes: self.notes.trim().to_string(),
            client: self.client.trim().to_string(),
            host: self.host.trim().to_string(),
            custom_host: self
                .custom_host
                .map(|h| h.trim().to_string())
                .filter(|h| !h.is_empty()),
            ..self
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_requires_name() {
        assert!(SiteDraft::new("   ").normalize().is_err());
        let draft = SiteDraft::new("  Acme  ").dev_url(" https://dev.acme.test ").normalize().unwrap();
        assert_eq!(draft.name, "Acme");
        assert_eq!(draft.dev_url, "https://dev.acme.test");
    }

    #[test]
    fn test_export_url_precedence() {
        let mut site = Site::new(SiteDraft::new("Acme"));
        assert_eq!(site.export_url("https://example.com"), "https://example.com");

        site.dev_url = "https://dev.acme.test".to_string();
        assert_eq!(site.export_url("https://example.com"), "https://dev.acme.test");

        site.production_url = "https://acme.test".to_string();
        assert_eq!(site.export_url("https://example.com"), "https://acme.test");
    }

    #[test]
    fn test_apply_keeps_identity() {
        let mut site = Site::new(SiteDraft::new("Acme"));
        let id = site.id.clone();
        site.apply(SiteDraft::new("Acme Corp").notes("renamed"));
        assert_eq!(site.id, id);
        assert_eq!(site.name, "Acme Corp");
        assert_eq!(site.notes, "renamed");
    }

    #[test]
    fn test_site_deserialize_minimal() {
        let json = r#"{
            "id": "s1",
            "name": "Acme",
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-01-01T00:00:00Z"
        }"#;
        let site: Site = serde_json::from_str(json).unwrap();
        assert_eq!(site.name, "Acme");
        assert!(site.production_url.is_empty());
    }
}
