//! Content page validation

use super::model::{ContentPage, ContentPageDraft};
use crate::error::{Result, SitekitError};
use crate::types::ContentPageId;

/// Validator and normalizer for content page input
pub struct ContentValidator;

impl ContentValidator {
    /// Validate a draft and return its normalized form
    ///
    /// Title and URL are trimmed and required, the URL gets a leading `/`,
    /// and a blank meta description is dropped.
    pub fn normalize(draft: ContentPageDraft) -> Result<ContentPageDraft> {
        let title = draft.title.trim();
        let url = draft.url.trim();

        if title.is_empty() || url.is_empty() {
            return Err(SitekitError::Validation(
                "Title and URL are required".to_string(),
            ));
        }

        Ok(ContentPageDraft {
            title: title.to_string(),
            url: normalize_url(url),
            meta_description: draft
                .meta_description
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty()),
            ..draft
        })
    }

    /// Reject a URL already used by another page of the same site
    pub fn check_unique_url(
        url: &str,
        existing: &[ContentPage],
        exclude: Option<&ContentPageId>,
    ) -> Result<()> {
        let taken = existing
            .iter()
            .filter(|page| Some(&page.id) != exclude)
            .any(|page| page.url == url);

        if taken {
            return Err(SitekitError::Validation(format!(
                "A page with URL {} already exists for this site",
                url
            )));
        }

        Ok(())
    }
}

/// Ensure a site-relative URL starts with `/`
pub fn normalize_url(url: &str) -> String {
    if url.starts_with('/') {
        url.to_string()
    } else {
        format!("/{}", url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SiteId;

    #[test]
    fn test_normalize_trims_and_prefixes_url() {
        let draft = ContentPageDraft::new("  About  ", " about-us ").meta_description("   ");
        let normalized = ContentValidator::normalize(draft).unwrap();
        assert_eq!(normalized.title, "About");
        assert_eq!(normalized.url, "/about-us");
        assert!(normalized.meta_description.is_none());
    }

    #[test]
    fn test_normalize_requires_title_and_url() {
        assert!(ContentValidator::normalize(ContentPageDraft::new("", "/a")).is_err());
        assert!(ContentValidator::normalize(ContentPageDraft::new("A", "   ")).is_err());
    }

    #[test]
    fn test_normalize_keeps_leading_slash() {
        let normalized = ContentValidator::normalize(ContentPageDraft::new("Home", "/")).unwrap();
        assert_eq!(normalized.url, "/");
    }

    #[test]
    fn test_check_unique_url() {
        let page = ContentPage::new(SiteId::from("s1"), ContentPageDraft::new("A", "/a"));
        let pages = vec![page.clone()];

        assert!(ContentValidator::check_unique_url("/b", &pages, None).is_ok());
        assert!(ContentValidator::check_unique_url("/a", &pages, None).is_err());
        assert!(ContentValidator::check_unique_url("/a", &pages, Some(&page.id)).is_ok());
    }
}
