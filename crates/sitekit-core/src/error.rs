//! Error types for sitekit

use thiserror::Error;

/// Main error type for sitekit
#[derive(Debug, Error)]
pub enum SitekitError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(String),

    /// Site not found
    #[error("Site not found: {0}")]
    SiteNotFound(String),

    /// Content page not found
    #[error("Content page not found: {0}")]
    ContentPageNotFound(String),

    /// Sitemap node not found
    #[error("Sitemap page not found: {0}")]
    NodeNotFound(String),

    /// Move target lies inside the moved subtree
    #[error("Cannot move page {dragged} into its own subtree (target {target})")]
    InvalidMove { dragged: String, target: String },

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Unsupported schema version
    #[error("Unsupported schema version: {0}")]
    UnsupportedSchemaVersion(String),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<SitekitError>,
    },
}

impl SitekitError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        SitekitError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Whether the error reports a missing entity
    pub fn is_not_found(&self) -> bool {
        match self {
            SitekitError::SiteNotFound(_)
            | SitekitError::ContentPageNotFound(_)
            | SitekitError::NodeNotFound(_) => true,
            SitekitError::WithContext { source, .. } => source.is_not_found(),
            _ => false,
        }
    }
}

impl From<toml::de::Error> for SitekitError {
    fn from(err: toml::de::Error) -> Self {
        SitekitError::Toml(err.to_string())
    }
}

impl From<toml::ser::Error> for SitekitError {
    fn from(err: toml::ser::Error) -> Self {
        SitekitError::Toml(err.to_string())
    }
}

/// Result type alias for sitekit
pub type Result<T> = std::result::Result<T, SitekitError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SitekitError::SiteNotFound("site-123".to_string());
        assert_eq!(err.to_string(), "Site not found: site-123");
    }

    #[test]
    fn test_invalid_move_display() {
        let err = SitekitError::InvalidMove {
            dragged: "a".to_string(),
            target: "b".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Cannot move page a into its own subtree (target b)"
        );
    }

    #[test]
    fn test_error_with_context() {
        let err = SitekitError::Validation("title is required".to_string());
        let err = err.with_context("Failed to create content page");
        assert!(err.to_string().contains("Failed to create content page"));
    }

    #[test]
    fn test_is_not_found_through_context() {
        let err = SitekitError::ContentPageNotFound("p1".to_string()).with_context("loading");
        assert!(err.is_not_found());
        assert!(!SitekitError::Validation("x".to_string()).is_not_found());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: SitekitError = io_err.into();
        assert!(matches!(err, SitekitError::Io(_)));
    }
}
