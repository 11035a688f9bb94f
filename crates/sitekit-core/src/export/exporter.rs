//! Exporter trait and manager

use super::assembler::ExportData;
use crate::error::{Result, SitekitError};
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Trait for export serializers
pub trait Exporter: Send + Sync {
    /// Render an assembled export to a string
    fn export(&self, data: &ExportData) -> Result<String>;

    /// Get the format name
    fn format_name(&self) -> &str;

    /// Get the file extension
    fn file_extension(&self) -> &str;

    /// MIME type of the rendered document
    fn mime_type(&self) -> &str;
}

/// Manager for handling multiple export formats
pub struct ExportManager {
    exporters: HashMap<String, Box<dyn Exporter>>,
}

impl ExportManager {
    /// Create a new export manager with default exporters
    pub fn new() -> Self {
        Self::with_generator(super::wxr::DEFAULT_GENERATOR)
    }

    /// Create a manager whose WXR exporter writes the given generator tag
    pub fn with_generator(generator: impl Into<String>) -> Self {
        let mut manager = Self {
            exporters: HashMap::new(),
        };

        manager.register(Box::new(super::wxr::WxrExporter::new().with_generator(generator)));
        manager.register(Box::new(super::json::JsonExporter::pretty()));
        manager.register(Box::new(super::json::JsonExporter::compact()));

        manager
    }

    /// Register a new exporter
    pub fn register(&mut self, exporter: Box<dyn Exporter>) {
        self.exporters
            .insert(exporter.format_name().to_string(), exporter);
    }

    fn lookup(&self, format: &str) -> Result<&dyn Exporter> {
        self.get(format).ok_or_else(|| {
            SitekitError::Validation(format!("Unknown export format: {}", format))
        })
    }

    /// Export to the specified format
    pub fn export(&self, data: &ExportData, format: &str) -> Result<String> {
        self.lookup(format)?.export(data)
    }

    /// Export to a file, returning the path actually written
    ///
    /// The format's extension is added when `path` has none.
    pub fn export_to_file(&self, data: &ExportData, format: &str, path: &Path) -> Result<PathBuf> {
        let exporter = self.lookup(format)?;
        let content = exporter.export(data)?;

        let final_path = if path.extension().is_some() {
            path.to_path_buf()
        } else {
            path.with_extension(exporter.file_extension())
        };

        write_atomic(&final_path, &content)?;
        Ok(final_path)
    }

    /// Download file name for a site export: `<Site_Name>_wordpress_export.<ext>`
    pub fn file_name(&self, site_name: &str, format: &str) -> Result<String> {
        let exporter = self.lookup(format)?;
        Ok(format!(
            "{}_wordpress_export.{}",
            sanitize_file_stem(site_name),
            exporter.file_extension()
        ))
    }

    /// Get list of available format names
    pub fn available_formats(&self) -> Vec<String> {
        let mut formats: Vec<_> = self.exporters.keys().cloned().collect();
        formats.sort();
        formats
    }

    /// Check if a format is available
    pub fn has_format(&self, format: &str) -> bool {
        self.exporters.contains_key(format)
    }

    /// Get an exporter by format name
    pub fn get(&self, format: &str) -> Option<&dyn Exporter> {
        self.exporters.get(format).map(|e| e.as_ref())
    }
}

impl Default for ExportManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Write through a sibling temp file and rename it into place
pub(crate) fn write_atomic(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let temp_path = path.with_extension("tmp");
    {
        let mut file = fs::File::create(&temp_path)?;
        file.write_all(content.as_bytes())?;
        file.flush()?;
    }

    fs::rename(&temp_path, path)?;
    Ok(())
}

/// Replace every character that is not an ASCII letter or digit with `_`
pub fn sanitize_file_stem(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::assembler::ExportAssembler;
    use chrono::Utc;
    use tempfile::TempDir;

    fn empty_data() -> ExportData {
        ExportAssembler::new().assemble("Acme", "https://acme.test", &[], &[], Utc::now())
    }

    struct TestExporter;

    impl Exporter for TestExporter {
        fn export(&self, _data: &ExportData) -> Result<String> {
            Ok("test export".to_string())
        }

        fn format_name(&self) -> &str {
            "test"
        }

        fn file_extension(&self) -> &str {
            "txt"
        }

        fn mime_type(&self) -> &str {
            "text/plain"
        }
    }

    #[test]
    fn test_export_manager_creation() {
        let manager = ExportManager::new();
        assert!(manager.has_format("wxr"));
        assert!(manager.has_format("json"));
        assert!(manager.has_format("json-compact"));
        assert_eq!(manager.available_formats(), vec!["json", "json-compact", "wxr"]);
    }

    #[test]
    fn test_register_exporter() {
        let mut manager = ExportManager::new();
        manager.register(Box::new(TestExporter));
        assert!(manager.has_format("test"));
        assert_eq!(manager.export(&empty_data(), "test").unwrap(), "test export");
    }

    #[test]
    fn test_export_unknown_format() {
        let manager = ExportManager::new();
        let result = manager.export(&empty_data(), "csv");
        assert!(matches!(result, Err(SitekitError::Validation(_))));
    }

    #[test]
    fn test_mime_types() {
        let manager = ExportManager::new();
        assert_eq!(manager.get("wxr").unwrap().mime_type(), "application/xml");
        assert_eq!(manager.get("json").unwrap().mime_type(), "application/json");
    }

    #[test]
    fn test_file_name() {
        let manager = ExportManager::new();
        assert_eq!(
            manager.file_name("Acme Corp. (2024)", "wxr").unwrap(),
            "Acme_Corp___2024__wordpress_export.xml"
        );
        assert_eq!(
            manager.file_name("site", "json").unwrap(),
            "site_wordpress_export.json"
        );
        assert!(manager.file_name("site", "csv").is_err());
    }

    #[test]
    fn test_sanitize_file_stem() {
        assert_eq!(sanitize_file_stem("Café-Bar"), "Caf__Bar");
        assert_eq!(sanitize_file_stem("abc123"), "abc123");
    }

    #[test]
    fn test_export_to_file_adds_extension() {
        let temp = TempDir::new().unwrap();
        let manager = ExportManager::new();

        let written = manager
            .export_to_file(&empty_data(), "wxr", &temp.path().join("out/acme"))
            .unwrap();

        assert_eq!(written, temp.path().join("out/acme.xml"));
        let content = fs::read_to_string(&written).unwrap();
        assert!(content.starts_with("<?xml"));
        assert!(!temp.path().join("out/acme.tmp").exists());
    }
}
