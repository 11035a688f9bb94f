//! WordPress export pipeline
//!
//! The [`ExportAssembler`] flattens a sitemap and its linked content pages into
//! an ordered list of [`ExportPost`]s. Exporters then render that list:
//!
//! - `wxr`: WordPress eXtended RSS 1.2, importable by the WordPress importer
//! - `json` / `json-compact`: structural dump of [`ExportData`]
//!
//! # Example
//!
//! ```ignore
//! use sitekit_core::export::{ExportAssembler, ExportManager};
//!
//! let data = ExportAssembler::new().assemble(&site.name, url, &sitemap.pages, &pages, Utc::now());
//! let xml = ExportManager::new().export(&data, "wxr")?;
//! ```

mod assembler;
mod backup;
mod exporter;
mod json;
mod stats;
mod wxr;

pub use assembler::{
    slug_from_url, ExportAssembler, ExportData, ExportPost, ExportSite, ExportTerm, PostStatus,
    PostType,
};
pub use backup::SiteBackup;
pub use exporter::{sanitize_file_stem, ExportManager, Exporter};
pub use json::JsonExporter;
pub use stats::{ExportPreview, ExportStats, PreviewSite};
pub use wxr::{cdata, escape_xml, WxrExporter, DEFAULT_GENERATOR, META_DESCRIPTION_KEY};
