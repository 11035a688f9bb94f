//! File system storage for sites
//!
//! Layout under the base directory:
//!
//! ```text
//! sites/<site_id>/site.json
//! sites/<site_id>/sitemap.json
//! sites/<site_id>/content/<content_page_id>.json
//! ```

use serde::de::DeserializeOwned;
use serde::Serialize;
use sitekit_core::content::ContentPage;
use sitekit_core::error::{Result, SitekitError};
use sitekit_core::site::Site;
use sitekit_core::sitemap::Sitemap;
use sitekit_core::storage::{SiteStorage, StoredFile, CURRENT_SCHEMA_VERSION};
use sitekit_core::types::{ContentPageId, SiteId};
use std::fs;
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const SITE_FILE: &str = "site.json";
const SITEMAP_FILE: &str = "sitemap.json";
const CONTENT_DIR: &str = "content";

/// File system based site storage
pub struct FileSystemStorage {
    /// Base directory for storage
    base_dir: PathBuf,
    /// Sites subdirectory
    sites_dir: PathBuf,
}

impl FileSystemStorage {
    /// Create a new file system storage
    pub fn new(base_dir: impl Into<PathBuf>) -> Result<Self> {
        let base_dir = base_dir.into();
        let sites_dir = base_dir.join("sites");

        let storage = Self {
            base_dir,
            sites_dir,
        };

        storage.ensure_dirs()?;
        Ok(storage)
    }

    /// Create storage in the platform data directory (~/.sitekit as a fallback)
    pub fn default_location() -> Result<Self> {
        Self::new(Self::default_dir())
    }

    /// Platform data directory used by [`Self::default_location`]
    pub fn default_dir() -> PathBuf {
        directories::ProjectDirs::from("com", "sitekit", "sitekit")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| {
                dirs::home_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join(".sitekit")
            })
    }

    fn ensure_dirs(&self) -> Result<()> {
        if !self.sites_dir.exists() {
            fs::create_dir_all(&self.sites_dir).map_err(|e| {
                SitekitError::Io(std::io::Error::new(
                    e.kind(),
                    format!("Failed to create sites directory: {}", e),
                ))
            })?;
            debug!("Created sites directory: {:?}", self.sites_dir);
        }
        Ok(())
    }

    fn site_dir(&self, id: &SiteId) -> PathBuf {
        self.sites_dir.join(id.as_str())
    }

    fn site_path(&self, id: &SiteId) -> PathBuf {
        self.site_dir(id).join(SITE_FILE)
    }

    fn sitemap_path(&self, id: &SiteId) -> PathBuf {
        self.site_dir(id).join(SITEMAP_FILE)
    }

    fn content_dir(&self, id: &SiteId) -> PathBuf {
        self.site_dir(id).join(CONTENT_DIR)
    }

    fn content_path(&self, site_id: &SiteId, id: &ContentPageId) -> PathBuf {
        self.content_dir(site_id).join(format!("{}.json", id))
    }

    /// Get a temporary path for atomic writes
    fn temp_path(path: &Path) -> PathBuf {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("record.json");
        path.with_file_name(format!(".{}.tmp", name))
    }

    /// Write a record atomically (write to temp, then rename)
    fn atomic_write<T: Serialize>(path: &Path, record: &T) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let temp_path = Self::temp_path(path);
        let file = StoredFile::new(record);

        let temp_file = fs::File::create(&temp_path).map_err(|e| {
            SitekitError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to create temp file: {}", e),
            ))
        })?;
        let mut writer = BufWriter::new(temp_file);
        serde_json::to_writer_pretty(&mut writer, &file)?;
        writer.flush()?;

        fs::rename(&temp_path, path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            SitekitError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to rename temp file: {}", e),
            ))
        })?;

        debug!("Wrote {:?}", path);
        Ok(())
    }

    /// Read a record, returning `None` when the file does not exist
    fn read_file<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
        let file = match fs::File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(SitekitError::Io(e)),
        };

        let stored: StoredFile<T> = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| SitekitError::from(e).with_context(format!("{}", path.display())))?;

        let stored = if stored.needs_migration() {
            info!(
                "Migrating {:?} from version {} to {}",
                path, stored.schema_version, CURRENT_SCHEMA_VERSION
            );
            stored.migrate()?
        } else {
            stored
        };

        Ok(Some(stored.into_inner()))
    }

    /// JSON files in `dir`, skipping temp files
    fn json_files(dir: &Path) -> Result<Vec<PathBuf>> {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(SitekitError::Io(std::io::Error::new(
                    e.kind(),
                    format!("Failed to read directory {:?}: {}", dir, e),
                )))
            }
        };

        let mut paths = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    warn!("Failed to read directory entry: {}", e);
                    continue;
                }
            };

            let path = entry.path();
            if !path.extension().map(|e| e == "json").unwrap_or(false) {
                continue;
            }
            if path
                .file_name()
                .and_then(|n| n.to_str())
                .map(|n| n.starts_with('.'))
                .unwrap_or(false)
            {
                continue;
            }
            paths.push(path);
        }

        paths.sort();
        Ok(paths)
    }

    /// Get base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get sites directory
    pub fn sites_dir(&self) -> &PathBuf {
        &self.sites_dir
    }
}

impl SiteStorage for FileSystemStorage {
    fn save_site(&self, site: &Site) -> Result<()> {
        Self::atomic_write(&self.site_path(&site.id), site)
    }

    fn load_site(&self, id: &SiteId) -> Result<Site> {
        Self::read_file(&self.site_path(id))?
            .ok_or_else(|| SitekitError::SiteNotFound(id.to_string()))
    }

    fn list_sites(&self) -> Result<Vec<Site>> {
        let entries = fs::read_dir(&self.sites_dir).map_err(|e| {
            SitekitError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read sites directory: {}", e),
            ))
        })?;

        let mut sites = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    warn!("Failed to read directory entry: {}", e);
                    continue;
                }
            };

            let path = entry.path().join(SITE_FILE);
            match Self::read_file::<Site>(&path) {
                Ok(Some(site)) => sites.push(site),
                Ok(None) => {}
                Err(e) => warn!("Failed to read site file {:?}: {}", path, e),
            }
        }

        Ok(sites)
    }

    fn delete_site(&self, id: &SiteId) -> Result<()> {
        let dir = self.site_dir(id);

        if !self.site_path(id).exists() {
            return Err(SitekitError::SiteNotFound(id.to_string()));
        }

        fs::remove_dir_all(&dir).map_err(|e| {
            SitekitError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to delete site directory: {}", e),
            ))
        })?;

        debug!("Deleted site {} from {:?}", id, dir);
        Ok(())
    }

    fn site_exists(&self, id: &SiteId) -> bool {
        self.site_path(id).exists()
    }

    fn load_sitemap(&self, site_id: &SiteId) -> Result<Option<Sitemap>> {
        Self::read_file(&self.sitemap_path(site_id))
    }

    fn save_sitemap(&self, sitemap: &Sitemap) -> Result<()> {
        Self::atomic_write(&self.sitemap_path(&sitemap.site_id), sitemap)
    }

    fn list_content_pages(&self, site_id: &SiteId) -> Result<Vec<ContentPage>> {
        let mut pages = Vec::new();
        for path in Self::json_files(&self.content_dir(site_id))? {
            match Self::read_file::<ContentPage>(&path) {
                Ok(Some(page)) => pages.push(page),
                Ok(None) => {}
                Err(e) => warn!("Failed to read content page {:?}: {}", path, e),
            }
        }
        Ok(pages)
    }

    fn save_content_page(&self, page: &ContentPage) -> Result<()> {
        Self::atomic_write(&self.content_path(&page.site_id, &page.id), page)
    }

    fn load_content_page(&self, site_id: &SiteId, id: &ContentPageId) -> Result<ContentPage> {
        Self::read_file(&self.content_path(site_id, id))?
            .ok_or_else(|| SitekitError::ContentPageNotFound(id.to_string()))
    }

    fn delete_content_page(&self, site_id: &SiteId, id: &ContentPageId) -> Result<()> {
        let path = self.content_path(site_id, id);

        if !path.exists() {
            return Err(SitekitError::ContentPageNotFound(id.to_string()));
        }

        fs::remove_file(&path).map_err(|e| {
            SitekitError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to delete content page file: {}", e),
            ))
        })?;

        debug!("Deleted content page {} from {:?}", id, path);
        Ok(())
    }
}
