//! Versioned file envelope and schema migration

use crate::error::{Result, SitekitError};
use crate::types::SchemaVersion;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Current schema version
pub const CURRENT_SCHEMA_VERSION: &str = "1.0";

/// A persisted record wrapped with its schema version
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredFile<T> {
    /// Schema version for migration
    pub schema_version: String,
    /// The record
    pub data: T,
    /// Extra fields for forward compatibility
    #[serde(flatten, default)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl<T> StoredFile<T> {
    /// Wrap a record with the current schema version
    pub fn new(data: T) -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION.to_string(),
            data,
            extra: HashMap::new(),
        }
    }

    /// Get the record, consuming the envelope
    pub fn into_inner(self) -> T {
        self.data
    }

    /// Check if the file needs migration
    pub fn needs_migration(&self) -> bool {
        self.schema_version != CURRENT_SCHEMA_VERSION
    }

    /// Bring the envelope to the current schema version
    pub fn migrate(mut self) -> Result<Self> {
        let version = SchemaVersion::parse(&self.schema_version).ok_or_else(|| {
            SitekitError::UnsupportedSchemaVersion(self.schema_version.clone())
        })?;

        let current = SchemaVersion::V1_0;
        if !version.is_compatible(&current) {
            return Err(SitekitError::UnsupportedSchemaVersion(format!(
                "{} (expected {}.x)",
                self.schema_version, current.major
            )));
        }

        self.schema_version = CURRENT_SCHEMA_VERSION.to_string();
        Ok(self)
    }
}
