//! Storage abstraction
//!
//! The core never performs I/O on its own. Callers hand a [`SiteStorage`]
//! implementation to the [`SiteManager`](crate::manager::SiteManager); the
//! `sitekit-storage` crate provides the file-based one.

mod envelope;
mod persistence;

pub use envelope::{StoredFile, CURRENT_SCHEMA_VERSION};
pub use persistence::SiteStorage;

// Re-export memory storage for testing
#[cfg(test)]
pub use persistence::memory::MemoryStorage;
