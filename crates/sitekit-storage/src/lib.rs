//! sitekit-storage - Storage library for sitekit
//!
//! This crate provides the file system implementation of
//! [`sitekit_core::storage::SiteStorage`].

mod site_store;

pub use site_store::FileSystemStorage;
