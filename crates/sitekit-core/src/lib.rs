//! sitekit-core - Core library for sitekit
//!
//! This crate holds the sitemap tree engine, content pages, and the WordPress
//! export pipeline (WXR and JSON). Storage is abstracted behind
//! [`storage::SiteStorage`]; [`manager::SiteManager`] ties everything together.

pub mod error;
pub mod types;
pub mod config;
pub mod site;
pub mod sitemap;
pub mod content;
pub mod export;
pub mod storage;
pub mod manager;

pub use error::{Result, SitekitError};
pub use types::*;
