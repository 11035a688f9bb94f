//! Sitemap tree engine
//!
//! A sitemap is an ordered forest of [`SitemapNode`]s. Each node owns its
//! children by value; the link to a content page is a plain id.
//!
//! # Overview
//!
//! - [`tree`]: read-only lookups (find by id, find by linked content page)
//! - [`mutator`]: pure edits that return a new forest (insert, remove, move)
//!
//! # Example
//!
//! ```
//! use sitekit_core::sitemap::{mutator, tree, InsertPosition, SitemapNode};
//!
//! let home = SitemapNode::new("Home", "/");
//! let about = SitemapNode::new("About", "/about");
//! let home_id = home.id.clone();
//! let about_id = about.id.clone();
//!
//! let pages = mutator::insert(&[], home, None, InsertPosition::After);
//! let pages = mutator::insert(&pages, about, Some(&home_id), InsertPosition::Child);
//!
//! assert_eq!(tree::count_nodes(&pages), 2);
//! assert!(tree::find_node(&pages, &about_id).is_some());
//! ```

mod model;
pub mod mutator;
pub mod tree;

pub use model::{InsertPosition, NodeUpdate, Sitemap, SitemapNode};
