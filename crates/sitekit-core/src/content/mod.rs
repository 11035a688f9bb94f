//! Content pages
//!
//! Rich-text pages stored independently of the sitemap. The rendered
//! `content_html` comes from an external editor and is carried verbatim.

mod model;
mod validator;

pub use model::{ContentPage, ContentPageDraft, ContentStatus};
pub use validator::{normalize_url, ContentValidator};
