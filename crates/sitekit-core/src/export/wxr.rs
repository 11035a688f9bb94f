//! WordPress eXtended RSS (WXR 1.2) exporter

use super::assembler::{ExportData, ExportPost};
use super::exporter::Exporter;
use crate::error::Result;
use chrono::{DateTime, Utc};

/// Generator tag written when none is configured
pub const DEFAULT_GENERATOR: &str = "Content Entry System WordPress Exporter";

/// Post meta key read by the Yoast SEO plugin
pub const META_DESCRIPTION_KEY: &str = "_yoast_wpseo_metadesc";

/// WXR exporter
pub struct WxrExporter {
    generator: String,
}

impl WxrExporter {
    pub fn new() -> Self {
        Self {
            generator: DEFAULT_GENERATOR.to_string(),
        }
    }

    /// Set the channel generator tag
    pub fn with_generator(mut self, generator: impl Into<String>) -> Self {
        self.generator = generator.into();
        self
    }

    fn render_item(post: &ExportPost) -> String {
        let post_date = format_post_date(&post.date);
        let postmeta = match &post.meta_description {
            Some(description) => format!(
                "    <wp:postmeta>\n      <wp:meta_key>{}</wp:meta_key>\n      <wp:meta_value>{}</wp:meta_value>\n    </wp:postmeta>",
                META_DESCRIPTION_KEY,
                cdata(description)
            ),
            None => String::new(),
        };

        let mut item = String::new();
        item.push_str("  <item>\n");
        item.push_str(&format!("    <title>{}</title>\n", escape_xml(&post.title)));
        item.push_str(&format!("    <link>{}</link>\n", escape_xml(&post.slug)));
        item.push_str(&format!("    <pubDate>{}</pubDate>\n", format_rfc1123(&post.date)));
        item.push_str(&format!("    <dc:creator>{}</dc:creator>\n", cdata(&post.author)));
        item.push_str(&format!(
            "    <guid isPermaLink=\"false\">{}</guid>\n",
            escape_xml(&post.slug)
        ));
        item.push_str("    <description></description>\n");
        item.push_str(&format!(
            "    <content:encoded>{}</content:encoded>\n",
            cdata(&post.content)
        ));
        item.push_str(&format!(
            "    <excerpt:encoded>{}</excerpt:encoded>\n",
            cdata(&post.excerpt)
        ));
        item.push_str(&format!("    <wp:post_id>{}</wp:post_id>\n", post.id));
        item.push_str(&format!("    <wp:post_date>{}</wp:post_date>\n", post_date));
        item.push_str(&format!("    <wp:post_date_gmt>{}</wp:post_date_gmt>\n", post_date));
        item.push_str("    <wp:comment_status>closed</wp:comment_status>\n");
        item.push_str("    <wp:ping_status>closed</wp:ping_status>\n");
        item.push_str(&format!("    <wp:post_name>{}</wp:post_name>\n", escape_xml(&post.slug)));
        item.push_str(&format!("    <wp:status>{}</wp:status>\n", post.status));
        item.push_str(&format!(
            "    <wp:post_parent>{}</wp:post_parent>\n",
            post.parent_id.unwrap_or(0)
        ));
        item.push_str(&format!("    <wp:menu_order>{}</wp:menu_order>\n", post.menu_order));
        item.push_str(&format!("    <wp:post_type>{}</wp:post_type>\n", post.post_type));
        item.push_str("    <wp:post_password></wp:post_password>\n");
        item.push_str("    <wp:is_sticky>0</wp:is_sticky>\n");
        item.push_str(&postmeta);
        item.push_str("\n  </item>");
        item
    }
}

impl Default for WxrExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Exporter for WxrExporter {
    fn export(&self, data: &ExportData) -> Result<String> {
        let site = &data.site;
        let items = data
            .posts
            .iter()
            .map(Self::render_item)
            .collect::<Vec<_>>()
            .join("\n");

        let mut wxr = String::new();
        wxr.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        wxr.push_str("<rss version=\"2.0\"\n");
        wxr.push_str("  xmlns:excerpt=\"http://wordpress.org/export/1.2/excerpt/\"\n");
        wxr.push_str("  xmlns:content=\"http://purl.org/rss/1.0/modules/content/\"\n");
        wxr.push_str("  xmlns:wfw=\"http://wellformedweb.org/CommentAPI/\"\n");
        wxr.push_str("  xmlns:dc=\"http://purl.org/dc/elements/1.1/\"\n");
        wxr.push_str("  xmlns:wp=\"http://wordpress.org/export/1.2/\">\n");
        wxr.push('\n');
        wxr.push_str("<channel>\n");
        wxr.push_str(&format!("  <title>{}</title>\n", escape_xml(&site.name)));
        wxr.push_str(&format!("  <link>{}</link>\n", escape_xml(&site.url)));
        wxr.push_str(&format!(
            "  <description>{}</description>\n",
            escape_xml(&site.description)
        ));
        wxr.push_str(&format!("  <pubDate>{}</pubDate>\n", format_rfc1123(&site.export_date)));
        wxr.push_str(&format!("  <language>{}</language>\n", escape_xml(&site.language)));
        wxr.push_str("  <wp:wxr_version>1.2</wp:wxr_version>\n");
        wxr.push_str(&format!(
            "  <wp:base_site_url>{}</wp:base_site_url>\n",
            escape_xml(&site.url)
        ));
        wxr.push_str(&format!(
            "  <wp:base_blog_url>{}</wp:base_blog_url>\n",
            escape_xml(&site.url)
        ));
        wxr.push('\n');
        wxr.push_str(&format!("  <generator>{}</generator>\n", escape_xml(&self.generator)));
        wxr.push('\n');
        wxr.push_str(&items);
        wxr.push_str("\n\n");
        wxr.push_str("</channel>\n");
        wxr.push_str("</rss>");

        Ok(wxr)
    }

    fn format_name(&self) -> &str {
        "wxr"
    }

    fn file_extension(&self) -> &str {
        "xml"
    }

    fn mime_type(&self) -> &str {
        "application/xml"
    }
}

/// Escape text for XML element content
pub fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Wrap text in a CDATA section
///
/// The payload is not escaped. An embedded `]]>` is split across two sections.
pub fn cdata(text: &str) -> String {
    format!("<![CDATA[{}]]>", text.replace("]]>", "]]]]><![CDATA[>"))
}

/// RFC 1123 date, e.g. `Wed, 01 May 2024 12:00:00 GMT`
pub fn format_rfc1123(date: &DateTime<Utc>) -> String {
    date.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// WordPress post date, e.g. `2024-05-01 12:00:00`
pub fn format_post_date(date: &DateTime<Utc>) -> String {
    date.format("%Y-%m-%d %H:%M:%S").to_string()
}
