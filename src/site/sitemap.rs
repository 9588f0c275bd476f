//! `sitemap.xml` for search engines
use crate::render::escape_html;
use crate::store::BlogRecord;
use chrono::{DateTime, SecondsFormat, Utc};

/// One `<url>` entry
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub loc: String,
    pub last_modified: DateTime<Utc>,
    pub change_frequency: &'static str,
    pub priority: f32,
}

/// Fixed pages with their change frequency and priority
static PAGES: [(&str, &str, f32); 5] = [
    ("", "yearly", 1.0),
    ("/about", "monthly", 0.8),
    ("/contact", "monthly", 0.8),
    ("/testimonials", "monthly", 0.5),
    ("/blog", "daily", 0.9),
];

/// The fixed pages followed by one entry per published post
pub fn entries(base_url: &str, posts: &[BlogRecord], now: DateTime<Utc>) -> Vec<Entry> {
    let base_url = base_url.trim_end_matches('/');
    let pages = PAGES.iter().map(|&(path, freq, priority)| Entry {
        loc: format!("{}{}", base_url, path),
        last_modified: now,
        change_frequency: freq,
        priority,
    });
    let blogs = posts.iter().filter(|p| p.published).map(|post| Entry {
        loc: format!("{}/blog/{}", base_url, post.slug),
        last_modified: post.updated_at,
        change_frequency: "weekly",
        priority: 0.7,
    });
    pages.chain(blogs).collect()
}

/// Render the sitemap XML document
pub fn build(base_url: &str, posts: &[BlogRecord]) -> String {
    let mut xml = String::from(concat!(
        r#"<?xml version="1.0" encoding="UTF-8"?>"#,
        "\n",
        r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#,
        "\n"
    ));
    for entry in entries(base_url, posts, Utc::now()) {
        xml.push_str(&format!(
            "<url><loc>{}</loc><lastmod>{}</lastmod><changefreq>{}</changefreq><priority>{:.1}</priority></url>\n",
            escape_html(&entry.loc),
            entry.last_modified.to_rfc3339_opts(SecondsFormat::Secs, true),
            entry.change_frequency,
            entry.priority
        ));
    }
    xml.push_str("</urlset>\n");
    xml
}
