//! # Public site
//!
//! Server-rendered HTML pages. Every page body is wrapped in the shared
//! [`layout`], which also writes the page's SEO meta tags.
pub mod blog;
pub mod pages;
pub mod sitemap;

use crate::render::{escape_attr, escape_html};
use serde::Deserialize;
use serde_json::Value;

/// Fallback image for social previews
pub const DEFAULT_OG_IMAGE: &str = "/default-og-image.jpg";

fn default_name() -> String {
    String::from("Ways Private Limited")
}

fn default_base_url() -> String {
    String::from("https://www.waysprivate.com.np")
}

fn default_description() -> String {
    String::from(
        "Ways Private Limited is a full-service Nepali movie production company creating films, \
         music videos, and cinematic content for brands and artists worldwide.",
    )
}

/// Site-wide settings
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Organization name used in titles and structured data
    #[serde(default = "default_name")]
    pub name: String,
    /// Absolute URL the site is reachable at, without a trailing slash
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_description")]
    pub description: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            base_url: default_base_url(),
            description: default_description(),
        }
    }
}

impl SiteConfig {
    /// The absolute URL of a site path
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

/// Head metadata of a page
#[derive(Debug, Clone, Default)]
pub struct Meta {
    pub title: String,
    pub description: String,
    pub path: String,
    pub keywords: Vec<String>,
    pub og_image: Option<String>,
    /// `website` unless set
    pub og_type: Option<&'static str>,
    pub published_time: Option<String>,
    /// Structured data embedded as `application/ld+json`
    pub json_ld: Option<Value>,
}

const NAV: [(&str, &str); 7] = [
    ("/", "Home"),
    ("/about", "About"),
    ("/services", "Services"),
    ("/portfolio", "Portfolio"),
    ("/testimonials", "Testimonials"),
    ("/blog", "Blog"),
    ("/contact", "Contact"),
];

/// Serialize structured data so it cannot close its script element
fn json_ld_script(value: &Value) -> String {
    let json = value.to_string().replace("</", "<\\/");
    format!(r#"<script type="application/ld+json">{}</script>"#, json)
}

fn meta_tag(out: &mut String, attr: &str, key: &str, content: &str) {
    out.push_str(&format!(
        r#"<meta {}="{}" content="{}">"#,
        attr,
        key,
        escape_attr(content)
    ));
}

/// Wrap a page body in the site shell
pub fn layout(site: &SiteConfig, meta: &Meta, body: &str) -> String {
    let mut head = String::new();
    head.push_str(&format!("<title>{}</title>", escape_html(&meta.title)));
    meta_tag(&mut head, "name", "description", &meta.description);
    if !meta.keywords.is_empty() {
        meta_tag(&mut head, "name", "keywords", &meta.keywords.join(", "));
    }
    head.push_str(&format!(
        r#"<link rel="canonical" href="{}">"#,
        escape_attr(&site.url(&meta.path))
    ));
    meta_tag(&mut head, "property", "og:title", &meta.title);
    meta_tag(&mut head, "property", "og:description", &meta.description);
    meta_tag(&mut head, "property", "og:url", &site.url(&meta.path));
    meta_tag(&mut head, "property", "og:site_name", &site.name);
    meta_tag(&mut head, "property", "og:type", meta.og_type.unwrap_or("website"));
    if let Some(image) = &meta.og_image {
        meta_tag(&mut head, "property", "og:image", image);
        meta_tag(&mut head, "name", "twitter:image", image);
    }
    if let Some(time) = &meta.published_time {
        meta_tag(&mut head, "property", "article:published_time", time);
    }
    meta_tag(&mut head, "name", "twitter:card", "summary_large_image");
    meta_tag(&mut head, "name", "twitter:title", &meta.title);
    meta_tag(&mut head, "name", "twitter:description", &meta.description);
    if let Some(json_ld) = &meta.json_ld {
        head.push_str(&json_ld_script(json_ld));
    }

    let nav: String = NAV
        .iter()
        .map(|(href, label)| format!(r#"<a href="{}" class="hover:text-white">{}</a>"#, href, label))
        .collect();

    format!(
        concat!(
            "<!DOCTYPE html>",
            r#"<html lang="en"><head><meta charset="utf-8">"#,
            r#"<meta name="viewport" content="width=device-width, initial-scale=1">"#,
            "{head}</head>",
            r#"<body class="antialiased">"#,
            r#"<nav class="fixed top-0 w-full flex gap-6 px-8 py-4 text-slate-300 bg-black/80">{nav}</nav>"#,
            "{body}",
            r#"<footer class="px-8 py-12 text-slate-400 bg-black">&copy; {name}</footer>"#,
            "</body></html>"
        ),
        head = head,
        nav = nav,
        body = body,
        name = escape_html(&site.name),
    )
}
