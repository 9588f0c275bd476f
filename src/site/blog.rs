//! Blog index and post pages
use super::{layout, Meta, SiteConfig, DEFAULT_OG_IMAGE};
use crate::render::{escape_attr, escape_html, render_value};
use crate::store::{content, BlogRecord};
use chrono::{DateTime, Utc};
use serde_json::json;

fn display_date(at: Option<DateTime<Utc>>) -> String {
    at.map(|at| at.format("%B %-d, %Y").to_string())
        .unwrap_or_default()
}

fn first_non_empty<'a>(candidates: &[&'a str]) -> &'a str {
    candidates
        .iter()
        .copied()
        .find(|s| !s.is_empty())
        .unwrap_or_default()
}

/// Search engine metadata of a post, with the post's own fields as fallbacks
pub fn seo_meta(site: &SiteConfig, blog: &BlogRecord) -> Meta {
    let og_image = first_non_empty(&[
        blog.seo.og_image.as_str(),
        blog.featured_image.as_str(),
        DEFAULT_OG_IMAGE,
    ]);
    Meta {
        title: first_non_empty(&[blog.seo.meta_title.as_str(), blog.title.as_str()]).to_owned(),
        description: first_non_empty(&[blog.seo.meta_description.as_str(), blog.excerpt.as_str()]).to_owned(),
        path: format!("/blog/{}", blog.slug),
        keywords: blog.seo.keywords.clone(),
        og_image: Some(og_image.to_owned()),
        og_type: Some("article"),
        published_time: blog.published_at.map(|at| at.to_rfc3339()),
        json_ld: Some(json!({
            "@context": "https://schema.org",
            "@type": "BlogPosting",
            "headline": blog.title,
            "description": blog.excerpt,
            "image": blog.featured_image,
            "datePublished": blog.published_at.map(|at| at.to_rfc3339()),
            "dateModified": blog.updated_at.to_rfc3339(),
            "author": { "@type": "Person", "name": blog.metadata.author },
            "publisher": {
                "@type": "Organization",
                "name": site.name,
                "logo": { "@type": "ImageObject", "url": "/logo.png" },
            },
        })),
    }
}

/// A post teaser linking to the full post
pub fn card(blog: &BlogRecord) -> String {
    let image = if blog.featured_image.is_empty() {
        String::new()
    } else {
        format!(
            r#"<img src="{}" alt="{}" class="w-full h-48 object-cover" loading="lazy">"#,
            escape_attr(&blog.featured_image),
            escape_attr(&blog.title)
        )
    };
    format!(
        concat!(
            r#"<a href="/blog/{slug}" class="block rounded-2xl overflow-hidden bg-white dark:bg-gray-800 shadow-lg">"#,
            "{image}",
            r#"<div class="p-6"><p class="text-sm text-blue-600">{category}</p>"#,
            r#"<h3 class="text-xl font-bold text-gray-900 dark:text-white">{title}</h3>"#,
            r#"<p class="text-gray-600 dark:text-gray-400">{excerpt}</p>"#,
            r#"<p class="text-sm text-gray-500">{date} &middot; {read} min read</p></div></a>"#
        ),
        slug = escape_attr(&blog.slug),
        image = image,
        category = escape_html(&blog.metadata.category),
        title = escape_html(&blog.title),
        excerpt = escape_html(&blog.excerpt),
        date = display_date(blog.published_at),
        read = blog.metadata.read_time,
    )
}

/// The list of published posts
pub fn index(site: &SiteConfig, posts: &[BlogRecord]) -> String {
    let meta = Meta {
        title: format!("Blog | {}", site.name),
        description: String::from(
            "Stories, behind-the-scenes notes and news from our productions.",
        ),
        path: String::from("/blog"),
        ..Meta::default()
    };
    let list = if posts.is_empty() {
        String::from(r#"<p class="text-center text-gray-500">No blog posts yet. Check back soon!</p>"#)
    } else {
        format!(
            r#"<div class="grid md:grid-cols-3 gap-8">{}</div>"#,
            posts.iter().map(card).collect::<String>()
        )
    };
    let body = format!(
        concat!(
            r#"<main class="min-h-screen max-w-6xl mx-auto px-4 pt-32 pb-20">"#,
            r#"<h1 class="text-5xl font-bold mb-12 text-gray-900 dark:text-white">Our Blog</h1>"#,
            "{}</main>"
        ),
        list
    );
    layout(site, &meta, &body)
}

/// A full post: header, stored tree rendered to HTML, tags
pub fn post(site: &SiteConfig, blog: &BlogRecord) -> String {
    let meta = seo_meta(site, blog);

    let mut body = String::from(
        r#"<main class="min-h-screen"><article class="max-w-4xl mx-auto px-4 pt-32 pb-20">"#,
    );
    if !blog.metadata.category.is_empty() {
        body.push_str(&format!(
            r#"<div class="mb-4"><span class="inline-block px-4 py-2 text-sm font-semibold text-blue-600 bg-blue-100 rounded-full">{}</span></div>"#,
            escape_html(&blog.metadata.category)
        ));
    }
    body.push_str(&format!(
        r#"<h1 class="text-4xl md:text-5xl font-bold mb-6 text-gray-900 dark:text-white leading-tight">{}</h1>"#,
        escape_html(&blog.title)
    ));
    body.push_str(&format!(
        concat!(
            r#"<div class="flex flex-wrap items-center gap-6 mb-8 text-gray-600 border-b pb-6">"#,
            "<span>{author}</span>",
            r#"<time datetime="{datetime}">{date}</time>"#,
            "<span>{read} min read</span></div>"
        ),
        author = escape_html(&blog.metadata.author),
        datetime = blog
            .published_at
            .map(|at| at.to_rfc3339())
            .unwrap_or_default(),
        date = display_date(blog.published_at),
        read = blog.metadata.read_time,
    ));
    if !blog.featured_image.is_empty() {
        body.push_str(&format!(
            r#"<div class="mb-12 rounded-2xl overflow-hidden shadow-2xl"><img src="{}" alt="{}" class="w-full object-cover"></div>"#,
            escape_attr(&blog.featured_image),
            escape_attr(&blog.title)
        ));
    }
    body.push_str(&format!(
        r#"<div class="mb-8 p-6 bg-blue-50 border-l-4 border-blue-500 rounded-r-lg"><p class="text-lg text-gray-700 italic">{}</p></div>"#,
        escape_html(&blog.excerpt)
    ));
    body.push_str(&format!(
        r#"<div class="mb-12 prose max-w-none">{}</div>"#,
        render_value(content::load(blog))
    ));
    if !blog.metadata.tags.is_empty() {
        let tags: String = blog
            .metadata
            .tags
            .iter()
            .map(|tag| {
                format!(
                    r#"<span class="px-4 py-2 bg-gray-100 text-gray-700 rounded-full text-sm">{}</span>"#,
                    escape_html(tag)
                )
            })
            .collect();
        body.push_str(&format!(
            r#"<div class="pt-8 border-t"><h3 class="text-lg font-semibold mb-4">Tags</h3><div class="flex flex-wrap gap-3">{}</div></div>"#,
            tags
        ));
    }
    body.push_str("</article></main>");

    layout(site, &meta, &body)
}
