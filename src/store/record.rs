use crate::model::de::{deserialize_or_default, value_depth, MAX_NESTING};
use chrono::{DateTime, Utc};
use displaydoc::Display;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub const MAX_TITLE_LEN: usize = 200;
pub const MAX_EXCERPT_LEN: usize = 300;

fn default_author() -> String {
    String::from("Admin")
}

fn default_read_time() -> u32 {
    5
}

/// Author and categorization of a post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogMetadata {
    #[serde(default = "default_author")]
    pub author: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Estimated read time in minutes
    #[serde(default = "default_read_time")]
    pub read_time: u32,
}

impl Default for BlogMetadata {
    fn default() -> Self {
        Self {
            author: default_author(),
            category: String::new(),
            tags: Vec::new(),
            read_time: default_read_time(),
        }
    }
}

/// Search engine fields; empty ones fall back to the post's own
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BlogSeo {
    pub meta_title: String,
    pub meta_description: String,
    pub keywords: Vec<String>,
    pub og_image: String,
}

/// A stored blog post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    /// The editor's document tree, kept exactly as it was submitted
    pub content: Value,
    #[serde(default, deserialize_with = "deserialize_or_default")]
    pub featured_image: String,
    #[serde(default, deserialize_with = "deserialize_or_default")]
    pub metadata: BlogMetadata,
    #[serde(default, deserialize_with = "deserialize_or_default")]
    pub seo: BlogSeo,
    #[serde(default)]
    pub published: bool,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub word_count: usize,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The fields of a new post
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BlogInput {
    pub title: String,
    /// Derived from the title when empty
    pub slug: String,
    pub excerpt: String,
    pub content: Value,
    #[serde(deserialize_with = "deserialize_or_default")]
    pub featured_image: String,
    #[serde(deserialize_with = "deserialize_or_default")]
    pub metadata: BlogMetadata,
    #[serde(deserialize_with = "deserialize_or_default")]
    pub seo: BlogSeo,
    #[serde(deserialize_with = "deserialize_or_default")]
    pub published: bool,
    pub published_at: Option<DateTime<Utc>>,
}

/// A partial update; absent fields keep their stored value
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BlogPatch {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<Value>,
    pub featured_image: Option<String>,
    pub metadata: Option<BlogMetadata>,
    pub seo: Option<BlogSeo>,
    pub published: Option<bool>,
    pub published_at: Option<DateTime<Utc>>,
}

/// A record that breaks the presence or length rules
#[derive(Debug, Clone, PartialEq, Eq, Error, Display)]
pub enum ValidationError {
    /// Please provide a title for this blog post
    MissingTitle,
    /// Title cannot be more than 200 characters
    TitleTooLong,
    /// Please provide a slug for this blog post
    MissingSlug,
    /// Please provide an excerpt
    MissingExcerpt,
    /// Excerpt cannot be more than 300 characters
    ExcerptTooLong,
    /// Please provide content for this blog post
    MissingContent,
    /// Content is nested too deeply
    ContentTooDeep,
}

impl BlogRecord {
    /// Check the record's own fields
    ///
    /// Of the content tree only the nesting depth is checked, so that every
    /// stored record can be read back.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::MissingTitle);
        }
        if self.title.chars().count() > MAX_TITLE_LEN {
            return Err(ValidationError::TitleTooLong);
        }
        if self.slug.is_empty() {
            return Err(ValidationError::MissingSlug);
        }
        if self.excerpt.trim().is_empty() {
            return Err(ValidationError::MissingExcerpt);
        }
        if self.excerpt.chars().count() > MAX_EXCERPT_LEN {
            return Err(ValidationError::ExcerptTooLong);
        }
        if self.content.is_null() {
            return Err(ValidationError::MissingContent);
        }
        // the record object itself adds one level on disk
        if value_depth(&self.content) >= MAX_NESTING {
            return Err(ValidationError::ContentTooDeep);
        }
        Ok(())
    }

    /// Apply a patch; publishing a draft stamps the publication time
    pub fn apply(&mut self, patch: BlogPatch, now: DateTime<Utc>) {
        let was_published = self.published;
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(slug) = patch.slug {
            self.slug = normalize_slug(&slug);
        }
        if let Some(excerpt) = patch.excerpt {
            self.excerpt = excerpt;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        if let Some(featured_image) = patch.featured_image {
            self.featured_image = featured_image;
        }
        if let Some(metadata) = patch.metadata {
            self.metadata = metadata;
        }
        if let Some(seo) = patch.seo {
            self.seo = seo;
        }
        if let Some(published) = patch.published {
            self.published = published;
        }
        if patch.published_at.is_some() {
            self.published_at = patch.published_at;
        } else if self.published && !was_published {
            self.published_at = Some(now);
        }
        self.updated_at = now;
    }
}

/// Slugs are stored trimmed and lowercased
pub fn normalize_slug(slug: &str) -> String {
    slug.trim().to_lowercase()
}
