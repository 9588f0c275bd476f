//! # Blog storage
//!
//! Posts are kept in memory and mirrored to one JSON file per post in the
//! store directory. Files are written to a temporary name first and then
//! renamed over the old one, so a crash never leaves half a post on disk.
pub mod content;
mod record;

pub use record::{
    normalize_slug, BlogInput, BlogMetadata, BlogPatch, BlogRecord, BlogSeo, ValidationError,
    MAX_EXCERPT_LEN, MAX_TITLE_LEN,
};

use crate::model::{de, word_count};
use crate::util::{make_unique_slug, slugify};
use chrono::Utc;
use displaydoc::Display;
use log::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tokio::sync::RwLock;
use tracing::instrument;
use uuid::Uuid;

/// Default page size of a listing
pub const DEFAULT_LIMIT: usize = 10;

/// Largest page size a listing hands out
pub const MAX_LIMIT: usize = 100;

/// Why a store operation failed
#[derive(Debug, Error, Display)]
pub enum StoreError {
    /// {0}
    Invalid(#[from] ValidationError),
    /// A blog with this slug already exists
    DuplicateSlug(String),
    /// Blog not found
    NotFound(String),
    /// Storage error at {path:?}: {source}
    Io { path: PathBuf, source: io::Error },
    /// Could not encode blog {0}: {1}
    Json(String, serde_json::Error),
}

fn default_page() -> usize {
    1
}

fn default_limit() -> usize {
    DEFAULT_LIMIT
}

/// Which page of posts to list
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    #[serde(default = "default_page")]
    pub page: usize,
    #[serde(default = "default_limit")]
    pub limit: usize,
    /// Include drafts; only honored for admins
    #[serde(default)]
    pub include_unpublished: bool,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: default_page(),
            limit: default_limit(),
            include_unpublished: false,
        }
    }
}

/// Position of a page within a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: usize,
    pub limit: usize,
    pub total: usize,
    pub total_pages: usize,
}

/// One page of posts
#[derive(Debug, Clone)]
pub struct Page {
    pub blogs: Vec<BlogRecord>,
    pub pagination: Pagination,
}

/// Newest publication first, then newest creation
fn newest_first(a: &BlogRecord, b: &BlogRecord) -> std::cmp::Ordering {
    b.published_at
        .cmp(&a.published_at)
        .then_with(|| b.created_at.cmp(&a.created_at))
}

/// The post collection
#[derive(Debug)]
pub struct BlogStore {
    dir: PathBuf,
    records: RwLock<HashMap<String, BlogRecord>>,
}

impl BlogStore {
    /// Open a store directory, creating it if needed, and load every post in it
    #[instrument]
    pub async fn open(dir: PathBuf) -> Result<Self, StoreError> {
        let io_err = |source| StoreError::Io {
            path: dir.clone(),
            source,
        };
        fs::create_dir_all(&dir).await.map_err(io_err)?;

        let mut records = HashMap::new();
        let mut entries = fs::read_dir(&dir).await.map_err(io_err)?;
        while let Some(entry) = entries.next_entry().await.map_err(io_err)? {
            let path = entry.path();
            if path.extension().map_or(true, |ext| ext != "json") {
                continue;
            }
            let bytes = match fs::read(&path).await {
                Ok(bytes) => bytes,
                Err(e) => {
                    warn!("Could not read {:?}: {}", path, e);
                    continue;
                }
            };
            match de::from_slice_deep::<BlogRecord>(&bytes) {
                Ok(record) => {
                    records.insert(record.id.clone(), record);
                }
                Err(e) => warn!("Skipping unreadable blog {:?}: {}", path, e),
            }
        }
        info!("Loaded {} blogs from {:?}", records.len(), dir);

        Ok(Self {
            dir,
            records: RwLock::new(records),
        })
    }

    fn path_for(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{}.json", id))
    }

    async fn persist(&self, record: &BlogRecord) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(record)
            .map_err(|e| StoreError::Json(record.id.clone(), e))?;
        let path = self.path_for(&record.id);
        let tmp = path.with_extension("json.tmp");
        write_then_rename(&tmp, &path, bytes).await
    }

    /// Create a post; a missing slug is derived from the title
    pub async fn create(&self, input: BlogInput) -> Result<BlogRecord, StoreError> {
        let mut records = self.records.write().await;
        let taken = |slug: &str| records.values().any(|r| r.slug == slug);

        let mut slug = normalize_slug(&input.slug);
        if slug.is_empty() {
            slug = make_unique_slug(&slugify(&input.title), taken);
        } else if taken(&slug) {
            return Err(StoreError::DuplicateSlug(slug));
        }

        let now = Utc::now();
        let published_at = match input.published_at {
            Some(at) => Some(at),
            None if input.published => Some(now),
            None => None,
        };
        let mut record = BlogRecord {
            id: Uuid::new_v4().simple().to_string(),
            title: input.title,
            slug,
            excerpt: input.excerpt,
            content: input.content,
            featured_image: input.featured_image,
            metadata: input.metadata,
            seo: input.seo,
            published: input.published,
            published_at,
            word_count: 0,
            created_at: now,
            updated_at: now,
        };
        record.validate()?;
        record.word_count = word_count(&content::tree(&record));

        self.persist(&record).await?;
        info!("Created blog {} ({})", record.id, record.slug);
        records.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    pub async fn get(&self, id: &str) -> Option<BlogRecord> {
        self.records.read().await.get(id).cloned()
    }

    pub async fn get_by_slug(&self, slug: &str) -> Option<BlogRecord> {
        let slug = normalize_slug(slug);
        let records = self.records.read().await;
        records.values().find(|r| r.slug == slug).cloned()
    }

    /// One page of posts, newest first
    pub async fn list(&self, query: &ListQuery) -> Page {
        let page = query.page.max(1);
        let limit = match query.limit {
            0 => DEFAULT_LIMIT,
            limit => limit.min(MAX_LIMIT),
        };

        let records = self.records.read().await;
        let mut blogs: Vec<&BlogRecord> = records
            .values()
            .filter(|r| query.include_unpublished || r.published)
            .collect();
        blogs.sort_by(|a, b| newest_first(a, b));

        let total = blogs.len();
        let blogs = blogs
            .into_iter()
            .skip((page - 1).saturating_mul(limit))
            .take(limit)
            .cloned()
            .collect();
        Page {
            blogs,
            pagination: Pagination {
                page,
                limit,
                total,
                total_pages: total.div_ceil(limit),
            },
        }
    }

    /// Every published post, newest first
    pub async fn published(&self) -> Vec<BlogRecord> {
        let records = self.records.read().await;
        let mut blogs: Vec<BlogRecord> = records.values().filter(|r| r.published).cloned().collect();
        blogs.sort_by(newest_first);
        blogs
    }

    /// Apply a partial update; the last write wins
    pub async fn update(&self, id: &str, patch: BlogPatch) -> Result<BlogRecord, StoreError> {
        let mut records = self.records.write().await;
        let mut record = records
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_owned()))?;

        record.apply(patch, Utc::now());
        record.validate()?;
        let clash = records
            .values()
            .any(|other| other.id != record.id && other.slug == record.slug);
        if clash {
            return Err(StoreError::DuplicateSlug(record.slug));
        }
        record.word_count = word_count(&content::tree(&record));

        self.persist(&record).await?;
        debug!("Updated blog {}", record.id);
        records.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    pub async fn delete(&self, id: &str) -> Result<BlogRecord, StoreError> {
        let mut records = self.records.write().await;
        if !records.contains_key(id) {
            return Err(StoreError::NotFound(id.to_owned()));
        }
        let path = self.path_for(id);
        match fs::remove_file(&path).await {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(source) => return Err(StoreError::Io { path, source }),
        }
        info!("Deleted blog {}", id);
        records
            .remove(id)
            .ok_or_else(|| StoreError::NotFound(id.to_owned()))
    }
}

async fn write_then_rename(tmp: &Path, path: &Path, bytes: Vec<u8>) -> Result<(), StoreError> {
    fs::write(tmp, bytes).await.map_err(|source| StoreError::Io {
        path: tmp.to_owned(),
        source,
    })?;
    fs::rename(tmp, path).await.map_err(|source| StoreError::Io {
        path: path.to_owned(),
        source,
    })
}
