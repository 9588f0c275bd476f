//! # Image uploads
//!
//! Uploaded files pass an allow-list on both the declared MIME type and the
//! file extension before anything reaches the object storage.
mod storage;

pub use storage::{FolderStorage, ObjectStorage, StorageError};

use chrono::Utc;
use derive_new::new;
use displaydoc::Display;
use log::*;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

/// MIME types accepted for upload
pub const ALLOWED_TYPES: [&str; 2] = ["image/jpeg", "image/png"];

/// File extensions accepted for upload
pub const ALLOWED_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// A file as received from the client
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Why an upload was refused or failed
#[derive(Debug, Error, Display)]
pub enum UploadError {
    /// No file provided
    MissingFile,
    /// Invalid file type. Only JPG, JPEG, and PNG images are allowed.
    InvalidType(String),
    /// Invalid file extension. Only .jpg, .jpeg, and .png are allowed.
    InvalidExtension(String),
    /// Upload failed: {0}
    Storage(#[from] StorageError),
}

impl UploadError {
    /// Whether the client is at fault
    pub fn is_rejection(&self) -> bool {
        !matches!(self, Self::Storage(_))
    }
}

/// A stored upload
#[derive(Debug, Clone, Serialize)]
pub struct Uploaded {
    pub url: String,
    pub key: String,
}

/// Check a file against the allow-lists
pub fn validate(file: &UploadFile) -> Result<(), UploadError> {
    if file.file_name.is_empty() || file.bytes.is_empty() {
        return Err(UploadError::MissingFile);
    }
    if !ALLOWED_TYPES.contains(&file.content_type.as_str()) {
        return Err(UploadError::InvalidType(file.content_type.clone()));
    }
    let extension = file
        .file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase());
    match extension {
        Some(ext) if ALLOWED_EXTENSIONS.contains(&ext.as_str()) => Ok(()),
        _ => Err(UploadError::InvalidExtension(file.file_name.clone())),
    }
}

/// A unique storage key: `folder/<millis>-<random>-<name>`
pub fn generate_file_key(file_name: &str, folder: &str) -> String {
    let random = Uuid::new_v4().simple().to_string();
    let sanitized: String = file_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' {
                c
            } else {
                '-'
            }
        })
        .collect();
    format!(
        "{}/{}-{}-{}",
        folder,
        Utc::now().timestamp_millis(),
        &random[..6],
        sanitized
    )
}

/// Validates files and hands them to the object storage
#[derive(Clone, new)]
pub struct Uploader {
    storage: Arc<dyn ObjectStorage>,
    folder: String,
}

impl Uploader {
    pub async fn upload(&self, file: UploadFile) -> Result<Uploaded, UploadError> {
        if let Err(err) = validate(&file) {
            warn!("Rejected upload {:?}: {}", file.file_name, err);
            return Err(err);
        }
        let key = generate_file_key(&file.file_name, &self.folder);
        let url = self
            .storage
            .put(&key, &file.content_type, file.bytes)
            .await?;
        info!("Uploaded {:?} as {}", file.file_name, key);
        Ok(Uploaded { url, key })
    }
}
