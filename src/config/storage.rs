use serde::Deserialize;
use std::path::PathBuf;

fn default_data_dir() -> PathBuf {
    PathBuf::from("data/blogs")
}

fn default_upload_dir() -> PathBuf {
    PathBuf::from("data/uploads")
}

fn default_public_url() -> String {
    String::from("/uploads")
}

fn default_folder() -> String {
    String::from("blogs")
}

/// Where posts and uploads are kept
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// The directory with one JSON file per post
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// The root directory of uploaded files
    #[serde(default = "default_upload_dir")]
    pub upload_dir: PathBuf,
    /// The URL prefix uploaded files are served under
    #[serde(default = "default_public_url")]
    pub public_url: String,
    /// The key prefix of blog images
    #[serde(default = "default_folder")]
    pub folder: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            upload_dir: default_upload_dir(),
            public_url: default_public_url(),
            folder: default_folder(),
        }
    }
}

/// The admin account and the token signing key
#[derive(Clone, Default, Deserialize)]
pub struct AdminConfig {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub jwt_secret: String,
}

impl std::fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminConfig")
            .field("username", &self.username)
            .field("password", &"***")
            .field("jwt_secret", &"***")
            .finish()
    }
}
