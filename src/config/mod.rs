//! # Server configuration

mod storage;

pub use storage::{AdminConfig, StorageConfig};

use crate::site::SiteConfig;
use color_eyre::eyre::WrapErr;
use color_eyre::Report;
use log::*;
use serde::{de, Deserialize, Deserializer};
use std::fmt::Display;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use structopt::StructOpt;
use tokio::fs::read_to_string;
use tracing::instrument;
use uuid::Uuid;

/// The commandline flags for the server
#[derive(Debug, StructOpt)]
pub struct Flags {
    /// Which config file to use
    #[structopt(long = "cfg", short = "c")]
    pub cfg: Option<PathBuf>,
    /// Which port to use (if cfg isn't present)
    #[structopt(long = "port", short = "p")]
    pub port: Option<u16>,
}

fn default_addr() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 9002))
}

/// A configuration for the system
#[derive(Debug, Deserialize)]
pub struct Config {
    /// The address to bind the service to
    #[serde(default = "default_addr", deserialize_with = "deserialize_from_str")]
    pub addr: SocketAddr,
    /// The public site options
    #[serde(default)]
    pub site: SiteConfig,
    /// The admin account
    #[serde(default)]
    pub admin: AdminConfig,
    /// The storage options
    #[serde(default)]
    pub storage: StorageConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            addr: default_addr(),
            site: SiteConfig::default(),
            admin: AdminConfig::default(),
            storage: StorageConfig::default(),
        }
    }
}

impl Config {
    /// Let `ADMIN_USERNAME`, `ADMIN_PASSWORD` and `JWT_SECRET` override the file
    pub fn apply_env<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let admin = &mut self.admin;
        if let Some(username) = var("ADMIN_USERNAME") {
            admin.username = username;
        }
        if let Some(password) = var("ADMIN_PASSWORD") {
            admin.password = password;
        }
        if let Some(secret) = var("JWT_SECRET") {
            admin.jwt_secret = secret;
        }
    }

    /// Fill in what is still missing after the file and the environment
    fn finish(mut self) -> Self {
        if self.admin.username.is_empty() {
            self.admin.username = String::from("admin");
        }
        if self.admin.password.is_empty() {
            warn!("No admin password configured, admin login is disabled");
        }
        if self.admin.jwt_secret.is_empty() {
            warn!("No JWT secret configured, tokens will not survive a restart");
            self.admin.jwt_secret = Uuid::new_v4().simple().to_string();
        }
        self
    }
}

impl Flags {
    #[instrument]
    /// Load the configuration from a file
    pub async fn load_cfg(&self) -> Result<Config, Report> {
        let mut config = if let Some(cfg) = &self.cfg {
            let cfg_string: String = read_to_string(cfg)
                .await
                .wrap_err("Could not read config file")?;
            toml::from_str(&cfg_string).wrap_err("Could not parse config file")?
        } else if let Some(port) = self.port {
            Config {
                addr: SocketAddr::from(([0, 0, 0, 0], port)),
                ..Config::default()
            }
        } else {
            Config::default()
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config.finish())
    }
}

// You can use this deserializer for any type that implements FromStr
// and the FromStr::Err implements Display
fn deserialize_from_str<'de, S, D>(deserializer: D) -> Result<S, D::Error>
where
    S: FromStr,      // Required for S::from_str...
    S::Err: Display, // Required for .map_err(de::Error::custom)
    D: Deserializer<'de>,
{
    let s: String = Deserialize::deserialize(deserializer)?;
    S::from_str(&s).map_err(de::Error::custom)
}
