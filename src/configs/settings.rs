use std::error::Error;
use std::path::{Path, PathBuf};
use std::{env, fs};

use serde::{Deserialize, Serialize};

use crate::models::Channel;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Logger {
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Api {
    pub base_url: String,
    /// Bearer token for the device status API. May be omitted in the file
    /// and supplied through CLIMALOG_API_TOKEN instead.
    #[serde(default)]
    pub token: Option<String>,
}

impl Api {
    pub fn token(&self) -> &str {
        self.token.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Poller {
    pub interval_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Storage {
    pub data_dir: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub logger: Logger,
    pub api: Api,
    pub poller: Poller,
    pub storage: Storage,
    pub channels: Vec<Channel>,
}

impl Settings {
    pub fn new() -> Result<Self, Box<dyn Error>> {
        let path = env::var("CLIMALOG_CONFIG")
            .unwrap_or_else(|_| String::from("configs/default.toml"));

        let mut settings: Settings = toml::from_str(&fs::read_to_string(&path)?)?;

        if settings.api.token.as_deref().unwrap_or_default().is_empty() {
            settings.api.token = env::var("CLIMALOG_API_TOKEN").ok();
        }

        if settings.api.token().is_empty() {
            return Err("no API token in settings or CLIMALOG_API_TOKEN".into());
        }

        if settings.channels.is_empty() {
            return Err("no channels configured".into());
        }

        Ok(settings)
    }

    /// Backing file of a channel's series, under the data directory.
    pub fn series_path(&self, channel: &Channel) -> PathBuf {
        Path::new(&self.storage.data_dir).join(&channel.file)
    }
}
