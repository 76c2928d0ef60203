use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;

use serde::Deserialize;
use snafu::ResultExt;

use crate::api::App;
use crate::error::{ApplicationError, ConfigLoadSnafu};
use crate::model::{Clip, Reel};
use crate::store::Store;

/// Read from `SHOWREEL_`-prefixed environment variables, e.g. `SHOWREEL_HOST_ADDRESS`.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(rename = "host_address", default = "default_host")]
    pub host: SocketAddr,
    #[serde(rename = "clips_path", default = "default_clips_path")]
    pub clips: PathBuf,
    #[serde(rename = "reels_path", default = "default_reels_path")]
    pub reels: PathBuf,
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,
    /// Filter directives used when `RUST_LOG` is not set.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
    #[serde(default)]
    pub log_console: ConsoleFormat,
}

/// How events are written to stdout. The log file is always JSON.
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ConsoleFormat {
    #[default]
    Pretty,
    Compact,
    Json,
}

impl Config {
    pub fn from_env() -> Result<Config, ApplicationError> {
        envy::prefixed("SHOWREEL_")
            .from_env::<Config>()
            .context(ConfigLoadSnafu)
    }

    pub fn app(&self) -> App {
        App::new(
            Arc::new(Store::<Clip>::new(&self.clips)),
            Arc::new(Store::<Reel>::new(&self.reels)),
        )
    }
}

fn default_host() -> SocketAddr {
    (Ipv4Addr::LOCALHOST, 5000).into()
}

fn default_clips_path() -> PathBuf {
    PathBuf::from("data").join("clips.json")
}

fn default_reels_path() -> PathBuf {
    PathBuf::from("data").join("reels.json")
}

fn default_log_dir() -> PathBuf {
    PathBuf::from("logs")
}

fn default_log_filter() -> String {
    "info".into()
}
