use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};

/// Single revalidation window applied to every cached view model.
pub const DEFAULT_REVALIDATE_SECS: u64 = 3600;

const DEFAULT_IMAGE_HOST: &str = "https://cdn.sanity.io";

#[derive(Debug, Clone, Deserialize)]
pub struct ContentSettings {
    /// Project identity on the content store
    pub project_id: String,

    /// Dataset within the project
    pub dataset: String,

    /// Dated API version, e.g. `2025-01-01`
    pub api_version: String,

    /// Read from the edge-cached API host instead of the live one
    #[serde(default = "default_true")]
    pub use_cdn: bool,

    /// Optional bearer token for private datasets
    #[serde(default)]
    pub token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    pub revalidate_secs: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            revalidate_secs: DEFAULT_REVALIDATE_SECS,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// IP address the JSON API binds to
    pub ip: IpAddr,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            ip: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 3000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImageSettings {
    /// Image-serving host, without a trailing slash
    pub host: String,
}

impl Default for ImageSettings {
    fn default() -> Self {
        Self {
            host: DEFAULT_IMAGE_HOST.to_owned(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub content: ContentSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub images: ImageSettings,
}

fn default_true() -> bool {
    true
}
