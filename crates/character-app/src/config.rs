// File: src/config.rs
// Purpose: Configuration parsing from characters.toml

use anyhow::{Context, Result};
use character_router::{HistoryMode, DEFAULT_MAX_REDIRECTS};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default config file name
pub const DEFAULT_CONFIG_PATH: &str = "characters.toml";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub app: AppConfig,

    #[serde(default)]
    pub router: RouterConfig,

    #[serde(default)]
    pub server: ServerConfig,
}

/// Page and mount settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_title")]
    pub title: String,

    /// Selector of the element the app mounts into
    #[serde(default = "default_mount")]
    pub mount: String,
}

/// Which part of the URL the router reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum HistoryKind {
    #[default]
    Web,
    Hash,
}

/// Routing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouterConfig {
    #[serde(default)]
    pub history: HistoryKind,

    /// Base path for web history, or the document path for hash history
    #[serde(default = "default_base")]
    pub base: String,

    /// Whether literal route segments ignore ASCII case (default: false)
    #[serde(default)]
    pub case_insensitive: bool,

    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_title() -> String {
    "Characters".to_string()
}

fn default_mount() -> String {
    "#app".to_string()
}

fn default_base() -> String {
    "/".to_string()
}

fn default_max_redirects() -> usize {
    DEFAULT_MAX_REDIRECTS
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            mount: default_mount(),
        }
    }
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            history: HistoryKind::Web,
            base: default_base(),
            case_insensitive: false,
            max_redirects: default_max_redirects(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl RouterConfig {
    /// History mode described by `history` and `base`
    pub fn history_mode(&self) -> HistoryMode {
        match self.history {
            HistoryKind::Web => HistoryMode::web(&self.base),
            HistoryKind::Hash if self.base == "/" => HistoryMode::hash(""),
            HistoryKind::Hash => HistoryMode::hash(self.base.clone()),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// A missing or empty file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        Ok(config)
    }

    /// Load configuration from default path (./characters.toml)
    pub fn load_default() -> Result<Self> {
        Self::load(DEFAULT_CONFIG_PATH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.app.title, "Characters");
        assert_eq!(config.app.mount, "#app");
        assert_eq!(config.router.history, HistoryKind::Web);
        assert!(!config.router.case_insensitive);
        assert_eq!(config.router.max_redirects, DEFAULT_MAX_REDIRECTS);
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.host, "127.0.0.1");
    }

    #[test]
    fn test_empty_config() {
        let config = toml::from_str::<Config>("").unwrap_or_default();
        assert_eq!(config.app.mount, "#app");
        assert_eq!(config.router.base, "/");
    }

    #[test]
    fn test_partial_sections() {
        let toml = r##"
            [app]
            mount = "#root"

            [router]
            history = "hash"
            max_redirects = 3
        "##;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.app.mount, "#root");
        assert_eq!(config.app.title, "Characters");
        assert_eq!(config.router.history, HistoryKind::Hash);
        assert_eq!(config.router.max_redirects, 3);
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_history_mode() {
        let mut router = RouterConfig::default();
        assert_eq!(router.history_mode(), HistoryMode::web("/"));

        router.base = "/app/".to_string();
        assert_eq!(router.history_mode(), HistoryMode::web("/app"));

        router.history = HistoryKind::Hash;
        router.base = "/".to_string();
        assert_eq!(router.history_mode(), HistoryMode::hash(""));
    }

    #[test]
    fn test_unknown_history_is_an_error() {
        let result = toml::from_str::<Config>("[router]\nhistory = \"memory\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path().join("nope.toml")).unwrap();
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nport = 8080").unwrap();
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_load_invalid_file_has_context() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server\nport = ").unwrap();
        let err = Config::load(file.path()).unwrap_err();
        assert!(err.to_string().starts_with("Failed to parse config file"));
    }
}
