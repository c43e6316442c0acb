use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default cover image source; `{asin}` is replaced with the book's ASIN.
pub const DEFAULT_COVER_URL_TEMPLATE: &str =
    "http://images-jp.amazon.com/images/P/{asin}.09.LZZZZZZZ.jpg";

/// Cover fetch parameters (optional section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CoverConfig {
    /// Seconds to wait for the TCP/TLS connection.
    pub connect_timeout_secs: u64,
    /// Seconds allowed for the whole GET.
    pub timeout_secs: u64,
}

impl Default for CoverConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 15,
            timeout_secs: 60,
        }
    }
}

/// Global configuration loaded from `~/.config/bookren/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookrenConfig {
    /// Separator placed between the ASIN and the author list.
    pub author_prefix: String,
    /// Maximum file name length in bytes (ext4 NAME_MAX).
    pub max_name_bytes: usize,
    /// Extra bytes kept free beyond the longest companion suffix, so that
    /// converters which append to the name (kepubify) still fit.
    pub reserve_bytes: usize,
    /// URL used when no local `cover.jpg` exists. Must contain `{asin}`.
    pub cover_url_template: String,
    /// Optional cover fetch timeouts; if missing, built-in defaults are used.
    #[serde(default)]
    pub cover: Option<CoverConfig>,
}

impl Default for BookrenConfig {
    fn default() -> Self {
        Self {
            author_prefix: " - ".to_string(),
            max_name_bytes: 255,
            reserve_bytes: 21,
            cover_url_template: DEFAULT_COVER_URL_TEMPLATE.to_string(),
            cover: None,
        }
    }
}

impl BookrenConfig {
    /// Cover settings, falling back to defaults when the section is absent.
    pub fn cover_settings(&self) -> CoverConfig {
        self.cover.clone().unwrap_or_default()
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("bookren")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<BookrenConfig> {
    let path = config_path()?;
    load_or_init_at(&path)
}

/// Same as [`load_or_init`] but at an explicit path.
pub fn load_or_init_at(path: &Path) -> Result<BookrenConfig> {
    if !path.exists() {
        let default_cfg = BookrenConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path)?;
    let cfg: BookrenConfig =
        toml::from_str(&data).with_context(|| format!("invalid config {}", path.display()))?;
    Ok(cfg)
}

/// [`load_or_init`], falling back to built-in defaults (with a warning) when
/// the config file cannot be located, created or parsed.
pub fn load_or_default() -> BookrenConfig {
    or_default(config_path().and_then(|path| load_or_init_at(&path)))
}

/// Same as [`load_or_default`] but at an explicit path.
pub fn load_or_default_at(path: &Path) -> BookrenConfig {
    or_default(load_or_init_at(path))
}

fn or_default(loaded: Result<BookrenConfig>) -> BookrenConfig {
    match loaded {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::warn!("config unavailable, using defaults: {:#}", e);
            BookrenConfig::default()
        }
    }
}
