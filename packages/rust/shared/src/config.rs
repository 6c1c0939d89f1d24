//! Application configuration for the web content chunker.
//!
//! User config lives at `~/.webchunker/webchunker.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ChunkerError, Result};
use crate::types::BoundaryRule;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "webchunker.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".webchunker";

/// User-Agent string sent with fetch requests unless overridden.
pub const DEFAULT_USER_AGENT: &str = concat!("WebContentChunker/", env!("CARGO_PKG_VERSION"));

// ---------------------------------------------------------------------------
// Config structs (matching webchunker.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP fetch settings.
    #[serde(default)]
    pub fetch: FetchSection,

    /// Segmentation and assembly settings.
    #[serde(default)]
    pub extraction: ExtractionSection,
}

/// `[fetch]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchSection {
    /// Whole-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User-Agent header value.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Maximum redirects followed before giving up.
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,
}

impl Default for FetchSection {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            max_redirects: default_max_redirects(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}
fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.into()
}
fn default_max_redirects() -> usize {
    5
}

/// `[extraction]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionSection {
    /// Which heading closes a section.
    #[serde(default)]
    pub boundary: BoundaryRule,

    /// Fold sections with identical titles into the first one.
    #[serde(default)]
    pub merge_duplicate_titles: bool,

    /// Emit level-0 "Navigation" and "Footer Links" sections.
    #[serde(default)]
    pub include_navigation: bool,

    /// Emit one content item per list entry instead of one per list.
    #[serde(default)]
    pub split_list_items: bool,

    /// Attach the heading analysis to the result.
    #[serde(default)]
    pub debug_headings: bool,

    /// Minimum length a section content item must exceed.
    #[serde(default = "default_section_min_len")]
    pub section_min_len: usize,
}

impl Default for ExtractionSection {
    fn default() -> Self {
        Self {
            boundary: BoundaryRule::default(),
            merge_duplicate_titles: false,
            include_navigation: false,
            split_list_items: false,
            debug_headings: false,
            section_min_len: default_section_min_len(),
        }
    }
}

fn default_section_min_len() -> usize {
    15
}

// ---------------------------------------------------------------------------
// Runtime configs (merged from config file + CLI flags)
// ---------------------------------------------------------------------------

/// Runtime fetch configuration.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Whole-request timeout in seconds.
    pub timeout_secs: u64,
    /// User-Agent header value.
    pub user_agent: String,
    /// Maximum redirects followed.
    pub max_redirects: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for FetchConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            timeout_secs: config.fetch.timeout_secs,
            user_agent: config.fetch.user_agent.clone(),
            max_redirects: config.fetch.max_redirects,
        }
    }
}

/// Runtime extraction configuration.
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    /// Which heading closes a section.
    pub boundary: BoundaryRule,
    /// Fold sections with identical titles into the first one.
    pub merge_duplicate_titles: bool,
    /// Emit level-0 navigation/footer sections.
    pub include_navigation: bool,
    /// One content item per list entry.
    pub split_list_items: bool,
    /// Attach the heading analysis to the result.
    pub debug_headings: bool,
    /// Minimum length a section content item must exceed.
    pub section_min_len: usize,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for ExtractConfig {
    fn from(config: &AppConfig) -> Self {
        let ex = &config.extraction;
        Self {
            boundary: ex.boundary,
            merge_duplicate_titles: ex.merge_duplicate_titles,
            include_navigation: ex.include_navigation,
            split_list_items: ex.split_list_items,
            debug_headings: ex.debug_headings,
            section_min_len: ex.section_min_len,
        }
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.webchunker/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| ChunkerError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.webchunker/webchunker.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| ChunkerError::io(path, e))?;

    let config: AppConfig = toml::from_str(&content).map_err(|e| {
        ChunkerError::config(format!("failed to parse {}: {e}", path.display()))
    })?;

    if config.fetch.timeout_secs == 0 {
        return Err(ChunkerError::config(format!(
            "{}: fetch.timeout_secs must be greater than zero",
            path.display()
        )));
    }

    Ok(config)
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| ChunkerError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content = toml::to_string_pretty(&config)
        .map_err(|e| ChunkerError::Serialization(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| ChunkerError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}
