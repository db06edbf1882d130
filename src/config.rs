//! Configuration loader and validator for the launch dashboard.
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

pub const DEFAULT_API_BASE: &str = "https://api.spacexdata.com/v4/";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(&'static str),
}

/// Root configuration struct mirroring the YAML schema.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub api: Api,
    pub view: View,
    pub app: App,
}

/// Remote data source settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Api {
    pub base_url: String,
    pub user_agent: String,
    /// Unset means requests may hang forever and the page stays loading.
    pub timeout_secs: Option<u64>,
}

impl Default for Api {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE.to_string(),
            user_agent: concat!("launch-board/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_secs: None,
        }
    }
}

/// Presentation settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct View {
    pub card_details_budget: usize,
    pub row_details_budget: usize,
}

impl Default for View {
    fn default() -> Self {
        Self {
            card_details_budget: 120,
            row_details_budget: 170,
        }
    }
}

/// App-level settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct App {
    pub out_dir: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            out_dir: "./site".to_string(),
        }
    }
}

impl Config {
    /// Ensure the HTML output directory exists.
    pub fn ensure_dirs(&self) -> Result<(), std::io::Error> {
        if self.app.out_dir.trim().is_empty() {
            return Ok(());
        }
        fs::create_dir_all(&self.app.out_dir)
    }
}

/// Load configuration from a YAML file and validate it.
/// - If `path` is None, uses `config.yaml` in the current working directory.
/// - A missing file yields the built-in defaults.
pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
    let path = path.unwrap_or_else(|| Path::new("config.yaml"));
    let cfg = match fs::read_to_string(path) {
        Ok(content) => serde_yaml::from_str(&content)?,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Config::default(),
        Err(err) => return Err(err.into()),
    };
    validate(&cfg)?;
    Ok(cfg)
}

/// Validate a configuration instance.
pub fn validate(cfg: &Config) -> Result<(), ConfigError> {
    let base = cfg.api.base_url.trim();
    if base.is_empty() {
        return Err(ConfigError::Invalid("api.base_url must be non-empty"));
    }
    if !(base.starts_with("http://") || base.starts_with("https://")) {
        return Err(ConfigError::Invalid("api.base_url must be an http(s) URL"));
    }
    if cfg.api.user_agent.trim().is_empty() {
        return Err(ConfigError::Invalid("api.user_agent must be non-empty"));
    }
    if cfg.api.timeout_secs == Some(0) {
        return Err(ConfigError::Invalid("api.timeout_secs must be > 0 when set"));
    }
    if cfg.view.card_details_budget == 0 {
        return Err(ConfigError::Invalid("view.card_details_budget must be > 0"));
    }
    if cfg.view.row_details_budget == 0 {
        return Err(ConfigError::Invalid("view.row_details_budget must be > 0"));
    }
    if cfg.app.out_dir.trim().is_empty() {
        return Err(ConfigError::Invalid("app.out_dir must be non-empty"));
    }
    Ok(())
}

/// Returns an example YAML config with every key spelled out.
pub fn example() -> &'static str {
    r#"api:
  base_url: "https://api.spacexdata.com/v4/"
  user_agent: "launch-board/0.1"
  # timeout_secs: 30

view:
  card_details_budget: 120
  row_details_budget: 170

app:
  out_dir: "./site"
"#
}
