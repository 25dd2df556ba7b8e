use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

/// Where the record service listens when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Environment variable that overrides the configured base URL.
pub const BASE_URL_ENV: &str = "WEATHER_LOOKUP_BASE_URL";

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// base_url = "http://localhost:8000"
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// Base URL of the weather record service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let cfg: Config = toml::from_str(contents)?;
        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-lookup", "weather-lookup")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Validate and store a new base URL.
    pub fn set_base_url(&mut self, raw: &str) -> Result<()> {
        let url = parse_base_url(raw)?;
        self.base_url = Some(url.to_string());
        Ok(())
    }

    /// Pick the base URL to use: explicit flag, then environment, then the
    /// config file, then [`DEFAULT_BASE_URL`].
    pub fn resolve_base_url(&self, flag: Option<&str>, env: Option<&str>) -> Result<Url> {
        let raw = flag
            .or(env)
            .or(self.base_url.as_deref())
            .unwrap_or(DEFAULT_BASE_URL);

        parse_base_url(raw)
    }

    /// Like [`Config::resolve_base_url`], reading [`BASE_URL_ENV`] from the process environment.
    pub fn resolve_base_url_from_env(&self, flag: Option<&str>) -> Result<Url> {
        let env = std::env::var(BASE_URL_ENV).ok().filter(|v| !v.trim().is_empty());
        self.resolve_base_url(flag, env.as_deref())
    }
}

/// Parse a base URL, accepting only http(s).
pub fn parse_base_url(raw: &str) -> Result<Url> {
    let trimmed = raw.trim();
    let url = Url::parse(trimmed).with_context(|| format!("Invalid base URL '{trimmed}'"))?;

    match url.scheme() {
        "http" | "https" => {}
        other => {
            return Err(anyhow!(
                "Unsupported scheme '{other}' in base URL '{trimmed}'. Use http or https."
            ));
        }
    }

    if url.cannot_be_a_base() {
        return Err(anyhow!("Base URL '{trimmed}' cannot carry a path"));
    }

    Ok(url)
}
