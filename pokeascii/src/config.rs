// ABOUTME: Configuration file loading, validation, and hierarchical merging for pokeascii
// ABOUTME: Supports TOML config files with XDG Base Directory specification compliance

use anyhow::{bail, Context, Result};
use pokeapi_sdk::constants::{fetch, urls};
use pokeapi_sdk::{BoundedFetcher, PokeClient};
use serde::{Deserialize, Deserializer};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::ascii::{GlyphRamp, LumaWeights, RenderOptions, RowBound};
use crate::constants::{defaults, paths};

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default)]
    pub concurrency: Option<usize>,
    #[serde(default)]
    pub list_limit: Option<u32>,
    #[serde(default, deserialize_with = "validate_ramp")]
    pub ramp: Option<String>,
    #[serde(default)]
    pub invert_ramp: Option<bool>,
    #[serde(default)]
    pub row_bound: Option<RowBound>,
    #[serde(default)]
    pub bind_addr: Option<String>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Config {
    /// Load configuration from standard XDG-compliant locations
    pub fn load() -> Result<Self> {
        let paths = Self::get_config_paths();
        Self::load_from_paths(&paths)
    }

    /// Load configuration from specific file paths, later paths overriding
    /// earlier ones. Missing files are skipped; unreadable or invalid ones
    /// are errors.
    pub fn load_from_paths<P: AsRef<Path>>(paths: &[P]) -> Result<Self> {
        let mut config = Config::default();

        for path in paths {
            let path = path.as_ref();
            if !path.exists() {
                continue;
            }
            log::debug!("Loading config from {}", path.display());
            config = config.merge(Self::load_from_file(path)?);
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a single file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Config = toml::from_str(&content).with_context(|| {
            format!(
                "Failed to parse TOML config file: {}",
                path.as_ref().display()
            )
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Standard config file paths, lowest precedence first
    pub fn get_config_paths() -> Vec<PathBuf> {
        let mut config_paths = Vec::new();

        // 1. User config directory fallback
        if let Some(home_dir) = dirs::home_dir() {
            config_paths.push(
                home_dir
                    .join(".config")
                    .join(paths::CONFIG_DIR)
                    .join(paths::CONFIG_FILE),
            );
        }

        // 2. XDG config home
        if let Some(config_home) = std::env::var_os("XDG_CONFIG_HOME") {
            config_paths.push(
                PathBuf::from(config_home)
                    .join(paths::CONFIG_DIR)
                    .join(paths::CONFIG_FILE),
            );
        }

        // 3. Project-specific config (highest precedence)
        if let Ok(current_dir) = std::env::current_dir() {
            config_paths.push(current_dir.join(paths::LOCAL_CONFIG_FILE));
        }

        config_paths.dedup();
        config_paths
    }

    /// Merge this config with another, giving precedence to the other config
    pub fn merge(self, other: Config) -> Config {
        Config {
            api_url: other.api_url.or(self.api_url),
            concurrency: other.concurrency.or(self.concurrency),
            list_limit: other.list_limit.or(self.list_limit),
            ramp: other.ramp.or(self.ramp),
            invert_ramp: other.invert_ramp.or(self.invert_ramp),
            row_bound: other.row_bound.or(self.row_bound),
            bind_addr: other.bind_addr.or(self.bind_addr),
            timeout_secs: other.timeout_secs.or(self.timeout_secs),
        }
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        if self.concurrency == Some(0) {
            bail!("concurrency must be at least 1");
        }
        if self.list_limit == Some(0) {
            bail!("list_limit must be at least 1");
        }
        if self.timeout_secs == Some(0) {
            bail!("timeout_secs must be at least 1");
        }
        if let Some(addr) = &self.bind_addr {
            if addr.trim().is_empty() {
                bail!("bind_addr must not be empty");
            }
        }
        Ok(())
    }

    pub fn api_url(&self) -> &str {
        self.api_url.as_deref().unwrap_or(urls::POKEAPI_BASE)
    }

    pub fn bind_addr(&self) -> &str {
        self.bind_addr.as_deref().unwrap_or(defaults::BIND_ADDR)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(defaults::REQUEST_TIMEOUT_SECS))
    }

    pub fn fetcher(&self) -> BoundedFetcher {
        BoundedFetcher::new(self.concurrency.unwrap_or(fetch::DEFAULT_CONCURRENCY))
    }

    pub fn client(&self) -> Result<PokeClient> {
        PokeClient::builder()
            .base_url(self.api_url())
            .timeout(self.timeout())
            .build()
            .context("Failed to create PokeAPI client")
    }

    pub fn render_options(&self) -> Result<RenderOptions> {
        let ramp = match &self.ramp {
            Some(glyphs) => GlyphRamp::new(glyphs).context("Invalid glyph ramp in config")?,
            None => GlyphRamp::reference(),
        };
        let ramp = if self.invert_ramp.unwrap_or(false) {
            ramp.reversed()
        } else {
            ramp
        };

        Ok(RenderOptions {
            ramp,
            weights: LumaWeights::default(),
            row_bound: self.row_bound.unwrap_or_default(),
        })
    }
}

// Custom deserializer for glyph ramp validation
fn validate_ramp<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let value: Option<String> = Option::deserialize(deserializer)?;

    if let Some(ref glyphs) = value {
        GlyphRamp::new(glyphs).map_err(|e| D::Error::custom(e.to_string()))?;
    }
    Ok(value)
}
