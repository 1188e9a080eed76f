//*** START FILE: src/config.rs ***//
use crate::types::sentence_data::Rgb;
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "viewer.toml";
pub const DEFAULT_DATA_PATH: &str = "data/embeddings.csv";
pub const DEFAULT_ENDPOINT: &str = "https://sentence-embedding-eatrmwevgq-ew.a.run.app/";
pub const ROW_LIMIT: usize = 100;

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub data_path: PathBuf,
    pub endpoint: String,
    pub row_limit: usize,
    pub font_size: f32,
    pub request_timeout_secs: u64,
    pub connector: ConnectorConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            row_limit: ROW_LIMIT,
            font_size: 16.0,
            request_timeout_secs: 30,
            connector: ConnectorConfig::default(),
        }
    }
}

/// Style of the dashed line joining a hovered active/passive pair.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ConnectorConfig {
    /// `[dash, gap]` in pixels.
    pub dash: [f32; 2],
    pub color: String,
    pub width: f32,
}

impl Default for ConnectorConfig {
    fn default() -> Self {
        Self { dash: [2.0, 2.0], color: "#f4511e".to_string(), width: 2.0 }
    }
}

impl ConnectorConfig {
    pub fn rgb(&self) -> Result<Rgb> {
        Rgb::from_hex(&self.color).map_err(|e| anyhow::anyhow!("connector.color: {}", e))
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.row_limit == 0 {
            bail!("row_limit must be at least 1");
        }
        if !(self.font_size > 0.0) {
            bail!("font_size must be positive, got {}", self.font_size);
        }
        if self.endpoint.trim().is_empty() {
            bail!("endpoint must not be empty");
        }
        let [dash, gap] = self.connector.dash;
        if dash < 0.0 || gap < 0.0 {
            bail!("connector.dash entries must be non-negative, got [{}, {}]", dash, gap);
        }
        if self.connector.width < 0.0 {
            bail!("connector.width must be non-negative, got {}", self.connector.width);
        }
        self.connector.rgb()?;
        Ok(())
    }
}

pub fn parse_config(contents: &str) -> Result<Config> {
    let config: Config = toml::from_str(contents).context("Invalid TOML")?;
    config.validate()?;
    Ok(config)
}

pub fn load_config_from_file(file_path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(file_path)
        .with_context(|| format!("Failed to read {}", file_path.display()))?;
    parse_config(&contents).with_context(|| format!("Failed to parse {}", file_path.display()))
}

/// Reads the config file if present; a missing file means built-in defaults.
pub fn load_or_default(file_path: &Path) -> Result<Config> {
    if file_path.exists() {
        load_config_from_file(file_path)
    } else {
        crate::logger::info(&format!(
            "No config at {}, using defaults",
            file_path.display()
        ));
        Ok(Config::default())
    }
}

//*** END FILE: src/config.rs ***//
