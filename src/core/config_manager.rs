// src/core/config_manager.rs
//! Unified configuration: defaults, then config.yaml, then environment variables

use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::{info, warn};

use crate::environment::EnvironmentConfig;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_API_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_RASTERIZER: &str = "wkhtmltoimage";
pub const DEFAULT_PORT: u16 = 8000;

#[derive(Debug, Clone)]
pub struct ConfigManager {
    pub generation: GenerationConfig,
    pub export: ExportConfig,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct GenerationConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
}

#[derive(Debug, Clone)]
pub struct ExportConfig {
    pub rasterizer_bin: String,
    pub output_dir: PathBuf,
}

impl ConfigManager {
    /// Load all configurations
    pub fn load() -> Result<Self> {
        let file = EnvironmentConfig::load()?;
        let config = Self::from_sources(file, |key| std::env::var(key).ok())?;

        if config.generation.api_key.is_none() {
            warn!("No API key set (API_KEY / GEMINI_API_KEY), AI generation will fail");
        }
        info!(
            "Configuration loaded: model={}, rasterizer={}, output={}",
            config.generation.model,
            config.export.rasterizer_bin,
            config.export.output_dir.display()
        );

        Ok(config)
    }

    /// Merge file settings with variables looked up through `env`; variables win.
    pub fn from_sources<F>(file: EnvironmentConfig, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = env("API_KEY")
            .or_else(|| env("GEMINI_API_KEY"))
            .filter(|key| !key.trim().is_empty());

        let port = match env("ROCKET_PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .with_context(|| format!("ROCKET_PORT must be a valid port number, got '{}'", raw))?,
            None => file.port.unwrap_or(DEFAULT_PORT),
        };

        let output_dir = match env("OUTPUT_DIR").map(PathBuf::from).or(file.output_path) {
            Some(dir) => dir,
            None => std::env::current_dir()
                .context("Failed to get current directory")?
                .join("out"),
        };

        Ok(Self {
            generation: GenerationConfig {
                api_key,
                model: env("GEMINI_MODEL")
                    .or(file.model)
                    .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
                base_url: env("GEMINI_API_URL")
                    .or(file.api_url)
                    .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            },
            export: ExportConfig {
                rasterizer_bin: env("RASTERIZER_BIN")
                    .or(file.rasterizer_bin)
                    .unwrap_or_else(|| DEFAULT_RASTERIZER.to_string()),
                output_dir,
            },
            port,
        })
    }

    /// Ensure the export output directory exists
    pub async fn ensure_directories(&self) -> Result<()> {
        use crate::core::FsOps;

        FsOps::ensure_dir_exists(&self.export.output_dir).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ConfigManager::from_sources(EnvironmentConfig::default(), lookup(&[])).unwrap();
        assert_eq!(config.generation.api_key, None);
        assert_eq!(config.generation.model, DEFAULT_MODEL);
        assert_eq!(config.generation.base_url, DEFAULT_API_URL);
        assert_eq!(config.export.rasterizer_bin, DEFAULT_RASTERIZER);
        assert_eq!(config.port, DEFAULT_PORT);
        assert!(config.export.output_dir.ends_with("out"));
    }

    #[test]
    fn test_environment_overrides_file() {
        let file = EnvironmentConfig {
            model: Some("from-file".to_string()),
            port: Some(9000),
            rasterizer_bin: Some("/opt/raster".to_string()),
            ..Default::default()
        };
        let config = ConfigManager::from_sources(
            file,
            lookup(&[
                ("GEMINI_API_KEY", "secret"),
                ("GEMINI_MODEL", "from-env"),
                ("OUTPUT_DIR", "/tmp/resumes"),
            ]),
        )
        .unwrap();

        assert_eq!(config.generation.api_key.as_deref(), Some("secret"));
        assert_eq!(config.generation.model, "from-env");
        assert_eq!(config.export.rasterizer_bin, "/opt/raster");
        assert_eq!(config.export.output_dir, PathBuf::from("/tmp/resumes"));
        assert_eq!(config.port, 9000);
    }

    #[test]
    fn test_api_key_precedence_and_blank_keys() {
        let config = ConfigManager::from_sources(
            EnvironmentConfig::default(),
            lookup(&[("API_KEY", "primary"), ("GEMINI_API_KEY", "secondary")]),
        )
        .unwrap();
        assert_eq!(config.generation.api_key.as_deref(), Some("primary"));

        let blank = ConfigManager::from_sources(
            EnvironmentConfig::default(),
            lookup(&[("API_KEY", "  ")]),
        )
        .unwrap();
        assert_eq!(blank.generation.api_key, None);
    }

    #[test]
    fn test_invalid_port_is_an_error() {
        let result = ConfigManager::from_sources(
            EnvironmentConfig::default(),
            lookup(&[("ROCKET_PORT", "eighty")]),
        );
        assert!(result.is_err());
    }
}
