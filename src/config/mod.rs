use crate::models::AppConfig;
use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use ::config::{Config, Environment, File, FileFormat};
use std::fs;

/// File name of the carousel configuration inside the config directory
pub const CONFIG_FILE_NAME: &str = "carousel.yaml";

/// Prefix for environment overrides, e.g. `CAROUSEL_CAROUSEL__AUTO_PLAY=false`
pub const ENV_PREFIX: &str = "CAROUSEL";

/// Configuration manager for loading and saving `carousel.yaml`.
///
/// Values are layered: built-in defaults (written out on first run), then the YAML
/// file, then `CAROUSEL_*` environment variables. Nested keys are separated by a
/// double underscore.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_dir: Utf8PathBuf,
    config_path: Utf8PathBuf,
}

impl ConfigManager {
    /// Create a new ConfigManager rooted at `config_dir`, creating the directory if
    /// it does not exist.
    pub fn new<P: AsRef<Utf8Path>>(config_dir: P) -> Result<Self> {
        let config_dir = config_dir.as_ref().to_path_buf();

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)
                .with_context(|| format!("Failed to create config directory: {}", config_dir))?;
        }

        Ok(Self {
            config_path: config_dir.join(CONFIG_FILE_NAME),
            config_dir,
        })
    }

    /// Load and validate the configuration.
    ///
    /// When the file does not exist yet, the defaults are written to it so there is
    /// something to edit, and returned as-is.
    pub fn load(&self) -> Result<AppConfig> {
        self.load_layered(None)
    }

    fn load_layered(&self, env: Option<::config::Map<String, String>>) -> Result<AppConfig> {
        if !self.config_path.exists() {
            tracing::warn!(
                "Config file not found at {}, writing defaults",
                self.config_path
            );
            let config = AppConfig::default();
            self.save(&config)?;
            return Ok(config);
        }

        let layered = Config::builder()
            .add_source(File::new(self.config_path.as_str(), FileFormat::Yaml))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(env),
            )
            .build()
            .with_context(|| format!("Failed to read config: {}", self.config_path))?;

        let config: AppConfig = layered
            .try_deserialize()
            .with_context(|| format!("Failed to parse config: {}", self.config_path))?;

        config
            .validate()
            .with_context(|| format!("Invalid config: {}", self.config_path))?;

        tracing::info!(
            "Loaded config from {} ({} slides, auto_play={})",
            self.config_path,
            config.slides.len(),
            config.carousel.auto_play
        );
        Ok(config)
    }

    /// Save the configuration file.
    pub fn save(&self, config: &AppConfig) -> Result<()> {
        let yaml_string =
            serde_yaml_ng::to_string(config).context("Failed to serialize config to YAML")?;

        fs::write(&self.config_path, yaml_string)
            .with_context(|| format!("Failed to write config: {}", self.config_path))?;

        tracing::info!("Saved config to {}", self.config_path);
        Ok(())
    }

    /// Get the configuration directory path.
    pub fn config_dir(&self) -> &Utf8Path {
        &self.config_dir
    }

    pub fn config_path(&self) -> &Utf8Path {
        &self.config_path
    }
}
