//! Layered configuration for providers and logging.
//!
//! Sources, later overriding earlier:
//! - Bundled defaults (include_str! from claquette.toml)
//! - `~/.config/claquette/claquette.toml`
//! - `./claquette.toml`

use claquette_core::LoggingOptions;
use claquette_error::{ClaquetteError, ClaquetteResult, ConfigError, ModelError, ModelErrorKind};
use config::{Config, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

const DEFAULT_CONFIG: &str = include_str!("../../../claquette.toml");

/// Model provider settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ProviderSettings {
    /// Provider name reported in logs
    pub name: String,
    /// Scheme and host, without a trailing slash
    pub base_url: String,
    /// Chat completion path
    pub chat_path: String,
    /// Primary image generation path
    pub image_path: String,
    /// Image path tried when the primary one answers 404
    pub image_fallback_path: String,
    /// Text model
    pub chat_model: String,
    /// Image model
    pub image_model: String,
    /// Image dimensions, e.g. "1024x1024"
    pub image_size: String,
    /// Sampling temperature for every text request
    pub temperature: f32,
    /// Per-request timeout
    pub timeout_secs: u64,
    /// Environment variable holding the API key
    pub api_key_env: String,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LoggingSettings {
    /// Default filter directive when `RUST_LOG` is unset
    pub level: String,
    /// JSON output
    #[serde(default)]
    pub json: bool,
}

impl From<&LoggingSettings> for LoggingOptions {
    fn from(settings: &LoggingSettings) -> Self {
        LoggingOptions::default()
            .with_level(settings.level.clone())
            .with_json(settings.json)
    }
}

/// Top-level Claquette configuration.
///
/// # Example
///
/// ```no_run
/// use claquette_models::ClaquetteConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ClaquetteConfig::load()?;
/// println!("Chat model: {}", config.provider.chat_model);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ClaquetteConfig {
    /// Provider section
    pub provider: ProviderSettings,
    /// Logging section
    pub logging: LoggingSettings,
}

impl ClaquetteConfig {
    /// Bundled defaults overlaid with a specific file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> ClaquetteResult<Self> {
        debug!("Loading configuration from file");

        let builder = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(File::from(path.as_ref()));
        Self::finish(builder)
    }

    /// Load configuration with precedence: current dir > home dir > bundled defaults.
    ///
    /// Also loads `.env` so the API key can live there.
    ///
    /// # Errors
    ///
    /// Returns an error if a present file cannot be parsed.
    #[instrument]
    pub fn load() -> ClaquetteResult<Self> {
        debug!("Loading configuration with precedence: current dir > home dir > bundled defaults");

        if let Ok(path) = dotenvy::dotenv() {
            debug!(path = %path.display(), "Loaded .env");
        }

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/claquette/claquette.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("claquette").required(false));

        Self::finish(builder)
    }

    fn finish(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> ClaquetteResult<Self> {
        let config: Self = builder
            .build()
            .map_err(|e| {
                ClaquetteError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                ClaquetteError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.provider.timeout_secs == 0 {
            return Err(ConfigError::new("provider.timeout_secs must be positive"));
        }
        if !(0.0..=2.0).contains(&self.provider.temperature) {
            return Err(ConfigError::new(format!(
                "provider.temperature must be within [0.0, 2.0], got {}",
                self.provider.temperature
            )));
        }
        Ok(())
    }

    /// Read the API key from the configured environment variable.
    ///
    /// # Errors
    ///
    /// Returns [`ModelErrorKind::MissingApiKey`] when the variable is unset or blank.
    pub fn api_key(&self) -> Result<String, ModelError> {
        match std::env::var(&self.provider.api_key_env) {
            Ok(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(ModelError::new(ModelErrorKind::MissingApiKey(
                self.provider.api_key_env.clone(),
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_defaults_parse() {
        let builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));
        let config = ClaquetteConfig::finish(builder).unwrap();
        assert_eq!(config.provider.chat_model, "gpt-4.1-mini");
        assert_eq!(config.provider.image_fallback_path, "/v1/images/generations");
        assert!((config.provider.temperature - 0.7).abs() < f32::EPSILON);
        assert!(!config.logging.json);
    }

    #[test]
    fn test_missing_api_key_names_variable() {
        let builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));
        let mut config = ClaquetteConfig::finish(builder).unwrap();
        config.provider.api_key_env = "CLAQUETTE_TEST_KEY_THAT_IS_NEVER_SET".to_string();

        let err = config.api_key().unwrap_err();
        assert!(matches!(err.kind, ModelErrorKind::MissingApiKey(ref v) if v.contains("NEVER_SET")));
    }
}
