use config::Config;
use error_stack::{report, ResultExt};
use serde::Deserialize;
use serde_path_to_error::{Deserializer as PathDeserializer, Segment, Track};
use thiserror::Error;

use super::{
    output_config::OutputConfig, sheets_config::SpreadsheetConfig,
    transform_config::TransformConfig,
};

pub const CONFIG_PATH_VAR: &str = "CONFIG_PATH";
pub const DEFAULT_CONFIG_PATH: &str = "Config";
const ENV_PREFIX: &str = "SCHOOLS_EXPORT";

#[derive(serde::Deserialize, Debug, Clone)]
pub struct AppConfig {
    pub sheets: SpreadsheetConfig,
    #[serde(default)]
    pub transform: TransformConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Error reading config file")]
    Read,
    #[error("Failed to deserialize config")]
    Deserialize,
    #[error("Failed to load column types")]
    ColumnTypes,
}

impl AppConfig {
    /// Loads the file named by `CONFIG_PATH` (default `Config`), overridden by
    /// `SCHOOLS_EXPORT__SECTION__KEY` environment variables.
    pub fn load() -> error_stack::Result<Self, ConfigError> {
        let config_path =
            std::env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_from(&config_path)
    }

    pub fn load_from(config_path: &str) -> error_stack::Result<Self, ConfigError> {
        Self::load_with_env(config_path, None)
    }

    /// Environment values stay strings: ids made only of digits keep their
    /// exact text, and the numeric transform settings parse them leniently.
    /// `env` replaces the process environment when given.
    #[tracing::instrument(skip(env))]
    fn load_with_env(
        config_path: &str,
        env: Option<config::Map<String, String>>,
    ) -> error_stack::Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(config::File::with_name(config_path))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .source(env),
            )
            .build()
            .change_context(ConfigError::Read)
            .attach_printable_lazy(|| format!("Config file: {}", config_path))?;

        let value = config
            .try_deserialize::<serde_json::Value>()
            .change_context(ConfigError::Deserialize)?;

        Self::from_value(value).attach_printable_lazy(|| format!("Config file: {}", config_path))
    }

    pub fn from_value(value: serde_json::Value) -> error_stack::Result<Self, ConfigError> {
        use serde::de::IntoDeserializer;

        let mut track = Track::new();
        let path_de = PathDeserializer::new(value.into_deserializer(), &mut track);
        AppConfig::deserialize(path_de).map_err(|e| {
            let path_str = track
                .path()
                .iter()
                .map(|seg| match seg {
                    Segment::Seq { index } => format!("[{}]", index),
                    Segment::Map { key } => format!(".{}", key),
                    Segment::Enum { variant } => format!("::{}", variant),
                    Segment::Unknown => String::from("<?>"),
                })
                .collect::<String>();
            report!(ConfigError::Deserialize)
                .attach_printable(e.to_string())
                .attach_printable(format!("Field path: {}", path_str.trim_start_matches('.')))
        })
    }
}
