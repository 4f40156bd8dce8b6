use config::{builder::DefaultState, Config, ConfigBuilder, ConfigError, Environment, File};
use error_stack::{report, ResultExt};
use serde::Deserialize;
use serde_path_to_error::{Deserializer as PathDeserializer, Segment, Track};
use thiserror::Error;

use super::{server_config::ServerConfig, sheets_config::SpreadsheetConfig};

pub const CONFIG_PATH_ENV: &str = "CONFIG_PATH";
const DEFAULT_CONFIG_PATH: &str = "Config";
const ENV_PREFIX: &str = "LEADS";

#[derive(serde::Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub sheets: SpreadsheetConfig,
}

#[derive(Error, Debug)]
pub enum AppConfigError {
    #[error("Error reading config file '{0}'")]
    ReadFailed(String),
    #[error("Failed to deserialize config file '{path}' at field '{field}'")]
    DeserializeFailed { path: String, field: String },
}

impl AppConfig {
    /// Loads the configuration from the file named by `CONFIG_PATH` (default `Config`, any
    /// extension `config` understands), then from `LEADS_*` environment variables, e.g.
    /// `LEADS_SERVER__PORT=8080`. Every key has a default, so the file is optional.
    pub fn load() -> error_stack::Result<Self, AppConfigError> {
        let config_path =
            std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_from(&config_path)
    }

    pub fn load_from(config_path: &str) -> error_stack::Result<Self, AppConfigError> {
        let config = defaults()
            .and_then(|builder| {
                builder
                    .add_source(File::with_name(config_path).required(false))
                    .add_source(
                        Environment::with_prefix(ENV_PREFIX)
                            .prefix_separator("_")
                            .separator("__")
                            .try_parsing(true),
                    )
                    .build()
            })
            .change_context_lazy(|| AppConfigError::ReadFailed(config_path.to_string()))?;

        Self::from_config(config, config_path)
    }

    fn from_config(config: Config, config_path: &str) -> error_stack::Result<Self, AppConfigError> {
        let value = config
            .try_deserialize::<serde_json::Value>()
            .change_context_lazy(|| AppConfigError::ReadFailed(config_path.to_string()))?;

        use serde::de::IntoDeserializer;
        let mut track = Track::new();
        let path_de = PathDeserializer::new(value.into_deserializer(), &mut track);
        AppConfig::deserialize(path_de).map_err(|e| {
            let field = track
                .path()
                .iter()
                .map(|seg| match seg {
                    Segment::Seq { index } => format!("[{}]", index),
                    Segment::Map { key } => format!(".{}", key),
                    Segment::Enum { variant } => format!("::{}", variant),
                    Segment::Unknown => String::from("<?>"),
                })
                .collect::<String>();
            report!(AppConfigError::DeserializeFailed {
                path: config_path.to_string(),
                field: field.trim_start_matches('.').to_string(),
            })
            .attach_printable(e.to_string())
        })
    }
}

/// The values the service historically ran with.
fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 5000)?
        .set_default("sheets.priv_key", "credentials.json")?
        .set_default(
            "sheets.spreadsheet_id",
            "1Mp6wTZzGW5eO3yd6shhY6PG_ADhBz-dSknBq7cF1Uy0",
        )?
        .set_default("sheets.sheet_name", "leads")?
        .set_default("sheets.value_input_option", "RAW")
}
