use std::env;
use std::num::ParseIntError;
use std::path::PathBuf;
use thiserror::Error;
use url::Url;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_AI_ENGINE_URL: &str = "http://localhost:5000";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid PORT {value:?}: {source}")]
    InvalidPort {
        value: String,
        source: ParseIntError,
    },
    #[error("Invalid AI_ENGINE_URL {value:?}: {source}")]
    InvalidEngineUrl {
        value: String,
        source: url::ParseError,
    },
}

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub port: u16,
    pub ai_engine_url: Url,
    pub frontend_dir: Option<PathBuf>,
}

impl GatewayConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let port = match var("PORT") {
            Some(value) => value
                .parse()
                .map_err(|source| ConfigError::InvalidPort { value, source })?,
            None => DEFAULT_PORT,
        };

        let engine = var("AI_ENGINE_URL").unwrap_or_else(|| {
            log::info!("AI_ENGINE_URL not set, using default: {}", DEFAULT_AI_ENGINE_URL);
            DEFAULT_AI_ENGINE_URL.to_string()
        });
        let ai_engine_url = Url::parse(&engine)
            .map_err(|source| ConfigError::InvalidEngineUrl { value: engine, source })?;

        let frontend_dir = var("FRONTEND_DIR").map(PathBuf::from).filter(|dir| {
            let exists = dir.is_dir();
            if !exists {
                log::warn!("FRONTEND_DIR {} is not a directory, static hosting disabled", dir.display());
            }
            exists
        });

        Ok(Self {
            port,
            ai_engine_url,
            frontend_dir,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}
