//! Process-wide configuration, loaded once at startup.
//!
//! Values come from the environment (a `.env` file is honoured by `main`),
//! then command-line flags override them. A missing API key is fatal: the
//! server refuses to start rather than fail on the first request.

use std::path::PathBuf;

use thiserror::Error;
use url::Url;

use crate::consts::{
    API_BASE_VAR, API_KEY_VAR, DEFAULT_API_BASE, DEFAULT_HOST, DEFAULT_MODEL, DEFAULT_PORT,
    HOST_VAR, MODEL_VAR, PORT_VAR, TEMPLATE_VAR,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("API key not found. Please set the {0} environment variable.")]
    MissingApiKey(&'static str),

    #[error("invalid port {value:?} in {var}")]
    InvalidPort { var: &'static str, value: String },

    #[error("invalid API base URL {value:?}: {source}")]
    InvalidApiBase {
        value: String,
        source: url::ParseError,
    },

    #[error("failed to read template {path}: {source}")]
    TemplateRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid template {name}: {source}")]
    TemplateInvalid {
        name: String,
        source: minijinja::Error,
    },
}

/// Flags that take precedence over the environment.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub model: Option<String>,
    pub template: Option<PathBuf>,
}

/// Immutable runtime configuration.
#[derive(Clone)]
pub struct Config {
    pub api_key: String,
    pub model: String,
    pub api_base: Url,
    pub host: String,
    pub port: u16,
    pub template: Option<PathBuf>,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .field("api_base", &self.api_base.as_str())
            .field("host", &self.host)
            .field("port", &self.port)
            .field("template", &self.template)
            .finish()
    }
}

impl Config {
    /// Load from the process environment.
    pub fn from_env(overrides: Overrides) -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok(), overrides)
    }

    /// Load using an arbitrary variable lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F, overrides: Overrides) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let given = |value: Option<String>| value.filter(|v| !v.trim().is_empty());

        let api_key = get(API_KEY_VAR).ok_or(ConfigError::MissingApiKey(API_KEY_VAR))?;

        let model = given(overrides.model)
            .or_else(|| get(MODEL_VAR))
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let raw_base = get(API_BASE_VAR).unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        let api_base = Url::parse(&raw_base).map_err(|source| ConfigError::InvalidApiBase {
            value: raw_base.clone(),
            source,
        })?;

        let host = given(overrides.host)
            .or_else(|| get(HOST_VAR))
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match overrides.port {
            Some(port) => port,
            None => match get(PORT_VAR) {
                Some(value) => value.trim().parse::<u16>().map_err(|_| ConfigError::InvalidPort {
                    var: PORT_VAR,
                    value,
                })?,
                None => DEFAULT_PORT,
            },
        };

        let template = overrides
            .template
            .filter(|p| !p.as_os_str().is_empty())
            .or_else(|| get(TEMPLATE_VAR).map(PathBuf::from));

        Ok(Self {
            api_key,
            model,
            api_base,
            host,
            port,
            template,
        })
    }

    /// Address the server binds to, as `host:port`.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
