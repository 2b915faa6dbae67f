// Configuration: loads an optional `.env` file, then reads the `LEMLIST_*`
// variables into `Settings`.

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_API_URL: &str = "https://api.lemlist.com/api";

/// Prefix of every environment variable read into [`Settings`].
pub const ENV_PREFIX: &str = "LEMLIST_";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// `LEMLIST_API_KEY`, from https://app.lemlist.com/settings/integrations
    pub api_key: Secret<String>,
    /// `LEMLIST_API_URL`
    #[serde(default = "default_api_url")]
    pub api_url: String,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("LEMLIST_API_KEY not found in .env file or environment")]
    MissingApiKey,
    #[error("cannot load env file '{}'", path.display())]
    EnvFile {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },
    #[error("invalid LEMLIST_* environment variable")]
    Env(#[source] envy::Error),
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(std::env::vars())
    }

    /// Reads the `LEMLIST_*` variables out of `vars`. An empty API key is
    /// handled as a missing one.
    pub fn from_vars<I>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let settings: Settings = envy::prefixed(ENV_PREFIX)
            .from_iter(vars)
            .map_err(|e| match e {
                envy::Error::MissingValue(_) => ConfigError::MissingApiKey,
                other => ConfigError::Env(other),
            })?;

        if settings.api_key.expose_secret().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        Ok(settings)
    }
}

/// Loads a `.env` file into the process environment and returns its path.
///
/// An explicit path must exist. Otherwise `.env` is looked up from the
/// current directory upwards, then in `<config dir>/lemlist-cli/.env`.
/// Finding no file at all is fine: the variables may already be set.
pub fn load_env_file(explicit: Option<&Path>) -> Result<Option<PathBuf>, ConfigError> {
    if let Some(path) = explicit {
        dotenvy::from_path(path).map_err(|source| ConfigError::EnvFile {
            path: path.to_path_buf(),
            source,
        })?;
        return Ok(Some(path.to_path_buf()));
    }

    match dotenvy::dotenv() {
        Ok(path) => return Ok(Some(path)),
        Err(e) if e.not_found() => {}
        Err(source) => {
            return Err(ConfigError::EnvFile {
                path: PathBuf::from(".env"),
                source,
            })
        }
    }

    let Some(path) = dirs::config_dir().map(|dir| dir.join("lemlist-cli").join(".env")) else {
        return Ok(None);
    };
    if !path.is_file() {
        return Ok(None);
    }
    dotenvy::from_path(&path).map_err(|source| ConfigError::EnvFile {
        path: path.clone(),
        source,
    })?;
    Ok(Some(path))
}

/// `.env` loading followed by [`Settings::from_env`], logging where the
/// variables came from.
pub fn load(env_file: Option<&Path>) -> Result<Settings, ConfigError> {
    match load_env_file(env_file)? {
        Some(path) => log::info!("Loaded environment from {}", path.display()),
        None => log::debug!("No .env file found, using process environment only"),
    }
    Settings::from_env()
}
