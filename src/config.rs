//! Application configuration.

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
    value::Uncased,
};

use serde::{Deserialize, Serialize};

use anyhow::Error;

/// Full application configuration.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Config {
    /// HTTP server configuration.
    pub http: HttpConfig,
    /// Record store configuration.
    pub store: StoreConfig,
}

/// HTTP server configuration.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct HttpConfig {
    /// The port to listen on.
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        HttpConfig { port: 3000 }
    }
}

/// Record store configuration.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct StoreConfig {
    /// The backing JSON file.
    ///
    /// Relative paths are resolved against the working directory.
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            path: PathBuf::from("accounts.json"),
        }
    }
}

/// Reads the configuration.
pub fn read_config(config_file: impl AsRef<Path>) -> Result<Config, Error> {
    figment(config_file).extract().map_err(From::from)
}

fn figment(config_file: impl AsRef<Path>) -> Figment {
    Figment::from(Serialized::defaults(Config::default()))
        .merge(Toml::file(config_file))
        .merge(Env::prefixed("ACCOUNTBOARD_").split("__"))
        .merge(Env::raw().filter_map(|k| match k.as_str() {
            "PORT" => Some(Uncased::from("http.port")),
            "DATA_FILE" => Some(Uncased::from("store.path")),
            _ => None,
        }))
}
