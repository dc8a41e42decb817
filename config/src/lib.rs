//! Configuration for toolrouter.
//!
//! Two steps at process start:
//!
//! 1. [`load_and_apply`] merges the XDG `config.toml` `[env]` table and the project `.env`
//!    into the process environment with priority **existing env > .env > XDG**.
//! 2. [`Settings::from_env`] builds the immutable [`Settings`] struct that every component
//!    receives through its constructor. A missing `OPENAI_API_KEY` is a [`SettingsError`].

mod dotenv;
mod settings;
mod xdg_toml;

use std::path::Path;
use thiserror::Error;

pub use settings::{
    ModelSettings, Settings, SettingsError, WeatherSettings, DEFAULT_ADDR, DEFAULT_APP_NAME,
    DEFAULT_CORS_ORIGINS, DEFAULT_MODEL, DEFAULT_OPENWEATHER_BASE_URL,
};

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("xdg config path: {0}")]
    XdgPath(String),
    #[error("read xdg config: {0}")]
    XdgRead(std::io::Error),
    #[error("parse xdg toml: {0}")]
    XdgParse(#[from] toml::de::Error),
    #[error("read .env: {0}")]
    DotenvRead(std::io::Error),
}

/// Sets environment variables from `.env` and XDG config for keys that are not already set.
///
/// * `app_name`: XDG directory name, e.g. `"toolrouter"` for `~/.config/toolrouter/config.toml`.
/// * `override_dir`: directory holding `.env`; `None` uses the current directory.
pub fn load_and_apply(app_name: &str, override_dir: Option<&Path>) -> Result<(), LoadError> {
    let xdg_map = xdg_toml::load_env_map(app_name)?;
    let dotenv_map = dotenv::load_env_map(override_dir).map_err(LoadError::DotenvRead)?;

    let mut keys: std::collections::HashSet<&String> = xdg_map.keys().collect();
    keys.extend(dotenv_map.keys());

    for key in keys {
        if std::env::var_os(key).is_some() {
            continue;
        }
        if let Some(v) = dotenv_map.get(key).or_else(|| xdg_map.get(key)) {
            std::env::set_var(key, v);
        }
    }

    Ok(())
}
