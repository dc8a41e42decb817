//! Process-wide settings built once at startup and read-only afterwards.
//!
//! [`Settings::from_env`] runs after [`load_and_apply`](crate::load_and_apply) has merged
//! `.env` and XDG values into the environment. Components receive the struct (or the part
//! they need) through their constructors; nothing reads the environment later.

use thiserror::Error;

pub const DEFAULT_APP_NAME: &str = "LangChain Tools API";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_OPENWEATHER_BASE_URL: &str = "https://api.openweathermap.org/data/2.5/weather";
pub const DEFAULT_ADDR: &str = "127.0.0.1:8000";
pub const DEFAULT_CORS_ORIGINS: &[&str] = &["http://localhost:3000", "http://localhost:3001"];

/// Fatal configuration problems; the process must not serve requests when one occurs.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("OPENAI_API_KEY is required")]
    MissingOpenAiKey,
}

/// Weather API credentials. `api_key == None` selects mock mode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WeatherSettings {
    pub api_key: Option<String>,
    pub base_url: String,
}

impl WeatherSettings {
    /// Mock-mode settings: no key, default base URL.
    pub fn mock() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_OPENWEATHER_BASE_URL.to_string(),
        }
    }

    pub fn is_mock(&self) -> bool {
        self.api_key.is_none()
    }
}

/// OpenAI-compatible model endpoint.
#[derive(Clone, PartialEq, Eq)]
pub struct ModelSettings {
    pub api_key: String,
    /// Custom endpoint (`OPENAI_BASE_URL`); `None` uses the provider default.
    pub base_url: Option<String>,
    pub model: String,
}

impl std::fmt::Debug for ModelSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelSettings")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish()
    }
}

/// Full settings for the service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    pub app_name: String,
    pub model: ModelSettings,
    pub weather: WeatherSettings,
    /// Listen address for the HTTP / WebSocket server.
    pub addr: String,
    pub cors_origins: Vec<String>,
}

impl Settings {
    /// Reads settings from the process environment.
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let api_key = get("OPENAI_API_KEY").ok_or(SettingsError::MissingOpenAiKey)?;
        let cors_origins = match get("BACKEND_CORS_ORIGINS") {
            Some(list) => list
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect(),
            None => DEFAULT_CORS_ORIGINS.iter().map(|s| s.to_string()).collect(),
        };

        Ok(Self {
            app_name: get("APP_NAME").unwrap_or_else(|| DEFAULT_APP_NAME.to_string()),
            model: ModelSettings {
                api_key,
                base_url: get("OPENAI_BASE_URL"),
                model: get("DEFAULT_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            },
            weather: WeatherSettings {
                api_key: get("OPENWEATHER_API_KEY"),
                base_url: get("OPENWEATHER_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_OPENWEATHER_BASE_URL.to_string()),
            },
            addr: get("TOOLROUTER_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_string()),
            cors_origins,
        })
    }
}
