//! Weather lookup against an OpenWeatherMap-compatible endpoint, or a fixed mock sentence when
//! no API key is configured.

use env_config::WeatherSettings;
use serde::Deserialize;
use tracing::{debug, info, warn};

use super::ToolError;

#[derive(Debug, Deserialize)]
struct WeatherBody {
    main: MainSection,
    weather: Vec<Condition>,
    sys: SysSection,
}

#[derive(Debug, Deserialize)]
struct MainSection {
    temp: serde_json::Number,
}

#[derive(Debug, Deserialize)]
struct Condition {
    description: String,
}

#[derive(Debug, Deserialize)]
struct SysSection {
    country: String,
}

/// Weather leaf. Cheap to clone; the HTTP client is shared.
#[derive(Debug, Clone)]
pub struct WeatherLookup {
    settings: WeatherSettings,
    client: reqwest::Client,
}

impl WeatherLookup {
    pub fn new(settings: WeatherSettings) -> Self {
        Self {
            settings,
            client: reqwest::Client::new(),
        }
    }

    pub fn mock() -> Self {
        Self::new(WeatherSettings::mock())
    }

    pub fn is_mock(&self) -> bool {
        self.settings.is_mock()
    }

    /// One GET per call, no retries. Non-2xx status and undecodable bodies are errors.
    pub async fn lookup(&self, location: &str) -> Result<String, ToolError> {
        let Some(ref api_key) = self.settings.api_key else {
            warn!(location = %location, "weather API key not configured, using mock data");
            return Ok(format!("Mock weather: It's sunny and 22°C in {location}"));
        };

        debug!(location = %location, url = %self.settings.base_url, "weather request");
        let response = self
            .client
            .get(&self.settings.base_url)
            .query(&[("q", location), ("appid", api_key.as_str()), ("units", "metric")])
            .send()
            .await?
            .error_for_status()?;

        let body: WeatherBody = response
            .json()
            .await
            .map_err(|e| ToolError::Decode(e.to_string()))?;
        let description = body
            .weather
            .first()
            .map(|c| c.description.as_str())
            .ok_or_else(|| ToolError::Decode("empty 'weather' list".to_string()))?;

        let result = format!(
            "It's {} and {}°C in {}, {}.",
            description, body.main.temp, location, body.sys.country
        );
        info!(location = %location, result = %result, "weather result");
        Ok(result)
    }
}
