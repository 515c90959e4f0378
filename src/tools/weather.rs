//! Weather lookup tool backed by the Open-Meteo APIs.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use super::Tool;

/// Look up current weather for a named location.
///
/// Performs two sequential calls: geocode the name, then fetch the forecast
/// for the coordinates. An unknown location is reported as readable content
/// for the model, not as an error, so the conversation can continue.
pub struct GetWeather {
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct WeatherArgs {
    location: String,
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    name: String,
    latitude: f64,
    longitude: f64,
    #[serde(default)]
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current_weather: CurrentWeather,
}

#[derive(Debug, Deserialize)]
struct CurrentWeather {
    temperature: f64,
    windspeed: f64,
    weathercode: u32,
}

impl GetWeather {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .user_agent("toolchat/0.3")
            .timeout(std::time::Duration::from_secs(15))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self { client }
    }

    async fn geocode(&self, location: &str) -> anyhow::Result<Option<GeocodeResult>> {
        let url = format!(
            "https://geocoding-api.open-meteo.com/v1/search?name={}&count=1",
            urlencoding::encode(location)
        );

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("Geocoding API error: {}", status);
        }

        let geocode: GeocodeResponse = response.json().await?;
        Ok(geocode.results.into_iter().next())
    }

    async fn forecast(&self, latitude: f64, longitude: f64) -> anyhow::Result<CurrentWeather> {
        let url = format!(
            "https://api.open-meteo.com/v1/forecast?latitude={}&longitude={}&current_weather=true",
            latitude, longitude
        );

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("Forecast API error: {}", status);
        }

        let forecast: ForecastResponse = response.json().await?;
        Ok(forecast.current_weather)
    }
}

impl Default for GetWeather {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for GetWeather {
    fn name(&self) -> &str {
        "get_weather"
    }

    fn description(&self) -> &str {
        "Get the current weather for a named location (city, town, etc.)"
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "location": {
                    "type": "string",
                    "description": "Location name, e.g. 'Berlin' or 'San Francisco'"
                }
            },
            "required": ["location"]
        })
    }

    async fn execute(&self, args: Value) -> anyhow::Result<String> {
        let WeatherArgs { location } = serde_json::from_value(args)
            .map_err(|e| anyhow::anyhow!("Invalid arguments: {}", e))?;

        let Some(place) = self.geocode(&location).await? else {
            return Ok(format!("Could not find location: {}", location));
        };

        let weather = self.forecast(place.latitude, place.longitude).await?;

        let place_label = match &place.country {
            Some(country) => format!("{}, {}", place.name, country),
            None => place.name.clone(),
        };

        Ok(format!(
            "Current weather in {}: {}, {:.1}°C, wind {:.1} km/h",
            place_label,
            describe_weather_code(weather.weathercode),
            weather.temperature,
            weather.windspeed
        ))
    }
}

/// Map a WMO weather code to a short description.
fn describe_weather_code(code: u32) -> &'static str {
    match code {
        0 => "clear sky",
        1..=3 => "partly cloudy",
        45 | 48 => "fog",
        51..=57 => "drizzle",
        61..=67 => "rain",
        71..=77 => "snow",
        80..=82 => "rain showers",
        85 | 86 => "snow showers",
        95..=99 => "thunderstorm",
        _ => "unknown conditions",
    }
}
