//! Thin client for an OpenWeatherMap-compatible API

use once_cell::sync::Lazy;
use serde_json::Value;
use thiserror::Error;

use crate::config;

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("weather API key not configured")]
    NotConfigured,
    #[error("no weather data for {0}")]
    NotFound(String),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("weather provider returned {0}")]
    Upstream(u16),
    #[error("unexpected weather payload: {0}")]
    UnexpectedBody(&'static str),
}

pub struct WeatherClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    units: String,
    country: String,
}

static CLIENT: Lazy<WeatherClient> = Lazy::new(|| {
    let settings = &config::config().weather;
    WeatherClient::new(
        settings.endpoint.clone(),
        settings.api_key.clone(),
        settings.units.clone(),
        settings.country.clone(),
    )
});

pub fn client() -> &'static WeatherClient {
    &CLIENT
}

impl WeatherClient {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: Option<String>,
        units: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            api_key,
            units: units.into(),
            country: country.into(),
        }
    }

    /// Current temperature (`main.temp`) for a zip code
    pub async fn current_temperature(&self, zip: &str) -> Result<f64, WeatherError> {
        let body = self.fetch("weather", zip).await?;
        body.pointer("/main/temp")
            .and_then(Value::as_f64)
            .ok_or(WeatherError::UnexpectedBody("missing main.temp"))
    }

    /// Provider forecast document, passed through untouched
    pub async fn forecast(&self, zip: &str) -> Result<Value, WeatherError> {
        self.fetch("forecast", zip).await
    }

    async fn fetch(&self, resource: &str, zip: &str) -> Result<Value, WeatherError> {
        let api_key = self.api_key.as_deref().ok_or(WeatherError::NotConfigured)?;
        let location = format!("{},{}", zip, self.country);

        let response = self
            .http
            .get(format!("{}/{}", self.endpoint, resource))
            .query(&[
                ("zip", location.as_str()),
                ("units", self.units.as_str()),
                ("appid", api_key),
            ])
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => Ok(response.json::<Value>().await?),
            reqwest::StatusCode::NOT_FOUND => Err(WeatherError::NotFound(zip.to_string())),
            status => Err(WeatherError::Upstream(status.as_u16())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn client_for(server: &MockServer) -> WeatherClient {
        WeatherClient::new(server.base_url(), Some("owm-key".to_string()), "imperial", "us")
    }

    #[tokio::test]
    async fn current_temperature_reads_main_temp() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/weather")
                    .query_param("zip", "98402,us")
                    .query_param("units", "imperial")
                    .query_param("appid", "owm-key");
                then.status(200).json_body(json!({ "main": { "temp": 54.3, "humidity": 80 } }));
            })
            .await;

        let temp = client_for(&server).current_temperature("98402").await.unwrap();

        assert_eq!(temp, 54.3);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn forecast_is_passed_through() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/forecast").query_param("zip", "98402,us");
                then.status(200).json_body(json!({ "cnt": 1, "list": [{ "dt": 1 }] }));
            })
            .await;

        let forecast = client_for(&server).forecast("98402").await.unwrap();
        assert_eq!(forecast["cnt"], 1);
        assert_eq!(forecast["list"][0]["dt"], 1);
    }

    #[tokio::test]
    async fn unknown_zip_is_not_found() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/weather");
                then.status(404).json_body(json!({ "cod": "404", "message": "city not found" }));
            })
            .await;

        let err = client_for(&server).current_temperature("00000").await.unwrap_err();
        assert!(matches!(err, WeatherError::NotFound(ref zip) if zip == "00000"));
    }

    #[tokio::test]
    async fn provider_failures_are_upstream_errors() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/weather");
                then.status(401).json_body(json!({ "cod": 401 }));
            })
            .await;

        let err = client_for(&server).current_temperature("98402").await.unwrap_err();
        assert!(matches!(err, WeatherError::Upstream(401)));
    }

    #[tokio::test]
    async fn missing_temperature_is_unexpected_body() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/weather");
                then.status(200).json_body(json!({ "main": {} }));
            })
            .await;

        let err = client_for(&server).current_temperature("98402").await.unwrap_err();
        assert!(matches!(err, WeatherError::UnexpectedBody(_)));
    }

    #[tokio::test]
    async fn missing_key_is_not_configured() {
        let client = WeatherClient::new("http://127.0.0.1:9", None, "imperial", "us");
        assert!(matches!(client.forecast("98402").await, Err(WeatherError::NotConfigured)));
    }
}
