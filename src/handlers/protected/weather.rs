// handlers/protected/weather.rs - zip code weather lookups

use axum::extract::Path;
use serde::Serialize;
use serde_json::Value;

use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::weather;

#[derive(Debug, Serialize)]
pub struct CurrentWeather {
    pub info: f64,
}

#[derive(Debug, Serialize)]
pub struct Forecast {
    pub weather: Value,
}

/// GET /weather/zipcode/:code
pub async fn current(Path(code): Path<String>) -> ApiResult<CurrentWeather> {
    let code = zip_code(&code)?;
    let info = weather::client().current_temperature(code).await?;

    Ok(ApiResponse::success(CurrentWeather { info }))
}

/// GET /weather/daily/:code
pub async fn daily(Path(code): Path<String>) -> ApiResult<Forecast> {
    let code = zip_code(&code)?;
    let weather = weather::client().forecast(code).await?;

    Ok(ApiResponse::success(Forecast { weather }))
}

fn zip_code(raw: &str) -> Result<&str, ApiError> {
    let code = raw.trim();
    if code.is_empty() {
        return Err(ApiError::missing_info());
    }
    Ok(code)
}
