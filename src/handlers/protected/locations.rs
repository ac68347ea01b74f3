// handlers/protected/locations.rs - saved locations and their current weather

use axum::extract::Extension;
use axum::Json;
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::database::models::Location;
use crate::database::DatabaseManager;
use crate::error::{stage, ApiError};
use crate::middleware::{ApiJson, ApiResponse, ApiResult, AuthMember};
use crate::services::LocationService;
use crate::validation::{provided, text_from_json};
use crate::weather;

#[derive(Debug, Deserialize)]
pub struct SaveLocationRequest {
    pub city: Option<String>,
    pub lat: Option<f64>,
    pub long: Option<f64>,
    pub zip: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteLocationRequest {
    pub zip: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct LocationWeather {
    pub zip: String,
    pub nickname: Option<String>,
    /// Current temperature, `null` when the provider could not answer
    pub info: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct LocationWeatherList {
    pub locations: Vec<LocationWeather>,
}

/// POST /locations
pub async fn save(
    Extension(member): Extension<AuthMember>,
    ApiJson(body): ApiJson<SaveLocationRequest>,
) -> ApiResult<Value> {
    let zip = text_from_json(body.zip.as_ref()).ok_or_else(ApiError::missing_info)?;
    let location = Location {
        zip,
        nickname: provided(body.city),
        lat: body.lat,
        long: body.long,
    };

    let pool = DatabaseManager::pool().await?;
    let inserted = LocationService::new(pool)
        .save(member.memberid, &location)
        .await
        .map_err(ApiError::sql(stage::INSERT))?;

    if !inserted {
        return Err(ApiError::bad_request("Location Already Saved"));
    }
    tracing::info!("Member {} saved location {}", member.memberid, location.zip);

    Ok(ApiResponse::ok())
}

/// DELETE /locations
pub async fn delete(
    Extension(member): Extension<AuthMember>,
    ApiJson(body): ApiJson<DeleteLocationRequest>,
) -> ApiResult<Value> {
    let zip = text_from_json(body.zip.as_ref()).ok_or_else(ApiError::missing_info)?;

    let pool = DatabaseManager::pool().await?;
    let removed = LocationService::new(pool)
        .delete(member.memberid, &zip)
        .await
        .map_err(ApiError::sql(stage::DELETE))?;

    if removed == 0 {
        return Err(ApiError::not_found("Location Not Found"));
    }

    Ok(ApiResponse::ok())
}

/// GET /locations - bare array, no envelope
pub async fn list(Extension(member): Extension<AuthMember>) -> Result<Json<Vec<Location>>, ApiError> {
    let pool = DatabaseManager::pool().await?;
    let locations = LocationService::new(pool)
        .list(member.memberid)
        .await
        .map_err(ApiError::sql(stage::GENERIC))?;

    Ok(Json(locations))
}

/// GET /locations/weather
pub async fn weather(Extension(member): Extension<AuthMember>) -> ApiResult<LocationWeatherList> {
    let pool = DatabaseManager::pool().await?;
    let saved = LocationService::new(pool)
        .list(member.memberid)
        .await
        .map_err(ApiError::sql(stage::GENERIC))?;

    let client = weather::client();
    let temperatures = join_all(saved.iter().map(|location| client.current_temperature(&location.zip))).await;

    let locations = saved
        .into_iter()
        .zip(temperatures)
        .map(|(location, temperature)| {
            let info = match temperature {
                Ok(temp) => Some(temp),
                Err(e) => {
                    tracing::warn!("No weather for saved location {}: {}", location.zip, e);
                    None
                }
            };
            LocationWeather {
                zip: location.zip,
                nickname: location.nickname,
                info,
            }
        })
        .collect();

    Ok(ApiResponse::success(LocationWeatherList { locations }))
}
