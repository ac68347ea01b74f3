// handlers/public/health.rs - service descriptor and liveness check

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::database::DatabaseManager;
use crate::is_production;

/// GET /
pub async fn root() -> Json<Value> {
    Json(json!({
        "success": true,
        "name": "Parley API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "health": "/health (public)",
            "chats": "/chats[/:chatid[/:memberid]] (protected)",
            "messages": "/messages[/:chatid[/:messageid]] (protected)",
            "contacts": "/contacts[/requests|/:memberid] (protected)",
            "push": "/auth (protected)",
            "locations": "/locations[/weather] (protected)",
            "weather": "/weather/zipcode/:code, /weather/daily/:code (protected)",
        }
    }))
}

/// GET /health - 200 when the database answers, 503 otherwise
pub async fn health() -> impl IntoResponse {
    let now = chrono::Utc::now();

    match DatabaseManager::health_check().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            // Connection strings can leak through driver errors
            let detail = if is_production!() { "unavailable".to_string() } else { e.to_string() };
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "success": false,
                    "status": "degraded",
                    "timestamp": now,
                    "database": detail
                })),
            )
        }
    }
}
