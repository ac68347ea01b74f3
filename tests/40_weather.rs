// The weather client reads its endpoint once per process, so this binary
// holds a single test that points it at the mock before the first request.
mod common;

use anyhow::Result;
use axum::http::{Method, StatusCode};
use httpmock::prelude::*;
use serde_json::json;

use common::{assert_error, call};

#[tokio::test]
async fn weather_routes_proxy_the_provider() -> Result<()> {
    let server = MockServer::start_async().await;
    std::env::set_var("WEATHER_ENDPOINT", server.base_url());
    std::env::set_var("WEATHER_API", "owm-test-key");
    std::env::set_var("WEATHER_COUNTRY", "us");
    std::env::set_var("WEATHER_UNITS", "imperial");

    let token = common::token_for(5, "forecast@example.com")?;
    let token = Some(token.as_str());

    let current = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/weather")
                .query_param("zip", "98402,us")
                .query_param("units", "imperial")
                .query_param("appid", "owm-test-key");
            then.status(200).json_body(json!({ "main": { "temp": 61.5 } }));
        })
        .await;
    let forecast = server
        .mock_async(|when, then| {
            when.method(GET).path("/forecast").query_param("zip", "98402,us");
            then.status(200).json_body(json!({ "cnt": 2, "list": [{ "dt": 1 }, { "dt": 2 }] }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/weather").query_param("zip", "00000,us");
            then.status(404).json_body(json!({ "cod": "404", "message": "city not found" }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/forecast").query_param("zip", "99999,us");
            then.status(500).body("upstream exploded");
        })
        .await;

    let reply = call(Method::GET, "/weather/zipcode/98402", token, None).await?;
    assert_eq!(reply.status, StatusCode::OK, "body: {}", reply.body);
    assert_eq!(reply.body["success"], true);
    assert_eq!(reply.body["info"], 61.5);
    current.assert_async().await;

    let reply = call(Method::GET, "/weather/daily/98402", token, None).await?;
    assert_eq!(reply.status, StatusCode::OK, "body: {}", reply.body);
    assert_eq!(reply.body["weather"]["cnt"], 2);
    assert_eq!(reply.body["weather"]["list"][1]["dt"], 2);
    forecast.assert_async().await;

    let reply = call(Method::GET, "/weather/zipcode/00000", token, None).await?;
    assert_error(&reply, StatusCode::NOT_FOUND, "Zip Code Not Found");

    let reply = call(Method::GET, "/weather/daily/99999", token, None).await?;
    assert_error(&reply, StatusCode::BAD_GATEWAY, "Weather Service Error");

    Ok(())
}
