// app.rs - router assembly
//
// Public routes sit at the top level; every other group carries the
// member JWT check as a route layer, so unknown paths still 404 without auth.

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config;
use crate::handlers::{protected, public};
use crate::middleware::jwt_auth_middleware;

pub fn app() -> Router {
    let settings = config::config();

    let mut router = Router::new()
        // Public
        .route("/", get(public::root))
        .route("/health", get(public::health))
        // Protected
        .merge(chat_routes())
        .merge(message_routes())
        .merge(contact_routes())
        .merge(push_token_routes())
        .merge(location_routes())
        .merge(weather_routes())
        .layer(DefaultBodyLimit::max(settings.api.max_request_size_bytes));

    if settings.security.enable_cors {
        match cors_layer(&settings.security.cors_origins) {
            Some(cors) => router = router.layer(cors),
            None => tracing::warn!("CORS enabled but SECURITY_CORS_ORIGINS is empty; cross-origin requests will be refused"),
        }
    }
    if settings.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }

    router
}

fn chat_routes() -> Router {
    use protected::chats;

    Router::new()
        .route("/chats", post(chats::create).get(chats::list))
        .route("/chats/:chatid", post(chats::add_member).get(chats::members))
        .route("/chats/:chatid/:memberid", delete(chats::remove_member))
        .route_layer(middleware::from_fn(jwt_auth_middleware))
}

fn message_routes() -> Router {
    use protected::messages;

    Router::new()
        .route("/messages", post(messages::send))
        .route("/messages/:chatid", get(messages::latest))
        .route("/messages/:chatid/:messageid", get(messages::before))
        .route_layer(middleware::from_fn(jwt_auth_middleware))
}

fn contact_routes() -> Router {
    use protected::contacts;

    Router::new()
        .route("/contacts", get(contacts::list))
        .route("/contacts/requests", get(contacts::requests))
        .route(
            "/contacts/:memberid",
            post(contacts::add).put(contacts::verify).delete(contacts::remove),
        )
        .route_layer(middleware::from_fn(jwt_auth_middleware))
}

fn push_token_routes() -> Router {
    use protected::push_tokens;

    Router::new()
        .route("/auth", put(push_tokens::register).delete(push_tokens::unregister))
        .route_layer(middleware::from_fn(jwt_auth_middleware))
}

fn location_routes() -> Router {
    use protected::locations;

    Router::new()
        .route(
            "/locations",
            post(locations::save).get(locations::list).delete(locations::delete),
        )
        .route("/locations/weather", get(locations::weather))
        .route_layer(middleware::from_fn(jwt_auth_middleware))
}

fn weather_routes() -> Router {
    use protected::weather;

    Router::new()
        .route("/weather/zipcode/:code", get(weather::current))
        .route("/weather/daily/:code", get(weather::daily))
        .route_layer(middleware::from_fn(jwt_auth_middleware))
}

/// `*` allows any origin; otherwise only the listed ones. No usable origin
/// means no layer at all.
fn cors_layer(origins: &[String]) -> Option<CorsLayer> {
    if origins.iter().any(|o| o == "*") {
        return Some(CorsLayer::permissive());
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter(|origin| !origin.is_empty())
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    if allowed.is_empty() {
        return None;
    }

    Some(
        CorsLayer::new()
            .allow_origin(allowed)
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
            .allow_headers([
                header::CONTENT_TYPE,
                header::AUTHORIZATION,
                header::HeaderName::from_static("x-access-token"),
            ]),
    )
}
