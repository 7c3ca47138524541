pub mod config;
pub mod error;
pub mod routes;
pub mod sheets;
pub mod state;
pub mod submission;

use std::sync::Arc;

use axum::http::{header, HeaderName, HeaderValue, Method};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::config::{Config, CorsConfig};
use crate::sheets::RowAppender;
use crate::state::{AppState, SharedState};

pub fn build_app(config: Config, appender: Arc<dyn RowAppender>) -> Router {
    let cors = cors_layer(&config.cors);
    let max_body_size = config.max_body_size;

    let state: SharedState = Arc::new(AppState { config, appender });

    Router::new()
        .merge(routes::intake_routes())
        .route("/health", axum::routing::get(health))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                // Cors needs a `Default` response body, which the limit's body is not
                .layer(RequestBodyLimitLayer::new(max_body_size))
                .layer(cors),
        )
        // Security headers
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-content-type-options"),
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-frame-options"),
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("referrer-policy"),
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ))
        .with_state(state)
}

/// Browsers refuse `Access-Control-Allow-Origin: *` on credentialed
/// requests, so an open policy with credentials mirrors the caller's origin.
fn cors_layer(cors: &CorsConfig) -> CorsLayer {
    let origin = if cors.allowed_origins.is_empty() {
        if cors.allow_credentials {
            AllowOrigin::mirror_request()
        } else {
            AllowOrigin::any()
        }
    } else {
        let origins: Vec<HeaderValue> = cors
            .allowed_origins
            .iter()
            .filter_map(|o| match HeaderValue::from_str(o) {
                Ok(v) => Some(v),
                Err(_) => {
                    tracing::warn!("Ignoring invalid CORS origin: {o}");
                    None
                }
            })
            .collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(cors.allow_credentials)
}

async fn health() -> &'static str {
    "ok"
}
