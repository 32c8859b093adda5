//! Route configuration and setup.
//!
//! Health checks live in [health](health).

pub mod health;

use crate::api_doc::ApiDoc;
use crate::constants::{
    HEALTH_PATH, OPENAPI_PATH, UPLOAD_BATCH_PATH, UPLOAD_BINARY_PATH, UPLOAD_MULTIPART_PATH,
    UPLOAD_PATH,
};
use crate::error::ErrorResponse;
use crate::handlers;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use inspectshot_core::Config;
use inspectshot_infra::request_id_middleware;
use std::any::Any;
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{self, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use health::health_check;

/// Setup all application routes
pub async fn setup_routes(
    config: &Config,
    state: Arc<AppState>,
) -> Result<Router<()>, anyhow::Error> {
    let cors = setup_cors(config)?;

    tracing::info!(
        max_body_size_bytes = config.max_body_size_bytes(),
        "Request body limit enabled"
    );

    let app = Router::new()
        .route("/", get(health_check))
        .route(HEALTH_PATH, get(health_check))
        .route(UPLOAD_BATCH_PATH, post(handlers::batch_upload::upload_batch))
        .route(UPLOAD_PATH, post(handlers::image_upload::upload_image))
        .route(
            UPLOAD_MULTIPART_PATH,
            post(handlers::image_upload::upload_multipart),
        )
        .route(UPLOAD_BINARY_PATH, post(handlers::image_upload::upload_binary))
        .route(OPENAPI_PATH, get(openapi_json))
        .fallback(not_found)
        .with_state(state)
        .layer(RequestBodyLimitLayer::new(config.max_body_size_bytes()))
        .layer(DefaultBodyLimit::disable())
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn(request_id_middleware));

    Ok(app)
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::new("Endpoint not found", "NOT_FOUND")),
    )
}

/// Render a handler panic as a 500 JSON error.
fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let details = if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else {
        "Unknown panic".to_string()
    };

    tracing::error!(details = %details, "Handler panicked");

    let body = ErrorResponse::new("Internal server error", "INTERNAL_ERROR").with_details(details);
    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}

/// Setup CORS configuration
fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let methods = [Method::GET, Method::POST, Method::OPTIONS];
    let cors = if config.cors_origins().iter().any(|o| o == "*") {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new()
            .allow_origin(cors::Any)
            .allow_methods(methods)
            .allow_headers(cors::Any)
    } else {
        let origins = config
            .cors_origins()
            .iter()
            .map(|o| {
                o.parse::<HeaderValue>()
                    .map_err(|e| anyhow::anyhow!("Invalid CORS origin {}: {}", o, e))
            })
            .collect::<Result<Vec<_>, _>>()?;

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(methods)
            .allow_headers(cors::Any)
    };
    Ok(cors)
}
