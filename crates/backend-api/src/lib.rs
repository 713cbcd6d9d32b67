mod error;
mod state;

pub mod docs;
pub mod routes;
pub mod validation;

pub use error::{ApiError, ErrorResponse};
pub use state::AppState;

use axum::{
    http::{header::CONTENT_TYPE, Method},
    routing::get,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/api-docs/openapi.json", get(docs::openapi_json))
        // Message routes
        .route(
            "/messages",
            get(routes::messages::list_messages).post(routes::messages::add_message),
        )
        .route(
            "/messages/:id",
            get(routes::messages::get_message)
                .put(routes::messages::edit_message)
                .delete(routes::messages::remove_message),
        )
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE])
}
