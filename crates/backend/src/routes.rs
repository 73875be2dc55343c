use axum::{
    http::{header, Method},
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::handlers;
use crate::shared::app_state::AppState;
use crate::system::middleware::request_logger;

/// Конфигурация всех роутов приложения
pub fn configure_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // UseCase u501: Sync patients to CRM
        .route(
            "/api/u501/sync",
            post(handlers::usecases::u501_sync)
                .fallback(handlers::usecases::u501_method_not_allowed),
        )
        .with_state(state)
}

/// Роуты + CORS + логирование запросов
pub fn build_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    configure_routes(state)
        .layer(middleware::from_fn(request_logger))
        .layer(cors)
}
