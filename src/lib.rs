pub mod adapters;
pub mod cli;
pub mod config;
pub mod db;
pub mod docs;
pub mod domain;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod health;
pub mod middleware;
pub mod ports;
pub mod repository;
pub mod services;
pub mod startup;

use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::health::HealthMonitor;
use crate::ports::Notifier;
use crate::services::{StatusService, TransactionService};

#[derive(Clone)]
pub struct AppState {
    pub transactions: TransactionService,
    pub statuses: StatusService,
    pub notifier: Arc<dyn Notifier>,
    pub health: HealthMonitor,
}

pub fn create_app(state: AppState) -> Router {
    let v1 = Router::new()
        .route(
            "/transactions",
            get(handlers::transactions::list_transactions)
                .post(handlers::transactions::create_transaction),
        )
        .route(
            "/transactions/:id",
            get(handlers::transactions::get_transaction)
                .put(handlers::transactions::update_transaction)
                .delete(handlers::transactions::delete_transaction),
        )
        .route(
            "/statuses",
            get(handlers::statuses::list_statuses).post(handlers::statuses::create_status),
        )
        .route("/statuses/:id", get(handlers::statuses::get_status));

    Router::new()
        .route("/health", get(handlers::health))
        .nest("/v1", v1)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", docs::ApiDoc::openapi()))
        .layer(axum::middleware::from_fn(middleware::request_logger_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
