use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use db::Db;

use tower::ServiceBuilder;

use crate::{appstate::AppState, config::Credentials};

pub mod appstate;
pub mod config;
pub mod db;
pub mod handlers;
pub mod middleware;
pub mod model;

pub fn router(db: Db, credentials: Credentials) -> Router {
    let app_state = Arc::new(AppState::new(db, credentials));

    Router::new()
        .route(
            "/api/transactions",
            post(crate::handlers::create_transaction::create_transaction)
                .get(crate::handlers::list_transactions::list_transactions),
        )
        .route(
            "/api/transactions/:id",
            get(crate::handlers::get_transaction::get_transaction),
        )
        .route_layer(axum::middleware::from_fn_with_state(
            app_state.clone(),
            crate::middleware::basic_auth::basic_auth,
        ))
        .fallback(crate::handlers::path_not_found::handler_404)
        .layer(ServiceBuilder::new().layer(axum::middleware::from_fn(
            crate::middleware::request_tracing::request_tracing,
        )))
        .with_state(app_state)
}
