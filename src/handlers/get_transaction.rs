use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use log::info;

use crate::{
    appstate::AppState,
    middleware::request_tracing::RequestTraceData,
    model::{error::ApiError, transaction::Transaction},
};

pub async fn get_transaction(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Extension(request_trace_data): Extension<RequestTraceData>,
) -> Result<Json<Transaction>, ApiError> {
    info!("[{}] get_transaction {}", request_trace_data.get_id(), id);

    let transaction = match app_state.get_db().find_transaction(&id)? {
        Some(transaction) => transaction,
        None => return Err(ApiError::NotFound(String::from("Transaction not found"))),
    };

    Ok(Json(transaction))
}
