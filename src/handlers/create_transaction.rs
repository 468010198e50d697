use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Extension, Json};

use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};

use crate::{
    appstate::AppState,
    middleware::request_tracing::RequestTraceData,
    model::{
        amount::Amount,
        error::ApiError,
        transaction::{Transaction, TransactionType},
    },
};

#[derive(Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CreateTransactionRequest {
    pub amount: Option<Amount>,
    #[serde(rename = "type")]
    pub transaction_type: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
}

fn validate_request_body(
    request: &CreateTransactionRequest,
) -> Result<(Amount, TransactionType, String), ApiError> {
    let amount = match request.amount {
        Some(amount) if amount.is_positive_nonzero() => amount,
        _ => {
            return Err(ApiError::InputFailedValidation(String::from(
                "Amount must be a positive number",
            )))
        }
    };

    let transaction_type = match request
        .transaction_type
        .as_deref()
        .and_then(TransactionType::parse)
    {
        Some(transaction_type) => transaction_type,
        None => {
            return Err(ApiError::InputFailedValidation(String::from(
                "Type must be either 'credit' or 'debit'",
            )))
        }
    };

    let description = match request.description.as_deref() {
        Some(description) if !description.is_empty() => String::from(description),
        _ => {
            return Err(ApiError::InputFailedValidation(String::from(
                "Must provide a description",
            )))
        }
    };

    return Ok((amount, transaction_type, description));
}

pub async fn create_transaction(
    State(app_state): State<Arc<AppState>>,
    Extension(request_trace_data): Extension<RequestTraceData>,
    Json(request): Json<CreateTransactionRequest>,
) -> Result<(StatusCode, Json<Transaction>), ApiError> {
    info!(
        "[{}] create_transaction called with {:?}",
        request_trace_data.get_id(),
        request
    );

    let (amount, transaction_type, description) = validate_request_body(&request)?;

    let persisted_transaction = app_state.get_db().insert_transaction(Transaction::create(
        amount,
        transaction_type,
        description,
        request.date,
    ))?;

    Ok((StatusCode::CREATED, Json(persisted_transaction)))
}
