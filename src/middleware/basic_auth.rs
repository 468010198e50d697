use std::sync::Arc;

use axum::{
    extract::State, http::Request, middleware::Next, response::Response, TypedHeader,
};
use headers::{authorization::Basic, Authorization};

use crate::{appstate::AppState, model::error::ApiError};

/// Gate on every transaction route. Stateless: each request is checked
/// against the credential pair the server was started with, and a passing
/// request continues unchanged.
pub async fn basic_auth<T>(
    State(app_state): State<Arc<AppState>>,
    auth_header: Option<TypedHeader<Authorization<Basic>>>,
    req: Request<T>,
    next: Next<T>,
) -> Result<Response, ApiError> {
    let TypedHeader(Authorization(supplied)) = match auth_header {
        Some(header) => header,
        None => {
            return Err(ApiError::Unauthorized(String::from(
                "No authorization header",
            )))
        }
    };

    let expected = app_state.get_credentials();
    if supplied.username() != expected.username || supplied.password() != expected.password {
        return Err(ApiError::Unauthorized(String::from("Invalid credentials")));
    }

    Ok(next.run(req).await)
}
