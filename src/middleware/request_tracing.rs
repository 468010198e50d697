use std::net::SocketAddr;

use axum::{
    extract::ConnectInfo,
    http::{header, HeaderValue, Request},
    middleware::Next,
    response::IntoResponse,
};
use log::info;

const REQUEST_ID_LENGTH: usize = 10;

/// Carried in request extensions so handlers can tag their own log lines
/// with the id of the request they are serving.
#[derive(Clone)]
pub struct RequestTraceData {
    id: String,
}

impl RequestTraceData {
    pub fn get_id(&self) -> String {
        self.id.clone()
    }
}

fn remote_addr<T>(req: &Request<T>) -> String {
    match req.extensions().get::<ConnectInfo<SocketAddr>>() {
        Some(ConnectInfo(socket_addr)) => socket_addr.ip().to_string(),
        None => String::from("unknown"),
    }
}

fn user_agent<T>(req: &Request<T>) -> &str {
    req.headers()
        .get(header::USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("not-set")
}

/// Assigns every request a short id, logs the request line and the response
/// status under it, and echoes it back in an `X-Request-Id` header.
pub async fn request_tracing<T>(mut req: Request<T>, next: Next<T>) -> impl IntoResponse {
    let request_id = nanoid::nanoid!(REQUEST_ID_LENGTH);

    info!(
        "[{}] {} {} from {} '{}'",
        request_id,
        req.method().as_str(),
        req.uri(),
        remote_addr(&req),
        user_agent(&req),
    );

    req.extensions_mut().insert(RequestTraceData {
        id: request_id.clone(),
    });

    let mut response = next.run(req).await;

    info!("[{}] responded {}", request_id, response.status().as_u16());

    response
        .headers_mut()
        .insert("X-Request-Id", HeaderValue::from_str(&request_id).unwrap());

    response
}
