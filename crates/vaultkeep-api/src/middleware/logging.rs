//! Correlated request/response logging middleware.
//!
//! Assigns every incoming request a correlation id, logs entry and exit
//! with method, path, status, and duration, and echoes the id back in the
//! `x-correlation-id` response header.

use std::time::Instant;

use axum::extract::Request;
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;
use tracing::info;
use uuid::Uuid;

/// Correlation id attached to request extensions for downstream layers.
#[derive(Debug, Clone)]
pub struct CorrelationId(pub String);

/// Logs request method, path, status, and duration under a correlation id.
pub async fn request_logging(mut request: Request, next: Next) -> Response {
    let correlation_id = Uuid::new_v4().to_string();
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    info!(
        correlation_id = %correlation_id,
        method = %method,
        path = %path,
        "Request received"
    );

    request
        .extensions_mut()
        .insert(CorrelationId(correlation_id.clone()));

    let mut response = next.run(request).await;

    let duration = start.elapsed();
    let status = response.status();

    info!(
        correlation_id = %correlation_id,
        method = %method,
        path = %path,
        status = %status.as_u16(),
        duration_ms = %duration.as_millis(),
        "Request completed"
    );

    if let Ok(value) = HeaderValue::from_str(&correlation_id) {
        response.headers_mut().insert("x-correlation-id", value);
    }

    response
}
