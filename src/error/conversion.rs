//! Error Conversion
//!
//! Implements `IntoResponse` for `AppError` so handlers can return it
//! directly. Every error becomes a JSON body of the form
//! `{"message": "..."}` with the status from `AppError::status_code`.
//!
//! This is also the single choke point where server-side failures are
//! logged: any 5xx response records the full error chain (which includes
//! database and provider diagnostics that must not reach the caller).

use axum::response::{IntoResponse, Json, Response};

use crate::error::types::AppError;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!("request failed with {}: {:?}", status, self);
        }

        let body = serde_json::json!({
            "message": self.to_string(),
        });

        (status, Json(body)).into_response()
    }
}
