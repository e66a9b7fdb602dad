use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use orderdesk_core::{DomainError, RepositoryError};
use orderdesk_sales::OrderError;

pub fn order_error_to_response(err: OrderError) -> axum::response::Response {
    let status = match &err {
        OrderError::InvalidCustomer
        | OrderError::UnavailableProducts
        | OrderError::EmptyOrder
        | OrderError::InvalidLineItem
        | OrderError::InvalidQuantity { .. } => StatusCode::BAD_REQUEST,
        OrderError::InsufficientStock { .. } => StatusCode::CONFLICT,
        OrderError::PersistenceFailure => StatusCode::INTERNAL_SERVER_ERROR,
        OrderError::Repository(e) => return repository_error_to_response(e.clone()),
    };
    json_error(status, err.code(), err.to_string())
}

pub fn repository_error_to_response(err: RepositoryError) -> axum::response::Response {
    match err {
        RepositoryError::Conflict(msg) => json_error(StatusCode::CONFLICT, "conflict", msg),
        RepositoryError::NotFound(msg) => json_error(StatusCode::NOT_FOUND, "not_found", msg),
        RepositoryError::Unavailable(msg) => {
            tracing::error!(error = %msg, "repository unavailable");
            json_error(StatusCode::SERVICE_UNAVAILABLE, "store_unavailable", msg)
        }
        RepositoryError::Corrupt(msg) => {
            tracing::error!(error = %msg, "corrupt record");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "store_error", msg)
        }
    }
}

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        DomainError::InvalidId(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_id", msg),
    }
}

/// Undecodable bodies keep axum's status (400, 415 or 422) but use our envelope.
pub fn json_rejection_to_response(rejection: JsonRejection) -> axum::response::Response {
    json_error(rejection.status(), "invalid_body", rejection.body_text())
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
