//! Application error type mapping domain errors to HTTP status codes.
//!
//! The mapping is uniform across modules: validation 400, missing 404,
//! ownership 403, contention and lifecycle violations 409, unmet review
//! precondition 412. Storage failures become a generic 500 so internals
//! never leak into response bodies.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use salonbook_types::error::{
    BookingError, CatalogError, NotificationError, ReviewError, SlotError,
};

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    Catalog(CatalogError),
    Slot(SlotError),
    Booking(BookingError),
    Review(ReviewError),
    Notification(NotificationError),
    /// Missing or malformed identity headers.
    Unauthorized(String),
    /// Request-shape validation failure before any service runs.
    Validation(String),
}

impl From<CatalogError> for AppError {
    fn from(e: CatalogError) -> Self {
        AppError::Catalog(e)
    }
}

impl From<SlotError> for AppError {
    fn from(e: SlotError) -> Self {
        AppError::Slot(e)
    }
}

impl From<BookingError> for AppError {
    fn from(e: BookingError) -> Self {
        AppError::Booking(e)
    }
}

impl From<ReviewError> for AppError {
    fn from(e: ReviewError) -> Self {
        AppError::Review(e)
    }
}

impl From<NotificationError> for AppError {
    fn from(e: NotificationError) -> Self {
        AppError::Notification(e)
    }
}

const INTERNAL_MESSAGE: &str = "internal error";

impl AppError {
    fn status_code_message(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Catalog(e) => match e {
                CatalogError::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND", e.to_string()),
                CatalogError::Forbidden(_) => (StatusCode::FORBIDDEN, "FORBIDDEN", e.to_string()),
                CatalogError::Validation(_) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", e.to_string())
                }
                CatalogError::Storage(msg) => {
                    tracing::error!(error = %msg, "catalog storage failure");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        INTERNAL_MESSAGE.to_string(),
                    )
                }
            },
            AppError::Slot(e) => match e {
                SlotError::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND", e.to_string()),
                SlotError::Forbidden(_) => (StatusCode::FORBIDDEN, "FORBIDDEN", e.to_string()),
                SlotError::Validation(_) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", e.to_string())
                }
                SlotError::Storage(msg) => {
                    tracing::error!(error = %msg, "slot storage failure");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        INTERNAL_MESSAGE.to_string(),
                    )
                }
            },
            AppError::Booking(e) => match e {
                BookingError::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND", e.to_string()),
                BookingError::Forbidden(_) => {
                    (StatusCode::FORBIDDEN, "FORBIDDEN", e.to_string())
                }
                BookingError::SlotUnavailable => {
                    (StatusCode::CONFLICT, "SLOT_UNAVAILABLE", e.to_string())
                }
                BookingError::InvalidStateTransition { .. } => {
                    (StatusCode::CONFLICT, "INVALID_STATE_TRANSITION", e.to_string())
                }
                BookingError::DepositAlreadyPaid => {
                    (StatusCode::CONFLICT, "DEPOSIT_ALREADY_PAID", e.to_string())
                }
                BookingError::Validation(_) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", e.to_string())
                }
                BookingError::Storage(msg) => {
                    tracing::error!(error = %msg, "booking storage failure");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        INTERNAL_MESSAGE.to_string(),
                    )
                }
            },
            AppError::Review(e) => match e {
                ReviewError::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND", e.to_string()),
                ReviewError::PreconditionFailed => (
                    StatusCode::PRECONDITION_FAILED,
                    "PRECONDITION_FAILED",
                    e.to_string(),
                ),
                ReviewError::Validation(_) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", e.to_string())
                }
                ReviewError::Storage(msg) => {
                    tracing::error!(error = %msg, "review storage failure");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        INTERNAL_MESSAGE.to_string(),
                    )
                }
            },
            AppError::Notification(e) => match e {
                NotificationError::NotFound => {
                    (StatusCode::NOT_FOUND, "NOT_FOUND", e.to_string())
                }
                NotificationError::Forbidden(_) => {
                    (StatusCode::FORBIDDEN, "FORBIDDEN", e.to_string())
                }
                NotificationError::Validation(_) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", e.to_string())
                }
                NotificationError::Storage(msg) => {
                    tracing::error!(error = %msg, "notification storage failure");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        INTERNAL_MESSAGE.to_string(),
                    )
                }
            },
            AppError::Unauthorized(msg) => {
                (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
            }
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.status_code_message();

        let body = json!({
            "errors": [{
                "code": code,
                "message": message,
            }]
        });

        (
            status,
            [(axum::http::header::CONTENT_TYPE, "application/json")],
            body.to_string(),
        )
            .into_response()
    }
}
