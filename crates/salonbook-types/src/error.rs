use thiserror::Error;

use crate::appointment::AppointmentStatus;

/// Errors from catalog operations (salons, services, employees).
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("not found")]
    NotFound,

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("storage error: {0}")]
    Storage(String),
}

/// Errors from slot ledger operations.
#[derive(Debug, Error)]
pub enum SlotError {
    #[error("time slot not found")]
    NotFound,

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("storage error: {0}")]
    Storage(String),
}

/// Errors from booking engine operations.
#[derive(Debug, Error)]
pub enum BookingError {
    #[error("not found")]
    NotFound,

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("selected time slot is not available")]
    SlotUnavailable,

    #[error("invalid state transition: {from} -> {to}")]
    InvalidStateTransition {
        from: AppointmentStatus,
        to: AppointmentStatus,
    },

    #[error("deposit already paid for this appointment")]
    DepositAlreadyPaid,

    #[error("validation error: {0}")]
    Validation(String),

    #[error("storage error: {0}")]
    Storage(String),
}

/// Errors from review ledger operations.
#[derive(Debug, Error)]
pub enum ReviewError {
    #[error("review not found")]
    NotFound,

    #[error("a completed appointment is required before reviewing")]
    PreconditionFailed,

    #[error("validation error: {0}")]
    Validation(String),

    #[error("storage error: {0}")]
    Storage(String),
}

/// Errors from notification operations.
#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("notification not found")]
    NotFound,

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("storage error: {0}")]
    Storage(String),
}

/// Errors from repository operations (used by trait definitions in salonbook-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),
}
