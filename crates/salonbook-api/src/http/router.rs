//! Axum router configuration with middleware.
//!
//! All routes are under `/api/v1/`. Middleware: CORS, tracing.
//! Uploaded salon and staff images are served statically under `/uploads/`.

use std::path::Path;

use axum::routing::{delete, get, post, put};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState, uploads_dir: &Path) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Salons
        .route(
            "/salons",
            post(handlers::salon::create_salon).get(handlers::salon::list_salons),
        )
        .route(
            "/salons/{id}",
            get(handlers::salon::get_salon)
                .put(handlers::salon::update_salon)
                .delete(handlers::salon::delete_salon),
        )
        .route("/salons/{id}/images", post(handlers::salon::upload_image))
        .route("/me/salon", get(handlers::salon::my_salon))
        // Service menu
        .route(
            "/salons/{id}/services",
            post(handlers::service::add_service).get(handlers::service::list_services),
        )
        .route("/services/{id}", put(handlers::service::update_service))
        .route("/services/{id}", delete(handlers::service::delete_service))
        // Staff
        .route(
            "/salons/{id}/employees",
            post(handlers::employee::add_employee).get(handlers::employee::list_employees),
        )
        .route("/employees/{id}", delete(handlers::employee::delete_employee))
        // Time slots
        .route(
            "/salons/{id}/slots",
            post(handlers::slot::add_slot).get(handlers::slot::list_upcoming),
        )
        .route("/salons/{id}/slots/calendar", get(handlers::slot::calendar))
        .route("/slots/{id}", delete(handlers::slot::delete_slot))
        // Appointments
        .route("/salons/{id}/appointments", post(handlers::appointment::book))
        .route(
            "/salons/{id}/appointments",
            get(handlers::appointment::salon_appointments),
        )
        .route("/appointments/{id}", get(handlers::appointment::get))
        .route(
            "/appointments/{id}/confirm",
            post(handlers::appointment::confirm),
        )
        .route(
            "/appointments/{id}/cancel",
            post(handlers::appointment::cancel),
        )
        .route(
            "/appointments/{id}/complete",
            post(handlers::appointment::complete),
        )
        .route(
            "/appointments/{id}/payment",
            post(handlers::appointment::record_payment),
        )
        .route("/me/appointments", get(handlers::appointment::my_appointments))
        .route("/salons/{id}/earnings", get(handlers::appointment::earnings))
        // Reviews
        .route(
            "/salons/{id}/reviews",
            post(handlers::review::post_review).get(handlers::review::list_reviews),
        )
        // Notifications
        .route(
            "/notifications",
            get(handlers::notification::list_unread)
                .delete(handlers::notification::clear_all),
        )
        .route(
            "/notifications/{id}/read",
            post(handlers::notification::mark_read),
        )
        .route("/messages", post(handlers::notification::send_message));

    Router::new()
        .nest("/api/v1", api_routes)
        .route("/health", get(health_check))
        .nest_service("/uploads", ServeDir::new(uploads_dir))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - Simple health check endpoint (no auth required).
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
