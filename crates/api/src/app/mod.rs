//! HTTP application wiring (Axum router + shared pantry state).
//!
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: form DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::{Arc, Mutex, MutexGuard};

use axum::{http::StatusCode, response::Response, routing::get, Extension, Router};
use tower::ServiceBuilder;

use pantry_infra::PantryService;

pub mod dto;
pub mod errors;
pub mod routes;

/// Pantry state shared by every handler. Each request holds the lock for the
/// whole operation, file write included.
pub type SharedPantry = Arc<Mutex<PantryService>>;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(service: PantryService) -> Router {
    let shared: SharedPantry = Arc::new(Mutex::new(service));

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router())
        .layer(ServiceBuilder::new().layer(Extension(shared)))
}

pub(crate) fn lock(shared: &SharedPantry) -> Result<MutexGuard<'_, PantryService>, Response> {
    shared.lock().map_err(|_| {
        tracing::error!("pantry state lock poisoned");
        errors::json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "state_unavailable",
            "pantry state is unavailable",
        )
    })
}
