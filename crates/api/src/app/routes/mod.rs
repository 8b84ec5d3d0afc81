use axum::Router;

pub mod items;
pub mod search;
pub mod system;
pub mod units;

/// Router for every pantry endpoint except `/health`.
pub fn router() -> Router {
    Router::new()
        .merge(items::router())
        .merge(units::router())
        .merge(search::router())
}
