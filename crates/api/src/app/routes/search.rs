use axum::{
    extract::{Extension, Form, Query},
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use pantry_core::today;

use crate::app::{dto, lock, SharedPantry};

pub fn router() -> Router {
    Router::new().route("/search", get(search_query).post(search_form))
}

pub async fn search_query(
    Extension(shared): Extension<SharedPantry>,
    Query(query): Query<dto::SearchQuery>,
) -> axum::response::Response {
    search(&shared, &query.q)
}

pub async fn search_form(
    Extension(shared): Extension<SharedPantry>,
    Form(form): Form<dto::SearchForm>,
) -> axum::response::Response {
    search(&shared, &form.search)
}

/// Substring match on item names; an empty term returns everything.
fn search(shared: &SharedPantry, term: &str) -> axum::response::Response {
    let service = match lock(shared) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let mut body = dto::items_to_json(service.search(term), today());
    body["term"] = serde_json::Value::from(term.trim());
    Json(body).into_response()
}
