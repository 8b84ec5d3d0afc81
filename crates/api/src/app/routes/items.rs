use axum::{
    extract::{Extension, Form},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use pantry_core::{format_date, today};
use pantry_inventory::{AddOutcome, ItemEdit};

use crate::app::{dto, errors, lock, SharedPantry};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_items))
        .route("/items", get(list_items).post(add_item))
        .route("/items/edit", post(edit_item))
        .route("/items/use", post(use_item))
        .route("/items/remove", post(remove_item))
}

pub async fn list_items(Extension(shared): Extension<SharedPantry>) -> axum::response::Response {
    let service = match lock(&shared) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    Json(dto::items_to_json(service.items(), today())).into_response()
}

/// First phase of an add. An unknown unit yields 202 with the pending item so
/// the client can complete it through `/unit`.
pub async fn add_item(
    Extension(shared): Extension<SharedPantry>,
    Form(form): Form<dto::AddItemForm>,
) -> axum::response::Response {
    let quantity = match form.quantity() {
        Ok(q) => q,
        Err(e) => return errors::pantry_error_to_response(e),
    };
    let mut service = match lock(&shared) {
        Ok(s) => s,
        Err(resp) => return resp,
    };

    let outcome = match service.add_or_merge(&form.name, quantity, &form.exp_date, form.unit.as_deref()) {
        Ok(o) => o,
        Err(e) => return errors::pantry_error_to_response(e),
    };

    match outcome {
        AddOutcome::UnitRequired(pending) => (
            StatusCode::ACCEPTED,
            Json(serde_json::json!({
                "requires_unit": true,
                "pending": {
                    "name": pending.name(),
                    "quantity": pending.quantity(),
                    "exp_date": format_date(pending.expiration_date()),
                },
                "unit_form": "/unit",
            })),
        )
            .into_response(),
        AddOutcome::Merged(item) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "requires_unit": false,
                "merged": true,
                "item": dto::item_to_json(&item, today()),
            })),
        )
            .into_response(),
        AddOutcome::Added(item) => (
            StatusCode::CREATED,
            Json(serde_json::json!({
                "requires_unit": false,
                "merged": false,
                "item": dto::item_to_json(&item, today()),
            })),
        )
            .into_response(),
    }
}

/// Partial edit: blank fields are left unchanged.
pub async fn edit_item(
    Extension(shared): Extension<SharedPantry>,
    Form(form): Form<dto::EditItemForm>,
) -> axum::response::Response {
    let edit = match ItemEdit::parse(&form.quantity, &form.exp_date) {
        Ok(e) => e,
        Err(e) => return errors::pantry_error_to_response(e.into()),
    };
    let mut service = match lock(&shared) {
        Ok(s) => s,
        Err(resp) => return resp,
    };

    match service.edit(&form.name, edit) {
        Ok(Some(item)) => Json(serde_json::json!({
            "updated": true,
            "item": dto::item_to_json(&item, today()),
        }))
        .into_response(),
        Ok(None) => Json(serde_json::json!({ "updated": false })).into_response(),
        Err(e) => errors::pantry_error_to_response(e),
    }
}

pub async fn use_item(
    Extension(shared): Extension<SharedPantry>,
    Form(form): Form<dto::UseItemForm>,
) -> axum::response::Response {
    let amount = match form.amount() {
        Ok(a) => a,
        Err(e) => return errors::pantry_error_to_response(e),
    };
    let mut service = match lock(&shared) {
        Ok(s) => s,
        Err(resp) => return resp,
    };

    match service.record_usage(&form.name, amount) {
        Ok(Some(item)) => Json(dto::item_to_json(&item, today())).into_response(),
        Ok(None) => errors::not_found(&form.name),
        Err(e) => errors::pantry_error_to_response(e),
    }
}

pub async fn remove_item(
    Extension(shared): Extension<SharedPantry>,
    Form(form): Form<dto::RemoveItemForm>,
) -> axum::response::Response {
    if form.name.trim().is_empty() {
        return Json(serde_json::json!({ "removed": 0 })).into_response();
    }
    let mut service = match lock(&shared) {
        Ok(s) => s,
        Err(resp) => return resp,
    };

    match service.remove(&form.name) {
        Ok(removed) => Json(serde_json::json!({ "removed": removed })).into_response(),
        Err(e) => errors::pantry_error_to_response(e),
    }
}
