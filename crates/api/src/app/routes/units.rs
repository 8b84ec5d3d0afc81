use axum::{
    extract::{Extension, Form, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use pantry_core::{format_date, parse_date, today};

use crate::app::{dto, errors, lock, SharedPantry};

pub fn router() -> Router {
    Router::new().route("/unit", get(unit_form).post(submit_unit))
}

/// Describe the form that completes a pending add.
///
/// `known_unit` is filled when the unit became known after the add was
/// started, in which case the client may submit it as is.
pub async fn unit_form(
    Extension(shared): Extension<SharedPantry>,
    Query(pending): Query<dto::PendingItemForm>,
) -> axum::response::Response {
    let quantity = match pending.quantity() {
        Ok(q) => q,
        Err(e) => return errors::pantry_error_to_response(e),
    };
    let exp_date = match parse_date(&pending.exp_date) {
        Ok(d) => d,
        Err(e) => return errors::pantry_error_to_response(e.into()),
    };
    let service = match lock(&shared) {
        Ok(s) => s,
        Err(resp) => return resp,
    };

    Json(serde_json::json!({
        "name": pending.name.trim(),
        "quantity": quantity,
        "exp_date": format_date(exp_date),
        "known_unit": service.pantry().units().resolve(&pending.name),
        "fields": ["unit"],
        "action": "/unit",
    }))
    .into_response()
}

/// Second phase of an add: store the item with the supplied unit.
pub async fn submit_unit(
    Extension(shared): Extension<SharedPantry>,
    Form(form): Form<dto::PendingItemForm>,
) -> axum::response::Response {
    let quantity = match form.quantity() {
        Ok(q) => q,
        Err(e) => return errors::pantry_error_to_response(e),
    };
    let mut service = match lock(&shared) {
        Ok(s) => s,
        Err(resp) => return resp,
    };

    match service.finalize_new_item(&form.name, quantity, &form.exp_date, &form.unit) {
        Ok(item) => (
            StatusCode::CREATED,
            Json(serde_json::json!({
                "requires_unit": false,
                "item": dto::item_to_json(&item, today()),
            })),
        )
            .into_response(),
        Err(e) => errors::pantry_error_to_response(e),
    }
}
