use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use pantry_core::PantryError;

pub fn pantry_error_to_response(err: PantryError) -> axum::response::Response {
    match err {
        PantryError::Parse(e) => json_error(StatusCode::BAD_REQUEST, "validation_error", e.to_string()),
        PantryError::Storage(e) => {
            tracing::error!(error = %e, "pantry storage failure");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "storage_error", e.to_string())
        }
    }
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

pub fn not_found(name: &str) -> axum::response::Response {
    json_error(
        StatusCode::NOT_FOUND,
        "not_found",
        format!("no item named `{}`", name.trim()),
    )
}
