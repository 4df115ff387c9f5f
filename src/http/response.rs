//! JSON replies of the contact endpoint.
//!
//! Bodies are what the site's form script renders to the visitor, so the
//! messages are in Portuguese.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::gate::FieldError;

pub const MSG_ACCEPTED: &str = "Mensagem enviada com sucesso! Entraremos em contato em breve.";
pub const MSG_RATE_LIMITED: &str = "Muitas tentativas. Tente novamente em 1 hora.";
pub const MSG_INVALID: &str = "Dados inválidos";
pub const MSG_INTERNAL: &str = "Erro interno do servidor. Tente novamente mais tarde.";
pub const MSG_METHOD_NOT_ALLOWED: &str = "Método não permitido";

pub fn accepted() -> Response {
    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "message": MSG_ACCEPTED,
            "timestamp": chrono::Utc::now().to_rfc3339(),
        })),
    )
        .into_response()
}

pub fn rate_limited() -> Response {
    error(StatusCode::TOO_MANY_REQUESTS, MSG_RATE_LIMITED)
}

pub fn invalid(errors: &[FieldError]) -> Response {
    let details: Vec<String> = errors.iter().map(ToString::to_string).collect();
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "error": MSG_INVALID, "details": details })),
    )
        .into_response()
}

pub fn internal_error() -> Response {
    error(StatusCode::INTERNAL_SERVER_ERROR, MSG_INTERNAL)
}

pub fn method_not_allowed() -> Response {
    error(StatusCode::METHOD_NOT_ALLOWED, MSG_METHOD_NOT_ALLOWED)
}

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}
