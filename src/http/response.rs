//! JSON response bodies.
//!
//! Every answer of the submission endpoint is a `{ "message": ... }` object;
//! failures carry the error text, never a structured code.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

pub const SUBMITTED_MESSAGE: &str = "Requisição enviada com sucesso!";

/// `{ "message": ... }` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiMessage {
    pub message: String,
}

impl ApiMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Build a JSON message response with the given status.
pub fn json_message(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ApiMessage::new(message))).into_response()
}

/// 405 for anything but POST, advertising the allowed method.
pub fn method_not_allowed(method: &axum::http::Method) -> Response {
    let mut response = json_message(
        StatusCode::METHOD_NOT_ALLOWED,
        format!("Método {} não permitido", method),
    );
    response
        .headers_mut()
        .insert(header::ALLOW, HeaderValue::from_static("POST"));
    response
}
