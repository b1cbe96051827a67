//! Request handlers.
//!
//! The submission handler walks one requisition through
//! `Received → Parsed → Composed → EmailSent → WebhookAttempted → Responded`,
//! leaving for a 500 response from any step before the webhook.

use std::time::Instant;

use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart, State,
    },
    http::{Method, StatusCode},
    response::Response,
    Json,
};
use chrono::Utc;
use serde::Serialize;
use thiserror::Error;

use crate::delivery::{DeliveryReport, TransportError};
use crate::http::response::{json_message, method_not_allowed, SUBMITTED_MESSAGE};
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::requisition::catalog::{CatalogCategory, CATALOG};
use crate::requisition::{extract_requisition, FieldValue, FormFields, ValidationError};

/// Errors that fail a submission with a 500.
#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("Invalid form submission: {0}")]
    Rejected(#[from] MultipartRejection),

    #[error("Failed to read form data: {0}")]
    Multipart(#[from] MultipartError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// `/api/solicitacao`: accept one requisition form.
pub async fn submit_requisition(
    State(state): State<AppState>,
    method: Method,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    let start = Instant::now();

    if method != Method::POST {
        tracing::debug!(method = %method, "Rejecting non-POST submission");
        metrics::record_submission("method_not_allowed", start);
        return method_not_allowed(&method);
    }

    let result = match multipart {
        Ok(multipart) => match read_form(multipart).await {
            Ok(fields) => process_submission(&state, &fields).await,
            Err(e) => Err(e),
        },
        Err(rejection) => Err(rejection.into()),
    };

    match result {
        Ok(report) => {
            tracing::info!(webhook = ?report.webhook, "Requisition submitted");
            metrics::record_submission("success", start);
            json_message(StatusCode::OK, SUBMITTED_MESSAGE)
        }
        Err(e) => {
            tracing::error!(error = %e, "Requisition submission failed");
            metrics::record_submission("error", start);
            json_message(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

/// Drain a multipart body into ordered form fields.
pub async fn read_form(mut multipart: Multipart) -> Result<FormFields, SubmissionError> {
    let mut fields = FormFields::new();

    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        match field.file_name().map(str::to_string) {
            Some(filename) => {
                let content_type = field.content_type().map(str::to_string);
                let content = field.bytes().await?.to_vec();
                fields.push(
                    name,
                    FieldValue::File {
                        filename,
                        content_type,
                        content,
                    },
                );
            }
            None => {
                let text = field.text().await?;
                fields.push_text(name, text);
            }
        }
    }

    Ok(fields)
}

/// Parse, compose and deliver one requisition.
pub async fn process_submission(
    state: &AppState,
    fields: &FormFields,
) -> Result<DeliveryReport, SubmissionError> {
    let record = extract_requisition(fields)?;
    tracing::info!(
        requester = %record.requester,
        department = %record.department,
        standard_items = record.standard_items.len(),
        custom_items = record.custom_items.len(),
        attachment = record.attachment.is_some(),
        "Requisition parsed"
    );

    let composed = state.composer.compose(&record, Utc::now());
    Ok(state.dispatcher.deliver(&composed).await?)
}

/// `/api/catalog`: the standard items offered by the form.
pub async fn get_catalog() -> Json<&'static [CatalogCategory]> {
    Json(CATALOG)
}

#[derive(Serialize)]
pub struct SystemStatus {
    pub version: &'static str,
    pub status: &'static str,
    pub webhook_enabled: bool,
}

/// `/health`: liveness and channel configuration.
pub async fn get_status(State(state): State<AppState>) -> Json<SystemStatus> {
    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION"),
        status: "operational",
        webhook_enabled: state.dispatcher.webhook_enabled(),
    })
}
