//! GitHub webhook endpoint

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::server::AppState;
use crate::signature::{verify_signature, SIGNATURE_HEADER};
use crate::translation::{payload::str_at, translate};

pub const EVENT_HEADER: &str = "X-GitHub-Event";
pub const DELIVERY_HEADER: &str = "X-GitHub-Delivery";

const UNKNOWN_EVENT: &str = "unknown";

/// Body returned for events that are intentionally not forwarded
#[derive(Debug, Serialize)]
pub struct FilteredResponse {
    pub status: &'static str,
    pub reason: &'static str,
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

/// Transaction id for the chat API, stable across GitHub redeliveries
pub fn transaction_id(delivery_id: Option<&str>) -> String {
    match delivery_id {
        Some(id) => format!("github_{}", id),
        None => format!("github_{}", Uuid::new_v4()),
    }
}

/// Receive a GitHub webhook, translate it and relay it to the room.
///
/// The chat server's status and body are passed back to GitHub so failed
/// deliveries show up in the repository's webhook log.
#[tracing::instrument(
    name = "webhook.github",
    skip(state, headers, body),
    fields(
        event_type = header_str(&headers, EVENT_HEADER).unwrap_or(UNKNOWN_EVENT),
        delivery_id = header_str(&headers, DELIVERY_HEADER),
        body_len = body.len(),
    )
)]
pub async fn github_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response> {
    let signature = header_str(&headers, SIGNATURE_HEADER);
    if !verify_signature(&body, signature, &state.settings.github.webhook_secret) {
        return Err(AppError::Unauthorized("Invalid signature".to_string()));
    }

    let payload: serde_json::Value = serde_json::from_slice(&body)?;

    let event_type = header_str(&headers, EVENT_HEADER).unwrap_or(UNKNOWN_EVENT);

    if event_type == "label" {
        if let Some(sender) = str_at(&payload, &["sender", "login"]) {
            if state.settings.ignores_label_sender(sender) {
                tracing::info!(sender, "Ignoring system label event");
                return Ok(Json(FilteredResponse {
                    status: "filtered",
                    reason: "GitHub system label event",
                })
                .into_response());
            }
        }
    }

    let notice = translate(event_type, &payload);
    let txn_id = transaction_id(header_str(&headers, DELIVERY_HEADER));

    tracing::debug!(txn_id = %txn_id, rich = notice.is_rich(), "Delivering notice");

    let receipt = state.sink.send_notice(&txn_id, &notice).await?;

    let status =
        StatusCode::from_u16(receipt.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    if receipt.is_success() {
        tracing::info!(status = receipt.status, txn_id = %txn_id, "Notice delivered");
    } else {
        tracing::error!(
            status = receipt.status,
            txn_id = %txn_id,
            response = %receipt.body,
            "Chat server rejected notice"
        );
    }

    Ok((
        status,
        [(header::CONTENT_TYPE, "application/json")],
        receipt.body,
    )
        .into_response())
}

/// Anything that is not `POST /webhook`; the method is checked before the path
pub async fn fallback(method: Method, uri: Uri) -> AppError {
    if method != Method::POST {
        AppError::MethodNotAllowed(method.to_string())
    } else {
        AppError::NotFound(uri.path().to_string())
    }
}
