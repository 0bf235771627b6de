//! Delivery of notices to a Matrix room.
//!
//! The [`NoticeSink`] trait is the seam between the webhook trigger and the
//! chat platform, so the trigger can be exercised without a homeserver.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use thiserror::Error;

use super::types::DeliveryReceipt;
use crate::config::MatrixConfig;
use crate::notification::NoticeContent;

/// Errors that can occur while delivering a notice.
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// Homeserver URL cannot carry API paths
    #[error("Invalid homeserver URL: {0}")]
    InvalidUrl(String),

    /// Transport failure (connect, timeout, TLS, ...)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Destination for translated notices.
#[async_trait]
pub trait NoticeSink: Send + Sync {
    /// Deliver `content` under the idempotency key `txn_id`.
    ///
    /// Non-success upstream statuses are returned in the receipt, not as errors.
    async fn send_notice(
        &self,
        txn_id: &str,
        content: &NoticeContent,
    ) -> Result<DeliveryReceipt, DeliveryError>;
}

/// Matrix client-server API sender for a single room.
pub struct MatrixClient {
    http_client: Client,
    homeserver: Url,
    access_token: String,
    room_id: String,
}

impl MatrixClient {
    pub fn new(config: &MatrixConfig) -> Result<Self, DeliveryError> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        let homeserver = parse_homeserver(&config.homeserver)?;

        tracing::info!(
            homeserver = %homeserver,
            room_id = %config.room_id,
            token_present = !config.access_token.is_empty(),
            "Matrix client initialized"
        );

        Ok(Self {
            http_client,
            homeserver,
            access_token: config.access_token.clone(),
            room_id: config.room_id.clone(),
        })
    }

    /// `PUT` target for a room message with transaction id `txn_id`
    pub fn message_url(&self, txn_id: &str) -> Result<Url, DeliveryError> {
        api_url(
            &self.homeserver,
            &[
                "_matrix",
                "client",
                "v3",
                "rooms",
                &self.room_id,
                "send",
                "m.room.message",
                txn_id,
            ],
        )
    }
}

#[async_trait]
impl NoticeSink for MatrixClient {
    #[tracing::instrument(name = "matrix.send_notice", skip(self, content))]
    async fn send_notice(
        &self,
        txn_id: &str,
        content: &NoticeContent,
    ) -> Result<DeliveryReceipt, DeliveryError> {
        let url = self.message_url(txn_id)?;

        let response = self
            .http_client
            .put(url)
            .bearer_auth(&self.access_token)
            .json(content)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        tracing::debug!(status, "Matrix responded");

        Ok(DeliveryReceipt { status, body })
    }
}

pub(crate) fn parse_homeserver(homeserver: &str) -> Result<Url, DeliveryError> {
    let url = Url::parse(homeserver).map_err(|e| DeliveryError::InvalidUrl(e.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(DeliveryError::InvalidUrl(homeserver.to_string()));
    }
    Ok(url)
}

/// Append percent-encoded `segments` to the homeserver base path
pub(crate) fn api_url(base: &Url, segments: &[&str]) -> Result<Url, DeliveryError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| DeliveryError::InvalidUrl(base.to_string()))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config(homeserver: &str) -> MatrixConfig {
        MatrixConfig {
            homeserver: homeserver.to_string(),
            access_token: "syt_token".to_string(),
            room_id: "!room:example.org".to_string(),
            request_timeout_secs: 5,
        }
    }

    #[test]
    fn test_message_url() {
        let client = MatrixClient::new(&config("https://matrix.example.org")).unwrap();
        let url = client.message_url("github_abc-123").unwrap();

        assert_eq!(
            url.as_str(),
            "https://matrix.example.org/_matrix/client/v3/rooms/!room:example.org/send/m.room.message/github_abc-123"
        );
    }

    #[test]
    fn test_message_url_encodes_segments() {
        let client = MatrixClient::new(&config("https://matrix.example.org/")).unwrap();
        let url = client.message_url("a/b c").unwrap();
        assert!(url.as_str().ends_with("/send/m.room.message/a%2Fb%20c"));
    }

    #[test]
    fn test_invalid_homeserver() {
        assert!(matches!(
            MatrixClient::new(&config("not a url")),
            Err(DeliveryError::InvalidUrl(_))
        ));
        assert!(matches!(
            MatrixClient::new(&config("mailto:bot@example.org")),
            Err(DeliveryError::InvalidUrl(_))
        ));
    }

    #[tokio::test]
    async fn test_send_notice_puts_content() {
        let server = MockServer::start().await;
        let notice = NoticeContent::rich("⭐ **bob** starred acme/repo", "<p>star</p>\n");

        Mock::given(method("PUT"))
            .and(path("/_matrix/client/v3/rooms/!room:example.org/send/m.room.message/github_d1"))
            .and(header("authorization", "Bearer syt_token"))
            .and(body_json(json!({
                "msgtype": "m.notice",
                "body": "⭐ **bob** starred acme/repo",
                "format": "org.matrix.custom.html",
                "formatted_body": "<p>star</p>\n"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"event_id":"$ev"}"#))
            .expect(1)
            .mount(&server)
            .await;

        let client = MatrixClient::new(&config(&server.uri())).unwrap();
        let receipt = client.send_notice("github_d1", &notice).await.unwrap();

        assert_eq!(receipt.status, 200);
        assert_eq!(receipt.body, r#"{"event_id":"$ev"}"#);
        assert!(receipt.is_success());
    }

    #[tokio::test]
    async fn test_upstream_error_is_a_receipt() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .respond_with(
                ResponseTemplate::new(403)
                    .set_body_string(r#"{"errcode":"M_FORBIDDEN","error":"not in room"}"#),
            )
            .mount(&server)
            .await;

        let client = MatrixClient::new(&config(&server.uri())).unwrap();
        let receipt = client
            .send_notice("github_d2", &NoticeContent::plain("hi"))
            .await
            .unwrap();

        assert_eq!(receipt.status, 403);
        assert!(!receipt.is_success());
        assert!(receipt.body.contains("M_FORBIDDEN"));
    }
}
