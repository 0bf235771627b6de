//! Matrix client-server API payloads

use serde::{Deserialize, Serialize};

/// Upstream answer to a message PUT
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReceipt {
    /// HTTP status returned by the homeserver
    pub status: u16,
    /// Raw response body
    pub body: String,
}

impl DeliveryReceipt {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// `m.login.password` request
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub identifier: UserIdentifier<'a>,
    pub password: &'a str,
    pub initial_device_display_name: &'a str,
    /// Ask for a non-expiring token
    pub refresh_token: bool,
}

#[derive(Debug, Serialize)]
pub struct UserIdentifier<'a> {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub user: &'a str,
}

impl<'a> LoginRequest<'a> {
    pub fn password(user: &'a str, password: &'a str, device_name: &'a str) -> Self {
        Self {
            kind: "m.login.password",
            identifier: UserIdentifier {
                kind: "m.id.user",
                user,
            },
            password,
            initial_device_display_name: device_name,
            refresh_token: false,
        }
    }
}

#[derive(Clone, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub device_id: String,
    pub user_id: String,
    #[serde(default)]
    pub home_server: Option<String>,
    #[serde(default)]
    pub expires_in_ms: Option<u64>,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

impl std::fmt::Debug for LoginResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginResponse")
            .field("user_id", &self.user_id)
            .field("device_id", &self.device_id)
            .field("home_server", &self.home_server)
            .field("expires_in_ms", &self.expires_in_ms)
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "<redacted>"))
            .finish_non_exhaustive()
    }
}

/// Standard Matrix error body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MatrixErrorResponse {
    #[serde(default)]
    pub errcode: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WhoAmIResponse {
    pub user_id: String,
    #[serde(default)]
    pub device_id: Option<String>,
}
