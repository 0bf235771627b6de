//! Password login against a homeserver, used by the `matrix_login` helper
//! to mint the bot's access token.

use reqwest::{Client, Url};
use thiserror::Error;

use super::client::{api_url, parse_homeserver, DeliveryError};
use super::types::{LoginRequest, LoginResponse, MatrixErrorResponse, WhoAmIResponse};

#[derive(Debug, Error)]
pub enum LoginError {
    #[error("Homeserver rejected the request ({status}): {errcode}: {error}")]
    Rejected {
        status: u16,
        errcode: String,
        error: String,
    },

    #[error("Invalid homeserver URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
}

impl From<DeliveryError> for LoginError {
    fn from(err: DeliveryError) -> Self {
        match err {
            DeliveryError::InvalidUrl(url) => LoginError::InvalidUrl(url),
            DeliveryError::Http(e) => LoginError::Http(e),
        }
    }
}

pub struct LoginClient {
    http_client: Client,
    homeserver: Url,
}

impl LoginClient {
    pub fn new(homeserver: &str) -> Result<Self, LoginError> {
        Ok(Self {
            http_client: Client::new(),
            homeserver: parse_homeserver(homeserver)?,
        })
    }

    pub async fn login(
        &self,
        user: &str,
        password: &str,
        device_name: &str,
    ) -> Result<LoginResponse, LoginError> {
        let url = api_url(&self.homeserver, &["_matrix", "client", "v3", "login"])?;
        let request = LoginRequest::password(user, password, device_name);

        tracing::debug!(user, device_name, "Logging in");

        let response = self.http_client.post(url).json(&request).send().await?;
        if !response.status().is_success() {
            return Err(rejected(response).await);
        }

        Ok(response.json().await?)
    }

    /// Confirm that `access_token` is accepted by the homeserver
    pub async fn whoami(&self, access_token: &str) -> Result<WhoAmIResponse, LoginError> {
        let url = api_url(
            &self.homeserver,
            &["_matrix", "client", "v3", "account", "whoami"],
        )?;

        let response = self
            .http_client
            .get(url)
            .bearer_auth(access_token)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(rejected(response).await);
        }

        Ok(response.json().await?)
    }
}

async fn rejected(response: reqwest::Response) -> LoginError {
    let status = response.status();
    let body: MatrixErrorResponse = response.json().await.unwrap_or_default();

    LoginError::Rejected {
        status: status.as_u16(),
        errcode: body.errcode.unwrap_or_else(|| "M_UNKNOWN".to_string()),
        error: body
            .error
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string()),
    }
}

/// Human readable token lifetime, e.g. `"2 days, 3 hours"`
pub fn format_expiry(expires_in_ms: u64) -> String {
    let total_hours = expires_in_ms / 3_600_000;
    let days = total_hours / 24;
    let hours = total_hours % 24;

    let plural = |n: u64, unit: &str| {
        if n == 1 {
            format!("{} {}", n, unit)
        } else {
            format!("{} {}s", n, unit)
        }
    };

    match (days, hours) {
        (0, 0) => "less than an hour".to_string(),
        (0, h) => plural(h, "hour"),
        (d, 0) => plural(d, "day"),
        (d, h) => format!("{}, {}", plural(d, "day"), plural(h, "hour")),
    }
}
