//! GitHub webhook signature verification.
//!
//! GitHub signs each delivery with HMAC-SHA256 over the raw request body
//! and sends `X-Hub-Signature-256: sha256=<hex>`.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the delivery signature
pub const SIGNATURE_HEADER: &str = "X-Hub-Signature-256";

const SIGNATURE_PREFIX: &str = "sha256";

/// Check `signature` (header value) against the HMAC of `body` under `secret`.
///
/// A missing or malformed header is a negative result, never an error.
pub fn verify_signature(body: &[u8], signature: Option<&str>, secret: &str) -> bool {
    let Some(signature) = signature else {
        tracing::debug!("Missing webhook signature header");
        return false;
    };

    let mut parts = signature.split('=');
    let (Some(SIGNATURE_PREFIX), Some(expected), None) = (parts.next(), parts.next(), parts.next())
    else {
        tracing::debug!("Malformed webhook signature header");
        return false;
    };

    constant_time_eq(compute_signature(body, secret).as_bytes(), expected.as_bytes())
}

/// Lowercase hex HMAC-SHA256 of `body` keyed by `secret`
pub fn compute_signature(body: &[u8], secret: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .expect("HMAC can take key of any size");
    mac.update(body);
    hex::encode(mac.finalize().into_bytes())
}

/// Full `X-Hub-Signature-256` header value for `body`
pub fn signature_header(body: &[u8], secret: &str) -> String {
    format!("{}={}", SIGNATURE_PREFIX, compute_signature(body, secret))
}

/// XOR-accumulating comparison; unequal lengths fail immediately
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
