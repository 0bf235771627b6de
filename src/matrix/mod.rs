mod client;
mod login;
mod types;

pub use client::{DeliveryError, MatrixClient, NoticeSink};
pub use login::{format_expiry, LoginClient, LoginError};
pub use types::{DeliveryReceipt, LoginRequest, LoginResponse, MatrixErrorResponse, WhoAmIResponse};
