// Boundary and shared infrastructure
pub mod config;
pub mod error;
pub mod telemetry;

// Translation core
pub mod notification;
pub mod template;
pub mod translation;

// Delivery and HTTP surface
pub mod matrix;
pub mod server;
pub mod signature;
pub mod triggers;
