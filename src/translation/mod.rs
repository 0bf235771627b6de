//! GitHub event translation engine.
//!
//! Two-tier dispatch over the [template registry](crate::template):
//! declarative templates are filled from a per-event field bag, while
//! events with irregular payloads go through procedural handlers. Anything
//! unresolved ends in a generic fallback notice.

mod engine;
mod fields;
pub mod handlers;
pub mod payload;

pub use engine::{fallback_notice, translate, Translator};
pub use fields::extract_fields;
