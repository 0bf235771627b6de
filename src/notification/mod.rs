//! Outbound notification content.

mod types;

pub use types::{MessageKind, NoticeContent, RichFormat};
