use serde::{Deserialize, Serialize};

/// Message kind carried by every notification this service emits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MessageKind {
    /// Bot-style notice, rendered by clients without triggering highlights
    #[default]
    #[serde(rename = "m.notice")]
    Notice,
}

/// Markup format of the rich body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RichFormat {
    /// HTML subset understood by Matrix clients
    #[serde(rename = "org.matrix.custom.html")]
    Html,
}

/// Notification content handed to the delivery collaborator.
///
/// `format` and `formatted_body` are either both present or both absent;
/// the constructors are the only way to set them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoticeContent {
    /// Always `m.notice`
    pub msgtype: MessageKind,
    /// Plain-text (markdown-flavoured) body
    pub body: String,
    /// Rich body format marker
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<RichFormat>,
    /// Rich (HTML) body
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatted_body: Option<String>,
    /// Link the receiving client may preview
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_url: Option<String>,
}

impl NoticeContent {
    /// Notice with only a plain body
    pub fn plain(body: impl Into<String>) -> Self {
        Self {
            msgtype: MessageKind::Notice,
            body: body.into(),
            format: None,
            formatted_body: None,
            external_url: None,
        }
    }

    /// Notice with a plain body and an HTML rendering
    pub fn rich(body: impl Into<String>, formatted_body: impl Into<String>) -> Self {
        Self {
            msgtype: MessageKind::Notice,
            body: body.into(),
            format: Some(RichFormat::Html),
            formatted_body: Some(formatted_body.into()),
            external_url: None,
        }
    }

    /// Attach a previewable link
    pub fn with_external_url(mut self, url: impl Into<String>) -> Self {
        self.external_url = Some(url.into());
        self
    }

    /// Whether an HTML rendering is attached
    pub fn is_rich(&self) -> bool {
        self.formatted_body.is_some()
    }
}
