//! Event-to-notice translation

use serde_json::Value;

use super::fields::extract_fields;
use super::payload::{flag_at, str_at, EventContext};
use crate::notification::NoticeContent;
use crate::template::{fill_template, registry, RegistryEntry, TemplateDescriptor, TemplateRegistry};

/// Marker glyph of the generic fallback notice
const FALLBACK_MARKER: &str = "📌";

/// Resolves (event type, payload) pairs into notices using a registry.
///
/// Total over any JSON value: unknown event types, unknown actions and
/// handlers that decline all end in the generic fallback notice.
#[derive(Debug, Clone, Copy)]
pub struct Translator<'a> {
    registry: &'a TemplateRegistry,
}

impl Default for Translator<'static> {
    fn default() -> Self {
        Self::new(registry())
    }
}

impl<'a> Translator<'a> {
    pub fn new(registry: &'a TemplateRegistry) -> Self {
        Self { registry }
    }

    /// Translate one webhook delivery
    pub fn translate(&self, event_type: &str, payload: &Value) -> NoticeContent {
        let action = str_at(payload, &["action"]).unwrap_or_default();

        let resolved = match self.registry.lookup(event_type) {
            Some(RegistryEntry::Handler(handler)) => handler(payload, action),
            Some(entry @ RegistryEntry::Descriptors(_)) => entry
                .descriptor(action)
                .map(|descriptor| {
                    let descriptor = select_descriptor(entry, event_type, action, descriptor, payload);
                    render(descriptor, event_type, action, payload)
                }),
            None => None,
        };

        resolved.unwrap_or_else(|| {
            tracing::debug!(event_type, action, "No template matched, using fallback notice");
            fallback_notice(event_type, action, payload)
        })
    }
}

/// Translate with the process-wide GitHub registry
pub fn translate(event_type: &str, payload: &Value) -> NoticeContent {
    Translator::default().translate(event_type, payload)
}

/// Merged pull requests arrive as `closed`; use the `merged` template when one exists
fn select_descriptor<'r>(
    entry: &'r RegistryEntry,
    event_type: &str,
    action: &str,
    descriptor: &'r TemplateDescriptor,
    payload: &Value,
) -> &'r TemplateDescriptor {
    let merged = event_type == "pull_request"
        && action == "closed"
        && flag_at(payload, &["pull_request", "merged"]);

    if merged {
        entry.descriptor("merged").unwrap_or(descriptor)
    } else {
        descriptor
    }
}

fn render(
    descriptor: &TemplateDescriptor,
    event_type: &str,
    action: &str,
    payload: &Value,
) -> NoticeContent {
    let fields = extract_fields(event_type, action, payload, descriptor.emoji);
    let body = format!(
        "{} {}",
        descriptor.emoji,
        fill_template(descriptor.plain_template, &fields)
    );

    if descriptor.plain_only {
        return NoticeContent::plain(body);
    }

    let formatted_body = match descriptor.rich_template {
        Some(rich) => fill_template(rich, &fields),
        None => body.clone(),
    };

    NoticeContent::rich(body, formatted_body)
}

/// `📌 GitHub {event} event (action) occurred in {repo}`
pub fn fallback_notice(event_type: &str, action: &str, payload: &Value) -> NoticeContent {
    let EventContext { repo, repo_url, .. } = EventContext::from_payload(payload);
    let action_suffix = if action.is_empty() {
        String::new()
    } else {
        format!(" ({action})")
    };

    NoticeContent::rich(
        format!("{FALLBACK_MARKER} GitHub {event_type} event{action_suffix} occurred in {repo}"),
        format!(
            "<p>{FALLBACK_MARKER} GitHub {event_type} event{action_suffix} occurred in <a href=\"{repo_url}\">{repo}</a></p>\n"
        ),
    )
}
