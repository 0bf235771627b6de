//! Template descriptor and registry entry types

use std::collections::HashMap;

use crate::notification::NoticeContent;

/// Describes the notice rendered for one (event type, action) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateDescriptor {
    /// Display glyph prefixed to the plain body
    pub emoji: &'static str,
    /// Plain-text template with `{placeholder}` tokens
    pub plain_template: &'static str,
    /// HTML template with `{placeholder}` tokens
    pub rich_template: Option<&'static str>,
    /// Emit the plain body only, even when a rich template exists
    pub plain_only: bool,
    /// Advisory: the rich template links the repository name.
    /// Carried for compatibility, never consulted during translation.
    pub uses_repo_link: bool,
}

impl TemplateDescriptor {
    pub const fn new(emoji: &'static str, plain_template: &'static str) -> Self {
        Self {
            emoji,
            plain_template,
            rich_template: None,
            plain_only: false,
            uses_repo_link: false,
        }
    }

    pub const fn with_rich(mut self, rich_template: &'static str) -> Self {
        self.rich_template = Some(rich_template);
        self
    }

    pub const fn text_only(mut self) -> Self {
        self.plain_only = true;
        self
    }

    pub const fn with_repo_link(mut self, uses_repo_link: bool) -> Self {
        self.uses_repo_link = uses_repo_link;
        self
    }
}

/// Procedural translation for events whose payload does not fit a template.
///
/// Returns `None` when the payload lacks the sub-objects the handler needs;
/// the engine then falls back to the generic notice.
pub type EventHandler = fn(&serde_json::Value, &str) -> Option<NoticeContent>;

/// Registry value for one event type
#[derive(Clone)]
pub enum RegistryEntry {
    /// Declarative templates keyed by action name
    Descriptors(HashMap<&'static str, TemplateDescriptor>),
    /// Procedural handler
    Handler(EventHandler),
}

impl RegistryEntry {
    /// Descriptor for `action`, if this entry is declarative and defines it
    pub fn descriptor(&self, action: &str) -> Option<&TemplateDescriptor> {
        match self {
            RegistryEntry::Descriptors(actions) => actions.get(action),
            RegistryEntry::Handler(_) => None,
        }
    }
}

impl std::fmt::Debug for RegistryEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistryEntry::Descriptors(actions) => {
                let mut names: Vec<_> = actions.keys().collect();
                names.sort();
                f.debug_tuple("Descriptors").field(&names).finish()
            }
            RegistryEntry::Handler(_) => f.write_str("Handler"),
        }
    }
}

/// Placeholder values for one event, built fresh from its payload
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldBag {
    fields: HashMap<&'static str, String>,
}

impl FieldBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &'static str, value: impl Into<String>) {
        self.fields.insert(name, value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
