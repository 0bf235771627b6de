//! Static GitHub event registry

use std::collections::HashMap;

use lazy_static::lazy_static;

use super::types::{EventHandler, RegistryEntry, TemplateDescriptor};
use crate::translation::handlers;

lazy_static! {
    static ref GITHUB_REGISTRY: TemplateRegistry = TemplateRegistry::github();
}

/// Process-wide registry of supported GitHub events, built on first use
pub fn registry() -> &'static TemplateRegistry {
    &GITHUB_REGISTRY
}

/// Mapping from event type to its templates or handler
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    entries: HashMap<&'static str, RegistryEntry>,
}

impl TemplateRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register declarative templates for `event_type`, replacing any previous entry
    pub fn register_descriptors(
        &mut self,
        event_type: &'static str,
        actions: impl IntoIterator<Item = (&'static str, TemplateDescriptor)>,
    ) -> &mut Self {
        self.entries.insert(
            event_type,
            RegistryEntry::Descriptors(actions.into_iter().collect()),
        );
        self
    }

    /// Register a procedural handler for `event_type`, replacing any previous entry
    pub fn register_handler(&mut self, event_type: &'static str, handler: EventHandler) -> &mut Self {
        self.entries.insert(event_type, RegistryEntry::Handler(handler));
        self
    }

    pub fn lookup(&self, event_type: &str) -> Option<&RegistryEntry> {
        self.entries.get(event_type)
    }

    /// Registered event type names, sorted
    pub fn event_types(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.entries.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// The GitHub event table
    pub fn github() -> Self {
        let mut registry = Self::new();

        registry
            .register_descriptors("repository", repository_templates())
            .register_descriptors("label", label_templates())
            .register_descriptors("issues", issue_templates())
            .register_descriptors("pull_request", pull_request_templates())
            .register_descriptors("star", star_templates())
            .register_descriptors("release", release_templates())
            .register_handler("push", handlers::handle_push)
            .register_handler("create", handlers::handle_create)
            .register_handler("delete", handlers::handle_delete)
            .register_handler("workflow_run", handlers::handle_workflow_run)
            .register_handler("issue_comment", handlers::handle_issue_comment)
            .register_handler("fork", handlers::handle_fork);

        registry
    }
}

fn repository_templates() -> Vec<(&'static str, TemplateDescriptor)> {
    vec![
        (
            "created",
            TemplateDescriptor::new("🎉", "**{sender}** created new repository {repo}")
                .with_rich("🎉 <strong>{sender}</strong> created new repository <a href=\"{repoUrl}\">{repo}</a>")
                .with_repo_link(true),
        ),
        (
            "deleted",
            TemplateDescriptor::new("🗑️", "Repository {repo} was deleted by **{sender}**")
                .with_rich("🗑️ Repository {repo} was deleted by <strong>{sender}</strong>")
                .with_repo_link(false),
        ),
        (
            "archived",
            TemplateDescriptor::new("📦", "**{sender}** archived repository {repo}")
                .with_rich("📦 <strong>{sender}</strong> archived repository <a href=\"{repoUrl}\">{repo}</a>")
                .with_repo_link(true),
        ),
        (
            "unarchived",
            TemplateDescriptor::new("📂", "**{sender}** unarchived repository {repo}")
                .with_rich("📂 <strong>{sender}</strong> unarchived repository <a href=\"{repoUrl}\">{repo}</a>")
                .with_repo_link(true),
        ),
        (
            "publicized",
            TemplateDescriptor::new("🌍", "**{sender}** made {repo} public")
                .with_rich("🌍 <strong>{sender}</strong> made <a href=\"{repoUrl}\">{repo}</a> public")
                .with_repo_link(true),
        ),
        (
            "privatized",
            TemplateDescriptor::new("🔒", "**{sender}** made {repo} private")
                .with_rich("🔒 <strong>{sender}</strong> made <a href=\"{repoUrl}\">{repo}</a> private")
                .with_repo_link(true),
        ),
        (
            "renamed",
            TemplateDescriptor::new("✏️", "**{sender}** renamed repository from {oldName} to {repo}")
                .with_rich("✏️ <strong>{sender}</strong> renamed repository from {oldName} to <a href=\"{repoUrl}\">{repo}</a>")
                .with_repo_link(true),
        ),
        (
            "transferred",
            TemplateDescriptor::new("➡️", "**{sender}** transferred {repo} to {newOwner}")
                .with_rich("➡️ <strong>{sender}</strong> transferred <a href=\"{repoUrl}\">{repo}</a> to {newOwner}")
                .with_repo_link(true),
        ),
        (
            "edited",
            TemplateDescriptor::new("📝", "**{sender}** edited repository settings for {repo}")
                .with_rich("📝 <strong>{sender}</strong> edited repository settings for <a href=\"{repoUrl}\">{repo}</a>")
                .with_repo_link(true),
        ),
    ]
}

// Label notices are plain text only.
fn label_templates() -> Vec<(&'static str, TemplateDescriptor)> {
    vec![
        (
            "created",
            TemplateDescriptor::new("🏷️", "**{sender}** created label \"{labelName}\" in {repo}").text_only(),
        ),
        (
            "edited",
            TemplateDescriptor::new("🏷️", "**{sender}** edited label \"{labelName}\" in {repo}").text_only(),
        ),
        (
            "deleted",
            TemplateDescriptor::new("🏷️", "**{sender}** deleted label \"{labelName}\" from {repo}").text_only(),
        ),
    ]
}

fn issue_templates() -> Vec<(&'static str, TemplateDescriptor)> {
    vec![
        (
            "opened",
            TemplateDescriptor::new(
                "📥",
                "**{sender}** created new issue [{repo}#{number}]({url}): \"{title}\"{assignees}",
            )
            .with_rich("📥 <strong>{sender}</strong> created new issue <a href=\"{url}\">{repo}#{number}</a>: &quot;{title}&quot;{assignees}"),
        ),
        (
            "closed",
            TemplateDescriptor::new("⬛", "**{sender}** closed issue [{repo}#{number}]({url}): \"{title}\"")
                .with_rich("⬛ <strong>{sender}</strong> closed issue <a href=\"{url}\">{repo}#{number}</a>: &quot;{title}&quot;"),
        ),
        (
            "reopened",
            TemplateDescriptor::new("🔄", "**{sender}** reopened issue [{repo}#{number}]({url}): \"{title}\"")
                .with_rich("🔄 <strong>{sender}</strong> reopened issue <a href=\"{url}\">{repo}#{number}</a>: &quot;{title}&quot;"),
        ),
        (
            "edited",
            TemplateDescriptor::new("📝", "**{sender}** edited issue [{repo}#{number}]({url}): \"{title}\"")
                .with_rich("📝 <strong>{sender}</strong> edited issue <a href=\"{url}\">{repo}#{number}</a>: &quot;{title}&quot;"),
        ),
        (
            "assigned",
            TemplateDescriptor::new("👤", "**{sender}** assigned issue [{repo}#{number}]({url}) to {assignee}")
                .with_rich("👤 <strong>{sender}</strong> assigned issue <a href=\"{url}\">{repo}#{number}</a> to {assignee}"),
        ),
        (
            "unassigned",
            TemplateDescriptor::new("👤", "**{sender}** unassigned issue [{repo}#{number}]({url}) from {assignee}")
                .with_rich("👤 <strong>{sender}</strong> unassigned issue <a href=\"{url}\">{repo}#{number}</a> from {assignee}"),
        ),
        (
            "labeled",
            TemplateDescriptor::new(
                "🏷️",
                "**{sender}** added label \"{labelName}\" to issue [{repo}#{number}]({url})",
            )
            .with_rich("🏷️ <strong>{sender}</strong> added label &quot;{labelName}&quot; to issue <a href=\"{url}\">{repo}#{number}</a>"),
        ),
        (
            "unlabeled",
            TemplateDescriptor::new(
                "🏷️",
                "**{sender}** removed label \"{labelName}\" from issue [{repo}#{number}]({url})",
            )
            .with_rich("🏷️ <strong>{sender}</strong> removed label &quot;{labelName}&quot; from issue <a href=\"{url}\">{repo}#{number}</a>"),
        ),
    ]
}

// `merged` is not a GitHub action; the engine substitutes it for `closed`
// when the pull request was merged.
fn pull_request_templates() -> Vec<(&'static str, TemplateDescriptor)> {
    vec![
        (
            "opened",
            TemplateDescriptor::new("📂", "Pull request [#{number}: {title}]({url}) opened by {sender} in {repo}")
                .with_rich("<p>📂 Pull request <a href=\"{url}\">#{number}: {title}</a> opened by {sender} in <a href=\"{repoUrl}\">{repo}</a></p>\n"),
        ),
        (
            "closed",
            TemplateDescriptor::new("❌", "Pull request [#{number}: {title}]({url}) closed by {sender} in {repo}")
                .with_rich("<p>❌ Pull request <a href=\"{url}\">#{number}: {title}</a> closed by {sender} in <a href=\"{repoUrl}\">{repo}</a></p>\n"),
        ),
        (
            "merged",
            TemplateDescriptor::new("✅", "Pull request [#{number}: {title}]({url}) merged by {sender} in {repo}")
                .with_rich("<p>✅ Pull request <a href=\"{url}\">#{number}: {title}</a> merged by {sender} in <a href=\"{repoUrl}\">{repo}</a></p>\n"),
        ),
        (
            "reopened",
            TemplateDescriptor::new("♻️", "Pull request [#{number}: {title}]({url}) reopened by {sender} in {repo}")
                .with_rich("<p>♻️ Pull request <a href=\"{url}\">#{number}: {title}</a> reopened by {sender} in <a href=\"{repoUrl}\">{repo}</a></p>\n"),
        ),
        (
            "synchronize",
            TemplateDescriptor::new("🔄", "Pull request [#{number}: {title}]({url}) updated by {sender} in {repo}")
                .with_rich("<p>🔄 Pull request <a href=\"{url}\">#{number}: {title}</a> updated by {sender} in <a href=\"{repoUrl}\">{repo}</a></p>\n"),
        ),
    ]
}

fn star_templates() -> Vec<(&'static str, TemplateDescriptor)> {
    vec![
        (
            "created",
            TemplateDescriptor::new("⭐", "**{sender}** starred {repo}")
                .with_rich("<p>⭐ <strong>{sender}</strong> starred <a href=\"{repoUrl}\">{repo}</a></p>\n"),
        ),
        (
            "deleted",
            TemplateDescriptor::new("💫", "**{sender}** unstarred {repo}")
                .with_rich("<p>💫 <strong>{sender}</strong> unstarred <a href=\"{repoUrl}\">{repo}</a></p>\n"),
        ),
    ]
}

fn release_templates() -> Vec<(&'static str, TemplateDescriptor)> {
    vec![
        (
            "published",
            TemplateDescriptor::new("🎉", "New release [{name}]({url}) published in {repo}")
                .with_rich("<p>🎉 New release <a href=\"{url}\">{name}</a> published in <a href=\"{repoUrl}\">{repo}</a></p>\n"),
        ),
        (
            "created",
            TemplateDescriptor::new("📦", "Release [{name}]({url}) created in {repo}")
                .with_rich("<p>📦 Release <a href=\"{url}\">{name}</a> created in <a href=\"{repoUrl}\">{repo}</a></p>\n"),
        ),
        (
            "edited",
            TemplateDescriptor::new("✏️", "Release [{name}]({url}) edited in {repo}")
                .with_rich("<p>✏️ Release <a href=\"{url}\">{name}</a> edited in <a href=\"{repoUrl}\">{repo}</a></p>\n"),
        ),
        (
            "deleted",
            TemplateDescriptor::new("🗑️", "Release {name} deleted from {repo}")
                .with_rich("<p>🗑️ Release {name} deleted from <a href=\"{repoUrl}\">{repo}</a></p>\n"),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn action_count(registry: &TemplateRegistry, event_type: &str) -> usize {
        match registry.lookup(event_type) {
            Some(RegistryEntry::Descriptors(actions)) => actions.len(),
            other => panic!("{event_type} is not declarative: {other:?}"),
        }
    }

    #[test]
    fn test_declarative_action_counts() {
        let registry = registry();
        assert_eq!(action_count(registry, "repository"), 9);
        assert_eq!(action_count(registry, "label"), 3);
        assert_eq!(action_count(registry, "issues"), 8);
        assert_eq!(action_count(registry, "pull_request"), 5);
        assert_eq!(action_count(registry, "star"), 2);
        assert_eq!(action_count(registry, "release"), 4);
    }

    #[test]
    fn test_handler_event_types() {
        let registry = registry();
        for event_type in ["push", "create", "delete", "workflow_run", "issue_comment", "fork"] {
            assert!(
                matches!(registry.lookup(event_type), Some(RegistryEntry::Handler(_))),
                "{event_type} should be procedural"
            );
        }
    }

    #[test]
    fn test_unknown_event_absent() {
        assert!(registry().lookup("gollum").is_none());
        assert!(registry().lookup("").is_none());
    }

    #[test]
    fn test_event_types_sorted() {
        let names = registry().event_types();
        assert_eq!(names.len(), 12);
        assert_eq!(names.first(), Some(&"create"));
        assert_eq!(names.last(), Some(&"workflow_run"));
    }

    #[test]
    fn test_label_templates_are_plain_only() {
        let entry = registry().lookup("label").unwrap();
        for action in ["created", "edited", "deleted"] {
            let descriptor = entry.descriptor(action).unwrap();
            assert!(descriptor.plain_only);
            assert!(descriptor.rich_template.is_none());
        }
    }

    #[test]
    fn test_repo_link_flag_preserved() {
        let entry = registry().lookup("repository").unwrap();
        assert!(entry.descriptor("created").unwrap().uses_repo_link);
        assert!(!entry.descriptor("deleted").unwrap().uses_repo_link);
    }

    #[test]
    fn test_descriptor_lookup_on_handler_is_none() {
        let entry = registry().lookup("push").unwrap();
        assert!(entry.descriptor("opened").is_none());
    }

    #[test]
    fn test_register_replaces_entry() {
        let mut registry = TemplateRegistry::new();
        registry.register_descriptors("star", star_templates());
        registry.register_handler("star", handlers::handle_fork);
        assert!(matches!(registry.lookup("star"), Some(RegistryEntry::Handler(_))));
    }
}
