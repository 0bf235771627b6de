//! End-to-end translation tests against the built-in GitHub registry
//!
//! These exercise the public `translate` entry point with realistic
//! payload shapes, without any HTTP plumbing.

use serde_json::{json, Value};

use github_matrix_notifier::notification::{MessageKind, NoticeContent, RichFormat};
use github_matrix_notifier::template::{placeholders, registry, RegistryEntry};
use github_matrix_notifier::translation::{extract_fields, fallback_notice, translate};

fn base_payload(action: &str) -> Value {
    json!({
        "action": action,
        "repository": {
            "full_name": "acme/widgets",
            "html_url": "https://github.com/acme/widgets"
        },
        "sender": {"login": "bob"}
    })
}

fn assert_notice(notice: &NoticeContent) {
    assert_eq!(notice.msgtype, MessageKind::Notice);
    assert!(!notice.body.is_empty());
    if notice.is_rich() {
        assert_eq!(notice.format, Some(RichFormat::Html));
        assert!(notice.formatted_body.as_deref().is_some_and(|f| !f.is_empty()));
    } else {
        assert!(notice.format.is_none());
        assert!(notice.formatted_body.is_none());
    }
}

#[test]
fn test_every_descriptor_renders_with_emoji_prefix() {
    for event_type in registry().event_types() {
        let Some(RegistryEntry::Descriptors(descriptors)) = registry().lookup(event_type) else {
            continue;
        };

        for (action, descriptor) in descriptors {
            // `merged` is only reachable through the closed override
            if *action == "merged" {
                continue;
            }

            let notice = translate(event_type, &base_payload(action));
            assert_notice(&notice);
            assert!(
                notice.body.starts_with(&format!("{} ", descriptor.emoji)),
                "{event_type}/{action}: {}",
                notice.body
            );
            assert_eq!(notice.is_rich(), !descriptor.plain_only, "{event_type}/{action}");
        }
    }
}

/// Every object any template reads from, populated
fn full_payload() -> Value {
    json!({
        "repository": {
            "full_name": "acme/widgets",
            "html_url": "https://github.com/acme/widgets"
        },
        "sender": {"login": "bob"},
        "changes": {
            "repository": {"name": {"from": "gadgets"}},
            "owner": {"from": {"login": "old-org"}}
        },
        "label": {"name": "bug"},
        "assignee": {"login": "carol"},
        "issue": {
            "number": 5,
            "title": "Broken cog",
            "html_url": "https://github.com/acme/widgets/issues/5",
            "assignees": [{"login": "alice"}]
        },
        "pull_request": {
            "number": 17,
            "title": "Add gears",
            "html_url": "https://github.com/acme/widgets/pull/17",
            "merged": true
        },
        "release": {
            "name": "Spring",
            "tag_name": "v2.0.0",
            "html_url": "https://github.com/acme/widgets/releases/v2.0.0"
        }
    })
}

#[test]
fn test_every_placeholder_is_extracted() {
    let payload = full_payload();
    let mut checked = 0;

    for event_type in registry().event_types() {
        let Some(RegistryEntry::Descriptors(descriptors)) = registry().lookup(event_type) else {
            continue;
        };

        for (action, descriptor) in descriptors {
            let fields = extract_fields(event_type, action, &payload, descriptor.emoji);
            let templates = std::iter::once(descriptor.plain_template).chain(descriptor.rich_template);

            for template in templates {
                for name in placeholders(template) {
                    assert!(
                        fields.contains(name),
                        "{event_type}/{action}: no field for {{{name}}} in {template:?}"
                    );
                    checked += 1;
                }
            }
        }
    }

    assert!(checked > 0);
}

#[test]
fn test_full_payload_leaves_no_tokens() {
    let payload = full_payload();

    for event_type in ["repository", "label", "issues", "pull_request", "star", "release"] {
        let Some(RegistryEntry::Descriptors(descriptors)) = registry().lookup(event_type) else {
            panic!("{event_type} should be declarative");
        };

        for action in descriptors.keys().filter(|action| **action != "merged") {
            let mut payload = payload.clone();
            payload["action"] = json!(action);

            let notice = translate(event_type, &payload);
            assert_eq!(placeholders(&notice.body).count(), 0, "{}", notice.body);
            if let Some(formatted) = notice.formatted_body.as_deref() {
                assert_eq!(placeholders(formatted).count(), 0, "{formatted}");
            }
        }
    }
}

#[test]
fn test_handlers_never_panic_on_empty_payload() {
    for event_type in registry().event_types() {
        let notice = translate(event_type, &json!({}));
        assert_notice(&notice);
    }
}

#[test]
fn test_non_object_payloads_fall_back() {
    for payload in [json!(null), json!(42), json!("text"), json!([1, 2, 3])] {
        let notice = translate("star", &payload);
        assert_eq!(notice.body, "📌 GitHub star event occurred in unknown/repo");
    }
}

#[test]
fn test_unknown_event_falls_back() {
    let notice = translate("deployment_status", &base_payload("created"));

    assert_eq!(
        notice.body,
        "📌 GitHub deployment_status event (created) occurred in acme/widgets"
    );
    assert_eq!(
        notice.formatted_body.as_deref(),
        Some("<p>📌 GitHub deployment_status event (created) occurred in <a href=\"https://github.com/acme/widgets\">acme/widgets</a></p>\n")
    );
    assert_eq!(notice, fallback_notice("deployment_status", "created", &base_payload("created")));
}

#[test]
fn test_unknown_action_falls_back() {
    let notice = translate("issues", &base_payload("pinned"));
    assert_eq!(notice.body, "📌 GitHub issues event (pinned) occurred in acme/widgets");
}

#[test]
fn test_merged_pull_request() {
    let mut payload = base_payload("closed");
    payload["pull_request"] = json!({
        "number": 17,
        "title": "Add gears",
        "html_url": "https://github.com/acme/widgets/pull/17",
        "merged": true
    });

    let notice = translate("pull_request", &payload);
    assert_eq!(
        notice.body,
        "✅ Pull request [#17: Add gears](https://github.com/acme/widgets/pull/17) merged by bob in acme/widgets"
    );

    payload["pull_request"]["merged"] = json!(false);
    let notice = translate("pull_request", &payload);
    assert!(notice.body.contains("closed by bob"), "{}", notice.body);
}

#[test]
fn test_release_without_name_or_tag() {
    let mut payload = base_payload("published");
    payload["release"] = json!({"html_url": "https://github.com/acme/widgets/releases/1"});

    let notice = translate("release", &payload);
    assert_eq!(
        notice.body,
        "🎉 New release [unknown](https://github.com/acme/widgets/releases/1) published in acme/widgets"
    );
}

#[test]
fn test_release_prefers_name_over_tag() {
    let mut payload = base_payload("published");
    payload["release"] = json!({
        "name": "Spring",
        "tag_name": "v2.0.0",
        "html_url": "https://github.com/acme/widgets/releases/v2.0.0"
    });
    assert!(translate("release", &payload).body.contains("[Spring]"));

    payload["release"]["name"] = json!("");
    assert!(translate("release", &payload).body.contains("[v2.0.0]"));
}

#[test]
fn test_push_scenario() {
    let payload = json!({
        "ref": "refs/heads/main",
        "compare": "https://github.com/acme/widgets/compare/abc...def",
        "commits": [{"id": "abc"}, {"id": "def"}],
        "repository": {
            "full_name": "acme/widgets",
            "html_url": "https://github.com/acme/widgets"
        },
        "sender": {"login": "bob"}
    });

    let notice = translate("push", &payload);

    assert_eq!(
        notice.body,
        "📤 **bob** pushed [2 commits](https://github.com/acme/widgets/compare/abc...def) to `main` in acme/widgets"
    );
    assert_eq!(
        notice.formatted_body.as_deref(),
        Some("<p>📤 <strong>bob</strong> pushed <a href=\"https://github.com/acme/widgets/compare/abc...def\">2 commits</a> to <code>main</code> in <a href=\"https://github.com/acme/widgets\">acme/widgets</a></p>\n")
    );
}

#[test]
fn test_issue_opened_with_assignees() {
    let mut payload = base_payload("opened");
    payload["issue"] = json!({
        "number": 5,
        "title": "Broken cog",
        "html_url": "https://github.com/acme/widgets/issues/5",
        "assignees": [{"login": "alice"}, {"login": "carol"}]
    });

    let notice = translate("issues", &payload);
    assert_eq!(
        notice.body,
        "📥 **bob** created new issue [acme/widgets#5](https://github.com/acme/widgets/issues/5): \"Broken cog\" assigned to alice, carol"
    );
}

#[test]
fn test_label_events_are_plain_text() {
    let mut payload = base_payload("created");
    payload["label"] = json!({"name": "bug"});

    let notice = translate("label", &payload);
    assert!(!notice.is_rich());
    assert!(notice.body.contains("bug"), "{}", notice.body);
}

#[test]
fn test_workflow_run_requires_completion() {
    let mut payload = base_payload("requested");
    payload["workflow_run"] = json!({"name": "CI", "conclusion": null});

    let notice = translate("workflow_run", &payload);
    assert!(notice.body.starts_with("📌 GitHub workflow_run event (requested)"));
}

#[test]
fn test_wire_format() {
    let notice = translate("star", &base_payload("created"));
    let value = serde_json::to_value(&notice).unwrap();

    assert_eq!(value["msgtype"], "m.notice");
    assert_eq!(value["format"], "org.matrix.custom.html");
    assert!(value.get("external_url").is_none());
}
