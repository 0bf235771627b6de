//! Field bag extraction for declarative templates

use serde_json::Value;

use super::payload::{str_at, str_or, text_at, value_at, EventContext, UNKNOWN};
use crate::template::FieldBag;

/// Build the field bag for a declarative (event type, action) pair.
///
/// Always carries `repo`, `repoUrl`, `sender` and `emoji`; the remaining
/// fields depend on the event type.
pub fn extract_fields(event_type: &str, action: &str, payload: &Value, emoji: &str) -> FieldBag {
    let context = EventContext::from_payload(payload);

    let mut fields = FieldBag::new();
    fields.insert("repo", context.repo);
    fields.insert("repoUrl", context.repo_url);
    fields.insert("sender", context.sender);
    fields.insert("emoji", emoji);

    match (event_type, action) {
        ("repository", "renamed") => {
            fields.insert(
                "oldName",
                str_or(payload, &["changes", "repository", "name", "from"], UNKNOWN),
            );
        }
        ("repository", "transferred") => {
            fields.insert(
                "newOwner",
                str_or(payload, &["changes", "owner", "from", "login"], UNKNOWN),
            );
        }
        ("label", _) => {
            fields.insert("labelName", str_or(payload, &["label", "name"], UNKNOWN));
        }
        ("issues" | "pull_request", _) => insert_item_fields(&mut fields, action, payload),
        ("release", _) => {
            if let Some(release) = value_at(payload, &["release"]) {
                let name = str_at(release, &["name"])
                    .or_else(|| str_at(release, &["tag_name"]))
                    .unwrap_or(UNKNOWN);
                fields.insert("name", name);
                fields.insert("url", str_or(release, &["html_url"], ""));
            }
        }
        _ => {}
    }

    fields
}

/// Issue or pull request fields; left out entirely when neither object exists
fn insert_item_fields(fields: &mut FieldBag, action: &str, payload: &Value) {
    let issue = value_at(payload, &["issue"]);
    let Some(item) = issue.or_else(|| value_at(payload, &["pull_request"])) else {
        return;
    };

    fields.insert("number", text_at(item, &["number"]).unwrap_or_default());
    fields.insert("title", str_or(item, &["title"], ""));
    fields.insert("url", str_or(item, &["html_url"], ""));

    if action == "opened" && issue.is_some() {
        fields.insert("assignees", assignee_suffix(item));
    }

    if matches!(action, "assigned" | "unassigned") {
        fields.insert("assignee", str_or(payload, &["assignee", "login"], UNKNOWN));
    }

    if matches!(action, "labeled" | "unlabeled") {
        fields.insert("labelName", str_or(payload, &["label", "name"], UNKNOWN));
    }
}

/// `" assigned to a, b"`, or empty when the item has no assignees
fn assignee_suffix(item: &Value) -> String {
    let logins: Vec<&str> = value_at(item, &["assignees"])
        .and_then(Value::as_array)
        .map(|assignees| {
            assignees
                .iter()
                .filter_map(|assignee| str_at(assignee, &["login"]))
                .collect()
        })
        .unwrap_or_default();

    if logins.is_empty() {
        String::new()
    } else {
        format!(" assigned to {}", logins.join(", "))
    }
}
