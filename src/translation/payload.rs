//! Get-with-default accessors over loosely-typed webhook payloads
//!
//! Payloads are read as plain JSON; nothing beyond the fields each rule
//! names is assumed. A field counts as absent when it is missing, `null`,
//! `false`, `0` or an empty string.

use serde_json::Value;

/// Default for a missing repository full name
pub const UNKNOWN_REPO: &str = "unknown/repo";
/// Default for missing names (sender, actor, label, ...)
pub const UNKNOWN: &str = "unknown";

/// Present, non-falsy value at `path`
pub fn value_at<'a>(payload: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter()
        .try_fold(payload, |value, key| value.get(*key))
        .filter(|value| is_truthy(value))
}

/// Non-empty string at `path`
pub fn str_at<'a>(payload: &'a Value, path: &[&str]) -> Option<&'a str> {
    value_at(payload, path).and_then(Value::as_str)
}

/// String at `path`, or `default`
pub fn str_or(payload: &Value, path: &[&str], default: &str) -> String {
    str_at(payload, path).unwrap_or(default).to_string()
}

/// String or number at `path` rendered as text
pub fn text_at(payload: &Value, path: &[&str]) -> Option<String> {
    match value_at(payload, path)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Whether the value at `path` is present and truthy
pub fn flag_at(payload: &Value, path: &[&str]) -> bool {
    value_at(payload, path).is_some()
}

/// Length of the array at `path`; zero when absent or not an array
pub fn array_len(payload: &Value, path: &[&str]) -> usize {
    value_at(payload, path)
        .and_then(Value::as_array)
        .map_or(0, Vec::len)
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Repository and sender fields every notice starts from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventContext {
    /// `repository.full_name`, default `unknown/repo`
    pub repo: String,
    /// `repository.html_url`, default empty
    pub repo_url: String,
    /// `sender.login`, default `unknown`
    pub sender: String,
}

impl EventContext {
    pub fn from_payload(payload: &Value) -> Self {
        Self {
            repo: str_or(payload, &["repository", "full_name"], UNKNOWN_REPO),
            repo_url: str_or(payload, &["repository", "html_url"], ""),
            sender: str_or(payload, &["sender", "login"], UNKNOWN),
        }
    }
}
