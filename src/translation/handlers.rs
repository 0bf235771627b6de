//! Procedural translations for events that do not fit a template
//!
//! Each handler has the [`EventHandler`](crate::template::EventHandler)
//! signature. `None` means the payload lacks what the handler needs and the
//! caller should fall back to the generic notice.

use serde_json::Value;

use super::payload::{
    array_len, str_at, str_or, text_at, value_at, EventContext, UNKNOWN, UNKNOWN_REPO,
};
use crate::notification::NoticeContent;

/// Comment previews are cut to this many characters
const COMMENT_PREVIEW_CHARS: usize = 100;

/// `push`: commit count, branch and compare link
pub fn handle_push(payload: &Value, _action: &str) -> Option<NoticeContent> {
    let EventContext { repo, repo_url, sender } = EventContext::from_payload(payload);

    let branch = str_at(payload, &["ref"])
        .map(|r| r.replacen("refs/heads/", "", 1))
        .filter(|b| !b.is_empty())
        .unwrap_or_else(|| UNKNOWN.to_string());
    let count = array_len(payload, &["commits"]);
    let noun = if count == 1 { "commit" } else { "commits" };
    let compare_url = str_or(payload, &["compare"], "");

    Some(NoticeContent::rich(
        format!("📤 **{sender}** pushed [{count} {noun}]({compare_url}) to `{branch}` in {repo}"),
        format!(
            "<p>📤 <strong>{sender}</strong> pushed <a href=\"{compare_url}\">{count} {noun}</a> to <code>{branch}</code> in <a href=\"{repo_url}\">{repo}</a></p>\n"
        ),
    ))
}

/// `create`: new branch or tag
pub fn handle_create(payload: &Value, _action: &str) -> Option<NoticeContent> {
    Some(ref_notice(payload, "🌱", "created"))
}

/// `delete`: removed branch or tag
pub fn handle_delete(payload: &Value, _action: &str) -> Option<NoticeContent> {
    Some(ref_notice(payload, "🗑️", "deleted"))
}

fn ref_notice(payload: &Value, emoji: &str, verb: &str) -> NoticeContent {
    let EventContext { repo, repo_url, sender } = EventContext::from_payload(payload);
    let ref_type = str_or(payload, &["ref_type"], "reference");
    let ref_name = str_or(payload, &["ref"], UNKNOWN);

    NoticeContent::rich(
        format!("{emoji} **{sender}** {verb} {ref_type} `{ref_name}` in {repo}"),
        format!(
            "<p>{emoji} <strong>{sender}</strong> {verb} {ref_type} <code>{ref_name}</code> in <a href=\"{repo_url}\">{repo}</a></p>\n"
        ),
    )
}

/// `workflow_run`: only completed runs produce a notice
pub fn handle_workflow_run(payload: &Value, action: &str) -> Option<NoticeContent> {
    let workflow = value_at(payload, &["workflow_run"])?;
    if action != "completed" {
        return None;
    }

    let EventContext { repo, repo_url, .. } = EventContext::from_payload(payload);
    let name = str_or(workflow, &["name"], UNKNOWN);
    let branch = str_or(workflow, &["head_branch"], UNKNOWN);
    let run_url = str_or(workflow, &["html_url"], "");

    let (emoji, status) = match str_at(workflow, &["conclusion"]) {
        Some("failure") => ("❌", "failed"),
        Some("cancelled") => ("⚠️", "was cancelled"),
        _ => ("☑", "completed successfully 🎉"),
    };

    Some(NoticeContent::rich(
        format!("{emoji} Workflow **{name}** [{status}]({run_url}) for {repo} on branch `{branch}`"),
        format!(
            "<p>{emoji} Workflow <strong>{name}</strong> <a href=\"{run_url}\">{status}</a> for <a href=\"{repo_url}\">{repo}</a> on branch <code>{branch}</code></p>\n"
        ),
    ))
}

/// `issue_comment`: first line of the comment, linked to the issue
pub fn handle_issue_comment(payload: &Value, _action: &str) -> Option<NoticeContent> {
    let comment = value_at(payload, &["comment"])?;
    let issue = value_at(payload, &["issue"])?;

    let EventContext { repo, sender, .. } = EventContext::from_payload(payload);
    let comment_url = str_or(comment, &["html_url"], "");
    let issue_url = str_or(issue, &["html_url"], "");
    let number = text_at(issue, &["number"]).unwrap_or_default();
    let preview = comment_preview(str_at(comment, &["body"]).unwrap_or_default());

    Some(
        NoticeContent::rich(
            format!("🗣 **{sender}** [commented]({comment_url}) on [{repo}#{number}]({issue_url})  \n> {preview}"),
            format!(
                "🗣 <strong>{sender}</strong> <a href=\"{comment_url}\">commented</a> on <a href=\"{issue_url}\">{repo}#{number}</a><br>\n&gt; {preview}"
            ),
        )
        .with_external_url(issue_url),
    )
}

/// First line of `body`, at most [`COMMENT_PREVIEW_CHARS`] characters,
/// with `...` appended when anything was cut
fn comment_preview(body: &str) -> String {
    let first_line = body.split('\n').next().unwrap_or_default();
    let preview: String = first_line.chars().take(COMMENT_PREVIEW_CHARS).collect();
    let truncated = body.chars().count() > COMMENT_PREVIEW_CHARS || body.contains('\n');

    if truncated {
        format!("{preview}...")
    } else {
        preview
    }
}

/// `fork`: link to the new fork
pub fn handle_fork(payload: &Value, _action: &str) -> Option<NoticeContent> {
    let forkee = value_at(payload, &["forkee"])?;

    let EventContext { repo, repo_url, sender } = EventContext::from_payload(payload);
    let fork_name = str_or(forkee, &["full_name"], UNKNOWN_REPO);
    let fork_url = str_or(forkee, &["html_url"], "");

    Some(NoticeContent::rich(
        format!("🍴 **{sender}** forked {repo} to [{fork_name}]({fork_url})"),
        format!(
            "<p>🍴 <strong>{sender}</strong> forked <a href=\"{repo_url}\">{repo}</a> to <a href=\"{fork_url}\">{fork_name}</a></p>\n"
        ),
    ))
}
