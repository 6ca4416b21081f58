use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// The parts of the triggering event the action reads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TriggerContext {
    pub comment_body: Option<String>,
    pub issue_number: Option<u64>,
    pub pull_request: bool,
}

#[derive(Deserialize, Debug, Default)]
struct EventPayload {
    #[serde(default)]
    comment: Option<CommentPayload>,
    #[serde(default)]
    issue: Option<IssuePayload>,
}

#[derive(Deserialize, Debug)]
struct CommentPayload {
    #[serde(default)]
    body: Option<String>,
}

#[derive(Deserialize, Debug)]
struct IssuePayload {
    number: u64,
    #[serde(default)]
    pull_request: Option<Value>,
}

impl TriggerContext {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read event payload at {}", path.display()))?;
        Self::from_json(&raw)
            .with_context(|| format!("Failed to parse event payload at {}", path.display()))
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let payload: EventPayload = serde_json::from_str(raw)?;
        Ok(Self {
            comment_body: payload.comment.and_then(|c| c.body),
            issue_number: payload.issue.as_ref().map(|i| i.number),
            pull_request: payload
                .issue
                .and_then(|i| i.pull_request)
                .is_some_and(|pr| !pr.is_null()),
        })
    }

    /// Whether the comment was made on an issue that is a pull request.
    pub fn is_pr(&self) -> bool {
        self.pull_request
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_from_json_pull_request_comment() -> Result<()> {
        let raw = r#"{
            "action": "created",
            "comment": { "body": "/gt a.md b.md fr" },
            "issue": { "number": 42, "pull_request": { "url": "https://api.github.com/x" } }
        }"#;
        let ctx = TriggerContext::from_json(raw)?;
        assert_eq!(ctx.comment_body.as_deref(), Some("/gt a.md b.md fr"));
        assert_eq!(ctx.issue_number, Some(42));
        assert!(ctx.is_pr());
        Ok(())
    }

    #[test]
    fn test_from_json_plain_issue() -> Result<()> {
        let raw = r#"{ "comment": { "body": "hi" }, "issue": { "number": 7 } }"#;
        let ctx = TriggerContext::from_json(raw)?;
        assert!(!ctx.is_pr());
        assert_eq!(ctx.issue_number, Some(7));
        Ok(())
    }

    #[test]
    fn test_from_json_null_pull_request() -> Result<()> {
        let raw = r#"{ "issue": { "number": 7, "pull_request": null } }"#;
        let ctx = TriggerContext::from_json(raw)?;
        assert!(!ctx.is_pr());
        assert!(ctx.comment_body.is_none());
        Ok(())
    }

    #[test]
    fn test_from_json_without_comment_or_issue() -> Result<()> {
        let ctx = TriggerContext::from_json("{}")?;
        assert_eq!(ctx, TriggerContext::default());
        Ok(())
    }

    #[test]
    fn test_load_reports_path_on_parse_failure() -> Result<()> {
        let file = NamedTempFile::new()?;
        fs::write(file.path(), "not json")?;
        let err = TriggerContext::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse event payload"));
        Ok(())
    }
}
