//! Completion event parsing and job correlation.

use serde::Deserialize;

/// Branch naming convention tying a pull request to a background job.
pub const JOB_BRANCH_PREFIX: &str = "job/";

/// Raw webhook payload from the hosting provider. The event type arrives
/// out of band (an HTTP header), so it is not part of this shape.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookPayload {
    pub action: String,
    #[serde(default)]
    pub pull_request: Option<PullRequestInfo>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PullRequestInfo {
    pub number: u64,
    pub head: HeadRef,
    pub html_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HeadRef {
    #[serde(rename = "ref")]
    pub r#ref: String,
}

/// A completion event the pipeline acts on.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionEvent {
    pub branch_ref: String,
    pub pr_number: u64,
    pub pr_url: String,
}

impl CompletionEvent {
    /// Accept only `pull_request` / `opened`; everything else is
    /// acknowledged and ignored.
    pub fn from_webhook(event_type: &str, payload: &WebhookPayload) -> Option<Self> {
        if event_type != "pull_request" || payload.action != "opened" {
            return None;
        }
        let pr = payload.pull_request.as_ref()?;
        Some(Self {
            branch_ref: pr.head.r#ref.clone(),
            pr_number: pr.number,
            pr_url: pr.html_url.clone(),
        })
    }
}

/// Extract the job identifier from a branch name following the
/// `job/<id>` convention. Non-matching branches are out of scope.
pub fn extract_job_id(branch_ref: &str) -> Option<&str> {
    branch_ref
        .strip_prefix(JOB_BRANCH_PREFIX)
        .filter(|id| !id.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_uuid_from_job_branch() {
        let id = "3f2c9b1e-8a6d-4e5f-9c7b-1a2b3c4d5e6f";
        assert_eq!(extract_job_id(&format!("job/{id}")), Some(id));
    }

    #[test]
    fn non_job_branch_yields_none() {
        assert_eq!(extract_job_id("feature/new-thing"), None);
        assert_eq!(extract_job_id("main"), None);
        assert_eq!(extract_job_id("job/"), None);
    }

    #[test]
    fn webhook_shape_deserializes() {
        let payload: WebhookPayload = serde_json::from_str(
            r#"{
                "action": "opened",
                "pull_request": {
                    "number": 42,
                    "head": { "ref": "job/abc123" },
                    "html_url": "https://example.com/pr/42"
                }
            }"#,
        )
        .unwrap();
        let event = CompletionEvent::from_webhook("pull_request", &payload).unwrap();
        assert_eq!(event.branch_ref, "job/abc123");
        assert_eq!(event.pr_number, 42);
        assert_eq!(event.pr_url, "https://example.com/pr/42");
    }

    #[test]
    fn other_actions_are_ignored() {
        let payload: WebhookPayload = serde_json::from_str(
            r#"{
                "action": "closed",
                "pull_request": {
                    "number": 1,
                    "head": { "ref": "job/x" },
                    "html_url": "https://example.com/pr/1"
                }
            }"#,
        )
        .unwrap();
        assert!(CompletionEvent::from_webhook("pull_request", &payload).is_none());
        let payload: WebhookPayload =
            serde_json::from_str(r#"{ "action": "opened" }"#).unwrap();
        assert!(CompletionEvent::from_webhook("push", &payload).is_none());
        assert!(CompletionEvent::from_webhook("pull_request", &payload).is_none());
    }
}
