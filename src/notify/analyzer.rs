//! Fetches a job's structured log and asks the model to classify it.

use std::sync::{Arc, OnceLock};

use regex::Regex;
use tracing::{debug, warn};

use crate::hosting::HostingApi;
use crate::llm::{ChatRequest, LlmClient};
use crate::util::{head_chars, tail_chars};

use super::context::JobContext;

/// Last N characters of the log handed to the model, to respect input limits.
pub const LOG_TAIL_CHARS: usize = 50_000;

/// First N characters of the task description included as context.
pub const TASK_HEAD_CHARS: usize = 2_000;

const ANALYSIS_MAX_TOKENS: u32 = 256;

const SUMMARY_PROMPT: &str = "\
You are reviewing the log of an automated background job that just finished.
Decide whether the job succeeded and write a one-line summary of what it did
(or where it went wrong), suitable for a chat notification.
{{CONTEXT}}
Job log (JSONL, possibly truncated to the tail):
{{LOG_CONTENT}}

Respond with exactly two lines:
SUCCESS: true or false
SUMMARY: <one line, no markdown>";

/// Success flag and one-line summary for a finished job.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationContext {
    pub success: bool,
    pub summary: String,
}

impl Default for NotificationContext {
    /// The fail-open outcome used whenever logs are missing or analysis
    /// fails. The notification must never be blocked by an analysis failure.
    fn default() -> Self {
        Self {
            success: true,
            summary: "Job completed.".to_string(),
        }
    }
}

pub struct JobLogAnalyzer {
    llm: Arc<dyn LlmClient>,
    hosting: Arc<dyn HostingApi>,
}

impl JobLogAnalyzer {
    pub fn new(llm: Arc<dyn LlmClient>, hosting: Arc<dyn HostingApi>) -> Self {
        Self { llm, hosting }
    }

    /// Analyze the log of `job_id` on `branch_ref`. Every failure path short-
    /// circuits to [`NotificationContext::default`].
    pub async fn analyze(
        &self,
        branch_ref: &str,
        job_id: &str,
        context: &JobContext,
    ) -> NotificationContext {
        let logs_path = format!("workspace/logs/{job_id}");

        let entries = match self.hosting.list_directory(&logs_path, branch_ref).await {
            Ok(entries) => entries,
            Err(e) => {
                // Logs directory might simply not exist.
                debug!(path = %logs_path, error = %e, "no log directory");
                return NotificationContext::default();
            }
        };

        let Some(log_file) = entries.iter().find(|f| f.name.ends_with(".jsonl")) else {
            return NotificationContext::default();
        };

        let log_content = match self
            .hosting
            .get_file_content(&log_file.path, branch_ref)
            .await
        {
            Ok(content) => content,
            Err(e) => {
                warn!(path = %log_file.path, error = %e, "Failed to fetch job log");
                return NotificationContext::default();
            }
        };

        self.summarize(&log_content, context).await
    }

    /// One non-tool model request over the rendered prompt.
    async fn summarize(&self, log_content: &str, context: &JobContext) -> NotificationContext {
        let prompt = render_prompt(log_content, context);
        let request = ChatRequest::single(prompt, ANALYSIS_MAX_TOKENS);

        match self.llm.complete(&request).await {
            Ok(response) => {
                let text = crate::types::Turn::assistant(response.blocks).text();
                parse_analysis(&text).unwrap_or_else(|| {
                    warn!("Analysis response did not match expected pattern");
                    NotificationContext::default()
                })
            }
            Err(e) => {
                warn!(error = %e, "Failed to summarize job log");
                NotificationContext::default()
            }
        }
    }
}

/// Render the fixed prompt template with context and log content.
fn render_prompt(log_content: &str, context: &JobContext) -> String {
    let mut context_section = String::new();
    if let Some(ref task) = context.task_description {
        context_section.push_str(&format!(
            "\nOriginal Task (job.md):\n{}\n",
            head_chars(task, TASK_HEAD_CHARS)
        ));
    }
    if let Some(ref commit) = context.commit_message {
        context_section.push_str(&format!("\nCommit Message:\n{commit}\n"));
    }

    SUMMARY_PROMPT
        .replace("{{CONTEXT}}", &context_section)
        .replace("{{LOG_CONTENT}}", tail_chars(log_content, LOG_TAIL_CHARS))
}

/// Parse the two expected fields. Returns `None` when either is missing so
/// the caller falls back to the default outcome.
fn parse_analysis(text: &str) -> Option<NotificationContext> {
    static SUCCESS_RE: OnceLock<Regex> = OnceLock::new();
    static SUMMARY_RE: OnceLock<Regex> = OnceLock::new();

    let success_re =
        SUCCESS_RE.get_or_init(|| Regex::new(r"(?i)SUCCESS:\s*(true|false)").unwrap());
    let summary_re = SUMMARY_RE.get_or_init(|| Regex::new(r"(?i)SUMMARY:\s*(.+)").unwrap());

    let success = success_re
        .captures(text)?
        .get(1)
        .map(|m| m.as_str().eq_ignore_ascii_case("true"))?;
    let summary = summary_re.captures(text)?.get(1)?.as_str().trim().to_string();

    Some(NotificationContext { success, summary })
}
