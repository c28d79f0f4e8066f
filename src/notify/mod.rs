//! Job-completion notification pipeline.

pub mod analyzer;
pub mod context;
pub mod event;

pub use analyzer::{JobLogAnalyzer, NotificationContext};
pub use context::{JobContext, JobContextGatherer};
pub use event::{extract_job_id, CompletionEvent, WebhookPayload, JOB_BRANCH_PREFIX};

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::engine::ActiveConversation;
use crate::error::Result;
use crate::hosting::HostingApi;
use crate::llm::LlmClient;
use crate::transport::ChatTransport;
use crate::util::head_chars;

/// What the pipeline did with one completion event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationStatus {
    Delivered,
    /// Branch did not follow the job naming convention; out of scope.
    SkippedNonJobBranch,
    /// No conversation has been active yet; best-effort delivery drops it.
    SkippedNoConversation,
}

/// Orchestrates context gathering, log analysis, and outbound delivery for
/// one completion event. Every step is independently fault-tolerant; only a
/// failed final delivery surfaces as an error.
pub struct NotificationPipeline {
    gatherer: JobContextGatherer,
    analyzer: JobLogAnalyzer,
    transport: Arc<dyn ChatTransport>,
    active: ActiveConversation,
}

impl NotificationPipeline {
    pub fn new(
        llm: Arc<dyn LlmClient>,
        hosting: Arc<dyn HostingApi>,
        transport: Arc<dyn ChatTransport>,
        active: ActiveConversation,
    ) -> Self {
        Self {
            gatherer: JobContextGatherer::new(hosting.clone()),
            analyzer: JobLogAnalyzer::new(llm, hosting),
            transport,
            active,
        }
    }

    pub async fn handle(&self, event: &CompletionEvent) -> Result<NotificationStatus> {
        let Some(job_id) = extract_job_id(&event.branch_ref) else {
            debug!(branch = %event.branch_ref, "not a job branch");
            return Ok(NotificationStatus::SkippedNonJobBranch);
        };

        let Some(conversation_id) = self.active.current() else {
            warn!(job_id, "job completed but no conversation to notify");
            return Ok(NotificationStatus::SkippedNoConversation);
        };

        let context = self.gatherer.gather(&event.branch_ref, event.pr_number).await;
        let outcome = self
            .analyzer
            .analyze(&event.branch_ref, job_id, &context)
            .await;

        let message = compose_message(job_id, &outcome, &event.pr_url);
        self.transport.send(&conversation_id, &message).await?;
        info!(chat = %conversation_id, job_id, "notified about job completion");

        Ok(NotificationStatus::Delivered)
    }
}

/// Build the status message: glyph and phrase from the success flag, the
/// summary, and the PR link.
fn compose_message(job_id: &str, outcome: &NotificationContext, pr_url: &str) -> String {
    let short_id = head_chars(job_id, 8);
    let (glyph, status) = if outcome.success {
        ("✅", "done")
    } else {
        ("⚠️", "had errors")
    };
    format!(
        "{glyph} Job {short_id} {status}! {}\n\nPR: {pr_url}",
        outcome.summary
    )
}
