//! Gathers job metadata from the hosting API.

use std::sync::Arc;

use tracing::warn;

use crate::hosting::HostingApi;

/// Path of the task-description file on a job branch.
pub const TASK_DESCRIPTION_PATH: &str = "workspace/job.md";

/// Context fetched for one job; each field degrades independently to `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobContext {
    pub task_description: Option<String>,
    pub commit_message: Option<String>,
}

pub struct JobContextGatherer {
    hosting: Arc<dyn HostingApi>,
}

impl JobContextGatherer {
    pub fn new(hosting: Arc<dyn HostingApi>) -> Self {
        Self { hosting }
    }

    /// Fetch the final commit message and the task description concurrently.
    /// Either fetch failing is logged and degrades that field, never the
    /// whole gather.
    pub async fn gather(&self, branch_ref: &str, pr_number: u64) -> JobContext {
        let (commit_message, task_description) = tokio::join!(
            self.final_commit_message(pr_number),
            self.task_description(branch_ref),
        );
        JobContext {
            task_description,
            commit_message,
        }
    }

    async fn final_commit_message(&self, pr_number: u64) -> Option<String> {
        match self.hosting.get_pull_request_commits(pr_number).await {
            Ok(commits) => commits.into_iter().last().map(|c| c.message),
            Err(e) => {
                warn!(pr_number, error = %e, "Failed to fetch commit message");
                None
            }
        }
    }

    async fn task_description(&self, branch_ref: &str) -> Option<String> {
        match self
            .hosting
            .get_file_content(TASK_DESCRIPTION_PATH, branch_ref)
            .await
        {
            Ok(content) => Some(content),
            Err(e) => {
                warn!(branch = branch_ref, error = %e, "Failed to fetch task description");
                None
            }
        }
    }
}
