//! Version-control hosting API (read-only).

pub mod github;

use async_trait::async_trait;

use crate::error::LiaisonError;

/// One entry in a repository directory listing.
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
pub struct DirEntry {
    pub name: String,
    pub path: String,
}

/// One commit on a pull request.
#[derive(Debug, Clone, PartialEq)]
pub struct CommitInfo {
    pub message: String,
}

/// Read-only view of the hosting provider used for job correlation.
#[async_trait]
pub trait HostingApi: Send + Sync {
    /// Decoded content of a file at `path` on `git_ref`.
    async fn get_file_content(&self, path: &str, git_ref: &str) -> Result<String, LiaisonError>;

    /// Entries of the directory at `path` on `git_ref`.
    async fn list_directory(
        &self,
        path: &str,
        git_ref: &str,
    ) -> Result<Vec<DirEntry>, LiaisonError>;

    /// Commits on a pull request, oldest first.
    async fn get_pull_request_commits(
        &self,
        number: u64,
    ) -> Result<Vec<CommitInfo>, LiaisonError>;
}
