//! GitHub REST API client.

use async_trait::async_trait;
use base64::Engine as _;
use serde::Deserialize;
use tracing::debug;

use crate::error::LiaisonError;
use crate::llm::http::{bearer_headers, shared_client, status_to_error};

use super::{CommitInfo, DirEntry, HostingApi};

const DEFAULT_BASE_URL: &str = "https://api.github.com";
const USER_AGENT: &str = "liaison";

pub struct GithubApi {
    owner: String,
    repo: String,
    token: String,
    base_url: String,
}

impl GithubApi {
    pub fn new(
        owner: impl Into<String>,
        repo: impl Into<String>,
        token: String,
        base_url: Option<String>,
    ) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            token,
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path_and_query: &str,
    ) -> Result<T, LiaisonError> {
        let url = format!("{}{}", self.base_url, path_and_query);
        debug!(%url, "GitHub API request");

        let resp = shared_client()
            .get(&url)
            .headers(bearer_headers(&self.token, USER_AGENT))
            .send()
            .await?;

        let status = resp.status().as_u16();
        if status != 200 {
            let body = resp.text().await.unwrap_or_default();
            return Err(status_to_error(status, &body));
        }

        Ok(resp.json().await?)
    }
}

#[async_trait]
impl HostingApi for GithubApi {
    async fn get_file_content(&self, path: &str, git_ref: &str) -> Result<String, LiaisonError> {
        let file: ContentFile = self
            .get_json(&format!(
                "/repos/{}/{}/contents/{}?ref={}",
                self.owner, self.repo, path, git_ref
            ))
            .await?;
        file.decode()
    }

    async fn list_directory(
        &self,
        path: &str,
        git_ref: &str,
    ) -> Result<Vec<DirEntry>, LiaisonError> {
        self.get_json(&format!(
            "/repos/{}/{}/contents/{}?ref={}",
            self.owner, self.repo, path, git_ref
        ))
        .await
    }

    async fn get_pull_request_commits(
        &self,
        number: u64,
    ) -> Result<Vec<CommitInfo>, LiaisonError> {
        let commits: Vec<PullCommit> = self
            .get_json(&format!(
                "/repos/{}/{}/pulls/{}/commits",
                self.owner, self.repo, number
            ))
            .await?;
        Ok(commits
            .into_iter()
            .map(|c| CommitInfo {
                message: c.commit.message,
            })
            .collect())
    }
}

// Internal GitHub response types

#[derive(Deserialize)]
struct ContentFile {
    content: String,
}

impl ContentFile {
    /// The contents API returns base64 with embedded newlines.
    fn decode(&self) -> Result<String, LiaisonError> {
        let compact: String = self
            .content
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(compact)
            .map_err(|e| LiaisonError::InvalidState(format!("invalid base64 content: {e}")))?;
        String::from_utf8(bytes)
            .map_err(|e| LiaisonError::InvalidState(format!("non-utf8 file content: {e}")))
    }
}

#[derive(Deserialize)]
struct PullCommit {
    commit: CommitDetail,
}

#[derive(Deserialize)]
struct CommitDetail {
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_base64_with_newlines() {
        // "hello world" encoded with a line break in the middle
        let file = ContentFile {
            content: "aGVsbG8g\nd29ybGQ=\n".to_string(),
        };
        assert_eq!(file.decode().unwrap(), "hello world");
    }

    #[test]
    fn rejects_invalid_base64() {
        let file = ContentFile {
            content: "!!not-base64!!".to_string(),
        };
        assert!(file.decode().is_err());
    }
}
