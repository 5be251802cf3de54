//! Repository resolution and tag listing for the stats screen.

use crate::{
    domain::{RepositoryRef, TagRef},
    github::errors::ApiFailure,
};
use serde::Deserialize;
use thiserror::Error;
use tokio::process::Command;

/// Result type for tag queries.
pub type Result<T> = std::result::Result<T, TagQueryError>;

/// Errors returned while resolving repo context and listing tags.
#[derive(Debug, Error)]
pub enum TagQueryError {
    #[error("repository owner/repo must both be provided together")]
    PartialRepositoryArgs,
    #[error("failed to resolve repository from `gh repo view` ({0})")]
    GhRepoViewUnavailable(std::io::Error),
    #[error("`gh repo view` failed with status {status}: {stderr}")]
    GhRepoViewFailed { status: i32, stderr: String },
    #[error("failed to parse `gh repo view` output: {0}")]
    GhRepoViewInvalidJson(serde_json::Error),
    #[error("GitHub API request failed: {0}")]
    Api(ApiFailure),
}

impl From<octocrab::Error> for TagQueryError {
    fn from(error: octocrab::Error) -> Self {
        Self::Api(error.into())
    }
}

#[derive(Debug, Deserialize)]
struct GhRepoViewOwner {
    login: String,
}

#[derive(Debug, Deserialize)]
struct GhRepoViewPayload {
    name: String,
    owner: GhRepoViewOwner,
}

/// Resolves repository context from explicit args, or `gh repo view` when omitted.
pub async fn resolve_repository(
    owner: Option<String>,
    repo: Option<String>,
) -> Result<RepositoryRef> {
    match (owner, repo) {
        (Some(owner), Some(repo)) => Ok(RepositoryRef { owner, repo }),
        (None, None) => resolve_repository_from_gh().await,
        _ => Err(TagQueryError::PartialRepositoryArgs),
    }
}

async fn resolve_repository_from_gh() -> Result<RepositoryRef> {
    let output = Command::new("gh")
        .arg("repo")
        .arg("view")
        .arg("--json")
        .arg("name,owner")
        .output()
        .await
        .map_err(TagQueryError::GhRepoViewUnavailable)?;

    if !output.status.success() {
        return Err(TagQueryError::GhRepoViewFailed {
            status: output.status.code().unwrap_or(-1),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
        });
    }

    let payload: GhRepoViewPayload =
        serde_json::from_slice(&output.stdout).map_err(TagQueryError::GhRepoViewInvalidJson)?;

    Ok(RepositoryRef {
        owner: payload.owner.login,
        repo: payload.name,
    })
}

/// Fetches every tag of the target repository.
pub async fn fetch_tags(
    client: &octocrab::Octocrab,
    repository: &RepositoryRef,
) -> Result<Vec<TagRef>> {
    let first_page = client
        .repos(&repository.owner, &repository.repo)
        .list_tags()
        .per_page(100)
        .send()
        .await?;

    let tags = client.all_pages(first_page).await?;

    Ok(tags
        .into_iter()
        .map(|tag| TagRef {
            name: tag.name,
            sha: tag.commit.sha,
        })
        .collect())
}
