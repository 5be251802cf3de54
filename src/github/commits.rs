//! Single-commit lookup used for release timing.

use crate::{
    domain::{CommitInfo, RepositoryRef},
    github::errors::ApiFailure,
};
use serde::Deserialize;
use thiserror::Error;

/// Result type for commit queries.
pub type Result<T> = std::result::Result<T, CommitQueryError>;

/// Errors returned while fetching a single commit.
#[derive(Debug, Error)]
pub enum CommitQueryError {
    #[error("GitHub API request failed: {0}")]
    Api(ApiFailure),
}

impl From<octocrab::Error> for CommitQueryError {
    fn from(error: octocrab::Error) -> Self {
        Self::Api(error.into())
    }
}

impl CommitQueryError {
    /// Returns true when the query failed because the commit was not found.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Api(failure) => failure.is_not_found(),
        }
    }
}

// Local payload over the raw commit endpoint: the typed octocrab model
// parses dates eagerly, and the timestamp has to stay the API's
// verbatim ISO-8601 string.
#[derive(Debug, Deserialize)]
struct CommitPayload {
    sha: String,
    commit: CommitDetail,
}

#[derive(Debug, Deserialize)]
struct CommitDetail {
    message: Option<String>,
    author: Option<CommitIdent>,
    committer: Option<CommitIdent>,
}

#[derive(Debug, Deserialize)]
struct CommitIdent {
    name: Option<String>,
    date: Option<String>,
}

/// Fetches one commit by ref and maps it to [`CommitInfo`].
///
/// The creation timestamp is the commit author date; the committer
/// date stands in when the author date is absent.
pub async fn fetch_commit(
    client: &octocrab::Octocrab,
    repository: &RepositoryRef,
    reference: &str,
) -> Result<CommitInfo> {
    let route = format!(
        "/repos/{}/{}/commits/{}",
        repository.owner, repository.repo, reference
    );
    let payload: CommitPayload = client.get(route, None::<&()>).await?;

    Ok(map_commit(payload))
}

fn map_commit(payload: CommitPayload) -> CommitInfo {
    let created_at = payload
        .commit
        .author
        .as_ref()
        .and_then(|ident| ident.date.clone())
        .or_else(|| {
            payload
                .commit
                .committer
                .as_ref()
                .and_then(|ident| ident.date.clone())
        })
        .unwrap_or_default();

    let author = payload
        .commit
        .author
        .as_ref()
        .and_then(|ident| ident.name.clone())
        .unwrap_or_else(|| "unknown".to_owned());

    let message = payload
        .commit
        .message
        .map(|message| message.lines().next().unwrap_or_default().to_owned())
        .unwrap_or_default();

    CommitInfo {
        sha: payload.sha,
        created_at,
        author,
        message,
    }
}
