//! Background worker messages and async data-loading tasks.

use crate::domain::{CommitInfo, RepositoryRef, TagPrefixes};
use crate::github::commits::fetch_commit;
use crate::github::tags::{fetch_tags, resolve_repository};
use crate::stats::aggregate::{Aggregation, aggregate_tags};
use tokio::sync::mpsc::UnboundedSender;

/// Message sent from background workers to the UI event loop.
#[derive(Debug)]
pub enum WorkerMessage {
    StatsLoaded {
        repository_label: String,
        result: Result<StatsPayload, String>,
    },
    CommitLoaded {
        sha: String,
        result: Result<CommitInfo, String>,
    },
}

/// Successful stats load: the resolved repository plus its aggregation.
#[derive(Debug)]
pub struct StatsPayload {
    pub repository: RepositoryRef,
    pub aggregation: Aggregation,
}

/// Spawns async loading of the repository's release statistics.
pub fn spawn_load_release_stats(
    tx: UnboundedSender<WorkerMessage>,
    client: octocrab::Octocrab,
    owner: Option<String>,
    repo: Option<String>,
    prefixes: TagPrefixes,
) {
    tokio::spawn(async move {
        let message = match resolve_repository(owner, repo).await {
            Ok(repository) => {
                let label = repository.label();
                match fetch_tags(&client, &repository).await {
                    Ok(tags) => WorkerMessage::StatsLoaded {
                        repository_label: label,
                        result: Ok(StatsPayload {
                            aggregation: aggregate_tags(&tags, &prefixes),
                            repository,
                        }),
                    },
                    Err(error) => WorkerMessage::StatsLoaded {
                        repository_label: label,
                        result: Err(error.to_string()),
                    },
                }
            }
            Err(error) => WorkerMessage::StatsLoaded {
                repository_label: "(unknown repository)".to_owned(),
                result: Err(error.to_string()),
            },
        };

        let _ = tx.send(message);
    });
}

/// Spawns one commit lookup for a release endpoint.
///
/// A 404 is reported as the plain message `not found`, which the row
/// renderer folds into its candidate-fetch error line.
pub fn spawn_load_commit(
    tx: UnboundedSender<WorkerMessage>,
    client: octocrab::Octocrab,
    repository: RepositoryRef,
    sha: String,
) {
    tokio::spawn(async move {
        let result = match fetch_commit(&client, &repository, &sha).await {
            Ok(info) => Ok(info),
            Err(error) if error.is_not_found() => Err("not found".to_owned()),
            Err(error) => Err(error.to_string()),
        };

        let _ = tx.send(WorkerMessage::CommitLoaded { sha, result });
    });
}
