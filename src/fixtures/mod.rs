//! Deterministic fixture data for demo mode and harness rendering.

use crate::domain::{CommitInfo, TagPrefixes, TagRef};
use crate::stats::aggregate::{Aggregation, aggregate_tags};

/// Repository label shown in the demo header.
pub const DEMO_REPOSITORY_LABEL: &str = "cadence-tui/demo-service";

/// Returns the fixture tag inventory.
pub fn demo_tags() -> Vec<TagRef> {
    [
        "rc-1.3.0",
        "rc-1.3.1",
        "version-1.3.0",
        "version-1.3.1",
        "rc-1.4.0",
        "rc-1.4.1",
        "rc-2026.08.01_0",
        "version-2026.08.01_0",
        "deploy-marker",
    ]
    .into_iter()
    .map(|name| TagRef {
        name: name.to_owned(),
        sha: format!("sha-{name}"),
    })
    .collect()
}

/// Returns the fixture tags aggregated with the default prefixes.
pub fn demo_aggregation() -> Aggregation {
    aggregate_tags(&demo_tags(), &TagPrefixes::default())
}

/// Resolves a fixture commit the way the live commit worker would.
///
/// Only release-cycle endpoints have commits on file; anything else
/// reports `not found`, matching the live 404 mapping.
pub fn demo_commit(sha: &str) -> Result<CommitInfo, String> {
    let (created_at, author, message) = match sha {
        "sha-rc-1.3.0" => (
            "2026-07-01T09:12:00Z",
            "maria",
            "Cut 1.3 release candidate",
        ),
        "sha-version-1.3.1" => (
            "2026-07-15T16:40:00Z",
            "release-bot",
            "Ship 1.3.1",
        ),
        "sha-rc-1.4.0" => (
            "2026-08-10T08:00:00Z",
            "jonas",
            "Cut 1.4 release candidate",
        ),
        "sha-rc-2026.08.01_0" => (
            "2026-07-28T11:30:00Z",
            "maria",
            "Cut August release candidate",
        ),
        "sha-version-2026.08.01_0" => (
            "2026-08-01T10:05:00Z",
            "release-bot",
            "Ship 2026.08.01",
        ),
        _ => return Err("not found".to_owned()),
    };

    Ok(CommitInfo {
        sha: sha.to_owned(),
        created_at: created_at.to_owned(),
        author: author.to_owned(),
        message: message.to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_aggregation_has_released_and_ongoing_series() {
        let aggregation = demo_aggregation();
        assert_eq!(aggregation.summary.release_count, 3);
        assert_eq!(aggregation.summary.released_count, 2);
        assert_eq!(aggregation.summary.skipped_tags, 1);
    }

    #[test]
    fn every_cycle_endpoint_has_a_commit_on_file() {
        let aggregation = demo_aggregation();
        for stat in aggregation
            .releases
            .iter()
            .filter(|stat| stat.is_released())
        {
            assert!(demo_commit(stat.cut_sha().unwrap()).is_ok(), "{}", stat.series);
            assert!(
                demo_commit(stat.completion_sha().unwrap()).is_ok(),
                "{}",
                stat.series
            );
        }
    }
}
