//! Fuzzy matching helpers for release series filtering.

use crate::domain::ReleaseStat;
use fuzzy_matcher::{FuzzyMatcher, skim::SkimMatcherV2};

/// A ranked fuzzy filter result.
#[derive(Debug, Clone, Copy)]
pub struct FuzzyResult {
    pub index: usize,
    pub score: i64,
}

/// Ranks release series using `fuzzy-matcher` (Skim algorithm).
///
/// An empty query passes every series through in its original order,
/// which the aggregator already keeps most-recent-first.
pub fn rank_releases(query: &str, releases: &[ReleaseStat]) -> Vec<FuzzyResult> {
    let trimmed = query.trim();

    if trimmed.is_empty() {
        return releases
            .iter()
            .enumerate()
            .map(|(index, _)| FuzzyResult { index, score: 0 })
            .collect();
    }

    let matcher = SkimMatcherV2::default().smart_case();

    let mut results: Vec<FuzzyResult> = releases
        .iter()
        .enumerate()
        .filter_map(|(index, stat)| {
            matcher
                .fuzzy_match(&stat.search_text(), trimmed)
                .map(|score| FuzzyResult { index, score })
        })
        .collect();

    results.sort_by_key(|result| std::cmp::Reverse(result.score));
    results
}

#[cfg(test)]
mod tests {
    use super::rank_releases;
    use crate::domain::{ReleaseStat, TagRef};

    fn stat(series: &str, latest: &str) -> ReleaseStat {
        ReleaseStat {
            series: series.to_owned(),
            candidates: vec![TagRef {
                name: latest.to_owned(),
                sha: format!("sha-{latest}"),
            }],
            versions: Vec::new(),
        }
    }

    #[test]
    fn empty_query_keeps_every_series_in_order() {
        let releases = vec![stat("1.4", "rc-1.4.0"), stat("1.3", "rc-1.3.2")];
        let ranked = rank_releases("", &releases);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].index, 0);
        assert_eq!(ranked[1].index, 1);
    }

    #[test]
    fn query_filters_by_series_and_tag_text() {
        let releases = vec![stat("1.4", "rc-1.4.0"), stat("2021.01.15", "rc-2021.01.15_0")];
        let ranked = rank_releases("2021", &releases);

        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].index, 1);
    }
}
