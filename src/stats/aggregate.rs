//! Groups raw repository tags into per-series release statistics.

use crate::domain::{ReleaseStat, TagPrefixes, TagRef};
use std::collections::BTreeMap;

/// Every recognized release series plus counting totals.
#[derive(Debug, Clone)]
pub struct Aggregation {
    /// Series ordered most-recent-first.
    pub releases: Vec<ReleaseStat>,
    pub summary: StatsSummary,
}

/// Counting totals shown in the stats header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSummary {
    pub release_count: usize,
    pub candidate_count: usize,
    pub version_count: usize,
    pub released_count: usize,
    pub skipped_tags: usize,
}

/// A parsed series key.
///
/// Calendar keys sort above semantic keys, so repositories that moved
/// between schemes still order deterministically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum SeriesKey {
    Semver { major: u64, minor: u64 },
    Calver { year: u16, month: u8, day: u8 },
}

impl SeriesKey {
    fn display(&self) -> String {
        match self {
            Self::Semver { major, minor } => format!("{major}.{minor}"),
            Self::Calver { year, month, day } => format!("{year:04}.{month:02}.{day:02}"),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum TagKind {
    Candidate,
    Version,
}

#[derive(Default)]
struct SeriesBucket {
    candidates: Vec<(u64, TagRef)>,
    versions: Vec<(u64, TagRef)>,
}

/// Buckets tags into release series keyed by their parsed version.
///
/// Tags that match neither prefix, or whose version is not semantic
/// `x.y.z` or calendar `yyyy.mm.dd_n`, are skipped and counted. Within
/// a series both tag lists come out most-recent-first (rank
/// descending), and the series themselves are ordered newest-first.
pub fn aggregate_tags(tags: &[TagRef], prefixes: &TagPrefixes) -> Aggregation {
    let mut series: BTreeMap<SeriesKey, SeriesBucket> = BTreeMap::new();
    let mut skipped_tags = 0usize;

    for tag in tags {
        let Some((kind, key, rank)) = parse_tag(tag, prefixes) else {
            skipped_tags += 1;
            continue;
        };
        let bucket = series.entry(key).or_default();
        match kind {
            TagKind::Candidate => bucket.candidates.push((rank, tag.clone())),
            TagKind::Version => bucket.versions.push((rank, tag.clone())),
        }
    }

    let mut releases = Vec::with_capacity(series.len());
    for (key, mut bucket) in series.into_iter().rev() {
        bucket.candidates.sort_by(|a, b| b.0.cmp(&a.0));
        bucket.versions.sort_by(|a, b| b.0.cmp(&a.0));
        releases.push(ReleaseStat {
            series: key.display(),
            candidates: bucket.candidates.into_iter().map(|(_, tag)| tag).collect(),
            versions: bucket.versions.into_iter().map(|(_, tag)| tag).collect(),
        });
    }

    let summary = StatsSummary {
        release_count: releases.len(),
        candidate_count: releases.iter().map(|stat| stat.candidates.len()).sum(),
        version_count: releases.iter().map(|stat| stat.versions.len()).sum(),
        released_count: releases.iter().filter(|stat| stat.is_released()).count(),
        skipped_tags,
    };

    Aggregation { releases, summary }
}

fn parse_tag(tag: &TagRef, prefixes: &TagPrefixes) -> Option<(TagKind, SeriesKey, u64)> {
    if let Some(version) = split_prefix(&tag.name, &prefixes.candidate) {
        let (key, rank) = parse_version(version)?;
        return Some((TagKind::Candidate, key, rank));
    }
    if let Some(version) = split_prefix(&tag.name, &prefixes.version) {
        let (key, rank) = parse_version(version)?;
        return Some((TagKind::Version, key, rank));
    }
    None
}

/// Strips `<prefix>-` from a tag name.
fn split_prefix<'a>(name: &'a str, prefix: &str) -> Option<&'a str> {
    name.strip_prefix(prefix)?.strip_prefix('-')
}

/// Parses `x.y.z` (series `x.y`, rank `z`) or `yyyy.mm.dd_n` (series
/// `yyyy.mm.dd`, rank `n`).
fn parse_version(text: &str) -> Option<(SeriesKey, u64)> {
    if let Some((date, rank)) = text.split_once('_') {
        let mut parts = date.splitn(3, '.');
        let year = parts.next()?;
        let month = parts.next()?;
        let day = parts.next()?;
        if year.len() != 4 || month.len() != 2 || day.len() != 2 {
            return None;
        }
        let key = SeriesKey::Calver {
            year: year.parse().ok()?,
            month: month.parse().ok()?,
            day: day.parse().ok()?,
        };
        return Some((key, rank.parse().ok()?));
    }

    let mut parts = text.splitn(3, '.');
    let major = parts.next()?.parse().ok()?;
    let minor = parts.next()?.parse().ok()?;
    let patch = parts.next()?.parse().ok()?;
    Some((SeriesKey::Semver { major, minor }, patch))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(name: &str) -> TagRef {
        TagRef {
            name: name.to_string(),
            sha: format!("sha-{name}"),
        }
    }

    fn aggregate(names: &[&str]) -> Aggregation {
        let tags: Vec<TagRef> = names.iter().map(|name| tag(name)).collect();
        aggregate_tags(&tags, &TagPrefixes::default())
    }

    #[test]
    fn groups_semver_tags_by_minor_series() {
        let aggregation = aggregate(&[
            "rc-1.3.0",
            "version-1.3.1",
            "rc-1.3.1",
            "rc-1.4.0",
            "v2.0",
        ]);

        assert_eq!(aggregation.summary.release_count, 2);
        assert_eq!(aggregation.summary.skipped_tags, 1);

        let newest = &aggregation.releases[0];
        assert_eq!(newest.series, "1.4");
        assert!(!newest.is_released());

        let older = &aggregation.releases[1];
        assert_eq!(older.series, "1.3");
        assert_eq!(
            older
                .candidates
                .iter()
                .map(|tag| tag.name.as_str())
                .collect::<Vec<_>>(),
            vec!["rc-1.3.1", "rc-1.3.0"],
        );
        assert_eq!(older.cut_sha(), Some("sha-rc-1.3.0"));
        assert_eq!(older.completion_sha(), Some("sha-version-1.3.1"));
    }

    #[test]
    fn groups_calver_tags_by_date_series() {
        let aggregation = aggregate(&[
            "rc-2021.01.15_0",
            "rc-2021.01.15_1",
            "version-2021.01.15_1",
            "rc-2020.12.01_0",
        ]);

        assert_eq!(aggregation.summary.release_count, 2);
        assert_eq!(aggregation.releases[0].series, "2021.01.15");
        assert_eq!(aggregation.releases[1].series, "2020.12.01");
        assert_eq!(
            aggregation.releases[0].completion_sha(),
            Some("sha-version-2021.01.15_1"),
        );
        assert_eq!(aggregation.releases[0].cut_sha(), Some("sha-rc-2021.01.15_0"));
    }

    #[test]
    fn malformed_versions_are_skipped_and_counted() {
        let aggregation = aggregate(&[
            "rc-1.3",
            "rc-1.3.x",
            "version-2021.1.15_0",
            "release-1.3.0",
            "rc-1.3.0",
        ]);

        assert_eq!(aggregation.summary.release_count, 1);
        assert_eq!(aggregation.summary.skipped_tags, 4);
    }

    #[test]
    fn summary_counts_candidates_versions_and_released_series() {
        let aggregation = aggregate(&[
            "rc-1.3.0",
            "rc-1.3.1",
            "version-1.3.1",
            "rc-1.4.0",
            "junk",
        ]);

        let summary = aggregation.summary;
        assert_eq!(summary.release_count, 2);
        assert_eq!(summary.candidate_count, 3);
        assert_eq!(summary.version_count, 1);
        assert_eq!(summary.released_count, 1);
        assert_eq!(summary.skipped_tags, 1);
    }

    #[test]
    fn calendar_series_order_above_semantic_series() {
        let aggregation = aggregate(&["rc-1.9.0", "rc-2020.01.01_0"]);
        assert_eq!(aggregation.releases[0].series, "2020.01.01");
        assert_eq!(aggregation.releases[1].series, "1.9");
    }

    #[test]
    fn custom_prefixes_are_honored() {
        let prefixes = TagPrefixes {
            candidate: "candidate".to_string(),
            version: "release".to_string(),
        };
        let tags = vec![tag("candidate-0.8.0"), tag("release-0.8.0"), tag("rc-0.8.1")];
        let aggregation = aggregate_tags(&tags, &prefixes);

        assert_eq!(aggregation.summary.release_count, 1);
        assert_eq!(aggregation.summary.skipped_tags, 1);
        assert!(aggregation.releases[0].is_released());
    }
}
