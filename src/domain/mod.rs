//! Domain models shared across GitHub, stats, and UI layers.

use std::fmt;

/// A git tag paired with the commit it points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRef {
    pub name: String,
    pub sha: String,
}

/// One release series: every candidate and version tag cut for it.
///
/// Both tag lists are ordered most-recent-first, so the series' very
/// first candidate sits at the end of `candidates` and the shipped
/// version (when one exists) sits at the front of `versions`.
#[derive(Debug, Clone)]
pub struct ReleaseStat {
    pub series: String,
    pub candidates: Vec<TagRef>,
    pub versions: Vec<TagRef>,
}

impl ReleaseStat {
    /// Returns the commit that opened the release cycle, if any
    /// candidate exists.
    pub fn cut_sha(&self) -> Option<&str> {
        self.candidates.last().map(|tag| tag.sha.as_str())
    }

    /// Returns the commit of the most recent shipped version, if the
    /// series has been released.
    pub fn completion_sha(&self) -> Option<&str> {
        self.versions.first().map(|tag| tag.sha.as_str())
    }

    pub fn is_released(&self) -> bool {
        !self.versions.is_empty()
    }

    /// Returns the newest tag of the series regardless of kind.
    pub fn latest_tag(&self) -> Option<&TagRef> {
        self.versions.first().or_else(|| self.candidates.first())
    }

    /// Returns a searchable composite string used by fuzzy matching.
    pub fn search_text(&self) -> String {
        let latest = self
            .latest_tag()
            .map(|tag| tag.name.as_str())
            .unwrap_or("");
        let status = if self.is_released() {
            "released"
        } else {
            "ongoing"
        };
        format!("{} {} {}", self.series, latest, status)
    }
}

/// Commit metadata fetched from GitHub for duration calculations.
///
/// `created_at` keeps the API's ISO-8601 timestamp verbatim; parsing
/// happens at the point of use so a malformed date degrades a single
/// field rather than the whole fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitInfo {
    pub sha: String,
    pub created_at: String,
    pub author: String,
    pub message: String,
}

/// The lifecycle of a single commit lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitQuery {
    /// No lookup was requested (e.g. the series has no such tag).
    Empty,
    /// A lookup is in flight.
    Loading,
    /// The lookup succeeded.
    Ready(CommitInfo),
    /// The lookup failed with a short human-readable reason.
    Failed(String),
}

impl CommitQuery {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn commit(&self) -> Option<&CommitInfo> {
        match self {
            Self::Ready(info) => Some(info),
            _ => None,
        }
    }
}

/// The repository the current session is pointed at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryRef {
    pub owner: String,
    pub repo: String,
}

impl RepositoryRef {
    pub fn label(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

/// Tag name prefixes that mark candidate and version tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagPrefixes {
    pub candidate: String,
    pub version: String,
}

impl Default for TagPrefixes {
    fn default() -> Self {
        Self {
            candidate: "rc".to_string(),
            version: "version".to_string(),
        }
    }
}

/// The current application route.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Route {
    Stats,
    Release,
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stats => write!(f, "stats"),
            Self::Release => write!(f, "release"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(name: &str, sha: &str) -> TagRef {
        TagRef {
            name: name.to_string(),
            sha: sha.to_string(),
        }
    }

    #[test]
    fn cut_sha_is_the_oldest_candidate() {
        let stat = ReleaseStat {
            series: "1.3".to_string(),
            candidates: vec![
                tag("rc-1.3.2", "c2"),
                tag("rc-1.3.1", "c1"),
                tag("rc-1.3.0", "c0"),
            ],
            versions: vec![],
        };
        assert_eq!(stat.cut_sha(), Some("c0"));
        assert_eq!(stat.completion_sha(), None);
        assert!(!stat.is_released());
    }

    #[test]
    fn completion_sha_is_the_newest_version() {
        let stat = ReleaseStat {
            series: "1.3".to_string(),
            candidates: vec![tag("rc-1.3.0", "c0")],
            versions: vec![tag("version-1.3.1", "v1"), tag("version-1.3.0", "v0")],
        };
        assert_eq!(stat.completion_sha(), Some("v1"));
        assert!(stat.is_released());
        assert_eq!(stat.latest_tag().unwrap().name, "version-1.3.1");
    }

    #[test]
    fn search_text_carries_series_latest_tag_and_status() {
        let stat = ReleaseStat {
            series: "1.4".to_string(),
            candidates: vec![tag("rc-1.4.0", "c0")],
            versions: vec![],
        };
        assert_eq!(stat.search_text(), "1.4 rc-1.4.0 ongoing");
    }
}
