//! Elapsed-time math for a release cycle.

use chrono::DateTime;

/// Elapsed release-cycle time between the first candidate commit and
/// the most recent version commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseDuration {
    /// The cycle has no measurable span yet: it is unfinished, or one
    /// of its endpoints is unknown.
    Ongoing,
    /// The cycle completed `days` whole days plus `hours` remainder
    /// hours after it was cut.
    Completed { days: i64, hours: i64 },
}

impl ReleaseDuration {
    /// Formats the headline label for a release row.
    ///
    /// Ongoing cycles always read `Ongoing: -1 days`; the `-1` is part
    /// of the label, not a computed value.
    pub fn label(&self) -> String {
        match self {
            Self::Ongoing => "Ongoing: -1 days".to_string(),
            Self::Completed { days, .. } => format!("Completed in: {days} days"),
        }
    }

    pub fn is_ongoing(&self) -> bool {
        matches!(self, Self::Ongoing)
    }
}

/// Computes the span between two ISO-8601 timestamps as whole days
/// plus remainder hours.
///
/// An absent or malformed endpoint degrades to
/// [`ReleaseDuration::Ongoing`]; this function never fails.
pub fn release_duration(cut_at: Option<&str>, complete_at: Option<&str>) -> ReleaseDuration {
    let (Some(cut_at), Some(complete_at)) = (cut_at, complete_at) else {
        return ReleaseDuration::Ongoing;
    };
    let (Ok(cut), Ok(complete)) = (
        DateTime::parse_from_rfc3339(cut_at),
        DateTime::parse_from_rfc3339(complete_at),
    ) else {
        return ReleaseDuration::Ongoing;
    };

    let elapsed = complete.signed_duration_since(cut);
    let days = elapsed.num_days();
    ReleaseDuration::Completed {
        days,
        hours: elapsed.num_hours() - days * 24,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_days_with_hour_remainder() {
        let duration = release_duration(
            Some("2020-01-01T10:00:00Z"),
            Some("2020-01-11T12:30:00Z"),
        );
        assert_eq!(duration, ReleaseDuration::Completed { days: 10, hours: 2 });
        assert_eq!(duration.label(), "Completed in: 10 days");
    }

    #[test]
    fn same_instant_completes_in_zero_days() {
        let duration = release_duration(
            Some("2021-05-01T10:00:00.000Z"),
            Some("2021-05-01T10:00:00.000Z"),
        );
        assert_eq!(duration, ReleaseDuration::Completed { days: 0, hours: 0 });
        assert_eq!(duration.label(), "Completed in: 0 days");
    }

    #[test]
    fn missing_completion_is_ongoing() {
        let duration = release_duration(Some("2020-01-01T10:00:00Z"), None);
        assert!(duration.is_ongoing());
        assert_eq!(duration.label(), "Ongoing: -1 days");
    }

    #[test]
    fn missing_cut_is_ongoing() {
        assert!(release_duration(None, Some("2020-01-01T10:00:00Z")).is_ongoing());
        assert!(release_duration(None, None).is_ongoing());
    }

    #[test]
    fn malformed_timestamp_is_ongoing() {
        let duration = release_duration(Some("yesterday"), Some("2020-01-11T12:30:00Z"));
        assert!(duration.is_ongoing());
        let duration = release_duration(Some("2020-01-01T10:00:00Z"), Some(""));
        assert!(duration.is_ongoing());
    }

    #[test]
    fn fractional_seconds_and_offsets_parse() {
        let duration = release_duration(
            Some("2021-05-01T10:00:00.000Z"),
            Some("2021-05-03T11:00:00+02:00"),
        );
        assert_eq!(duration, ReleaseDuration::Completed { days: 1, hours: 23 });
    }

    #[test]
    fn inverted_order_stays_tagged_as_completed() {
        // A completion one day before the cut is a data oddity, not an
        // ongoing cycle; the tag keeps the two cases apart.
        let duration = release_duration(
            Some("2020-01-02T10:00:00Z"),
            Some("2020-01-01T10:00:00Z"),
        );
        assert_eq!(duration, ReleaseDuration::Completed { days: -1, hours: 0 });
        assert_eq!(duration.label(), "Completed in: -1 days");
        assert_ne!(duration.label(), ReleaseDuration::Ongoing.label());
    }
}
