//! Release timing panel: cut date, completion date, elapsed duration.

use crate::domain::{CommitQuery, ReleaseStat};
use crate::stats::duration::{ReleaseDuration, release_duration};
use crate::ui::theme;
use chrono::DateTime;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    text::Line,
    widgets::{Block, Borders, Paragraph},
};

/// What the panel shows for one series, derived from the two commit
/// lookups. Kept as plain text so the composition step stays testable
/// without a terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseTimeView {
    /// Either commit lookup is still in flight.
    Loading,
    /// The candidate-commit lookup failed.
    Error(String),
    Ready(ReleaseTimeLines),
}

/// The three stacked text regions of the ready state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseTimeLines {
    /// `-` when the series has no versions, otherwise the completion line.
    pub completed: String,
    pub duration: ReleaseDuration,
    /// The candidate line; absent until the cut commit resolved.
    pub created: Option<String>,
}

/// Formats an ISO-8601 timestamp as `yyyy-MM-dd`, numerically and
/// independent of the host locale. Malformed input yields no date.
pub fn format_date(iso: &str) -> Option<String> {
    DateTime::parse_from_rfc3339(iso)
        .ok()
        .map(|date| date.format("%Y-%m-%d").to_string())
}

/// Joins a fixed label with an optional date, dropping the separator
/// when the date is blank.
fn labeled_date(label: &str, date: Option<String>) -> String {
    match date {
        Some(date) => format!("{label} {date}"),
        None => label.to_owned(),
    }
}

/// Maps the two commit lookups to the panel's display state.
///
/// A failed completion lookup is deliberately not an error: an
/// unreleased series legitimately has no completion commit, so the
/// row degrades to a blank date and an ongoing duration instead.
pub fn compose(stat: &ReleaseStat, cut: &CommitQuery, completion: &CommitQuery) -> ReleaseTimeView {
    if cut.is_loading() || completion.is_loading() {
        return ReleaseTimeView::Loading;
    }

    if let CommitQuery::Failed(message) = cut {
        return ReleaseTimeView::Error(format!(
            "Failed to fetch the first Release Candidate commit ({message})"
        ));
    }

    let cut_at = cut.commit().map(|info| info.created_at.as_str());
    let complete_at = completion.commit().map(|info| info.created_at.as_str());

    let completed = if stat.versions.is_empty() {
        "-".to_owned()
    } else {
        labeled_date(
            "Release completed",
            complete_at.and_then(format_date),
        )
    };

    let created = cut.commit().map(|info| {
        labeled_date(
            "Release Candidate created",
            format_date(&info.created_at),
        )
    });

    ReleaseTimeView::Ready(ReleaseTimeLines {
        completed,
        duration: release_duration(cut_at, complete_at),
        created,
    })
}

/// Renders the composed view into a bordered three-line panel.
pub fn render(frame: &mut Frame<'_>, area: Rect, view: &ReleaseTimeView) {
    let block = Block::default()
        .title(Line::styled(" Release Time ", theme::title()))
        .borders(Borders::ALL)
        .border_style(theme::border());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    match view {
        ReleaseTimeView::Loading => {
            let progress = Paragraph::new(Line::styled("⋯ fetching release commits", theme::dim()))
                .alignment(Alignment::Center);
            frame.render_widget(progress, inner);
        }
        ReleaseTimeView::Error(message) => {
            let error = Paragraph::new(Line::styled(message.clone(), theme::error()))
                .alignment(Alignment::Center);
            frame.render_widget(error, inner);
        }
        ReleaseTimeView::Ready(lines) => {
            let regions = Layout::vertical([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(inner);

            frame.render_widget(
                Paragraph::new(Line::styled(lines.completed.clone(), theme::text())),
                regions[0],
            );

            let duration_style = if lines.duration.is_ongoing() {
                theme::ongoing()
            } else {
                theme::released()
            };
            frame.render_widget(
                Paragraph::new(Line::styled(lines.duration.label(), duration_style))
                    .alignment(Alignment::Center),
                regions[1],
            );

            if let Some(created) = &lines.created {
                frame.render_widget(
                    Paragraph::new(Line::styled(created.clone(), theme::text()))
                        .alignment(Alignment::Right),
                    regions[2],
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CommitInfo, TagRef};

    fn tag(name: &str) -> TagRef {
        TagRef {
            name: name.to_owned(),
            sha: format!("sha-{name}"),
        }
    }

    fn stat(candidates: &[&str], versions: &[&str]) -> ReleaseStat {
        ReleaseStat {
            series: "1.3".to_owned(),
            candidates: candidates.iter().map(|name| tag(name)).collect(),
            versions: versions.iter().map(|name| tag(name)).collect(),
        }
    }

    fn ready(created_at: &str) -> CommitQuery {
        CommitQuery::Ready(CommitInfo {
            sha: "abc".to_owned(),
            created_at: created_at.to_owned(),
            author: "alice".to_owned(),
            message: "Cut release".to_owned(),
        })
    }

    #[test]
    fn date_formatting_is_locale_independent() {
        assert_eq!(
            format_date("2021-05-01T10:00:00.000Z").as_deref(),
            Some("2021-05-01")
        );
        assert_eq!(format_date("yesterday"), None);
        assert_eq!(format_date(""), None);
    }

    #[test]
    fn zero_versions_render_a_dash_regardless_of_candidate_data() {
        let view = compose(
            &stat(&["rc-1.3.0"], &[]),
            &ready("2021-05-01T10:00:00.000Z"),
            &CommitQuery::Empty,
        );

        let ReleaseTimeView::Ready(lines) = view else {
            panic!("expected ready view");
        };
        assert_eq!(lines.completed, "-");
        assert_eq!(lines.duration.label(), "Ongoing: -1 days");
    }

    #[test]
    fn completed_release_shows_dates_and_elapsed_days() {
        let view = compose(
            &stat(&["rc-1.3.0"], &["version-1.3.0"]),
            &ready("2021-05-01T10:00:00.000Z"),
            &ready("2021-05-11T12:00:00.000Z"),
        );

        let ReleaseTimeView::Ready(lines) = view else {
            panic!("expected ready view");
        };
        assert_eq!(lines.completed, "Release completed 2021-05-11");
        assert_eq!(lines.duration.label(), "Completed in: 10 days");
        assert_eq!(
            lines.created.as_deref(),
            Some("Release Candidate created 2021-05-01")
        );
    }

    #[test]
    fn missing_completion_timestamp_degrades_to_ongoing() {
        let view = compose(
            &stat(&["rc-1.3.0"], &["version-1.3.0"]),
            &ready("2021-05-01T10:00:00.000Z"),
            &ready(""),
        );

        let ReleaseTimeView::Ready(lines) = view else {
            panic!("expected ready view");
        };
        assert_eq!(lines.completed, "Release completed");
        assert_eq!(lines.duration.label(), "Ongoing: -1 days");
    }

    #[test]
    fn either_loading_lookup_hides_all_text_regions() {
        let loading = CommitQuery::Loading;
        let resolved = ready("2021-05-01T10:00:00.000Z");

        assert_eq!(
            compose(&stat(&["rc-1.3.0"], &[]), &loading, &CommitQuery::Empty),
            ReleaseTimeView::Loading
        );
        assert_eq!(
            compose(&stat(&["rc-1.3.0"], &["version-1.3.0"]), &resolved, &loading),
            ReleaseTimeView::Loading
        );
    }

    #[test]
    fn candidate_fetch_failure_surfaces_the_exact_error_line() {
        let view = compose(
            &stat(&["rc-1.3.0"], &[]),
            &CommitQuery::Failed("not found".to_owned()),
            &CommitQuery::Empty,
        );

        assert_eq!(
            view,
            ReleaseTimeView::Error(
                "Failed to fetch the first Release Candidate commit (not found)".to_owned()
            )
        );
    }

    #[test]
    fn completion_fetch_failure_stays_silent() {
        let view = compose(
            &stat(&["rc-1.3.0"], &["version-1.3.0"]),
            &ready("2021-05-01T10:00:00.000Z"),
            &CommitQuery::Failed("boom".to_owned()),
        );

        let ReleaseTimeView::Ready(lines) = view else {
            panic!("expected ready view");
        };
        assert_eq!(lines.completed, "Release completed");
        assert_eq!(lines.duration.label(), "Ongoing: -1 days");
    }

    #[test]
    fn unresolved_cut_commit_leaves_the_candidate_region_blank() {
        let view = compose(
            &stat(&[], &["version-1.3.0"]),
            &CommitQuery::Empty,
            &ready("2021-05-11T12:00:00.000Z"),
        );

        let ReleaseTimeView::Ready(lines) = view else {
            panic!("expected ready view");
        };
        assert_eq!(lines.created, None);
        assert_eq!(lines.completed, "Release completed 2021-05-11");
    }
}
