//! Release detail screen: timing panel above the tag inventory.

use crate::{
    app::state::{AppState, ReleaseScreenState},
    domain::{CommitInfo, TagRef},
    ui::{
        components::{
            release_time::{self, format_date},
            shared::{short_age, short_preview},
        },
        theme,
    },
};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState, release: &ReleaseScreenState) {
    let rows = Layout::vertical([Constraint::Length(5), Constraint::Min(4)]).split(area);

    let stat = &release.stat;
    let view = release_time::compose(
        stat,
        &state.commits.query(stat.cut_sha()),
        &state.commits.query(stat.completion_sha()),
    );
    release_time::render(frame, rows[0], &view);

    let columns =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).split(rows[1]);
    render_tag_list(
        frame,
        columns[0],
        state,
        release,
        " Release Candidates ",
        &stat.candidates,
        stat.cut_sha(),
    );
    render_tag_list(
        frame,
        columns[1],
        state,
        release,
        " Versions ",
        &stat.versions,
        stat.completion_sha(),
    );
}

fn render_tag_list(
    frame: &mut Frame<'_>,
    area: Rect,
    state: &AppState,
    release: &ReleaseScreenState,
    title: &str,
    tags: &[TagRef],
    annotated_sha: Option<&str>,
) {
    let block = Block::default()
        .title(Line::from(vec![
            Span::styled(title.to_owned(), theme::title()),
            Span::styled(format!("({}) ", tags.len()), theme::dim()),
        ]))
        .borders(Borders::ALL)
        .border_style(theme::border());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if tags.is_empty() {
        frame.render_widget(
            Paragraph::new(Line::styled("none", theme::dim())),
            inner,
        );
        return;
    }

    // One lookup per column; only the measured endpoint row uses it.
    let endpoint = state.commits.query(annotated_sha);
    let annotated = annotated_sha.zip(endpoint.commit());

    let lines: Vec<Line<'_>> = tags
        .iter()
        .map(|tag| tag_line(tag, annotated, usize::from(inner.width)))
        .collect();

    let paragraph = Paragraph::new(lines).scroll((release.tag_scroll as u16, 0));
    frame.render_widget(paragraph, inner);
}

/// One tag row; the series' measured endpoint carries its fetched
/// commit details when the lookup resolved.
fn tag_line<'a>(
    tag: &'a TagRef,
    annotated: Option<(&str, &CommitInfo)>,
    width: usize,
) -> Line<'a> {
    let mut spans = vec![
        Span::styled(tag.name.clone(), theme::text()),
        Span::raw(" "),
        Span::styled(short_sha(&tag.sha), theme::dim()),
    ];

    if let Some((sha, info)) = annotated
        && sha == tag.sha
    {
        if let Some(date) = format_date(&info.created_at) {
            spans.push(Span::styled(
                format!("  {date} ({})", short_age(&info.created_at)),
                theme::accent(),
            ));
        }
        let used = spans.iter().map(|span| span.content.chars().count()).sum::<usize>();
        let remaining = width.saturating_sub(used + 4);
        if remaining > 8 {
            spans.push(Span::styled(
                format!("  {}", short_preview(&info.message, remaining)),
                theme::dim(),
            ));
        }
    }

    Line::from(spans)
}

fn short_sha(sha: &str) -> String {
    sha.chars().take(7).collect()
}
