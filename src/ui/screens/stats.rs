//! Release series list with fuzzy filtering.

use crate::{
    app::state::AppState,
    ui::{components::search_box, theme},
};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{
        Block, Borders, Cell, HighlightSpacing, Paragraph, Row, Scrollbar, ScrollbarOrientation,
        ScrollbarState, Table, TableState,
    },
};

const STATUS_COL_WIDTH: u16 = 8;
const COUNT_COL_WIDTH: u16 = 10;
const COLUMN_SPACING: u16 = 1;

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let rows = Layout::vertical([Constraint::Length(3), Constraint::Min(6)]).split(area);

    search_box::render(
        frame,
        rows[0],
        search_box::SearchBoxProps {
            title: " Series Filter ",
            query: state.filter_query(),
            focused: state.is_filter_focused(),
            unfocused_placeholder: "filter...",
            focus_key_hint: "[s]",
        },
    );
    render_results(frame, rows[1], state);
}

fn results_title(state: &AppState) -> Line<'static> {
    let mut spans = vec![
        Span::styled(" Release Series ", theme::title()),
        Span::styled(format!("({})", state.filter_results.len()), theme::dim()),
    ];

    if let Some(summary) = &state.summary {
        spans.push(Span::styled(
            format!(
                " {} candidates, {} versions",
                summary.candidate_count, summary.version_count
            ),
            theme::dim(),
        ));
        if summary.skipped_tags > 0 {
            spans.push(Span::styled(
                format!(", {} tags skipped", summary.skipped_tags),
                theme::dim(),
            ));
        }
        spans.push(Span::raw(" "));
    }

    Line::from(spans)
}

fn render_results(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let block = Block::default()
        .title(results_title(state))
        .borders(Borders::ALL)
        .border_style(theme::border());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let (list_area, scrollbar_area) = if inner.width > 1 {
        let columns = Layout::horizontal([Constraint::Min(1), Constraint::Length(1)]).split(inner);
        (columns[0], Some(columns[1]))
    } else {
        (inner, None)
    };

    if state.filter_results.is_empty() {
        let message = if state.releases.is_empty() {
            "No release series found. Check the tag prefixes in your config."
        } else {
            "No release series match this filter."
        };
        frame.render_widget(Paragraph::new(Line::styled(message, theme::dim())), list_area);
        return;
    }

    let series_col_width = state
        .filter_results
        .iter()
        .filter_map(|index| state.releases.get(*index))
        .map(|stat| stat.series.len() as u16)
        .max()
        .unwrap_or(4)
        .max(4);

    let widths = [
        Constraint::Length(series_col_width),
        Constraint::Length(STATUS_COL_WIDTH),
        Constraint::Length(COUNT_COL_WIDTH),
        Constraint::Length(COUNT_COL_WIDTH),
        Constraint::Fill(1),
    ];

    let rows: Vec<Row<'_>> = state
        .filter_results
        .iter()
        .filter_map(|index| state.releases.get(*index))
        .map(|stat| {
            let (status_text, status_style) = if stat.is_released() {
                ("released", theme::released())
            } else {
                ("ongoing", theme::ongoing())
            };
            let latest = stat
                .latest_tag()
                .map(|tag| tag.name.clone())
                .unwrap_or_default();

            Row::new([
                Cell::new(
                    Line::styled(stat.series.clone(), theme::title()).alignment(Alignment::Right),
                ),
                Cell::new(Span::styled(status_text, status_style)),
                Cell::new(Span::styled(
                    format!("{} rc", stat.candidates.len()),
                    theme::text(),
                )),
                Cell::new(Span::styled(
                    format!("{} ver", stat.versions.len()),
                    theme::text(),
                )),
                Cell::new(Span::styled(latest, theme::dim())),
            ])
        })
        .collect();

    let table = Table::new(rows, widths)
        .column_spacing(COLUMN_SPACING)
        .row_highlight_style(theme::selected())
        .highlight_symbol("▸ ")
        .highlight_spacing(HighlightSpacing::Always);

    let mut table_state = TableState::default();
    table_state.select(Some(state.filter_selected));

    frame.render_stateful_widget(table, list_area, &mut table_state);

    let viewport_height = usize::from(list_area.height);
    let content_height = state.filter_results.len();

    if content_height > viewport_height
        && let Some(scrollbar_area) = scrollbar_area
    {
        let max_scroll = content_height.saturating_sub(viewport_height);
        let scroll = table_state.offset().min(max_scroll);
        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .begin_symbol(None)
            .end_symbol(None)
            .track_style(theme::dim())
            .thumb_style(theme::title());
        let scroll_positions = max_scroll.saturating_add(1);
        let mut scrollbar_state = ScrollbarState::new(scroll_positions)
            .viewport_content_length(viewport_height)
            .position(scroll);
        frame.render_stateful_widget(scrollbar, scrollbar_area, &mut scrollbar_state);
    }
}
