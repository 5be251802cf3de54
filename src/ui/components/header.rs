//! Header component shared by the stats and release screens.

use crate::ui::theme;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
};

/// Header payload consumed by the renderer.
#[derive(Debug, Clone)]
pub struct HeaderModel {
    pub app_label: String,
    pub context_label: String,
    pub operation: Option<String>,
    pub error: Option<String>,
    pub release_progress: Option<ReleaseProgress>,
}

/// Released-series progress for the loaded repository.
#[derive(Debug, Clone, Copy)]
pub struct ReleaseProgress {
    pub released: usize,
    pub total: usize,
}

/// Renders the screen header with title, operation/error state, and release progress.
pub fn render(frame: &mut Frame<'_>, area: Rect, model: &HeaderModel) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::border());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut top_left_spans = vec![
        Span::styled(format!(" {}", model.app_label), theme::title()),
        Span::styled(format!(" {}", model.context_label), theme::dim()),
    ];
    if let Some(error) = &model.error {
        top_left_spans.push(Span::styled(format!("  error: {error}"), theme::error()));
    } else if let Some(operation) = &model.operation {
        top_left_spans.push(Span::styled(format!("  {operation}"), theme::info()));
    }
    let top_left = Line::from(top_left_spans);

    if let Some(progress) = model.release_progress {
        let right_width = inner.width.min(40);
        let columns =
            Layout::horizontal([Constraint::Min(1), Constraint::Length(right_width)]).split(inner);
        let right_sections = Layout::horizontal([
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(18),
        ])
        .split(columns[1]);

        frame.render_widget(Paragraph::new(top_left), columns[0]);
        frame.render_widget(
            Paragraph::new(Line::from(release_ratio_text(progress))).alignment(Alignment::Right),
            right_sections[0],
        );
        frame.render_widget(Paragraph::new(" "), right_sections[1]);
        frame.render_widget(progress_gauge(progress), right_sections[2]);
    } else {
        frame.render_widget(Paragraph::new(top_left), inner);
    }
}

fn release_ratio_text(progress: ReleaseProgress) -> String {
    format!("Released {}/{}", progress.released, progress.total)
}

fn progress_gauge(progress: ReleaseProgress) -> Gauge<'static> {
    let ratio = if progress.total == 0 {
        0.0
    } else {
        progress.released as f64 / progress.total as f64
    };
    let percent = (ratio * 100.0).round() as usize;

    Gauge::default()
        .ratio(ratio.clamp(0.0, 1.0))
        .label(Span::styled(format!("{percent}%"), theme::gauge_label()))
        .gauge_style(theme::gauge_fill())
        .style(theme::gauge_empty())
}
