//! Top-level UI composition.

use crate::{
    app::state::AppState,
    domain::Route,
    ui::components::{
        footer,
        header::{self, HeaderModel, ReleaseProgress},
    },
};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
};

pub mod components;
mod hints;
pub mod screens;
pub mod theme;

/// Draws the active screen.
pub fn render(frame: &mut Frame<'_>, state: &AppState) {
    let hints = hints::build(state);

    let root = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(8),
        Constraint::Length(footer::required_height(frame.area().width, &hints)),
    ])
    .split(frame.area());

    let release_progress = state.summary.as_ref().map(|summary| ReleaseProgress {
        released: summary.released_count,
        total: summary.release_count,
    });

    let context_label = match (&state.route, &state.release) {
        (Route::Release, Some(release)) => {
            format!("{} · series {}", state.repository_label, release.stat.series)
        }
        _ => state.repository_label.clone(),
    };

    header::render(
        frame,
        root[0],
        &HeaderModel {
            app_label: "⏱ cadence".to_owned(),
            context_label,
            operation: state.operation_display(),
            error: state.error_message.clone(),
            release_progress,
        },
    );

    match state.route {
        Route::Stats => screens::stats::render(frame, root[1], state),
        Route::Release => {
            if let Some(release) = state.release.as_ref() {
                screens::release::render(frame, root[1], state, release);
            } else {
                screens::stats::render(frame, root[1], state);
            }
        }
    }

    footer::render(frame, root[2], &hints);
}
