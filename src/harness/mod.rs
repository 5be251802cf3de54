//! Visual harness for deterministic rendering snapshots.

use crate::app::state::AppState;
use crate::fixtures;
use crate::ui;
use anyhow::Context;
use ratatui::Terminal;
use ratatui::backend::TestBackend;

/// Renders demo stats and release screens into plain text.
pub fn render_demo_dump(width: u16, height: u16) -> anyhow::Result<String> {
    let stats = render_demo_stats(width, height)?;
    let release = render_demo_release(width, height)?;

    Ok(format!(
        "=== STATS SCREEN ===\n{stats}\n\n=== RELEASE SCREEN ===\n{release}\n"
    ))
}

fn demo_state() -> AppState {
    let aggregation = fixtures::demo_aggregation();
    let mut state = AppState::default();
    state.set_repository_label(fixtures::DEMO_REPOSITORY_LABEL.to_owned());
    state.set_releases(aggregation.releases, aggregation.summary);
    state
}

fn render_demo_stats(width: u16, height: u16) -> anyhow::Result<String> {
    let state = demo_state();
    render_state_to_string(&state, width, height)
}

fn render_demo_release(width: u16, height: u16) -> anyhow::Result<String> {
    let mut state = demo_state();
    let stat = state
        .release_by_series("1.3")
        .cloned()
        .context("missing demo release series")?;

    for sha in [stat.cut_sha(), stat.completion_sha()].into_iter().flatten() {
        state.commits.begin(sha);
        let result = fixtures::demo_commit(sha);
        state.commits.finish(sha, result);
    }

    state.open_release(stat);
    render_state_to_string(&state, width, height)
}

fn render_state_to_string(state: &AppState, width: u16, height: u16) -> anyhow::Result<String> {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).context("failed to create test terminal")?;

    terminal
        .draw(|frame| ui::render(frame, state))
        .context("failed to render frame")?;

    let buffer = terminal.backend().buffer().clone();

    let mut out = String::new();
    for y in 0..height {
        for x in 0..width {
            out.push_str(buffer[(x, y)].symbol());
        }
        while out.ends_with(' ') {
            out.pop();
        }
        out.push('\n');
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::render_demo_dump;

    #[test]
    fn demo_dump_contains_both_screens() {
        let dump = render_demo_dump(120, 36).expect("render should succeed");
        assert!(dump.contains("=== STATS SCREEN ==="));
        assert!(dump.contains("=== RELEASE SCREEN ==="));
        assert!(dump.contains("cadence"));
    }

    #[test]
    fn demo_release_screen_shows_the_completed_cycle() {
        let dump = render_demo_dump(120, 36).expect("render should succeed");
        assert!(dump.contains("Completed in: 14 days"));
        assert!(dump.contains("Release completed 2026-07-15"));
        assert!(dump.contains("Release Candidate created 2026-07-01"));
    }

    #[test]
    fn demo_release_screen_annotates_the_endpoint_tag_rows() {
        let dump = render_demo_dump(120, 36).expect("render should succeed");
        let rc_row = dump
            .lines()
            .find(|line| line.contains("rc-1.3.0"))
            .expect("candidate tag row should render");
        assert!(rc_row.contains("2026-07-01 ("));
        let version_row = dump
            .lines()
            .find(|line| line.contains("version-1.3.1"))
            .expect("version tag row should render");
        assert!(version_row.contains("2026-07-15 ("));
    }
}
