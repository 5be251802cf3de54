//! Application runtime, event loop, and keyboard handling.

pub mod editor;
pub mod events;
pub mod state;

use crate::app::events::{WorkerMessage, spawn_load_commit, spawn_load_release_stats};
use crate::app::state::AppState;
use crate::domain::{ReleaseStat, Route, TagPrefixes};
#[cfg(feature = "harness")]
use crate::fixtures;
use crate::github::client::create_client;
use crate::ui;
use anyhow::Context;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::io::{Stdout, stdout};
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Runtime configuration provided by CLI flags and the config file.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub owner: Option<String>,
    pub repo: Option<String>,
    /// Series key to open directly once stats arrive.
    pub series: Option<String>,
    pub prefixes: TagPrefixes,
    #[cfg(feature = "harness")]
    pub demo: bool,
}

enum DataMode {
    #[cfg(feature = "harness")]
    Demo,
    Live {
        client: octocrab::Octocrab,
        owner: Option<String>,
        repo: Option<String>,
        prefixes: TagPrefixes,
    },
}

/// Runs the interactive TUI application.
pub async fn run(config: AppConfig) -> anyhow::Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<WorkerMessage>();

    let mut state = AppState::default();
    state.pending_series = config.series;

    #[cfg(feature = "harness")]
    let demo = config.demo;
    #[cfg(not(feature = "harness"))]
    let demo = false;

    let mode = if demo {
        #[cfg(feature = "harness")]
        {
            initialize_demo_state(&mut state);
            open_pending_series(&mut state, &DataMode::Demo, &tx);
            DataMode::Demo
        }
        #[cfg(not(feature = "harness"))]
        {
            unreachable!()
        }
    } else {
        state.begin_operation("Loading release tags");

        let client = create_client()
            .await
            .context("failed to create authenticated GitHub client")?;

        spawn_load_release_stats(
            tx.clone(),
            client.clone(),
            config.owner.clone(),
            config.repo.clone(),
            config.prefixes.clone(),
        );

        DataMode::Live {
            client,
            owner: config.owner,
            repo: config.repo,
            prefixes: config.prefixes,
        }
    };

    let mut terminal = setup_terminal()?;

    let result = run_event_loop(&mut terminal, &mut state, &mode, &tx, &mut rx).await;

    restore_terminal(&mut terminal)?;
    result
}

#[cfg(feature = "harness")]
fn initialize_demo_state(state: &mut AppState) {
    let aggregation = fixtures::demo_aggregation();
    state.set_repository_label(fixtures::DEMO_REPOSITORY_LABEL.to_owned());
    state.set_releases(aggregation.releases, aggregation.summary);
}

fn setup_terminal() -> anyhow::Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode().context("failed to enable raw mode")?;
    execute!(stdout(), EnterAlternateScreen).context("failed to enter alternate screen")?;
    Terminal::new(CrosstermBackend::new(stdout())).context("failed to create terminal")
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> anyhow::Result<()> {
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(stdout(), LeaveAlternateScreen).context("failed to leave alternate screen")?;
    terminal.show_cursor().context("failed to show cursor")
}

async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    state: &mut AppState,
    mode: &DataMode,
    tx: &UnboundedSender<WorkerMessage>,
    rx: &mut UnboundedReceiver<WorkerMessage>,
) -> anyhow::Result<()> {
    loop {
        state.advance_spinner();

        while let Ok(message) = rx.try_recv() {
            process_worker_message(state, mode, tx, message);
        }

        terminal.draw(|frame| ui::render(frame, state))?;

        if state.should_quit {
            break;
        }

        if event::poll(Duration::from_millis(60))?
            && let Event::Key(key_event) = event::read()?
            && key_event.kind == KeyEventKind::Press
        {
            handle_key_event(state, mode, tx, key_event);
        }
    }

    Ok(())
}

fn process_worker_message(
    state: &mut AppState,
    mode: &DataMode,
    tx: &UnboundedSender<WorkerMessage>,
    message: WorkerMessage,
) {
    match message {
        WorkerMessage::StatsLoaded {
            repository_label,
            result,
        } => {
            state.end_operation();
            state.set_repository_label(repository_label);

            match result {
                Ok(payload) => {
                    state.error_message = None;
                    state.repository = Some(payload.repository);
                    state.set_releases(
                        payload.aggregation.releases,
                        payload.aggregation.summary,
                    );
                    open_pending_series(state, mode, tx);
                }
                Err(error) => {
                    state.error_message = Some(error);
                }
            }
        }
        WorkerMessage::CommitLoaded { sha, result } => {
            state.commits.finish(&sha, result);
        }
    }
}

/// Opens the `--series` target once stats are available.
fn open_pending_series(state: &mut AppState, mode: &DataMode, tx: &UnboundedSender<WorkerMessage>) {
    let Some(series) = state.pending_series.take() else {
        return;
    };

    match state.release_by_series(&series).cloned() {
        Some(stat) => open_series(state, mode, tx, stat),
        None => {
            state.error_message = Some(format!("series `{series}` not found"));
        }
    }
}

fn open_series(
    state: &mut AppState,
    mode: &DataMode,
    tx: &UnboundedSender<WorkerMessage>,
    stat: ReleaseStat,
) {
    request_commit(state, mode, tx, stat.cut_sha().map(str::to_owned));
    request_commit(state, mode, tx, stat.completion_sha().map(str::to_owned));
    state.open_release(stat);
}

/// Kicks off one commit lookup unless the store already holds it.
fn request_commit(
    state: &mut AppState,
    mode: &DataMode,
    tx: &UnboundedSender<WorkerMessage>,
    sha: Option<String>,
) {
    let Some(sha) = sha else {
        return;
    };
    if !state.commits.needs_fetch(&sha) {
        return;
    }

    state.commits.begin(&sha);

    match mode {
        #[cfg(feature = "harness")]
        DataMode::Demo => {
            let result = fixtures::demo_commit(&sha);
            state.commits.finish(&sha, result);
        }
        DataMode::Live { client, .. } => {
            let Some(repository) = state.repository.clone() else {
                state
                    .commits
                    .finish(&sha, Err("repository not resolved".to_owned()));
                return;
            };
            spawn_load_commit(tx.clone(), client.clone(), repository, sha);
        }
    }
}

fn handle_key_event(
    state: &mut AppState,
    mode: &DataMode,
    tx: &UnboundedSender<WorkerMessage>,
    key: KeyEvent,
) {
    if state.route == Route::Stats && state.is_filter_focused() {
        handle_filter_key_event(state, key);
        return;
    }

    match state.route {
        Route::Stats => handle_stats_key_event(state, mode, tx, key),
        Route::Release => handle_release_key_event(state, mode, tx, key),
    }
}

fn handle_filter_key_event(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Enter => state.filter_input.unfocus(),
        KeyCode::Backspace => {
            state.filter_input.backspace();
            state.recompute_filter();
        }
        KeyCode::Char(ch) => {
            if !ch.is_control() {
                state.filter_input.push_char(ch);
                state.recompute_filter();
            }
        }
        _ => {}
    }
}

fn handle_stats_key_event(
    state: &mut AppState,
    mode: &DataMode,
    tx: &UnboundedSender<WorkerMessage>,
    key: KeyEvent,
) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => {
            state.should_quit = true;
        }
        KeyCode::Down | KeyCode::Char('j') => state.filter_move_down(),
        KeyCode::Up | KeyCode::Char('k') => state.filter_move_up(),
        KeyCode::Char('s') => state.focus_filter(),
        KeyCode::Enter => {
            if state.is_busy() {
                return;
            }

            let Some(stat) = state.selected_release().cloned() else {
                return;
            };

            state.error_message = None;
            open_series(state, mode, tx, stat);
        }
        KeyCode::Char('R') => {
            if state.is_busy() {
                return;
            }

            match mode {
                #[cfg(feature = "harness")]
                DataMode::Demo => {
                    initialize_demo_state(state);
                }
                DataMode::Live {
                    client,
                    owner,
                    repo,
                    prefixes,
                } => {
                    state.error_message = None;
                    state.begin_operation("Reloading release tags");
                    spawn_load_release_stats(
                        tx.clone(),
                        client.clone(),
                        owner.clone(),
                        repo.clone(),
                        prefixes.clone(),
                    );
                }
            }
        }
        _ => {}
    }
}

fn handle_release_key_event(
    state: &mut AppState,
    mode: &DataMode,
    tx: &UnboundedSender<WorkerMessage>,
    key: KeyEvent,
) {
    match key.code {
        KeyCode::Char('q') => {
            state.should_quit = true;
        }
        KeyCode::Char('b') | KeyCode::Esc => {
            state.back_to_stats();
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if let Some(release) = state.release.as_mut() {
                release.scroll_down();
            }
        }
        KeyCode::Up | KeyCode::Char('k') => {
            if let Some(release) = state.release.as_mut() {
                release.scroll_up();
            }
        }
        KeyCode::Char('R') => {
            let Some(stat) = state.release.as_ref().map(|release| release.stat.clone()) else {
                return;
            };

            if let Some(sha) = stat.cut_sha() {
                state.commits.invalidate(sha);
            }
            if let Some(sha) = stat.completion_sha() {
                state.commits.invalidate(sha);
            }
            request_commit(state, mode, tx, stat.cut_sha().map(str::to_owned));
            request_commit(state, mode, tx, stat.completion_sha().map(str::to_owned));
        }
        _ => {}
    }
}
