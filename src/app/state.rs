//! Application state shared between the event loop and renderer.

use crate::domain::{CommitInfo, CommitQuery, ReleaseStat, RepositoryRef, Route};
use crate::search::fuzzy::rank_releases;
use crate::stats::aggregate::StatsSummary;
use std::collections::HashMap;

/// Spinner frames shown in the header while an operation is pending.
pub const SPINNER_FRAMES: [&str; 8] = ["⢎⡰", "⢎⡡", "⢎⡑", "⢎⠱", "⠎⡱", "⢊⡱", "⢌⡱", "⢆⡱"];

/// Text input backing the series filter box.
#[derive(Debug, Clone, Default)]
pub struct FilterInput {
    query: String,
    focused: bool,
}

impl FilterInput {
    pub fn focus(&mut self) {
        self.focused = true;
    }

    pub fn unfocus(&mut self) {
        self.focused = false;
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn push_char(&mut self, ch: char) {
        self.query.push(ch);
    }

    pub fn backspace(&mut self) {
        self.query.pop();
    }
}

/// Sha-keyed cache of commit lookups.
///
/// Rows only read this store; workers drive it through `begin` and
/// `finish`. An entry stays `Failed` until an explicit refresh
/// invalidates it.
#[derive(Debug, Clone, Default)]
pub struct CommitStore {
    entries: HashMap<String, CommitQuery>,
}

impl CommitStore {
    /// Marks a lookup as in flight.
    pub fn begin(&mut self, sha: &str) {
        self.entries.insert(sha.to_owned(), CommitQuery::Loading);
    }

    /// Records a finished lookup.
    pub fn finish(&mut self, sha: &str, result: Result<CommitInfo, String>) {
        let entry = match result {
            Ok(info) => CommitQuery::Ready(info),
            Err(message) => CommitQuery::Failed(message),
        };
        self.entries.insert(sha.to_owned(), entry);
    }

    /// Drops a cached lookup so the next open refetches it.
    pub fn invalidate(&mut self, sha: &str) {
        self.entries.remove(sha);
    }

    /// Returns the lookup state for an optional reference.
    ///
    /// A missing reference resolves immediately to `Empty`, so a
    /// series without candidates or versions never appears to load.
    pub fn query(&self, sha: Option<&str>) -> CommitQuery {
        let Some(sha) = sha else {
            return CommitQuery::Empty;
        };
        self.entries.get(sha).cloned().unwrap_or(CommitQuery::Empty)
    }

    /// Returns true when the sha needs a fetch (no entry or invalidated).
    pub fn needs_fetch(&self, sha: &str) -> bool {
        !self.entries.contains_key(sha)
    }
}

/// Screen-local state for the release detail route.
#[derive(Debug, Clone)]
pub struct ReleaseScreenState {
    pub stat: ReleaseStat,
    pub tag_scroll: usize,
}

impl ReleaseScreenState {
    pub fn new(stat: ReleaseStat) -> Self {
        Self {
            stat,
            tag_scroll: 0,
        }
    }

    pub fn scroll_down(&mut self) {
        let longest = self.stat.candidates.len().max(self.stat.versions.len());
        if self.tag_scroll + 1 < longest {
            self.tag_scroll += 1;
        }
    }

    pub fn scroll_up(&mut self) {
        self.tag_scroll = self.tag_scroll.saturating_sub(1);
    }
}

/// Top-level mutable application state.
#[derive(Debug)]
pub struct AppState {
    pub route: Route,
    pub should_quit: bool,
    pub error_message: Option<String>,
    pub repository_label: String,
    pub repository: Option<RepositoryRef>,
    pub releases: Vec<ReleaseStat>,
    pub summary: Option<StatsSummary>,
    pub filter_input: FilterInput,
    pub filter_results: Vec<usize>,
    pub filter_selected: usize,
    pub commits: CommitStore,
    pub release: Option<ReleaseScreenState>,
    /// Series to open as soon as stats arrive (`--series` startup path).
    pub pending_series: Option<String>,
    operation: Option<OperationState>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            route: Route::Stats,
            should_quit: false,
            error_message: None,
            repository_label: "(resolving repository)".to_owned(),
            repository: None,
            releases: Vec::new(),
            summary: None,
            filter_input: FilterInput::default(),
            filter_results: Vec::new(),
            filter_selected: 0,
            commits: CommitStore::default(),
            release: None,
            pending_series: None,
            operation: None,
        }
    }
}

impl AppState {
    pub fn set_repository_label(&mut self, label: String) {
        self.repository_label = label;
    }

    pub fn set_releases(&mut self, releases: Vec<ReleaseStat>, summary: StatsSummary) {
        self.releases = releases;
        self.summary = Some(summary);
        self.recompute_filter();
        self.filter_selected = 0;
    }

    pub fn recompute_filter(&mut self) {
        self.filter_results = rank_releases(self.filter_input.query(), &self.releases)
            .into_iter()
            .map(|result| result.index)
            .collect();

        if self.filter_selected >= self.filter_results.len() {
            self.filter_selected = self.filter_results.len().saturating_sub(1);
        }
    }

    pub fn selected_release(&self) -> Option<&ReleaseStat> {
        let index = *self.filter_results.get(self.filter_selected)?;
        self.releases.get(index)
    }

    /// Finds a series by its display key, for the direct-open path.
    pub fn release_by_series(&self, series: &str) -> Option<&ReleaseStat> {
        self.releases.iter().find(|stat| stat.series == series)
    }

    pub fn focus_filter(&mut self) {
        self.filter_input.focus();
    }

    pub fn is_filter_focused(&self) -> bool {
        self.filter_input.is_focused()
    }

    pub fn filter_query(&self) -> &str {
        self.filter_input.query()
    }

    pub fn filter_move_down(&mut self) {
        if self.filter_results.is_empty() {
            self.filter_selected = 0;
            return;
        }

        self.filter_selected = (self.filter_selected + 1).min(self.filter_results.len() - 1);
    }

    pub fn filter_move_up(&mut self) {
        if self.filter_results.is_empty() {
            self.filter_selected = 0;
            return;
        }

        self.filter_selected = self.filter_selected.saturating_sub(1);
    }

    pub fn open_release(&mut self, stat: ReleaseStat) {
        self.release = Some(ReleaseScreenState::new(stat));
        self.route = Route::Release;
    }

    pub fn back_to_stats(&mut self) {
        self.route = Route::Stats;
        self.release = None;
        self.filter_input.unfocus();
    }

    pub fn begin_operation(&mut self, label: impl Into<String>) {
        self.operation = Some(OperationState {
            label: label.into(),
            spinner_index: 0,
        });
    }

    pub fn end_operation(&mut self) {
        self.operation = None;
    }

    pub fn is_busy(&self) -> bool {
        self.operation.is_some()
    }

    pub fn advance_spinner(&mut self) {
        if let Some(operation) = self.operation.as_mut() {
            operation.spinner_index = (operation.spinner_index + 1) % SPINNER_FRAMES.len();
        }
    }

    pub fn operation_display(&self) -> Option<String> {
        let operation = self.operation.as_ref()?;
        let frame = SPINNER_FRAMES
            .get(operation.spinner_index)
            .copied()
            .unwrap_or("⢎⡰");
        Some(format!("{frame} {}", operation.label))
    }
}

#[derive(Debug, Clone)]
struct OperationState {
    label: String,
    spinner_index: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{TagPrefixes, TagRef};
    use crate::stats::aggregate::aggregate_tags;

    fn tag(name: &str) -> TagRef {
        TagRef {
            name: name.to_owned(),
            sha: format!("sha-{name}"),
        }
    }

    fn loaded_state(names: &[&str]) -> AppState {
        let tags: Vec<TagRef> = names.iter().map(|name| tag(name)).collect();
        let aggregation = aggregate_tags(&tags, &TagPrefixes::default());

        let mut state = AppState::default();
        state.set_releases(aggregation.releases, aggregation.summary);
        state
    }

    #[test]
    fn commit_store_walks_the_lookup_lifecycle() {
        let mut store = CommitStore::default();
        assert_eq!(store.query(None), CommitQuery::Empty);
        assert_eq!(store.query(Some("abc")), CommitQuery::Empty);
        assert!(store.needs_fetch("abc"));

        store.begin("abc");
        assert!(store.query(Some("abc")).is_loading());
        assert!(!store.needs_fetch("abc"));

        store.finish("abc", Err("not found".to_owned()));
        assert_eq!(
            store.query(Some("abc")),
            CommitQuery::Failed("not found".to_owned())
        );

        store.invalidate("abc");
        assert_eq!(store.query(Some("abc")), CommitQuery::Empty);
        assert!(store.needs_fetch("abc"));
    }

    #[test]
    fn filter_narrows_results_and_clamps_selection() {
        let mut state = loaded_state(&["rc-1.3.0", "rc-1.4.0", "rc-2.0.0"]);
        assert_eq!(state.filter_results.len(), 3);

        state.filter_move_down();
        state.filter_move_down();
        assert_eq!(state.filter_selected, 2);

        state.filter_input.push_char('2');
        state.filter_input.push_char('.');
        state.filter_input.push_char('0');
        state.recompute_filter();

        assert_eq!(state.filter_results.len(), 1);
        assert_eq!(state.filter_selected, 0);
        assert_eq!(state.selected_release().unwrap().series, "2.0");
    }

    #[test]
    fn selection_does_not_run_past_either_end() {
        let mut state = loaded_state(&["rc-1.3.0"]);
        state.filter_move_up();
        assert_eq!(state.filter_selected, 0);
        state.filter_move_down();
        assert_eq!(state.filter_selected, 0);
    }

    #[test]
    fn release_by_series_matches_the_display_key() {
        let state = loaded_state(&["rc-1.3.0", "version-1.3.0"]);
        assert!(state.release_by_series("1.3").is_some());
        assert!(state.release_by_series("9.9").is_none());
    }

    #[test]
    fn open_and_back_reset_the_release_route() {
        let mut state = loaded_state(&["rc-1.3.0"]);
        let stat = state.selected_release().cloned().unwrap();
        state.open_release(stat);
        assert_eq!(state.route, Route::Release);
        assert!(state.release.is_some());

        state.back_to_stats();
        assert_eq!(state.route, Route::Stats);
        assert!(state.release.is_none());
    }
}
