//! Footer hint composition for each route and interaction mode.

use crate::{app::state::AppState, domain::Route};

pub fn build(state: &AppState) -> String {
    match state.route {
        Route::Stats => stats_hints(state),
        Route::Release => release_hints(),
    }
}

fn stats_hints(state: &AppState) -> String {
    if state.is_filter_focused() {
        "[type] edit filter  [backspace] delete  [enter/esc] unfocus".to_owned()
    } else {
        "[j/k/up/down] navigate  [enter] open series  [s] focus filter  [R] reload tags  [q/esc] quit"
            .to_owned()
    }
}

fn release_hints() -> String {
    "[j/k/up/down] scroll tags  [R] refetch commits  [b/esc] back  [q] quit".to_owned()
}
