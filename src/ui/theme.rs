//! Shared styles for the TUI.

use ratatui::style::{Color, Modifier, Style};
use std::sync::{OnceLock, RwLock};

/// Runtime theme palette used by the renderer.
#[derive(Debug, Clone)]
pub struct ThemePalette {
    pub border: Color,
    pub title: Color,
    pub dim: Color,
    pub text: Color,
    pub selected_fg: Color,
    pub selected_bg: Color,
    pub accent: Color,
    pub released: Color,
    pub ongoing: Color,
    pub error: Color,
    pub info: Color,
    pub gauge_label: Color,
    pub gauge_fill: Color,
    pub gauge_empty: Color,
}

impl Default for ThemePalette {
    fn default() -> Self {
        Self {
            border: Color::Rgb(196, 120, 50),
            title: Color::Rgb(235, 170, 90),
            dim: Color::DarkGray,
            text: Color::Rgb(210, 210, 200),
            selected_fg: Color::Black,
            selected_bg: Color::Rgb(226, 180, 92),
            accent: Color::Rgb(231, 178, 88),
            released: Color::Green,
            ongoing: Color::Yellow,
            error: Color::Red,
            info: Color::Cyan,
            gauge_label: Color::Black,
            gauge_fill: Color::Rgb(245, 205, 82),
            gauge_empty: Color::Rgb(94, 80, 30),
        }
    }
}

static ACTIVE_THEME: OnceLock<RwLock<ThemePalette>> = OnceLock::new();

fn store() -> &'static RwLock<ThemePalette> {
    ACTIVE_THEME.get_or_init(|| RwLock::new(ThemePalette::default()))
}

fn with_palette<T>(f: impl FnOnce(&ThemePalette) -> T) -> T {
    let guard = store().read().expect("theme lock poisoned");
    f(&guard)
}

/// Installs the active runtime theme palette.
pub fn apply(palette: ThemePalette) {
    if let Ok(mut guard) = store().write() {
        *guard = palette;
    }
}

pub fn border() -> Style {
    with_palette(|theme| Style::default().fg(theme.border))
}

pub fn title() -> Style {
    with_palette(|theme| {
        Style::default()
            .fg(theme.title)
            .add_modifier(Modifier::BOLD)
    })
}

pub fn dim() -> Style {
    with_palette(|theme| Style::default().fg(theme.dim))
}

pub fn text() -> Style {
    with_palette(|theme| Style::default().fg(theme.text))
}

pub fn selected() -> Style {
    with_palette(|theme| Style::default().fg(theme.selected_fg).bg(theme.selected_bg))
}

pub fn accent() -> Style {
    with_palette(|theme| {
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD)
    })
}

pub fn released() -> Style {
    with_palette(|theme| Style::default().fg(theme.released))
}

pub fn ongoing() -> Style {
    with_palette(|theme| Style::default().fg(theme.ongoing))
}

pub fn error() -> Style {
    with_palette(|theme| Style::default().fg(theme.error))
}

pub fn info() -> Style {
    with_palette(|theme| Style::default().fg(theme.info))
}

pub fn gauge_label() -> Style {
    with_palette(|theme| Style::default().fg(theme.gauge_label))
}

pub fn gauge_fill() -> Style {
    with_palette(|theme| Style::default().fg(theme.gauge_fill).bg(theme.gauge_empty))
}

pub fn gauge_empty() -> Style {
    with_palette(|theme| Style::default().fg(theme.gauge_label).bg(theme.gauge_empty))
}
