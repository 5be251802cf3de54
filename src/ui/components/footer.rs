//! Footer component used for keybinding hints.

use crate::ui::theme;
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

/// Returns the footer height required to render all hint tokens for the given terminal width.
pub fn required_height(screen_width: u16, hints: &str) -> u16 {
    let width = usize::from(screen_width.max(1));
    wrap_hint_tokens(hints, width).len().max(1) as u16
}

/// Renders keybinding hints in a plain bottom bar.
pub fn render(frame: &mut Frame<'_>, area: Rect, hints: &str) {
    let width = usize::from(area.width.max(1));
    let lines = wrap_hint_tokens(hints, width);
    let text: Vec<Line<'static>> = if lines.is_empty() {
        vec![Line::from(" ")]
    } else {
        lines.iter().map(|line| styled_hint_line(line)).collect()
    };

    frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), area);
}

#[derive(Debug, Clone)]
struct HintToken {
    key: String,
    desc: String,
}

impl HintToken {
    /// `[key] description` or a bare description token.
    fn parse(token: &str) -> Self {
        let token = token.trim();
        if token.starts_with('[')
            && let Some(end) = token.find(']')
        {
            return Self {
                key: token[..=end].to_owned(),
                desc: token[end + 1..].trim().to_owned(),
            };
        }

        Self {
            key: String::new(),
            desc: token.to_owned(),
        }
    }

    fn display_width(&self) -> usize {
        let key_width = self.key.chars().count();
        let desc_width = self.desc.chars().count();
        match (key_width, desc_width) {
            (0, desc) => desc,
            (key, 0) => key,
            (key, desc) => key + 1 + desc,
        }
    }
}

fn wrap_hint_tokens(hints: &str, width: usize) -> Vec<Vec<HintToken>> {
    let width = width.max(1);
    let tokens: Vec<HintToken> = hints
        .split("  ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(HintToken::parse)
        .collect();

    let mut lines = Vec::new();
    let mut current = Vec::<HintToken>::new();
    let mut current_width = 0usize;

    for token in tokens {
        let token_width = token.display_width();
        let separator_width = if current.is_empty() { 0 } else { 2 };
        let projected_width = current_width + separator_width + token_width;

        if projected_width <= width {
            current.push(token);
            current_width = projected_width;
            continue;
        }

        if !current.is_empty() {
            lines.push(current);
            current = Vec::new();
        }

        current_width = token_width.min(width);
        current.push(token);
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

fn styled_hint_line(tokens: &[HintToken]) -> Line<'static> {
    let mut spans = Vec::<Span<'static>>::new();
    for (index, token) in tokens.iter().enumerate() {
        if index > 0 {
            spans.push(Span::styled("  ", theme::dim()));
        }
        if !token.key.is_empty() {
            spans.push(Span::styled(token.key.clone(), theme::ongoing()));
        }
        if !token.desc.is_empty() {
            if !token.key.is_empty() {
                spans.push(Span::styled(" ", theme::dim()));
            }
            spans.push(Span::styled(token.desc.clone(), theme::dim()));
        }
    }
    if spans.is_empty() {
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hint_lines_wrap_at_the_terminal_width() {
        let hints = "[j/k] move  [enter] open  [R] reload  [q] quit";
        assert_eq!(required_height(200, hints), 1);
        assert!(required_height(14, hints) > 1);
    }

    #[test]
    fn bare_tokens_parse_without_a_key() {
        let token = HintToken::parse("quit");
        assert_eq!(token.key, "");
        assert_eq!(token.desc, "quit");
        assert_eq!(token.display_width(), 4);
    }
}
