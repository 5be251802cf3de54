//! Bordered single-line filter input.

use crate::ui::theme;
use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

pub struct SearchBoxProps<'a> {
    pub title: &'a str,
    pub query: &'a str,
    pub focused: bool,
    pub unfocused_placeholder: &'a str,
    pub focus_key_hint: &'a str,
}

pub fn render(frame: &mut Frame<'_>, area: Rect, props: SearchBoxProps<'_>) {
    let title = if props.focused {
        Line::from(Span::styled(props.title.to_owned(), theme::info()))
    } else {
        Line::from(vec![
            Span::styled(props.title.to_owned(), theme::title()),
            Span::styled(format!("{} ", props.focus_key_hint), theme::info()),
        ])
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(if props.focused {
            theme::ongoing()
        } else {
            theme::border()
        });

    let line = if props.query.is_empty() && !props.focused {
        Line::styled(format!("  {}", props.unfocused_placeholder), theme::dim())
    } else {
        let mut value = format!("  {}", props.query);
        if props.focused {
            value.push('|');
        }
        Line::styled(value, theme::text())
    };

    frame.render_widget(Paragraph::new(line).block(block), area);
}
