use crate::app::{SearchState, TextInput};
use ratatui::{
    layout::Alignment,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph},
};

/// Bottom bar listing key bindings as `(key, action)` pairs.
pub fn controls_bar(keys: &[(&'static str, &'static str)]) -> Paragraph<'static> {
    let mut spans = Vec::with_capacity(keys.len() * 2);
    for (i, (key, action)) in keys.iter().enumerate() {
        let sep = if i + 1 == keys.len() { "" } else { "  " };
        spans.push(Span::styled(*key, Style::default().fg(Color::Yellow)));
        spans.push(Span::raw(format!(": {}{}", action, sep)));
    }
    Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(Span::styled(
                    " Controls ",
                    Style::default().fg(Color::DarkGray),
                ))
                .padding(Padding::horizontal(1)),
        )
}

/// Input text with a block cursor when focused.
pub fn input_text(input: &TextInput, focused: bool, masked: bool) -> String {
    let display = |s: &str| {
        if masked {
            "•".repeat(s.chars().count())
        } else {
            s.to_string()
        }
    };
    if !focused {
        return display(&input.value);
    }
    let (before, after) = input.split_at_cursor();
    format!("{}█{}", display(before), display(after))
}

/// The search box above a result list. Its border dims while the list has
/// focus.
pub fn search_box<T>(search: &SearchState<T>, placeholder: &str) -> Paragraph<'static> {
    let text = if search.input.value.is_empty() && search.list_focused {
        placeholder.to_string()
    } else {
        input_text(&search.input, !search.list_focused, false)
    };
    let border = if search.list_focused {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::White)
    };
    Paragraph::new(text)
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Left)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border)
                .title(" Search ")
                .padding(Padding::horizontal(1)),
        )
}

pub fn list_border<T>(search: &SearchState<T>) -> Style {
    if search.list_focused {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}
