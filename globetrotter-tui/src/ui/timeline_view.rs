use super::utils::{format_range, money};
use super::widgets::controls_bar;
use super::*;
use globetrotter::timeline::build_timeline;

pub fn render_timeline(frame: &mut Frame, app: &App, body: Rect) {
    let Some(timeline) = app.timeline.as_ref() else {
        return;
    };
    let trip = &timeline.trip;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(body);

    let days = build_timeline(trip, &timeline.stops);
    let muted = Style::default().fg(Color::DarkGray);

    let items: Vec<ListItem> = days
        .iter()
        .map(|day| {
            let heading = Line::from(vec![
                Span::styled(
                    format!("Day {:<3}", day.day_number),
                    Style::default().fg(Color::Yellow),
                ),
                Span::styled(day.date.format("%a %b %d").to_string(), Style::default().fg(Color::White)),
                Span::raw("  "),
                match day.stop {
                    Some(stop) => Span::styled(stop.city_label(), Style::default().fg(Color::Cyan)),
                    None => Span::styled("Travel day", muted),
                },
            ]);
            let mut lines = vec![heading];
            for item in day.activities() {
                lines.push(Line::from(vec![
                    Span::raw("         • "),
                    Span::styled(item.name(), Style::default().fg(Color::White)),
                    Span::styled(format!("  {}", money(item.estimated_cost())), muted),
                ]));
            }
            ListItem::new(lines)
        })
        .collect();

    let mut state = ListState::default();
    state.select((!days.is_empty()).then_some(timeline.scroll.min(days.len().saturating_sub(1))));
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White))
                .title(format!(
                    " {}: {} ({} days) ",
                    trip.name,
                    format_range(&trip.start_date, &trip.end_date),
                    trip.duration_days()
                ))
                .padding(Padding::horizontal(1)),
        )
        .highlight_symbol("▶ ");
    frame.render_stateful_widget(list, chunks[0], &mut state);

    frame.render_widget(
        controls_bar(&[("j/k", "Scroll"), ("Esc", "Back"), ("q", "Quit")]),
        chunks[1],
    );
}
