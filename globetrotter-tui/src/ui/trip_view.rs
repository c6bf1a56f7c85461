use super::utils::{format_day, format_range, money};
use super::widgets::controls_bar;
use super::*;

pub fn render_trip_detail(frame: &mut Frame, app: &App, body: Rect) {
    let Some(detail) = app.detail.as_ref() else {
        return;
    };
    let trip = &detail.trip;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(5), // Trip summary
            Constraint::Min(0),    // Stops | activities
            Constraint::Length(3), // Controls
        ])
        .split(body);

    let muted = Style::default().fg(Color::DarkGray);
    let visibility = if trip.is_public() {
        Span::styled("Public", Style::default().fg(Color::Green))
    } else {
        Span::styled("Private", muted)
    };
    let summary = vec![
        Line::from(vec![
            Span::styled(format_range(&trip.start_date, &trip.end_date), Style::default().fg(Color::White)),
            Span::styled(format!("  ·  {} days  ·  ", trip.duration_days()), muted),
            visibility,
        ]),
        Line::from(Span::styled(
            trip.description.clone().unwrap_or_default(),
            Style::default().fg(Color::Gray),
        )),
        Line::from(vec![
            Span::styled("Budget: ", Style::default().fg(Color::Yellow)),
            Span::styled(money(detail.budget.total_budget), Style::default().fg(Color::White)),
        ]),
    ];
    frame.render_widget(
        Paragraph::new(summary).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White))
                .title(format!(" {} ", trip.name))
                .padding(Padding::horizontal(1)),
        ),
        chunks[0],
    );

    let panels = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(chunks[1]);

    let stop_items: Vec<ListItem> = detail
        .stops
        .iter()
        .enumerate()
        .map(|(i, stop)| {
            let style = if i == detail.stop_index {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(vec![
                Line::from(Span::styled(format!("{}. {}", i + 1, stop.city_label()), style)),
                Line::from(Span::styled(
                    format!("   {}", format_range(&stop.arrival_date, &stop.departure_date)),
                    muted,
                )),
            ])
        })
        .collect();
    let stops_focused = detail.activity_index.is_none();
    let border = |focused: bool| {
        if focused {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::DarkGray)
        }
    };
    let stops_block = Block::default()
        .borders(Borders::ALL)
        .border_style(border(stops_focused))
        .title(format!(" Stops ({}) ", detail.stops.len()))
        .padding(Padding::horizontal(1));
    if detail.stops.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled("No stops yet. Press s to add a city.", muted))
                .wrap(Wrap { trim: true })
                .block(stops_block),
            panels[0],
        );
    } else {
        let mut state = ListState::default();
        state.select(Some(detail.stop_index));
        frame.render_stateful_widget(List::new(stop_items).block(stops_block), panels[0], &mut state);
    }

    let stop = detail.selected_stop();
    let activity_lines: Vec<Line> = match stop {
        None => vec![],
        Some(stop) if stop.activities.is_empty() => vec![Line::from(Span::styled(
            "No activities. Press a to add one.",
            muted,
        ))],
        Some(stop) => stop
            .activities
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let style = if detail.activity_index == Some(i) {
                    Style::default().fg(Color::Yellow)
                } else {
                    Style::default().fg(Color::White)
                };
                let mut spans = vec![Span::styled(item.name(), style)];
                if let Some(at) = &item.scheduled_time {
                    spans.push(Span::styled(format!("  {}", format_day(at)), muted));
                }
                spans.push(Span::styled(format!("  {}", money(item.estimated_cost())), muted));
                Line::from(spans)
            })
            .collect(),
    };
    let title = stop.map_or(" Activities ".to_string(), |s| {
        format!(" Activities in {} ", s.city_name())
    });
    frame.render_widget(
        Paragraph::new(activity_lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border(!stops_focused))
                .title(title)
                .padding(Padding::horizontal(1)),
        ),
        panels[1],
    );

    frame.render_widget(
        controls_bar(&[
            ("j/k", "Stops"),
            ("h/l", "Activities"),
            ("s", "Add city"),
            ("a", "Add activity"),
            ("d", "Remove"),
            ("t", "Timeline"),
            ("b", "Budget"),
            ("p", "Share"),
            ("v", "Public view"),
            ("e", "Edit"),
            ("D", "Delete trip"),
            ("Esc", "Back"),
        ]),
        chunks[2],
    );
}
