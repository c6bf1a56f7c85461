use super::utils::{format_range, money};
use super::widgets::{controls_bar, input_text};
use super::*;

pub fn render_dashboard(frame: &mut Frame, app: &App, body: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Filter
            Constraint::Min(0),    // Trips
            Constraint::Length(3), // Controls
        ])
        .split(body);

    let filter_text = if app.trip_filter_focused {
        input_text(&app.trip_filter, true, false)
    } else if app.trip_filter.value.is_empty() {
        "Press / to filter trips".to_string()
    } else {
        app.trip_filter.value.clone()
    };
    let filter_style = if app.trip_filter_focused {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let filter = Paragraph::new(filter_text).style(filter_style).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(filter_style)
            .title(" Filter ")
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(filter, chunks[0]);

    let title = if app.trip_filter.value.is_empty() {
        format!(" My trips ({}) ", app.trips.len())
    } else {
        format!(" My trips ({}/{}) ", app.filtered_trips.len(), app.trips.len())
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White))
        .title(title)
        .padding(Padding::horizontal(1));

    if app.trips.is_empty() {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "No trips yet. Press n to plan your first one.",
                Style::default().fg(Color::DarkGray),
            )),
        ])
        .alignment(Alignment::Center)
        .block(block);
        frame.render_widget(empty, chunks[1]);
    } else {
        let items: Vec<ListItem> = app
            .filtered_trips
            .iter()
            .filter_map(|&i| app.trips.get(i))
            .enumerate()
            .map(|(i, trip)| {
                let selected = i == app.trip_index;
                let name_style = if selected {
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::White)
                };
                let muted = Style::default().fg(Color::DarkGray);
                let mut header = vec![Span::styled(trip.name.clone(), name_style)];
                if trip.is_public() {
                    header.push(Span::styled("  public", Style::default().fg(Color::Green)));
                }
                let mut details = vec![
                    Span::raw("  "),
                    Span::styled(format_range(&trip.start_date, &trip.end_date), muted),
                    Span::styled(format!("  ·  {} days", trip.duration_days()), muted),
                ];
                if let Some(stops) = trip.stop_count {
                    details.push(Span::styled(format!("  ·  {} stops", stops), muted));
                }
                if let Some(budget) = trip.total_budget {
                    details.push(Span::styled(format!("  ·  {}", money(budget)), muted));
                }
                ListItem::new(vec![Line::from(header), Line::from(details)])
            })
            .collect();

        let mut state = ListState::default();
        state.select(Some(app.trip_index));
        let list = List::new(items)
            .block(block)
            .highlight_symbol("▶ ");
        frame.render_stateful_widget(list, chunks[1], &mut state);
    }

    let keys: &[(&str, &str)] = if app.trip_filter_focused {
        &[("Type", "Filter"), ("Enter", "Keep"), ("Esc", "Clear")]
    } else {
        &[
            ("j/k", "Navigate"),
            ("Enter", "Open"),
            ("n", "New"),
            ("e", "Edit"),
            ("d", "Delete"),
            ("/", "Filter"),
            ("c", "Cities"),
            ("p", "Profile"),
            ("L", "Log out"),
            ("q", "Quit"),
        ]
    };
    frame.render_widget(controls_bar(keys), chunks[2]);
}
