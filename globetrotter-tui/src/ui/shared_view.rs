use super::utils::{format_range, money};
use super::widgets::controls_bar;
use super::*;
use globetrotter::domain::ItineraryTotals;

/// Read-only itinerary as seen through a share link.
pub fn render_shared(frame: &mut Frame, app: &App, body: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(6), // Stats
            Constraint::Min(0),    // Stops
            Constraint::Length(3), // Controls
        ])
        .split(body);

    let esc = if app.is_logged_in() { "Back" } else { "Log in" };
    let keys: &[(&str, &str)] = &[("j/k", "Scroll"), ("r", "Reload"), ("Esc", esc)];
    frame.render_widget(controls_bar(keys), chunks[2]);

    let Some(shared) = app.shared.as_ref() else {
        let message = app
            .shared_error
            .clone()
            .unwrap_or_else(|| "Loading itinerary...".to_string());
        frame.render_widget(
            Paragraph::new(vec![Line::from(""), Line::from(message)])
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::DarkGray))
                .block(Block::default().borders(Borders::ALL).title(" Shared trip ")),
            chunks[0].union(chunks[1]),
        );
        return;
    };

    let trip = &shared.trip;
    let totals = ItineraryTotals::of(&shared.stops);
    let yellow = Style::default().fg(Color::Yellow);
    let white = Style::default().fg(Color::White);
    let muted = Style::default().fg(Color::DarkGray);

    let stats = vec![
        Line::from(vec![
            Span::styled(format_range(&trip.start_date, &trip.end_date), white),
            Span::styled(
                trip.description
                    .as_ref()
                    .map(|d| format!("  ·  {}", d))
                    .unwrap_or_default(),
                muted,
            ),
        ]),
        Line::from(vec![
            Span::styled("Duration: ", yellow),
            Span::styled(format!("{} days", trip.duration_days()), white),
            Span::styled(" | ", muted),
            Span::styled("Destinations: ", yellow),
            Span::styled(totals.stops.to_string(), white),
            Span::styled(" | ", muted),
            Span::styled("Activities: ", yellow),
            Span::styled(
                format!("{} ({})", totals.activities, money(totals.activities_cost)),
                white,
            ),
        ]),
        Line::from(vec![
            Span::styled("Share link: ", yellow),
            Span::styled(app.share_link_for(trip.id), Style::default().fg(Color::Cyan)),
        ]),
    ];
    frame.render_widget(
        Paragraph::new(stats).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(white)
                .title(format!(" {} ", trip.name))
                .padding(Padding::horizontal(1)),
        ),
        chunks[0],
    );

    let mut stops: Vec<_> = shared.stops.iter().collect();
    stops.sort_by_key(|s| s.order_index);
    let items: Vec<ListItem> = stops
        .iter()
        .enumerate()
        .map(|(i, stop)| {
            let mut lines = vec![Line::from(vec![
                Span::styled(format!("{}. {}", i + 1, stop.city_label()), Style::default().fg(Color::Cyan)),
                Span::styled(
                    format!("  {}", format_range(&stop.arrival_date, &stop.departure_date)),
                    muted,
                ),
            ])];
            for item in &stop.activities {
                lines.push(Line::from(vec![
                    Span::raw("   • "),
                    Span::styled(item.name(), white),
                    Span::styled(format!("  {}", money(item.estimated_cost())), muted),
                ]));
            }
            ListItem::new(lines)
        })
        .collect();

    let mut state = ListState::default();
    state.select((!stops.is_empty()).then_some(app.shared_scroll));
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(muted)
                .title(" Itinerary ")
                .padding(Padding::horizontal(1)),
        )
        .highlight_symbol("▶ ");
    frame.render_stateful_widget(list, chunks[1], &mut state);
}
