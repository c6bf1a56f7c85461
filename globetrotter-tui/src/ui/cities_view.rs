use super::widgets::{controls_bar, list_border, search_box};
use super::*;

/// City catalog: searchable list on the left, details of the highlighted
/// city on the right.
pub fn render_cities(frame: &mut Frame, app: &App, body: Rect) {
    let search = &app.cities;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(body);
    frame.render_widget(search_box(search, "Type to search cities..."), chunks[0]);

    let panels = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(chunks[1]);

    let items: Vec<ListItem> = search
        .results
        .iter()
        .enumerate()
        .map(|(i, city)| {
            let style = if i == search.index {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(Span::styled(city.label(), style))
        })
        .collect();
    let mut state = ListState::default();
    state.select((!search.results.is_empty()).then_some(search.index));
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(list_border(search))
            .title(format!(" Cities ({}) ", search.results.len()))
            .padding(Padding::horizontal(1)),
    );
    frame.render_stateful_widget(list, panels[0], &mut state);

    let muted = Style::default().fg(Color::DarkGray);
    let white = Style::default().fg(Color::White);
    let details = match search.selected() {
        Some(city) => {
            let mut lines = vec![
                Line::from(Span::styled(
                    city.name.clone(),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    match &city.region {
                        Some(region) => format!("{}, {}", region, city.country),
                        None => city.country.clone(),
                    },
                    white,
                )),
                Line::from(""),
                Line::from(vec![
                    Span::styled("Cost: ", muted),
                    Span::styled(
                        format!("{} (index {:.0})", city.price_band(), city.cost_index),
                        white,
                    ),
                ]),
                Line::from(vec![
                    Span::styled("Popularity: ", muted),
                    Span::styled(city.popularity.to_string(), white),
                ]),
                Line::from(""),
            ];
            if let Some(description) = &city.description {
                lines.push(Line::from(Span::styled(description.clone(), white)));
            }
            lines
        }
        None => vec![Line::from(Span::styled("No city selected", muted))],
    };
    frame.render_widget(
        Paragraph::new(details).wrap(Wrap { trim: true }).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Details ")
                .padding(Padding::horizontal(1)),
        ),
        panels[1],
    );

    frame.render_widget(
        controls_bar(&[
            ("Type", "Search"),
            ("Tab", "Focus list"),
            ("↑↓/j/k", "Navigate"),
            ("Ctrl+X", "Clear"),
            ("Esc", "Back"),
        ]),
        chunks[2],
    );
}
