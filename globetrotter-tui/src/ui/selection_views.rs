use super::utils::money;
use super::widgets::{controls_bar, list_border, search_box};
use super::*;
use globetrotter::domain::{SearchTerm, MIN_SEARCH_LEN};

fn selection_layout(body: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints([
            Constraint::Length(3), // Search input
            Constraint::Min(0),    // Results
            Constraint::Length(3), // Controls
        ])
        .split(body)
}

fn hint_line(text: String) -> ListItem<'static> {
    ListItem::new(Span::styled(text, Style::default().fg(Color::DarkGray)))
}

pub fn render_city_picker(frame: &mut Frame, app: &App, body: Rect) {
    let chunks = selection_layout(body);
    let search = &app.city_picker;
    frame.render_widget(search_box(search, "Type to search cities..."), chunks[0]);

    let items: Vec<ListItem> = if search.results.is_empty() {
        let hint = if SearchTerm::classify(&search.input.value).is_browse() {
            format!("Type at least {} characters to search", MIN_SEARCH_LEN)
        } else {
            "No matching cities".to_string()
        };
        vec![hint_line(hint)]
    } else {
        search
            .results
            .iter()
            .enumerate()
            .map(|(i, city)| {
                let style = if i == search.index {
                    Style::default().fg(Color::Yellow)
                } else {
                    Style::default().fg(Color::White)
                };
                ListItem::new(Line::from(vec![
                    Span::styled(city.label(), style),
                    Span::styled(
                        format!("  {}", city.price_band()),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]))
            })
            .collect()
    };

    let title = app
        .detail
        .as_ref()
        .map_or(" Add a city ".to_string(), |d| format!(" Add a city to {} ", d.trip.name));
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(list_border(search))
            .title(title)
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(list, chunks[1]);

    frame.render_widget(
        controls_bar(&[
            ("Type", "Search"),
            ("Tab", "Focus list"),
            ("↑↓/j/k", "Navigate"),
            ("Enter", "Add stop"),
            ("Ctrl+X", "Clear"),
            ("Esc", "Cancel"),
        ]),
        chunks[2],
    );
}

pub fn render_activity_picker(frame: &mut Frame, app: &App, body: Rect) {
    let chunks = selection_layout(body);
    let picker = &app.activity_picker;
    let search = &picker.search;
    frame.render_widget(search_box(search, "Type to search activities..."), chunks[0]);

    let items: Vec<ListItem> = if search.results.is_empty() {
        vec![hint_line("No activities to show".to_string())]
    } else {
        search
            .results
            .iter()
            .enumerate()
            .map(|(i, activity)| {
                let style = if i == search.index {
                    Style::default().fg(Color::Yellow)
                } else {
                    Style::default().fg(Color::White)
                };
                let muted = Style::default().fg(Color::DarkGray);
                ListItem::new(Line::from(vec![
                    Span::styled(activity.name.clone(), style),
                    Span::styled(format!("  {}", activity.category.label()), muted),
                    Span::styled(format!("  {}", money(activity.estimated_cost)), muted),
                    Span::styled(format!("  {:.1}h", activity.duration_hours), muted),
                ]))
            })
            .collect()
    };

    let category = picker.category.map_or("All categories", |c| c.label());
    let stop = app
        .detail
        .as_ref()
        .and_then(|d| d.stops.iter().find(|s| Some(s.id) == picker.stop_id))
        .map(|s| s.city_name())
        .unwrap_or_default();
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(list_border(search))
            .title(format!(" Activities for {} [{}] ", stop, category))
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(list, chunks[1]);

    frame.render_widget(
        controls_bar(&[
            ("Type", "Search"),
            ("Ctrl+T", "Category"),
            ("Tab", "Focus list"),
            ("Enter", "Add"),
            ("Ctrl+X", "Clear"),
            ("Esc", "Cancel"),
        ]),
        chunks[2],
    );
}
