use crate::app::{App, View};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Padding, Paragraph, Wrap},
    Frame,
};

mod budget_view;
mod cities_view;
mod confirm_dialog;
mod dashboard_view;
mod form_view;
mod selection_views;
mod shared_view;
mod timeline_view;
mod trip_view;
pub(super) mod utils;
pub(super) mod widgets;

pub fn render(frame: &mut Frame, app: &mut App) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(frame.area());

    render_header(frame, root[0], app);
    render_view(frame, app, app.current_view, root[1]);
}

/// Views are also drawn behind the confirmation dialog, so dispatch takes
/// the view explicitly.
fn render_view(frame: &mut Frame, app: &mut App, view: View, body: Rect) {
    match view {
        View::Login => form_view::render_login(frame, app, body),
        View::Register => form_view::render_register(frame, app, body),
        View::Dashboard => dashboard_view::render_dashboard(frame, app, body),
        View::TripForm => form_view::render_trip_form(frame, app, body),
        View::TripDetail => trip_view::render_trip_detail(frame, app, body),
        View::CityPicker => selection_views::render_city_picker(frame, app, body),
        View::ActivityPicker => selection_views::render_activity_picker(frame, app, body),
        View::Cities => cities_view::render_cities(frame, app, body),
        View::Timeline => timeline_view::render_timeline(frame, app, body),
        View::Budget => budget_view::render_budget(frame, app, body),
        View::BudgetEntryForm => form_view::render_budget_form(frame, app, body),
        View::Profile => form_view::render_profile(frame, app, body),
        View::Shared => shared_view::render_shared(frame, app, body),
        View::Confirm => confirm_dialog::render_confirm_dialog(frame, app, body),
    }
}

/// Title with a throbber (spinning while an action runs), the signed-in user
/// and the latest status message.
fn render_header(frame: &mut Frame, area: Rect, app: &mut App) {
    const LABEL: &str = " GlobeTrotter";
    let title_width = 1 + LABEL.len() as u16 + 1;

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(title_width),
            Constraint::Min(10),
            Constraint::Length(32),
        ])
        .split(area);

    let throbber_area = Rect {
        x: cols[0].x + 1,
        y: cols[0].y,
        width: 1,
        height: 1,
    };
    let label_area = Rect {
        x: throbber_area.x + 1,
        y: cols[0].y,
        width: cols[0].width.saturating_sub(2),
        height: 1,
    };
    let throbber = throbber_widgets_tui::Throbber::default()
        .style(Style::default().fg(Color::Yellow))
        .throbber_style(Style::default().fg(Color::Yellow))
        .throbber_set(throbber_widgets_tui::BRAILLE_SIX)
        .use_type(if app.is_loading {
            throbber_widgets_tui::WhichUse::Spin
        } else {
            throbber_widgets_tui::WhichUse::Full
        });
    frame.render_stateful_widget(throbber, throbber_area, &mut app.throbber_state);
    frame.render_widget(
        Paragraph::new(Span::styled(LABEL, Style::default().fg(Color::Yellow))),
        label_area,
    );

    let muted = Style::default().fg(Color::DarkGray);
    let status = match &app.status_message {
        Some(message) => Line::from(vec![
            Span::styled(" | ", muted),
            Span::styled(message.clone(), Style::default().fg(Color::White)),
        ]),
        None => Line::from(vec![
            Span::styled(" | ", muted),
            Span::styled(app.current_view.title(), muted),
        ]),
    };
    frame.render_widget(Paragraph::new(status), cols[1]);

    let mut user = Vec::new();
    if app.dev_mode {
        user.push(Span::styled("[dev] ", Style::default().fg(Color::Magenta)));
    }
    match app.user_label() {
        Some(name) => user.push(Span::styled(name.to_string(), Style::default().fg(Color::Cyan))),
        None => user.push(Span::styled("not signed in", muted)),
    }
    frame.render_widget(
        Paragraph::new(Line::from(user)).alignment(Alignment::Right),
        cols[2],
    );
}
