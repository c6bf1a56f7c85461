use super::utils::centered_rect;
use super::widgets::{controls_bar, input_text};
use super::*;
use crate::app::Form;

fn render_form(
    frame: &mut Frame,
    body: Rect,
    title: &str,
    form: &Form,
    extra: Vec<Line<'static>>,
    keys: &[(&'static str, &'static str)],
) {
    let height = (form.fields.len() as u16) * 3 + extra.len() as u16 + 6;
    let area = centered_rect(64.min(body.width), height.min(body.height), body);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(area);

    let label_width = form
        .fields
        .iter()
        .map(|f| f.label.len())
        .max()
        .unwrap_or(0)
        + 2;

    let mut lines = vec![Line::from("")];
    for (i, field) in form.fields.iter().enumerate() {
        let focused = i == form.focused;
        let label_style = if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let value = if field.input.value.is_empty() && !focused {
            Span::styled(field.placeholder, Style::default().fg(Color::DarkGray))
        } else {
            let style = if focused {
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            Span::styled(input_text(&field.input, focused, field.masked), style)
        };
        lines.push(Line::from(vec![
            Span::styled(
                format!("{:<width$}", format!("{}:", field.label), width = label_width),
                label_style,
            ),
            value,
        ]));
        lines.push(Line::from(""));
    }
    lines.extend(extra);

    if let Some(err) = &form.error {
        lines.push(Line::from(Span::styled(
            err.clone(),
            Style::default().fg(Color::Red),
        )));
    }

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White))
                .title(format!(" {} ", title))
                .padding(Padding::horizontal(2)),
        );
    frame.render_widget(paragraph, chunks[0]);
    frame.render_widget(controls_bar(keys), chunks[1]);
}

pub fn render_login(frame: &mut Frame, app: &App, body: Rect) {
    render_form(
        frame,
        body,
        "Log in",
        &app.login_form,
        vec![],
        &[
            ("Tab", "Next field"),
            ("Enter", "Log in"),
            ("Ctrl+R", "Register"),
            ("Esc", "Quit"),
        ],
    );
}

pub fn render_register(frame: &mut Frame, app: &App, body: Rect) {
    render_form(
        frame,
        body,
        "Create account",
        &app.register_form,
        vec![],
        &[
            ("Tab", "Next field"),
            ("Enter", "Register"),
            ("Esc", "Back to login"),
        ],
    );
}

pub fn render_trip_form(frame: &mut Frame, app: &App, body: Rect) {
    let title = if app.editing_trip_id.is_some() {
        "Edit trip"
    } else {
        "New trip"
    };
    render_form(
        frame,
        body,
        title,
        &app.trip_form,
        vec![],
        &[("Tab", "Next field"), ("Enter", "Save"), ("Esc", "Cancel")],
    );
}

pub fn render_budget_form(frame: &mut Frame, app: &App, body: Rect) {
    let trip_name = app
        .budget
        .as_ref()
        .map(|b| b.trip_name.clone())
        .unwrap_or_default();
    let extra = vec![
        Line::from(vec![
            Span::styled("Category: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("< {} >", app.budget_category.label()),
                Style::default().fg(Color::Cyan),
            ),
        ]),
        Line::from(""),
    ];
    render_form(
        frame,
        body,
        &format!("Add expense: {}", trip_name),
        &app.budget_form,
        extra,
        &[
            ("Tab", "Next field"),
            ("Ctrl+T", "Category"),
            ("Enter", "Add"),
            ("Esc", "Cancel"),
        ],
    );
}

pub fn render_profile(frame: &mut Frame, app: &App, body: Rect) {
    let muted = Style::default().fg(Color::DarkGray);
    let mut extra = Vec::new();
    if let Some(user) = app.session.as_ref().map(|s| &s.user) {
        extra.push(Line::from(Span::styled(
            "Email changes are kept on this device only.",
            muted,
        )));
        if let Some(username) = &user.username {
            extra.push(Line::from(vec![
                Span::styled("Username: ", muted),
                Span::styled(username.clone(), Style::default().fg(Color::White)),
            ]));
        }
        if let Some(created) = &user.created_at {
            extra.push(Line::from(vec![
                Span::styled("Member since: ", muted),
                Span::styled(utils::format_day(created), Style::default().fg(Color::White)),
            ]));
        }
        extra.push(Line::from(""));
    }
    render_form(
        frame,
        body,
        "Profile",
        &app.profile_form,
        extra,
        &[
            ("Enter", "Save"),
            ("Ctrl+O", "Log out"),
            ("Ctrl+D", "Delete account"),
            ("Esc", "Back"),
        ],
    );
}
