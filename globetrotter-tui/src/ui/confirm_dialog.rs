use super::utils::centered_rect;
use super::*;
use crate::app::ConfirmKind;

pub fn render_confirm_dialog(frame: &mut Frame, app: &mut App, body: Rect) {
    // Extract owned values before borrowing `app` mutably for background render
    let Some((origin, title, label, detail)) = app.confirm.as_ref().map(|ctx| {
        let detail = match ctx.kind {
            ConfirmKind::DeleteTrip { .. } => "The trip, its stops and budget will be deleted",
            ConfirmKind::DeleteStop { .. } => "The stop and its activities will be removed",
            ConfirmKind::RemoveStopActivity { .. } => "The activity will be removed from this stop",
            ConfirmKind::Logout => "You will need to log in again",
            ConfirmKind::DeleteAccount => "Your saved session will be removed from this device",
        };
        (ctx.origin, ctx.title.clone(), ctx.label.clone(), detail)
    }) else {
        return;
    };

    if origin != View::Confirm {
        super::render_view(frame, app, origin, body);
    }

    let area = centered_rect(56, 9, frame.area());
    frame.render_widget(Clear, area);

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(label, Style::default().fg(Color::White))),
        Line::from(Span::styled(detail, Style::default().fg(Color::DarkGray))),
        Line::from(""),
        Line::from(vec![
            Span::styled("[y] Yes", Style::default().fg(Color::Red)),
            Span::raw("    "),
            Span::styled("[n] No", Style::default().fg(Color::White)),
        ]),
    ];

    let paragraph = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", title))
                .padding(Padding::horizontal(1)),
        )
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}
