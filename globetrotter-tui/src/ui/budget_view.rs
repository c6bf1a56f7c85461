use super::utils::money;
use super::widgets::controls_bar;
use super::*;
use globetrotter::domain::BudgetCategory;

/// One color per budget category, in `BudgetCategory::ALL` order.
pub const PALETTE: [Color; 5] = [
    Color::Blue,
    Color::Green,
    Color::Yellow,
    Color::Magenta,
    Color::Cyan,
];

fn category_color(category: BudgetCategory) -> Color {
    let idx = BudgetCategory::ALL
        .iter()
        .position(|c| *c == category)
        .unwrap_or(0);
    PALETTE[idx % PALETTE.len()]
}

pub fn render_budget(frame: &mut Frame, app: &App, body: Rect) {
    let Some(budget) = app.budget.as_ref() else {
        return;
    };

    let outer = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Min(10), Constraint::Length(3)])
        .split(body);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White))
        .title(Span::styled(
            format!(
                " Budget: {} ({}) ",
                budget.trip_name,
                money(budget.summary.total_budget)
            ),
            Style::default().fg(Color::White),
        ));
    let inner = block.inner(outer[0]);
    frame.render_widget(block, outer[0]);

    let panels = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(inner);

    let pad = |r: Rect| Rect {
        x: r.x + 2,
        y: r.y,
        width: r.width.saturating_sub(4),
        height: r.height,
    };

    render_pie_panel(frame, app, pad(panels[0]));
    render_entries_panel(frame, app, pad(panels[1]));

    frame.render_widget(
        controls_bar(&[
            ("j/k", "Navigate"),
            ("n", "Add expense"),
            ("r", "Reload"),
            ("Esc", "Back"),
        ]),
        outer[1],
    );
}

fn render_pie_panel(frame: &mut Frame, app: &App, area: Rect) {
    use tui_piechart::{PieChart, PieSlice};

    let Some(budget) = app.budget.as_ref() else {
        return;
    };
    let breakdown = budget.summary.breakdown();

    if breakdown.is_empty() {
        let empty = Paragraph::new("No expenses yet")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, area);
        return;
    }

    let slices: Vec<PieSlice> = breakdown
        .iter()
        .map(|(category, _, pct)| PieSlice::new(category.label(), *pct, category_color(*category)))
        .collect();

    let legend_rows = breakdown.len() as u16 + 1;
    let pie_height = (area.width / 2)
        .min(area.height / 2)
        .min(area.height.saturating_sub(legend_rows));

    let split = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(pie_height), Constraint::Min(0)])
        .split(area);

    let pie = PieChart::new(slices)
        .show_legend(false)
        .show_percentages(false);
    frame.render_widget(pie, split[0]);

    let legend_lines: Vec<Line> = breakdown
        .iter()
        .map(|(category, amount, pct)| {
            Line::from(vec![
                Span::styled("■ ", Style::default().fg(category_color(*category))),
                Span::styled(
                    format!("{}: {} ({:.0}%)", category.label(), money(*amount), pct),
                    Style::default().fg(Color::DarkGray),
                ),
            ])
        })
        .collect();
    let legend = Paragraph::new(legend_lines)
        .alignment(Alignment::Center)
        .block(Block::default().padding(Padding::new(0, 0, 1, 0)));
    frame.render_widget(legend, split[1]);
}

fn render_entries_panel(frame: &mut Frame, app: &App, area: Rect) {
    let Some(budget) = app.budget.as_ref() else {
        return;
    };
    let muted = Style::default().fg(Color::DarkGray);

    let items: Vec<ListItem> = budget
        .entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let style = if i == budget.entry_index {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::White)
            };
            let category = entry.category();
            ListItem::new(Line::from(vec![
                Span::styled("■ ", Style::default().fg(category_color(category))),
                Span::styled(format!("{:>10}", money(entry.amount)), style),
                Span::styled(format!("  {}", category.label()), muted),
                Span::styled(
                    entry
                        .description
                        .as_ref()
                        .map(|d| format!("  {}", d))
                        .unwrap_or_default(),
                    Style::default().fg(Color::Gray),
                ),
            ]))
        })
        .collect();

    let mut state = ListState::default();
    state.select((!budget.entries.is_empty()).then_some(budget.entry_index));
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(muted)
            .title(format!(" Expenses ({}) ", budget.entries.len())),
    );
    frame.render_stateful_widget(list, area, &mut state);
}
