use chrono::NaiveDateTime;
use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Helper function to create a centered rectangle
pub fn centered_rect(width: u16, height: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((r.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((r.height.saturating_sub(height)) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((r.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((r.width.saturating_sub(width)) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// `Jun 01, 2024`
pub fn format_day(value: &NaiveDateTime) -> String {
    value.format("%b %d, %Y").to_string()
}

/// `Jun 01 - Jun 04, 2024`
pub fn format_range(start: &NaiveDateTime, end: &NaiveDateTime) -> String {
    format!("{} - {}", start.format("%b %d"), format_day(end))
}

pub fn money(amount: f64) -> String {
    format!("${:.2}", amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(month: u32, day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, month, day)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn date_range_formatting() {
        assert_eq!(format_range(&at(6, 1), &at(6, 4)), "Jun 01 - Jun 04, 2024");
        assert_eq!(money(810.0), "$810.00");
    }

    #[test]
    fn centered_rect_fits_inside_area() {
        let area = Rect::new(0, 0, 100, 40);
        let popup = centered_rect(52, 10, area);
        assert_eq!(popup, Rect::new(24, 15, 52, 10));
    }
}
