use crate::app::App;
use crossterm::event::{KeyCode, KeyEvent};

use super::back_to_trip;

pub(super) fn handle_timeline_key(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.scroll_timeline(true),
        KeyCode::Char('k') | KeyCode::Up => app.scroll_timeline(false),
        KeyCode::Esc => back_to_trip(app),
        KeyCode::Char('q') | KeyCode::Char('Q') => app.quit(),
        _ => {}
    }
}
