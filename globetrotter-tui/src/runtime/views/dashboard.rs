use crate::app::{App, ConfirmKind};
use crossterm::event::{KeyCode, KeyEvent};

use super::super::action_queue::{Action, ActionTx};
use super::{edit_text_input, enqueue_action};

pub(super) fn handle_dashboard_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    if app.trip_filter_focused {
        handle_filter_key(key, app);
        return;
    }

    match key.code {
        KeyCode::Char('/') => app.trip_filter_focused = true,
        KeyCode::Char('j') | KeyCode::Down => app.select_next_trip(),
        KeyCode::Char('k') | KeyCode::Up => app.select_previous_trip(),
        KeyCode::Enter => {
            if let Some(trip) = app.selected_trip() {
                enqueue_action(action_tx, Action::OpenTrip { trip_id: trip.id });
            }
        }
        KeyCode::Char('n') => app.open_new_trip_form(),
        KeyCode::Char('e') => {
            if let Some(trip) = app.selected_trip().cloned() {
                app.open_edit_trip_form(&trip);
            }
        }
        KeyCode::Char('d') => {
            if let Some(trip) = app.selected_trip().cloned() {
                app.open_confirm(
                    ConfirmKind::DeleteTrip { trip_id: trip.id },
                    "Delete trip?",
                    trip.name,
                );
            }
        }
        KeyCode::Char('c') => {
            app.open_city_explorer();
            enqueue_action(action_tx, Action::LoadCityCatalog);
        }
        KeyCode::Char('p') => app.open_profile(),
        KeyCode::Char('L') => {
            let label = app.user_label().unwrap_or_default().to_string();
            app.open_confirm(ConfirmKind::Logout, "Log out?", label);
        }
        KeyCode::Char('r') => enqueue_action(action_tx, Action::LoadDashboard),
        KeyCode::Esc if !app.trip_filter.value.is_empty() => {
            app.trip_filter.clear();
            app.refresh_trip_filter();
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => app.quit(),
        _ => {}
    }
}

fn handle_filter_key(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Esc => {
            app.trip_filter.clear();
            app.trip_filter_focused = false;
            app.refresh_trip_filter();
        }
        KeyCode::Enter => app.trip_filter_focused = false,
        KeyCode::Down => app.select_next_trip(),
        KeyCode::Up => app.select_previous_trip(),
        _ => {
            if edit_text_input(key, &mut app.trip_filter) {
                app.trip_index = 0;
                app.refresh_trip_filter();
            }
        }
    }
}
