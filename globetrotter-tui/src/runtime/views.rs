use crate::app::{App, Form, TextInput, View};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::action_queue::{Action, ActionTx};

mod auth;
mod budget;
mod confirm;
mod dashboard;
mod profile;
mod search;
mod shared;
mod timeline;
mod trip_detail;
mod trip_form;

fn enqueue_action(action_tx: &ActionTx, action: Action) {
    let _ = action_tx.send(action);
}

fn is_ctrl(key: &KeyEvent, c: char) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char(c)
}

/// Apply an editing key to a single-line input. Returns false when the key is
/// not an editing key.
fn edit_text_input(key: KeyEvent, input: &mut TextInput) -> bool {
    match key.code {
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => input.insert(c),
        KeyCode::Backspace => input.backspace(),
        KeyCode::Left => input.move_left(),
        KeyCode::Right => input.move_right(),
        KeyCode::Home => input.home(),
        KeyCode::End => input.end(),
        _ => return false,
    }
    true
}

/// Field navigation plus editing of the focused field.
fn edit_form_input(key: KeyEvent, form: &mut Form) -> bool {
    match key.code {
        KeyCode::Tab | KeyCode::Down => {
            form.next_field();
            true
        }
        KeyCode::BackTab | KeyCode::Up => {
            form.previous_field();
            true
        }
        _ => form
            .focused_input_mut()
            .is_some_and(|input| edit_text_input(key, input)),
    }
}

pub(super) fn handle_view_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    if is_ctrl(&key, 'c') {
        app.quit();
        return;
    }

    match app.current_view {
        View::Login => auth::handle_login_key(key, app, action_tx),
        View::Register => auth::handle_register_key(key, app, action_tx),
        View::Dashboard => dashboard::handle_dashboard_key(key, app, action_tx),
        View::TripForm => trip_form::handle_trip_form_key(key, app, action_tx),
        View::TripDetail => trip_detail::handle_trip_detail_key(key, app, action_tx),
        View::CityPicker => search::handle_city_picker_key(key, app, action_tx),
        View::ActivityPicker => search::handle_activity_picker_key(key, app, action_tx),
        View::Cities => search::handle_cities_key(key, app, action_tx),
        View::Timeline => timeline::handle_timeline_key(key, app),
        View::Budget => budget::handle_budget_key(key, app, action_tx),
        View::BudgetEntryForm => budget::handle_budget_form_key(key, app, action_tx),
        View::Profile => profile::handle_profile_key(key, app, action_tx),
        View::Shared => shared::handle_shared_key(key, app, action_tx),
        View::Confirm => confirm::handle_confirm_key(key, app, action_tx),
    }
}

/// Where Esc goes from views opened off a trip.
fn back_to_trip(app: &mut App) {
    if app.detail.is_some() {
        app.navigate_to(View::TripDetail);
    } else {
        app.navigate_to(View::Dashboard);
    }
}
