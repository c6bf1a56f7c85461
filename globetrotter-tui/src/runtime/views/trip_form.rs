use crate::app::{forms, App};
use crossterm::event::{KeyCode, KeyEvent};

use super::super::action_queue::{Action, ActionTx};
use super::{back_to_trip, edit_form_input, enqueue_action};

pub(super) fn handle_trip_form_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    match key.code {
        KeyCode::Enter => submit(app, action_tx),
        KeyCode::Esc => {
            let editing_open_trip = app
                .editing_trip_id
                .is_some_and(|id| app.detail.as_ref().is_some_and(|d| d.trip.id == id));
            app.editing_trip_id = None;
            if editing_open_trip {
                back_to_trip(app);
            } else {
                app.navigate_to(crate::app::View::Dashboard);
            }
        }
        _ => {
            edit_form_input(key, &mut app.trip_form);
        }
    }
}

fn submit(app: &mut App, action_tx: &ActionTx) {
    let action = match app.editing_trip_id {
        Some(trip_id) => forms::trip_update_payload(&app.trip_form)
            .map(|update| Action::UpdateTrip { trip_id, update }),
        None => forms::trip_payload(&app.trip_form).map(Action::CreateTrip),
    };
    match action {
        Ok(action) => {
            app.trip_form.error = None;
            enqueue_action(action_tx, action);
        }
        Err(message) => app.trip_form.set_error(message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::test_support::*;
    use crate::app::View;
    use crate::runtime::action_queue::channel;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn fill(app: &mut App, name: &str, start: &str, end: &str) {
        app.trip_form.set_value(forms::trip::NAME, name);
        app.trip_form.set_value(forms::trip::START, start);
        app.trip_form.set_value(forms::trip::END, end);
    }

    #[test]
    fn valid_new_trip_is_created() {
        let mut app = logged_in_app();
        app.open_new_trip_form();
        fill(&mut app, "Alps", "2024-07-01", "2024-07-10");
        let (tx, mut rx) = channel();

        handle_trip_form_key(key(KeyCode::Enter), &mut app, &tx);

        match rx.try_recv().ok() {
            Some(Action::CreateTrip(trip)) => {
                assert_eq!(trip.name, "Alps");
                assert_eq!(trip.start_date.format("%Y-%m-%d").to_string(), "2024-07-01");
            }
            other => panic!("unexpected action: {:?}", other),
        }
    }

    #[test]
    fn end_before_start_is_rejected_locally() {
        let mut app = logged_in_app();
        app.open_new_trip_form();
        fill(&mut app, "Alps", "2024-07-10", "2024-07-01");
        let (tx, mut rx) = channel();

        handle_trip_form_key(key(KeyCode::Enter), &mut app, &tx);

        assert!(rx.try_recv().is_err());
        assert_eq!(
            app.trip_form.error.as_deref(),
            Some("End date must not be before the start date")
        );
    }

    #[test]
    fn editing_sends_an_update() {
        let mut app = logged_in_app();
        app.open_edit_trip_form(&trip(4, "Lisbon weekend"));
        let (tx, mut rx) = channel();

        handle_trip_form_key(key(KeyCode::Enter), &mut app, &tx);

        match rx.try_recv().ok() {
            Some(Action::UpdateTrip { trip_id, update }) => {
                assert_eq!(trip_id, 4);
                assert_eq!(update.name.as_deref(), Some("Lisbon weekend"));
            }
            other => panic!("unexpected action: {:?}", other),
        }
    }

    #[test]
    fn esc_returns_to_dashboard() {
        let mut app = logged_in_app();
        app.open_new_trip_form();
        let (tx, _rx) = channel();
        handle_trip_form_key(key(KeyCode::Esc), &mut app, &tx);
        assert_eq!(app.current_view, View::Dashboard);
    }
}
