use crate::app::{App, View};
use crossterm::event::{KeyCode, KeyEvent};

use super::super::action_queue::{Action, ActionTx};
use super::enqueue_action;

/// The public itinerary is reachable without a session. Esc leads a
/// logged-out reader to the login form.
pub(super) fn handle_shared_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.scroll_shared(true),
        KeyCode::Char('k') | KeyCode::Up => app.scroll_shared(false),
        KeyCode::Char('r') => {
            if let Some(trip_id) = app.shared_trip_id {
                enqueue_action(action_tx, Action::LoadShared { trip_id });
            }
        }
        KeyCode::Esc => {
            if !app.is_logged_in() {
                app.navigate_to(View::Login);
            } else if app.detail.is_some() {
                app.navigate_to(View::TripDetail);
            } else {
                app.navigate_to(View::Dashboard);
                enqueue_action(action_tx, Action::LoadDashboard);
            }
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => app.quit(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::test_support::*;
    use crate::runtime::action_queue::channel;
    use crossterm::event::KeyModifiers;

    fn esc() -> KeyEvent {
        KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)
    }

    #[test]
    fn esc_without_session_offers_login() {
        let mut app = logged_out_app();
        app.navigate_to(View::Shared);
        let (tx, mut rx) = channel();
        handle_shared_key(esc(), &mut app, &tx);
        assert_eq!(app.current_view, View::Login);
        assert!(app.running);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn esc_returns_to_open_trip() {
        let mut app = app_with_detail();
        app.navigate_to(View::Shared);
        let (tx, mut rx) = channel();
        handle_shared_key(esc(), &mut app, &tx);
        assert_eq!(app.current_view, View::TripDetail);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn reload_uses_remembered_trip() {
        let mut app = logged_out_app();
        app.shared_trip_id = Some(5);
        app.navigate_to(View::Shared);
        let (tx, mut rx) = channel();
        handle_shared_key(
            KeyEvent::new(KeyCode::Char('r'), KeyModifiers::NONE),
            &mut app,
            &tx,
        );
        assert_eq!(rx.try_recv().ok(), Some(Action::LoadShared { trip_id: 5 }));
    }
}
