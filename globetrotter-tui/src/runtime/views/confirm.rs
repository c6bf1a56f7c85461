use crate::app::App;
use crossterm::event::{KeyCode, KeyEvent};

use super::super::action_queue::{Action, ActionTx};
use super::enqueue_action;

pub(super) fn handle_confirm_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
            enqueue_action(action_tx, Action::ConfirmPending);
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            app.close_confirm();
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::test_support::*;
    use crate::app::{ConfirmKind, View};
    use crate::runtime::action_queue::channel;
    use crossterm::event::KeyModifiers;

    #[test]
    fn cancel_returns_to_origin_without_acting() {
        let mut app = app_with_detail();
        app.open_confirm(
            ConfirmKind::DeleteStop {
                trip_id: 1,
                stop_id: 201,
            },
            "Remove stop?",
            "Lisbon".into(),
        );
        let (tx, mut rx) = channel();

        handle_confirm_key(KeyEvent::new(KeyCode::Char('n'), KeyModifiers::NONE), &mut app, &tx);

        assert!(rx.try_recv().is_err());
        assert!(app.confirm.is_none());
        assert_eq!(app.current_view, View::TripDetail);
        assert_eq!(app.detail.as_ref().unwrap().stops.len(), 2);
    }

    #[test]
    fn yes_queues_the_pending_action() {
        let mut app = app_with_detail();
        app.open_confirm(ConfirmKind::Logout, "Log out?", "Ada".into());
        let (tx, mut rx) = channel();
        handle_confirm_key(KeyEvent::new(KeyCode::Char('y'), KeyModifiers::NONE), &mut app, &tx);
        assert_eq!(rx.try_recv().ok(), Some(Action::ConfirmPending));
    }
}
