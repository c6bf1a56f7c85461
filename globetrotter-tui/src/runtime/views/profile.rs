use crate::app::{forms, App, ConfirmKind, View};
use crossterm::event::{KeyCode, KeyEvent};

use super::super::action_queue::{Action, ActionTx};
use super::{edit_form_input, enqueue_action, is_ctrl};

pub(super) fn handle_profile_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    let label = app.user_label().unwrap_or_default().to_string();
    if is_ctrl(&key, 'o') {
        app.open_confirm(ConfirmKind::Logout, "Log out?", label);
        return;
    }
    if is_ctrl(&key, 'd') {
        app.open_confirm(
            ConfirmKind::DeleteAccount,
            "Remove this account from the device?",
            label,
        );
        return;
    }

    match key.code {
        KeyCode::Enter => match forms::profile_payload(&app.profile_form) {
            Ok(edit) => {
                app.profile_form.error = None;
                enqueue_action(action_tx, Action::SaveProfile(edit));
            }
            Err(message) => app.profile_form.set_error(message),
        },
        KeyCode::Esc => app.navigate_to(View::Dashboard),
        _ => {
            edit_form_input(key, &mut app.profile_form);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::test_support::*;
    use crate::runtime::action_queue::channel;
    use crossterm::event::KeyModifiers;

    #[test]
    fn profile_opens_with_current_name_and_saves_it() {
        let mut app = logged_in_app();
        app.open_profile();
        assert_eq!(app.profile_form.value(forms::profile::NAME), "Ada Lovelace");
        let (tx, mut rx) = channel();

        handle_profile_key(KeyEvent::new(KeyCode::Char('!'), KeyModifiers::NONE), &mut app, &tx);
        handle_profile_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE), &mut app, &tx);

        match rx.try_recv().ok() {
            Some(Action::SaveProfile(edit)) => {
                assert_eq!(edit.update.full_name.as_deref(), Some("Ada Lovelace!"));
                assert_eq!(edit.email, "ada@example.com");
            }
            other => panic!("unexpected action: {:?}", other),
        }
    }

    #[test]
    fn ctrl_d_asks_before_removing_account() {
        let mut app = logged_in_app();
        app.open_profile();
        let (tx, mut rx) = channel();
        handle_profile_key(
            KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL),
            &mut app,
            &tx,
        );
        assert!(rx.try_recv().is_err());
        assert_eq!(app.current_view, View::Confirm);
        assert_eq!(
            app.confirm.as_ref().map(|c| c.kind.clone()),
            Some(ConfirmKind::DeleteAccount)
        );
    }
}
