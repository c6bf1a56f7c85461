use crate::app::{forms, App, View};
use crossterm::event::{KeyCode, KeyEvent};

use super::super::action_queue::{Action, ActionTx};
use super::{edit_form_input, enqueue_action, is_ctrl};

pub(super) fn handle_login_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    if is_ctrl(&key, 'r') {
        app.register_form.clear();
        app.navigate_to(View::Register);
        return;
    }

    match key.code {
        KeyCode::Enter => match forms::login_credentials(&app.login_form) {
            Ok(credentials) => {
                app.login_form.error = None;
                enqueue_action(action_tx, Action::SubmitLogin(credentials));
            }
            Err(message) => app.login_form.set_error(message),
        },
        KeyCode::Esc => app.quit(),
        _ => {
            edit_form_input(key, &mut app.login_form);
        }
    }
}

pub(super) fn handle_register_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    match key.code {
        KeyCode::Enter => match forms::register_payload(&app.register_form) {
            Ok(new_user) => {
                app.register_form.error = None;
                enqueue_action(action_tx, Action::SubmitRegister(new_user));
            }
            Err(message) => app.register_form.set_error(message),
        },
        KeyCode::Esc => app.navigate_to(View::Login),
        _ => {
            edit_form_input(key, &mut app.register_form);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::test_support::*;
    use crate::runtime::action_queue::channel;
    use crossterm::event::KeyModifiers;
    use globetrotter::Credentials;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn enter_submits_valid_credentials() {
        let mut app = logged_out_app();
        app.login_form.set_value(forms::login::EMAIL, "ada@example.com");
        app.login_form.set_value(forms::login::PASSWORD, "hunter22");
        let (tx, mut rx) = channel();

        handle_login_key(key(KeyCode::Enter), &mut app, &tx);

        assert_eq!(
            rx.try_recv().ok(),
            Some(Action::SubmitLogin(Credentials::new(
                "ada@example.com",
                "hunter22"
            )))
        );
    }

    #[test]
    fn missing_password_stays_local() {
        let mut app = logged_out_app();
        app.login_form.set_value(forms::login::EMAIL, "ada@example.com");
        let (tx, mut rx) = channel();

        handle_login_key(key(KeyCode::Enter), &mut app, &tx);

        assert!(rx.try_recv().is_err());
        assert_eq!(app.login_form.error.as_deref(), Some("Password is required"));
    }

    #[test]
    fn mismatched_passwords_block_registration() {
        let mut app = logged_out_app();
        app.navigate_to(View::Register);
        app.register_form.set_value(forms::register::NAME, "Ada");
        app.register_form.set_value(forms::register::EMAIL, "ada@example.com");
        app.register_form.set_value(forms::register::PASSWORD, "secret1");
        app.register_form.set_value(forms::register::CONFIRM, "secret2");
        let (tx, mut rx) = channel();

        handle_register_key(key(KeyCode::Enter), &mut app, &tx);

        assert!(rx.try_recv().is_err());
        assert_eq!(
            app.register_form.error.as_deref(),
            Some("Passwords do not match")
        );
    }

    #[test]
    fn ctrl_r_switches_to_registration() {
        let mut app = logged_out_app();
        let (tx, _rx) = channel();
        handle_login_key(
            KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL),
            &mut app,
            &tx,
        );
        assert_eq!(app.current_view, View::Register);

        handle_register_key(key(KeyCode::Esc), &mut app, &tx);
        assert_eq!(app.current_view, View::Login);
    }
}
