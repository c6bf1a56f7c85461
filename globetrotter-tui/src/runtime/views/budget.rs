use crate::app::{forms, App, View};
use crossterm::event::{KeyCode, KeyEvent};

use super::super::action_queue::{Action, ActionTx};
use super::{back_to_trip, edit_form_input, enqueue_action, is_ctrl};

pub(super) fn handle_budget_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    let Some(trip_id) = app.budget.as_ref().map(|b| b.trip_id) else {
        back_to_trip(app);
        return;
    };

    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.select_next_budget_entry(),
        KeyCode::Char('k') | KeyCode::Up => app.select_previous_budget_entry(),
        KeyCode::Char('n') => app.open_budget_form(),
        KeyCode::Char('r') => enqueue_action(action_tx, Action::OpenBudget { trip_id }),
        KeyCode::Esc => back_to_trip(app),
        KeyCode::Char('q') | KeyCode::Char('Q') => app.quit(),
        _ => {}
    }
}

pub(super) fn handle_budget_form_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    if is_ctrl(&key, 't') {
        app.budget_category = app.budget_category.next();
        return;
    }

    match key.code {
        KeyCode::Enter => {
            let Some(trip_id) = app.budget.as_ref().map(|b| b.trip_id) else {
                return;
            };
            match forms::budget_payload(&app.budget_form, app.budget_category) {
                Ok(entry) => {
                    app.budget_form.error = None;
                    enqueue_action(action_tx, Action::AddBudgetEntry { trip_id, entry });
                }
                Err(message) => app.budget_form.set_error(message),
            }
        }
        KeyCode::Esc => app.navigate_to(View::Budget),
        _ => {
            edit_form_input(key, &mut app.budget_form);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::test_support::*;
    use crate::app::BudgetState;
    use crate::runtime::action_queue::channel;
    use crossterm::event::KeyModifiers;
    use globetrotter::domain::BudgetCategory;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn budget_app() -> App {
        let mut app = app_with_detail();
        app.budget = Some(BudgetState {
            trip_id: 1,
            trip_name: "Portugal by train".into(),
            summary: Default::default(),
            entries: vec![],
            entry_index: 0,
        });
        app.navigate_to(View::Budget);
        app
    }

    #[test]
    fn entry_form_submits_with_chosen_category() {
        let mut app = budget_app();
        let (tx, mut rx) = channel();
        handle_budget_key(key(KeyCode::Char('n')), &mut app, &tx);
        assert_eq!(app.current_view, View::BudgetEntryForm);

        handle_budget_form_key(
            KeyEvent::new(KeyCode::Char('t'), KeyModifiers::CONTROL),
            &mut app,
            &tx,
        );
        for c in "42.5".chars() {
            handle_budget_form_key(key(KeyCode::Char(c)), &mut app, &tx);
        }
        handle_budget_form_key(key(KeyCode::Enter), &mut app, &tx);

        match rx.try_recv().ok() {
            Some(Action::AddBudgetEntry { trip_id, entry }) => {
                assert_eq!(trip_id, 1);
                assert_eq!(entry.amount, 42.5);
                assert_eq!(entry.category, BudgetCategory::Transport.next());
            }
            other => panic!("unexpected action: {:?}", other),
        }
    }

    #[test]
    fn invalid_amount_is_reported_inline() {
        let mut app = budget_app();
        app.open_budget_form();
        app.budget_form.set_value(forms::budget::AMOUNT, "lots");
        let (tx, mut rx) = channel();

        handle_budget_form_key(key(KeyCode::Enter), &mut app, &tx);

        assert!(rx.try_recv().is_err());
        assert_eq!(
            app.budget_form.error.as_deref(),
            Some("Amount must be a number")
        );
    }

    #[test]
    fn esc_walks_back_to_the_trip() {
        let mut app = budget_app();
        app.open_budget_form();
        let (tx, _rx) = channel();
        handle_budget_form_key(key(KeyCode::Esc), &mut app, &tx);
        assert_eq!(app.current_view, View::Budget);
        handle_budget_key(key(KeyCode::Esc), &mut app, &tx);
        assert_eq!(app.current_view, View::TripDetail);
    }
}
