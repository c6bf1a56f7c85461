//! Pickers and the city explorer share one input model: the search box owns
//! the keyboard until Tab moves focus to the result list.

use crate::app::{App, CitySearchTarget, SearchState, View};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::super::action_queue::{Action, ActionTx};
use super::{back_to_trip, edit_text_input, enqueue_action, is_ctrl};

enum SearchKey {
    /// The query text changed.
    Edited,
    Handled,
    Unhandled,
}

fn handle_search_input<T>(key: KeyEvent, search: &mut SearchState<T>) -> SearchKey {
    if is_ctrl(&key, 'x') {
        search.input.clear();
        search.list_focused = false;
        return SearchKey::Edited;
    }

    match key.code {
        KeyCode::Tab => search.list_focused = true,
        KeyCode::BackTab => search.list_focused = false,
        KeyCode::Down => search.select_next(),
        KeyCode::Up => search.select_previous(),
        KeyCode::Char('j') if search.list_focused => search.select_next(),
        KeyCode::Char('k') if search.list_focused => {
            if search.index == 0 {
                search.list_focused = false;
            } else {
                search.select_previous();
            }
        }
        KeyCode::Char(_) | KeyCode::Backspace
            if !key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            search.list_focused = false;
            edit_text_input(key, &mut search.input);
            search.index = 0;
            return SearchKey::Edited;
        }
        _ => {
            if !edit_text_input(key, &mut search.input) {
                return SearchKey::Unhandled;
            }
        }
    }
    SearchKey::Handled
}

fn city_search_edited(app: &mut App, target: CitySearchTarget, action_tx: &ActionTx) {
    if let Some(query) = app.city_search_changed(target) {
        enqueue_action(action_tx, Action::SearchCities { target, query });
    }
}

pub(super) fn handle_city_picker_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    match handle_search_input(key, &mut app.city_picker) {
        SearchKey::Edited => city_search_edited(app, CitySearchTarget::Picker, action_tx),
        SearchKey::Handled => {}
        SearchKey::Unhandled => match key.code {
            KeyCode::Enter => {
                if let Some(city) = app.city_picker.selected() {
                    enqueue_action(action_tx, Action::AddStop { city_id: city.id });
                }
            }
            KeyCode::Esc => back_to_trip(app),
            _ => {}
        },
    }
}

pub(super) fn handle_cities_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    match handle_search_input(key, &mut app.cities) {
        SearchKey::Edited => city_search_edited(app, CitySearchTarget::Explorer, action_tx),
        SearchKey::Handled => {}
        SearchKey::Unhandled => match key.code {
            KeyCode::Enter => app.cities.list_focused = !app.cities.list_focused,
            KeyCode::Esc => app.navigate_to(View::Dashboard),
            _ => {}
        },
    }
}

pub(super) fn handle_activity_picker_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    if is_ctrl(&key, 't') {
        if let Some((query, category)) = app.cycle_activity_category() {
            enqueue_action(action_tx, Action::SearchActivities { query, category });
        }
        return;
    }

    match handle_search_input(key, &mut app.activity_picker.search) {
        SearchKey::Edited => {
            if let Some((query, category)) = app.activity_search_changed() {
                enqueue_action(action_tx, Action::SearchActivities { query, category });
            }
        }
        SearchKey::Handled => {}
        SearchKey::Unhandled => match key.code {
            KeyCode::Enter => {
                let stop_id = app.activity_picker.stop_id;
                let activity = app.activity_picker.search.selected().cloned();
                if let (Some(stop_id), Some(activity)) = (stop_id, activity) {
                    enqueue_action(action_tx, Action::AddActivityToStop { stop_id, activity });
                }
            }
            KeyCode::Esc => back_to_trip(app),
            _ => {}
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::test_support::*;
    use crate::runtime::action_queue::channel;
    use globetrotter::domain::{ActivityCategory, City};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn city(id: i64, name: &str) -> City {
        serde_json::from_value(serde_json::json!({
            "id": id, "name": name, "country": "Portugal"
        }))
        .unwrap()
    }

    fn type_text(
        app: &mut App,
        text: &str,
        handler: fn(KeyEvent, &mut App, &ActionTx),
        tx: &ActionTx,
    ) {
        for c in text.chars() {
            handler(key(KeyCode::Char(c)), app, tx);
        }
    }

    #[test]
    fn single_character_never_reaches_the_api() {
        let mut app = app_with_detail();
        app.open_city_picker();
        let (tx, mut rx) = channel();

        type_text(&mut app, "l", handle_city_picker_key, &tx);
        assert!(rx.try_recv().is_err());
        assert!(app.city_picker.results.is_empty());

        type_text(&mut app, "i", handle_city_picker_key, &tx);
        assert_eq!(
            rx.try_recv().ok(),
            Some(Action::SearchCities {
                target: CitySearchTarget::Picker,
                query: "li".into()
            })
        );
    }

    #[test]
    fn whitespace_query_browses_instead_of_searching() {
        let mut app = logged_in_app();
        app.open_city_explorer();
        app.set_city_catalog(vec![city(1, "Lisbon"), city(2, "Porto")]);
        let (tx, mut rx) = channel();

        type_text(&mut app, "   ", handle_cities_key, &tx);

        assert!(rx.try_recv().is_err());
        assert_eq!(app.cities.results.len(), 2);
    }

    #[test]
    fn enter_adds_highlighted_city_as_stop() {
        let mut app = app_with_detail();
        app.open_city_picker();
        app.city_picker.set_results(vec![city(1, "Lisbon"), city(2, "Porto")]);
        let (tx, mut rx) = channel();

        handle_city_picker_key(key(KeyCode::Tab), &mut app, &tx);
        handle_city_picker_key(key(KeyCode::Char('j')), &mut app, &tx);
        handle_city_picker_key(key(KeyCode::Enter), &mut app, &tx);

        assert_eq!(rx.try_recv().ok(), Some(Action::AddStop { city_id: 2 }));
    }

    #[test]
    fn category_cycle_searches_only_with_a_query() {
        let mut app = app_with_detail();
        app.open_activity_picker(201);
        let (tx, mut rx) = channel();

        handle_activity_picker_key(
            KeyEvent::new(KeyCode::Char('t'), KeyModifiers::CONTROL),
            &mut app,
            &tx,
        );
        assert!(rx.try_recv().is_err());
        assert_eq!(
            app.activity_picker.category,
            Some(ActivityCategory::SELECTABLE[0])
        );

        type_text(&mut app, "to", handle_activity_picker_key, &tx);
        assert_eq!(
            rx.try_recv().ok(),
            Some(Action::SearchActivities {
                query: "to".into(),
                category: Some(ActivityCategory::SELECTABLE[0])
            })
        );

        handle_activity_picker_key(
            KeyEvent::new(KeyCode::Char('t'), KeyModifiers::CONTROL),
            &mut app,
            &tx,
        );
        assert_eq!(
            rx.try_recv().ok(),
            Some(Action::SearchActivities {
                query: "to".into(),
                category: Some(ActivityCategory::SELECTABLE[1])
            })
        );
    }

    #[test]
    fn esc_returns_to_trip() {
        let mut app = app_with_detail();
        app.open_activity_picker(201);
        let (tx, _rx) = channel();
        handle_activity_picker_key(key(KeyCode::Esc), &mut app, &tx);
        assert_eq!(app.current_view, View::TripDetail);
    }
}
