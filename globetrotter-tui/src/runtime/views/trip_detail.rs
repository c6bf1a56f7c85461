use crate::app::{App, ConfirmKind, View};
use crossterm::event::{KeyCode, KeyEvent};

use super::super::action_queue::{Action, ActionTx};
use super::enqueue_action;

pub(super) fn handle_trip_detail_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    let Some(detail) = app.detail.as_ref() else {
        app.navigate_to(View::Dashboard);
        return;
    };
    let trip = detail.trip.clone();
    let stop = detail.selected_stop().map(|s| (s.id, s.city_name()));
    let item = detail.selected_activity().map(|a| (a.id, a.name()));

    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.select_next_stop(),
        KeyCode::Char('k') | KeyCode::Up => app.select_previous_stop(),
        KeyCode::Char('l') | KeyCode::Right => app.cycle_stop_activity(true),
        KeyCode::Char('h') | KeyCode::Left => app.cycle_stop_activity(false),
        KeyCode::Char('s') => app.open_city_picker(),
        KeyCode::Char('a') => {
            if let Some((stop_id, _)) = stop {
                app.open_activity_picker(stop_id);
                enqueue_action(action_tx, Action::LoadActivityCatalog);
            } else {
                app.set_status("Add a stop before adding activities");
            }
        }
        KeyCode::Char('d') => match (stop, item) {
            (Some((stop_id, _)), Some((item_id, name))) => app.open_confirm(
                ConfirmKind::RemoveStopActivity {
                    trip_id: trip.id,
                    stop_id,
                    item_id,
                },
                "Remove activity?",
                name,
            ),
            (Some((stop_id, city)), None) => app.open_confirm(
                ConfirmKind::DeleteStop {
                    trip_id: trip.id,
                    stop_id,
                },
                "Remove stop?",
                city,
            ),
            _ => {}
        },
        KeyCode::Char('D') => app.open_confirm(
            ConfirmKind::DeleteTrip { trip_id: trip.id },
            "Delete trip?",
            trip.name,
        ),
        KeyCode::Char('p') => enqueue_action(
            action_tx,
            Action::SetTripVisibility {
                trip_id: trip.id,
                public: !trip.is_public(),
            },
        ),
        KeyCode::Char('v') => {
            app.shared_trip_id = Some(trip.id);
            enqueue_action(action_tx, Action::LoadShared { trip_id: trip.id });
        }
        KeyCode::Char('t') => enqueue_action(action_tx, Action::OpenTimeline { trip_id: trip.id }),
        KeyCode::Char('b') => enqueue_action(action_tx, Action::OpenBudget { trip_id: trip.id }),
        KeyCode::Char('e') => app.open_edit_trip_form(&trip),
        KeyCode::Char('r') => enqueue_action(action_tx, Action::OpenTrip { trip_id: trip.id }),
        KeyCode::Esc => {
            app.navigate_to(View::Dashboard);
            enqueue_action(action_tx, Action::LoadDashboard);
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => app.quit(),
        _ => {}
    }
}
