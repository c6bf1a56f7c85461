use crate::api::ApiClient;
use crate::app::{App, View};
use crate::ui;
use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;

use super::action_queue::{channel, Action, ActionTx};
use super::actions::run_action;
use super::views::handle_view_key;

/// Fetch-on-enter for the view the app starts on.
fn queue_startup(app: &App, action_tx: &ActionTx) {
    let action = match (app.current_view, app.shared_trip_id) {
        (View::Shared, Some(trip_id)) => Some(Action::LoadShared { trip_id }),
        (View::Dashboard, _) => Some(Action::LoadDashboard),
        _ => None,
    };
    if let Some(action) = action {
        let _ = action_tx.send(action);
    }
}

pub async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    client: &mut ApiClient,
) -> Result<()> {
    let (action_tx, mut action_rx) = channel();
    queue_startup(app, &action_tx);

    loop {
        terminal.draw(|f| ui::render(f, app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_view_key(key, app, &action_tx);
                }
            }
        }

        while let Ok(action) = action_rx.try_recv() {
            app.is_loading = true;
            app.throbber_state.calc_next();
            terminal.draw(|f| ui::render(f, app))?;
            tracing::debug!(?action, "running action");
            run_action(action, app, client).await?;
        }
        app.is_loading = false;

        if !app.running {
            break;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::test_support::*;

    #[test]
    fn dashboard_start_loads_trips() {
        let app = logged_in_app();
        let (tx, mut rx) = channel();
        queue_startup(&app, &tx);
        assert_eq!(rx.try_recv().ok(), Some(Action::LoadDashboard));
    }

    #[test]
    fn shared_start_loads_the_trip_without_session() {
        let mut app = logged_out_app();
        app.shared_trip_id = Some(8);
        app.navigate_to(View::Shared);
        let (tx, mut rx) = channel();
        queue_startup(&app, &tx);
        assert_eq!(rx.try_recv().ok(), Some(Action::LoadShared { trip_id: 8 }));
    }

    #[test]
    fn login_start_queues_nothing() {
        let app = logged_out_app();
        let (tx, mut rx) = channel();
        queue_startup(&app, &tx);
        assert!(rx.try_recv().is_err());
    }
}
