use crate::api::ApiClient;
use crate::app::{
    error_detail, forms::ProfileEdit, is_unauthorized, App, BudgetState, CitySearchTarget,
    ConfirmKind, TimelineState, TripDetail, View,
};
use anyhow::Result;
use globetrotter::{
    domain::{
        suggest_stop_dates, Activity, ActivityCategory, ActivitySearch, CitySearch,
        NewBudgetEntry, NewStop, NewStopActivity, NewTrip, TripUpdate, User,
    },
    Credentials, NewUser,
};

use super::action_queue::Action;

pub(super) async fn run_action(action: Action, app: &mut App, client: &mut ApiClient) -> Result<()> {
    match action {
        Action::SubmitLogin(credentials) => submit_login(credentials, app, client).await,
        Action::SubmitRegister(new_user) => submit_register(new_user, app, client).await,
        Action::LoadDashboard => load_dashboard(app, client).await,
        Action::CreateTrip(new_trip) => create_trip(new_trip, app, client).await,
        Action::UpdateTrip { trip_id, update } => update_trip(trip_id, update, app, client).await,
        Action::OpenTrip { trip_id } => open_trip(trip_id, app, client).await,
        Action::SetTripVisibility { trip_id, public } => {
            set_trip_visibility(trip_id, public, app, client).await
        }
        Action::LoadCityCatalog => load_city_catalog(app, client).await,
        Action::SearchCities { target, query } => {
            search_cities(target, query, app, client).await
        }
        Action::AddStop { city_id } => add_stop(city_id, app, client).await,
        Action::LoadActivityCatalog => load_activity_catalog(app, client).await,
        Action::SearchActivities { query, category } => {
            search_activities(query, category, app, client).await
        }
        Action::AddActivityToStop { stop_id, activity } => {
            add_activity_to_stop(stop_id, activity, app, client).await
        }
        Action::OpenTimeline { trip_id } => open_timeline(trip_id, app, client).await,
        Action::OpenBudget { trip_id } => open_budget(trip_id, app, client).await,
        Action::AddBudgetEntry { trip_id, entry } => {
            add_budget_entry(trip_id, entry, app, client).await
        }
        Action::SaveProfile(edit) => save_profile(edit, app, client).await,
        Action::LoadShared { trip_id } => load_shared(trip_id, app, client).await,
        Action::ConfirmPending => confirm_pending(app, client).await,
    }
    Ok(())
}

/// A rejected token ends the session; anything else becomes a status line.
/// Returns true when the session was ended.
fn handle_failure(app: &mut App, client: &mut ApiClient, err: &anyhow::Error, what: &str) -> bool {
    if is_unauthorized(err) {
        tracing::warn!("API rejected the session token");
        if let Err(e) = client.forget_session() {
            tracing::error!(error = %e, "failed to clear saved session");
        }
        app.session_expired();
        return true;
    }
    tracing::error!(error = %err, "{}", what);
    app.set_status(format!("{}: {}", what, err));
    false
}

async fn submit_login(credentials: Credentials, app: &mut App, client: &mut ApiClient) {
    match client.login(&credentials).await {
        Ok(session) => {
            app.sign_in(session);
            load_dashboard(app, client).await;
        }
        Err(e) => {
            tracing::warn!(error = %e, "login failed");
            app.login_form
                .set_error(error_detail(&e, "Invalid email or password"));
        }
    }
}

async fn submit_register(new_user: NewUser, app: &mut App, client: &mut ApiClient) {
    match client.register(&new_user).await {
        Ok(session) => {
            app.sign_in(session);
            load_dashboard(app, client).await;
        }
        Err(e) => {
            tracing::warn!(error = %e, "registration failed");
            app.register_form
                .set_error(error_detail(&e, "Registration failed"));
        }
    }
}

pub(super) async fn load_dashboard(app: &mut App, client: &mut ApiClient) {
    match client.list_trips().await {
        Ok(trips) => app.set_trips(trips),
        Err(e) => {
            handle_failure(app, client, &e, "Could not load trips");
        }
    }
}

async fn create_trip(new_trip: NewTrip, app: &mut App, client: &mut ApiClient) {
    match client.create_trip(&new_trip).await {
        Ok(trip) => {
            tracing::info!(trip_id = trip.id, "trip created");
            let trip_id = trip.id;
            app.trips.push(trip);
            app.refresh_trip_filter();
            app.set_status(format!("Created \"{}\"", new_trip.name));
            open_trip(trip_id, app, client).await;
        }
        Err(e) => {
            if !is_unauthorized(&e) {
                app.trip_form.set_error(error_detail(&e, "Could not save trip"));
            }
            handle_failure(app, client, &e, "Could not save trip");
        }
    }
}

async fn update_trip(trip_id: i64, update: TripUpdate, app: &mut App, client: &mut ApiClient) {
    match client.update_trip(trip_id, &update).await {
        Ok(trip) => {
            app.replace_trip(trip);
            app.set_status("Trip updated");
            let back = if app.detail.is_some() {
                View::TripDetail
            } else {
                View::Dashboard
            };
            app.navigate_to(back);
        }
        Err(e) => {
            if !is_unauthorized(&e) {
                app.trip_form.set_error(error_detail(&e, "Could not save trip"));
            }
            handle_failure(app, client, &e, "Could not save trip");
        }
    }
}

async fn open_trip(trip_id: i64, app: &mut App, client: &mut ApiClient) {
    match client.trip_overview(trip_id).await {
        Ok((trip, stops, budget)) => {
            let mut detail = TripDetail::new(trip, stops, budget);
            if let Some(previous) = app.detail.as_ref().filter(|d| d.trip.id == trip_id) {
                detail.stop_index = previous
                    .stop_index
                    .min(detail.stops.len().saturating_sub(1));
            }
            app.detail = Some(detail);
            app.navigate_to(View::TripDetail);
        }
        Err(e) => {
            handle_failure(app, client, &e, "Could not load trip");
        }
    }
}

async fn set_trip_visibility(trip_id: i64, public: bool, app: &mut App, client: &mut ApiClient) {
    match client
        .update_trip(trip_id, &TripUpdate::visibility(public))
        .await
    {
        Ok(trip) => {
            app.replace_trip(trip);
            if public {
                let link = app.share_link_for(trip_id);
                app.set_status(format!("Trip is public. Share link: {}", link));
            } else {
                app.set_status("Trip is private");
            }
        }
        Err(e) => {
            handle_failure(app, client, &e, "Could not change sharing");
        }
    }
}

async fn load_city_catalog(app: &mut App, client: &mut ApiClient) {
    match client.search_cities(&CitySearch::all()).await {
        Ok(cities) => app.set_city_catalog(cities),
        Err(e) => {
            handle_failure(app, client, &e, "Could not load cities");
        }
    }
}

async fn search_cities(
    target: CitySearchTarget,
    query: String,
    app: &mut App,
    client: &mut ApiClient,
) {
    match client.search_cities(&CitySearch::new(query.as_str())).await {
        Ok(cities) => app.apply_city_results(target, &query, cities),
        Err(e) => {
            handle_failure(app, client, &e, "City search failed");
        }
    }
}

async fn add_stop(city_id: i64, app: &mut App, client: &mut ApiClient) {
    let Some(detail) = app.detail.as_ref() else {
        app.navigate_to(View::Dashboard);
        return;
    };
    let trip_id = detail.trip.id;
    let (arrival_date, departure_date) = suggest_stop_dates(&detail.trip, &detail.stops);
    let new_stop = NewStop {
        city_id,
        arrival_date,
        departure_date,
        notes: None,
    };

    match client.add_stop(trip_id, &new_stop).await {
        Ok(stop) => {
            let label = stop.city_label();
            if let Some(detail) = app.detail.as_mut() {
                detail.stops.push(stop);
                detail.stops.sort_by_key(|s| s.order_index);
                detail.stop_index = detail.stops.len().saturating_sub(1);
                detail.activity_index = None;
            }
            app.set_status(format!("Added {}", label));
            app.navigate_to(View::TripDetail);
        }
        Err(e) => {
            handle_failure(app, client, &e, "Could not add stop");
        }
    }
}

async fn load_activity_catalog(app: &mut App, client: &mut ApiClient) {
    match client.search_activities(&ActivitySearch::all()).await {
        Ok(activities) => app.set_activity_catalog(activities),
        Err(e) => {
            handle_failure(app, client, &e, "Could not load activities");
        }
    }
}

async fn search_activities(
    query: String,
    category: Option<ActivityCategory>,
    app: &mut App,
    client: &mut ApiClient,
) {
    let search = ActivitySearch::new(query.as_str(), category);
    match client.search_activities(&search).await {
        Ok(activities) => app.apply_activity_results(&query, category, activities),
        Err(e) => {
            handle_failure(app, client, &e, "Activity search failed");
        }
    }
}

async fn add_activity_to_stop(
    stop_id: i64,
    activity: Activity,
    app: &mut App,
    client: &mut ApiClient,
) {
    match client
        .add_stop_activity(stop_id, &NewStopActivity::new(activity.id))
        .await
    {
        Ok(mut item) => {
            // The API answers with the bare row.
            item.activity.get_or_insert(activity);
            let name = item.name();
            if let Some(stop) = app
                .detail
                .as_mut()
                .and_then(|d| d.stops.iter_mut().find(|s| s.id == stop_id))
            {
                stop.activities.push(item);
            }
            app.set_status(format!("Added {}", name));
            app.navigate_to(View::TripDetail);
        }
        Err(e) => {
            handle_failure(app, client, &e, "Could not add activity");
        }
    }
}

async fn open_timeline(trip_id: i64, app: &mut App, client: &mut ApiClient) {
    match client.trip_with_stops(trip_id).await {
        Ok((trip, stops)) => {
            app.timeline = Some(TimelineState {
                trip,
                stops,
                scroll: 0,
            });
            app.navigate_to(View::Timeline);
        }
        Err(e) => {
            handle_failure(app, client, &e, "Could not load timeline");
        }
    }
}

async fn open_budget(trip_id: i64, app: &mut App, client: &mut ApiClient) {
    match client.budget(trip_id).await {
        Ok((summary, entries)) => {
            let trip_name = app
                .detail
                .as_ref()
                .map(|d| &d.trip)
                .into_iter()
                .chain(app.trips.iter())
                .find(|t| t.id == trip_id)
                .map(|t| t.name.clone())
                .unwrap_or_default();
            if let Some(detail) = app.detail.as_mut().filter(|d| d.trip.id == trip_id) {
                detail.budget = summary;
            }
            let entry_index = app
                .budget
                .as_ref()
                .filter(|b| b.trip_id == trip_id)
                .map_or(0, |b| b.entry_index.min(entries.len().saturating_sub(1)));
            app.budget = Some(BudgetState {
                trip_id,
                trip_name,
                summary,
                entries,
                entry_index,
            });
            app.navigate_to(View::Budget);
        }
        Err(e) => {
            handle_failure(app, client, &e, "Could not load budget");
        }
    }
}

async fn add_budget_entry(
    trip_id: i64,
    entry: NewBudgetEntry,
    app: &mut App,
    client: &mut ApiClient,
) {
    match client.add_budget_entry(trip_id, &entry).await {
        Ok(_) => {
            app.set_status(format!(
                "Added {:.2} to {}",
                entry.amount,
                entry.category.label()
            ));
            open_budget(trip_id, app, client).await;
        }
        Err(e) => {
            if !is_unauthorized(&e) {
                app.budget_form
                    .set_error(error_detail(&e, "Could not add expense"));
            }
            handle_failure(app, client, &e, "Could not add expense");
        }
    }
}

async fn save_profile(edit: ProfileEdit, app: &mut App, client: &mut ApiClient) {
    match client.update_profile(&edit.update).await {
        Ok(user) => {
            if let Some(session) = app.session.as_mut() {
                session.user = User {
                    email: edit.email,
                    ..user
                };
                if let Err(e) = client.persist_session(session) {
                    tracing::error!(error = %e, "failed to save updated profile");
                }
            }
            app.profile_form.error = None;
            app.set_status("Profile updated");
        }
        Err(e) => {
            if !is_unauthorized(&e) {
                app.profile_form
                    .set_error(error_detail(&e, "Could not update profile"));
            }
            handle_failure(app, client, &e, "Could not update profile");
        }
    }
}

async fn load_shared(trip_id: i64, app: &mut App, client: &mut ApiClient) {
    app.shared_trip_id = Some(trip_id);
    match client.shared_trip(trip_id).await {
        Ok(shared) => {
            app.shared = Some(shared);
            app.shared_error = None;
            app.shared_scroll = 0;
        }
        Err(e) => {
            tracing::warn!(error = %e, trip_id, "shared itinerary unavailable");
            app.shared = None;
            app.shared_error = Some(error_detail(&e, "This itinerary is not available"));
        }
    }
    app.navigate_to(View::Shared);
}

/// Run whatever the confirmation dialog was opened for. Local state only
/// changes after the API call succeeds.
async fn confirm_pending(app: &mut App, client: &mut ApiClient) {
    let Some(ctx) = app.close_confirm() else {
        return;
    };

    match ctx.kind {
        ConfirmKind::DeleteTrip { trip_id } => match client.delete_trip(trip_id).await {
            Ok(()) => {
                tracing::info!(trip_id, "trip deleted");
                app.remove_trip(trip_id);
                if app.detail.as_ref().is_some_and(|d| d.trip.id == trip_id) {
                    app.detail = None;
                }
                app.set_status(format!("Deleted {}", ctx.label));
                if ctx.origin != View::Dashboard {
                    app.navigate_to(View::Dashboard);
                }
            }
            Err(e) => {
                handle_failure(app, client, &e, "Could not delete trip");
            }
        },
        ConfirmKind::DeleteStop { trip_id, stop_id } => match client.delete_stop(stop_id).await {
            Ok(()) => {
                if let Some(detail) = app.detail.as_mut().filter(|d| d.trip.id == trip_id) {
                    detail.stops.retain(|s| s.id != stop_id);
                    detail.stop_index = detail
                        .stop_index
                        .min(detail.stops.len().saturating_sub(1));
                    detail.activity_index = None;
                }
                app.set_status(format!("Removed {}", ctx.label));
            }
            Err(e) => {
                handle_failure(app, client, &e, "Could not remove stop");
            }
        },
        ConfirmKind::RemoveStopActivity {
            trip_id,
            stop_id,
            item_id,
        } => match client.remove_stop_activity(stop_id, item_id).await {
            Ok(()) => {
                if let Some(stop) = app
                    .detail
                    .as_mut()
                    .filter(|d| d.trip.id == trip_id)
                    .and_then(|d| d.stops.iter_mut().find(|s| s.id == stop_id))
                {
                    stop.activities.retain(|a| a.id != item_id);
                }
                if let Some(detail) = app.detail.as_mut() {
                    detail.activity_index = None;
                }
                app.set_status(format!("Removed {}", ctx.label));
            }
            Err(e) => {
                handle_failure(app, client, &e, "Could not remove activity");
            }
        },
        ConfirmKind::Logout | ConfirmKind::DeleteAccount => {
            if let Err(e) = client.forget_session() {
                tracing::error!(error = %e, "failed to clear saved session");
            }
            app.sign_out();
            app.set_status(match ctx.kind {
                ConfirmKind::DeleteAccount => "Account data removed from this device",
                _ => "Logged out",
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::DevBackend;
    use crate::app::test_support::*;
    use crate::app::{forms, TextInput};
    use globetrotter::domain::ItineraryTotals;
    use globetrotter::ApiError;

    fn dev_client() -> (ApiClient, DevBackend) {
        let backend = DevBackend::new();
        let client = ApiClient::with_dev_backend(backend.clone()).unwrap();
        (client, backend)
    }

    async fn dashboard_with_trips(client: &mut ApiClient) -> App {
        let mut app = logged_in_app();
        run_action(Action::LoadDashboard, &mut app, client)
            .await
            .unwrap();
        app
    }

    fn trip_ids(app: &App) -> Vec<i64> {
        app.trips.iter().map(|t| t.id).collect()
    }

    #[tokio::test]
    async fn confirmed_delete_removes_trip_after_success() {
        let (mut client, _) = dev_client();
        let mut app = dashboard_with_trips(&mut client).await;
        assert_eq!(trip_ids(&app), vec![1, 2]);

        app.open_confirm(
            ConfirmKind::DeleteTrip { trip_id: 1 },
            "Delete trip?",
            "Portugal by train".into(),
        );
        run_action(Action::ConfirmPending, &mut app, &mut client)
            .await
            .unwrap();

        assert_eq!(trip_ids(&app), vec![2]);
        assert_eq!(app.current_view, View::Dashboard);
        assert!(app.confirm.is_none());
    }

    #[tokio::test]
    async fn failed_delete_leaves_list_unchanged() {
        let (mut client, backend) = dev_client();
        let mut app = dashboard_with_trips(&mut client).await;
        backend.set_fail_writes(true);

        app.open_confirm(
            ConfirmKind::DeleteTrip { trip_id: 1 },
            "Delete trip?",
            "Portugal by train".into(),
        );
        run_action(Action::ConfirmPending, &mut app, &mut client)
            .await
            .unwrap();

        assert_eq!(trip_ids(&app), vec![1, 2]);
        assert!(app
            .status_message
            .as_deref()
            .is_some_and(|s| s.starts_with("Could not delete trip")));
        assert!(app.session.is_some());
    }

    #[tokio::test]
    async fn opening_a_trip_loads_stops_and_budget() {
        let (mut client, _) = dev_client();
        let mut app = dashboard_with_trips(&mut client).await;
        run_action(Action::OpenTrip { trip_id: 1 }, &mut app, &mut client)
            .await
            .unwrap();

        let detail = app.detail.as_ref().unwrap();
        assert_eq!(app.current_view, View::TripDetail);
        assert_eq!(detail.stops.len(), 2);
        assert_eq!(detail.budget.total_budget, 810.0);
    }

    #[tokio::test]
    async fn added_stop_follows_the_last_one() {
        let (mut client, _) = dev_client();
        let mut app = dashboard_with_trips(&mut client).await;
        run_action(Action::OpenTrip { trip_id: 1 }, &mut app, &mut client)
            .await
            .unwrap();
        let last_departure = app.detail.as_ref().unwrap().stops[1].departure_date;

        app.open_city_picker();
        run_action(Action::AddStop { city_id: 7 }, &mut app, &mut client)
            .await
            .unwrap();

        let detail = app.detail.as_ref().unwrap();
        let added = detail.selected_stop().unwrap();
        assert_eq!(added.city_name(), "Marrakesh");
        assert_eq!(added.arrival_date, last_departure + chrono::Duration::days(1));
        assert_eq!(app.current_view, View::TripDetail);
    }

    #[tokio::test]
    async fn removing_an_activity_updates_the_stop() {
        let (mut client, _) = dev_client();
        let mut app = dashboard_with_trips(&mut client).await;
        run_action(Action::OpenTrip { trip_id: 1 }, &mut app, &mut client)
            .await
            .unwrap();
        app.open_confirm(
            ConfirmKind::RemoveStopActivity {
                trip_id: 1,
                stop_id: 201,
                item_id: 301,
            },
            "Remove activity?",
            "Tram 28 ride".into(),
        );
        run_action(Action::ConfirmPending, &mut app, &mut client)
            .await
            .unwrap();

        let stop = &app.detail.as_ref().unwrap().stops[0];
        let ids: Vec<_> = stop.activities.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![302]);
        assert_eq!(app.current_view, View::TripDetail);
    }

    #[tokio::test]
    async fn added_activity_shows_the_picked_catalog_entry() {
        let (mut client, _) = dev_client();
        let mut app = dashboard_with_trips(&mut client).await;
        run_action(Action::OpenTrip { trip_id: 1 }, &mut app, &mut client)
            .await
            .unwrap();
        let before = ItineraryTotals::of(&app.detail.as_ref().unwrap().stops);

        let activity = client
            .search_activities(&ActivitySearch::new("cellar", None))
            .await
            .unwrap()
            .remove(0);
        run_action(
            Action::AddActivityToStop {
                stop_id: 202,
                activity,
            },
            &mut app,
            &mut client,
        )
        .await
        .unwrap();

        let stops = &app.detail.as_ref().unwrap().stops;
        let added = stops[1].activities.last().unwrap();
        assert_eq!(added.name(), "Port wine cellar tour");
        assert_eq!(added.estimated_cost(), 20.0);
        let after = ItineraryTotals::of(stops);
        assert_eq!(after.activities_cost, before.activities_cost + 20.0);
        assert_eq!(app.status_message.as_deref(), Some("Added Port wine cellar tour"));
        assert_eq!(app.current_view, View::TripDetail);
    }

    #[tokio::test]
    async fn profile_save_keeps_edited_email_in_session() {
        let (mut client, _) = dev_client();
        let mut app = logged_in_app();
        app.open_profile();
        app.profile_form.set_value(forms::profile::NAME, "Ada King");
        app.profile_form.set_value(forms::profile::EMAIL, "ada@king.dev");
        let edit = forms::profile_payload(&app.profile_form).unwrap();

        run_action(Action::SaveProfile(edit), &mut app, &mut client)
            .await
            .unwrap();

        let user = &app.session.as_ref().unwrap().user;
        assert_eq!(user.full_name.as_deref(), Some("Ada King"));
        assert_eq!(user.email, "ada@king.dev");
        assert_eq!(app.status_message.as_deref(), Some("Profile updated"));
    }

    #[tokio::test]
    async fn city_search_applies_matching_results() {
        let (mut client, backend) = dev_client();
        let mut app = logged_in_app();
        app.open_city_explorer();
        app.cities.input = TextInput::from_str("por");
        run_action(
            Action::SearchCities {
                target: CitySearchTarget::Explorer,
                query: "por".into(),
            },
            &mut app,
            &mut client,
        )
        .await
        .unwrap();

        let names: Vec<_> = app.cities.results.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Lisbon", "Porto"]);
        assert_eq!(backend.search_calls(), 1);
    }

    #[tokio::test]
    async fn budget_entry_refreshes_summary() {
        let (mut client, _) = dev_client();
        let mut app = dashboard_with_trips(&mut client).await;
        run_action(Action::OpenBudget { trip_id: 2 }, &mut app, &mut client)
            .await
            .unwrap();
        assert_eq!(app.budget.as_ref().unwrap().trip_name, "Japan in autumn");

        let entry = NewBudgetEntry {
            category: globetrotter::domain::BudgetCategory::Stay,
            amount: 300.0,
            description: None,
        };
        run_action(
            Action::AddBudgetEntry { trip_id: 2, entry },
            &mut app,
            &mut client,
        )
        .await
        .unwrap();

        let budget = app.budget.as_ref().unwrap();
        assert_eq!(budget.entries.len(), 2);
        assert_eq!(budget.summary.stay, 300.0);
        assert_eq!(budget.summary.total_budget, 1200.0);
    }

    #[tokio::test]
    async fn invalid_trip_is_reported_on_the_form() {
        let (mut client, _) = dev_client();
        let mut app = dashboard_with_trips(&mut client).await;
        app.open_new_trip_form();
        let start = chrono::NaiveDate::from_ymd_opt(2024, 6, 4)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let new_trip = NewTrip {
            name: "Backwards".into(),
            description: None,
            start_date: start,
            end_date: start - chrono::Duration::days(3),
            cover_photo: None,
        };
        run_action(Action::CreateTrip(new_trip), &mut app, &mut client)
            .await
            .unwrap();

        assert_eq!(
            app.trip_form.error.as_deref(),
            Some("End date must not be before the start date")
        );
        assert_eq!(app.current_view, View::TripForm);
        assert_eq!(trip_ids(&app), vec![1, 2]);
    }

    #[tokio::test]
    async fn shared_private_trip_shows_error() {
        let (mut client, _) = dev_client();
        let mut app = logged_out_app();
        run_action(Action::LoadShared { trip_id: 2 }, &mut app, &mut client)
            .await
            .unwrap();
        assert_eq!(app.current_view, View::Shared);
        assert!(app.shared.is_none());
        assert_eq!(
            app.shared_error.as_deref(),
            Some("Trip not found or not shared")
        );
    }

    #[tokio::test]
    async fn logout_clears_session() {
        let (mut client, _) = dev_client();
        let mut app = dashboard_with_trips(&mut client).await;
        app.open_confirm(ConfirmKind::Logout, "Log out?", "Ada".into());
        run_action(Action::ConfirmPending, &mut app, &mut client)
            .await
            .unwrap();
        assert!(app.session.is_none());
        assert!(app.trips.is_empty());
        assert_eq!(app.current_view, View::Login);
    }

    #[test]
    fn unauthorized_failure_ends_session() {
        let (mut client, _) = dev_client();
        let mut app = logged_in_app();
        let err: anyhow::Error = ApiError::Unauthorized { detail: None }.into();
        assert!(handle_failure(&mut app, &mut client, &err, "Could not load trips"));
        assert!(app.session.is_none());
        assert_eq!(app.current_view, View::Login);
    }
}
