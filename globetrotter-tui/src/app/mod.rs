use globetrotter::{
    domain::{BudgetCategory, City, SharedTrip, Trip},
    share::share_link,
    ApiError, Session,
};

pub mod forms;
mod navigation;
mod search;
mod state;
pub use search::CitySearchTarget;
pub use state::{
    ActivityPicker, BudgetState, ConfirmContext, ConfirmKind, Form, FormField, SearchState,
    TextInput, TimelineState, TripDetail, View,
};

pub struct App {
    pub running: bool,
    pub current_view: View,
    pub session: Option<Session>,
    pub status_message: Option<String>,
    pub share_base_url: String,
    pub dev_mode: bool,

    // Loading indicator
    pub is_loading: bool,
    pub throbber_state: throbber_widgets_tui::ThrobberState,

    // Auth forms
    pub login_form: Form,
    pub register_form: Form,

    // Dashboard
    pub trips: Vec<Trip>,
    pub trip_filter: TextInput,
    pub trip_filter_focused: bool,
    pub filtered_trips: Vec<usize>, // Indices into `trips`
    pub trip_index: usize,

    // Create/edit trip
    pub trip_form: Form,
    pub editing_trip_id: Option<i64>,

    pub detail: Option<TripDetail>,
    pub city_picker: SearchState<City>,
    pub activity_picker: ActivityPicker,
    pub cities: SearchState<City>,
    pub timeline: Option<TimelineState>,

    pub budget: Option<BudgetState>,
    pub budget_form: Form,
    pub budget_category: BudgetCategory,

    pub profile_form: Form,

    // Public itinerary
    pub shared_trip_id: Option<i64>,
    pub shared: Option<SharedTrip>,
    pub shared_error: Option<String>,
    pub shared_scroll: usize,

    pub confirm: Option<ConfirmContext>,
}

impl App {
    pub fn new(session: Option<Session>, share_base_url: impl Into<String>) -> Self {
        let current_view = if session.is_some() {
            View::Dashboard
        } else {
            View::Login
        };
        Self {
            running: true,
            current_view,
            session,
            status_message: None,
            share_base_url: share_base_url.into(),
            dev_mode: false,
            is_loading: false,
            throbber_state: throbber_widgets_tui::ThrobberState::default(),
            login_form: forms::login_form(),
            register_form: forms::register_form(),
            trips: Vec::new(),
            trip_filter: TextInput::new(),
            trip_filter_focused: false,
            filtered_trips: Vec::new(),
            trip_index: 0,
            trip_form: forms::trip_form(),
            editing_trip_id: None,
            detail: None,
            city_picker: SearchState::default(),
            activity_picker: ActivityPicker::default(),
            cities: SearchState::default(),
            timeline: None,
            budget: None,
            budget_form: forms::budget_form(),
            budget_category: BudgetCategory::Transport,
            profile_form: forms::profile_form(),
            shared_trip_id: None,
            shared: None,
            shared_error: None,
            shared_scroll: 0,
            confirm: None,
        }
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.is_some()
    }

    /// Switch views. Guarded views redirect to the login form when there is
    /// no session.
    pub fn navigate_to(&mut self, view: View) {
        if view.requires_session() && self.session.is_none() {
            tracing::debug!(?view, "no session, redirecting to login");
            self.current_view = View::Login;
            self.login_form.focused = 0;
            return;
        }
        self.current_view = view;
    }

    pub fn sign_in(&mut self, session: Session) {
        tracing::info!(user = %session.user.email, "signed in");
        self.session = Some(session);
        self.login_form.clear();
        self.register_form.clear();
        self.clear_status();
        self.navigate_to(View::Dashboard);
    }

    /// Drop the session and every piece of per-user state.
    pub fn sign_out(&mut self) {
        self.session = None;
        self.trips.clear();
        self.filtered_trips.clear();
        self.trip_index = 0;
        self.trip_filter.clear();
        self.detail = None;
        self.timeline = None;
        self.budget = None;
        self.confirm = None;
        self.city_picker.reset();
        self.activity_picker = ActivityPicker::default();
        self.cities.reset();
        self.profile_form.clear();
        self.navigate_to(View::Login);
    }

    pub fn session_expired(&mut self) {
        self.sign_out();
        self.login_form
            .set_error("Your session has expired. Please log in again.");
    }

    pub fn user_label(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.user.display_name())
    }

    pub fn share_link_for(&self, trip_id: i64) -> String {
        share_link(&self.share_base_url, trip_id)
    }

    pub fn open_profile(&mut self) {
        let (name, email) = self
            .session
            .as_ref()
            .map(|s| {
                (
                    s.user.full_name.clone().unwrap_or_default(),
                    s.user.email.clone(),
                )
            })
            .unwrap_or_default();
        self.profile_form.clear();
        self.profile_form.set_value(forms::profile::NAME, &name);
        self.profile_form.set_value(forms::profile::EMAIL, &email);
        self.navigate_to(View::Profile);
    }

    pub fn open_new_trip_form(&mut self) {
        self.trip_form = forms::trip_form();
        self.editing_trip_id = None;
        self.navigate_to(View::TripForm);
    }

    pub fn open_edit_trip_form(&mut self, trip: &Trip) {
        self.trip_form = forms::trip_form_for(trip);
        self.editing_trip_id = Some(trip.id);
        self.navigate_to(View::TripForm);
    }

    pub fn open_budget_form(&mut self) {
        self.budget_form.clear();
        self.budget_category = BudgetCategory::Transport;
        self.navigate_to(View::BudgetEntryForm);
    }

    pub fn open_confirm(&mut self, kind: ConfirmKind, title: &str, label: String) {
        self.confirm = Some(ConfirmContext {
            kind,
            title: title.to_string(),
            label,
            origin: self.current_view,
        });
        self.navigate_to(View::Confirm);
    }

    /// Close the dialog and return to the view it was opened from.
    pub fn close_confirm(&mut self) -> Option<ConfirmContext> {
        let ctx = self.confirm.take();
        let origin = ctx.as_ref().map_or(View::Dashboard, |c| c.origin);
        self.navigate_to(origin);
        ctx
    }

    /// Replace a trip everywhere it is shown after an update.
    pub fn replace_trip(&mut self, trip: Trip) {
        if let Some(existing) = self.trips.iter_mut().find(|t| t.id == trip.id) {
            *existing = trip.clone();
        }
        if let Some(detail) = self.detail.as_mut().filter(|d| d.trip.id == trip.id) {
            detail.trip = trip;
        }
    }
}

/// Message for an inline error banner: the API's `detail` when it sent one,
/// otherwise `fallback`.
pub fn error_detail(err: &anyhow::Error, fallback: &str) -> String {
    err.downcast_ref::<ApiError>()
        .and_then(ApiError::detail)
        .unwrap_or(fallback)
        .to_string()
}

pub fn is_unauthorized(err: &anyhow::Error) -> bool {
    err.downcast_ref::<ApiError>()
        .is_some_and(ApiError::is_unauthorized)
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    #[test]
    fn starts_on_dashboard_only_with_session() {
        assert_eq!(logged_in_app().current_view, View::Dashboard);
        assert_eq!(logged_out_app().current_view, View::Login);
    }

    #[test]
    fn guarded_navigation_redirects_to_login() {
        let mut app = logged_out_app();
        for view in [View::Dashboard, View::TripDetail, View::Timeline, View::Profile] {
            app.navigate_to(view);
            assert_eq!(app.current_view, View::Login);
        }
        app.navigate_to(View::Register);
        assert_eq!(app.current_view, View::Register);
        app.navigate_to(View::Shared);
        assert_eq!(app.current_view, View::Shared);
    }

    #[test]
    fn sign_out_clears_user_state() {
        let mut app = logged_in_app();
        app.trips = vec![trip(1, "Iceland")];
        app.filtered_trips = vec![0];
        app.sign_out();
        assert!(app.session.is_none());
        assert!(app.trips.is_empty());
        assert_eq!(app.current_view, View::Login);
        app.navigate_to(View::Dashboard);
        assert_eq!(app.current_view, View::Login);
    }

    #[test]
    fn expired_session_explains_itself() {
        let mut app = logged_in_app();
        app.session_expired();
        assert_eq!(app.current_view, View::Login);
        assert!(app.login_form.error.is_some());
    }

    #[test]
    fn confirm_returns_to_origin() {
        let mut app = logged_in_app();
        app.navigate_to(View::Profile);
        app.open_confirm(ConfirmKind::Logout, "Log out?", "Ada".into());
        assert_eq!(app.current_view, View::Confirm);
        let ctx = app.close_confirm().unwrap();
        assert_eq!(ctx.kind, ConfirmKind::Logout);
        assert_eq!(app.current_view, View::Profile);
    }

    #[test]
    fn error_detail_prefers_server_message() {
        let rejected: anyhow::Error = ApiError::Rejected {
            status: 400,
            detail: "Email already registered".into(),
        }
        .into();
        assert_eq!(
            error_detail(&rejected, "Registration failed"),
            "Email already registered"
        );

        let offline: anyhow::Error = ApiError::ResponseError("connection refused".into()).into();
        assert_eq!(error_detail(&offline, "Registration failed"), "Registration failed");
        assert!(!is_unauthorized(&offline));
        assert!(is_unauthorized(&ApiError::Unauthorized { detail: None }.into()));

        let bad_login: anyhow::Error = ApiError::Unauthorized {
            detail: Some("Incorrect email or password".into()),
        }
        .into();
        assert_eq!(
            error_detail(&bad_login, "Invalid email or password"),
            "Incorrect email or password"
        );
        assert_eq!(
            error_detail(&ApiError::Unauthorized { detail: None }.into(), "Invalid email or password"),
            "Invalid email or password"
        );
    }
}
