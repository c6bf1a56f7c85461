use anyhow::{Context, Result};
use globetrotter::{
    domain::{
        Activity, ActivitySearch, BudgetEntry, BudgetSummary, City, CitySearch, NewBudgetEntry,
        NewStop, NewStopActivity, NewTrip, SharedTrip, Stop, StopActivity, Trip, TripUpdate, User,
        UserUpdate,
    },
    ApiError, Credentials, GlobetrotterClient, NewUser, Session,
};

use crate::api::dev_backend::DevBackend;
use crate::session_store::SessionStore;

/// Data shown on the trip detail view.
pub type TripOverview = (Trip, Vec<Stop>, BudgetSummary);

/// Everything the terminal client asks of the API. Routes to the in-memory
/// dev backend when one is attached.
#[derive(Debug, Clone)]
pub struct ApiClient {
    remote: GlobetrotterClient,
    dev_backend: Option<DevBackend>,
    session_store: SessionStore,
}

impl ApiClient {
    pub fn new(api_url: &str, session_store: SessionStore) -> Result<Self> {
        let remote = GlobetrotterClient::new(api_url)
            .with_context(|| format!("Invalid API URL: {}", api_url))?;
        Ok(Self {
            remote,
            dev_backend: None,
            session_store,
        })
    }

    pub fn dev() -> Result<Self> {
        Self::with_dev_backend(DevBackend::new())
    }

    pub fn with_dev_backend(backend: DevBackend) -> Result<Self> {
        Ok(Self {
            remote: GlobetrotterClient::new("http://localhost")?,
            dev_backend: Some(backend),
            session_store: SessionStore::ephemeral(),
        })
    }

    pub fn is_dev(&self) -> bool {
        self.dev_backend.is_some()
    }

    pub fn base_url(&self) -> &str {
        self.remote.base_url()
    }

    /// Pick up the session saved by a previous run and authorize with it.
    pub fn restore_session(&mut self) -> Result<Option<Session>> {
        if let Some(dev) = &self.dev_backend {
            return Ok(Some(Session::new("dev-token", dev.user())));
        }
        let session = self.session_store.load()?;
        self.remote
            .set_token(session.as_ref().map(|s| s.access_token.clone()));
        Ok(session)
    }

    /// Log in, load the profile and persist the session.
    pub async fn login(&mut self, credentials: &Credentials) -> Result<Session> {
        if let Some(dev) = &self.dev_backend {
            return Ok(Session::new("dev-token", dev.user()));
        }

        let auth = self.remote.login(credentials).await?;
        self.remote.set_token(Some(auth.access_token.clone()));

        let user = match self.remote.current_user().await {
            Ok(user) => user,
            Err(e) => {
                tracing::warn!(error = %e, "could not refresh profile after login");
                auth.user.unwrap_or_else(|| User {
                    email: credentials.email.clone(),
                    ..User::default()
                })
            }
        };

        let session = Session::new(auth.access_token, user);
        self.session_store
            .save(&session)
            .context("Failed to save session")?;
        Ok(session)
    }

    /// Create the account, then log straight in with the same credentials.
    pub async fn register(&mut self, new_user: &NewUser) -> Result<Session> {
        if self.dev_backend.is_none() {
            self.remote.register(new_user).await?;
        }
        self.login(&Credentials::new(&new_user.email, &new_user.password))
            .await
    }

    /// Drop the token and the saved session. The account itself is untouched.
    pub fn forget_session(&mut self) -> Result<()> {
        self.remote.set_token(None);
        self.session_store.clear().context("Failed to clear session")
    }

    pub fn persist_session(&self, session: &Session) -> Result<()> {
        self.session_store
            .save(session)
            .context("Failed to save session")
    }

    pub async fn update_profile(&self, update: &UserUpdate) -> Result<User> {
        if let Some(dev) = &self.dev_backend {
            return Ok(dev.update_user(update)?);
        }
        Ok(self.remote.update_current_user(update).await?)
    }

    pub async fn list_trips(&self) -> Result<Vec<Trip>> {
        if let Some(dev) = &self.dev_backend {
            return Ok(dev.list_trips());
        }
        Ok(self.remote.list_trips().await?)
    }

    pub async fn create_trip(&self, trip: &NewTrip) -> Result<Trip> {
        if let Some(dev) = &self.dev_backend {
            return Ok(dev.create_trip(trip)?);
        }
        Ok(self.remote.create_trip(trip).await?)
    }

    pub async fn update_trip(&self, trip_id: i64, update: &TripUpdate) -> Result<Trip> {
        if let Some(dev) = &self.dev_backend {
            return Ok(dev.update_trip(trip_id, update)?);
        }
        Ok(self.remote.update_trip(trip_id, update).await?)
    }

    pub async fn delete_trip(&self, trip_id: i64) -> Result<()> {
        if let Some(dev) = &self.dev_backend {
            return Ok(dev.delete_trip(trip_id)?);
        }
        Ok(self.remote.delete_trip(trip_id).await?)
    }

    /// Trip, stops and budget summary, requested concurrently. An unreadable
    /// budget or stop list falls back to empty; the trip itself must load.
    pub async fn trip_overview(&self, trip_id: i64) -> Result<TripOverview> {
        if let Some(dev) = &self.dev_backend {
            let trip = dev.get_trip(trip_id)?;
            let stops = dev.list_stops(trip_id)?;
            let budget = dev.budget_summary(trip_id).unwrap_or_default();
            return Ok((trip, stops, budget));
        }

        let (trip, stops, budget) = tokio::join!(
            self.remote.get_trip(trip_id),
            self.remote.list_stops(trip_id),
            self.remote.budget_summary(trip_id),
        );
        let trip = trip?;
        let stops = or_fallback(stops, "stops")?;
        let budget = or_fallback(budget, "budget summary")?;
        Ok((trip, stops, budget))
    }

    /// Trip and stops, requested concurrently.
    pub async fn trip_with_stops(&self, trip_id: i64) -> Result<(Trip, Vec<Stop>)> {
        if let Some(dev) = &self.dev_backend {
            return Ok((dev.get_trip(trip_id)?, dev.list_stops(trip_id)?));
        }

        let (trip, stops) = tokio::join!(
            self.remote.get_trip(trip_id),
            self.remote.list_stops(trip_id),
        );
        Ok((trip?, or_fallback(stops, "stops")?))
    }

    pub async fn search_cities(&self, search: &CitySearch) -> Result<Vec<City>> {
        if let Some(dev) = &self.dev_backend {
            return Ok(dev.search_cities(search));
        }
        Ok(self.remote.search_cities(search).await?)
    }

    pub async fn search_activities(&self, search: &ActivitySearch) -> Result<Vec<Activity>> {
        if let Some(dev) = &self.dev_backend {
            return Ok(dev.search_activities(search));
        }
        Ok(self.remote.search_activities(search).await?)
    }

    pub async fn add_stop(&self, trip_id: i64, stop: &NewStop) -> Result<Stop> {
        if let Some(dev) = &self.dev_backend {
            return Ok(dev.add_stop(trip_id, stop)?);
        }
        Ok(self.remote.add_stop(trip_id, stop).await?)
    }

    pub async fn delete_stop(&self, stop_id: i64) -> Result<()> {
        if let Some(dev) = &self.dev_backend {
            return Ok(dev.delete_stop(stop_id)?);
        }
        Ok(self.remote.delete_stop(stop_id).await?)
    }

    pub async fn add_stop_activity(
        &self,
        stop_id: i64,
        activity: &NewStopActivity,
    ) -> Result<StopActivity> {
        if let Some(dev) = &self.dev_backend {
            return Ok(dev.add_stop_activity(stop_id, activity)?);
        }
        Ok(self.remote.add_stop_activity(stop_id, activity).await?)
    }

    pub async fn remove_stop_activity(&self, stop_id: i64, item_id: i64) -> Result<()> {
        if let Some(dev) = &self.dev_backend {
            return Ok(dev.remove_stop_activity(stop_id, item_id)?);
        }
        Ok(self.remote.remove_stop_activity(stop_id, item_id).await?)
    }

    /// Summary and entries, requested concurrently.
    pub async fn budget(&self, trip_id: i64) -> Result<(BudgetSummary, Vec<BudgetEntry>)> {
        if let Some(dev) = &self.dev_backend {
            return Ok((dev.budget_summary(trip_id)?, dev.budget_entries(trip_id)?));
        }

        let (summary, entries) = tokio::join!(
            self.remote.budget_summary(trip_id),
            self.remote.budget_entries(trip_id),
        );
        Ok((
            or_fallback(summary, "budget summary")?,
            or_fallback(entries, "budget entries")?,
        ))
    }

    pub async fn add_budget_entry(
        &self,
        trip_id: i64,
        entry: &NewBudgetEntry,
    ) -> Result<BudgetEntry> {
        if let Some(dev) = &self.dev_backend {
            return Ok(dev.add_budget_entry(trip_id, entry)?);
        }
        Ok(self.remote.add_budget_entry(trip_id, entry).await?)
    }

    pub async fn shared_trip(&self, trip_id: i64) -> Result<SharedTrip> {
        if let Some(dev) = &self.dev_backend {
            return Ok(dev.shared_trip(trip_id)?);
        }
        Ok(self.remote.shared_trip(trip_id).await?)
    }
}

/// Secondary reads degrade to an empty value, except when the session is no
/// longer valid.
fn or_fallback<T: Default>(result: Result<T, ApiError>, what: &str) -> Result<T> {
    match result {
        Ok(value) => Ok(value),
        Err(e @ ApiError::Unauthorized { .. }) => Err(e.into()),
        Err(e) => {
            tracing::error!(error = %e, "failed to load {}", what);
            Ok(T::default())
        }
    }
}
