use chrono::{Duration, Local, NaiveDateTime, NaiveTime};
use globetrotter::{
    domain::{
        Activity, ActivityCategory, ActivitySearch, BudgetCategory, BudgetEntry, BudgetSummary,
        City, CitySearch, NewBudgetEntry, NewStop, NewStopActivity, NewTrip, SharedTrip, Stop,
        StopActivity, Trip, TripUpdate, User, UserUpdate,
    },
    ApiError,
};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// In-memory stand-in for the REST API used by `dev` mode and tests.
#[derive(Debug, Clone)]
pub struct DevBackend {
    store: Arc<Mutex<DevStore>>,
}

#[derive(Debug)]
struct DevStore {
    user: User,
    trips: Vec<Trip>,
    stops: Vec<Stop>,
    entries: Vec<BudgetEntry>,
    cities: Vec<City>,
    activities: Vec<Activity>,
    next_id: i64,
    search_calls: usize,
    fail_writes: bool,
}

impl DevStore {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn check_writable(&self) -> Result<(), ApiError> {
        if self.fail_writes {
            return Err(rejected(503, "Dev backend is read-only right now"));
        }
        Ok(())
    }

    fn trip(&self, trip_id: i64) -> Result<&Trip, ApiError> {
        self.trips
            .iter()
            .find(|t| t.id == trip_id)
            .ok_or_else(|| rejected(404, "Trip not found"))
    }

    fn stops_of(&self, trip_id: i64) -> Vec<Stop> {
        let mut stops: Vec<Stop> = self
            .stops
            .iter()
            .filter(|s| s.trip_id == trip_id)
            .cloned()
            .collect();
        stops.sort_by_key(|s| s.order_index);
        stops
    }

    fn summary(&self, trip_id: i64) -> BudgetSummary {
        let mut summary = BudgetSummary::default();
        for entry in self.entries.iter().filter(|e| e.trip_id == trip_id) {
            match entry.category() {
                BudgetCategory::Transport => summary.transport += entry.amount,
                BudgetCategory::Stay => summary.stay += entry.amount,
                BudgetCategory::Activities => summary.activities += entry.amount,
                BudgetCategory::Meals => summary.meals += entry.amount,
                BudgetCategory::Other => summary.other += entry.amount,
            }
            summary.total_budget += entry.amount;
        }
        summary
    }

    fn with_rollups(&self, trip: &Trip) -> Trip {
        let mut trip = trip.clone();
        trip.stop_count = Some(self.stops.iter().filter(|s| s.trip_id == trip.id).count() as u32);
        trip.total_budget = Some(self.summary(trip.id).total_budget);
        trip
    }
}

fn rejected(status: u16, detail: &str) -> ApiError {
    ApiError::Rejected {
        status,
        detail: detail.to_string(),
    }
}

impl Default for DevBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl DevBackend {
    pub fn new() -> Self {
        Self {
            store: Arc::new(Mutex::new(seed_dev_store())),
        }
    }

    fn lock(&self) -> MutexGuard<'_, DevStore> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Number of city and activity searches served so far.
    pub fn search_calls(&self) -> usize {
        self.lock().search_calls
    }

    /// Make every write fail, to exercise error paths.
    pub fn set_fail_writes(&self, fail: bool) {
        self.lock().fail_writes = fail;
    }

    pub fn user(&self) -> User {
        self.lock().user.clone()
    }

    pub fn update_user(&self, update: &UserUpdate) -> Result<User, ApiError> {
        let mut store = self.lock();
        store.check_writable()?;
        if let Some(name) = &update.full_name {
            store.user.full_name = Some(name.clone());
        }
        if let Some(photo) = &update.profile_photo {
            store.user.profile_photo = Some(photo.clone());
        }
        Ok(store.user.clone())
    }

    pub fn list_trips(&self) -> Vec<Trip> {
        let store = self.lock();
        store.trips.iter().map(|t| store.with_rollups(t)).collect()
    }

    pub fn create_trip(&self, new_trip: &NewTrip) -> Result<Trip, ApiError> {
        new_trip
            .validate()
            .map_err(|e| rejected(400, &e.to_string()))?;
        let mut store = self.lock();
        store.check_writable()?;
        let trip = Trip {
            id: store.next_id(),
            user_id: store.user.id,
            name: new_trip.name.clone(),
            description: new_trip.description.clone(),
            start_date: new_trip.start_date,
            end_date: new_trip.end_date,
            cover_photo: new_trip.cover_photo.clone(),
            is_public: 0,
            public_url: None,
            created_at: Some(Local::now().naive_local()),
            stop_count: Some(0),
            total_budget: Some(0.0),
        };
        store.trips.push(trip.clone());
        Ok(trip)
    }

    pub fn get_trip(&self, trip_id: i64) -> Result<Trip, ApiError> {
        let store = self.lock();
        let trip = store.trip(trip_id)?;
        Ok(store.with_rollups(trip))
    }

    pub fn update_trip(&self, trip_id: i64, update: &TripUpdate) -> Result<Trip, ApiError> {
        let mut store = self.lock();
        store.check_writable()?;
        let mut updated = store.trip(trip_id)?.clone();
        update.apply_to(&mut updated);
        if updated.end_date < updated.start_date {
            return Err(rejected(400, "End date must not be before the start date"));
        }
        if let Some(trip) = store.trips.iter_mut().find(|t| t.id == trip_id) {
            *trip = updated.clone();
        }
        Ok(store.with_rollups(&updated))
    }

    pub fn delete_trip(&self, trip_id: i64) -> Result<(), ApiError> {
        let mut store = self.lock();
        store.check_writable()?;
        store.trip(trip_id)?;
        store.trips.retain(|t| t.id != trip_id);
        store.stops.retain(|s| s.trip_id != trip_id);
        store.entries.retain(|e| e.trip_id != trip_id);
        Ok(())
    }

    pub fn search_cities(&self, search: &CitySearch) -> Vec<City> {
        let mut store = self.lock();
        store.search_calls += 1;
        let query = search.query.to_lowercase();
        store
            .cities
            .iter()
            .filter(|c| {
                c.name.to_lowercase().contains(&query) || c.country.to_lowercase().contains(&query)
            })
            .filter(|c| {
                search
                    .country
                    .as_ref()
                    .map_or(true, |country| c.country.eq_ignore_ascii_case(country))
            })
            .cloned()
            .collect()
    }

    pub fn search_activities(&self, search: &ActivitySearch) -> Vec<Activity> {
        let mut store = self.lock();
        store.search_calls += 1;
        let query = search.query.to_lowercase();
        store
            .activities
            .iter()
            .filter(|a| a.name.to_lowercase().contains(&query))
            .filter(|a| search.category.map_or(true, |c| a.category == c))
            .filter(|a| search.max_cost.map_or(true, |max| a.estimated_cost <= max))
            .cloned()
            .collect()
    }

    pub fn list_stops(&self, trip_id: i64) -> Result<Vec<Stop>, ApiError> {
        let store = self.lock();
        store.trip(trip_id)?;
        Ok(store.stops_of(trip_id))
    }

    pub fn add_stop(&self, trip_id: i64, new_stop: &NewStop) -> Result<Stop, ApiError> {
        let mut store = self.lock();
        store.check_writable()?;
        store.trip(trip_id)?;
        let city = store
            .cities
            .iter()
            .find(|c| c.id == new_stop.city_id)
            .cloned()
            .ok_or_else(|| rejected(404, "City not found"))?;
        let order_index = store
            .stops
            .iter()
            .filter(|s| s.trip_id == trip_id)
            .map(|s| s.order_index + 1)
            .max()
            .unwrap_or(0);
        let stop = Stop {
            id: store.next_id(),
            trip_id,
            city_id: city.id,
            arrival_date: new_stop.arrival_date,
            departure_date: new_stop.departure_date,
            order_index,
            notes: new_stop.notes.clone(),
            city: Some(city),
            activities: vec![],
        };
        store.stops.push(stop.clone());
        Ok(stop)
    }

    pub fn delete_stop(&self, stop_id: i64) -> Result<(), ApiError> {
        let mut store = self.lock();
        store.check_writable()?;
        let before = store.stops.len();
        store.stops.retain(|s| s.id != stop_id);
        if store.stops.len() == before {
            return Err(rejected(404, "Stop not found"));
        }
        Ok(())
    }

    pub fn add_stop_activity(
        &self,
        stop_id: i64,
        new_activity: &NewStopActivity,
    ) -> Result<StopActivity, ApiError> {
        let mut store = self.lock();
        store.check_writable()?;
        let activity = store
            .activities
            .iter()
            .find(|a| a.id == new_activity.activity_id)
            .cloned()
            .ok_or_else(|| rejected(404, "Activity not found"))?;
        let id = store.next_id();
        let stop = store
            .stops
            .iter_mut()
            .find(|s| s.id == stop_id)
            .ok_or_else(|| rejected(404, "Stop not found"))?;
        let item = StopActivity {
            id,
            stop_id,
            activity_id: activity.id,
            scheduled_time: new_activity.scheduled_time,
            notes: new_activity.notes.clone(),
            activity: Some(activity),
        };
        stop.activities.push(item.clone());
        // Listings expand the activity, the create response does not.
        Ok(StopActivity {
            activity: None,
            ..item
        })
    }

    pub fn remove_stop_activity(&self, stop_id: i64, item_id: i64) -> Result<(), ApiError> {
        let mut store = self.lock();
        store.check_writable()?;
        let stop = store
            .stops
            .iter_mut()
            .find(|s| s.id == stop_id)
            .ok_or_else(|| rejected(404, "Stop not found"))?;
        let before = stop.activities.len();
        stop.activities.retain(|a| a.id != item_id);
        if stop.activities.len() == before {
            return Err(rejected(404, "Activity not found on this stop"));
        }
        Ok(())
    }

    pub fn budget_entries(&self, trip_id: i64) -> Result<Vec<BudgetEntry>, ApiError> {
        let store = self.lock();
        store.trip(trip_id)?;
        Ok(store
            .entries
            .iter()
            .filter(|e| e.trip_id == trip_id)
            .cloned()
            .collect())
    }

    pub fn add_budget_entry(
        &self,
        trip_id: i64,
        entry: &NewBudgetEntry,
    ) -> Result<BudgetEntry, ApiError> {
        let mut store = self.lock();
        store.check_writable()?;
        store.trip(trip_id)?;
        let entry = BudgetEntry {
            id: store.next_id(),
            trip_id,
            category: entry.category.to_string(),
            amount: entry.amount,
            description: entry.description.clone(),
        };
        store.entries.push(entry.clone());
        Ok(entry)
    }

    pub fn budget_summary(&self, trip_id: i64) -> Result<BudgetSummary, ApiError> {
        let store = self.lock();
        store.trip(trip_id)?;
        Ok(store.summary(trip_id))
    }

    /// Only public trips can be read through a share link.
    pub fn shared_trip(&self, trip_id: i64) -> Result<SharedTrip, ApiError> {
        let store = self.lock();
        let trip = store
            .trip(trip_id)
            .ok()
            .filter(|t| t.is_public())
            .ok_or_else(|| rejected(404, "Trip not found or not shared"))?;
        Ok(SharedTrip {
            trip: store.with_rollups(trip),
            stops: store.stops_of(trip_id),
        })
    }
}

fn city(id: i64, name: &str, country: &str, cost_index: f64, popularity: i64, blurb: &str) -> City {
    City {
        id,
        name: name.to_string(),
        country: country.to_string(),
        region: None,
        description: Some(blurb.to_string()),
        cost_index,
        popularity,
        image_url: None,
    }
}

fn activity(
    id: i64,
    city_id: i64,
    name: &str,
    category: ActivityCategory,
    estimated_cost: f64,
    duration_hours: f64,
) -> Activity {
    Activity {
        id,
        name: name.to_string(),
        description: None,
        category,
        estimated_cost,
        duration_hours,
        image_url: None,
        city_id: Some(city_id),
    }
}

fn seed_dev_store() -> DevStore {
    use ActivityCategory::*;

    let cities = vec![
        city(1, "Lisbon", "Portugal", 85.0, 88, "Hills, trams and tiled facades."),
        city(2, "Porto", "Portugal", 75.0, 80, "Port cellars along the Douro."),
        city(3, "Reykjavik", "Iceland", 160.0, 70, "Gateway to the ring road."),
        city(4, "Tokyo", "Japan", 120.0, 97, "Neon, ramen and quiet shrines."),
        city(5, "Kyoto", "Japan", 110.0, 92, "Temples and moss gardens."),
        city(6, "Paris", "France", 140.0, 99, "Museums and long lunches."),
        city(7, "Marrakesh", "Morocco", 55.0, 76, "Souks and riads."),
    ];
    let activities = vec![
        activity(101, 1, "Tram 28 ride", Sightseeing, 3.0, 1.0),
        activity(102, 1, "Pastel de nata tasting", Food, 12.0, 1.5),
        activity(103, 1, "Fado evening", Cultural, 35.0, 3.0),
        activity(104, 2, "Port wine cellar tour", Food, 20.0, 2.0),
        activity(105, 3, "Blue Lagoon soak", Relaxation, 90.0, 3.0),
        activity(106, 3, "Glacier hike", Adventure, 140.0, 6.0),
        activity(107, 4, "Tsukiji outer market", Food, 30.0, 2.0),
        activity(108, 4, "Senso-ji temple", Cultural, 0.0, 1.5),
        activity(109, 5, "Fushimi Inari hike", Adventure, 0.0, 3.0),
        activity(110, 5, "Onsen afternoon", Relaxation, 25.0, 2.0),
        activity(111, 6, "Louvre", Cultural, 22.0, 4.0),
        activity(112, 6, "Seine cruise", Sightseeing, 18.0, 1.0),
        activity(113, 7, "Atlas day trip", Adventure, 45.0, 9.0),
    ];

    let start = Local::now().date_naive().and_time(NaiveTime::MIN) + Duration::days(30);
    let day = |offset: i64| -> NaiveDateTime { start + Duration::days(offset) };

    let trip = |id: i64, name: &str, description: &str, from: i64, to: i64, public: bool| Trip {
        id,
        user_id: 1,
        name: name.to_string(),
        description: Some(description.to_string()),
        start_date: day(from),
        end_date: day(to),
        cover_photo: None,
        is_public: i32::from(public),
        public_url: None,
        created_at: None,
        stop_count: None,
        total_budget: None,
    };
    let trips = vec![
        trip(1, "Portugal by train", "Lisbon to Porto", 0, 7, true),
        trip(2, "Japan in autumn", "Temples and food", 60, 72, false),
    ];

    let stop = |id: i64, trip_id: i64, city: &City, from: i64, to: i64, order_index: i32| Stop {
        id,
        trip_id,
        city_id: city.id,
        arrival_date: day(from),
        departure_date: day(to),
        order_index,
        notes: None,
        city: Some(city.clone()),
        activities: vec![],
    };
    let scheduled = |id: i64, stop_id: i64, activity: &Activity| StopActivity {
        id,
        stop_id,
        activity_id: activity.id,
        scheduled_time: None,
        notes: None,
        activity: Some(activity.clone()),
    };

    let mut lisbon = stop(201, 1, &cities[0], 0, 3, 0);
    lisbon.activities = vec![
        scheduled(301, 201, &activities[0]),
        scheduled(302, 201, &activities[2]),
    ];
    let mut porto = stop(202, 1, &cities[1], 5, 7, 1);
    porto.activities = vec![scheduled(303, 202, &activities[3])];
    let tokyo = stop(203, 2, &cities[3], 60, 65, 0);

    let entry = |id: i64, trip_id: i64, category: BudgetCategory, amount: f64, what: &str| {
        BudgetEntry {
            id,
            trip_id,
            category: category.to_string(),
            amount,
            description: Some(what.to_string()),
        }
    };

    DevStore {
        user: User {
            id: 1,
            email: "dev@localhost".to_string(),
            username: Some("dev".to_string()),
            full_name: Some("Dev User".to_string()),
            profile_photo: None,
            created_at: None,
        },
        trips,
        stops: vec![lisbon, porto, tokyo],
        entries: vec![
            entry(401, 1, BudgetCategory::Transport, 120.0, "Alfa Pendular tickets"),
            entry(402, 1, BudgetCategory::Stay, 480.0, "Guesthouses"),
            entry(403, 1, BudgetCategory::Meals, 210.0, "Food"),
            entry(404, 2, BudgetCategory::Transport, 900.0, "Flights"),
        ],
        cities,
        activities,
        next_id: 1000,
        search_calls: 0,
        fail_writes: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ActivityCategory::Food;

    #[test]
    fn trips_carry_rollups() {
        let backend = DevBackend::new();
        let trips = backend.list_trips();
        assert_eq!(trips[0].stop_count, Some(2));
        assert_eq!(trips[0].total_budget, Some(810.0));
    }

    #[test]
    fn unknown_trip_is_not_found() {
        let backend = DevBackend::new();
        assert!(backend.get_trip(999).unwrap_err().is_not_found());
        assert!(backend.delete_trip(999).unwrap_err().is_not_found());
    }

    #[test]
    fn added_stop_goes_last_with_city_embedded() {
        let backend = DevBackend::new();
        let trip = backend.get_trip(1).unwrap();
        let stops = backend.list_stops(1).unwrap();
        let (arrival, departure) = globetrotter::domain::suggest_stop_dates(&trip, &stops);
        let stop = backend
            .add_stop(
                1,
                &NewStop {
                    city_id: 7,
                    arrival_date: arrival,
                    departure_date: departure,
                    notes: None,
                },
            )
            .unwrap();
        assert_eq!(stop.order_index, 2);
        assert_eq!(stop.city_name(), "Marrakesh");
        assert_eq!(backend.list_stops(1).unwrap().last().map(|s| s.id), Some(stop.id));
    }

    #[test]
    fn added_activity_is_returned_bare_but_listed_expanded() {
        let backend = DevBackend::new();
        let item = backend
            .add_stop_activity(202, &NewStopActivity::new(104))
            .unwrap();
        assert_eq!(item.activity_id, 104);
        assert!(item.activity.is_none());

        let stops = backend.list_stops(1).unwrap();
        let listed = stops[1].activities.last().unwrap();
        assert_eq!(listed.id, item.id);
        assert_eq!(listed.name(), "Port wine cellar tour");
    }

    #[test]
    fn searches_are_counted_and_filtered() {
        let backend = DevBackend::new();
        let found = backend.search_activities(&ActivitySearch::new("tour", Some(Food)));
        assert_eq!(found.len(), 1);
        let found = backend.search_cities(&CitySearch::new("japan"));
        assert_eq!(found.len(), 2);
        assert_eq!(backend.search_calls(), 2);
    }

    #[test]
    fn summary_groups_entries_by_category() {
        let backend = DevBackend::new();
        let summary = backend.budget_summary(1).unwrap();
        assert_eq!(summary.transport, 120.0);
        assert_eq!(summary.stay, 480.0);
        assert_eq!(summary.total_budget, 810.0);
    }

    #[test]
    fn private_trips_are_not_shared() {
        let backend = DevBackend::new();
        assert!(backend.shared_trip(1).is_ok());
        assert!(backend.shared_trip(2).unwrap_err().is_not_found());
    }

    #[test]
    fn failing_writes_leave_data_untouched() {
        let backend = DevBackend::new();
        backend.set_fail_writes(true);
        assert!(backend.delete_trip(1).is_err());
        assert_eq!(backend.list_trips().len(), 2);
    }
}
