use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::{datetime, Activity, City, Trip};

/// Length of a newly added stop when the user has not picked dates.
pub const DEFAULT_STOP_NIGHTS: i64 = 3;

/// A city visit within a trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    pub id: i64,
    #[serde(default)]
    pub trip_id: i64,
    pub city_id: i64,
    #[serde(with = "datetime")]
    pub arrival_date: NaiveDateTime,
    #[serde(with = "datetime")]
    pub departure_date: NaiveDateTime,
    #[serde(default)]
    pub order_index: i32,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub city: Option<City>,
    #[serde(default)]
    pub activities: Vec<StopActivity>,
}

impl Stop {
    /// Whether the calendar day falls within `[arrival, departure]`, inclusive.
    pub fn covers(&self, day: NaiveDate) -> bool {
        self.arrival_date.date() <= day && day <= self.departure_date.date()
    }

    pub fn city_name(&self) -> String {
        self.city
            .as_ref()
            .map(|c| c.name.clone())
            .unwrap_or_else(|| format!("City #{}", self.city_id))
    }

    pub fn city_label(&self) -> String {
        self.city
            .as_ref()
            .map(City::label)
            .unwrap_or_else(|| format!("City #{}", self.city_id))
    }

    pub fn activities_cost(&self) -> f64 {
        self.activities.iter().map(StopActivity::estimated_cost).sum()
    }
}

/// An activity scheduled at a stop. The catalog activity is embedded when the
/// API expands it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StopActivity {
    pub id: i64,
    #[serde(default)]
    pub stop_id: i64,
    pub activity_id: i64,
    #[serde(default, with = "datetime::option")]
    pub scheduled_time: Option<NaiveDateTime>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub activity: Option<Activity>,
}

impl StopActivity {
    pub fn name(&self) -> String {
        self.activity
            .as_ref()
            .map(|a| a.name.clone())
            .unwrap_or_else(|| format!("Activity #{}", self.activity_id))
    }

    pub fn estimated_cost(&self) -> f64 {
        self.activity.as_ref().map_or(0.0, |a| a.estimated_cost)
    }
}

/// Body of `POST /itinerary/{trip_id}/stops`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewStop {
    pub city_id: i64,
    #[serde(with = "datetime")]
    pub arrival_date: NaiveDateTime,
    #[serde(with = "datetime")]
    pub departure_date: NaiveDateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Body of `POST /itinerary/stops/{stop_id}/activities`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewStopActivity {
    pub activity_id: i64,
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "datetime::option"
    )]
    pub scheduled_time: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl NewStopActivity {
    pub fn new(activity_id: i64) -> Self {
        Self {
            activity_id,
            scheduled_time: None,
            notes: None,
        }
    }
}

/// Dates for a stop appended to the itinerary: the first stop arrives on the
/// trip start, later stops the day after the previous departure.
pub fn suggest_stop_dates(trip: &Trip, stops: &[Stop]) -> (NaiveDateTime, NaiveDateTime) {
    let arrival = match stops.iter().max_by_key(|s| s.order_index) {
        Some(last) => last.departure_date + Duration::days(1),
        None => trip.start_date,
    };
    (arrival, arrival + Duration::days(DEFAULT_STOP_NIGHTS))
}

/// Response of the public `GET /shared/{trip_id}` read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SharedTrip {
    pub trip: Trip,
    #[serde(default)]
    pub stops: Vec<Stop>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ItineraryTotals {
    pub stops: usize,
    pub activities: usize,
    pub activities_cost: f64,
}

impl ItineraryTotals {
    pub fn of(stops: &[Stop]) -> Self {
        Self {
            stops: stops.len(),
            activities: stops.iter().map(|s| s.activities.len()).sum(),
            activities_cost: stops.iter().map(Stop::activities_cost).sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ActivityCategory;

    fn at(month: u32, day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, month, day)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn trip() -> Trip {
        Trip {
            id: 1,
            user_id: 1,
            name: "Summer".to_string(),
            description: None,
            start_date: at(6, 1),
            end_date: at(6, 20),
            cover_photo: None,
            is_public: 0,
            public_url: None,
            created_at: None,
            stop_count: None,
            total_budget: None,
        }
    }

    fn stop(id: i64, order_index: i32, arrival: NaiveDateTime, departure: NaiveDateTime) -> Stop {
        Stop {
            id,
            trip_id: 1,
            city_id: id * 10,
            arrival_date: arrival,
            departure_date: departure,
            order_index,
            notes: None,
            city: None,
            activities: vec![],
        }
    }

    fn scheduled(id: i64, cost: f64) -> StopActivity {
        StopActivity {
            id,
            stop_id: 1,
            activity_id: id,
            scheduled_time: None,
            notes: None,
            activity: Some(Activity {
                id,
                name: format!("Activity {id}"),
                description: None,
                category: ActivityCategory::Food,
                estimated_cost: cost,
                duration_hours: 2.0,
                image_url: None,
                city_id: None,
            }),
        }
    }

    #[test]
    fn first_stop_starts_on_trip_start() {
        let (arrival, departure) = suggest_stop_dates(&trip(), &[]);
        assert_eq!(arrival, at(6, 1));
        assert_eq!(departure, at(6, 4));
    }

    #[test]
    fn next_stop_follows_last_departure() {
        let stops = vec![
            stop(1, 0, at(6, 1), at(6, 4)),
            stop(2, 1, at(6, 5), at(6, 8)),
        ];
        let (arrival, departure) = suggest_stop_dates(&trip(), &stops);
        assert_eq!(arrival, at(6, 9));
        assert_eq!(departure, at(6, 12));
    }

    #[test]
    fn covers_is_inclusive_on_both_ends() {
        let s = stop(1, 0, at(6, 2), at(6, 4));
        assert!(!s.covers(at(6, 1).date()));
        assert!(s.covers(at(6, 2).date()));
        assert!(s.covers(at(6, 4).date()));
        assert!(!s.covers(at(6, 5).date()));
    }

    #[test]
    fn totals_sum_embedded_activity_costs() {
        let mut first = stop(1, 0, at(6, 1), at(6, 3));
        first.activities = vec![scheduled(1, 25.0), scheduled(2, 40.5)];
        let mut second = stop(2, 1, at(6, 4), at(6, 6));
        second.activities = vec![StopActivity {
            activity: None,
            ..scheduled(3, 99.0)
        }];

        let totals = ItineraryTotals::of(&[first, second]);
        assert_eq!(totals.stops, 2);
        assert_eq!(totals.activities, 3);
        assert_eq!(totals.activities_cost, 65.5);
    }

    #[test]
    fn stop_without_embedded_city_has_fallback_label() {
        let s = stop(4, 0, at(6, 1), at(6, 2));
        assert_eq!(s.city_label(), "City #40");
    }
}
