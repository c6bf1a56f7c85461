use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::datetime;
use crate::timeline::trip_duration_days;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    pub id: i64,
    #[serde(default)]
    pub user_id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(with = "datetime")]
    pub start_date: NaiveDateTime,
    #[serde(with = "datetime")]
    pub end_date: NaiveDateTime,
    #[serde(default)]
    pub cover_photo: Option<String>,
    #[serde(default)]
    pub is_public: i32,
    #[serde(default)]
    pub public_url: Option<String>,
    #[serde(default, with = "datetime::option")]
    pub created_at: Option<NaiveDateTime>,
    /// Derived server-side; absent on older API versions.
    #[serde(default)]
    pub stop_count: Option<u32>,
    #[serde(default)]
    pub total_budget: Option<f64>,
}

impl Trip {
    pub fn duration_days(&self) -> i64 {
        trip_duration_days(self.start_date, self.end_date)
    }

    pub fn is_public(&self) -> bool {
        self.is_public != 0
    }

    pub fn start_day(&self) -> NaiveDate {
        self.start_date.date()
    }

    pub fn end_day(&self) -> NaiveDate {
        self.end_date.date()
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TripValidationError {
    #[error("Trip name is required")]
    MissingName,
    #[error("End date must not be before the start date")]
    EndBeforeStart,
}

/// Body of `POST /trips/`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewTrip {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(with = "datetime")]
    pub start_date: NaiveDateTime,
    #[serde(with = "datetime")]
    pub end_date: NaiveDateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_photo: Option<String>,
}

impl NewTrip {
    /// Client-side form check only; the API remains authoritative.
    pub fn validate(&self) -> Result<(), TripValidationError> {
        validate_trip_fields(&self.name, self.start_date, self.end_date)
    }
}

pub fn validate_trip_fields(
    name: &str,
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> Result<(), TripValidationError> {
    if name.trim().is_empty() {
        return Err(TripValidationError::MissingName);
    }
    if end < start {
        return Err(TripValidationError::EndBeforeStart);
    }
    Ok(())
}

/// Body of `PUT /trips/{id}`. Unset fields are left untouched by the API.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TripUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "datetime::option"
    )]
    pub start_date: Option<NaiveDateTime>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "datetime::option"
    )]
    pub end_date: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_photo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_public: Option<i32>,
}

impl TripUpdate {
    pub fn visibility(public: bool) -> Self {
        Self {
            is_public: Some(i32::from(public)),
            ..Default::default()
        }
    }

    /// Apply the update locally, mirroring what the API does.
    pub fn apply_to(&self, trip: &mut Trip) {
        if let Some(name) = &self.name {
            trip.name = name.clone();
        }
        if let Some(description) = &self.description {
            trip.description = Some(description.clone());
        }
        if let Some(start) = self.start_date {
            trip.start_date = start;
        }
        if let Some(end) = self.end_date {
            trip.end_date = end;
        }
        if let Some(cover) = &self.cover_photo {
            trip.cover_photo = Some(cover.clone());
        }
        if let Some(is_public) = self.is_public {
            trip.is_public = is_public;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn trip_from_api_json() {
        let trip: Trip = serde_json::from_str(
            r#"{
                "id": 7,
                "user_id": 2,
                "name": "Iberia",
                "description": null,
                "start_date": "2024-06-01T00:00:00",
                "end_date": "2024-06-04T00:00:00",
                "is_public": 1,
                "created_at": "2024-05-01T09:30:00.123456"
            }"#,
        )
        .unwrap();
        assert_eq!(trip.duration_days(), 3);
        assert!(trip.is_public());
        assert_eq!(trip.stop_count, None);
    }

    #[test]
    fn validation_rejects_blank_name_and_reversed_dates() {
        assert_eq!(
            validate_trip_fields("  ", day(1), day(2)),
            Err(TripValidationError::MissingName)
        );
        assert_eq!(
            validate_trip_fields("Alps", day(4), day(1)),
            Err(TripValidationError::EndBeforeStart)
        );
        assert_eq!(validate_trip_fields("Alps", day(1), day(1)), Ok(()));
    }

    #[test]
    fn update_serializes_only_set_fields() {
        let update = TripUpdate::visibility(true);
        assert_eq!(
            serde_json::to_string(&update).unwrap(),
            r#"{"is_public":1}"#
        );

        let update = TripUpdate {
            end_date: Some(day(9)),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_string(&update).unwrap(),
            r#"{"end_date":"2024-06-09T00:00:00"}"#
        );
    }
}
