//! Day-by-day view of a trip.

use chrono::{NaiveDate, NaiveDateTime};

use crate::domain::{Stop, StopActivity, Trip};

const MILLIS_PER_DAY: i64 = 86_400_000;

/// One calendar day of a trip. `stop` is `None` on travel days.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineDay<'a> {
    pub day_number: u32,
    pub date: NaiveDate,
    pub stop: Option<&'a Stop>,
}

impl<'a> TimelineDay<'a> {
    pub fn activities(&self) -> &'a [StopActivity] {
        self.stop.map_or(&[], |s| s.activities.as_slice())
    }

    pub fn is_travel_day(&self) -> bool {
        self.stop.is_none()
    }
}

/// Whole days between two instants, rounded up. Zero when `end` is not after
/// `start`.
pub fn trip_duration_days(start: NaiveDateTime, end: NaiveDateTime) -> i64 {
    let millis = (end - start).num_milliseconds();
    if millis <= 0 {
        return 0;
    }
    (millis + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY
}

pub fn build_timeline<'a>(trip: &Trip, stops: &'a [Stop]) -> Vec<TimelineDay<'a>> {
    timeline_between(trip.start_day(), trip.end_day(), stops)
}

/// One entry per calendar day in `[first, last]`. Each day gets the first stop,
/// in itinerary order, whose arrival/departure days contain it.
pub fn timeline_between<'a>(
    first: NaiveDate,
    last: NaiveDate,
    stops: &'a [Stop],
) -> Vec<TimelineDay<'a>> {
    let mut ordered: Vec<&Stop> = stops.iter().collect();
    ordered.sort_by_key(|s| s.order_index);

    let mut days = Vec::new();
    let mut current = Some(first);
    while let Some(date) = current.filter(|d| *d <= last) {
        days.push(TimelineDay {
            day_number: days.len() as u32 + 1,
            date,
            stop: ordered.iter().copied().find(|s| s.covers(date)),
        });
        current = date.succ_opt();
    }
    days
}
