use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use globetrotter::domain::Trip;

use super::*;

impl App {
    pub fn set_trips(&mut self, trips: Vec<Trip>) {
        self.trips = trips;
        self.refresh_trip_filter();
    }

    /// Recompute the dashboard list from the filter text. Matches are ranked
    /// best first; an empty filter keeps the server order.
    pub fn refresh_trip_filter(&mut self) {
        let query = self.trip_filter.value.trim();
        if query.is_empty() {
            self.filtered_trips = (0..self.trips.len()).collect();
        } else {
            let matcher = SkimMatcherV2::default();
            let mut scored: Vec<(i64, usize)> = self
                .trips
                .iter()
                .enumerate()
                .filter_map(|(i, trip)| {
                    let haystack = match &trip.description {
                        Some(d) => format!("{} {}", trip.name, d),
                        None => trip.name.clone(),
                    };
                    matcher.fuzzy_match(&haystack, query).map(|score| (score, i))
                })
                .collect();
            scored.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
            self.filtered_trips = scored.into_iter().map(|(_, i)| i).collect();
        }
        if self.trip_index >= self.filtered_trips.len() {
            self.trip_index = self.filtered_trips.len().saturating_sub(1);
        }
    }

    pub fn selected_trip(&self) -> Option<&Trip> {
        self.filtered_trips
            .get(self.trip_index)
            .and_then(|&i| self.trips.get(i))
    }

    pub fn select_next_trip(&mut self) {
        if self.trip_index + 1 < self.filtered_trips.len() {
            self.trip_index += 1;
        }
    }

    pub fn select_previous_trip(&mut self) {
        self.trip_index = self.trip_index.saturating_sub(1);
    }

    pub fn remove_trip(&mut self, trip_id: i64) {
        self.trips.retain(|t| t.id != trip_id);
        if self.detail.as_ref().is_some_and(|d| d.trip.id == trip_id) {
            self.detail = None;
        }
        self.refresh_trip_filter();
    }

    // Trip detail: stops and the activities within the selected stop.

    pub fn select_next_stop(&mut self) {
        if let Some(detail) = self.detail.as_mut() {
            if detail.stop_index + 1 < detail.stops.len() {
                detail.stop_index += 1;
                detail.activity_index = None;
            }
        }
    }

    pub fn select_previous_stop(&mut self) {
        if let Some(detail) = self.detail.as_mut() {
            if detail.stop_index > 0 {
                detail.stop_index -= 1;
                detail.activity_index = None;
            }
        }
    }

    /// Step through the selected stop's activities, then back to the stop.
    pub fn cycle_stop_activity(&mut self, forward: bool) {
        let Some(detail) = self.detail.as_mut() else {
            return;
        };
        let count = detail
            .selected_stop()
            .map_or(0, |stop| stop.activities.len());
        if count == 0 {
            detail.activity_index = None;
            return;
        }
        detail.activity_index = match (detail.activity_index, forward) {
            (None, true) => Some(0),
            (None, false) => Some(count - 1),
            (Some(i), true) if i + 1 < count => Some(i + 1),
            (Some(i), false) if i > 0 => Some(i - 1),
            _ => None,
        };
    }

    pub fn scroll_timeline(&mut self, down: bool) {
        if let Some(timeline) = self.timeline.as_mut() {
            let days = timeline.trip.duration_days().max(0) as usize + 1;
            timeline.scroll = if down {
                (timeline.scroll + 1).min(days.saturating_sub(1))
            } else {
                timeline.scroll.saturating_sub(1)
            };
        }
    }

    pub fn select_next_budget_entry(&mut self) {
        if let Some(budget) = self.budget.as_mut() {
            if budget.entry_index + 1 < budget.entries.len() {
                budget.entry_index += 1;
            }
        }
    }

    pub fn select_previous_budget_entry(&mut self) {
        if let Some(budget) = self.budget.as_mut() {
            budget.entry_index = budget.entry_index.saturating_sub(1);
        }
    }

    pub fn scroll_shared(&mut self, down: bool) {
        let stops = self.shared.as_ref().map_or(0, |s| s.stops.len());
        self.shared_scroll = if down {
            (self.shared_scroll + 1).min(stops.saturating_sub(1))
        } else {
            self.shared_scroll.saturating_sub(1)
        };
    }
}
