//! Search-as-you-type for the pickers and the city explorer. Queries shorter
//! than the minimum never reach the API; each view has its own fallback.

use globetrotter::domain::{Activity, ActivityCategory, City, SearchTerm};

use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CitySearchTarget {
    /// "Add a city" picker on the trip detail view.
    Picker,
    /// Standalone catalog browser.
    Explorer,
}

impl App {
    fn city_search_mut(&mut self, target: CitySearchTarget) -> &mut SearchState<City> {
        match target {
            CitySearchTarget::Picker => &mut self.city_picker,
            CitySearchTarget::Explorer => &mut self.cities,
        }
    }

    /// React to an edited city search box. Returns the query to send, if any.
    pub fn city_search_changed(&mut self, target: CitySearchTarget) -> Option<String> {
        let search = self.city_search_mut(target);
        match SearchTerm::classify(&search.input.value) {
            SearchTerm::Query(query) => Some(query),
            SearchTerm::Browse => {
                let fallback = match target {
                    CitySearchTarget::Picker => Vec::new(),
                    CitySearchTarget::Explorer => search.catalog.clone(),
                };
                search.set_results(fallback);
                None
            }
        }
    }

    /// Apply results unless the box has moved on to a different query.
    pub fn apply_city_results(&mut self, target: CitySearchTarget, query: &str, cities: Vec<City>) {
        let search = self.city_search_mut(target);
        if SearchTerm::classify(&search.input.value) == SearchTerm::Query(query.to_string()) {
            search.set_results(cities);
        } else {
            tracing::debug!(query, "dropping stale city results");
        }
    }

    pub fn open_city_picker(&mut self) {
        self.city_picker.reset();
        self.navigate_to(View::CityPicker);
    }

    pub fn open_city_explorer(&mut self) {
        self.cities.reset();
        self.navigate_to(View::Cities);
    }

    pub fn set_city_catalog(&mut self, cities: Vec<City>) {
        self.cities.catalog = cities;
        if SearchTerm::classify(&self.cities.input.value).is_browse() {
            self.cities.set_results(self.cities.catalog.clone());
        }
    }

    pub fn open_activity_picker(&mut self, stop_id: i64) {
        self.activity_picker = ActivityPicker {
            stop_id: Some(stop_id),
            ..ActivityPicker::default()
        };
        self.navigate_to(View::ActivityPicker);
    }

    pub fn cycle_activity_category(&mut self) -> Option<(String, Option<ActivityCategory>)> {
        self.activity_picker.category = ActivityCategory::cycle(self.activity_picker.category);
        self.activity_search_changed()
    }

    /// React to an edited activity search box or category. Returns the query
    /// and category to send, if any.
    pub fn activity_search_changed(&mut self) -> Option<(String, Option<ActivityCategory>)> {
        let picker = &mut self.activity_picker;
        match SearchTerm::classify(&picker.search.input.value) {
            SearchTerm::Query(query) => Some((query, picker.category)),
            SearchTerm::Browse => {
                let local = filter_by_category(&picker.search.catalog, picker.category);
                picker.search.set_results(local);
                None
            }
        }
    }

    pub fn apply_activity_results(
        &mut self,
        query: &str,
        category: Option<ActivityCategory>,
        activities: Vec<Activity>,
    ) {
        let picker = &mut self.activity_picker;
        let current = SearchTerm::classify(&picker.search.input.value);
        if current == SearchTerm::Query(query.to_string()) && picker.category == category {
            picker.search.set_results(activities);
        } else {
            tracing::debug!(query, "dropping stale activity results");
        }
    }

    pub fn set_activity_catalog(&mut self, activities: Vec<Activity>) {
        self.activity_picker.search.catalog = activities;
        self.activity_search_changed();
    }
}

fn filter_by_category(catalog: &[Activity], category: Option<ActivityCategory>) -> Vec<Activity> {
    catalog
        .iter()
        .filter(|a| category.map_or(true, |c| a.category == c))
        .cloned()
        .collect()
}
