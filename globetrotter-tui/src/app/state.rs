use globetrotter::domain::{
    Activity, ActivityCategory, BudgetEntry, BudgetSummary, Stop, StopActivity, Trip,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Login,
    Register,
    Dashboard,
    TripForm,
    TripDetail,
    CityPicker,
    ActivityPicker,
    Timeline,
    Budget,
    BudgetEntryForm,
    Cities,
    Profile,
    Shared,
    Confirm,
}

impl View {
    /// Views that are only reachable with a logged-in session.
    pub fn requires_session(self) -> bool {
        !matches!(self, View::Login | View::Register | View::Shared)
    }

    pub fn title(self) -> &'static str {
        match self {
            View::Login => "Log in",
            View::Register => "Create account",
            View::Dashboard => "My trips",
            View::TripForm => "Trip",
            View::TripDetail => "Itinerary",
            View::CityPicker => "Add a city",
            View::ActivityPicker => "Add an activity",
            View::Timeline => "Timeline",
            View::Budget => "Budget",
            View::BudgetEntryForm => "New expense",
            View::Cities => "Explore cities",
            View::Profile => "Profile",
            View::Shared => "Shared itinerary",
            View::Confirm => "Confirm",
        }
    }
}

/// A text input with mid-string cursor support.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextInput {
    pub value: String,
    pub cursor: usize,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_str(s: &str) -> Self {
        Self {
            value: s.to_string(),
            cursor: s.len(),
        }
    }

    /// Insert a character at the cursor position.
    pub fn insert(&mut self, c: char) {
        self.value.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Delete the character immediately before the cursor (backspace).
    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let new_cursor = self.prev_boundary(self.cursor);
        self.value.drain(new_cursor..self.cursor);
        self.cursor = new_cursor;
    }

    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor = self.prev_boundary(self.cursor);
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.value.len() {
            self.cursor = self.next_boundary(self.cursor);
        }
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }
    pub fn end(&mut self) {
        self.cursor = self.value.len();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Returns the string split at the cursor: (before, after).
    pub fn split_at_cursor(&self) -> (&str, &str) {
        (&self.value[..self.cursor], &self.value[self.cursor..])
    }

    fn prev_boundary(&self, pos: usize) -> usize {
        let mut p = pos;
        loop {
            p -= 1;
            if self.value.is_char_boundary(p) {
                return p;
            }
        }
    }
    fn next_boundary(&self, pos: usize) -> usize {
        let mut p = pos + 1;
        while p <= self.value.len() && !self.value.is_char_boundary(p) {
            p += 1;
        }
        p
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    pub label: &'static str,
    pub input: TextInput,
    /// Rendered as bullets (passwords).
    pub masked: bool,
    pub placeholder: &'static str,
}

impl FormField {
    pub fn text(label: &'static str) -> Self {
        Self {
            label,
            input: TextInput::new(),
            masked: false,
            placeholder: "",
        }
    }

    pub fn secret(label: &'static str) -> Self {
        Self {
            masked: true,
            ..Self::text(label)
        }
    }

    pub fn hint(mut self, placeholder: &'static str) -> Self {
        self.placeholder = placeholder;
        self
    }
}

/// A vertical stack of inputs with one focused field and an inline error
/// banner.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Form {
    pub fields: Vec<FormField>,
    pub focused: usize,
    pub error: Option<String>,
}

impl Form {
    pub fn new(fields: Vec<FormField>) -> Self {
        Self {
            fields,
            focused: 0,
            error: None,
        }
    }

    pub fn value(&self, index: usize) -> &str {
        self.fields
            .get(index)
            .map(|f| f.input.value.as_str())
            .unwrap_or("")
    }

    pub fn set_value(&mut self, index: usize, value: &str) {
        if let Some(field) = self.fields.get_mut(index) {
            field.input = TextInput::from_str(value);
        }
    }

    pub fn focused_input_mut(&mut self) -> Option<&mut TextInput> {
        self.fields.get_mut(self.focused).map(|f| &mut f.input)
    }

    pub fn next_field(&mut self) {
        if !self.fields.is_empty() {
            self.focused = (self.focused + 1) % self.fields.len();
        }
    }

    pub fn previous_field(&mut self) {
        if !self.fields.is_empty() {
            self.focused = (self.focused + self.fields.len() - 1) % self.fields.len();
        }
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn clear(&mut self) {
        for field in &mut self.fields {
            field.input.clear();
        }
        self.focused = 0;
        self.error = None;
    }
}

/// What a confirmation dialog will do when accepted.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfirmKind {
    DeleteTrip { trip_id: i64 },
    DeleteStop { trip_id: i64, stop_id: i64 },
    RemoveStopActivity { trip_id: i64, stop_id: i64, item_id: i64 },
    Logout,
    DeleteAccount,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConfirmContext {
    pub kind: ConfirmKind,
    pub title: String,
    pub label: String,
    /// View rendered behind the dialog and restored on cancel.
    pub origin: View,
}

/// Search box plus result list shared by the pickers and the city explorer.
/// `catalog` caches the unfiltered listing for views that browse without a
/// query.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchState<T> {
    pub input: TextInput,
    pub results: Vec<T>,
    pub catalog: Vec<T>,
    pub index: usize,
    pub list_focused: bool,
}

impl<T> Default for SearchState<T> {
    fn default() -> Self {
        Self {
            input: TextInput::new(),
            results: Vec::new(),
            catalog: Vec::new(),
            index: 0,
            list_focused: false,
        }
    }
}

impl<T> SearchState<T> {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn selected(&self) -> Option<&T> {
        self.results.get(self.index)
    }

    pub fn set_results(&mut self, results: Vec<T>) {
        self.results = results;
        if self.index >= self.results.len() {
            self.index = self.results.len().saturating_sub(1);
        }
    }

    pub fn select_next(&mut self) {
        if self.index + 1 < self.results.len() {
            self.index += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.index = self.index.saturating_sub(1);
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ActivityPicker {
    pub search: SearchState<Activity>,
    pub category: Option<ActivityCategory>,
    pub stop_id: Option<i64>,
}

/// Everything the trip detail view shows, loaded together.
#[derive(Debug, Clone, PartialEq)]
pub struct TripDetail {
    pub trip: Trip,
    pub stops: Vec<Stop>,
    pub budget: BudgetSummary,
    pub stop_index: usize,
    /// Highlighted activity within the selected stop.
    pub activity_index: Option<usize>,
}

impl TripDetail {
    pub fn new(trip: Trip, mut stops: Vec<Stop>, budget: BudgetSummary) -> Self {
        stops.sort_by_key(|s| s.order_index);
        Self {
            trip,
            stops,
            budget,
            stop_index: 0,
            activity_index: None,
        }
    }

    pub fn selected_stop(&self) -> Option<&Stop> {
        self.stops.get(self.stop_index)
    }

    pub fn selected_activity(&self) -> Option<&StopActivity> {
        let stop = self.selected_stop()?;
        stop.activities.get(self.activity_index?)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimelineState {
    pub trip: Trip,
    pub stops: Vec<Stop>,
    pub scroll: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BudgetState {
    pub trip_id: i64,
    pub trip_name: String,
    pub summary: BudgetSummary,
    pub entries: Vec<BudgetEntry>,
    pub entry_index: usize,
}
