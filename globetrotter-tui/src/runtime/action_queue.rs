use crate::app::{forms::ProfileEdit, CitySearchTarget};
use globetrotter::{
    domain::{Activity, ActivityCategory, NewBudgetEntry, NewTrip, TripUpdate},
    Credentials, NewUser,
};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Work that needs the API. Key handlers queue these; the event loop runs
/// them between frames.
#[derive(Debug, Clone, PartialEq)]
pub(super) enum Action {
    SubmitLogin(Credentials),
    SubmitRegister(NewUser),
    LoadDashboard,
    CreateTrip(NewTrip),
    UpdateTrip {
        trip_id: i64,
        update: TripUpdate,
    },
    OpenTrip {
        trip_id: i64,
    },
    SetTripVisibility {
        trip_id: i64,
        public: bool,
    },
    LoadCityCatalog,
    SearchCities {
        target: CitySearchTarget,
        query: String,
    },
    AddStop {
        city_id: i64,
    },
    LoadActivityCatalog,
    SearchActivities {
        query: String,
        category: Option<ActivityCategory>,
    },
    AddActivityToStop {
        stop_id: i64,
        activity: Activity,
    },
    OpenTimeline {
        trip_id: i64,
    },
    OpenBudget {
        trip_id: i64,
    },
    AddBudgetEntry {
        trip_id: i64,
        entry: NewBudgetEntry,
    },
    SaveProfile(ProfileEdit),
    LoadShared {
        trip_id: i64,
    },
    ConfirmPending,
}

pub(super) type ActionTx = UnboundedSender<Action>;
pub(super) type ActionRx = UnboundedReceiver<Action>;

pub(super) fn channel() -> (ActionTx, ActionRx) {
    mpsc::unbounded_channel()
}
