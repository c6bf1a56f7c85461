mod activity;
mod budget;
mod city;
pub mod datetime;
mod filters;
mod itinerary;
mod search;
mod trip;
mod user;

pub use activity::*;
pub use budget::*;
pub use city::*;
pub use filters::*;
pub use itinerary::*;
pub use search::*;
pub use trip::*;
pub use user::*;

use serde::{Deserialize, Deserializer};

/// Treat an explicit JSON `null` the same as a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
