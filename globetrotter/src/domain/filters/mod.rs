mod activity_search;
mod city_search;

pub use activity_search::ActivitySearch;
pub use city_search::CitySearch;

/// Query-string parameters for a list endpoint.
pub trait ApiFilter {
    fn query_params(&self) -> Vec<(&'static str, String)>;
}
