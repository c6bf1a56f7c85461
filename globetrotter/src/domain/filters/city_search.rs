use super::ApiFilter;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CitySearch {
    pub query: String,
    pub country: Option<String>,
}

impl CitySearch {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            country: None,
        }
    }

    /// The unfiltered catalog listing.
    pub fn all() -> Self {
        Self::default()
    }
}

impl ApiFilter for CitySearch {
    fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("q", self.query.clone())];
        if let Some(country) = &self.country {
            params.push(("country", country.clone()));
        }
        params
    }
}
