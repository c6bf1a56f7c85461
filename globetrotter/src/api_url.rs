use crate::domain::ApiFilter;

#[derive(Debug, Clone, PartialEq)]
pub struct ApiURL(String);

impl AsRef<str> for ApiURL {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl ApiURL {
    /// Creates a new ApiURL rooted at the API base, e.g. `http://localhost:8000/api`.
    pub fn new(base: &str) -> Self {
        Self(base.trim_end_matches('/').to_string())
    }

    /// Append the given path to the URL.
    pub fn append_path(&self, path: &str) -> Self {
        let trimmed_url = self.0.trim_end_matches('/');
        let trimmed_path = path.trim_start_matches('/');
        Self(format!("{}/{}", trimmed_url, trimmed_path))
    }

    /// Append a query parameter, percent-encoding the value.
    pub fn with_param(&self, key: &str, value: &str) -> Self {
        let separator = if self.0.contains('?') { '&' } else { '?' };
        Self(format!(
            "{}{}{}={}",
            self.0,
            separator,
            key,
            urlencoding::encode(value)
        ))
    }

    pub fn with_filter(&self, filter: &impl ApiFilter) -> Self {
        filter
            .query_params()
            .into_iter()
            .fold(self.clone(), |url, (key, value)| url.with_param(key, &value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ActivityCategory, ActivitySearch};

    #[test]
    fn append_path_normalizes_slashes() {
        let url = ApiURL::new("http://localhost:8000/api/").append_path("/trips/");
        assert_eq!(url.as_ref(), "http://localhost:8000/api/trips/");
    }

    #[test]
    fn params_are_encoded_and_chained() {
        let url = ApiURL::new("http://localhost:8000/api")
            .append_path("activities/")
            .with_param("q", "hot springs")
            .with_param("category", "relaxation");
        assert_eq!(
            url.as_ref(),
            "http://localhost:8000/api/activities/?q=hot%20springs&category=relaxation"
        );
    }

    #[test]
    fn activity_filter_always_sends_both_params() {
        let search = ActivitySearch::new("", None);
        let url = ApiURL::new("http://x/api")
            .append_path("activities/")
            .with_filter(&search);
        assert_eq!(url.as_ref(), "http://x/api/activities/?q=&category=");

        let search = ActivitySearch::new("museum", Some(ActivityCategory::Cultural));
        let url = ApiURL::new("http://x/api")
            .append_path("activities/")
            .with_filter(&search);
        assert_eq!(url.as_ref(), "http://x/api/activities/?q=museum&category=cultural");
    }
}
