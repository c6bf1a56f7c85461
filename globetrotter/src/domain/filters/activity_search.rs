use super::ApiFilter;
use crate::domain::ActivityCategory;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActivitySearch {
    pub query: String,
    pub category: Option<ActivityCategory>,
    pub max_cost: Option<f64>,
}

impl ActivitySearch {
    pub fn new(query: impl Into<String>, category: Option<ActivityCategory>) -> Self {
        Self {
            query: query.into(),
            category,
            max_cost: None,
        }
    }

    pub fn all() -> Self {
        Self::default()
    }
}

impl ApiFilter for ActivitySearch {
    fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("q", self.query.clone()),
            (
                "category",
                self.category.map(|c| c.to_string()).unwrap_or_default(),
            ),
        ];
        if let Some(max_cost) = self.max_cost {
            params.push(("max_cost", max_cost.to_string()));
        }
        params
    }
}
