use serde::{Deserialize, Serialize};

use super::null_as_default;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub id: i64,
    pub name: String,
    pub country: String,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Relative cost of living, 100 is average.
    #[serde(default = "default_cost_index")]
    pub cost_index: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub popularity: i64,
    #[serde(default)]
    pub image_url: Option<String>,
}

fn default_cost_index() -> f64 {
    100.0
}

impl City {
    pub fn label(&self) -> String {
        format!("{}, {}", self.name, self.country)
    }

    /// Coarse price band derived from the cost index.
    pub fn price_band(&self) -> &'static str {
        match self.cost_index {
            c if c < 70.0 => "$",
            c if c < 110.0 => "$$",
            c if c < 150.0 => "$$$",
            _ => "$$$$",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_catalog_fields_use_defaults() {
        let city: City = serde_json::from_str(
            r#"{"id":3,"name":"Lisbon","country":"Portugal","popularity":null}"#,
        )
        .unwrap();
        assert_eq!(city.cost_index, 100.0);
        assert_eq!(city.popularity, 0);
        assert_eq!(city.label(), "Lisbon, Portugal");
        assert_eq!(city.price_band(), "$$");
    }
}
