use serde::{Deserialize, Deserializer, Serialize};
use strum::{AsRefStr, Display, EnumString};

use super::null_as_default;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ActivityCategory {
    Sightseeing,
    Food,
    Adventure,
    Cultural,
    Relaxation,
    /// Any category the catalog knows about that this client does not.
    #[serde(other)]
    Other,
}

impl ActivityCategory {
    /// Categories a user can filter by, in display order.
    pub const SELECTABLE: [ActivityCategory; 5] = [
        ActivityCategory::Sightseeing,
        ActivityCategory::Food,
        ActivityCategory::Adventure,
        ActivityCategory::Cultural,
        ActivityCategory::Relaxation,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ActivityCategory::Sightseeing => "Sightseeing",
            ActivityCategory::Food => "Food & Dining",
            ActivityCategory::Adventure => "Adventure",
            ActivityCategory::Cultural => "Cultural",
            ActivityCategory::Relaxation => "Relaxation",
            ActivityCategory::Other => "Other",
        }
    }

    /// Step through `None` (all categories) and the selectable categories.
    pub fn cycle(current: Option<Self>) -> Option<Self> {
        match current {
            None => Some(Self::SELECTABLE[0]),
            Some(category) => Self::SELECTABLE
                .iter()
                .position(|c| *c == category)
                .and_then(|idx| Self::SELECTABLE.get(idx + 1).copied()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub category: ActivityCategory,
    #[serde(default, deserialize_with = "null_as_default")]
    pub estimated_cost: f64,
    #[serde(default = "default_duration", deserialize_with = "duration_or_default")]
    pub duration_hours: f64,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub city_id: Option<i64>,
}

fn default_duration() -> f64 {
    1.0
}

fn duration_or_default<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or_else(default_duration))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn unknown_categories_deserialize_as_other() {
        let activity: Activity = serde_json::from_str(
            r#"{"id":1,"name":"Night market","category":"shopping","estimated_cost":null}"#,
        )
        .unwrap();
        assert_eq!(activity.category, ActivityCategory::Other);
        assert_eq!(activity.estimated_cost, 0.0);
        assert_eq!(activity.duration_hours, 1.0);
    }

    #[test]
    fn null_duration_matches_missing_duration() {
        let activity: Activity = serde_json::from_str(
            r#"{"id":2,"name":"Harbour walk","category":"sightseeing","duration_hours":null}"#,
        )
        .unwrap();
        assert_eq!(activity.duration_hours, 1.0);

        let activity: Activity = serde_json::from_str(
            r#"{"id":3,"name":"Day hike","category":"adventure","duration_hours":6.5}"#,
        )
        .unwrap();
        assert_eq!(activity.duration_hours, 6.5);
    }

    #[test]
    fn category_wire_names_are_lowercase() {
        assert_eq!(ActivityCategory::Cultural.to_string(), "cultural");
        assert_eq!(
            ActivityCategory::from_str("Food").unwrap(),
            ActivityCategory::Food
        );
        assert_eq!(
            serde_json::to_string(&ActivityCategory::Relaxation).unwrap(),
            r#""relaxation""#
        );
    }

    #[test]
    fn cycle_visits_every_selectable_category_then_all() {
        let mut seen = Vec::new();
        let mut current = ActivityCategory::cycle(None);
        while let Some(category) = current {
            seen.push(category);
            current = ActivityCategory::cycle(Some(category));
        }
        assert_eq!(seen, ActivityCategory::SELECTABLE.to_vec());
        assert_eq!(ActivityCategory::cycle(Some(ActivityCategory::Other)), None);
    }
}
