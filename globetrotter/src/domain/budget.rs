use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::null_as_default;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum BudgetCategory {
    Transport,
    Stay,
    Activities,
    Meals,
    Other,
}

impl BudgetCategory {
    pub const ALL: [BudgetCategory; 5] = [
        BudgetCategory::Transport,
        BudgetCategory::Stay,
        BudgetCategory::Activities,
        BudgetCategory::Meals,
        BudgetCategory::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            BudgetCategory::Transport => "Transport",
            BudgetCategory::Stay => "Stay",
            BudgetCategory::Activities => "Activities",
            BudgetCategory::Meals => "Meals",
            BudgetCategory::Other => "Other",
        }
    }

    pub fn next(&self) -> Self {
        let idx = Self::ALL.iter().position(|c| c == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

/// Server-computed cost breakdown for a trip. `Default` is the zeroed summary
/// shown when the summary cannot be read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BudgetSummary {
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_budget: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub transport: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub stay: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub activities: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub meals: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub other: f64,
}

impl BudgetSummary {
    pub fn amount(&self, category: BudgetCategory) -> f64 {
        match category {
            BudgetCategory::Transport => self.transport,
            BudgetCategory::Stay => self.stay,
            BudgetCategory::Activities => self.activities,
            BudgetCategory::Meals => self.meals,
            BudgetCategory::Other => self.other,
        }
    }

    /// Non-zero categories with their share of the total, largest first.
    pub fn breakdown(&self) -> Vec<(BudgetCategory, f64, f64)> {
        let total: f64 = BudgetCategory::ALL.iter().map(|c| self.amount(*c)).sum();
        if total <= 0.0 {
            return vec![];
        }
        let mut parts: Vec<_> = BudgetCategory::ALL
            .iter()
            .map(|c| (*c, self.amount(*c)))
            .filter(|(_, amount)| *amount > 0.0)
            .map(|(c, amount)| (c, amount, amount / total * 100.0))
            .collect();
        parts.sort_by(|a, b| b.1.total_cmp(&a.1));
        parts
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetEntry {
    pub id: i64,
    #[serde(default)]
    pub trip_id: i64,
    pub category: String,
    pub amount: f64,
    #[serde(default)]
    pub description: Option<String>,
}

impl BudgetEntry {
    /// Unknown categories are summarized under "other" by the API.
    pub fn category(&self) -> BudgetCategory {
        self.category.parse().unwrap_or(BudgetCategory::Other)
    }
}

/// Body of `POST /budget/{trip_id}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewBudgetEntry {
    pub category: BudgetCategory,
    pub amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
