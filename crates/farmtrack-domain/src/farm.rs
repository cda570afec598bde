//! Domain types for farms and the dashboard overview computed for them.

use serde::{Deserialize, Serialize};

use crate::common::{Identifiable, NamedEntity, RecordId};

/// Top-level ownership scope for crops, expenses, and budgets.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Farm {
    pub id: RecordId,
    pub name: String,
    pub size: f64,
    pub size_unit: String,
    pub location: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Farm {
    pub fn new(id: RecordId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            size: 0.0,
            size_unit: String::new(),
            location: String::new(),
            tags: Vec::new(),
        }
    }
}

impl Identifiable for Farm {
    fn id(&self) -> RecordId {
        self.id
    }
}

impl NamedEntity for Farm {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Headline numbers for one farm's dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FarmOverview {
    /// Crops currently marked active.
    pub active_crops: usize,
    /// Expense total for the current calendar month.
    pub month_expense_total: f64,
    /// Yield records harvested within the last 30 days.
    pub recent_yield_count: usize,
}
