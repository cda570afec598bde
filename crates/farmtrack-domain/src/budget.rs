//! Domain types for per-farm category spending caps and their alerts.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::{Identifiable, RecordId};
use crate::expense::ExpenseCategory;

/// Percentage of budget consumption at which a warning alert is raised.
pub const DEFAULT_ALERT_THRESHOLD: f64 = 80.0;

/// A spending cap for one (farm, category) pair.
///
/// At most one budget exists per pair; writes go through the store's upsert,
/// which preserves `id` and `created_at` on update.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Budget {
    pub id: RecordId,
    pub farm_id: RecordId,
    pub category: ExpenseCategory,
    pub budget_amount: f64,
    pub alert_threshold: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Budget {
    pub fn new(
        id: RecordId,
        farm_id: RecordId,
        category: ExpenseCategory,
        budget_amount: f64,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            farm_id,
            category,
            budget_amount,
            alert_threshold: DEFAULT_ALERT_THRESHOLD,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Identifiable for Budget {
    fn id(&self) -> RecordId {
        self.id
    }
}

/// Severity of a budget consumption alert.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AlertKind {
    Warning,
    Exceeded,
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AlertKind::Warning => "warning",
            AlertKind::Exceeded => "exceeded",
        };
        f.write_str(label)
    }
}

/// A budget consumption alert raised for one category of a farm.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BudgetAlert {
    pub category: ExpenseCategory,
    pub kind: AlertKind,
    pub message: String,
    /// Consumption percentage, rounded to the nearest whole point.
    pub percentage: f64,
}

/// Spend-vs-cap progress for one category, sized for display.
///
/// `percentage` is capped at 100 even when `is_over_budget` is true.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BudgetProgress {
    pub percentage: f64,
    pub budget_amount: f64,
    pub is_over_budget: bool,
}
