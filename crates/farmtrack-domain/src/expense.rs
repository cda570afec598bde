//! Domain types representing farm expenses.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::budget::{Budget, BudgetAlert};
use crate::common::{Amounted, Identifiable, RecordId};

/// Categorises expenses for budgeting and reporting.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ExpenseCategory {
    Seeds,
    Fertilizer,
    Equipment,
    Labor,
    Other,
}

impl ExpenseCategory {
    /// Every category, in the order the expense views present them.
    pub const ALL: [ExpenseCategory; 5] = [
        ExpenseCategory::Seeds,
        ExpenseCategory::Fertilizer,
        ExpenseCategory::Equipment,
        ExpenseCategory::Labor,
        ExpenseCategory::Other,
    ];
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ExpenseCategory::Seeds => "Seeds",
            ExpenseCategory::Fertilizer => "Fertilizer",
            ExpenseCategory::Equipment => "Equipment",
            ExpenseCategory::Labor => "Labor",
            ExpenseCategory::Other => "Other",
        };
        f.write_str(label)
    }
}

/// A single cost incurred by a farm.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Expense {
    pub id: RecordId,
    pub farm_id: RecordId,
    pub category: ExpenseCategory,
    pub amount: f64,
    pub date: NaiveDate,
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Expense {
    pub fn new(
        id: RecordId,
        farm_id: RecordId,
        category: ExpenseCategory,
        amount: f64,
        date: NaiveDate,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id,
            farm_id,
            category,
            amount,
            date,
            description: description.into(),
            tags: Vec::new(),
        }
    }
}

impl Identifiable for Expense {
    fn id(&self) -> RecordId {
        self.id
    }
}

impl Amounted for Expense {
    fn amount(&self) -> f64 {
        self.amount
    }
}

/// Summed spending for one category, in first-encounter order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryTotal {
    pub category: ExpenseCategory,
    pub total: f64,
}

/// Everything the expense view loads in one pass: the raw records, the farm's
/// budgets, and the derived aggregates and alerts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseOverview {
    pub expenses: Vec<Expense>,
    pub budgets: Vec<Budget>,
    pub category_totals: Vec<CategoryTotal>,
    pub grand_total: f64,
    pub alerts: Vec<BudgetAlert>,
}
