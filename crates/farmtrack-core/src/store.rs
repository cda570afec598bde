//! The entity-store contract the analytics services fetch from.
//!
//! The hosted data API behind the application exposes generic
//! list/create/update/delete operations over records keyed by opaque numeric
//! ids. This trait is that contract, typed per entity kind; backends enforce
//! the budget uniqueness invariant through [`EntityStore::upsert_budget`].

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};

use farmtrack_domain::{
    Budget, Crop, CropYield, Expense, ExpenseCategory, Farm, RecordId,
};

use crate::error::{CoreError, CoreResult};

/// The record kinds a store holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Farm,
    Crop,
    Expense,
    Budget,
    CropYield,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EntityKind::Farm => "farm",
            EntityKind::Crop => "crop",
            EntityKind::Expense => "expense",
            EntityKind::Budget => "budget",
            EntityKind::CropYield => "crop yield",
        };
        f.write_str(label)
    }
}

/// Equality filter for expense listings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseFilter {
    pub farm_id: Option<RecordId>,
    pub category: Option<ExpenseCategory>,
}

impl ExpenseFilter {
    pub fn for_farm(farm_id: RecordId) -> Self {
        Self {
            farm_id: Some(farm_id),
            category: None,
        }
    }

    pub fn with_category(mut self, category: ExpenseCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn matches(&self, expense: &Expense) -> bool {
        self.farm_id.map_or(true, |farm| expense.farm_id == farm)
            && self.category.map_or(true, |cat| expense.category == cat)
    }
}

/// Equality filter for budget listings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BudgetFilter {
    pub farm_id: Option<RecordId>,
    pub category: Option<ExpenseCategory>,
}

impl BudgetFilter {
    pub fn for_farm(farm_id: RecordId) -> Self {
        Self {
            farm_id: Some(farm_id),
            category: None,
        }
    }

    pub fn matches(&self, budget: &Budget) -> bool {
        self.farm_id.map_or(true, |farm| budget.farm_id == farm)
            && self.category.map_or(true, |cat| budget.category == cat)
    }
}

/// Equality filter for crop listings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CropFilter {
    pub farm_id: Option<RecordId>,
}

impl CropFilter {
    pub fn for_farm(farm_id: RecordId) -> Self {
        Self {
            farm_id: Some(farm_id),
        }
    }

    pub fn matches(&self, crop: &Crop) -> bool {
        self.farm_id.map_or(true, |farm| crop.farm_id == farm)
    }
}

/// Filter for yield listings: exact crop-name equality plus an optional
/// inclusive harvest-date range.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct YieldFilter {
    pub crop_name: Option<String>,
    pub harvested_from: Option<NaiveDate>,
    pub harvested_to: Option<NaiveDate>,
}

impl YieldFilter {
    pub fn for_crop(crop_name: impl Into<String>) -> Self {
        Self {
            crop_name: Some(crop_name.into()),
            harvested_from: None,
            harvested_to: None,
        }
    }

    pub fn harvested_between(from: NaiveDate, to: NaiveDate) -> Self {
        Self {
            crop_name: None,
            harvested_from: Some(from),
            harvested_to: Some(to),
        }
    }

    pub fn matches(&self, record: &CropYield) -> bool {
        self.crop_name
            .as_deref()
            .map_or(true, |name| record.crop_name == name)
            && self
                .harvested_from
                .map_or(true, |from| record.harvest_date >= from)
            && self
                .harvested_to
                .map_or(true, |to| record.harvest_date <= to)
    }
}

/// Abstraction over the hosted data API the application delegates
/// persistence to.
///
/// `create_*` assigns the record id (any id on the input is ignored) and
/// validates amounts; `update_*` fails with
/// [`CoreError::RecordNotFound`] for unknown ids; `delete_*` reports whether
/// a record was removed. Fetch failures surface as [`CoreError::Fetch`] and
/// are never collapsed into empty listings.
///
/// Budgets are deliberately asymmetric: their only write is
/// [`EntityStore::upsert_budget`], which keeps at most one record per
/// (farm, category) pair, preserving `id` and `created_at` across updates.
/// No budget delete exists.
pub trait EntityStore: Send + Sync {
    fn list_farms(&self) -> CoreResult<Vec<Farm>>;
    fn create_farm(&self, record: Farm) -> CoreResult<Farm>;
    fn update_farm(&self, id: RecordId, record: Farm) -> CoreResult<Farm>;
    fn delete_farm(&self, id: RecordId) -> CoreResult<bool>;

    fn list_crops(&self, filter: &CropFilter) -> CoreResult<Vec<Crop>>;
    fn create_crop(&self, record: Crop) -> CoreResult<Crop>;
    fn update_crop(&self, id: RecordId, record: Crop) -> CoreResult<Crop>;
    fn delete_crop(&self, id: RecordId) -> CoreResult<bool>;

    fn list_expenses(&self, filter: &ExpenseFilter) -> CoreResult<Vec<Expense>>;
    fn create_expense(&self, record: Expense) -> CoreResult<Expense>;
    fn update_expense(&self, id: RecordId, record: Expense) -> CoreResult<Expense>;
    fn delete_expense(&self, id: RecordId) -> CoreResult<bool>;

    /// Yield listings come back newest harvest first.
    fn list_yields(&self, filter: &YieldFilter) -> CoreResult<Vec<CropYield>>;
    fn create_yield(&self, record: CropYield) -> CoreResult<CropYield>;
    fn update_yield(&self, id: RecordId, record: CropYield) -> CoreResult<CropYield>;
    fn delete_yield(&self, id: RecordId) -> CoreResult<bool>;

    fn list_budgets(&self, filter: &BudgetFilter) -> CoreResult<Vec<Budget>>;
    fn upsert_budget(
        &self,
        farm_id: RecordId,
        category: ExpenseCategory,
        budget_amount: f64,
        now: DateTime<Utc>,
    ) -> CoreResult<Budget>;
}

/// Rejects amounts that are not finite or are negative.
pub fn ensure_amount(kind: &str, value: f64) -> CoreResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(CoreError::Validation(format!(
            "{kind} must be a non-negative number, got {value}"
        )));
    }
    Ok(())
}

/// Rejects amounts that are not finite or are not strictly positive.
/// Budget caps go through this so consumption percentages stay well defined.
pub fn ensure_positive_amount(kind: &str, value: f64) -> CoreResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(CoreError::Validation(format!(
            "{kind} must be a positive number, got {value}"
        )));
    }
    Ok(())
}
