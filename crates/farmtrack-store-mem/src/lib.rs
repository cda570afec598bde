//! farmtrack-store-mem
//!
//! In-memory [`EntityStore`] backend for tests and embedding callers. One
//! `RwLock` serializes writes, so concurrent upserts against the same
//! (farm, category) budget pair resolve last-writer-wins. Ids come from a
//! single monotonic sequence shared by every entity kind.

use std::sync::RwLock;

use chrono::{DateTime, Utc};
use tracing::debug;

use farmtrack_core::{
    store::{ensure_amount, ensure_positive_amount},
    BudgetFilter, CoreError, CoreResult, CropFilter, EntityKind, EntityStore, ExpenseFilter,
    YieldFilter,
};
use farmtrack_domain::{Budget, Crop, CropYield, Expense, ExpenseCategory, Farm, RecordId};

#[derive(Debug, Default)]
struct StoreData {
    farms: Vec<Farm>,
    crops: Vec<Crop>,
    expenses: Vec<Expense>,
    budgets: Vec<Budget>,
    yields: Vec<CropYield>,
    next_id: RecordId,
}

impl StoreData {
    fn allocate_id(&mut self) -> RecordId {
        self.next_id += 1;
        self.next_id
    }
}

/// Process-local record store keyed by opaque numeric ids.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<StoreData>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read<T>(&self, op: impl FnOnce(&StoreData) -> T) -> CoreResult<T> {
        let data = self
            .inner
            .read()
            .map_err(|_| CoreError::Fetch("store lock poisoned".to_string()))?;
        Ok(op(&data))
    }

    fn write<T>(&self, op: impl FnOnce(&mut StoreData) -> CoreResult<T>) -> CoreResult<T> {
        let mut data = self
            .inner
            .write()
            .map_err(|_| CoreError::Fetch("store lock poisoned".to_string()))?;
        op(&mut data)
    }
}

impl EntityStore for MemoryStore {
    fn list_farms(&self) -> CoreResult<Vec<Farm>> {
        self.read(|data| data.farms.clone())
    }

    fn create_farm(&self, mut record: Farm) -> CoreResult<Farm> {
        self.write(|data| {
            record.id = data.allocate_id();
            data.farms.push(record.clone());
            Ok(record)
        })
    }

    fn update_farm(&self, id: RecordId, mut record: Farm) -> CoreResult<Farm> {
        self.write(|data| {
            let slot = data
                .farms
                .iter_mut()
                .find(|farm| farm.id == id)
                .ok_or(CoreError::RecordNotFound(EntityKind::Farm, id))?;
            record.id = id;
            *slot = record.clone();
            Ok(record)
        })
    }

    fn delete_farm(&self, id: RecordId) -> CoreResult<bool> {
        self.write(|data| {
            let before = data.farms.len();
            data.farms.retain(|farm| farm.id != id);
            Ok(data.farms.len() < before)
        })
    }

    fn list_crops(&self, filter: &CropFilter) -> CoreResult<Vec<Crop>> {
        self.read(|data| {
            data.crops
                .iter()
                .filter(|crop| filter.matches(crop))
                .cloned()
                .collect()
        })
    }

    fn create_crop(&self, mut record: Crop) -> CoreResult<Crop> {
        self.write(|data| {
            record.id = data.allocate_id();
            data.crops.push(record.clone());
            Ok(record)
        })
    }

    fn update_crop(&self, id: RecordId, mut record: Crop) -> CoreResult<Crop> {
        self.write(|data| {
            let slot = data
                .crops
                .iter_mut()
                .find(|crop| crop.id == id)
                .ok_or(CoreError::RecordNotFound(EntityKind::Crop, id))?;
            record.id = id;
            *slot = record.clone();
            Ok(record)
        })
    }

    fn delete_crop(&self, id: RecordId) -> CoreResult<bool> {
        self.write(|data| {
            let before = data.crops.len();
            data.crops.retain(|crop| crop.id != id);
            Ok(data.crops.len() < before)
        })
    }

    fn list_expenses(&self, filter: &ExpenseFilter) -> CoreResult<Vec<Expense>> {
        self.read(|data| {
            data.expenses
                .iter()
                .filter(|expense| filter.matches(expense))
                .cloned()
                .collect()
        })
    }

    fn create_expense(&self, mut record: Expense) -> CoreResult<Expense> {
        ensure_amount("expense amount", record.amount)?;
        self.write(|data| {
            record.id = data.allocate_id();
            data.expenses.push(record.clone());
            Ok(record)
        })
    }

    fn update_expense(&self, id: RecordId, mut record: Expense) -> CoreResult<Expense> {
        ensure_amount("expense amount", record.amount)?;
        self.write(|data| {
            let slot = data
                .expenses
                .iter_mut()
                .find(|expense| expense.id == id)
                .ok_or(CoreError::RecordNotFound(EntityKind::Expense, id))?;
            record.id = id;
            *slot = record.clone();
            Ok(record)
        })
    }

    fn delete_expense(&self, id: RecordId) -> CoreResult<bool> {
        self.write(|data| {
            let before = data.expenses.len();
            data.expenses.retain(|expense| expense.id != id);
            Ok(data.expenses.len() < before)
        })
    }

    fn list_yields(&self, filter: &YieldFilter) -> CoreResult<Vec<CropYield>> {
        self.read(|data| {
            let mut records: Vec<CropYield> = data
                .yields
                .iter()
                .filter(|record| filter.matches(record))
                .cloned()
                .collect();
            // Listings come back newest harvest first.
            records.sort_by(|a, b| b.harvest_date.cmp(&a.harvest_date));
            records
        })
    }

    fn create_yield(&self, mut record: CropYield) -> CoreResult<CropYield> {
        ensure_amount("yield amount", record.yield_amount)?;
        self.write(|data| {
            record.id = data.allocate_id();
            data.yields.push(record.clone());
            Ok(record)
        })
    }

    fn update_yield(&self, id: RecordId, mut record: CropYield) -> CoreResult<CropYield> {
        ensure_amount("yield amount", record.yield_amount)?;
        self.write(|data| {
            let slot = data
                .yields
                .iter_mut()
                .find(|existing| existing.id == id)
                .ok_or(CoreError::RecordNotFound(EntityKind::CropYield, id))?;
            record.id = id;
            *slot = record.clone();
            Ok(record)
        })
    }

    fn delete_yield(&self, id: RecordId) -> CoreResult<bool> {
        self.write(|data| {
            let before = data.yields.len();
            data.yields.retain(|record| record.id != id);
            Ok(data.yields.len() < before)
        })
    }

    fn list_budgets(&self, filter: &BudgetFilter) -> CoreResult<Vec<Budget>> {
        self.read(|data| {
            data.budgets
                .iter()
                .filter(|budget| filter.matches(budget))
                .cloned()
                .collect()
        })
    }

    fn upsert_budget(
        &self,
        farm_id: RecordId,
        category: ExpenseCategory,
        budget_amount: f64,
        now: DateTime<Utc>,
    ) -> CoreResult<Budget> {
        ensure_positive_amount("budget amount", budget_amount)?;
        self.write(|data| {
            if let Some(existing) = data
                .budgets
                .iter_mut()
                .find(|budget| budget.farm_id == farm_id && budget.category == category)
            {
                existing.budget_amount = budget_amount;
                existing.updated_at = now;
                debug!(farm_id, category = %category, "budget updated in place");
                return Ok(existing.clone());
            }
            let id = data.allocate_id();
            let budget = Budget::new(id, farm_id, category, budget_amount, now);
            data.budgets.push(budget.clone());
            Ok(budget)
        })
    }
}
