//! Category-level expense aggregation feeding the summary and chart views.

use farmtrack_domain::{
    Budget, BudgetProgress, CategoryTotal, Expense, ExpenseCategory, ExpenseOverview, RecordId,
};

use crate::budget_service::BudgetService;
use crate::error::CoreResult;
use crate::store::{BudgetFilter, EntityStore, ExpenseFilter};

/// Stateless expense aggregation over already-fetched snapshots.
pub struct ExpenseService;

impl ExpenseService {
    /// Sums amounts per category, in the order categories first appear.
    /// Categories with no expenses are absent, not zero-valued.
    pub fn totals_by_category(expenses: &[Expense]) -> Vec<CategoryTotal> {
        let mut totals: Vec<CategoryTotal> = Vec::new();
        for expense in expenses {
            match totals
                .iter_mut()
                .find(|entry| entry.category == expense.category)
            {
                Some(entry) => entry.total += expense.amount,
                None => totals.push(CategoryTotal {
                    category: expense.category,
                    total: expense.amount,
                }),
            }
        }
        totals
    }

    /// Sums every amount; 0 for an empty snapshot.
    pub fn grand_total(expenses: &[Expense]) -> f64 {
        expenses.iter().map(|expense| expense.amount).sum()
    }

    /// Spend-vs-cap progress for one category, or `None` when no budget is
    /// configured for it. The percentage is capped at 100 for display;
    /// `is_over_budget` still reports overruns truthfully.
    pub fn budget_progress(
        category: ExpenseCategory,
        spent: f64,
        budgets: &[Budget],
    ) -> Option<BudgetProgress> {
        let budget = budgets.iter().find(|budget| budget.category == category)?;
        Some(BudgetProgress {
            percentage: (spent / budget.budget_amount * 100.0).min(100.0),
            budget_amount: budget.budget_amount,
            is_over_budget: spent > budget.budget_amount,
        })
    }

    /// Applies the category filter chips: `None` keeps everything.
    pub fn filter_by_category(
        expenses: &[Expense],
        category: Option<ExpenseCategory>,
    ) -> Vec<Expense> {
        match category {
            None => expenses.to_vec(),
            Some(wanted) => expenses
                .iter()
                .filter(|expense| expense.category == wanted)
                .cloned()
                .collect(),
        }
    }

    /// The expense view's load path: fetch the farm's expenses and budgets,
    /// then derive totals and alerts from the joined snapshot.
    pub fn overview(store: &dyn EntityStore, farm_id: RecordId) -> CoreResult<ExpenseOverview> {
        let expenses = store.list_expenses(&ExpenseFilter::for_farm(farm_id))?;
        let budgets = store.list_budgets(&BudgetFilter::for_farm(farm_id))?;
        let category_totals = Self::totals_by_category(&expenses);
        let grand_total = Self::grand_total(&expenses);
        let alerts = BudgetService::alerts_for(&budgets, &expenses);
        Ok(ExpenseOverview {
            expenses,
            budgets,
            category_totals,
            grand_total,
            alerts,
        })
    }
}
