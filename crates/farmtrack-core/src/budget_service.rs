//! Budget upkeep and alerting over per-farm category spending caps.

use tracing::{debug, warn};

use farmtrack_domain::{AlertKind, Budget, BudgetAlert, Expense, ExpenseCategory, RecordId};

use crate::error::CoreResult;
use crate::format::{rounded_percent, usd};
use crate::store::{ensure_positive_amount, BudgetFilter, EntityStore, ExpenseFilter};
use crate::time::Clock;

/// Stateless budget-ledger operations over an [`EntityStore`] backend.
pub struct BudgetService;

impl BudgetService {
    /// Upserts the spending cap for a (farm, category) pair.
    ///
    /// The cap must be a positive finite number. An existing budget keeps its
    /// id and `created_at`; only the amount and `updated_at` move.
    pub fn set_budget(
        store: &dyn EntityStore,
        clock: &dyn Clock,
        farm_id: RecordId,
        category: ExpenseCategory,
        amount: f64,
    ) -> CoreResult<Budget> {
        ensure_positive_amount("budget amount", amount)?;
        let budget = store.upsert_budget(farm_id, category, amount, clock.now())?;
        debug!(farm_id, category = %category, amount, "budget saved");
        Ok(budget)
    }

    /// Lists every budget configured for a farm. Order is not significant.
    pub fn budgets_by_farm(
        store: &dyn EntityStore,
        farm_id: RecordId,
    ) -> CoreResult<Vec<Budget>> {
        store.list_budgets(&BudgetFilter::for_farm(farm_id))
    }

    /// Fetches a farm's budgets and lifetime expenses, then evaluates every
    /// cap. Fetch failures propagate; they are never reported as "no alerts".
    pub fn check_budget_alerts(
        store: &dyn EntityStore,
        farm_id: RecordId,
    ) -> CoreResult<Vec<BudgetAlert>> {
        let budgets = store.list_budgets(&BudgetFilter::for_farm(farm_id))?;
        let expenses = store.list_expenses(&ExpenseFilter::for_farm(farm_id))?;
        Ok(Self::alerts_for(&budgets, &expenses))
    }

    /// Evaluates caps against an expense snapshot.
    ///
    /// For each budget, in iteration order: spending at or past the cap is an
    /// `Exceeded` alert, spending at or past the warning threshold (80% by
    /// default) is a `Warning`, anything below stays silent. A category with
    /// no matching expenses never alerts.
    pub fn alerts_for(budgets: &[Budget], expenses: &[Expense]) -> Vec<BudgetAlert> {
        let mut alerts = Vec::new();
        for budget in budgets {
            let spent: f64 = expenses
                .iter()
                .filter(|expense| expense.category == budget.category)
                .map(|expense| expense.amount)
                .sum();
            let percentage = spent / budget.budget_amount * 100.0;

            if percentage >= 100.0 {
                warn!(
                    category = %budget.category,
                    spent,
                    cap = budget.budget_amount,
                    "budget exceeded"
                );
                alerts.push(BudgetAlert {
                    category: budget.category,
                    kind: AlertKind::Exceeded,
                    message: format!(
                        "Budget exceeded for {}: {} / {}",
                        budget.category,
                        usd(spent),
                        usd(budget.budget_amount)
                    ),
                    percentage: percentage.round(),
                });
            } else if percentage >= budget.alert_threshold {
                alerts.push(BudgetAlert {
                    category: budget.category,
                    kind: AlertKind::Warning,
                    message: format!(
                        "Approaching budget limit for {}: {} / {} ({}%)",
                        budget.category,
                        usd(spent),
                        usd(budget.budget_amount),
                        rounded_percent(percentage)
                    ),
                    percentage: percentage.round(),
                });
            }
        }
        alerts
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Utc};

    use super::*;

    fn budget(category: ExpenseCategory, amount: f64) -> Budget {
        Budget::new(1, 1, category, amount, Utc::now())
    }

    fn expense(category: ExpenseCategory, amount: f64) -> Expense {
        Expense::new(
            1,
            1,
            category,
            amount,
            NaiveDate::from_ymd_opt(2025, 4, 10).unwrap(),
            "test",
        )
    }

    #[test]
    fn no_alert_below_threshold() {
        let alerts = BudgetService::alerts_for(
            &[budget(ExpenseCategory::Seeds, 1000.0)],
            &[expense(ExpenseCategory::Seeds, 500.0)],
        );
        assert!(alerts.is_empty());
    }

    #[test]
    fn warning_between_threshold_and_cap() {
        let alerts = BudgetService::alerts_for(
            &[budget(ExpenseCategory::Seeds, 1000.0)],
            &[expense(ExpenseCategory::Seeds, 850.0)],
        );
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].kind, AlertKind::Warning);
        assert_eq!(alerts[0].percentage, 85.0);
        assert_eq!(
            alerts[0].message,
            "Approaching budget limit for Seeds: $850.00 / $1000.00 (85%)"
        );
    }

    #[test]
    fn exceeded_at_exactly_the_cap() {
        let alerts = BudgetService::alerts_for(
            &[budget(ExpenseCategory::Seeds, 1000.0)],
            &[
                expense(ExpenseCategory::Seeds, 850.0),
                expense(ExpenseCategory::Seeds, 150.0),
            ],
        );
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].kind, AlertKind::Exceeded);
        assert_eq!(alerts[0].percentage, 100.0);
        assert_eq!(
            alerts[0].message,
            "Budget exceeded for Seeds: $1000.00 / $1000.00"
        );
    }

    #[test]
    fn zero_matching_expenses_never_alert() {
        let alerts = BudgetService::alerts_for(
            &[budget(ExpenseCategory::Fertilizer, 50.0)],
            &[expense(ExpenseCategory::Seeds, 10_000.0)],
        );
        assert!(alerts.is_empty());
    }

    #[test]
    fn alerts_follow_budget_iteration_order() {
        let budgets = [
            budget(ExpenseCategory::Labor, 100.0),
            budget(ExpenseCategory::Seeds, 100.0),
        ];
        let expenses = [
            expense(ExpenseCategory::Seeds, 90.0),
            expense(ExpenseCategory::Labor, 150.0),
        ];
        let alerts = BudgetService::alerts_for(&budgets, &expenses);
        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0].category, ExpenseCategory::Labor);
        assert_eq!(alerts[0].kind, AlertKind::Exceeded);
        assert_eq!(alerts[1].category, ExpenseCategory::Seeds);
        assert_eq!(alerts[1].kind, AlertKind::Warning);
    }
}
