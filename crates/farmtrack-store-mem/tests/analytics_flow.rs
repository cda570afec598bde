//! Yield analytics and dashboard overview against the in-memory store.

mod common;

use farmtrack_core::{
    EntityStore, ExpenseService, FixedClock, OverviewService, YieldService,
};
use farmtrack_domain::{
    Crop, CropSelector, CropStatus, ExpenseCategory, YieldWindow,
};
use farmtrack_store_mem::MemoryStore;

use common::{date, init_tracing, seed_expense, seed_yield};

#[test]
fn report_filters_window_then_summarizes() {
    init_tracing();
    let store = MemoryStore::new();
    let clock = FixedClock::on_date(date(2025, 7, 15));

    seed_yield(&store, "Corn", 100.0, date(2025, 6, 1));
    seed_yield(&store, "Corn", 200.0, date(2025, 5, 1));
    seed_yield(&store, "Wheat", 150.0, date(2024, 1, 1));

    let report = YieldService::report(&store, &clock, YieldWindow::Months(6), &CropSelector::All)
        .unwrap()
        .expect("records in window");
    assert_eq!(report.stats.total_records, 2);
    assert_eq!(report.stats.total_yield, 300.0);
    assert_eq!(report.crops, vec!["Corn"]);
    // Recent listing is newest harvest first.
    assert_eq!(report.recent[0].harvest_date, date(2025, 6, 1));
}

#[test]
fn report_with_named_crop_filters_at_the_store() {
    init_tracing();
    let store = MemoryStore::new();
    let clock = FixedClock::on_date(date(2025, 7, 15));

    seed_yield(&store, "Corn", 100.0, date(2025, 6, 1));
    seed_yield(&store, "Wheat", 150.0, date(2025, 6, 2));

    let report = YieldService::report(
        &store,
        &clock,
        YieldWindow::All,
        &CropSelector::Named("Wheat".to_string()),
    )
    .unwrap()
    .expect("wheat records exist");
    assert_eq!(report.stats.total_records, 1);
    assert_eq!(report.stats.top_crops[0].crop_name, "Wheat");
}

#[test]
fn report_is_none_when_nothing_matches() {
    init_tracing();
    let store = MemoryStore::new();
    let clock = FixedClock::on_date(date(2025, 7, 15));

    seed_yield(&store, "Corn", 100.0, date(2020, 1, 1));

    let report = YieldService::report(
        &store,
        &clock,
        YieldWindow::Months(3),
        &CropSelector::All,
    )
    .unwrap();
    assert!(report.is_none());
}

#[test]
fn expense_overview_joins_budgets_totals_and_alerts() {
    init_tracing();
    let store = MemoryStore::new();
    let clock = FixedClock::on_date(date(2025, 7, 1));

    farmtrack_core::BudgetService::set_budget(
        &store,
        &clock,
        1,
        ExpenseCategory::Seeds,
        100.0,
    )
    .unwrap();
    seed_expense(&store, 1, ExpenseCategory::Seeds, 90.0, date(2025, 6, 1));
    seed_expense(&store, 1, ExpenseCategory::Labor, 40.0, date(2025, 6, 2));

    let overview = ExpenseService::overview(&store, 1).unwrap();
    assert_eq!(overview.grand_total, 130.0);
    assert_eq!(overview.category_totals.len(), 2);
    assert_eq!(overview.alerts.len(), 1);
    assert_eq!(overview.budgets.len(), 1);

    let progress = ExpenseService::budget_progress(
        ExpenseCategory::Seeds,
        overview.category_totals[0].total,
        &overview.budgets,
    )
    .expect("seeds budget configured");
    assert_eq!(progress.percentage, 90.0);
    assert!(!progress.is_over_budget);
}

#[test]
fn farm_overview_counts_active_crops_month_spend_and_recent_yields() {
    init_tracing();
    let store = MemoryStore::new();
    let clock = FixedClock::on_date(date(2025, 7, 15));

    let mut planted = Crop::new(0, 1, "Corn", date(2025, 3, 1), date(2025, 9, 1));
    let crop = store.create_crop(planted.clone()).unwrap();
    planted.status = CropStatus::Completed;
    let done = store.create_crop(planted).unwrap();
    assert_ne!(crop.id, done.id);

    seed_expense(&store, 1, ExpenseCategory::Seeds, 50.0, date(2025, 7, 2));
    seed_expense(&store, 1, ExpenseCategory::Seeds, 80.0, date(2025, 6, 30));

    seed_yield(&store, "Corn", 10.0, date(2025, 7, 1));
    seed_yield(&store, "Corn", 10.0, date(2025, 5, 1));

    let overview = OverviewService::farm_overview(&store, &clock, 1).unwrap();
    assert_eq!(overview.active_crops, 1);
    assert_eq!(overview.month_expense_total, 50.0);
    assert_eq!(overview.recent_yield_count, 1);
}
