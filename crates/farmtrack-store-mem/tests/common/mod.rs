use chrono::NaiveDate;

use farmtrack_core::EntityStore;
use farmtrack_domain::{CropYield, Expense, ExpenseCategory, RecordId, YieldUnit};
use farmtrack_store_mem::MemoryStore;

/// Routes service logs to the test output; safe to call from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn seed_expense(
    store: &MemoryStore,
    farm_id: RecordId,
    category: ExpenseCategory,
    amount: f64,
    on: NaiveDate,
) -> Expense {
    store
        .create_expense(Expense::new(0, farm_id, category, amount, on, "seeded"))
        .expect("expense accepted")
}

pub fn seed_yield(
    store: &MemoryStore,
    crop: &str,
    amount: f64,
    harvested: NaiveDate,
) -> CropYield {
    store
        .create_yield(CropYield::new(0, crop, amount, YieldUnit::Tons, harvested))
        .expect("yield accepted")
}
