//! farmtrack-core
//!
//! Business logic and services for farm analytics: the budget ledger, the
//! expense aggregator, the yield analytics engine, and the farm overview.
//! Depends on farmtrack-domain and an [`EntityStore`] backend. No UI, no
//! direct storage implementation.

pub mod budget_service;
pub mod error;
pub mod expense_service;
pub mod format;
pub mod overview_service;
pub mod store;
pub mod time;
pub mod yield_service;

pub use budget_service::BudgetService;
pub use error::{CoreError, CoreResult};
pub use expense_service::ExpenseService;
pub use overview_service::OverviewService;
pub use store::{
    BudgetFilter, CropFilter, EntityKind, EntityStore, ExpenseFilter, YieldFilter,
};
pub use time::{Clock, FixedClock, SystemClock};
pub use yield_service::YieldService;
