//! Headline dashboard numbers assembled from joined per-farm fetches.

use chrono::Duration;

use farmtrack_domain::{same_calendar_month, CropStatus, FarmOverview, RecordId};

use crate::error::CoreResult;
use crate::store::{CropFilter, EntityStore, ExpenseFilter, YieldFilter};
use crate::time::Clock;

/// The dashboard counts yields harvested within this fixed lookback. This is
/// a day-based window, unlike the analytics engine's calendar-month windows.
const RECENT_YIELD_LOOKBACK_DAYS: i64 = 30;

pub struct OverviewService;

impl OverviewService {
    /// Fetches the farm's crops and expenses plus the global yield list, and
    /// computes the dashboard's stat cards from the joined snapshot. All
    /// fetches must succeed before anything is computed.
    pub fn farm_overview(
        store: &dyn EntityStore,
        clock: &dyn Clock,
        farm_id: RecordId,
    ) -> CoreResult<FarmOverview> {
        let crops = store.list_crops(&CropFilter::for_farm(farm_id))?;
        let expenses = store.list_expenses(&ExpenseFilter::for_farm(farm_id))?;
        let yields = store.list_yields(&YieldFilter::default())?;

        let today = clock.today();
        let active_crops = crops
            .iter()
            .filter(|crop| crop.status == CropStatus::Active)
            .count();
        let month_expense_total = expenses
            .iter()
            .filter(|expense| same_calendar_month(expense.date, today))
            .map(|expense| expense.amount)
            .sum();
        let cutoff = today - Duration::days(RECENT_YIELD_LOOKBACK_DAYS);
        let recent_yield_count = yields
            .iter()
            .filter(|record| record.harvest_date >= cutoff)
            .count();

        Ok(FarmOverview {
            active_crops,
            month_expense_total,
            recent_yield_count,
        })
    }
}
