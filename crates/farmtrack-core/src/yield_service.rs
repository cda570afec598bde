//! Time-windowed and crop-filtered yield statistics.

use std::cmp::Ordering;

use chrono::NaiveDate;

use farmtrack_domain::{
    months_before, CropPerformance, CropSelector, CropYield, YieldReport, YieldStats, YieldUnit,
    YieldWindow,
};

use crate::error::CoreResult;
use crate::store::{EntityStore, YieldFilter};
use crate::time::Clock;

/// How many crops the per-crop ranking keeps.
pub const TOP_CROPS_LIMIT: usize = 5;

/// How many records the "recent harvests" listing keeps.
pub const RECENT_RECORDS: usize = 10;

/// Stateless yield analytics over already-fetched snapshots.
pub struct YieldService;

impl YieldService {
    /// Keeps records harvested within the window, counted in calendar months
    /// back from `today`. The boundary is inclusive: a record harvested
    /// exactly `n` months ago stays in. [`YieldWindow::All`] is a passthrough.
    pub fn filter_by_window(
        yields: &[CropYield],
        window: YieldWindow,
        today: NaiveDate,
    ) -> Vec<CropYield> {
        match window {
            YieldWindow::All => yields.to_vec(),
            YieldWindow::Months(months) => {
                let cutoff = months_before(today, months);
                yields
                    .iter()
                    .filter(|record| record.harvest_date >= cutoff)
                    .cloned()
                    .collect()
            }
        }
    }

    /// Keeps records whose `crop_name` matches exactly (case-sensitive).
    /// [`CropSelector::All`] is a passthrough.
    pub fn filter_by_crop(yields: &[CropYield], selector: &CropSelector) -> Vec<CropYield> {
        match selector {
            CropSelector::All => yields.to_vec(),
            CropSelector::Named(name) => yields
                .iter()
                .filter(|record| record.crop_name == *name)
                .cloned()
                .collect(),
        }
    }

    /// Summarizes a yield snapshot, or `None` when it is empty; an empty
    /// snapshot is a valid no-data state, not an error.
    pub fn summarize(yields: &[CropYield]) -> Option<YieldStats> {
        if yields.is_empty() {
            return None;
        }

        let total_yield: f64 = yields.iter().map(|record| record.yield_amount).sum();
        let average_yield = total_yield / yields.len() as f64;
        let highest_yield = yields
            .iter()
            .map(|record| record.yield_amount)
            .fold(f64::NEG_INFINITY, f64::max);
        let lowest_yield = yields
            .iter()
            .map(|record| record.yield_amount)
            .fold(f64::INFINITY, f64::min);

        // Group per crop in first-encounter order, so that the stable sort
        // below keeps that order across equal averages.
        let mut top_crops: Vec<CropPerformance> = Vec::new();
        for record in yields {
            match top_crops
                .iter_mut()
                .find(|entry| entry.crop_name == record.crop_name)
            {
                Some(entry) => {
                    entry.total += record.yield_amount;
                    entry.count += 1;
                }
                None => top_crops.push(CropPerformance {
                    crop_name: record.crop_name.clone(),
                    average: 0.0,
                    total: record.yield_amount,
                    count: 1,
                }),
            }
        }
        for entry in &mut top_crops {
            entry.average = entry.total / entry.count as f64;
        }
        top_crops.sort_by(|a, b| {
            b.average
                .partial_cmp(&a.average)
                .unwrap_or(Ordering::Equal)
        });
        top_crops.truncate(TOP_CROPS_LIMIT);

        Some(YieldStats {
            total_yield,
            average_yield,
            highest_yield,
            lowest_yield,
            total_records: yields.len(),
            top_crops,
        })
    }

    /// Distinct units present, in first-seen order.
    pub fn unique_units(yields: &[CropYield]) -> Vec<YieldUnit> {
        let mut units = Vec::new();
        for record in yields {
            if !units.contains(&record.unit) {
                units.push(record.unit);
            }
        }
        units
    }

    /// Distinct non-empty crop names, in first-seen order.
    pub fn unique_crops(yields: &[CropYield]) -> Vec<String> {
        let mut crops: Vec<String> = Vec::new();
        for record in yields {
            if record.crop_name.is_empty() {
                continue;
            }
            if !crops.iter().any(|name| *name == record.crop_name) {
                crops.push(record.crop_name.clone());
            }
        }
        crops
    }

    /// The newest `limit` records by harvest date.
    pub fn most_recent(yields: &[CropYield], limit: usize) -> Vec<CropYield> {
        let mut recent = yields.to_vec();
        recent.sort_by(|a, b| b.harvest_date.cmp(&a.harvest_date));
        recent.truncate(limit);
        recent
    }

    /// The analytics view's load path: fetch (crop-filtered at the store when
    /// one crop is selected), window-filter in memory, then summarize.
    /// `Ok(None)` means no records for the selection; fetch errors propagate.
    pub fn report(
        store: &dyn EntityStore,
        clock: &dyn Clock,
        window: YieldWindow,
        selector: &CropSelector,
    ) -> CoreResult<Option<YieldReport>> {
        let filter = match selector {
            CropSelector::Named(name) => YieldFilter::for_crop(name.clone()),
            CropSelector::All => YieldFilter::default(),
        };
        let fetched = store.list_yields(&filter)?;
        let in_window = Self::filter_by_window(&fetched, window, clock.today());
        let Some(stats) = Self::summarize(&in_window) else {
            return Ok(None);
        };
        Ok(Some(YieldReport {
            units: Self::unique_units(&in_window),
            crops: Self::unique_crops(&in_window),
            recent: Self::most_recent(&in_window, RECENT_RECORDS),
            stats,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(id: i64, crop: &str, amount: f64, harvest: NaiveDate) -> CropYield {
        CropYield::new(id, crop, amount, YieldUnit::Tons, harvest)
    }

    #[test]
    fn summarize_empty_is_none() {
        assert!(YieldService::summarize(&[]).is_none());
    }

    #[test]
    fn summarize_singleton_collapses_to_one_value() {
        let stats =
            YieldService::summarize(&[record(1, "Corn", 10.0, date(2025, 6, 1))]).unwrap();
        assert_eq!(stats.total_yield, 10.0);
        assert_eq!(stats.average_yield, 10.0);
        assert_eq!(stats.highest_yield, 10.0);
        assert_eq!(stats.lowest_yield, 10.0);
        assert_eq!(stats.total_records, 1);
    }

    #[test]
    fn top_crops_tie_break_keeps_first_encountered() {
        let yields = [
            record(1, "Corn", 100.0, date(2025, 5, 1)),
            record(2, "Corn", 200.0, date(2025, 5, 2)),
            record(3, "Wheat", 150.0, date(2025, 5, 3)),
        ];
        let stats = YieldService::summarize(&yields).unwrap();
        assert_eq!(stats.top_crops.len(), 2);
        assert_eq!(stats.top_crops[0].crop_name, "Corn");
        assert_eq!(stats.top_crops[0].average, 150.0);
        assert_eq!(stats.top_crops[0].total, 300.0);
        assert_eq!(stats.top_crops[0].count, 2);
        assert_eq!(stats.top_crops[1].crop_name, "Wheat");
        assert_eq!(stats.top_crops[1].average, 150.0);
        assert_eq!(stats.top_crops[1].total, 150.0);
        assert_eq!(stats.top_crops[1].count, 1);
    }

    #[test]
    fn top_crops_ranked_descending_and_truncated() {
        let mut yields = Vec::new();
        for (i, (crop, amount)) in [
            ("A", 10.0),
            ("B", 60.0),
            ("C", 30.0),
            ("D", 40.0),
            ("E", 50.0),
            ("F", 20.0),
        ]
        .iter()
        .enumerate()
        {
            yields.push(record(i as i64, crop, *amount, date(2025, 5, 1)));
        }
        let stats = YieldService::summarize(&yields).unwrap();
        assert_eq!(stats.top_crops.len(), TOP_CROPS_LIMIT);
        assert_eq!(stats.top_crops[0].crop_name, "B");
        assert_eq!(stats.top_crops[4].crop_name, "F");
    }

    #[test]
    fn window_boundary_is_inclusive_in_calendar_months() {
        let today = date(2025, 7, 15);
        let yields = [
            record(1, "Corn", 10.0, date(2025, 4, 15)),
            record(2, "Corn", 20.0, date(2025, 3, 15)),
        ];
        let kept = YieldService::filter_by_window(&yields, YieldWindow::Months(3), today);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, 1);
    }

    #[test]
    fn window_all_is_passthrough() {
        let yields = [
            record(1, "Corn", 10.0, date(2000, 1, 1)),
            record(2, "Corn", 20.0, date(2025, 1, 1)),
        ];
        let kept = YieldService::filter_by_window(&yields, YieldWindow::All, date(2025, 7, 15));
        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn crop_filter_is_exact_and_case_sensitive() {
        let yields = [
            record(1, "Corn", 10.0, date(2025, 5, 1)),
            record(2, "corn", 20.0, date(2025, 5, 1)),
            record(3, "Wheat", 30.0, date(2025, 5, 1)),
        ];
        let corn =
            YieldService::filter_by_crop(&yields, &CropSelector::Named("Corn".to_string()));
        assert_eq!(corn.len(), 1);
        assert_eq!(corn[0].id, 1);
        assert_eq!(
            YieldService::filter_by_crop(&yields, &CropSelector::All).len(),
            3
        );
    }

    #[test]
    fn unique_values_keep_first_seen_order() {
        let mut a = record(1, "Corn", 10.0, date(2025, 5, 1));
        a.unit = YieldUnit::Bushels;
        let b = record(2, "Wheat", 20.0, date(2025, 5, 2));
        let mut c = record(3, "Corn", 30.0, date(2025, 5, 3));
        c.unit = YieldUnit::Bushels;
        let d = record(4, "", 5.0, date(2025, 5, 4));
        let yields = [a, b, c, d];

        assert_eq!(
            YieldService::unique_units(&yields),
            vec![YieldUnit::Bushels, YieldUnit::Tons]
        );
        assert_eq!(YieldService::unique_crops(&yields), vec!["Corn", "Wheat"]);
    }

    #[test]
    fn most_recent_sorts_newest_first() {
        let yields = [
            record(1, "Corn", 10.0, date(2025, 3, 1)),
            record(2, "Corn", 20.0, date(2025, 6, 1)),
            record(3, "Corn", 30.0, date(2025, 5, 1)),
        ];
        let recent = YieldService::most_recent(&yields, 2);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].id, 2);
        assert_eq!(recent[1].id, 3);
    }
}
