//! Domain types for harvest observations and yield analytics results.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::common::{Amounted, Identifiable, RecordId};

/// Unit a harvest amount was recorded in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum YieldUnit {
    Tons,
    Bushels,
    Pounds,
    #[serde(rename = "kg")]
    Kilograms,
    Liters,
    Gallons,
    Crates,
    Boxes,
}

impl fmt::Display for YieldUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            YieldUnit::Tons => "tons",
            YieldUnit::Bushels => "bushels",
            YieldUnit::Pounds => "pounds",
            YieldUnit::Kilograms => "kg",
            YieldUnit::Liters => "liters",
            YieldUnit::Gallons => "gallons",
            YieldUnit::Crates => "crates",
            YieldUnit::Boxes => "boxes",
        };
        f.write_str(label)
    }
}

/// A harvest observation. Yields are not farm-scoped; they relate to crops
/// loosely through an exact `crop_name` match.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CropYield {
    pub id: RecordId,
    pub crop_name: String,
    pub yield_amount: f64,
    pub unit: YieldUnit,
    pub harvest_date: NaiveDate,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl CropYield {
    pub fn new(
        id: RecordId,
        crop_name: impl Into<String>,
        yield_amount: f64,
        unit: YieldUnit,
        harvest_date: NaiveDate,
    ) -> Self {
        Self {
            id,
            crop_name: crop_name.into(),
            yield_amount,
            unit,
            harvest_date,
            notes: String::new(),
            tags: Vec::new(),
        }
    }
}

impl Identifiable for CropYield {
    fn id(&self) -> RecordId {
        self.id
    }
}

impl Amounted for CropYield {
    fn amount(&self) -> f64 {
        self.yield_amount
    }
}

/// Reporting window for yield analytics, counted in whole calendar months
/// back from the reference date.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum YieldWindow {
    Months(u32),
    All,
}

impl FromStr for YieldWindow {
    type Err = ParseWindowError;

    /// Parses the period tokens used by the analytics views: `"all"`, or a
    /// positive month count such as `"3months"`.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value == "all" {
            return Ok(YieldWindow::All);
        }
        let months = value
            .strip_suffix("months")
            .and_then(|head| head.parse::<u32>().ok())
            .ok_or_else(|| ParseWindowError(value.to_string()))?;
        if months == 0 {
            return Err(ParseWindowError(value.to_string()));
        }
        Ok(YieldWindow::Months(months))
    }
}

/// Error returned when a period token cannot be parsed into a [`YieldWindow`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseWindowError(pub String);

impl fmt::Display for ParseWindowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unrecognised yield window: {}", self.0)
    }
}

impl std::error::Error for ParseWindowError {}

/// Crop filter for yield analytics: a specific crop name or everything.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum CropSelector {
    All,
    Named(String),
}

impl From<&str> for CropSelector {
    fn from(value: &str) -> Self {
        if value == "all" {
            CropSelector::All
        } else {
            CropSelector::Named(value.to_string())
        }
    }
}

/// Per-crop performance within a summarized yield set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CropPerformance {
    pub crop_name: String,
    pub average: f64,
    pub total: f64,
    pub count: usize,
}

/// Aggregate statistics over a yield snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct YieldStats {
    pub total_yield: f64,
    pub average_yield: f64,
    pub highest_yield: f64,
    pub lowest_yield: f64,
    pub total_records: usize,
    pub top_crops: Vec<CropPerformance>,
}

/// The full payload the yield analytics view renders from: statistics plus
/// the distinct units/crops present and the most recent records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YieldReport {
    pub stats: YieldStats,
    pub units: Vec<YieldUnit>,
    pub crops: Vec<String>,
    pub recent: Vec<CropYield>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_parses_period_tokens() {
        assert_eq!("all".parse::<YieldWindow>().unwrap(), YieldWindow::All);
        assert_eq!(
            "3months".parse::<YieldWindow>().unwrap(),
            YieldWindow::Months(3)
        );
        assert_eq!(
            "12months".parse::<YieldWindow>().unwrap(),
            YieldWindow::Months(12)
        );
    }

    #[test]
    fn window_rejects_zero_and_noise() {
        assert!("0months".parse::<YieldWindow>().is_err());
        assert!("months".parse::<YieldWindow>().is_err());
        assert!("forever".parse::<YieldWindow>().is_err());
    }

    #[test]
    fn crop_selector_from_token() {
        assert_eq!(CropSelector::from("all"), CropSelector::All);
        assert_eq!(
            CropSelector::from("Corn"),
            CropSelector::Named("Corn".to_string())
        );
    }

    #[test]
    fn yield_unit_serializes_lowercase() {
        let json = serde_json::to_string(&YieldUnit::Kilograms).unwrap();
        assert_eq!(json, "\"kg\"");
        let back: YieldUnit = serde_json::from_str("\"bushels\"").unwrap();
        assert_eq!(back, YieldUnit::Bushels);
    }
}
