//! Domain types for planted crops.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::common::{Identifiable, NamedEntity, RecordId};

/// Where a planting currently sits in its lifecycle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum GrowthStage {
    Planted,
    Growing,
    Ready,
    Harvested,
}

impl fmt::Display for GrowthStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            GrowthStage::Planted => "Planted",
            GrowthStage::Growing => "Growing",
            GrowthStage::Ready => "Ready",
            GrowthStage::Harvested => "Harvested",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CropStatus {
    Active,
    Completed,
}

impl fmt::Display for CropStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CropStatus::Active => "Active",
            CropStatus::Completed => "Completed",
        };
        f.write_str(label)
    }
}

/// A planting on a farm. Related yield records are matched by `crop_name`,
/// not by foreign key; `associated_yield_id` is an optional direct link.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Crop {
    pub id: RecordId,
    pub farm_id: RecordId,
    pub crop_name: String,
    pub variety: String,
    pub planting_date: NaiveDate,
    pub expected_harvest_date: NaiveDate,
    pub growth_stage: GrowthStage,
    pub status: CropStatus,
    #[serde(default)]
    pub notes: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub associated_yield_id: Option<RecordId>,
}

impl Crop {
    pub fn new(
        id: RecordId,
        farm_id: RecordId,
        crop_name: impl Into<String>,
        planting_date: NaiveDate,
        expected_harvest_date: NaiveDate,
    ) -> Self {
        Self {
            id,
            farm_id,
            crop_name: crop_name.into(),
            variety: String::new(),
            planting_date,
            expected_harvest_date,
            growth_stage: GrowthStage::Planted,
            status: CropStatus::Active,
            notes: String::new(),
            associated_yield_id: None,
        }
    }
}

impl Identifiable for Crop {
    fn id(&self) -> RecordId {
        self.id
    }
}

impl NamedEntity for Crop {
    fn name(&self) -> &str {
        &self.crop_name
    }
}
