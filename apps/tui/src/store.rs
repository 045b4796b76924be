use crate::domain::{Metric, RegionRecord, Selection};
use std::collections::HashSet;
use thiserror::Error;

/// Date the bundled figures were last refreshed.
pub const DATA_AS_OF: &str = "May 18, 2025";

#[derive(Debug, Error, PartialEq)]
pub enum StoreError {
    #[error("region store must contain at least one record")]
    Empty,
    #[error("duplicate region name: {0}")]
    DuplicateName(String),
    #[error("region name {0:?} is reserved for the all-states selection")]
    ReservedName(String),
    #[error("region {region}: {metric} must be a finite, non-negative number (got {value})")]
    InvalidValue {
        region: String,
        metric: &'static str,
        value: f64,
    },
}

/// Immutable, ordered set of region records. Constructed once and only read
/// afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionStore {
    records: Vec<RegionRecord>,
}

impl RegionStore {
    pub fn new(records: Vec<RegionRecord>) -> Result<Self, StoreError> {
        if records.is_empty() {
            return Err(StoreError::Empty);
        }

        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if Selection::parse(&record.name).is_all() {
                return Err(StoreError::ReservedName(record.name.clone()));
            }
            if !seen.insert(record.name.as_str()) {
                return Err(StoreError::DuplicateName(record.name.clone()));
            }

            for metric in Metric::ALL {
                let value = metric.value(record);
                if !value.is_finite() || value < 0.0 {
                    return Err(StoreError::InvalidValue {
                        region: record.name.clone(),
                        metric: metric.label(),
                        value,
                    });
                }
            }
        }

        Ok(Self { records })
    }

    /// The eight-state fixture the dashboard ships with.
    pub fn seed() -> Self {
        Self {
            records: seed_records(),
        }
    }

    pub fn records(&self) -> &[RegionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.records.iter().map(|record| record.name.as_str())
    }

    pub fn find(&self, name: &str) -> Option<&RegionRecord> {
        self.records.iter().find(|record| record.name == name)
    }
}

impl Default for RegionStore {
    fn default() -> Self {
        Self::seed()
    }
}

#[allow(clippy::too_many_arguments)]
fn region(
    name: &str,
    average_crop_yield: f64,
    total_production: f64,
    total_land_area: f64,
    avg_irrigation_coverage: f64,
    avg_fertilizer_consumption: f64,
    avg_pesticide_use: f64,
    avg_mechanization_level: f64,
    avg_rainfall: f64,
) -> RegionRecord {
    RegionRecord {
        name: name.to_string(),
        average_crop_yield,
        total_production,
        total_land_area,
        avg_irrigation_coverage,
        avg_fertilizer_consumption,
        avg_pesticide_use,
        avg_mechanization_level,
        avg_rainfall,
    }
}

fn seed_records() -> Vec<RegionRecord> {
    vec![
        region("Maharashtra", 2850.0, 187_500.0, 65_000.0, 62.0, 145.0, 1.8, 52.0, 950.0),
        region("Punjab", 3950.0, 142_000.0, 36_000.0, 98.0, 210.0, 2.4, 85.0, 650.0),
        region("Uttar Pradesh", 3250.0, 265_000.0, 82_000.0, 78.0, 180.0, 2.1, 62.0, 750.0),
        region("Karnataka", 2450.0, 112_000.0, 45_000.0, 45.0, 125.0, 1.5, 48.0, 825.0),
        region("Gujarat", 2650.0, 128_000.0, 48_000.0, 58.0, 155.0, 1.7, 56.0, 675.0),
        region("Madhya Pradesh", 2750.0, 192_000.0, 70_000.0, 52.0, 140.0, 1.6, 50.0, 925.0),
        region("West Bengal", 3050.0, 145_000.0, 47_500.0, 72.0, 165.0, 1.9, 45.0, 1450.0),
        region("Tamil Nadu", 2950.0, 110_000.0, 37_000.0, 65.0, 160.0, 1.8, 58.0, 950.0),
    ]
}
