use serde::{Deserialize, Serialize};

/// Label shown for the "no single region isolated" selection.
pub const ALL_STATES_LABEL: &str = "All States";

/// One row of agricultural statistics for a named region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionRecord {
    pub name: String,
    pub average_crop_yield: f64,
    pub total_production: f64,
    pub total_land_area: f64,
    pub avg_irrigation_coverage: f64,
    pub avg_fertilizer_consumption: f64,
    pub avg_pesticide_use: f64,
    pub avg_mechanization_level: f64,
    pub avg_rainfall: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Metric {
    AverageCropYield,
    TotalProduction,
    TotalLandArea,
    AvgIrrigationCoverage,
    AvgFertilizerConsumption,
    AvgPesticideUse,
    AvgMechanizationLevel,
    AvgRainfall,
}

impl Metric {
    pub const ALL: [Self; 8] = [
        Self::AverageCropYield,
        Self::TotalProduction,
        Self::TotalLandArea,
        Self::AvgIrrigationCoverage,
        Self::AvgFertilizerConsumption,
        Self::AvgPesticideUse,
        Self::AvgMechanizationLevel,
        Self::AvgRainfall,
    ];

    pub const fn value(self, record: &RegionRecord) -> f64 {
        match self {
            Self::AverageCropYield => record.average_crop_yield,
            Self::TotalProduction => record.total_production,
            Self::TotalLandArea => record.total_land_area,
            Self::AvgIrrigationCoverage => record.avg_irrigation_coverage,
            Self::AvgFertilizerConsumption => record.avg_fertilizer_consumption,
            Self::AvgPesticideUse => record.avg_pesticide_use,
            Self::AvgMechanizationLevel => record.avg_mechanization_level,
            Self::AvgRainfall => record.avg_rainfall,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::AverageCropYield => "Average Crop Yield",
            Self::TotalProduction => "Total Production",
            Self::TotalLandArea => "Total Land Area",
            Self::AvgIrrigationCoverage => "Avg Irrigation Coverage",
            Self::AvgFertilizerConsumption => "Avg Fertilizer Consumption",
            Self::AvgPesticideUse => "Avg Pesticide Use",
            Self::AvgMechanizationLevel => "Avg Mechanization Level",
            Self::AvgRainfall => "Avg Rainfall",
        }
    }

    pub const fn unit(self) -> &'static str {
        match self {
            Self::AverageCropYield | Self::AvgFertilizerConsumption => "kg/ha",
            Self::TotalProduction => "tonnes",
            Self::TotalLandArea => "ha",
            Self::AvgIrrigationCoverage | Self::AvgMechanizationLevel => "%",
            Self::AvgPesticideUse => "kg/ha",
            Self::AvgRainfall => "mm",
        }
    }
}

/// The region filter. `All` is the sentinel; `Region` holds an exact name.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "name")]
pub enum Selection {
    #[default]
    All,
    Region(String),
}

impl Selection {
    /// Maps user text to a selection. Sentinel labels are matched
    /// case-insensitively, region names are kept verbatim.
    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.eq_ignore_ascii_case(ALL_STATES_LABEL)
            || trimmed.eq_ignore_ascii_case("All Regions")
            || trimmed.is_empty()
        {
            Self::All
        } else {
            Self::Region(trimmed.to_string())
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::All => ALL_STATES_LABEL,
            Self::Region(name) => name.as_str(),
        }
    }

    pub const fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    pub fn region_name(&self) -> Option<&str> {
        match self {
            Self::All => None,
            Self::Region(name) => Some(name.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_maps_sentinel_labels_to_all() {
        assert_eq!(Selection::parse("All States"), Selection::All);
        assert_eq!(Selection::parse("  all regions "), Selection::All);
        assert_eq!(Selection::parse(""), Selection::All);
    }

    #[test]
    fn parse_keeps_region_names_verbatim() {
        assert_eq!(
            Selection::parse(" Tamil Nadu "),
            Selection::Region("Tamil Nadu".to_string())
        );
        assert_eq!(
            Selection::parse("punjab"),
            Selection::Region("punjab".to_string())
        );
    }

    #[test]
    fn label_reports_sentinel_or_name() {
        assert_eq!(Selection::All.label(), "All States");
        assert_eq!(Selection::Region("Punjab".into()).label(), "Punjab");
        assert_eq!(Selection::All.region_name(), None);
    }

    #[test]
    fn metric_value_reads_named_field() {
        let record = RegionRecord {
            name: "Test".into(),
            average_crop_yield: 1.0,
            total_production: 2.0,
            total_land_area: 3.0,
            avg_irrigation_coverage: 4.0,
            avg_fertilizer_consumption: 5.0,
            avg_pesticide_use: 6.0,
            avg_mechanization_level: 7.0,
            avg_rainfall: 8.0,
        };

        let values = Metric::ALL.map(|metric| metric.value(&record));
        assert_eq!(values, [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
    }
}
