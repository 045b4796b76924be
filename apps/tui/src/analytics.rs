//! Pure derivations over the region store.
//!
//! Every view the dashboard shows is recomputed from `(store, selection)` on
//! each frame; nothing here holds state.

use crate::domain::{Metric, RegionRecord, Selection};
use crate::store::RegionStore;
use serde::Serialize;

pub const RADAR_FULL_MARK: f64 = 100.0;
pub const FERTILIZER_DIVISOR: f64 = 2.5;
pub const PESTICIDE_MULTIPLIER: f64 = 30.0;
pub const RAINFALL_DIVISOR: f64 = 15.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RadarAxis {
    pub subject: &'static str,
    pub score: f64,
    pub full_mark: f64,
}

/// One region plotted as an `(x, y)` pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrelationPoint {
    pub region: String,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YieldBar {
    pub region: String,
    pub value: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Kpi {
    pub title: &'static str,
    pub value: f64,
    pub unit: &'static str,
    pub display: String,
}

impl Kpi {
    fn new(title: &'static str, value: f64, unit: &'static str) -> Self {
        let number = format_grouped(value);
        let display = if unit == "%" {
            format!("{number}%")
        } else {
            format!("{number} {unit}")
        };

        Self {
            title,
            value,
            unit,
            display,
        }
    }

    fn rounded(title: &'static str, value: f64, unit: &'static str) -> Self {
        #[allow(clippy::cast_precision_loss)]
        let rounded = round_half_away(value) as f64;
        Self::new(title, rounded, unit)
    }
}

/// Full store for the sentinel, otherwise every record whose name equals the
/// selection exactly. A miss yields an empty vec.
pub fn filter_regions<'a>(store: &'a RegionStore, selection: &Selection) -> Vec<&'a RegionRecord> {
    match selection {
        Selection::All => store.records().iter().collect(),
        Selection::Region(name) => store
            .records()
            .iter()
            .filter(|record| record.name == *name)
            .collect(),
    }
}

pub fn sum<'a>(records: impl IntoIterator<Item = &'a RegionRecord>, metric: Metric) -> f64 {
    records.into_iter().map(|record| metric.value(record)).sum()
}

/// Arithmetic mean, `None` for an empty sequence.
pub fn mean<'a>(records: impl IntoIterator<Item = &'a RegionRecord>, metric: Metric) -> Option<f64> {
    let (total, count) = records
        .into_iter()
        .fold((0.0_f64, 0_usize), |(total, count), record| {
            (total + metric.value(record), count + 1)
        });

    if count == 0 {
        return None;
    }

    #[allow(clippy::cast_precision_loss)]
    let count = count as f64;
    Some(total / count)
}

/// Nearest integer, ties away from zero (2987.5 -> 2988).
#[allow(clippy::cast_possible_truncation)]
pub fn round_half_away(value: f64) -> i64 {
    value.round() as i64
}

/// Five practice scores on a 0..=100 scale for the named region, or an empty
/// vec when the name is not in the store.
pub fn radar_profile(store: &RegionStore, name: &str) -> Vec<RadarAxis> {
    let Some(record) = store.find(name) else {
        return Vec::new();
    };

    vec![
        radar_axis("Irrigation", record.avg_irrigation_coverage),
        radar_axis(
            "Fertilizer",
            record.avg_fertilizer_consumption / FERTILIZER_DIVISOR,
        ),
        radar_axis("Pesticide", record.avg_pesticide_use * PESTICIDE_MULTIPLIER),
        radar_axis("Mechanization", record.avg_mechanization_level),
        radar_axis("Rainfall", record.avg_rainfall / RAINFALL_DIVISOR),
    ]
}

const fn radar_axis(subject: &'static str, score: f64) -> RadarAxis {
    RadarAxis {
        subject,
        score,
        full_mark: RADAR_FULL_MARK,
    }
}

/// Fertilizer (x) against crop yield (y) for every region. Ignores the
/// current selection.
pub fn correlation_points(store: &RegionStore) -> Vec<CorrelationPoint> {
    store
        .records()
        .iter()
        .map(|record| CorrelationPoint {
            region: record.name.clone(),
            x: record.avg_fertilizer_consumption,
            y: record.average_crop_yield,
        })
        .collect()
}

/// Land area (x) against total production (y) over the filtered rows.
pub fn production_vs_land(records: &[&RegionRecord]) -> Vec<CorrelationPoint> {
    records
        .iter()
        .map(|record| CorrelationPoint {
            region: record.name.clone(),
            x: record.total_land_area,
            y: record.total_production,
        })
        .collect()
}

pub fn yield_bars(records: &[&RegionRecord]) -> Vec<YieldBar> {
    records
        .iter()
        .map(|record| YieldBar {
            region: record.name.clone(),
            value: u64::try_from(round_half_away(record.average_crop_yield)).unwrap_or(0),
        })
        .collect()
}

/// The four headline cards. Single-region mode reads fields directly;
/// all-regions mode aggregates the whole store.
pub fn kpis(store: &RegionStore, selection: &Selection) -> Vec<Kpi> {
    match selection {
        Selection::Region(name) => store.find(name).map_or_else(Vec::new, |record| {
            vec![
                Kpi::new(
                    "Average Crop Yield",
                    record.average_crop_yield,
                    Metric::AverageCropYield.unit(),
                ),
                Kpi::new(
                    "Total Production",
                    record.total_production,
                    Metric::TotalProduction.unit(),
                ),
                Kpi::new(
                    "Land Area",
                    record.total_land_area,
                    Metric::TotalLandArea.unit(),
                ),
                Kpi::new("Avg Rainfall", record.avg_rainfall, Metric::AvgRainfall.unit()),
            ]
        }),
        Selection::All => {
            let records = store.records();
            let mut cards = Vec::with_capacity(4);

            if let Some(avg_yield) = mean(records, Metric::AverageCropYield) {
                cards.push(Kpi::rounded(
                    "Avg Crop Yield (All)",
                    avg_yield,
                    Metric::AverageCropYield.unit(),
                ));
            }
            cards.push(Kpi::new(
                "Total Production (All)",
                sum(records, Metric::TotalProduction),
                Metric::TotalProduction.unit(),
            ));
            cards.push(Kpi::new(
                "Total Land Area",
                sum(records, Metric::TotalLandArea),
                Metric::TotalLandArea.unit(),
            ));
            if let Some(avg_mechanization) = mean(records, Metric::AvgMechanizationLevel) {
                cards.push(Kpi::rounded(
                    "Avg Mechanization",
                    avg_mechanization,
                    Metric::AvgMechanizationLevel.unit(),
                ));
            }

            cards
        }
    }
}

/// Everything the presentation layer needs for one selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub selection: String,
    pub regions: Vec<RegionRecord>,
    pub kpis: Vec<Kpi>,
    pub yield_bars: Vec<YieldBar>,
    pub radar: Vec<RadarAxis>,
    pub correlation: Vec<CorrelationPoint>,
    pub production_vs_land: Vec<CorrelationPoint>,
}

impl DashboardView {
    pub fn build(store: &RegionStore, selection: &Selection) -> Self {
        let filtered = filter_regions(store, selection);
        let radar = selection
            .region_name()
            .map_or_else(Vec::new, |name| radar_profile(store, name));

        Self {
            selection: selection.label().to_string(),
            regions: filtered.iter().map(|record| (*record).clone()).collect(),
            kpis: kpis(store, selection),
            yield_bars: yield_bars(&filtered),
            radar,
            correlation: correlation_points(store),
            production_vs_land: production_vs_land(&filtered),
        }
    }
}

/// Thousands-grouped number with at most three fraction digits, e.g.
/// `187500 -> "187,500"`, `1.8 -> "1.8"`.
pub fn format_grouped(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    let sign = if rounded < 0.0 { "-" } else { "" };
    let text = format!("{:.3}", rounded.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (index, ch) in int_part.chars().enumerate() {
        if index > 0 && (int_part.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if frac_part.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{frac_part}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        let diff = (actual - expected).abs();
        assert!(
            diff < 1e-9,
            "expected {expected}, got {actual}, diff {diff}"
        );
    }

    #[test]
    fn filtering_by_each_name_yields_that_record_alone() {
        let store = RegionStore::seed();
        for record in store.records() {
            let selection = Selection::Region(record.name.clone());
            let filtered = filter_regions(&store, &selection);
            assert_eq!(filtered, vec![record]);
        }
    }

    #[test]
    fn sentinel_yields_full_store_in_order() {
        let store = RegionStore::seed();
        let filtered = filter_regions(&store, &Selection::All);
        let expected: Vec<&RegionRecord> = store.records().iter().collect();
        assert_eq!(filtered, expected);
    }

    #[test]
    fn unknown_region_filters_to_nothing() {
        let store = RegionStore::seed();
        let filtered = filter_regions(&store, &Selection::Region("Atlantis".into()));
        assert!(filtered.is_empty());
    }

    #[test]
    fn aggregates_are_order_independent() {
        let store = RegionStore::seed();
        let forward: Vec<&RegionRecord> = store.records().iter().collect();
        let reversed: Vec<&RegionRecord> = store.records().iter().rev().collect();

        for metric in Metric::ALL {
            assert_close(
                sum(forward.iter().copied(), metric),
                sum(reversed.iter().copied(), metric),
            );
            assert_eq!(
                mean(forward.iter().copied(), metric).map(round_half_away),
                mean(reversed.iter().copied(), metric).map(round_half_away),
            );
        }
    }

    #[test]
    fn mean_of_empty_sequence_is_none() {
        let empty: Vec<&RegionRecord> = Vec::new();
        assert_eq!(mean(empty, Metric::AverageCropYield), None);
    }

    #[test]
    fn mean_crop_yield_rounds_half_away_from_zero() {
        let store = RegionStore::seed();
        assert_close(sum(store.records(), Metric::AverageCropYield), 23_900.0);
        let avg = mean(store.records(), Metric::AverageCropYield);
        assert_eq!(avg, Some(2987.5));
        assert_eq!(avg.map(round_half_away), Some(2988));
        assert_eq!(round_half_away(-2.5), -3);
    }

    #[test]
    fn radar_profile_applies_calibration_constants() {
        let store = RegionStore::seed();
        let profile = radar_profile(&store, "Punjab");

        let subjects: Vec<&str> = profile.iter().map(|axis| axis.subject).collect();
        assert_eq!(
            subjects,
            ["Irrigation", "Fertilizer", "Pesticide", "Mechanization", "Rainfall"]
        );
        assert_close(profile[0].score, 98.0);
        assert_close(profile[1].score, 84.0);
        assert_close(profile[2].score, 72.0);
        assert_close(profile[3].score, 85.0);
        assert_close(profile[4].score, 650.0 / 15.0);
        assert!(profile.iter().all(|axis| axis.full_mark == 100.0));
    }

    #[test]
    fn radar_scores_stay_on_scale_for_seed_data() {
        let store = RegionStore::seed();
        for name in store.names() {
            for axis in radar_profile(&store, name) {
                assert!(
                    (0.0..=100.0).contains(&axis.score),
                    "{name} {} out of range: {}",
                    axis.subject,
                    axis.score
                );
            }
        }
    }

    #[test]
    fn radar_profile_for_unknown_region_is_empty() {
        let store = RegionStore::seed();
        assert!(radar_profile(&store, "Atlantis").is_empty());
    }

    #[test]
    fn correlation_covers_every_region_regardless_of_selection() {
        let store = RegionStore::seed();
        let points = correlation_points(&store);
        assert_eq!(points.len(), store.len());
        assert_eq!(points[1].region, "Punjab");
        assert_close(points[1].x, 210.0);
        assert_close(points[1].y, 3950.0);

        let single = DashboardView::build(&store, &Selection::Region("Gujarat".into()));
        assert_eq!(single.correlation, points);
    }

    #[test]
    fn single_region_kpis_read_fields_directly() {
        let store = RegionStore::seed();
        let cards = kpis(&store, &Selection::Region("Punjab".into()));

        assert_eq!(cards.len(), 4);
        assert_eq!(cards[0].title, "Average Crop Yield");
        assert_eq!(cards[0].display, "3,950 kg/ha");
        assert_eq!(cards[1].display, "142,000 tonnes");
        assert_eq!(cards[2].display, "36,000 ha");
        assert_eq!(cards[3].display, "650 mm");
    }

    #[test]
    fn all_region_kpis_aggregate_the_store() {
        let store = RegionStore::seed();
        let cards = kpis(&store, &Selection::All);

        let displays: Vec<&str> = cards.iter().map(|card| card.display.as_str()).collect();
        assert_eq!(
            displays,
            ["2,988 kg/ha", "1,281,500 tonnes", "430,500 ha", "57%"]
        );
    }

    #[test]
    fn unknown_region_has_no_kpis() {
        let store = RegionStore::seed();
        assert!(kpis(&store, &Selection::Region("Atlantis".into())).is_empty());
    }

    #[test]
    fn view_for_all_states_has_no_radar() {
        let store = RegionStore::seed();
        let view = DashboardView::build(&store, &Selection::All);
        assert_eq!(view.selection, "All States");
        assert_eq!(view.regions.len(), 8);
        assert_eq!(view.yield_bars.len(), 8);
        assert_eq!(view.production_vs_land.len(), 8);
        assert!(view.radar.is_empty());
    }

    #[test]
    fn view_for_missing_region_degrades_to_empty_sections() {
        let store = RegionStore::seed();
        let view = DashboardView::build(&store, &Selection::Region("Atlantis".into()));
        assert!(view.regions.is_empty());
        assert!(view.kpis.is_empty());
        assert!(view.radar.is_empty());
        assert_eq!(view.correlation.len(), 8);
    }

    #[test]
    fn format_grouped_matches_locale_style() {
        assert_eq!(format_grouped(187_500.0), "187,500");
        assert_eq!(format_grouped(1_281_500.0), "1,281,500");
        assert_eq!(format_grouped(950.0), "950");
        assert_eq!(format_grouped(1.8), "1.8");
        assert_eq!(format_grouped(47_500.25), "47,500.25");
        assert_eq!(format_grouped(0.0), "0");
        assert_eq!(format_grouped(-1234.5), "-1,234.5");
    }
}
