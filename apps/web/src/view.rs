use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardExport {
    pub generated_at: String,
    pub all_label: String,
    pub regions: Vec<Region>,
    pub summary: Vec<Kpi>,
    pub correlation: Vec<CorrelationPoint>,
    pub radar_profiles: Vec<RegionProfile>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Region {
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

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Kpi {
    pub title: String,
    pub display: String,
}

/// Fertilizer (x) against crop yield (y) for one region.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CorrelationPoint {
    pub region: String,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionProfile {
    pub region: String,
    pub axes: Vec<RadarAxis>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RadarAxis {
    pub subject: String,
    pub score: f64,
    pub full_mark: f64,
}

/// Index 0 is the "all" entry, index `n` is `regions[n - 1]`.
pub const fn cycle(index: usize, len: usize, forward: bool) -> usize {
    if len == 0 {
        return 0;
    }
    if forward {
        (index + 1) % len
    } else if index == 0 {
        len - 1
    } else {
        index - 1
    }
}

impl DashboardExport {
    pub fn option_count(&self) -> usize {
        self.regions.len() + 1
    }

    pub fn selected_region(&self, index: usize) -> Option<&Region> {
        index.checked_sub(1).and_then(|index| self.regions.get(index))
    }

    pub fn selection_label(&self, index: usize) -> &str {
        self.selected_region(index)
            .map_or(self.all_label.as_str(), |region| region.name.as_str())
    }

    /// Summary cards for the selection: the exported aggregates for "all",
    /// otherwise the region's own figures.
    pub fn cards(&self, index: usize) -> Vec<Kpi> {
        let Some(region) = self.selected_region(index) else {
            return self.summary.clone();
        };

        [
            ("Average Crop Yield", region.average_crop_yield, " kg/ha"),
            ("Total Production", region.total_production, " tonnes"),
            ("Land Area", region.total_land_area, " ha"),
            ("Avg Rainfall", region.avg_rainfall, " mm"),
        ]
        .into_iter()
        .map(|(title, value, unit)| Kpi {
            title: title.to_string(),
            display: format!("{}{unit}", format_grouped(value)),
        })
        .collect()
    }

    pub fn profile(&self, index: usize) -> Option<&RegionProfile> {
        let region = self.selected_region(index)?;
        self.radar_profiles
            .iter()
            .find(|profile| profile.region == region.name)
    }

    pub fn rows(&self, index: usize) -> Vec<&Region> {
        match self.selected_region(index) {
            Some(region) => vec![region],
            None => self.regions.iter().collect(),
        }
    }
}

/// Data range padded by 10% on each side, never below zero.
pub fn axis_bounds(values: impl Iterator<Item = f64>) -> [f64; 2] {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), value| {
        (min.min(value), max.max(value))
    });

    if !min.is_finite() || !max.is_finite() {
        return [0.0, 1.0];
    }

    let span = max - min;
    let pad = if span > 0.0 {
        span * 0.1
    } else {
        (max.abs() * 0.1).max(1.0)
    };

    [(min - pad).max(0.0), max + pad]
}

/// Thousands-grouped number with at most three fraction digits, matching
/// the terminal dashboard (187500 -> "187,500", 1.8 -> "1.8").
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
