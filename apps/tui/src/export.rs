use crate::analytics::{correlation_points, kpis, radar_profile, CorrelationPoint, Kpi, RadarAxis};
use crate::domain::{RegionRecord, Selection, ALL_STATES_LABEL};
use crate::store::RegionStore;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to serialize dashboard: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionProfile {
    pub region: String,
    pub axes: Vec<RadarAxis>,
}

/// Snapshot consumed by the web dashboard (`dashboard.json`).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardExport {
    pub generated_at: String,
    pub all_label: &'static str,
    pub regions: Vec<RegionRecord>,
    pub summary: Vec<Kpi>,
    pub correlation: Vec<CorrelationPoint>,
    pub radar_profiles: Vec<RegionProfile>,
}

impl DashboardExport {
    pub fn from_store(store: &RegionStore, generated_at: DateTime<Utc>) -> Self {
        let radar_profiles = store
            .names()
            .map(|name| RegionProfile {
                region: name.to_string(),
                axes: radar_profile(store, name),
            })
            .collect();

        Self {
            generated_at: generated_at.to_rfc3339(),
            all_label: ALL_STATES_LABEL,
            regions: store.records().to_vec(),
            summary: kpis(store, &Selection::All),
            correlation: correlation_points(store),
            radar_profiles,
        }
    }
}

/// Serializes the store snapshot and writes it to `path`, creating parent
/// directories as needed.
pub async fn write_export(store: &RegionStore, path: &Path) -> Result<PathBuf, ExportError> {
    let export = DashboardExport::from_store(store, Utc::now());
    let json = serde_json::to_vec_pretty(&export)?;

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|source| ExportError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
    }

    tokio::fs::write(path, json)
        .await
        .map_err(|source| ExportError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    log::info!("exported {} regions to {}", export.regions.len(), path.display());
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn scratch_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("agri-dashboard-{name}-{}", std::process::id()))
    }

    #[test]
    fn snapshot_contains_profiles_for_every_region() {
        let store = RegionStore::seed();
        let now = Utc.with_ymd_and_hms(2025, 5, 18, 0, 0, 0).unwrap();
        let export = DashboardExport::from_store(&store, now);

        assert_eq!(export.generated_at, "2025-05-18T00:00:00+00:00");
        assert_eq!(export.regions.len(), 8);
        assert_eq!(export.radar_profiles.len(), 8);
        assert!(export.radar_profiles.iter().all(|profile| profile.axes.len() == 5));
        assert_eq!(export.summary[0].display, "2,988 kg/ha");
    }

    #[test]
    fn snapshot_serializes_with_camel_case_keys() {
        let store = RegionStore::seed();
        let now = Utc.with_ymd_and_hms(2025, 5, 18, 0, 0, 0).unwrap();
        let value = serde_json::to_value(DashboardExport::from_store(&store, now)).unwrap();

        assert_eq!(value["allLabel"], "All States");
        assert_eq!(value["regions"][1]["name"], "Punjab");
        assert_eq!(value["regions"][1]["avgFertilizerConsumption"], 210.0);
        assert_eq!(value["radarProfiles"][1]["axes"][1]["score"], 84.0);
        assert_eq!(value["radarProfiles"][1]["axes"][1]["fullMark"], 100.0);
    }

    #[tokio::test]
    async fn writes_json_file_and_creates_parent() -> Result<(), Box<dyn std::error::Error>> {
        let dir = scratch_dir("export");
        let path = dir.join("nested").join("dashboard.json");

        let written = write_export(&RegionStore::seed(), &path).await?;
        assert_eq!(written, path);

        let body = tokio::fs::read_to_string(&path).await?;
        let value: serde_json::Value = serde_json::from_str(&body)?;
        assert_eq!(value["correlation"].as_array().map(Vec::len), Some(8));

        tokio::fs::remove_dir_all(&dir).await?;
        Ok(())
    }
}
