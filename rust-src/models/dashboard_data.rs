//! Dashboard data document produced by the SoloFocus backend.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;


/// Date or month key mapped to focus minutes.
pub type MinuteMap = BTreeMap<String, f64>;


/// Aggregated time-series and summary figures for one user.
///
/// Every field is optional in the source document; missing maps are empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    #[serde(default, alias = "contribution", deserialize_with = "minutes_or_zero")]
    pub contribution_data: MinuteMap,
    #[serde(default, alias = "weekly", deserialize_with = "minutes_or_zero")]
    pub weekly_data: MinuteMap,
    #[serde(default, alias = "monthly", deserialize_with = "minutes_or_zero")]
    pub monthly_data: MinuteMap,
    #[serde(default, alias = "yearly", deserialize_with = "minutes_or_zero")]
    pub yearly_data: MinuteMap,
    #[serde(default)]
    pub total_hours: Option<f64>,
    #[serde(default)]
    pub current_streak: Option<u32>,
    #[serde(default)]
    pub max_streak: Option<u32>,
    #[serde(default)]
    pub last_session_time: Option<String>,
}


/// A `null` map or `null` entry reads as empty / zero minutes.
fn minutes_or_zero<'de, D>(deserializer: D) -> Result<MinuteMap, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<BTreeMap<String, Option<f64>>>::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|(key, value)| (key, value.unwrap_or(0.0)))
        .collect())
}


/// Errors raised while reading a dashboard data document.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("Dashboard data not found at {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed dashboard data: {0}")]
    Parse(#[from] serde_json::Error),
}


impl DashboardData {
    /// Parse a dashboard document from JSON text.
    pub fn from_json(text: &str) -> Result<Self, DataError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load a dashboard document from disk.
    pub fn load(path: &Path) -> Result<Self, DataError> {
        if !path.exists() {
            return Err(DataError::NotFound(path.to_path_buf()));
        }

        let text = std::fs::read_to_string(path).map_err(|source| DataError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let data = Self::from_json(&text)?;
        tracing::debug!(
            path = %path.display(),
            contribution = data.contribution_data.len(),
            weekly = data.weekly_data.len(),
            monthly = data.monthly_data.len(),
            yearly = data.yearly_data.len(),
            "Dashboard data loaded"
        );
        Ok(data)
    }

    /// Load a document, falling back to an empty one when it is missing or broken.
    pub fn load_or_empty(path: &Path) -> Self {
        match Self::load(path) {
            Ok(data) => data,
            Err(e) => {
                tracing::warn!(error = %e, "Using empty dashboard data");
                Self::default()
            }
        }
    }

    /// Focus minutes recorded for a `YYYY-MM-DD` key in the contribution map.
    pub fn contribution_minutes(&self, date_key: &str) -> u32 {
        self.contribution_data
            .get(date_key)
            .copied()
            .map(whole_minutes)
            .unwrap_or(0)
    }

    /// True when no series carries any entry.
    pub fn is_empty(&self) -> bool {
        self.contribution_data.is_empty()
            && self.weekly_data.is_empty()
            && self.monthly_data.is_empty()
            && self.yearly_data.is_empty()
    }
}


/// Round a raw minute value to a non-negative whole minute.
pub fn whole_minutes(value: f64) -> u32 {
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    value.round().min(u32::MAX as f64) as u32
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_backend_document() {
        let json = r#"{
            "contributionData": {"2026-10-19": 50, "2026-10-18": 12.6},
            "weeklyData": {"2026-10-19": 50},
            "monthlyData": {},
            "yearlyData": {"2026-10": 62},
            "totalHours": 1.0,
            "currentStreak": 2,
            "maxStreak": 4,
            "lastSessionTime": "2026-10-19T09:30:00"
        }"#;

        let data = DashboardData::from_json(json).unwrap();
        assert_eq!(data.contribution_minutes("2026-10-19"), 50);
        assert_eq!(data.contribution_minutes("2026-10-18"), 13);
        assert_eq!(data.contribution_minutes("2026-01-01"), 0);
        assert_eq!(data.current_streak, Some(2));
        assert_eq!(data.yearly_data.len(), 1);
    }

    #[test]
    fn test_null_values_read_as_zero() {
        let json = r#"{
            "contributionData": {"2026-10-19": null, "2026-10-18": 40},
            "weeklyData": null,
            "totalHours": null
        }"#;

        let data = DashboardData::from_json(json).unwrap();
        assert_eq!(data.contribution_minutes("2026-10-19"), 0);
        assert_eq!(data.contribution_minutes("2026-10-18"), 40);
        assert!(data.weekly_data.is_empty());
        assert!(data.total_hours.is_none());
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let data = DashboardData::from_json("{}").unwrap();
        assert!(data.is_empty());
        assert!(data.total_hours.is_none());
        assert!(data.last_session_time.is_none());
    }

    #[test]
    fn test_whole_minutes_clamps_negative_and_nan() {
        assert_eq!(whole_minutes(-5.0), 0);
        assert_eq!(whole_minutes(f64::NAN), 0);
        assert_eq!(whole_minutes(29.5), 30);
        assert_eq!(whole_minutes(29.4), 29);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = DashboardData::load(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, DataError::NotFound(_)));
    }

    #[test]
    fn test_load_or_empty_on_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let data = DashboardData::load_or_empty(file.path());
        assert!(data.is_empty());
    }
}
