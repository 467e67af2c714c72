// Nightscout REST API repository implementation
use crate::application::glucose_repository::GlucoseRepository;
use crate::domain::reading::{GlucoseReading, TrendDirection};
use crate::domain::settings::{DisplaySettings, DisplayUnits, TargetRange};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

// The status endpoint is small; the entries endpoint can be slow on
// resource-starved Nightscout instances.
const STATUS_TIMEOUT: Duration = Duration::from_secs(10);
const ENTRIES_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct NightscoutRepository {
    client: reqwest::Client,
}

// Strict payload shapes: a status response without thresholds is a
// misconfigured upstream and must fail the render, not be guessed around.
#[derive(Debug, Deserialize)]
struct StatusResponse {
    settings: StatusSettings,
}

#[derive(Debug, Deserialize)]
struct StatusSettings {
    #[serde(rename = "customTitle", default)]
    custom_title: Option<String>,
    units: String,
    thresholds: Thresholds,
}

#[derive(Debug, Deserialize)]
struct Thresholds {
    #[serde(rename = "bgTargetBottom")]
    bg_target_bottom: f64,
    #[serde(rename = "bgTargetTop")]
    bg_target_top: f64,
}

#[derive(Debug, Deserialize)]
struct SgvEntry {
    date: i64,
    sgv: f64,
    #[serde(default)]
    trend: Option<i32>,
    #[serde(default)]
    direction: Option<String>,
}

impl NightscoutRepository {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    fn status_url(base_url: &str, token: &str) -> String {
        format!(
            "{}/api/v1/status.json?token={}",
            base_url.trim_end_matches('/'),
            urlencoding::encode(token)
        )
    }

    fn entries_url(base_url: &str, token: &str, count: usize) -> String {
        format!(
            "{}/api/v1/entries/sgv.json?count={}&token={}",
            base_url.trim_end_matches('/'),
            count,
            urlencoding::encode(token)
        )
    }

    fn settings_from_status(base_url: &str, status: StatusResponse) -> DisplaySettings {
        let thresholds = &status.settings.thresholds;
        DisplaySettings {
            title: status.settings.custom_title.unwrap_or_default(),
            nightscout_url: base_url.to_string(),
            display_units: DisplayUnits::from_label(&status.settings.units),
            target_range: TargetRange::from_thresholds(
                thresholds.bg_target_bottom,
                thresholds.bg_target_top,
            ),
        }
    }

    fn reading_from_entry(entry: SgvEntry) -> GlucoseReading {
        let direction = match entry.direction.as_deref() {
            Some(label) => TrendDirection::from_label(label),
            None => TrendDirection::None,
        };
        GlucoseReading::new(entry.date, entry.sgv, entry.trend.unwrap_or(0), direction)
    }
}

#[async_trait]
impl GlucoseRepository for NightscoutRepository {
    async fn fetch_settings(&self, url: &str, token: &str) -> Result<DisplaySettings> {
        tracing::debug!("fetching Nightscout settings");
        let response = self
            .client
            .get(Self::status_url(url, token))
            .timeout(STATUS_TIMEOUT)
            .send()
            .await
            .context("failed to reach Nightscout status endpoint")?;

        if !response.status().is_success() {
            anyhow::bail!("Nightscout status request failed: {}", response.status());
        }

        let status = response
            .json::<StatusResponse>()
            .await
            .context("malformed Nightscout status payload")?;

        Ok(Self::settings_from_status(url, status))
    }

    async fn fetch_readings(
        &self,
        url: &str,
        token: &str,
        count: usize,
    ) -> Result<Vec<GlucoseReading>> {
        tracing::debug!(count, "fetching glucose readings");
        let response = self
            .client
            .get(Self::entries_url(url, token, count))
            .timeout(ENTRIES_TIMEOUT)
            .send()
            .await
            .context("failed to reach Nightscout entries endpoint")?;

        if !response.status().is_success() {
            anyhow::bail!("Nightscout entries request failed: {}", response.status());
        }

        let entries = response
            .json::<Vec<SgvEntry>>()
            .await
            .context("malformed Nightscout entries payload")?;

        Ok(entries
            .into_iter()
            .map(Self::reading_from_entry)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_payload_parses_and_resolves_units() {
        let payload = r#"{
            "settings": {
                "customTitle": "Home CGM",
                "units": "mmol",
                "thresholds": {
                    "bgTargetBottom": 4.0,
                    "bgTargetTop": 10.0,
                    "bgHigh": 14.0,
                    "bgLow": 3.0
                }
            },
            "version": "15.0.2"
        }"#;
        let status: StatusResponse = serde_json::from_str(payload).unwrap();
        let settings = NightscoutRepository::settings_from_status("https://ns.example.com/", status);

        assert_eq!(settings.title, "Home CGM");
        assert_eq!(settings.display_units, DisplayUnits::Mmol);
        // Thresholds under 30 were in mmol/l and got converted.
        assert!(settings.target_range.upper_mgdl > 180.0);
        assert!(settings.target_range.lower_mgdl < settings.target_range.upper_mgdl);
    }

    #[test]
    fn test_status_payload_without_thresholds_is_rejected() {
        let payload = r#"{"settings": {"units": "mg/dl"}}"#;
        assert!(serde_json::from_str::<StatusResponse>(payload).is_err());
    }

    #[test]
    fn test_entry_parsing_tolerates_missing_direction() {
        let payload = r#"[
            {"date": 1700000000000, "sgv": 142, "trend": 4, "direction": "Flat"},
            {"date": 1699999700000, "sgv": 138}
        ]"#;
        let entries: Vec<SgvEntry> = serde_json::from_str(payload).unwrap();
        let readings: Vec<GlucoseReading> = entries
            .into_iter()
            .map(NightscoutRepository::reading_from_entry)
            .collect();

        assert_eq!(readings[0].direction, TrendDirection::Flat);
        assert_eq!(readings[0].sgv, 142.0);
        assert_eq!(readings[1].direction, TrendDirection::None);
        assert_eq!(readings[1].trend, 0);
    }

    #[test]
    fn test_urls_encode_the_token() {
        let url = NightscoutRepository::entries_url("https://ns.example.com/", "a b&c", 18);
        assert_eq!(
            url,
            "https://ns.example.com/api/v1/entries/sgv.json?count=18&token=a%20b%26c"
        );
    }
}
