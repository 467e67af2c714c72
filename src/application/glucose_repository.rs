// Repository trait for the upstream CGM data source
use crate::domain::reading::GlucoseReading;
use crate::domain::settings::DisplaySettings;
use async_trait::async_trait;

#[async_trait]
pub trait GlucoseRepository: Send + Sync {
    /// Fetch display settings (title, units, target range) from the upstream
    /// source. Ambiguous threshold units are resolved here so callers only
    /// ever see mg/dl.
    async fn fetch_settings(&self, url: &str, token: &str) -> anyhow::Result<DisplaySettings>;

    /// Fetch up to `count` readings, newest first.
    async fn fetch_readings(
        &self,
        url: &str,
        token: &str,
        count: usize,
    ) -> anyhow::Result<Vec<GlucoseReading>>;
}
