// Render service - Composes one page per request
use crate::application::glucose_repository::GlucoseRepository;
use crate::domain::formatting::{format_glucose_record, sign};
use crate::domain::reading::GlucoseReading;
use crate::domain::settings::DisplaySettings;
use crate::presentation::templates;
use std::sync::Arc;

/// How many readings make up the strip chart.
pub const RECORDS_TO_FETCH: usize = 18;

/// Short-term percent change, shown next to the headline when at least four
/// readings are available.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelativeChange {
    pub window: String,
    pub change: String,
}

/// Everything the templates need for one render.
pub struct PageModel<'a> {
    pub settings: &'a DisplaySettings,
    pub readings: &'a [GlucoseReading],
    pub headline: String,
    pub relative_change: Option<RelativeChange>,
}

#[derive(Clone)]
pub struct RenderService {
    repository: Arc<dyn GlucoseRepository>,
}

impl RenderService {
    pub fn new(repository: Arc<dyn GlucoseRepository>) -> Self {
        Self { repository }
    }

    /// One render: settings fetch, readings fetch, compose. Fetch failures
    /// propagate; there is no retry or partial page at this layer.
    pub async fn render_page(&self, url: &str, token: &str) -> anyhow::Result<String> {
        let settings = self.repository.fetch_settings(url, token).await?;
        let readings = self
            .repository
            .fetch_readings(url, token, RECORDS_TO_FETCH)
            .await?;
        tracing::debug!(
            readings = readings.len(),
            title = %settings.title,
            "composing page"
        );

        let model = PageModel {
            headline: headline(&settings, &readings),
            relative_change: relative_change(&readings),
            settings: &settings,
            readings: &readings,
        };
        Ok(templates::page(&model))
    }
}

/// Headline for the newest reading, with the delta against the previous one
/// when it exists. An empty reading set is a distinct literal state, not an
/// error.
pub fn headline(settings: &DisplaySettings, readings: &[GlucoseReading]) -> String {
    let Some(latest) = readings.first() else {
        return "NO DATA".to_string();
    };
    let delta = readings.get(1).map(|previous| latest.sgv - previous.sgv);
    format_glucose_record(settings, latest, delta)
}

/// Percent change between the newest and fourth-newest reading, with the
/// time window between them rounded to whole minutes.
pub fn relative_change(readings: &[GlucoseReading]) -> Option<RelativeChange> {
    let latest = readings.first()?;
    let older = readings.get(3)?;
    let percent = 100.0 * (latest.sgv - older.sgv) / older.sgv;
    let window_minutes = (latest.date_ms - older.date_ms) as f64 / 60000.0;
    Some(RelativeChange {
        window: format!("{:.0}m", window_minutes),
        change: format!("{}{:.0}%", sign(percent), percent.abs()),
    })
}
