// Glucose value and timestamp formatting
use super::reading::GlucoseReading;
use super::settings::{DisplaySettings, DisplayUnits, MMOL_TO_MGDL};
use chrono::{TimeZone, Utc};

/// Render a mg/dl value in the configured display units. mmol/l readers get
/// one decimal place, mg/dl readers a rounded integer.
pub fn format_glucose_value(units: DisplayUnits, value_mgdl: f64) -> String {
    match units {
        DisplayUnits::Mmol => format!("{:.1}", value_mgdl / MMOL_TO_MGDL),
        DisplayUnits::Mgdl => format!("{:.0}", value_mgdl),
    }
}

/// Sign glyph for deltas and percentages. Uses a real minus sign, not a
/// hyphen, so it reads well at large font sizes.
pub fn sign(x: f64) -> &'static str {
    if x >= 0.0 { "+" } else { "\u{2212}" }
}

/// Compose the headline: current value, trend arrow, and the signed change
/// since the previous reading (omitted when there is no previous reading).
pub fn format_glucose_record(
    settings: &DisplaySettings,
    reading: &GlucoseReading,
    delta: Option<f64>,
) -> String {
    let current = format_glucose_value(settings.display_units, reading.sgv);
    let delta_string = match delta {
        Some(d) => format!(
            "{}{}",
            sign(d),
            format_glucose_value(settings.display_units, d.abs())
        ),
        None => String::new(),
    };
    format!("{}{} {}", current, reading.direction.symbol(), delta_string)
}

/// Zero-padded HH:MM in UTC. Only an initial server-side label; the embedded
/// script rewrites every timestamp into the viewer's local time on load.
pub fn format_time(time_ms: i64) -> String {
    match Utc.timestamp_millis_opt(time_ms).single() {
        Some(time) => time.format("%H:%M").to_string(),
        None => "--:--".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::reading::TrendDirection;
    use crate::domain::settings::TargetRange;

    fn settings(units: DisplayUnits) -> DisplaySettings {
        DisplaySettings {
            title: "Test CGM".to_string(),
            nightscout_url: "https://example.com".to_string(),
            display_units: units,
            target_range: TargetRange {
                lower_mgdl: 80.0,
                upper_mgdl: 180.0,
            },
        }
    }

    #[test]
    fn test_mgdl_values_render_as_integers() {
        assert_eq!(format_glucose_value(DisplayUnits::Mgdl, 142.0), "142");
    }

    #[test]
    fn test_mmol_values_render_with_one_decimal() {
        assert_eq!(format_glucose_value(DisplayUnits::Mmol, 180.18018018), "10.0");
        assert_eq!(format_glucose_value(DisplayUnits::Mmol, 99.0), "5.5");
    }

    #[test]
    fn test_sign_glyphs() {
        assert_eq!(sign(0.0), "+");
        assert_eq!(sign(3.5), "+");
        assert_eq!(sign(-0.01), "\u{2212}");
    }

    #[test]
    fn test_record_with_delta() {
        let reading = GlucoseReading::new(0, 142.0, 0, TrendDirection::Flat);
        let formatted = format_glucose_record(&settings(DisplayUnits::Mgdl), &reading, Some(-6.0));
        assert_eq!(formatted, "142→ \u{2212}6");
    }

    #[test]
    fn test_record_without_delta_omits_it() {
        let reading = GlucoseReading::new(0, 142.0, 0, TrendDirection::SingleUp);
        let formatted = format_glucose_record(&settings(DisplayUnits::Mgdl), &reading, None);
        assert_eq!(formatted, "142↑ ");
    }

    #[test]
    fn test_time_is_zero_padded() {
        // 2024-01-01 07:05:00 UTC
        assert_eq!(format_time(1704092700000), "07:05");
    }
}
