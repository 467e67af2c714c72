// Chart layout engine: vertical range selection and coordinate mapping
use super::reading::GlucoseReading;
use super::settings::DisplaySettings;

pub const CHART_HEIGHT: f64 = 465.0;
// Room reserved at the top and bottom for value/time labels.
pub const CHART_VERTICAL_PADDING: f64 = 25.0;
pub const POINT_WIDTH: f64 = 30.0;

/// The fixed wide fallback range, wide enough for any plausible excursion.
pub const MAX_CHART_RANGE_MGDL: ChartRange = ChartRange {
    low: 55.0,
    high: 270.0,
};

const HEALTHY_RANGE_MARGIN_MGDL: f64 = 40.0;

/// Vertical value range of the chart, in mg/dl.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartRange {
    pub low: f64,
    pub high: f64,
}

/// One laid-out chart point, oldest first. The high/low flags feed CSS
/// classes that don't currently change the appearance; they are kept for
/// future styling.
#[derive(Debug, Clone)]
pub struct ChartPoint {
    pub left: f64,
    pub bottom: f64,
    pub time_ms: i64,
    pub value_mgdl: f64,
    pub high: bool,
    pub low: bool,
}

/// Adaptive range: don't waste vertical room while values sit in the healthy
/// band. Only ever switches between two ranges so consecutive renders don't
/// jump around confusingly.
pub fn determine_range(settings: &DisplaySettings, readings: &[GlucoseReading]) -> ChartRange {
    let max = readings.iter().fold(0.0_f64, |acc, r| acc.max(r.sgv));
    let healthy_max = settings.target_range.upper_mgdl + HEALTHY_RANGE_MARGIN_MGDL;
    if max <= healthy_max {
        ChartRange {
            low: MAX_CHART_RANGE_MGDL.low,
            high: healthy_max,
        }
    } else {
        MAX_CHART_RANGE_MGDL
    }
}

/// Linear interpolation of a value into the drawable extent, clipped so
/// out-of-range values pin to the chart edge instead of overflowing.
pub fn map_to_position(range: ChartRange, value: f64) -> f64 {
    let drawable = CHART_HEIGHT - 2.0 * CHART_VERTICAL_PADDING;
    let raw = drawable * (value - range.low) / (range.high - range.low);
    CHART_VERTICAL_PADDING + raw.clamp(0.0, drawable)
}

/// Lay out readings chronologically (oldest at the left edge) at a fixed
/// per-point width. Input is newest first, as fetched.
pub fn layout_points(
    settings: &DisplaySettings,
    range: ChartRange,
    readings: &[GlucoseReading],
) -> Vec<ChartPoint> {
    readings
        .iter()
        .rev()
        .enumerate()
        .map(|(i, reading)| ChartPoint {
            left: i as f64 * POINT_WIDTH,
            bottom: map_to_position(range, reading.sgv),
            time_ms: reading.date_ms,
            value_mgdl: reading.sgv,
            high: reading.sgv >= settings.target_range.upper_mgdl,
            low: reading.sgv <= settings.target_range.lower_mgdl,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::reading::TrendDirection;
    use crate::domain::settings::{DisplayUnits, TargetRange};

    fn settings() -> DisplaySettings {
        DisplaySettings {
            title: "Test CGM".to_string(),
            nightscout_url: "https://example.com".to_string(),
            display_units: DisplayUnits::Mgdl,
            target_range: TargetRange {
                lower_mgdl: 80.0,
                upper_mgdl: 180.0,
            },
        }
    }

    fn reading(date_ms: i64, sgv: f64) -> GlucoseReading {
        GlucoseReading::new(date_ms, sgv, 0, TrendDirection::Flat)
    }

    #[test]
    fn test_determine_range_is_binary() {
        let settings = settings();
        let healthy = ChartRange {
            low: 55.0,
            high: 220.0,
        };

        // Healthy data, including exactly at the ceiling.
        assert_eq!(determine_range(&settings, &[reading(0, 120.0)]), healthy);
        assert_eq!(determine_range(&settings, &[reading(0, 220.0)]), healthy);

        // Anything above the ceiling falls back to the wide default.
        assert_eq!(
            determine_range(&settings, &[reading(0, 221.0)]),
            MAX_CHART_RANGE_MGDL
        );

        // Empty data counts as max 0, i.e. healthy.
        assert_eq!(determine_range(&settings, &[]), healthy);
    }

    #[test]
    fn test_map_to_position_is_monotonic_and_clamped() {
        let range = ChartRange {
            low: 55.0,
            high: 270.0,
        };
        let drawable = CHART_HEIGHT - 2.0 * CHART_VERTICAL_PADDING;

        let mut previous = f64::NEG_INFINITY;
        for value in [-100.0, 0.0, 55.0, 100.0, 200.0, 270.0, 500.0] {
            let position = map_to_position(range, value);
            assert!(position >= CHART_VERTICAL_PADDING);
            assert!(position <= CHART_VERTICAL_PADDING + drawable);
            assert!(position >= previous);
            previous = position;
        }

        // Range endpoints land exactly on the drawable edges.
        assert_eq!(map_to_position(range, 55.0), CHART_VERTICAL_PADDING);
        assert_eq!(
            map_to_position(range, 270.0),
            CHART_VERTICAL_PADDING + drawable
        );
    }

    #[test]
    fn test_layout_is_chronological() {
        let settings = settings();
        // Newest first, as fetched.
        let readings = vec![reading(3000, 130.0), reading(2000, 120.0), reading(1000, 110.0)];
        let range = determine_range(&settings, &readings);
        let points = layout_points(&settings, range, &readings);

        assert_eq!(points.len(), 3);
        assert_eq!(points[0].time_ms, 1000);
        assert_eq!(points[0].left, 0.0);
        assert_eq!(points[2].time_ms, 3000);
        assert_eq!(points[2].left, 2.0 * POINT_WIDTH);
    }

    #[test]
    fn test_points_at_target_bounds_are_classified() {
        let settings = settings();
        let readings = vec![reading(3000, 180.0), reading(2000, 120.0), reading(1000, 80.0)];
        let range = determine_range(&settings, &readings);
        let points = layout_points(&settings, range, &readings);

        assert!(points[0].low && !points[0].high);
        assert!(!points[1].low && !points[1].high);
        assert!(points[2].high && !points[2].low);
    }
}
