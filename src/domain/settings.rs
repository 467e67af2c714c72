// Display settings and unit handling

/// Conversion factor between mmol/l and mg/dl.
pub const MMOL_TO_MGDL: f64 = 18.018018018;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayUnits {
    Mgdl,
    Mmol,
}

impl DisplayUnits {
    /// Nightscout reports units as a free-form label ("mg/dl", "mmol", "mmol/L").
    pub fn from_label(label: &str) -> Self {
        if label.starts_with("mmol") {
            DisplayUnits::Mmol
        } else {
            DisplayUnits::Mgdl
        }
    }
}

/// Clinician-configured healthy band, always held in mg/dl.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetRange {
    pub lower_mgdl: f64,
    pub upper_mgdl: f64,
}

impl TargetRange {
    /// Build a target range from upstream thresholds whose unit system is not
    /// labeled. CGMs can't measure values over 30 mmol/l, and at the same time
    /// it makes no sense to set the range top below 30 mg/dl (1.6 mmol/l), so
    /// the two value ranges are disjoint and the guess is deterministic.
    pub fn from_thresholds(bottom: f64, top: f64) -> Self {
        let factor = if top >= 30.0 { 1.0 } else { MMOL_TO_MGDL };
        Self {
            lower_mgdl: bottom * factor,
            upper_mgdl: top * factor,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DisplaySettings {
    pub title: String,
    pub nightscout_url: String,
    pub display_units: DisplayUnits,
    pub target_range: TargetRange,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thresholds_already_in_mgdl_pass_through() {
        let range = TargetRange::from_thresholds(80.0, 180.0);
        assert_eq!(range.lower_mgdl, 80.0);
        assert_eq!(range.upper_mgdl, 180.0);

        // Exactly at the boundary counts as mg/dl.
        let range = TargetRange::from_thresholds(20.0, 30.0);
        assert_eq!(range.upper_mgdl, 30.0);
    }

    #[test]
    fn test_mmol_thresholds_are_converted() {
        let range = TargetRange::from_thresholds(4.0, 10.0);
        assert!((range.lower_mgdl - 4.0 * MMOL_TO_MGDL).abs() < 1e-9);
        assert!((range.upper_mgdl - 10.0 * MMOL_TO_MGDL).abs() < 1e-9);
    }

    #[test]
    fn test_units_from_label() {
        assert_eq!(DisplayUnits::from_label("mg/dl"), DisplayUnits::Mgdl);
        assert_eq!(DisplayUnits::from_label("mmol"), DisplayUnits::Mmol);
        assert_eq!(DisplayUnits::from_label("mmol/L"), DisplayUnits::Mmol);
    }
}
