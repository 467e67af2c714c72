// Glucose reading domain model

/// Trend direction categories reported by the CGM upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendDirection {
    None,
    DoubleUp,
    SingleUp,
    FortyFiveUp,
    Flat,
    FortyFiveDown,
    SingleDown,
    DoubleDown,
    NotComputable,
    RateOutOfRange,
    Unrecognized,
}

impl TrendDirection {
    /// Map an upstream direction label to a category. Nightscout spells
    /// "not computable" two different ways depending on the uploader; both
    /// must land on the same category. Anything else becomes Unrecognized
    /// rather than failing the render.
    pub fn from_label(label: &str) -> Self {
        match label {
            "None" => TrendDirection::None,
            "DoubleUp" => TrendDirection::DoubleUp,
            "SingleUp" => TrendDirection::SingleUp,
            "FortyFiveUp" => TrendDirection::FortyFiveUp,
            "Flat" => TrendDirection::Flat,
            "FortyFiveDown" => TrendDirection::FortyFiveDown,
            "SingleDown" => TrendDirection::SingleDown,
            "DoubleDown" => TrendDirection::DoubleDown,
            "NotComputable" | "NOT COMPUTABLE" => TrendDirection::NotComputable,
            "RateOutOfRange" => TrendDirection::RateOutOfRange,
            _ => TrendDirection::Unrecognized,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            TrendDirection::None => "",
            TrendDirection::DoubleUp => "↑↑",
            TrendDirection::SingleUp => "↑",
            TrendDirection::FortyFiveUp => "↗",
            TrendDirection::Flat => "→",
            TrendDirection::FortyFiveDown => "↘",
            TrendDirection::SingleDown => "↓",
            TrendDirection::DoubleDown => "↓↓",
            TrendDirection::NotComputable => "!",
            TrendDirection::RateOutOfRange => "!!",
            TrendDirection::Unrecognized => "!",
        }
    }
}

/// One CGM measurement, value always in mg/dl.
#[derive(Debug, Clone)]
pub struct GlucoseReading {
    pub date_ms: i64,
    pub sgv: f64,
    pub trend: i32,
    pub direction: TrendDirection,
}

impl GlucoseReading {
    pub fn new(date_ms: i64, sgv: f64, trend: i32, direction: TrendDirection) -> Self {
        Self {
            date_ms,
            sgv,
            trend,
            direction,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_not_computable_spellings_share_a_symbol() {
        let a = TrendDirection::from_label("NotComputable");
        let b = TrendDirection::from_label("NOT COMPUTABLE");
        assert_eq!(a, b);
        assert_eq!(a.symbol(), "!");
    }

    #[test]
    fn test_unknown_direction_falls_back_instead_of_failing() {
        let direction = TrendDirection::from_label("TripleUp");
        assert_eq!(direction, TrendDirection::Unrecognized);
        assert_eq!(direction.symbol(), "!");
    }

    #[test]
    fn test_known_direction_symbols() {
        assert_eq!(TrendDirection::from_label("Flat").symbol(), "→");
        assert_eq!(TrendDirection::from_label("DoubleDown").symbol(), "↓↓");
        assert_eq!(TrendDirection::from_label("None").symbol(), "");
        assert_eq!(TrendDirection::from_label("RateOutOfRange").symbol(), "!!");
    }
}
