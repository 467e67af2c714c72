// Data-age state machine driving the adaptive page refresh
//
// The same policy ships to the device as the embedded client script
// (presentation::client_script); this module is the reference model and the
// single source of truth for the cadence constants embedded into the page.

/// How often the CGM normally pushes an update, in seconds.
pub const STANDARD_CGM_UPDATE_INTERVAL_SECS: f64 = 300.0;
/// Past this age we assume a longer-lasting outage (e.g. sensor warmup)
/// rather than a transient failure.
pub const DATA_MISSING_TOO_LONG_SECS: f64 = 3.0 * STANDARD_CGM_UPDATE_INTERVAL_SECS;
/// Evaluation cadence of the on-device timer loop.
pub const TICK_INTERVAL_SECS: f64 = 20.0;

const TRANSIENT_RELOAD_AFTER_SECS: f64 = 20.0;
const CONSERVATIVE_RELOAD_AFTER_SECS: f64 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StalenessState {
    Fresh,
    Stale,
    NoData,
}

/// Outcome of one timer tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickDecision {
    pub state: StalenessState,
    pub reload: bool,
    /// Whether the page should carry the stale-data style. Decided purely by
    /// data age, independent of whether this tick reloads.
    pub stale_style: bool,
}

/// Owned refresh context: tracks when the page was loaded so reload pacing
/// survives lost connectivity. Clocks are injected as plain epoch-ms values
/// to keep the transitions testable.
#[derive(Debug, Clone)]
pub struct RefreshContext {
    load_time_ms: i64,
}

impl RefreshContext {
    pub fn new(load_time_ms: i64) -> Self {
        Self { load_time_ms }
    }

    /// A hard reload restarts the whole page; the context starts over with it.
    pub fn reset(&mut self, now_ms: i64) {
        self.load_time_ms = now_ms;
    }

    /// Evaluate one tick. `newest_reading_ms` is the timestamp embedded in
    /// the newest reading, or None when the page rendered without data.
    pub fn evaluate(&self, now_ms: i64, newest_reading_ms: Option<i64>) -> TickDecision {
        let since_load_secs = (now_ms - self.load_time_ms) as f64 / 1000.0;

        let Some(reading_ms) = newest_reading_ms else {
            // Nothing to age-check. Just retry once a minute.
            return TickDecision {
                state: StalenessState::NoData,
                reload: since_load_secs > CONSERVATIVE_RELOAD_AFTER_SECS,
                stale_style: false,
            };
        };

        let age_secs = (now_ms - reading_ms) as f64 / 1000.0;
        let stale_style = age_secs >= DATA_MISSING_TOO_LONG_SECS;

        if age_secs <= STANDARD_CGM_UPDATE_INTERVAL_SECS {
            return TickDecision {
                state: StalenessState::Fresh,
                reload: false,
                stale_style,
            };
        }

        // Data is overdue. Under the missing-too-long threshold we assume a
        // transient failure and retry aggressively; past it we back off to
        // once a minute to conserve the device battery.
        let reload_after = if age_secs < DATA_MISSING_TOO_LONG_SECS {
            TRANSIENT_RELOAD_AFTER_SECS
        } else {
            CONSERVATIVE_RELOAD_AFTER_SECS
        };

        TickDecision {
            state: StalenessState::Stale,
            reload: since_load_secs > reload_after,
            stale_style,
        }
    }
}
