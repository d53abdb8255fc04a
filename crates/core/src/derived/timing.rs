//! Next forecast-change time
//!
//! Refreshes are aligned to the previous update: the next change is the
//! first whole refresh interval after "now", counted from the last update.
//! Once the last update is older than the aging threshold an extra correction
//! is added, pushing the next change slightly later.

use crate::config::TimingConfig;
use crate::core_types::units::Hours;
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// When the forecast is next expected to change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextChange {
    /// Absolute time of the next change
    pub at: DateTime<Utc>,
    /// Whole minutes from now, rounded up
    pub minutes: i64,
}

/// Compute the next change time
///
/// # Arguments
///
/// * `last_update` - Time of the previous forecast update, if any
/// * `now` - Injected current time
/// * `config` - Refresh interval and aging settings
#[must_use]
pub fn next_change(
    last_update: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    config: &TimingConfig,
) -> NextChange {
    let interval = TimeDelta::minutes(i64::from(config.refresh_interval_min.max(1)));

    let at = match last_update {
        Some(last) if last <= now => {
            let elapsed = now - last;
            let periods = elapsed.num_seconds() / interval.num_seconds() + 1;
            let mut next = interval
                .num_seconds()
                .checked_mul(periods)
                .and_then(TimeDelta::try_seconds)
                .and_then(|offset| last.checked_add_signed(offset))
                .unwrap_or(now + interval);
            if *Hours::from_duration(elapsed) > config.aging_threshold_h {
                debug!(
                    "Last forecast update {:.1}h old, applying aging correction",
                    *Hours::from_duration(elapsed)
                );
                next += TimeDelta::minutes(i64::from(config.aging_correction_min));
            }
            next
        }
        _ => now + interval,
    };

    let seconds = (at - now).num_seconds();
    NextChange {
        at,
        minutes: (seconds + 59).div_euclid(60),
    }
}
