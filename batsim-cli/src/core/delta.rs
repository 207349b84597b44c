use batsim_quantities::{energy::WattHours, power::Watts, time::Hours};
use chrono::TimeDelta;

use crate::{core::meter::MeterSnapshot, prelude::*};

/// Interval substituted for a missing or non-positive elapsed time.
pub const FALLBACK_INTERVAL: Hours = Hours::from_seconds(10.0);

/// Energy that went through the real meter between two snapshots.
#[must_use]
#[derive(Copy, Clone, Debug)]
pub struct MeterDelta {
    /// Imported from the grid.
    pub usage: WattHours,

    /// Exported to the grid.
    pub feed_in: WattHours,

    /// Always positive.
    pub interval: Hours,
}

impl MeterDelta {
    /// Net energy, positive when importing.
    pub fn net(&self) -> WattHours {
        self.usage - self.feed_in
    }

    /// Average net power over the interval.
    pub fn net_power(&self) -> Watts {
        self.net() / self.interval
    }

    /// Either counter went backwards, which only happens on a meter reset or a bad reading.
    #[must_use]
    pub fn is_regression(&self) -> bool {
        self.usage < WattHours::ZERO || self.feed_in < WattHours::ZERO
    }
}

/// Turn two consecutive snapshots into a delta.
///
/// Returns [`None`] on the very first snapshot: the caller is supposed to store it and wait for the next one.
/// Negative deltas are passed through as is.
pub fn extract_delta(
    previous: Option<&MeterSnapshot>,
    current: &MeterSnapshot,
    elapsed: TimeDelta,
) -> Option<MeterDelta> {
    let previous = previous?;
    let interval = if elapsed > TimeDelta::zero() {
        Hours::from(elapsed)
    } else {
        warn!(?elapsed, fallback = ?FALLBACK_INTERVAL, "non-positive interval");
        FALLBACK_INTERVAL
    };
    Some(MeterDelta {
        usage: current.usage_total() - previous.usage_total(),
        feed_in: current.return_total() - previous.return_total(),
        interval,
    })
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn snapshot(usage: (u64, u64), returned: (u64, u64)) -> MeterSnapshot {
        MeterSnapshot {
            usage_high: usage.0,
            usage_low: usage.1,
            return_high: returned.0,
            return_low: returned.1,
        }
    }

    #[test]
    fn bootstrap_has_no_delta() {
        assert!(extract_delta(None, &snapshot((1000, 0), (0, 0)), TimeDelta::seconds(10)).is_none());
    }

    #[test]
    fn net_power() {
        let delta = extract_delta(
            Some(&snapshot((1000, 0), (0, 0))),
            &snapshot((1000, 10), (0, 0)),
            TimeDelta::seconds(36),
        )
        .unwrap();
        assert_eq!(delta.usage, WattHours::from(10.0));
        assert_eq!(delta.feed_in, WattHours::ZERO);
        assert_abs_diff_eq!(delta.net_power().value(), 1000.0, epsilon = 1e-9);
    }

    #[test]
    fn non_positive_interval_falls_back() {
        let previous = snapshot((0, 0), (0, 0));
        let current = snapshot((0, 0), (0, 5));
        for elapsed in [TimeDelta::zero(), TimeDelta::seconds(-3)] {
            let delta = extract_delta(Some(&previous), &current, elapsed).unwrap();
            assert_eq!(delta.interval, FALLBACK_INTERVAL);
            assert_abs_diff_eq!(delta.net_power().value(), -1800.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn regression_is_propagated() {
        let delta = extract_delta(
            Some(&snapshot((500, 500), (0, 0))),
            &snapshot((0, 0), (0, 0)),
            TimeDelta::seconds(10),
        )
        .unwrap();
        assert!(delta.is_regression());
        assert_eq!(delta.usage, WattHours::from(-1000.0));
    }
}
