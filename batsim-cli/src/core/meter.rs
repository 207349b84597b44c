use batsim_quantities::energy::WattHours;
use bon::Builder;
use serde::{Deserialize, Serialize};

/// Cumulative P1 meter counters in watt-hours.
#[must_use]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize, Builder)]
pub struct MeterSnapshot {
    pub usage_high: u64,
    pub usage_low: u64,
    pub return_high: u64,
    pub return_low: u64,
}

impl MeterSnapshot {
    pub const fn usage_total(&self) -> WattHours {
        WattHours::from_counter(self.usage_high.saturating_add(self.usage_low))
    }

    pub const fn return_total(&self) -> WattHours {
        WattHours::from_counter(self.return_high.saturating_add(self.return_low))
    }
}
