use batsim_quantities::{cost::Cost, energy::WattHours, rate::WattHourRate};
use serde::{Deserialize, Serialize};

use crate::core::{error::Error, flow::Flow};

/// Flat rates which do not change over time.
#[must_use]
#[derive(Copy, Clone, Debug)]
pub struct FixedTariff {
    pub usage: WattHourRate,
    pub feed_in: WattHourRate,
}

impl FixedTariff {
    /// Usage is charged, feed-in is credited.
    pub fn cost_of(&self, flow: Flow<WattHours>) -> Cost {
        flow.import * self.usage - flow.export * self.feed_in
    }
}

/// Most recently observed dynamic price.
#[must_use]
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DynamicTariff(WattHourRate);

impl DynamicTariff {
    pub const ZERO: Self = Self(WattHourRate::ZERO);

    pub const fn current(self) -> WattHourRate {
        self.0
    }

    /// Replace the price, the previous one is kept when the new one is rejected.
    pub fn observe(&mut self, rate: WattHourRate) -> Result<(), Error> {
        if !rate.is_finite() || rate < WattHourRate::ZERO {
            return Err(Error::MalformedInput(format!("dynamic tariff must be non-negative, got {rate:?}")));
        }
        self.0 = rate;
        Ok(())
    }

    /// The same rate applies to import and export.
    pub fn cost_of(self, flow: Flow<WattHours>) -> Cost {
        flow.net() * self.0
    }
}
