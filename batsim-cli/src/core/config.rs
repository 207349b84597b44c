use batsim_quantities::rate::WattHourRate;
use bon::Builder;

use crate::core::{battery::BatteryParameters, error::Error, tariff::FixedTariff};

/// What to do when a meter counter goes backwards.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, clap::ValueEnum)]
pub enum RegressionPolicy {
    /// Feed the negative delta through the simulation as is.
    #[default]
    Propagate,

    /// Take the new reading as the baseline and skip the step.
    Rebase,
}

/// Immutable simulation parameters.
#[must_use]
#[derive(Copy, Clone, Debug, Builder)]
pub struct SimulationConfig {
    pub battery: BatteryParameters,

    pub fixed_tariff: FixedTariff,

    #[builder(default)]
    pub regression_policy: RegressionPolicy,
}

impl SimulationConfig {
    pub fn validate(self) -> Result<Self, Error> {
        self.battery.validate()?;
        for (field, rate) in
            [("usage_tariff", self.fixed_tariff.usage), ("feed_in_tariff", self.fixed_tariff.feed_in)]
        {
            if !rate.is_finite() || rate < WattHourRate::ZERO {
                return Err(Error::InvalidConfiguration { field, reason: "must be non-negative" });
            }
        }
        Ok(self)
    }
}
