//! Battery and tariff arguments shared by all the commands.

use batsim_quantities::{energy::WattHours, power::Watts, rate::WattHourRate};
use clap::Parser;

use crate::{
    core::{RegressionPolicy, SimulationConfig, battery::BatteryParameters, tariff::FixedTariff},
    prelude::*,
};

#[must_use]
#[derive(Parser)]
pub struct BatteryArgs {
    /// Usable battery capacity in kilowatt-hours.
    #[clap(long = "capacity-kwh", env = "CAPACITY_KWH", default_value = "5.0")]
    pub capacity: f64,

    /// Maximum charging power in kilowatts.
    #[clap(long = "charge-rate-kw", env = "CHARGE_RATE_KW", default_value = "2.5")]
    pub charging_limit: f64,

    /// Maximum discharging power in kilowatts.
    #[clap(long = "discharge-rate-kw", env = "DISCHARGE_RATE_KW", default_value = "2.5")]
    pub discharging_limit: f64,

    /// Round-trip loss percentage, split evenly between charging and discharging.
    #[clap(long = "loss-percent", env = "LOSS_PERCENT", default_value = "7")]
    pub loss_percent: f64,
}

impl BatteryArgs {
    pub fn parameters(&self) -> BatteryParameters {
        BatteryParameters::builder()
            .capacity(WattHours::from_kilowatt_hours(self.capacity))
            .charging_limit(Watts::from_kilowatts(self.charging_limit))
            .discharging_limit(Watts::from_kilowatts(self.discharging_limit))
            .round_trip_loss(self.loss_percent / 100.0)
            .build()
    }
}

#[must_use]
#[derive(Parser)]
pub struct TariffArgs {
    /// Fixed usage tariff per kilowatt-hour.
    #[clap(long = "usage-tariff", env = "USAGE_TARIFF", default_value = "0.22")]
    pub usage: f64,

    /// Fixed feed-in tariff per kilowatt-hour.
    #[clap(long = "feed-in-tariff", env = "FEED_IN_TARIFF", default_value = "0.08")]
    pub feed_in: f64,
}

impl TariffArgs {
    pub const fn fixed_tariff(&self) -> FixedTariff {
        FixedTariff {
            usage: WattHourRate::from_kilowatt_hour_rate(self.usage),
            feed_in: WattHourRate::from_kilowatt_hour_rate(self.feed_in),
        }
    }
}

#[must_use]
#[derive(Parser)]
pub struct SimulationArgs {
    #[clap(flatten)]
    pub battery: BatteryArgs,

    #[clap(flatten)]
    pub tariff: TariffArgs,

    #[clap(
        long = "on-counter-regression",
        env = "ON_COUNTER_REGRESSION",
        value_enum,
        default_value_t = RegressionPolicy::Propagate,
    )]
    pub regression_policy: RegressionPolicy,
}

impl SimulationArgs {
    pub fn config(&self) -> Result<SimulationConfig> {
        let config = SimulationConfig::builder()
            .battery(self.battery.parameters())
            .fixed_tariff(self.tariff.fixed_tariff())
            .regression_policy(self.regression_policy)
            .build()
            .validate()?;
        Ok(config)
    }
}
