use batsim_quantities::{energy::WattHours, power::Watts};
use bon::Builder;

use crate::core::{delta::MeterDelta, error::Error};

#[must_use]
#[derive(Copy, Clone, Debug, Builder)]
pub struct BatteryParameters {
    pub capacity: WattHours,

    pub charging_limit: Watts,

    pub discharging_limit: Watts,

    /// Fraction of energy lost on the round trip, each direction takes half of it.
    pub round_trip_loss: f64,
}

impl BatteryParameters {
    pub fn validate(self) -> Result<Self, Error> {
        if !self.capacity.is_finite() || !self.capacity.is_positive() {
            return Err(Error::InvalidConfiguration { field: "capacity", reason: "must be positive" });
        }
        if !self.charging_limit.is_finite() || !self.charging_limit.is_positive() {
            return Err(Error::InvalidConfiguration {
                field: "charging_limit",
                reason: "must be positive",
            });
        }
        if !self.discharging_limit.is_finite() || !self.discharging_limit.is_positive() {
            return Err(Error::InvalidConfiguration {
                field: "discharging_limit",
                reason: "must be positive",
            });
        }
        if !(0.0..1.0).contains(&self.round_trip_loss) {
            return Err(Error::InvalidConfiguration {
                field: "round_trip_loss",
                reason: "must be within [0, 1)",
            });
        }
        Ok(self)
    }

    /// Efficiency of a single direction.
    #[must_use]
    pub fn one_way_efficiency(&self) -> f64 {
        1.0 - self.round_trip_loss / 2.0
    }
}

/// Battery flows within a single step.
#[must_use]
#[derive(Copy, Clone, Debug, Default)]
pub struct BatteryFlow {
    /// Surplus taken off the grid export, before the losses.
    pub charge: WattHours,

    /// Energy which actually ends up stored.
    pub net_charge: WattHours,

    /// Requested from the battery to cover the usage, before the losses.
    pub discharge: WattHours,

    /// Energy which actually reaches the household and leaves the battery.
    pub net_discharge: WattHours,
}

impl BatteryFlow {
    /// Change of the residual energy, positive when charging.
    pub fn stored(&self) -> WattHours {
        self.net_charge - self.net_discharge
    }
}

#[must_use]
#[derive(Copy, Clone, Debug)]
pub struct Simulator {
    pub parameters: BatteryParameters,

    /// Current residual energy.
    pub residual_energy: WattHours,
}

impl Simulator {
    pub const fn new(parameters: BatteryParameters, residual_energy: WattHours) -> Self {
        Self { parameters, residual_energy }
    }

    /// Apply the meter delta as if the battery were installed and update the residual energy.
    ///
    /// The feed-in charges the battery and the usage discharges it, both may happen within the same step.
    pub fn apply(&mut self, delta: &MeterDelta) -> BatteryFlow {
        let efficiency = self.parameters.one_way_efficiency();
        let mut flow = BatteryFlow::default();

        if delta.feed_in > WattHours::ZERO {
            let max_charge = self.parameters.charging_limit * delta.interval;
            let room = self.parameters.capacity - self.residual_energy;
            flow.charge = delta.feed_in.min(max_charge).min(room).max(WattHours::ZERO);
            flow.net_charge = flow.charge * efficiency;
            self.residual_energy += flow.net_charge;
        }

        if delta.usage > WattHours::ZERO {
            let max_discharge = self.parameters.discharging_limit * delta.interval;
            flow.discharge =
                delta.usage.min(max_discharge).min(self.residual_energy).max(WattHours::ZERO);
            flow.net_discharge = flow.discharge * efficiency;
            self.residual_energy -= flow.net_discharge;
        }

        self.residual_energy = self.residual_energy.clamp(WattHours::ZERO, self.parameters.capacity);
        flow
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use batsim_quantities::time::Hours;

    use super::*;

    fn parameters(round_trip_loss: f64) -> BatteryParameters {
        BatteryParameters::builder()
            .capacity(WattHours::from(5000.0))
            .charging_limit(Watts::from(2500.0))
            .discharging_limit(Watts::from(2500.0))
            .round_trip_loss(round_trip_loss)
            .build()
    }

    fn delta(usage: f64, feed_in: f64, seconds: f64) -> MeterDelta {
        MeterDelta {
            usage: WattHours::from(usage),
            feed_in: WattHours::from(feed_in),
            interval: Hours::from_seconds(seconds),
        }
    }

    #[test]
    fn validation() {
        assert!(parameters(0.07).validate().is_ok());
        assert!(parameters(1.0).validate().is_err());
        assert!(parameters(-0.1).validate().is_err());

        let mut invalid = parameters(0.07);
        invalid.capacity = WattHours::ZERO;
        assert!(invalid.validate().is_err());

        let mut invalid = parameters(0.07);
        invalid.discharging_limit = Watts::from(-1.0);
        assert!(invalid.validate().is_err());
    }

    /// Charging is limited by the rate: 2500 W over 10 seconds.
    #[test]
    fn rate_limited_charging() {
        let mut simulator = Simulator::new(parameters(0.07), WattHours::from(2500.0));
        let flow = simulator.apply(&delta(0.0, 500.0, 10.0));
        assert_abs_diff_eq!(flow.charge.value(), 6.944, epsilon = 0.001);
        assert_abs_diff_eq!(flow.net_charge.value(), 6.944 * 0.965, epsilon = 0.001);
        assert_abs_diff_eq!(simulator.residual_energy.value(), 2506.70, epsilon = 0.01);
        assert_eq!(flow.discharge, WattHours::ZERO);
    }

    #[test]
    fn rate_limited_discharging() {
        let mut simulator = Simulator::new(parameters(0.0), WattHours::from(2500.0));
        let flow = simulator.apply(&delta(1_000_000.0, 0.0, 3600.0));
        assert_eq!(flow.discharge, WattHours::from(2500.0));
        assert_eq!(simulator.residual_energy, WattHours::ZERO);
    }

    #[test]
    fn charging_is_capped_by_the_room() {
        let mut simulator = Simulator::new(parameters(0.0), WattHours::from(4990.0));
        let flow = simulator.apply(&delta(0.0, 500.0, 3600.0));
        assert_eq!(flow.charge, WattHours::from(10.0));
        assert_eq!(simulator.residual_energy, WattHours::from(5000.0));
    }

    #[test]
    fn discharging_is_capped_by_the_residual_energy() {
        let mut simulator = Simulator::new(parameters(0.0), WattHours::from(3.0));
        let flow = simulator.apply(&delta(100.0, 0.0, 3600.0));
        assert_eq!(flow.discharge, WattHours::from(3.0));
        assert_eq!(simulator.residual_energy, WattHours::ZERO);
    }

    #[test]
    fn lossless_flows_are_preserved() {
        let mut simulator = Simulator::new(parameters(0.0), WattHours::from(2500.0));
        let flow = simulator.apply(&delta(50.0, 30.0, 600.0));
        assert_eq!(flow.net_charge, flow.charge);
        assert_eq!(flow.net_discharge, flow.discharge);
    }

    #[test]
    fn losses_reduce_both_directions() {
        let mut simulator = Simulator::new(parameters(0.07), WattHours::from(2500.0));
        let flow = simulator.apply(&delta(50.0, 30.0, 600.0));
        assert!(flow.charge > WattHours::ZERO);
        assert!(flow.discharge > WattHours::ZERO);
        assert!(flow.net_charge < flow.charge);
        assert!(flow.net_discharge < flow.discharge);
    }

    #[test]
    fn negative_deltas_do_nothing() {
        let mut simulator = Simulator::new(parameters(0.07), WattHours::from(2500.0));
        let flow = simulator.apply(&delta(-100.0, -100.0, 10.0));
        assert_eq!(flow.stored(), WattHours::ZERO);
        assert_eq!(simulator.residual_energy, WattHours::from(2500.0));
    }

    /// Pseudo-random walk, the residual energy must stay within the capacity.
    #[test]
    fn residual_energy_stays_within_bounds() {
        let mut simulator = Simulator::new(parameters(0.07), WattHours::from(2500.0));
        let mut seed: u64 = 42;
        for _ in 0..10_000 {
            seed = seed.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1_442_695_040_888_963_407);
            #[expect(clippy::cast_precision_loss)]
            let usage = (seed >> 40) as f64 / 1000.0;
            #[expect(clippy::cast_precision_loss)]
            let feed_in = ((seed >> 20) & 0xF_FFFF) as f64 / 100.0;
            let flow = simulator.apply(&delta(usage, feed_in, 60.0));
            assert!(flow.charge <= Watts::from(2500.0) * Hours::from_seconds(60.0));
            assert!(flow.discharge <= Watts::from(2500.0) * Hours::from_seconds(60.0));
            assert!(simulator.residual_energy >= WattHours::ZERO);
            assert!(simulator.residual_energy <= WattHours::from(5000.0));
        }
    }
}
