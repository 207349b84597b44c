use batsim_quantities::energy::WattHours;
use chrono::{DateTime, Local, TimeDelta};

use crate::{
    core::{
        battery::Simulator,
        config::{RegressionPolicy, SimulationConfig},
        delta::{MeterDelta, extract_delta},
        error::Error,
        event::Event,
        flow::Flow,
        meter::MeterSnapshot,
        outputs::{Outputs, Powers},
        state::{Phase, SimulationState},
    },
    prelude::*,
};

/// Outcome of a single event.
#[must_use]
#[derive(Copy, Clone, Debug)]
pub enum Observation {
    TariffUpdated,

    /// The first snapshot got stored as the baseline.
    Bootstrapped,

    /// A counter went backwards and the new snapshot became the baseline.
    Rebased,

    Stepped(Outputs),
}

/// Virtual battery simulation driven by the meter and tariff events.
///
/// Callers must serialize the access: every call runs to completion and mutates the state.
#[must_use]
pub struct Engine {
    config: SimulationConfig,
    state: SimulationState,

    /// Not persisted, only meaningful after a step.
    power: Powers,
}

impl Engine {
    /// Start from a fresh state with the given state of charge, as a fraction of the capacity.
    pub fn fresh(config: SimulationConfig, state_of_charge: f64) -> Result<Self, Error> {
        let config = config.validate()?;
        if !(0.0..=1.0).contains(&state_of_charge) {
            return Err(Error::InvalidConfiguration {
                field: "initial_state_of_charge",
                reason: "must be within [0, 1]",
            });
        }
        let state = SimulationState::new(config.battery.capacity * state_of_charge);
        Ok(Self { config, state, power: Powers::default() })
    }

    /// Resume from a previously saved state.
    pub fn restore(config: SimulationConfig, mut state: SimulationState) -> Result<Self, Error> {
        let config = config.validate()?;
        let clamped = state.residual_energy.clamp(WattHours::ZERO, config.battery.capacity);
        if clamped != state.residual_energy {
            warn!(
                residual_energy = ?state.residual_energy,
                capacity = ?config.battery.capacity,
                "restored residual energy is out of bounds, clamping",
            );
            state.residual_energy = clamped;
        }
        Ok(Self { config, state, power: Powers::default() })
    }

    pub const fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub const fn state(&self) -> &SimulationState {
        &self.state
    }

    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn apply(&mut self, event: Event) -> Result<Observation, Error> {
        match event {
            Event::Tariff(rate) => {
                self.state.dynamic_tariff.observe(rate)?;
                debug!(?rate, "updated the dynamic tariff");
                Ok(Observation::TariffUpdated)
            }
            Event::Meter { snapshot, at } => Ok(self.observe_meter(snapshot, at)),
        }
    }

    /// Process the next meter snapshot: the first one is only stored, the following ones make a step.
    pub fn observe_meter(&mut self, snapshot: MeterSnapshot, at: DateTime<Local>) -> Observation {
        let elapsed = self.state.last_event_time.map_or_else(TimeDelta::zero, |last| at - last);
        let previous = self.state.last_snapshot.replace(snapshot);
        self.state.last_event_time = Some(at);

        let Some(delta) = extract_delta(previous.as_ref(), &snapshot, elapsed) else {
            info!(?snapshot, "stored the initial snapshot");
            return Observation::Bootstrapped;
        };
        if delta.is_regression() {
            warn!(
                usage = ?delta.usage,
                feed_in = ?delta.feed_in,
                policy = ?self.config.regression_policy,
                "meter counter regression",
            );
            if self.config.regression_policy == RegressionPolicy::Rebase {
                return Observation::Rebased;
            }
        }
        Observation::Stepped(self.step(&delta))
    }

    fn step(&mut self, delta: &MeterDelta) -> Outputs {
        let mut simulator = Simulator::new(self.config.battery, self.state.residual_energy);
        let battery = simulator.apply(delta);
        self.state.residual_energy = simulator.residual_energy;

        let real = Flow { import: delta.usage, export: delta.feed_in };
        // The battery absorbs the charge from the export and covers the usage with the net discharge,
        // so the simulated net is `net + charge − net_discharge` and not `net − charge + net_discharge`:
        let simulated = Flow {
            import: delta.usage - battery.net_discharge,
            export: delta.feed_in - battery.charge,
        };
        debug!(?delta, ?battery, ?simulated, "simulated");

        self.state.ledger.record(
            real,
            simulated,
            &self.config.fixed_tariff,
            self.state.dynamic_tariff,
        );
        self.state.simulated_meter += simulated.net();
        self.state.n_steps += 1;
        self.power = Powers {
            net: delta.net_power(),
            battery: battery.stored() / delta.interval,
            simulated: simulated.net() / delta.interval,
        };

        let outputs = self.outputs();
        info!(
            state_of_charge = format_args!("{:.1}%", outputs.state_of_charge),
            net_power = %outputs.power.net,
            battery_power = %outputs.power.battery,
            simulated_power = %outputs.power.simulated,
            saving_fixed = %outputs.savings.fixed,
            saving_dynamic = %outputs.savings.dynamic,
            "step",
        );
        outputs
    }

    /// Current view of the state, the powers are those of the last step.
    pub fn outputs(&self) -> Outputs {
        Outputs {
            state_of_charge: self.state.residual_energy / self.config.battery.capacity * 100.0,
            residual_energy: self.state.residual_energy,
            simulated_meter: self.state.simulated_meter,
            power: self.power,
            costs: self.state.ledger,
            savings: self.state.ledger.savings(),
        }
    }
}
