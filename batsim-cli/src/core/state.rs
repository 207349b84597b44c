use batsim_quantities::energy::WattHours;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::core::{ledger::Ledger, meter::MeterSnapshot, tariff::DynamicTariff};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Phase {
    /// No meter snapshot has been seen yet.
    Uninitialized,

    /// The baseline snapshot is stored, but no step has been made.
    Bootstrapped,

    Running,
}

/// Everything the engine mutates, and the only thing preserved between runs.
#[must_use]
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    pub last_snapshot: Option<MeterSnapshot>,

    pub last_event_time: Option<DateTime<Local>>,

    /// State of charge in watt-hours.
    pub residual_energy: WattHours,

    #[serde(default)]
    pub dynamic_tariff: DynamicTariff,

    #[serde(default)]
    pub ledger: Ledger,

    /// Cumulative signed energy of the simulated meter, positive when importing.
    #[serde(default)]
    pub simulated_meter: WattHours,

    #[serde(default)]
    pub n_steps: u64,
}

impl SimulationState {
    pub const fn new(residual_energy: WattHours) -> Self {
        Self {
            last_snapshot: None,
            last_event_time: None,
            residual_energy,
            dynamic_tariff: DynamicTariff::ZERO,
            ledger: Ledger::ZERO,
            simulated_meter: WattHours::ZERO,
            n_steps: 0,
        }
    }

    pub const fn phase(&self) -> Phase {
        match (&self.last_snapshot, self.n_steps) {
            (None, _) => Phase::Uninitialized,
            (Some(_), 0) => Phase::Bootstrapped,
            (Some(_), _) => Phase::Running,
        }
    }
}
