use batsim_quantities::{energy::WattHours, power::Watts};

use crate::core::ledger::{Ledger, TariffCosts};

/// Average powers over the last step.
#[must_use]
#[derive(Copy, Clone, Debug, Default)]
pub struct Powers {
    /// Real meter, positive when importing.
    pub net: Watts,

    /// Positive when charging.
    pub battery: Watts,

    /// Simulated meter, positive when importing.
    pub simulated: Watts,
}

/// Values published after each step.
#[must_use]
#[derive(Copy, Clone, Debug)]
pub struct Outputs {
    /// Percentage of the capacity.
    pub state_of_charge: f64,

    pub residual_energy: WattHours,

    pub simulated_meter: WattHours,

    pub power: Powers,

    pub costs: Ledger,

    pub savings: TariffCosts,
}
