use batsim_quantities::{cost::Cost, energy::WattHours};
use derive_more::AddAssign;
use serde::{Deserialize, Serialize};

use crate::core::{
    flow::Flow,
    tariff::{DynamicTariff, FixedTariff},
};

/// Costs under both tariff schemes.
#[must_use]
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize, AddAssign)]
pub struct TariffCosts {
    pub fixed: Cost,
    pub dynamic: Cost,
}

impl TariffCosts {
    pub const ZERO: Self = Self { fixed: Cost::ZERO, dynamic: Cost::ZERO };

    pub fn of(flow: Flow<WattHours>, fixed: &FixedTariff, dynamic: DynamicTariff) -> Self {
        Self { fixed: fixed.cost_of(flow), dynamic: dynamic.cost_of(flow) }
    }
}

/// Running cost totals of the real and the simulated meters.
#[must_use]
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    pub real: TariffCosts,
    pub simulated: TariffCosts,
}

impl Ledger {
    pub const ZERO: Self = Self { real: TariffCosts::ZERO, simulated: TariffCosts::ZERO };

    pub fn record(
        &mut self,
        real: Flow<WattHours>,
        simulated: Flow<WattHours>,
        fixed: &FixedTariff,
        dynamic: DynamicTariff,
    ) {
        self.real += TariffCosts::of(real, fixed, dynamic);
        self.simulated += TariffCosts::of(simulated, fixed, dynamic);
    }

    /// Always derived from the totals, so they cannot drift apart.
    pub fn savings(&self) -> TariffCosts {
        TariffCosts {
            fixed: self.real.fixed - self.simulated.fixed,
            dynamic: self.real.dynamic - self.simulated.dynamic,
        }
    }
}
