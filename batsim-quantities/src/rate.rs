use std::fmt::{Debug, Display, Formatter};

use crate::Quantity;

/// Euro per watt-hour.
pub type WattHourRate = Quantity<-1, -1, 1>;

impl WattHourRate {
    pub const fn from_kilowatt_hour_rate(per_kilowatt_hour: f64) -> Self {
        Self::new(per_kilowatt_hour / 1000.0)
    }

    #[must_use]
    pub const fn per_kilowatt_hour(self) -> f64 {
        self.0.0 * 1000.0
    }
}

impl Display for WattHourRate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.3} €/kWh", self.per_kilowatt_hour())
    }
}

impl Debug for WattHourRate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.5}€/kWh", self.per_kilowatt_hour())
    }
}
