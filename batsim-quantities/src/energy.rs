use std::{
    fmt::{Debug, Display, Formatter},
    ops::{Div, Mul},
};

use crate::{Quantity, cost::Cost, power::Watts, rate::WattHourRate, time::Hours};

pub type WattHours = Quantity<1, 1, 0>;

impl WattHours {
    pub const fn from_kilowatt_hours(kilowatt_hours: f64) -> Self {
        Self::new(kilowatt_hours * 1000.0)
    }

    /// Convert a meter counter reading.
    #[expect(clippy::cast_precision_loss)]
    pub const fn from_counter(watt_hours: u64) -> Self {
        Self::new(watt_hours as f64)
    }
}

impl Display for WattHours {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2} Wh", self.0)
    }
}

impl Debug for WattHours {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.3}Wh", self.0)
    }
}

impl Div<Hours> for WattHours {
    type Output = Watts;

    fn div(self, rhs: Hours) -> Self::Output {
        Quantity(self.0 / rhs.0)
    }
}

impl Mul<WattHourRate> for WattHours {
    type Output = Cost;

    fn mul(self, rhs: WattHourRate) -> Self::Output {
        Quantity(self.0 * rhs.0)
    }
}
