use std::{
    fmt::{Debug, Display, Formatter},
    ops::Mul,
};

use crate::{Quantity, energy::WattHours, time::Hours};

pub type Watts = Quantity<1, 0, 0>;

impl Watts {
    pub const fn from_kilowatts(kilowatts: f64) -> Self {
        Self::new(kilowatts * 1000.0)
    }
}

impl Display for Watts {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.0} W", self.0)
    }
}

impl Debug for Watts {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1}W", self.0)
    }
}

impl Mul<Hours> for Watts {
    type Output = WattHours;

    fn mul(self, rhs: Hours) -> Self::Output {
        Quantity(self.0 * rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_energy_over_ten_seconds() {
        let energy = Watts::from_kilowatts(2.5) * Hours::from_seconds(10.0);
        assert_abs_diff_eq!(energy.value(), 6.944, epsilon = 0.001);
    }
}
